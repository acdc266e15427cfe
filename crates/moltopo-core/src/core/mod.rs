//! # Core Module
//!
//! Stateless building blocks of the topology layer.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, virtual sites and molecules
//! - **Canonical Keys** ([`containers`]) - Maps that identify valence terms independently of atom order
//! - **Graph Matching** ([`isomorphism`]) - Equivalence of molecules and atom mappings between them

pub mod containers;
pub mod isomorphism;
pub mod models;
