//! # moltopo
//!
//! Molecular topologies for force-field parameterization: molecule graphs,
//! deduplication of identical molecules and canonical keys for bonded terms.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless molecule models (`Molecule`,
//!   `FrozenMolecule`, atoms, bonds, virtual sites), the canonical key containers
//!   (`ValenceDict`, `ImproperDict`, `SortedDict`) and the isomorphism search.
//!
//! - **[`topology`]: The System.** A `Topology` of molecule instances that share
//!   unique reference molecules, with a dense global atom index space and
//!   canonical bond, angle, proper and improper term lists.

pub mod core;
pub mod topology;
