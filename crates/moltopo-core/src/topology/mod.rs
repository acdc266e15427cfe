//! # Topology
//!
//! Assembles molecules into a [`Topology`] with a single global atom index space.
//!
//! ## Overview
//!
//! A topology keeps one reference copy of every chemically distinct molecule
//! (a *unique molecule*) and any number of instances of it. Instances are found
//! by graph isomorphism, so a system of a thousand waters stores one water and
//! a thousand index blocks. Valence terms of every instance are kept in
//! canonical containers keyed by global atom indices, so a term can be looked up
//! with its atoms in any equivalent order.
//!
//! ## Key Components
//!
//! - [`Topology`] - The system: deduplication, global indexing and valence terms
//! - [`TopologyMolecule`] - One placed instance and its atom mapping onto the reference
//! - [`TopologyAtom`], [`TopologyBond`], [`TopologyVirtualSite`] - Borrowed views in global indices
//! - [`TopologyConfig`] - Matching options, loadable from TOML
//!
//! ## Usage
//!
//! ```ignore
//! use moltopo::topology::Topology;
//!
//! let topology = Topology::from_molecules([water.clone(), water.clone(), methane])?;
//! assert_eq!(topology.n_unique_molecules(), 2);
//! assert_eq!(topology.n_atoms(), 11);
//!
//! for [i, j, k] in topology.angles() {
//!     println!("{i}-{j}-{k}");
//! }
//! topology.bond_between(0, 3)?; // NotBonded: atoms of different waters
//! ```

mod config;
mod error;
mod ids;
mod molecule;
mod system;
mod views;

pub use config::{ConfigError, TopologyConfig};
pub use error::TopologyError;
pub use ids::{TopologyMoleculeId, UniqueMoleculeId};
pub use molecule::TopologyMolecule;
pub use system::{Constraint, Topology};
pub use views::{TopologyAtom, TopologyBond, TopologyParticle, TopologyVirtualSite};
