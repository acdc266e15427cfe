//! # Molecular Graph Isomorphism
//!
//! Decides whether two molecules are the same chemical species and, if so, which
//! atom of one corresponds to which atom of the other.
//!
//! Elements and connectivity are always compared. [`IsomorphismOptions`] selects
//! which further attributes (formal charge, aromaticity, bond order, atom and
//! bond stereochemistry) have to agree and can bound the search effort.
//!
//! The entry points are [`FrozenMolecule::isomorphism`] and
//! [`FrozenMolecule::is_isomorphic_with`].
//!
//! [`FrozenMolecule::isomorphism`]: crate::core::models::FrozenMolecule::isomorphism
//! [`FrozenMolecule::is_isomorphic_with`]: crate::core::models::FrozenMolecule::is_isomorphic_with

mod mapping;
mod matcher;
mod options;

pub use mapping::AtomMapping;
pub use options::IsomorphismOptions;

pub(crate) use matcher::find_isomorphism;
