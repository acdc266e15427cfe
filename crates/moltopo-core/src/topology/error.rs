use super::ids::UniqueMoleculeId;
use crate::core::containers::KeyError;
use crate::core::models::error::MoleculeError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("Uniqueness contract violated for unique molecule {unique_molecule:?}: {reason}")]
    DuplicateUniqueMolecule {
        unique_molecule: UniqueMoleculeId,
        reason: &'static str,
    },

    #[error("Unique molecule {0:?} is not registered in this topology")]
    UnknownUniqueMolecule(UniqueMoleculeId),

    #[error("Atoms {atom1} and {atom2} are not bonded")]
    NotBonded { atom1: usize, atom2: usize },

    #[error("Atom index {index} is out of range for a topology with {n_atoms} atoms")]
    AtomIndexOutOfRange { index: usize, n_atoms: usize },

    #[error(
        "Virtual site index {index} is out of range for a topology with {n_virtual_sites} virtual sites"
    )]
    VirtualSiteIndexOutOfRange {
        index: usize,
        n_virtual_sites: usize,
    },

    #[error("Atoms {atom1} and {atom2} are already constrained")]
    AlreadyConstrained { atom1: usize, atom2: usize },

    #[error("Invalid molecule: {0}")]
    Molecule(#[from] MoleculeError),

    #[error("Invalid key: {0}")]
    Key(#[from] KeyError),
}
