use thiserror::Error;

/// Structural errors raised while building or comparing a molecule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoleculeError {
    #[error("Unknown element symbol '{0}'")]
    UnknownElement(String),

    #[error("Invalid atomic number {0}")]
    InvalidAtomicNumber(u8),

    #[error("Atom index {index} is out of range for a molecule with {n_atoms} atoms")]
    AtomIndexOutOfRange { index: usize, n_atoms: usize },

    #[error("Cannot bond atom {0} to itself")]
    SelfBond(usize),

    #[error("Atoms {atom1} and {atom2} are already bonded")]
    DuplicateBond { atom1: usize, atom2: usize },

    #[error("Atom {index} appears more than once among the orientation atoms of a {kind} virtual site")]
    RepeatedOrientationAtom { index: usize, kind: &'static str },

    #[error("A {kind} virtual site needs {expected} charge increments, found {found}")]
    ChargeIncrementMismatch {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Isomorphism search exceeded the limit of {limit} steps")]
    IsomorphismSearchLimit { limit: usize },
}
