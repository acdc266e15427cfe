use super::element;
use super::error::MoleculeError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// CIP label of a stereocenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AtomStereo {
    R,
    S,
}

#[derive(Debug, Error)]
#[error("Invalid atom stereochemistry string")]
pub struct ParseAtomStereoError;

impl FromStr for AtomStereo {
    type Err = ParseAtomStereoError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" => Ok(Self::R),
            "s" => Ok(Self::S),
            _ => Err(ParseAtomStereoError),
        }
    }
}

impl fmt::Display for AtomStereo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::R => "R",
                Self::S => "S",
            }
        )
    }
}

/// Represents an atom of a molecule.
///
/// The chemical identity (element, formal charge, aromaticity, stereochemistry)
/// is public. The index of the atom inside its molecule and the bonds it takes
/// part in are assigned by [`Molecule`](super::molecule::Molecule) when the atom
/// is inserted and cannot be edited afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atomic number of the element (1 for hydrogen, 6 for carbon, ...).
    pub atomic_number: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i32,
    /// Whether the atom is part of an aromatic system.
    pub is_aromatic: bool,
    /// CIP stereochemistry, if the atom is a defined stereocenter.
    pub stereochemistry: Option<AtomStereo>,
    /// Optional atom name (e.g., "OW", "HW1").
    pub name: Option<String>,
    index: usize,
    bonds: Vec<usize>,
}

impl Atom {
    /// Creates a neutral, non-aromatic atom without stereochemistry.
    pub fn new(atomic_number: u8) -> Self {
        Self {
            atomic_number,
            formal_charge: 0,
            is_aromatic: false,
            stereochemistry: None,
            name: None,
            index: 0,
            bonds: Vec::new(),
        }
    }

    /// Creates an atom from an element symbol such as `"C"` or `"Cl"`.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::UnknownElement`] if the symbol is not a known element.
    pub fn from_symbol(symbol: &str) -> Result<Self, MoleculeError> {
        element::atomic_number(symbol)
            .map(Self::new)
            .ok_or_else(|| MoleculeError::UnknownElement(symbol.to_string()))
    }

    pub fn with_formal_charge(mut self, formal_charge: i32) -> Self {
        self.formal_charge = formal_charge;
        self
    }

    pub fn aromatic(mut self) -> Self {
        self.is_aromatic = true;
        self
    }

    pub fn with_stereochemistry(mut self, stereochemistry: AtomStereo) -> Self {
        self.stereochemistry = Some(stereochemistry);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Element symbol, or `None` for an atomic number outside the periodic table.
    pub fn symbol(&self) -> Option<&'static str> {
        element::symbol(self.atomic_number)
    }

    /// Index of this atom within its molecule.
    pub fn molecule_atom_index(&self) -> usize {
        self.index
    }

    /// Indices of the molecule bonds this atom participates in.
    pub fn bond_indices(&self) -> &[usize] {
        &self.bonds
    }

    pub fn degree(&self) -> usize {
        self.bonds.len()
    }

    pub(crate) fn attach(&mut self, index: usize) {
        self.index = index;
        self.bonds.clear();
    }

    pub(crate) fn add_bond_index(&mut self, bond_index: usize) {
        self.bonds.push(bond_index);
    }
}
