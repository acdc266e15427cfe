use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BondOrder {
    Single = 1,
    Double = 2,
    Triple = 3,
    Quadruple = 4,
}

impl Default for BondOrder {
    fn default() -> Self {
        BondOrder::Single
    }
}

impl BondOrder {
    pub fn as_integer(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            "4" | "q" | "quadruple" => Ok(Self::Quadruple),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Quadruple => "Quadruple",
            }
        )
    }
}

/// Double-bond geometry label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondStereo {
    E,
    Z,
}

#[derive(Debug, Error)]
#[error("Invalid bond stereochemistry string")]
pub struct ParseBondStereoError;

impl FromStr for BondStereo {
    type Err = ParseBondStereoError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" => Ok(Self::E),
            "z" => Ok(Self::Z),
            _ => Err(ParseBondStereoError),
        }
    }
}

impl fmt::Display for BondStereo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::E => "E",
                Self::Z => "Z",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    atom1: usize, // Local index of the first atom
    atom2: usize, // Local index of the second atom
    pub order: BondOrder, // Integer bond order
    pub is_aromatic: bool, // Whether the bond belongs to an aromatic system
    pub stereochemistry: Option<BondStereo>,
    pub fractional_order: Option<f64>, // Resonance / Wiberg bond order, if known
    index: usize,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
            is_aromatic: false,
            stereochemistry: None,
            fractional_order: None,
            index: 0,
        }
    }

    pub fn aromatic(mut self) -> Self {
        self.is_aromatic = true;
        self
    }

    pub fn with_stereochemistry(mut self, stereochemistry: BondStereo) -> Self {
        self.stereochemistry = Some(stereochemistry);
        self
    }

    pub fn with_fractional_order(mut self, fractional_order: f64) -> Self {
        self.fractional_order = Some(fractional_order);
        self
    }

    pub fn atom1_index(&self) -> usize {
        self.atom1
    }

    pub fn atom2_index(&self) -> usize {
        self.atom2
    }

    pub fn atoms(&self) -> [usize; 2] {
        [self.atom1, self.atom2]
    }

    pub fn molecule_bond_index(&self) -> usize {
        self.index
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }

    /// Returns the atom at the other end of the bond, or `None` if `atom` is not
    /// part of this bond.
    pub fn other_atom(&self, atom: usize) -> Option<usize> {
        if self.atom1 == atom {
            Some(self.atom2)
        } else if self.atom2 == atom {
            Some(self.atom1)
        } else {
            None
        }
    }

    pub(crate) fn attach(&mut self, index: usize) {
        self.index = index;
    }
}
