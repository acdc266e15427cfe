use super::error::MoleculeError;
use std::collections::HashSet;
use std::fmt;

/// Geometric variant of a virtual site together with its placement parameters.
///
/// Distances are in Angstroms and angles in degrees. The number of orientation
/// atoms is fixed by the variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VirtualSiteKind {
    /// A site on the line through two atoms.
    BondCharge {
        /// Distance from the first orientation atom.
        distance: f64,
    },
    /// A lone pair on a terminal atom, oriented by its neighbor and a second neighbor.
    MonovalentLonePair {
        distance: f64,
        out_of_plane_angle: f64,
        in_plane_angle: f64,
    },
    /// A lone pair on an atom with two bonded neighbors.
    DivalentLonePair {
        distance: f64,
        out_of_plane_angle: f64,
    },
    /// A lone pair on an atom with three bonded neighbors.
    TrivalentLonePair { distance: f64 },
}

impl VirtualSiteKind {
    /// Number of orientation atoms the variant is defined by.
    pub fn arity(&self) -> usize {
        match self {
            Self::BondCharge { .. } => 2,
            Self::MonovalentLonePair { .. } | Self::DivalentLonePair { .. } => 3,
            Self::TrivalentLonePair { .. } => 4,
        }
    }

    pub fn distance(&self) -> f64 {
        match *self {
            Self::BondCharge { distance }
            | Self::MonovalentLonePair { distance, .. }
            | Self::DivalentLonePair { distance, .. }
            | Self::TrivalentLonePair { distance } => distance,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BondCharge { .. } => "BondCharge",
            Self::MonovalentLonePair { .. } => "MonovalentLonePair",
            Self::DivalentLonePair { .. } => "DivalentLonePair",
            Self::TrivalentLonePair { .. } => "TrivalentLonePair",
        }
    }
}

impl fmt::Display for VirtualSiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lennard-Jones parameters carried by a virtual site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LennardJones {
    /// Collision diameter in Angstroms.
    pub sigma: f64,
    /// Well depth in kcal/mol.
    pub epsilon: f64,
}

/// A massless particle placed relative to an ordered tuple of atoms.
///
/// The orientation atoms are local indices into the owning molecule and are
/// checked when the site is added to a [`Molecule`](super::molecule::Molecule).
/// A site carries one charge increment per orientation atom; they default to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualSite {
    kind: VirtualSiteKind,
    atoms: Vec<usize>,
    pub charge_increments: Vec<f64>,
    pub lennard_jones: Option<LennardJones>,
    pub name: Option<String>,
}

impl VirtualSite {
    fn with_kind(kind: VirtualSiteKind, atoms: &[usize]) -> Self {
        Self {
            kind,
            atoms: atoms.to_vec(),
            charge_increments: vec![0.0; atoms.len()],
            lennard_jones: None,
            name: None,
        }
    }

    pub fn bond_charge(atoms: [usize; 2], distance: f64) -> Self {
        Self::with_kind(VirtualSiteKind::BondCharge { distance }, &atoms)
    }

    pub fn monovalent_lone_pair(
        atoms: [usize; 3],
        distance: f64,
        out_of_plane_angle: f64,
        in_plane_angle: f64,
    ) -> Self {
        Self::with_kind(
            VirtualSiteKind::MonovalentLonePair {
                distance,
                out_of_plane_angle,
                in_plane_angle,
            },
            &atoms,
        )
    }

    pub fn divalent_lone_pair(atoms: [usize; 3], distance: f64, out_of_plane_angle: f64) -> Self {
        Self::with_kind(
            VirtualSiteKind::DivalentLonePair {
                distance,
                out_of_plane_angle,
            },
            &atoms,
        )
    }

    pub fn trivalent_lone_pair(atoms: [usize; 4], distance: f64) -> Self {
        Self::with_kind(VirtualSiteKind::TrivalentLonePair { distance }, &atoms)
    }

    pub fn with_charge_increments(mut self, charge_increments: Vec<f64>) -> Self {
        self.charge_increments = charge_increments;
        self
    }

    pub fn with_lennard_jones(mut self, sigma: f64, epsilon: f64) -> Self {
        self.lennard_jones = Some(LennardJones { sigma, epsilon });
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn kind(&self) -> &VirtualSiteKind {
        &self.kind
    }

    /// Local indices of the atoms that define the site, in orientation order.
    pub fn orientation_atoms(&self) -> &[usize] {
        &self.atoms
    }

    /// Sum of the charge increments, i.e. the charge the site carries.
    pub fn charge(&self) -> f64 {
        self.charge_increments.iter().sum()
    }

    pub(crate) fn validate(&self, n_atoms: usize) -> Result<(), MoleculeError> {
        let mut seen = HashSet::with_capacity(self.atoms.len());
        for &index in &self.atoms {
            if index >= n_atoms {
                return Err(MoleculeError::AtomIndexOutOfRange { index, n_atoms });
            }
            if !seen.insert(index) {
                return Err(MoleculeError::RepeatedOrientationAtom {
                    index,
                    kind: self.kind.name(),
                });
            }
        }
        if self.charge_increments.len() != self.kind.arity() {
            return Err(MoleculeError::ChargeIncrementMismatch {
                kind: self.kind.name(),
                expected: self.kind.arity(),
                found: self.charge_increments.len(),
            });
        }
        Ok(())
    }
}
