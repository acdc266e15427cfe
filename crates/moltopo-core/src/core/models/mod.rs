//! # Molecule Models
//!
//! Chemical graph types that every other layer of the crate is built on.
//!
//! ## Key Components
//!
//! - [`atom`] - Element, formal charge, aromaticity and stereochemistry of one atom
//! - [`bond`] - Bond order and bond-level chemical flags
//! - [`virtual_site`] - Massless off-atom particles defined by orientation atoms
//! - [`molecule`] - The editable [`Molecule`] and its immutable [`FrozenMolecule`] form
//! - [`particle`] - A borrowed view over either an atom or a virtual site
//! - [`element`] - Periodic table lookups and Hill formulas
//!
//! ## Usage
//!
//! ```ignore
//! use moltopo::core::models::{Atom, Bond, BondOrder, Molecule};
//!
//! let mut water = Molecule::with_name("water");
//! let o = water.add_atom(Atom::from_symbol("O")?)?;
//! let h1 = water.add_atom(Atom::from_symbol("H")?)?;
//! let h2 = water.add_atom(Atom::from_symbol("H")?)?;
//! water.add_bond(Bond::new(o, h1, BondOrder::Single))?;
//! water.add_bond(Bond::new(o, h2, BondOrder::Single))?;
//!
//! assert_eq!(water.hill_formula(), "H2O");
//! assert_eq!(water.angles(), vec![[1, 0, 2]]);
//! ```

pub mod atom;
pub mod bond;
pub mod element;
pub mod error;
pub mod molecule;
pub mod particle;
pub mod virtual_site;

#[cfg(test)]
pub(crate) mod test_molecules;

pub use atom::{Atom, AtomStereo};
pub use bond::{Bond, BondOrder, BondStereo};
pub use error::MoleculeError;
pub use molecule::{FrozenMolecule, Molecule};
pub use particle::Particle;
pub use virtual_site::{LennardJones, VirtualSite, VirtualSiteKind};
