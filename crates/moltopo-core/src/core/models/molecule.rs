use super::atom::Atom;
use super::bond::Bond;
use super::element;
use super::error::MoleculeError;
use super::particle::Particle;
use super::virtual_site::VirtualSite;
use crate::core::containers::rules::{Improper, KeyRule, Valence};
use crate::core::isomorphism::{self, AtomMapping, IsomorphismOptions};
use itertools::Itertools;
use std::collections::BTreeSet;
use std::ops::Deref;

/// An immutable molecular graph of atoms, bonds and virtual sites.
///
/// This is the form in which molecules are stored and shared by a
/// [`Topology`](crate::topology::Topology). Only read accessors are exposed;
/// use [`FrozenMolecule::to_molecule`] to obtain an editable copy.
///
/// Particle indices enumerate atoms first and virtual sites after them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrozenMolecule {
    name: Option<String>,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    virtual_sites: Vec<VirtualSite>,
}

impl FrozenMolecule {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn bond(&self, index: usize) -> Option<&Bond> {
        self.bonds.get(index)
    }

    pub fn virtual_sites(&self) -> &[VirtualSite] {
        &self.virtual_sites
    }

    pub fn virtual_site(&self, index: usize) -> Option<&VirtualSite> {
        self.virtual_sites.get(index)
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn n_bonds(&self) -> usize {
        self.bonds.len()
    }

    pub fn n_virtual_sites(&self) -> usize {
        self.virtual_sites.len()
    }

    pub fn n_particles(&self) -> usize {
        self.atoms.len() + self.virtual_sites.len()
    }

    /// Retrieves a particle by its particle index.
    ///
    /// # Return
    ///
    /// Returns the atom for indices below [`n_atoms`](Self::n_atoms), the virtual
    /// site `index - n_atoms` above it, and `None` past the last particle.
    pub fn particle(&self, index: usize) -> Option<Particle<'_>> {
        match self.atoms.get(index) {
            Some(atom) => Some(Particle::Atom(atom)),
            None => self
                .virtual_sites
                .get(index - self.atoms.len())
                .map(Particle::VirtualSite),
        }
    }

    pub fn particles(&self) -> impl Iterator<Item = Particle<'_>> {
        self.atoms
            .iter()
            .map(Particle::Atom)
            .chain(self.virtual_sites.iter().map(Particle::VirtualSite))
    }

    /// Returns the atoms directly bonded to `index`; empty for an unknown atom.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.atoms.get(index).into_iter().flat_map(move |atom| {
            atom.bond_indices()
                .iter()
                .filter_map(move |&b| self.bonds.get(b).and_then(|bond| bond.other_atom(index)))
        })
    }

    pub fn bond_between(&self, atom1: usize, atom2: usize) -> Option<&Bond> {
        let atom = self.atoms.get(atom1)?;
        atom.bond_indices()
            .iter()
            .filter_map(|&b| self.bonds.get(b))
            .find(|bond| bond.other_atom(atom1) == Some(atom2))
    }

    pub fn total_charge(&self) -> i32 {
        self.atoms.iter().map(|atom| atom.formal_charge).sum()
    }

    pub fn hill_formula(&self) -> String {
        element::hill_formula(self.atoms.iter().map(|atom| atom.atomic_number))
    }

    /// Enumerates every a-b-c triple with a-b and b-c bonded, in canonical form.
    pub fn angles(&self) -> Vec<[usize; 3]> {
        let mut angles = BTreeSet::new();
        for center in 0..self.atoms.len() {
            let neighbors: Vec<usize> = self.neighbors(center).collect();
            for (a, c) in neighbors.into_iter().tuple_combinations() {
                let mut key = [a, center, c];
                Valence::apply(&mut key);
                angles.insert(key);
            }
        }
        angles.into_iter().collect()
    }

    /// Enumerates every bonded chain a-b-c-d of four distinct atoms, in canonical form.
    pub fn propers(&self) -> Vec<[usize; 4]> {
        let mut propers = BTreeSet::new();
        for bond in &self.bonds {
            let [b, c] = bond.atoms();
            for a in self.neighbors(b).filter(|&a| a != c) {
                for d in self.neighbors(c).filter(|&d| d != b && d != a) {
                    let mut key = [a, b, c, d];
                    Valence::apply(&mut key);
                    propers.insert(key);
                }
            }
        }
        propers.into_iter().collect()
    }

    /// Enumerates one improper per 3-combination of neighbors of every atom with
    /// at least three neighbors. The central atom is the first element.
    pub fn impropers(&self) -> Vec<[usize; 4]> {
        let mut impropers = BTreeSet::new();
        for center in 0..self.atoms.len() {
            let neighbors: Vec<usize> = self.neighbors(center).collect();
            for (x, y, z) in neighbors.into_iter().tuple_combinations() {
                let mut key = [center, x, y, z];
                Improper::apply(&mut key);
                impropers.insert(key);
            }
        }
        impropers.into_iter().collect()
    }

    pub fn n_angles(&self) -> usize {
        self.angles().len()
    }

    pub fn n_propers(&self) -> usize {
        self.propers().len()
    }

    pub fn n_impropers(&self) -> usize {
        self.impropers().len()
    }

    /// Searches for an atom mapping from `self` onto `other` that preserves
    /// elements, connectivity and the attributes selected by `options`, and
    /// carries every virtual site onto the site at the same position in `other`.
    ///
    /// # Return
    ///
    /// Returns `Some(mapping)` where `mapping.get(i)` is the atom of `other`
    /// matching atom `i` of `self`, or `None` if the molecules are not isomorphic.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::IsomorphismSearchLimit`] if the search exceeds
    /// `options.max_steps`.
    pub fn isomorphism(
        &self,
        other: &FrozenMolecule,
        options: &IsomorphismOptions,
    ) -> Result<Option<AtomMapping>, MoleculeError> {
        isomorphism::find_isomorphism(self, other, options)
    }

    pub fn is_isomorphic_with(
        &self,
        other: &FrozenMolecule,
        options: &IsomorphismOptions,
    ) -> Result<bool, MoleculeError> {
        Ok(self.isomorphism(other, options)?.is_some())
    }

    pub fn to_molecule(&self) -> Molecule {
        Molecule {
            inner: self.clone(),
        }
    }
}

/// A molecule under construction.
///
/// All read accessors of [`FrozenMolecule`] are available through `Deref`.
/// Every mutation validates that the referenced atoms already exist, so a
/// `Molecule` never holds a dangling bond or virtual site.
///
/// ```ignore
/// let mut water = Molecule::with_name("water");
/// let o = water.add_atom(Atom::from_symbol("O")?)?;
/// let h1 = water.add_atom(Atom::new(1))?;
/// let h2 = water.add_atom(Atom::new(1))?;
/// water.add_bond(Bond::new(o, h1, BondOrder::Single))?;
/// water.add_bond(Bond::new(o, h2, BondOrder::Single))?;
/// let frozen = water.freeze();
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    inner: FrozenMolecule,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: &str) -> Self {
        let mut molecule = Self::new();
        molecule.set_name(name);
        molecule
    }

    pub fn set_name(&mut self, name: &str) {
        self.inner.name = Some(name.to_string());
    }

    /// Appends an atom and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::InvalidAtomicNumber`] for an atomic number outside 1..=118.
    pub fn add_atom(&mut self, mut atom: Atom) -> Result<usize, MoleculeError> {
        if !element::is_valid_atomic_number(atom.atomic_number) {
            return Err(MoleculeError::InvalidAtomicNumber(atom.atomic_number));
        }
        let index = self.inner.atoms.len();
        atom.attach(index);
        self.inner.atoms.push(atom);
        Ok(index)
    }

    /// Appends a bond between two existing atoms and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AtomIndexOutOfRange`] if either atom does not
    /// exist yet, [`MoleculeError::SelfBond`] if both ends are the same atom and
    /// [`MoleculeError::DuplicateBond`] if the atoms are already bonded.
    pub fn add_bond(&mut self, mut bond: Bond) -> Result<usize, MoleculeError> {
        let n_atoms = self.inner.atoms.len();
        let [atom1, atom2] = bond.atoms();
        for index in [atom1, atom2] {
            if index >= n_atoms {
                return Err(MoleculeError::AtomIndexOutOfRange { index, n_atoms });
            }
        }
        if atom1 == atom2 {
            return Err(MoleculeError::SelfBond(atom1));
        }
        if self.inner.bond_between(atom1, atom2).is_some() {
            return Err(MoleculeError::DuplicateBond { atom1, atom2 });
        }

        let index = self.inner.bonds.len();
        bond.attach(index);
        self.inner.atoms[atom1].add_bond_index(index);
        self.inner.atoms[atom2].add_bond_index(index);
        self.inner.bonds.push(bond);
        Ok(index)
    }

    /// Appends a virtual site whose orientation atoms already exist and returns
    /// its index among the molecule's virtual sites.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AtomIndexOutOfRange`],
    /// [`MoleculeError::RepeatedOrientationAtom`] or
    /// [`MoleculeError::ChargeIncrementMismatch`] for a malformed site.
    pub fn add_virtual_site(&mut self, site: VirtualSite) -> Result<usize, MoleculeError> {
        site.validate(self.inner.atoms.len())?;
        let index = self.inner.virtual_sites.len();
        self.inner.virtual_sites.push(site);
        Ok(index)
    }

    pub fn freeze(self) -> FrozenMolecule {
        self.inner
    }
}

impl Deref for Molecule {
    type Target = FrozenMolecule;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<Molecule> for FrozenMolecule {
    fn from(molecule: Molecule) -> Self {
        molecule.freeze()
    }
}

impl From<FrozenMolecule> for Molecule {
    fn from(inner: FrozenMolecule) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bond::BondOrder;
    use crate::core::models::test_molecules::{ethane, methane, water};

    mod construction {
        use super::*;

        #[test]
        fn add_atom_assigns_sequential_indices() {
            let mut molecule = Molecule::new();
            assert_eq!(molecule.add_atom(Atom::new(6)).unwrap(), 0);
            assert_eq!(molecule.add_atom(Atom::new(8)).unwrap(), 1);
            assert_eq!(molecule.atom(1).unwrap().molecule_atom_index(), 1);
            assert_eq!(molecule.n_atoms(), 2);
        }

        #[test]
        fn add_atom_rejects_invalid_atomic_numbers() {
            let mut molecule = Molecule::new();
            assert_eq!(
                molecule.add_atom(Atom::new(0)),
                Err(MoleculeError::InvalidAtomicNumber(0))
            );
            assert_eq!(
                molecule.add_atom(Atom::new(200)),
                Err(MoleculeError::InvalidAtomicNumber(200))
            );
            assert_eq!(molecule.n_atoms(), 0);
        }

        #[test]
        fn add_bond_rejects_atoms_not_yet_added() {
            let mut molecule = Molecule::new();
            molecule.add_atom(Atom::new(6)).unwrap();
            assert_eq!(
                molecule.add_bond(Bond::new(0, 1, BondOrder::Single)),
                Err(MoleculeError::AtomIndexOutOfRange {
                    index: 1,
                    n_atoms: 1
                })
            );
            assert_eq!(molecule.n_bonds(), 0);
        }

        #[test]
        fn add_bond_rejects_self_and_duplicate_bonds() {
            let mut molecule = Molecule::new();
            molecule.add_atom(Atom::new(6)).unwrap();
            molecule.add_atom(Atom::new(6)).unwrap();
            assert_eq!(
                molecule.add_bond(Bond::new(1, 1, BondOrder::Single)),
                Err(MoleculeError::SelfBond(1))
            );
            molecule.add_bond(Bond::new(0, 1, BondOrder::Double)).unwrap();
            assert_eq!(
                molecule.add_bond(Bond::new(1, 0, BondOrder::Single)),
                Err(MoleculeError::DuplicateBond { atom1: 1, atom2: 0 })
            );
            assert_eq!(molecule.n_bonds(), 1);
        }

        #[test]
        fn add_bond_updates_atom_bookkeeping() {
            let water = water();
            assert_eq!(water.atom(0).unwrap().bond_indices(), &[0, 1]);
            assert_eq!(water.atom(1).unwrap().bond_indices(), &[0]);
            assert_eq!(water.bond(1).unwrap().molecule_bond_index(), 1);
            assert_eq!(water.atom(0).unwrap().degree(), 2);
        }

        #[test]
        fn add_virtual_site_requires_existing_orientation_atoms() {
            let mut molecule = water();
            assert_eq!(
                molecule.add_virtual_site(VirtualSite::divalent_lone_pair([0, 1, 5], 0.7, 54.0)),
                Err(MoleculeError::AtomIndexOutOfRange {
                    index: 5,
                    n_atoms: 3
                })
            );
            assert_eq!(
                molecule
                    .add_virtual_site(VirtualSite::divalent_lone_pair([0, 1, 2], 0.7, 54.0))
                    .unwrap(),
                0
            );
            assert_eq!(molecule.n_virtual_sites(), 1);
            assert_eq!(molecule.n_particles(), 4);
        }

        #[test]
        fn freeze_and_thaw_preserve_contents() {
            let mut molecule = water();
            molecule.set_name("water");
            let frozen = molecule.clone().freeze();
            assert_eq!(frozen.name(), Some("water"));
            assert_eq!(frozen.n_atoms(), 3);

            let mut thawed = frozen.to_molecule();
            thawed.add_atom(Atom::new(1)).unwrap();
            assert_eq!(thawed.n_atoms(), 4);
            assert_eq!(frozen.n_atoms(), 3);
            assert_eq!(Molecule::from(frozen.clone()), molecule);
            assert_eq!(FrozenMolecule::from(molecule), frozen);
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn neighbors_and_bond_between() {
            let water = water();
            let mut neighbors: Vec<_> = water.neighbors(0).collect();
            neighbors.sort();
            assert_eq!(neighbors, vec![1, 2]);
            assert_eq!(water.neighbors(1).collect::<Vec<_>>(), vec![0]);
            assert_eq!(water.neighbors(42).count(), 0);

            assert_eq!(water.bond_between(2, 0).unwrap().molecule_bond_index(), 1);
            assert!(water.bond_between(1, 2).is_none());
            assert!(water.bond_between(9, 0).is_none());
        }

        #[test]
        fn particles_list_atoms_before_virtual_sites() {
            let mut molecule = water();
            molecule
                .add_virtual_site(VirtualSite::bond_charge([0, 1], 0.1).with_name("EP"))
                .unwrap();

            let particles: Vec<_> = molecule.particles().collect();
            assert_eq!(particles.len(), 4);
            assert!(particles[..3].iter().all(Particle::is_atom));
            assert_eq!(molecule.particle(3).unwrap().name(), Some("EP"));
            assert_eq!(molecule.particle(0).unwrap().as_atom().unwrap().atomic_number, 8);
            assert!(molecule.particle(4).is_none());
        }

        #[test]
        fn total_charge_and_hill_formula() {
            let mut hydroxide = Molecule::new();
            let o = hydroxide.add_atom(Atom::new(8).with_formal_charge(-1)).unwrap();
            let h = hydroxide.add_atom(Atom::new(1)).unwrap();
            hydroxide.add_bond(Bond::new(o, h, BondOrder::Single)).unwrap();

            assert_eq!(hydroxide.total_charge(), -1);
            assert_eq!(hydroxide.hill_formula(), "HO");
            assert_eq!(methane().hill_formula(), "CH4");
            assert_eq!(ethane().hill_formula(), "C2H6");
        }
    }

    mod valence_enumeration {
        use super::*;

        #[test]
        fn water_has_one_angle_and_no_torsions() {
            let water = water();
            assert_eq!(water.angles(), vec![[1, 0, 2]]);
            assert!(water.propers().is_empty());
            assert!(water.impropers().is_empty());
        }

        #[test]
        fn methane_has_four_impropers_centered_on_carbon() {
            let methane = methane();
            assert_eq!(methane.n_angles(), 6);
            assert_eq!(methane.n_propers(), 0);
            assert_eq!(
                methane.impropers(),
                vec![[0, 1, 2, 3], [0, 1, 2, 4], [0, 1, 3, 4], [0, 2, 3, 4]]
            );
        }

        #[test]
        fn ethane_torsions_span_the_carbon_carbon_bond() {
            let ethane = ethane();
            assert_eq!(ethane.n_angles(), 12);
            let propers = ethane.propers();
            assert_eq!(propers.len(), 9);
            assert!(propers.iter().all(|p| {
                (p[1] == 0 && p[2] == 1) || (p[1] == 1 && p[2] == 0)
            }));
            assert_eq!(ethane.n_impropers(), 8);
        }

        #[test]
        fn enumerated_terms_are_canonical() {
            let ethane = ethane();
            for angle in ethane.angles() {
                assert!(angle[0] <= angle[2]);
            }
            for proper in ethane.propers() {
                let reversed = [proper[3], proper[2], proper[1], proper[0]];
                assert!(proper <= reversed);
            }
            for improper in ethane.impropers() {
                assert!(improper[1] < improper[2] && improper[2] < improper[3]);
            }
        }

        #[test]
        fn three_membered_ring_has_no_propers_with_repeated_atoms() {
            let mut ring = Molecule::new();
            for _ in 0..3 {
                ring.add_atom(Atom::new(6)).unwrap();
            }
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                ring.add_bond(Bond::new(a, b, BondOrder::Single)).unwrap();
            }
            assert_eq!(ring.n_angles(), 3);
            assert!(ring.propers().is_empty());
        }
    }
}
