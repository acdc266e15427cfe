use super::config::TopologyConfig;
use super::error::TopologyError;
use super::ids::{TopologyMoleculeId, UniqueMoleculeId};
use super::molecule::TopologyMolecule;
use super::views::{TopologyAtom, TopologyBond, TopologyParticle, TopologyVirtualSite};
use crate::core::containers::{ImproperDict, SortedDict, ValenceDict};
use crate::core::isomorphism::AtomMapping;
use crate::core::models::error::MoleculeError;
use crate::core::models::molecule::FrozenMolecule;
use slotmap::{SecondaryMap, SlotMap};
use std::iter;
use tracing::{debug, info, instrument, trace};

/// How a pair of atoms is held together by a [`Topology`] constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// The pair is constrained to a distance chosen later, typically by the force field.
    Unspecified,
    /// The pair is constrained to this distance, in Angstroms.
    Distance(f64),
}

impl Constraint {
    pub fn distance(&self) -> Option<f64> {
        match *self {
            Self::Unspecified => None,
            Self::Distance(distance) => Some(distance),
        }
    }
}

/// A registered unique molecule together with its valence terms in reference atom order.
#[derive(Debug, Clone)]
struct UniqueMolecule {
    molecule: FrozenMolecule,
    angles: Vec<[usize; 3]>,
    propers: Vec<[usize; 4]>,
    impropers: Vec<[usize; 4]>,
}

impl UniqueMolecule {
    fn new(molecule: FrozenMolecule) -> Self {
        Self {
            angles: molecule.angles(),
            propers: molecule.propers(),
            impropers: molecule.impropers(),
            molecule,
        }
    }
}

/// Owner of a bond in the topology's bond container.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BondSlot {
    molecule: TopologyMoleculeId,
    bond_index: usize,
}

/// A chemical system made of molecule instances that share unique reference molecules.
///
/// Every added molecule is compared against the unique molecules registered so
/// far. Isomorphic molecules become new instances of an existing unique molecule,
/// anything else is registered as a new one. Each instance receives a contiguous
/// block of global atom indices, appended after all existing atoms, and its bonds,
/// angles, proper and improper torsions are inserted into canonical containers
/// keyed by global indices. Global indices never change once assigned.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    config: TopologyConfig,
    /// Storage for the reference molecules.
    unique_molecules: SlotMap<UniqueMoleculeId, UniqueMolecule>,
    /// Unique molecules in registration order.
    unique_order: Vec<UniqueMoleculeId>,
    /// Instances of each unique molecule, in insertion order.
    instances: SecondaryMap<UniqueMoleculeId, Vec<TopologyMoleculeId>>,
    /// Storage for the molecule instances.
    topology_molecules: SlotMap<TopologyMoleculeId, TopologyMolecule>,
    /// Instances in insertion order.
    molecule_order: Vec<TopologyMoleculeId>,
    /// Owning instance of every global atom index.
    atom_owners: Vec<TopologyMoleculeId>,
    /// Owning instance of every global virtual-site index.
    virtual_site_owners: Vec<TopologyMoleculeId>,
    bonds: ValenceDict<usize, BondSlot>,
    angles: ValenceDict<usize, TopologyMoleculeId>,
    propers: ValenceDict<usize, TopologyMoleculeId>,
    impropers: ImproperDict<usize, TopologyMoleculeId>,
    constraints: SortedDict<usize, Constraint>,
}

impl Topology {
    /// Creates an empty topology with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TopologyConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    /// Builds a topology by adding every molecule in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`add_molecule`](Self::add_molecule).
    pub fn from_molecules<I, M>(molecules: I) -> Result<Self, TopologyError>
    where
        I: IntoIterator<Item = M>,
        M: Into<FrozenMolecule>,
    {
        Self::from_molecules_with_config(molecules, TopologyConfig::default())
    }

    pub fn from_molecules_with_config<I, M>(
        molecules: I,
        config: TopologyConfig,
    ) -> Result<Self, TopologyError>
    where
        I: IntoIterator<Item = M>,
        M: Into<FrozenMolecule>,
    {
        let mut topology = Self::with_config(config);
        for molecule in molecules {
            topology.add_molecule(molecule, None)?;
        }
        info!(
            n_molecules = topology.n_topology_molecules(),
            n_unique = topology.n_unique_molecules(),
            n_atoms = topology.n_atoms(),
            n_bonds = topology.n_bonds(),
            "Topology built from molecules."
        );
        Ok(topology)
    }

    /// Creates a topology whose unique molecules are declared up front.
    ///
    /// The declared molecules get no instances; they only fix the set (and order)
    /// of reference molecules that later additions are matched against.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateUniqueMolecule`] if two declared
    /// molecules are isomorphic.
    pub fn with_unique_molecules<I, M>(molecules: I) -> Result<Self, TopologyError>
    where
        I: IntoIterator<Item = M>,
        M: Into<FrozenMolecule>,
    {
        let mut topology = Self::new();
        for molecule in molecules {
            topology.add_unique_molecule(molecule)?;
        }
        info!(
            n_unique = topology.n_unique_molecules(),
            "Topology initialized with declared unique molecules."
        );
        Ok(topology)
    }

    /// Registers a unique molecule without creating an instance of it.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateUniqueMolecule`] if the molecule is
    /// isomorphic to an already registered unique molecule.
    pub fn add_unique_molecule(
        &mut self,
        molecule: impl Into<FrozenMolecule>,
    ) -> Result<UniqueMoleculeId, TopologyError> {
        let molecule = molecule.into();
        if let Some((existing, _)) = self.find_unique_match(&molecule)? {
            return Err(TopologyError::DuplicateUniqueMolecule {
                unique_molecule: existing,
                reason: "declared unique molecule is isomorphic to an already registered one",
            });
        }
        Ok(self.register(molecule))
    }

    /// Adds a molecule instance to the topology.
    ///
    /// Without a hint, the molecule is matched against the registered unique
    /// molecules in registration order and becomes an instance of the first one it
    /// is isomorphic with, or a new unique molecule if there is none. With a hint,
    /// it is compared against that unique molecule only.
    ///
    /// # Arguments
    ///
    /// * `molecule` - The molecule to add; its atom order is kept for the instance.
    /// * `unique_molecule_hint` - A unique molecule the caller asserts this molecule duplicates.
    ///
    /// # Return
    ///
    /// Returns the id of the new [`TopologyMolecule`].
    ///
    /// # Errors
    ///
    /// * [`TopologyError::UnknownUniqueMolecule`] if the hint is not registered.
    /// * [`TopologyError::DuplicateUniqueMolecule`] if the molecule is not
    ///   isomorphic with the hinted unique molecule.
    /// * [`TopologyError::Molecule`] if the isomorphism search exceeds its step limit.
    #[instrument(skip_all, name = "add_molecule")]
    pub fn add_molecule(
        &mut self,
        molecule: impl Into<FrozenMolecule>,
        unique_molecule_hint: Option<UniqueMoleculeId>,
    ) -> Result<TopologyMoleculeId, TopologyError> {
        let candidate = molecule.into();

        let matched = match unique_molecule_hint {
            Some(hint) => {
                let reference = self
                    .unique_molecules
                    .get(hint)
                    .ok_or(TopologyError::UnknownUniqueMolecule(hint))?;
                match candidate.isomorphism(&reference.molecule, &self.config.isomorphism)? {
                    Some(mapping) => Some((hint, mapping)),
                    None => {
                        return Err(TopologyError::DuplicateUniqueMolecule {
                            unique_molecule: hint,
                            reason: "molecule is not isomorphic with the hinted unique molecule",
                        });
                    }
                }
            }
            None => self.find_unique_match(&candidate)?,
        };

        let (reference, local_to_reference) = match matched {
            Some((id, mapping)) => {
                debug!(
                    unique_molecule = ?id,
                    identity = mapping.is_identity(),
                    "Matched an existing unique molecule."
                );
                (id, mapping)
            }
            None => {
                let n_atoms = candidate.n_atoms();
                let id = self.register(candidate);
                debug!(unique_molecule = ?id, n_atoms, "Registered a new unique molecule.");
                (id, AtomMapping::identity(n_atoms))
            }
        };

        self.instantiate(reference, local_to_reference)
    }

    fn find_unique_match(
        &self,
        candidate: &FrozenMolecule,
    ) -> Result<Option<(UniqueMoleculeId, AtomMapping)>, MoleculeError> {
        for (id, unique) in self.unique_entries() {
            let options = &self.config.isomorphism;
            if let Some(mapping) = candidate.isomorphism(&unique.molecule, options)? {
                return Ok(Some((id, mapping)));
            }
        }
        Ok(None)
    }

    fn register(&mut self, molecule: FrozenMolecule) -> UniqueMoleculeId {
        let id = self.unique_molecules.insert(UniqueMolecule::new(molecule));
        self.unique_order.push(id);
        self.instances.insert(id, Vec::new());
        id
    }

    fn instantiate(
        &mut self,
        reference: UniqueMoleculeId,
        local_to_reference: AtomMapping,
    ) -> Result<TopologyMoleculeId, TopologyError> {
        let unique = self
            .unique_molecules
            .get(reference)
            .ok_or(TopologyError::UnknownUniqueMolecule(reference))?;
        let n_atoms = unique.molecule.n_atoms();
        let n_virtual_sites = unique.molecule.n_virtual_sites();
        let atom_start = self.atom_owners.len();
        let virtual_site_start = self.virtual_site_owners.len();

        let instance = TopologyMolecule::new(
            reference,
            atom_start,
            virtual_site_start,
            n_virtual_sites,
            local_to_reference,
        );
        // Global index of every reference atom in this instance.
        let global: Vec<usize> = (0..n_atoms)
            .filter_map(|r| instance.global_atom_index(r))
            .collect();
        let id = self.topology_molecules.insert(instance);

        for bond in unique.molecule.bonds() {
            let [a, b] = bond.atoms();
            let slot = BondSlot {
                molecule: id,
                bond_index: bond.molecule_bond_index(),
            };
            self.bonds.insert(&[global[a], global[b]], slot)?;
        }
        for angle in &unique.angles {
            self.angles.insert(&angle.map(|r| global[r]), id)?;
        }
        for proper in &unique.propers {
            self.propers.insert(&proper.map(|r| global[r]), id)?;
        }
        for improper in &unique.impropers {
            self.impropers.insert(&improper.map(|r| global[r]), id)?;
        }

        self.atom_owners.extend(iter::repeat_n(id, n_atoms));
        self.virtual_site_owners
            .extend(iter::repeat_n(id, n_virtual_sites));
        self.molecule_order.push(id);
        match self.instances.get_mut(reference) {
            Some(instances) => instances.push(id),
            None => {
                self.instances.insert(reference, vec![id]);
            }
        }

        trace!(
            atom_start,
            n_atoms,
            n_virtual_sites,
            n_bonds = unique.molecule.n_bonds(),
            n_angles = unique.angles.len(),
            n_propers = unique.propers.len(),
            n_impropers = unique.impropers.len(),
            "Instance added."
        );
        Ok(id)
    }

    pub(super) fn resolve(
        &self,
        id: TopologyMoleculeId,
    ) -> Option<(&TopologyMolecule, &FrozenMolecule)> {
        let molecule = self.topology_molecules.get(id)?;
        let unique = self.unique_molecules.get(molecule.reference_molecule_id())?;
        Some((molecule, &unique.molecule))
    }

    fn unique_entries(&self) -> impl Iterator<Item = (UniqueMoleculeId, &UniqueMolecule)> {
        self.unique_order
            .iter()
            .filter_map(|&id| self.unique_molecules.get(id).map(|unique| (id, unique)))
    }

    /// Returns the unique molecules in registration order.
    ///
    /// The iterator is lazy and can be requested again at any time.
    pub fn unique_molecules(&self) -> impl Iterator<Item = &FrozenMolecule> {
        self.unique_entries().map(|(_, unique)| &unique.molecule)
    }

    pub fn unique_molecule_ids(&self) -> impl Iterator<Item = UniqueMoleculeId> {
        self.unique_entries().map(|(id, _)| id)
    }

    pub fn unique_molecule(&self, id: UniqueMoleculeId) -> Option<&FrozenMolecule> {
        self.unique_molecules.get(id).map(|unique| &unique.molecule)
    }

    pub fn n_unique_molecules(&self) -> usize {
        self.unique_molecules.len()
    }

    /// Instances of a unique molecule in insertion order; empty if it has none.
    pub fn instances_of(&self, id: UniqueMoleculeId) -> &[TopologyMoleculeId] {
        self.instances
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn n_instances(&self, id: UniqueMoleculeId) -> usize {
        self.instances_of(id).len()
    }

    /// Returns the molecule instances in insertion order.
    pub fn topology_molecules(
        &self,
    ) -> impl Iterator<Item = (TopologyMoleculeId, &TopologyMolecule)> {
        self.molecule_order.iter().filter_map(|&id| {
            self.topology_molecules
                .get(id)
                .map(|molecule| (id, molecule))
        })
    }

    pub fn topology_molecule(&self, id: TopologyMoleculeId) -> Option<&TopologyMolecule> {
        self.topology_molecules.get(id)
    }

    pub fn n_topology_molecules(&self) -> usize {
        self.topology_molecules.len()
    }

    pub fn n_atoms(&self) -> usize {
        self.atom_owners.len()
    }

    pub fn n_topology_atoms(&self) -> usize {
        self.n_atoms()
    }

    pub fn n_virtual_sites(&self) -> usize {
        self.virtual_site_owners.len()
    }

    pub fn n_particles(&self) -> usize {
        self.n_atoms() + self.n_virtual_sites()
    }

    pub fn n_bonds(&self) -> usize {
        self.bonds.len()
    }

    pub fn n_angles(&self) -> usize {
        self.angles.len()
    }

    pub fn n_propers(&self) -> usize {
        self.propers.len()
    }

    pub fn n_impropers(&self) -> usize {
        self.impropers.len()
    }

    /// Retrieves an atom by its global index.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::AtomIndexOutOfRange`] if no atom has this index.
    pub fn atom(&self, index: usize) -> Result<TopologyAtom<'_>, TopologyError> {
        self.atom_owners
            .get(index)
            .and_then(|&owner| {
                let start = self.topology_molecules.get(owner)?.atom_start_index();
                TopologyAtom::resolve(self, owner, index - start)
            })
            .ok_or(TopologyError::AtomIndexOutOfRange {
                index,
                n_atoms: self.n_atoms(),
            })
    }

    /// Iterates all atoms in global index order.
    pub fn atoms(&self) -> impl Iterator<Item = TopologyAtom<'_>> {
        self.topology_molecules().flat_map(move |(id, molecule)| {
            (0..molecule.n_atoms()).filter_map(move |local| TopologyAtom::resolve(self, id, local))
        })
    }

    /// Retrieves a virtual site by its global virtual-site index.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::VirtualSiteIndexOutOfRange`] if no virtual site has this index.
    pub fn virtual_site(&self, index: usize) -> Result<TopologyVirtualSite<'_>, TopologyError> {
        self.virtual_site_owners
            .get(index)
            .and_then(|&owner| {
                let start = self
                    .topology_molecules
                    .get(owner)?
                    .virtual_site_start_index();
                TopologyVirtualSite::resolve(self, owner, index - start)
            })
            .ok_or(TopologyError::VirtualSiteIndexOutOfRange {
                index,
                n_virtual_sites: self.n_virtual_sites(),
            })
    }

    pub fn virtual_sites(&self) -> impl Iterator<Item = TopologyVirtualSite<'_>> {
        self.topology_molecules().flat_map(move |(id, molecule)| {
            (0..molecule.n_virtual_sites())
                .filter_map(move |local| TopologyVirtualSite::resolve(self, id, local))
        })
    }

    /// Retrieves a particle by its particle index: atoms first, then virtual sites.
    pub fn particle(&self, index: usize) -> Option<TopologyParticle<'_>> {
        match index.checked_sub(self.n_atoms()) {
            None => self.atom(index).ok().map(TopologyParticle::Atom),
            Some(site) => self.virtual_site(site).ok().map(TopologyParticle::VirtualSite),
        }
    }

    /// Iterates all bonds in canonical key order.
    pub fn bonds(&self) -> impl Iterator<Item = TopologyBond<'_>> {
        self.bonds
            .values()
            .filter_map(move |slot| TopologyBond::resolve(self, slot.molecule, slot.bond_index))
    }

    /// Canonical global index pairs of all bonds, in ascending order.
    pub fn bond_keys(&self) -> impl Iterator<Item = [usize; 2]> {
        self.bonds.keys().filter_map(|key| <[usize; 2]>::try_from(key).ok())
    }

    pub fn angles(&self) -> impl Iterator<Item = [usize; 3]> {
        self.angles.keys().filter_map(|key| <[usize; 3]>::try_from(key).ok())
    }

    pub fn propers(&self) -> impl Iterator<Item = [usize; 4]> {
        self.propers.keys().filter_map(|key| <[usize; 4]>::try_from(key).ok())
    }

    /// Canonical improper keys; the central atom is the first element.
    pub fn impropers(&self) -> impl Iterator<Item = [usize; 4]> {
        self.impropers.keys().filter_map(|key| <[usize; 4]>::try_from(key).ok())
    }

    fn check_atom_index(&self, index: usize) -> Result<(), TopologyError> {
        if index < self.n_atoms() {
            Ok(())
        } else {
            Err(TopologyError::AtomIndexOutOfRange {
                index,
                n_atoms: self.n_atoms(),
            })
        }
    }

    /// Retrieves the bond between two atoms given by global index.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::AtomIndexOutOfRange`] for an unknown atom and
    /// [`TopologyError::NotBonded`] if the atoms share no bond, which is always
    /// the case for atoms of different instances.
    pub fn bond_between(
        &self,
        atom1: usize,
        atom2: usize,
    ) -> Result<TopologyBond<'_>, TopologyError> {
        self.check_atom_index(atom1)?;
        self.check_atom_index(atom2)?;
        self.bonds
            .get(&[atom1, atom2])
            .and_then(|slot| TopologyBond::resolve(self, slot.molecule, slot.bond_index))
            .ok_or(TopologyError::NotBonded { atom1, atom2 })
    }

    pub fn is_bonded(&self, atom1: usize, atom2: usize) -> bool {
        self.bonds.contains_key(&[atom1, atom2])
    }

    /// Constrains the distance between two atoms.
    ///
    /// # Arguments
    ///
    /// * `atom1`, `atom2` - Global atom indices; their order is irrelevant.
    /// * `distance` - Constrained distance in Angstroms, or `None` to leave it to the force field.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::AtomIndexOutOfRange`] for an unknown atom and
    /// [`TopologyError::AlreadyConstrained`] if the pair is already constrained.
    pub fn add_constraint(
        &mut self,
        atom1: usize,
        atom2: usize,
        distance: Option<f64>,
    ) -> Result<(), TopologyError> {
        self.check_atom_index(atom1)?;
        self.check_atom_index(atom2)?;
        if self.constraints.contains_key(&[atom1, atom2]) {
            return Err(TopologyError::AlreadyConstrained { atom1, atom2 });
        }
        let constraint = distance.map_or(Constraint::Unspecified, Constraint::Distance);
        self.constraints.insert(&[atom1, atom2], constraint)?;
        debug!(atom1, atom2, ?distance, "Constraint added.");
        Ok(())
    }

    pub fn constraint(&self, atom1: usize, atom2: usize) -> Option<Constraint> {
        self.constraints.get(&[atom1, atom2]).copied()
    }

    pub fn is_constrained(&self, atom1: usize, atom2: usize) -> bool {
        self.constraints.contains_key(&[atom1, atom2])
    }

    /// Constrained pairs in canonical order.
    pub fn constraints(&self) -> impl Iterator<Item = ([usize; 2], Constraint)> {
        self.constraints
            .iter()
            .filter_map(|(key, &constraint)| Some((<[usize; 2]>::try_from(key).ok()?, constraint)))
    }

    pub fn n_constraints(&self) -> usize {
        self.constraints.len()
    }
}
