use super::ids::{TopologyMoleculeId, UniqueMoleculeId};
use super::molecule::TopologyMolecule;
use super::system::Topology;
use crate::core::models::atom::Atom;
use crate::core::models::bond::Bond;
use crate::core::models::virtual_site::VirtualSite;

/// An atom of a [`Topology`], resolved to the reference atom that carries its chemistry.
#[derive(Debug, Clone, Copy)]
pub struct TopologyAtom<'a> {
    topology: &'a Topology,
    molecule_id: TopologyMoleculeId,
    molecule: &'a TopologyMolecule,
    atom: &'a Atom,
    local_index: usize,
}

impl<'a> TopologyAtom<'a> {
    pub(super) fn resolve(
        topology: &'a Topology,
        molecule_id: TopologyMoleculeId,
        local_index: usize,
    ) -> Option<Self> {
        let (molecule, reference) = topology.resolve(molecule_id)?;
        let atom = reference.atom(molecule.reference_atom_index(local_index)?)?;
        Some(Self {
            topology,
            molecule_id,
            molecule,
            atom,
            local_index,
        })
    }

    pub fn atom(&self) -> &'a Atom {
        self.atom
    }

    pub fn topology_atom_index(&self) -> usize {
        self.molecule.atom_start_index() + self.local_index
    }

    /// Atoms occupy the first block of the particle index space, so this equals
    /// [`topology_atom_index`](Self::topology_atom_index).
    pub fn topology_particle_index(&self) -> usize {
        self.topology_atom_index()
    }

    /// Index of the atom within its molecule, in the order the molecule was added.
    pub fn molecule_atom_index(&self) -> usize {
        self.local_index
    }

    pub fn reference_atom_index(&self) -> usize {
        self.atom.molecule_atom_index()
    }

    pub fn topology_molecule_id(&self) -> TopologyMoleculeId {
        self.molecule_id
    }

    pub fn topology_molecule(&self) -> &'a TopologyMolecule {
        self.molecule
    }

    pub fn unique_molecule_id(&self) -> UniqueMoleculeId {
        self.molecule.reference_molecule_id()
    }

    pub fn bonds(self) -> impl Iterator<Item = TopologyBond<'a>> + 'a {
        let (topology, molecule_id) = (self.topology, self.molecule_id);
        self.atom
            .bond_indices()
            .iter()
            .filter_map(move |&b| TopologyBond::resolve(topology, molecule_id, b))
    }

    pub fn bonded_atoms(self) -> impl Iterator<Item = TopologyAtom<'a>> + 'a {
        let index = self.topology_atom_index();
        let topology = self.topology;
        self.bonds().filter_map(move |bond| {
            let [a, b] = bond.atom_indices();
            let other = if a == index { b } else { a };
            topology.atom(other).ok()
        })
    }
}

/// A bond of a [`Topology`], expressed in global atom indices.
#[derive(Debug, Clone, Copy)]
pub struct TopologyBond<'a> {
    topology: &'a Topology,
    molecule_id: TopologyMoleculeId,
    bond: &'a Bond,
    atoms: [usize; 2],
}

impl<'a> TopologyBond<'a> {
    pub(super) fn resolve(
        topology: &'a Topology,
        molecule_id: TopologyMoleculeId,
        bond_index: usize,
    ) -> Option<Self> {
        let (molecule, reference) = topology.resolve(molecule_id)?;
        let bond = reference.bond(bond_index)?;
        let [a, b] = bond.atoms();
        let atoms = [
            molecule.global_atom_index(a)?,
            molecule.global_atom_index(b)?,
        ];
        Some(Self {
            topology,
            molecule_id,
            bond,
            atoms,
        })
    }

    pub fn bond(&self) -> &'a Bond {
        self.bond
    }

    /// Global indices of the bonded atoms, in the bond's own order.
    pub fn atom_indices(&self) -> [usize; 2] {
        self.atoms
    }

    pub fn atoms(self) -> impl Iterator<Item = TopologyAtom<'a>> + 'a {
        let topology = self.topology;
        self.atoms
            .into_iter()
            .filter_map(move |index| topology.atom(index).ok())
    }

    pub fn molecule_bond_index(&self) -> usize {
        self.bond.molecule_bond_index()
    }

    pub fn topology_molecule_id(&self) -> TopologyMoleculeId {
        self.molecule_id
    }
}

/// A virtual site of a [`Topology`] with its orientation atoms in global indices.
#[derive(Debug, Clone, Copy)]
pub struct TopologyVirtualSite<'a> {
    topology: &'a Topology,
    molecule_id: TopologyMoleculeId,
    molecule: &'a TopologyMolecule,
    site: &'a VirtualSite,
    local_index: usize,
}

impl<'a> TopologyVirtualSite<'a> {
    pub(super) fn resolve(
        topology: &'a Topology,
        molecule_id: TopologyMoleculeId,
        local_index: usize,
    ) -> Option<Self> {
        let (molecule, reference) = topology.resolve(molecule_id)?;
        let site = reference.virtual_site(local_index)?;
        Some(Self {
            topology,
            molecule_id,
            molecule,
            site,
            local_index,
        })
    }

    pub fn virtual_site(&self) -> &'a VirtualSite {
        self.site
    }

    pub fn topology_virtual_site_index(&self) -> usize {
        self.molecule.virtual_site_start_index() + self.local_index
    }

    /// Virtual sites follow every atom of the topology in the particle index
    /// space, so this index moves when more atoms are added.
    pub fn topology_particle_index(&self) -> usize {
        self.topology.n_atoms() + self.topology_virtual_site_index()
    }

    pub fn molecule_virtual_site_index(&self) -> usize {
        self.local_index
    }

    pub fn topology_molecule_id(&self) -> TopologyMoleculeId {
        self.molecule_id
    }

    /// Global indices of the orientation atoms, in orientation order.
    pub fn orientation_atom_indices(&self) -> Vec<usize> {
        self.site
            .orientation_atoms()
            .iter()
            .filter_map(|&reference| self.molecule.global_atom_index(reference))
            .collect()
    }

    pub fn atoms(self) -> impl Iterator<Item = TopologyAtom<'a>> + 'a {
        let topology = self.topology;
        self.orientation_atom_indices()
            .into_iter()
            .filter_map(move |index| topology.atom(index).ok())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TopologyParticle<'a> {
    Atom(TopologyAtom<'a>),
    VirtualSite(TopologyVirtualSite<'a>),
}

impl<'a> TopologyParticle<'a> {
    pub fn topology_particle_index(&self) -> usize {
        match self {
            Self::Atom(atom) => atom.topology_particle_index(),
            Self::VirtualSite(site) => site.topology_particle_index(),
        }
    }

    pub fn as_atom(&self) -> Option<&TopologyAtom<'a>> {
        match self {
            Self::Atom(atom) => Some(atom),
            Self::VirtualSite(_) => None,
        }
    }

    pub fn as_virtual_site(&self) -> Option<&TopologyVirtualSite<'a>> {
        match self {
            Self::Atom(_) => None,
            Self::VirtualSite(site) => Some(site),
        }
    }
}
