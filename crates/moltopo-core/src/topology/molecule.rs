use super::ids::UniqueMoleculeId;
use crate::core::isomorphism::AtomMapping;
use std::ops::Range;

/// One copy of a unique molecule placed in a [`Topology`](super::Topology).
///
/// The instance owns a contiguous block of global atom indices and a contiguous
/// block of global virtual-site indices. Its atoms keep the order in which the
/// molecule was added; the chemistry of local atom `i` is the reference atom
/// `reference_atom_index(i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyMolecule {
    reference: UniqueMoleculeId,
    atom_start: usize,
    virtual_site_start: usize,
    n_virtual_sites: usize,
    local_to_reference: AtomMapping,
    reference_to_local: AtomMapping,
}

impl TopologyMolecule {
    pub(crate) fn new(
        reference: UniqueMoleculeId,
        atom_start: usize,
        virtual_site_start: usize,
        n_virtual_sites: usize,
        local_to_reference: AtomMapping,
    ) -> Self {
        let reference_to_local = local_to_reference.inverse();
        Self {
            reference,
            atom_start,
            virtual_site_start,
            n_virtual_sites,
            local_to_reference,
            reference_to_local,
        }
    }

    pub fn reference_molecule_id(&self) -> UniqueMoleculeId {
        self.reference
    }

    pub fn atom_start_index(&self) -> usize {
        self.atom_start
    }

    pub fn n_atoms(&self) -> usize {
        self.local_to_reference.len()
    }

    /// Global atom indices owned by this instance.
    pub fn atom_range(&self) -> Range<usize> {
        self.atom_start..self.atom_start + self.n_atoms()
    }

    pub fn virtual_site_start_index(&self) -> usize {
        self.virtual_site_start
    }

    pub fn n_virtual_sites(&self) -> usize {
        self.n_virtual_sites
    }

    /// Global virtual-site indices owned by this instance.
    pub fn virtual_site_range(&self) -> Range<usize> {
        self.virtual_site_start..self.virtual_site_start + self.n_virtual_sites
    }

    /// Mapping from this instance's atom order onto the reference molecule's.
    pub fn atom_mapping(&self) -> &AtomMapping {
        &self.local_to_reference
    }

    pub fn reference_atom_index(&self, local_index: usize) -> Option<usize> {
        self.local_to_reference.get(local_index)
    }

    pub fn local_atom_index(&self, reference_index: usize) -> Option<usize> {
        self.reference_to_local.get(reference_index)
    }

    /// Global index of a reference atom as realized in this instance.
    pub fn global_atom_index(&self, reference_index: usize) -> Option<usize> {
        self.local_atom_index(reference_index)
            .map(|local| self.atom_start + local)
    }

    pub fn contains_atom(&self, global_index: usize) -> bool {
        self.atom_range().contains(&global_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn reference_id() -> UniqueMoleculeId {
        let mut arena: SlotMap<UniqueMoleculeId, ()> = SlotMap::with_key();
        arena.insert(())
    }

    #[test]
    fn ranges_cover_the_owned_indices() {
        let molecule = TopologyMolecule::new(reference_id(), 6, 2, 1, AtomMapping::identity(3));
        assert_eq!(molecule.atom_range(), 6..9);
        assert_eq!(molecule.virtual_site_range(), 2..3);
        assert!(molecule.contains_atom(8));
        assert!(!molecule.contains_atom(9));
        assert_eq!(molecule.n_atoms(), 3);
    }

    #[test]
    fn reordered_instances_translate_between_local_and_reference_order() {
        // Added as H, O, H against a reference ordered O, H, H.
        let mapping = AtomMapping::identity(3);
        let reordered = TopologyMolecule::new(reference_id(), 3, 0, 0, mapping_from(&[1, 0, 2]));
        assert_eq!(reordered.reference_atom_index(1), Some(0));
        assert_eq!(reordered.local_atom_index(0), Some(1));
        assert_eq!(reordered.global_atom_index(0), Some(4));
        assert_eq!(reordered.global_atom_index(7), None);
        assert_ne!(reordered.atom_mapping(), &mapping);
    }

    fn mapping_from(forward: &[usize]) -> AtomMapping {
        AtomMapping::new(forward.to_vec())
    }
}
