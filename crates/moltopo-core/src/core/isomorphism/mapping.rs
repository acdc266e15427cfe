/// A bijection between the atoms of two isomorphic molecules.
///
/// `get(i)` is the atom of the target molecule that atom `i` of the query
/// molecule was matched to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomMapping {
    forward: Vec<usize>,
}

impl AtomMapping {
    pub(crate) fn new(forward: Vec<usize>) -> Self {
        Self { forward }
    }

    pub fn identity(n_atoms: usize) -> Self {
        Self {
            forward: (0..n_atoms).collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.forward.get(index).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.forward
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates `(query, target)` pairs in query order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.forward.iter().copied().enumerate()
    }

    pub fn is_identity(&self) -> bool {
        self.iter().all(|(query, target)| query == target)
    }

    /// Returns the mapping from target atoms back to query atoms.
    pub fn inverse(&self) -> Self {
        let mut backward = vec![0; self.forward.len()];
        for (query, target) in self.iter() {
            backward[target] = query;
        }
        Self { forward: backward }
    }
}
