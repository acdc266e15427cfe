use super::rules::{Improper, KeyError, KeyRule, Reversal, Valence};
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// An ordered map whose keys are index tuples rewritten by a [`KeyRule`].
///
/// Every key is canonicalized before it is stored or looked up, so any ordering
/// that the rule considers equivalent to a stored key finds the same entry.
/// Iteration yields canonical keys in ascending lexicographic order.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalDict<R, K, V> {
    entries: BTreeMap<Vec<K>, V>,
    rule: PhantomData<R>,
}

/// Tuples equal to their reverse collide; any arity.
pub type SortedDict<K, V> = CanonicalDict<Reversal, K, V>;
/// Bonds, angles and proper torsions.
pub type ValenceDict<K, V> = CanonicalDict<Valence, K, V>;
/// Improper torsions with the central atom first.
pub type ImproperDict<K, V> = CanonicalDict<Improper, K, V>;

impl<R, K, V> Default for CanonicalDict<R, K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            rule: PhantomData,
        }
    }
}

impl<R: KeyRule, K: Ord + Clone, V> CanonicalDict<R, K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical form of `key` under this container's rule.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Malformed`] if the key has the wrong arity.
    pub fn canonical_key(key: &[K]) -> Result<Vec<K>, KeyError> {
        let mut canonical = key.to_vec();
        R::canonicalize(&mut canonical)?;
        Ok(canonical)
    }

    /// Inserts `value` under the canonical form of `key`.
    ///
    /// An equivalent key that is already present has its value replaced; the
    /// previous value is returned.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Malformed`] if the key has the wrong arity.
    pub fn insert(&mut self, key: &[K], value: V) -> Result<Option<V>, KeyError> {
        let canonical = Self::canonical_key(key)?;
        Ok(self.entries.insert(canonical, value))
    }

    pub fn get(&self, key: &[K]) -> Option<&V> {
        let canonical = Self::canonical_key(key).ok()?;
        self.entries.get(&canonical)
    }

    pub fn get_mut(&mut self, key: &[K]) -> Option<&mut V> {
        let canonical = Self::canonical_key(key).ok()?;
        self.entries.get_mut(&canonical)
    }

    pub fn contains_key(&self, key: &[K]) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &[K]) -> Option<V> {
        let canonical = Self::canonical_key(key).ok()?;
        self.entries.remove(&canonical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[K], &V)> {
        self.entries.iter().map(|(key, value)| (key.as_slice(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &[K]> {
        self.entries.keys().map(Vec::as_slice)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }
}
