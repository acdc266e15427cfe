use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Malformed {rule} key: expected {expected} indices, found {found}")]
    Malformed {
        rule: &'static str,
        expected: &'static str,
        found: usize,
    },
}

/// A canonicalization rule for index tuples.
///
/// A rule maps every ordering of a tuple that describes the same physical
/// interaction onto a single representative. Rules operate in place so that
/// fixed-size arrays and owned vectors can share the same code path.
pub trait KeyRule {
    /// Human-readable name of the rule, used in error messages.
    const NAME: &'static str;
    /// Description of the arities accepted by the rule.
    const EXPECTED: &'static str;

    /// Returns `true` if a key with `arity` elements is well formed for this rule.
    fn accepts(arity: usize) -> bool;

    /// Rewrites `key` into its canonical form. The arity must already be valid.
    fn apply<K: Ord>(key: &mut [K]);

    /// Validates the arity of `key` and rewrites it into its canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Malformed`] if the rule does not accept the key's arity.
    fn canonicalize<K: Ord>(key: &mut [K]) -> Result<(), KeyError> {
        if !Self::accepts(key.len()) {
            return Err(KeyError::Malformed {
                rule: Self::NAME,
                expected: Self::EXPECTED,
                found: key.len(),
            });
        }
        Self::apply(key);
        Ok(())
    }
}

/// Keeps whichever of the key and its reverse orders first lexicographically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversal;

impl KeyRule for Reversal {
    const NAME: &'static str = "sorted";
    const EXPECTED: &'static str = "at least 1";

    fn accepts(arity: usize) -> bool {
        arity >= 1
    }

    fn apply<K: Ord>(key: &mut [K]) {
        reverse_if_smaller(key);
    }
}

/// The reversal rule restricted to bonds, angles and proper torsions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Valence;

impl KeyRule for Valence {
    const NAME: &'static str = "valence";
    const EXPECTED: &'static str = "2, 3 or 4";

    fn accepts(arity: usize) -> bool {
        (2..=4).contains(&arity)
    }

    fn apply<K: Ord>(key: &mut [K]) {
        reverse_if_smaller(key);
    }
}

/// Improper torsion rule: the central atom sits at position 0 and never moves,
/// the three substituents are sorted ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Improper;

impl KeyRule for Improper {
    const NAME: &'static str = "improper";
    const EXPECTED: &'static str = "exactly 4";

    fn accepts(arity: usize) -> bool {
        arity == 4
    }

    fn apply<K: Ord>(key: &mut [K]) {
        if let Some((_central, substituents)) = key.split_first_mut() {
            substituents.sort_unstable();
        }
    }
}

// Palindromes compare equal to their reverse and are left untouched.
fn reverse_if_smaller<K: Ord>(key: &mut [K]) {
    if key.iter().rev().lt(key.iter()) {
        key.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical<R: KeyRule>(key: &[usize]) -> Vec<usize> {
        let mut key = key.to_vec();
        R::canonicalize(&mut key).unwrap();
        key
    }

    #[test]
    fn reversal_keeps_lexicographically_smaller_orientation() {
        assert_eq!(canonical::<Reversal>(&[5, 2]), vec![2, 5]);
        assert_eq!(canonical::<Reversal>(&[2, 5]), vec![2, 5]);
        assert_eq!(canonical::<Reversal>(&[3, 1, 2]), vec![2, 1, 3]);
        assert_eq!(canonical::<Reversal>(&[7]), vec![7]);
    }

    #[test]
    fn reversal_compares_past_equal_end_atoms() {
        assert_eq!(canonical::<Reversal>(&[1, 9, 4, 1]), vec![1, 4, 9, 1]);
        assert_eq!(canonical::<Reversal>(&[1, 4, 9, 1]), vec![1, 4, 9, 1]);
    }

    #[test]
    fn reversal_leaves_palindromes_unchanged() {
        assert_eq!(canonical::<Reversal>(&[4, 0, 4]), vec![4, 0, 4]);
    }

    #[test]
    fn valence_accepts_only_bond_angle_and_torsion_arities() {
        assert!(!Valence::accepts(1));
        assert!(Valence::accepts(2));
        assert!(Valence::accepts(3));
        assert!(Valence::accepts(4));
        assert!(!Valence::accepts(5));
    }

    #[test]
    fn improper_sorts_substituents_and_keeps_central_atom() {
        assert_eq!(canonical::<Improper>(&[3, 9, 1, 5]), vec![3, 1, 5, 9]);
        assert_eq!(canonical::<Improper>(&[9, 3, 1, 5]), vec![9, 1, 3, 5]);
    }

    #[test]
    fn improper_rejects_wrong_arity() {
        let mut key = vec![0, 1, 2];
        let err = Improper::canonicalize(&mut key).unwrap_err();
        assert_eq!(
            err,
            KeyError::Malformed {
                rule: "improper",
                expected: "exactly 4",
                found: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "Malformed improper key: expected exactly 4 indices, found 3"
        );
    }

    #[test]
    fn empty_key_is_malformed_for_every_rule() {
        let mut key: Vec<usize> = Vec::new();
        assert!(Reversal::canonicalize(&mut key).is_err());
        assert!(Valence::canonicalize(&mut key).is_err());
        assert!(Improper::canonicalize(&mut key).is_err());
    }
}
