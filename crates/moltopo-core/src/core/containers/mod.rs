//! # Canonical Key Containers
//!
//! Maps keyed by atom-index tuples, where every key is rewritten to a canonical
//! form before it is stored or queried. Orderings of the same physical interaction
//! therefore collide onto one entry.
//!
//! - [`SortedDict`] - reversal rule over tuples of any arity
//! - [`ValenceDict`] - reversal rule for bonds, angles and proper torsions
//! - [`ImproperDict`] - central atom fixed at position 0, substituents sorted
//!
//! ```ignore
//! use moltopo::core::containers::ValenceDict;
//!
//! let mut angles = ValenceDict::new();
//! angles.insert(&[2, 0, 1], "H-O-H")?;
//! assert_eq!(angles.get(&[1, 0, 2]), Some(&"H-O-H"));
//! ```

mod dict;
pub mod rules;

pub use dict::{CanonicalDict, ImproperDict, SortedDict, ValenceDict};
pub use rules::KeyError;
