//! An insertion-ordered multiset (bag).
//!
//! ```
//! use multiset::Multiset;
//!
//! let mut bag = Multiset::new();
//! bag.add_n("a", 2).unwrap();
//! bag.add("b");
//! bag.add("a");
//!
//! assert_eq!(bag.count(&"a"), 3);
//! assert_eq!(bag.len(), 4);
//! assert_eq!(bag.to_string(), "[a, a, a, b]");
//!
//! assert_eq!(bag.remove_n(&"a", 5), Ok(false));
//! assert_eq!(bag.remove_all(&"a"), 3);
//! assert!(!bag.contains(&"a"));
//! ```

mod multiset;
mod multiset_error;
mod multiset_iter;
mod multiset_ops;

pub use crate::multiset::{Multiset, DEFAULT_SEPARATOR};
pub use crate::multiset_error::{MultisetError, Result};
pub use crate::multiset_iter::{Entries, IntoIter, Iter};
