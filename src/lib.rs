//! A self-adjusting binary search tree ([`SplayTree`]) for indexing records
//! by a comparable identifier.
//!
//! Every lookup, insertion and removal rotates the touched node to the root
//! of the tree, so recently and frequently accessed records are cheap to reach
//! again. This suits workloads with skewed, temporally correlated access
//! patterns, such as a record store repeatedly queried and updated by
//! identifier ([`AccountStore`]).
//!
//! ```
//! use splaydex::SplayTree;
//!
//! let mut t = SplayTree::new();
//! for v in [101, 102, 103] {
//!     t.insert(v).unwrap();
//! }
//!
//! // The last inserted value is the root.
//! assert_eq!(t.root().map(|v| *v.value()), Some(103));
//!
//! // Searching splays the match to the root.
//! assert_eq!(t.search(&101).map(|v| *v.value()), Some(101));
//! assert_eq!(t.root().map(|v| *v.value()), Some(101));
//!
//! assert_eq!(t.collect_ordered(), [101, 102, 103]);
//! ```
//!
//! Structural changes can be observed (but not influenced) by installing a
//! rotation observer:
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//!
//! use splaydex::SplayTree;
//!
//! let rotations = Rc::new(Cell::new(0));
//!
//! let mut t = SplayTree::new();
//! let counter = Rc::clone(&rotations);
//! t.set_rotation_observer(move |_root| counter.set(counter.get() + 1));
//!
//! t.insert(1).unwrap();
//! t.insert(2).unwrap();
//! assert_eq!(rotations.get(), 1);
//! ```

mod account;
mod error;
mod iter;
mod key;
mod node;
mod store;
mod tree;

pub use account::*;
pub use error::*;
pub use key::*;
pub use node::NodeRef;
pub use store::*;
pub use tree::*;

#[cfg(test)]
mod test_utils;
