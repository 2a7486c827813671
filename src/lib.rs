//! An ordered key index implemented with an AVL tree.
//!
//! Nodes are kept in an arena and linked by handle in both directions, so the
//! rebalancing walk can climb from a changed node to the root without
//! recursion or reference counting.
//!
//! ```
//! use avl_index::{EmptyError, OrderedIndex};
//!
//! let mut index: OrderedIndex<i32> = (1..=3).collect();
//! assert_eq!(index.to_string(), "AVL pre-order { 2, 1, 3 }");
//! assert!(index.validate());
//!
//! index.clear();
//! assert_eq!(index.max(), Err(EmptyError));
//! ```

mod debug;
mod error;
mod index;
mod iter;
mod node;
mod rotate;
mod validate;

pub use error::EmptyError;
pub use index::{Balancing, OrderedIndex};
pub use iter::{IntoIter, Iter};
pub use node::NodeId;
pub use validate::Violation;
