//! Structural invariant checks, meant for tests and debugging.
//!
//! Normal operations never call into this module.

use std::error::Error;
use std::fmt;

use crate::index::{Balancing, OrderedIndex};
use crate::node::{Link, NodeId};

/// The first broken invariant found while walking an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The root node has a parent link.
    RootHasParent { node: NodeId },
    /// A child's parent link does not point back at the node holding it.
    ParentMismatch {
        node: NodeId,
        expected: NodeId,
        found: Option<NodeId>,
    },
    /// A cached height disagrees with `1 + max(left, right)`.
    HeightMismatch {
        node: NodeId,
        stored: usize,
        expected: usize,
    },
    /// Subtree heights differ by more than one.
    Unbalanced { node: NodeId, balance: isize },
    /// A key lies outside the range allowed by its ancestors.
    OutOfOrder { node: NodeId },
    /// Nodes allocated in the arena are not all reachable from the root.
    Unreachable { reachable: usize, allocated: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RootHasParent { node } => write!(f, "root {} has a parent", node),
            Violation::ParentMismatch {
                node,
                expected,
                found,
            } => match found {
                Some(found) => write!(
                    f,
                    "node {} links to parent {} but is held by {}",
                    node, found, expected
                ),
                None => write!(f, "node {} has no parent but is held by {}", node, expected),
            },
            Violation::HeightMismatch {
                node,
                stored,
                expected,
            } => write!(
                f,
                "node {} caches height {} but its children imply {}",
                node, stored, expected
            ),
            Violation::Unbalanced { node, balance } => {
                write!(f, "node {} has balance factor {}", node, balance)
            }
            Violation::OutOfOrder { node } => write!(f, "node {} breaks key order", node),
            Violation::Unreachable {
                reachable,
                allocated,
            } => write!(
                f,
                "{} of {} allocated nodes reachable from the root",
                reachable, allocated
            ),
        }
    }
}

impl Error for Violation {}

impl<K: Ord> OrderedIndex<K> {
    /// Returns true if every structural invariant holds.
    pub fn validate(&self) -> bool {
        self.find_violation().is_none()
    }

    /// Walks the tree in pre-order with an explicit stack and reports the
    /// first broken invariant, if any.
    pub fn find_violation(&self) -> Option<Violation> {
        if let Some(root_id) = self.root {
            if self.nodes[root_id].parent.is_some() {
                return Some(Violation::RootHasParent { node: root_id });
            }
        }

        // Each entry carries the exclusive key bounds inherited from its ancestors.
        let mut stack: Vec<(NodeId, Option<&K>, Option<&K>)> = Vec::new();
        stack.extend(self.root.map(|id| (id, None, None)));
        let mut reachable = 0;

        while let Some((id, lower, upper)) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[id];

            if lower.map_or(false, |lower| node.key <= *lower)
                || upper.map_or(false, |upper| node.key >= *upper)
            {
                return Some(Violation::OutOfOrder { node: id });
            }

            for child in [node.left, node.right].into_iter().flatten() {
                let found = self.nodes[child].parent;
                if found != Some(id) {
                    return Some(Violation::ParentMismatch {
                        node: child,
                        expected: id,
                        found,
                    });
                }
            }

            let left_height = self.nodes.height_of(node.left);
            let right_height = self.nodes.height_of(node.right);
            let expected = (1 + left_height.max(right_height)) as usize;
            if node.height != expected {
                return Some(Violation::HeightMismatch {
                    node: id,
                    stored: node.height,
                    expected,
                });
            }

            let balance = right_height - left_height;
            if self.balancing == Balancing::Avl && !(-1..=1).contains(&balance) {
                return Some(Violation::Unbalanced { node: id, balance });
            }

            Self::push_child(&mut stack, node.right, Some(&node.key), upper);
            Self::push_child(&mut stack, node.left, lower, Some(&node.key));
        }

        let allocated = self.len();
        if reachable != allocated {
            return Some(Violation::Unreachable {
                reachable,
                allocated,
            });
        }
        None
    }

    fn push_child<'a>(
        stack: &mut Vec<(NodeId, Option<&'a K>, Option<&'a K>)>,
        child: Link,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
    ) {
        if let Some(child_id) = child {
            stack.push((child_id, lower, upper));
        }
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        if let Some(violation) = self.find_violation() {
            panic!("inconsistent index: {}", violation);
        }
    }
}
