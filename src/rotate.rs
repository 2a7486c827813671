//! Structural rotations and the upward rebalancing walk.

use std::cmp;

use crate::index::{Balancing, OrderedIndex};
use crate::node::{Link, NodeId};

impl<K> OrderedIndex<K> {
    /// Points the slot that currently holds `old` at `new` instead.
    /// The slot is `parent`'s left or right child, or the root when `parent` is `None`.
    /// Does not touch `new`'s own parent link.
    pub(crate) fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent_id) => {
                let parent = &mut self.nodes[parent_id];
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    debug_assert_eq!(parent.right, Some(old));
                    parent.right = new;
                }
            }
        }
    }

    /// Recomputes the cached height of `id` from its children.
    pub(crate) fn update_height(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let height = 1 + cmp::max(
            self.nodes.height_of(node.left),
            self.nodes.height_of(node.right),
        );
        self.nodes[id].height = height as usize;
    }

    /// Balance factor of `id`: right subtree height minus left subtree height.
    pub(crate) fn balance_of(&self, id: NodeId) -> isize {
        let node = &self.nodes[id];
        self.nodes.height_of(node.right) - self.nodes.height_of(node.left)
    }

    /// Rotates the subtree at `id` to the left and returns its new root.
    ///
    /// ```text
    ///   id            r
    ///  /  \          / \
    /// a    r   ->  id   c
    ///     / \     /  \
    ///    b   c   a    b
    /// ```
    pub(crate) fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let right_id = match self.nodes[id].right {
            Some(right_id) => right_id,
            None => return id,
        };
        log::trace!("rotate left at {} (promoting {})", id, right_id);

        let inner = self.nodes[right_id].left;
        self.nodes[id].right = inner;
        if let Some(inner_id) = inner {
            self.nodes[inner_id].parent = Some(id);
        }

        let parent = self.nodes[id].parent;
        self.nodes[right_id].parent = parent;
        self.replace_child(parent, id, Some(right_id));

        self.nodes[right_id].left = Some(id);
        self.nodes[id].parent = Some(right_id);

        self.update_height(id);
        self.update_height(right_id);
        right_id
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left).
    pub(crate) fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let left_id = match self.nodes[id].left {
            Some(left_id) => left_id,
            None => return id,
        };
        log::trace!("rotate right at {} (promoting {})", id, left_id);

        let inner = self.nodes[left_id].right;
        self.nodes[id].left = inner;
        if let Some(inner_id) = inner {
            self.nodes[inner_id].parent = Some(id);
        }

        let parent = self.nodes[id].parent;
        self.nodes[left_id].parent = parent;
        self.replace_child(parent, id, Some(left_id));

        self.nodes[left_id].right = Some(id);
        self.nodes[id].parent = Some(left_id);

        self.update_height(id);
        self.update_height(left_id);
        left_id
    }

    /// Restores the balance bound at `id` if necessary and refreshes its height.
    /// The incoming balance factor must lie within -2..=2, which always holds
    /// after a single insert or unlink below `id`.
    /// Returns whether a rotation took place.
    pub(crate) fn rebalance_node(&mut self, id: NodeId) -> bool {
        if self.balancing == Balancing::Disabled {
            self.update_height(id);
            return false;
        }

        let balance = self.balance_of(id);
        debug_assert!((-2..=2).contains(&balance));
        if balance < -1 {
            // Left heavy
            if let Some(left_id) = self.nodes[id].left {
                if self.balance_of(left_id) > 0 {
                    self.rotate_left(left_id);
                }
            }
            let top = self.rotate_right(id);
            log::trace!("rebalanced left-heavy {}, new subtree root {}", id, top);
            true
        } else if balance > 1 {
            // Right heavy
            if let Some(right_id) = self.nodes[id].right {
                if self.balance_of(right_id) < 0 {
                    self.rotate_right(right_id);
                }
            }
            let top = self.rotate_left(id);
            log::trace!("rebalanced right-heavy {}, new subtree root {}", id, top);
            true
        } else {
            self.update_height(id);
            false
        }
    }

    /// Rebalances nodes starting from the given position up to the root node.
    pub(crate) fn rebalance(&mut self, start_from: Link) {
        let mut current = start_from;
        while let Some(id) = current {
            // Rotation may move `id` below its promoted child, so read the parent first.
            let parent = self.nodes[id].parent;
            self.rebalance_node(id);
            current = parent;
        }
    }

    /// Rebalances nodes starting from the given position up to the root node.
    /// Stops after the first rotation, which restores the subtree to its
    /// height before a single insert; ancestors above it keep valid heights.
    pub(crate) fn rebalance_once(&mut self, start_from: Link) {
        let mut current = start_from;
        while let Some(id) = current {
            let parent = self.nodes[id].parent;
            if self.rebalance_node(id) {
                break;
            }
            current = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::OrderedIndex;

    #[test]
    fn rotate_left_relinks_inner_subtree() {
        //   2              4
        //  / \            / \
        // 1   4    ->    2   5
        //    / \        / \
        //   3   5      1   3
        let mut index = OrderedIndex::disabled();
        index.extend([2, 1, 4, 3, 5]);
        let root = index.root.unwrap();
        let top = index.rotate_left(root);

        assert_eq!(index.root, Some(top));
        assert_eq!(index.nodes[top].key, 4);
        assert_eq!(index.nodes[top].parent, None);
        assert_eq!(index.nodes[top].height, 2);
        assert_eq!(index.nodes[root].height, 1);
        assert_eq!(index.preorder(), vec![&4, &2, &1, &3, &5]);
        assert!(index.validate());
    }

    #[test]
    fn rotate_right_under_parent() {
        //   1              1
        //    \              \
        //     4    ->        3
        //    /              / \
        //   3              2   4
        //  /
        // 2
        let mut index = OrderedIndex::disabled();
        index.extend([1, 4, 3, 2]);
        let four = index.nodes[index.root.unwrap()].right.unwrap();
        let top = index.rotate_right(four);
        // Rotations only refresh the two nodes they move.
        index.update_height(index.root.unwrap());

        assert_eq!(index.nodes[top].key, 3);
        assert_eq!(index.nodes[index.root.unwrap()].height, 2);
        assert_eq!(index.nodes[top].parent, index.root);
        assert_eq!(index.nodes[index.root.unwrap()].right, Some(top));
        assert_eq!(index.preorder(), vec![&1, &3, &2, &4]);
        assert!(index.find_violation().is_none());
    }

    #[test]
    fn rotation_without_child_is_noop() {
        let mut index = OrderedIndex::new();
        index.insert(7);
        let root = index.root.unwrap();
        assert_eq!(index.rotate_left(root), root);
        assert_eq!(index.rotate_right(root), root);
        assert_eq!(index.root, Some(root));
    }
}
