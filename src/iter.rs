use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::index::OrderedIndex;
use crate::node::{Link, NodeId};

/// An iterator over the keys of an index in ascending order.
pub struct Iter<'a, K> {
    index: &'a OrderedIndex<K>,
    front: Link,
    back: Link,
    remaining: usize,
}

/// An owning iterator over the keys of an index in ascending order.
pub struct IntoIter<K> {
    index: OrderedIndex<K>,
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<K> OrderedIndex<K> {
    /// Gets an iterator over the keys of the index in sorted order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            index: self,
            front: self.first_node(),
            back: self.last_node(),
            remaining: self.len(),
        }
    }

    /// Collects the keys in sorted order into a fresh queue.
    /// Each call walks the tree again, so the result always reflects the current keys.
    pub fn inorder_traversal(&self) -> VecDeque<&K> {
        let mut queue = VecDeque::with_capacity(self.len());
        self.traverse(|_| {}, |id| queue.push_back(&self.nodes[id].key));
        queue
    }

    /// Lists the keys in pre-order: node, then left subtree, then right subtree.
    pub fn preorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        self.traverse(|id| keys.push(&self.nodes[id].key), |_| {});
        keys
    }

    /// Visits the keys level by level, left to right within each level.
    pub fn traverse_level_order<F: FnMut(&K)>(&self, mut f: F) {
        let mut queue = VecDeque::new();
        queue.extend(self.root);
        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id];
            f(&node.key);
            queue.extend(node.left);
            queue.extend(node.right);
        }
    }

    /// Walks the tree along its parent links without auxiliary storage.
    fn traverse<Pre, In>(&self, mut preorder: Pre, mut inorder: In)
    where
        Pre: FnMut(NodeId),
        In: FnMut(NodeId),
    {
        if let Some(mut id) = self.root {
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        preorder(id);
                        if let Some(left_id) = self.nodes[id].left {
                            id = left_id;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        inorder(id);
                        if let Some(right_id) = self.nodes[id].right {
                            id = right_id;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => {
                        if let Some(parent_id) = self.nodes[id].parent {
                            if self.nodes[parent_id].left == Some(id) {
                                dir = Direction::FromLeft;
                            } else {
                                dir = Direction::FromRight;
                            }
                            id = parent_id;
                        } else {
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Next node in key order.
    fn successor(&self, id: NodeId) -> Link {
        if let Some(right_id) = self.nodes[id].right {
            return Some(self.leftmost(right_id));
        }
        let mut child = id;
        let mut parent = self.nodes[id].parent;
        while let Some(parent_id) = parent {
            if self.nodes[parent_id].left == Some(child) {
                break;
            }
            child = parent_id;
            parent = self.nodes[parent_id].parent;
        }
        parent
    }

    /// Previous node in key order.
    fn predecessor(&self, id: NodeId) -> Link {
        if let Some(left_id) = self.nodes[id].left {
            return Some(self.rightmost(left_id));
        }
        let mut child = id;
        let mut parent = self.nodes[id].parent;
        while let Some(parent_id) = parent {
            if self.nodes[parent_id].right == Some(child) {
                break;
            }
            child = parent_id;
            parent = self.nodes[parent_id].parent;
        }
        parent
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.index;
        let id = self.front?;
        self.remaining -= 1;
        self.front = index.successor(id);
        Some(&index.nodes[id].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.index;
        let id = self.back?;
        self.remaining -= 1;
        self.back = index.predecessor(id);
        Some(&index.nodes[id].key)
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<K: Ord> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.index.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.index.len(), Some(self.index.len()))
    }
}

impl<K: Ord> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.index.pop_last()
    }
}

impl<K: Ord> ExactSizeIterator for IntoIter<K> {}

impl<K: Ord> FusedIterator for IntoIter<K> {}

impl<'a, K> IntoIterator for &'a OrderedIndex<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord> IntoIterator for OrderedIndex<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { index: self }
    }
}

#[cfg(test)]
mod tests {
    use crate::OrderedIndex;

    #[test]
    fn inorder_traversal_is_sorted_and_restartable() {
        let index: OrderedIndex<i32> = [10, 20, 5, 15, 17, 7, 12].into_iter().collect();
        let first: Vec<i32> = index.inorder_traversal().into_iter().copied().collect();
        assert_eq!(first, vec![5, 7, 10, 12, 15, 17, 20]);
        let second: Vec<i32> = index.inorder_traversal().into_iter().copied().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let index: OrderedIndex<i32> = (0..7).collect();
        let mut iter = index.iter();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 3);
        let rest: Vec<_> = iter.collect();
        assert_eq!(rest, vec![&2, &3, &4]);
    }

    #[test]
    fn empty_traversals() {
        let index = OrderedIndex::<u8>::new();
        assert!(index.iter().next().is_none());
        assert!(index.inorder_traversal().is_empty());
        assert!(index.preorder().is_empty());
        let mut visited = 0;
        index.traverse_level_order(|_| visited += 1);
        assert_eq!(visited, 0);
    }

    #[test]
    fn level_order() {
        //       2
        //     /   \
        //    1     4
        //         / \
        //        3   5
        let index: OrderedIndex<i32> = (1..=5).collect();
        let mut levels = Vec::new();
        index.traverse_level_order(|key| levels.push(*key));
        assert_eq!(levels, vec![2, 1, 4, 3, 5]);
    }

    #[test]
    fn into_iter_yields_owned_keys() {
        let index: OrderedIndex<String> = ["pear", "apple", "fig"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut keys = index.into_iter();
        assert_eq!(keys.next_back().as_deref(), Some("pear"));
        assert_eq!(keys.collect::<Vec<_>>(), vec!["apple", "fig"]);
    }
}
