use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use crate::error::EmptyError;
use crate::node::{Arena, Link, NodeId};

/// Whether an index restores the AVL balance bound after each mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Balancing {
    /// Rotate after inserts and removals so the height stays logarithmic.
    #[default]
    Avl,
    /// Plain binary search tree: same insert and removal topology, no rotations.
    /// Cached heights are still maintained.
    Disabled,
}

/// An ordered set of keys stored in an AVL tree.
///
/// Nodes live in an arena and refer to each other by handle, so parent
/// back-links do not create ownership cycles.
///
/// ```
/// use avl_index::OrderedIndex;
/// let mut index = OrderedIndex::new();
/// index.insert(3);
/// index.insert(1);
/// index.insert(2);
/// assert_eq!(index.min(), Ok(&1));
/// assert_eq!(index.to_string(), "AVL pre-order { 2, 1, 3 }");
/// assert!(index.remove(&2));
/// assert!(!index.contains(&2));
/// ```
#[derive(Clone)]
pub struct OrderedIndex<K> {
    pub(crate) nodes: Arena<K>,
    pub(crate) root: Link,
    pub(crate) balancing: Balancing,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl<K> OrderedIndex<K> {
    /// Creates an empty, self-balancing index.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self::with_balancing(Balancing::Avl)
    }

    /// Creates an empty index with the given balancing mode.
    pub fn with_balancing(balancing: Balancing) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            balancing,
        }
    }

    /// Creates an empty index that never rotates.
    pub fn disabled() -> Self {
        Self::with_balancing(Balancing::Disabled)
    }

    pub fn balancing(&self) -> Balancing {
        self.balancing
    }

    /// Returns true if the index contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the index.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Height of the root node, `None` for an empty index.
    /// A single key has height 0.
    pub fn height(&self) -> Option<usize> {
        self.root.map(|id| self.nodes[id].height)
    }

    /// Removes all keys, deallocating all nodes.
    pub fn clear(&mut self) {
        log::debug!("clearing index of {} keys", self.len());
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the smallest key.
    pub fn min(&self) -> Result<&K, EmptyError> {
        self.first_node()
            .map(|id| &self.nodes[id].key)
            .ok_or(EmptyError)
    }

    /// Returns the largest key.
    pub fn max(&self) -> Result<&K, EmptyError> {
        self.last_node()
            .map(|id| &self.nodes[id].key)
            .ok_or(EmptyError)
    }

    pub(crate) fn first_node(&self) -> Link {
        self.root.map(|id| self.leftmost(id))
    }

    pub(crate) fn last_node(&self) -> Link {
        self.root.map(|id| self.rightmost(id))
    }

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left_id) = self.nodes[id].left {
            id = left_id;
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right_id) = self.nodes[id].right {
            id = right_id;
        }
        id
    }
}

impl<K: Ord> OrderedIndex<K> {
    /// Returns a reference to the stored key equal to the given one.
    ///
    /// The key may be any borrowed form of the index's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|id| &self.nodes[id].key)
    }

    /// Returns true if the index contains the key.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Inserts a key.
    /// Returns false and leaves the index untouched if the key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        let (parent, side) = match self.find_insert_pos(&key) {
            Some(pos) => pos,
            None => return false,
        };

        let id = self.nodes.create(parent, key);
        match (parent, side) {
            (None, _) => self.root = Some(id),
            (Some(parent_id), Side::Left) => self.nodes[parent_id].left = Some(id),
            (Some(parent_id), Side::Right) => self.nodes[parent_id].right = Some(id),
        }
        self.rebalance_once(parent);
        true
    }

    /// Removes a key.
    /// Returns whether the key was previously in the index.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes a key and returns the stored one, if present.
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key)?;
        Some(self.remove_node(id))
    }

    /// Removes and returns the smallest key.
    pub fn pop_first(&mut self) -> Option<K> {
        let id = self.first_node()?;
        Some(self.remove_node(id))
    }

    /// Removes and returns the largest key.
    pub fn pop_last(&mut self) -> Option<K> {
        let id = self.last_node()?;
        Some(self.remove_node(id))
    }

    fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(node.key.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        current
    }

    /// Finds the empty slot a new key would occupy.
    /// Returns `None` if the key is already present.
    fn find_insert_pos(&self, key: &K) -> Option<(Link, Side)> {
        let mut parent: Link = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            parent = Some(id);
            current = match key.cmp(&node.key) {
                Ordering::Equal => return None,
                Ordering::Less => {
                    side = Side::Left;
                    node.left
                }
                Ordering::Greater => {
                    side = Side::Right;
                    node.right
                }
            };
        }
        Some((parent, side))
    }
}

impl<K> OrderedIndex<K> {
    fn remove_node(&mut self, id: NodeId) -> K {
        debug_assert!(!self.is_empty());
        self.unlink_node(id);
        self.nodes.destroy(id)
    }

    /// Detaches `id` from the tree and rebalances from the lowest node whose
    /// subtree changed shape. The slot of `id` itself is left for the caller.
    fn unlink_node(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let (parent, left, right) = (node.parent, node.left, node.right);

        match (left, right) {
            (None, None) => {
                log::trace!("unlink leaf {}", id);
                self.replace_child(parent, id, None);
                self.rebalance(parent);
            }
            (Some(child_id), None) | (None, Some(child_id)) => {
                log::trace!("unlink {} by splicing in its only child {}", id, child_id);
                self.nodes[child_id].parent = parent;
                self.replace_child(parent, id, Some(child_id));
                self.rebalance(parent);
            }
            (Some(left_id), Some(right_id)) => {
                // Smallest node in the right subtree has no left child
                let successor_id = self.leftmost(right_id);
                log::trace!("unlink {} by promoting successor {}", id, successor_id);

                let rebalance_from = if successor_id == right_id {
                    Some(successor_id)
                } else {
                    // Successor sits deeper; its right subtree takes its old slot
                    let successor_parent = self.nodes[successor_id].parent;
                    let successor_right = self.nodes[successor_id].right;
                    if let Some(successor_parent_id) = successor_parent {
                        debug_assert_eq!(self.nodes[successor_parent_id].left, Some(successor_id));
                        self.nodes[successor_parent_id].left = successor_right;
                    }
                    if let Some(successor_right_id) = successor_right {
                        self.nodes[successor_right_id].parent = successor_parent;
                    }

                    self.nodes[successor_id].right = Some(right_id);
                    self.nodes[right_id].parent = Some(successor_id);
                    successor_parent
                };

                self.nodes[successor_id].left = Some(left_id);
                self.nodes[left_id].parent = Some(successor_id);

                self.nodes[successor_id].parent = parent;
                self.replace_child(parent, id, Some(successor_id));

                self.rebalance(rebalance_from);
            }
        }
    }
}

impl<K> Default for OrderedIndex<K> {
    /// Creates an empty, self-balancing index.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for OrderedIndex<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<K: Ord> Extend<K> for OrderedIndex<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |key| {
            self.insert(key);
        });
    }
}

impl<'a, K> Extend<&'a K> for OrderedIndex<K>
where
    K: Ord + Copy + 'a,
{
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<K: fmt::Debug> fmt::Debug for OrderedIndex<K> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}
