use std::fmt;
use std::ops::{Index, IndexMut};

/// Handle of a node slot inside an index's node arena.
///
/// Handles are only meaningful for the index that produced them and may be
/// reused once the node they named has been removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

pub(crate) type Link = Option<NodeId>;

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,
    pub(crate) height: usize,
}

impl<K> Node<K> {
    fn leaf(parent: Link, key: K) -> Self {
        Node {
            key,
            parent,
            left: None,
            right: None,
            height: 0,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Flat node storage. Vacant slots are recycled through a free list.
#[derive(Clone)]
pub(crate) struct Arena<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<usize>,
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn create(&mut self, parent: Link, key: K) -> NodeId {
        let node = Node::leaf(parent, key);
        match self.free.pop() {
            Some(index) => {
                debug_assert!(self.slots[index].is_none());
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Frees the slot and hands back the key it held.
    /// The caller must already have unlinked the node from the tree.
    pub(crate) fn destroy(&mut self, id: NodeId) -> K {
        match self.slots[id.0].take() {
            Some(node) => {
                self.free.push(id.0);
                node.key
            }
            None => panic!("node {} destroyed twice", id),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Height of an optional subtree; an absent subtree has height -1.
    pub(crate) fn height_of(&self, link: Link) -> isize {
        match link {
            None => -1,
            Some(id) => self[id].height as isize,
        }
    }
}

impl<K> Index<NodeId> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Node<K> {
        match &self.slots[id.0] {
            Some(node) => node,
            None => panic!("stale node handle {}", id),
        }
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        match &mut self.slots[id.0] {
            Some(node) => node,
            None => panic!("stale node handle {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recycles_freed_slots() {
        let mut arena = Arena::new();
        let a = arena.create(None, 'a');
        let b = arena.create(Some(a), 'b');
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.destroy(a), 'a');
        assert_eq!(arena.len(), 1);

        let c = arena.create(Some(b), 'c');
        assert_eq!(c, a);
        assert_eq!(arena[c].key, 'c');
        assert_eq!(arena[c].parent, Some(b));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn absent_subtree_height() {
        let mut arena = Arena::new();
        let a = arena.create(None, 1);
        assert_eq!(arena.height_of(None), -1);
        assert_eq!(arena.height_of(Some(a)), 0);
        assert!(arena[a].is_leaf());
    }

    #[test]
    #[should_panic]
    fn stale_handle_panics() {
        let mut arena = Arena::new();
        let a = arena.create(None, 1);
        arena.destroy(a);
        let _ = arena[a].key;
    }
}
