//! Ordered, keyed storage for the children of a node.

use super::{Node, NodeKey};
use core::fmt;
use itertools::Itertools;

/// Children in insertion order. `next_index` is one past the highest integer key ever stored and
/// never shrinks, so appending after removals does not reuse keys.
pub(crate) struct Children<T> {
    entries: Vec<(NodeKey, Node<T>)>,
    next_index: i64,
}

impl<T> Children<T> {
    pub(crate) fn new() -> Self {
        Children {
            entries: vec![],
            next_index: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get(&self, key: &NodeKey) -> Option<&Node<T>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    pub(crate) fn keys(&self) -> Vec<NodeKey> {
        self.entries.iter().map(|(key, _)| key.clone()).collect_vec()
    }

    pub(crate) fn snapshot(&self) -> Vec<(NodeKey, Node<T>)> {
        self.entries.clone()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&NodeKey, &Node<T>)> {
        self.entries.iter().map(|(key, node)| (key, node))
    }

    /// Stores `node` under the next free index and returns that index.
    pub(crate) fn push(&mut self, node: Node<T>) -> NodeKey {
        let key = NodeKey::Index(self.next_index);
        self.insert(key.clone(), node);
        key
    }

    /// Stores `node` under `key`. An existing entry keeps its position and its previous node is
    /// returned.
    pub(crate) fn insert(&mut self, key: NodeKey, node: Node<T>) -> Option<Node<T>> {
        if let NodeKey::Index(index) = key {
            self.next_index = self.next_index.max(index.saturating_add(1));
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    /// Removes the first entry holding exactly `node` (identity, not equality).
    pub(crate) fn remove_node(&mut self, node: &Node<T>) -> Option<(NodeKey, Node<T>)> {
        let position = self.entries.iter().position(|(_, n)| n.ptr_eq(node))?;
        Some(self.entries.remove(position))
    }

    /// Empties the collection. The index counter is kept.
    pub(crate) fn drain(&mut self) -> Vec<(NodeKey, Node<T>)> {
        std::mem::take(&mut self.entries)
    }
}

impl<T: fmt::Debug> fmt::Debug for Children<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
