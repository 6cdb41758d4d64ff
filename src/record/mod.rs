//! Structural export of a tree into nested [NodeRecord]s and reconstruction from them.
//!
//! A record mirrors a node: its (optionally transformed) value and its children's records under
//! the same keys and in the same order. Records own their data, so they outlive the tree and can
//! be handed to any serde format when the `json` feature is enabled.

#[cfg(feature = "json")]
pub mod json;

use crate::{Node, NodeKey};
use itertools::Itertools;
use tracing::debug;
use tracing_attributes::instrument;

/// Plain-data image of a node and its subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord<V> {
    pub value: V,
    pub children: Vec<(NodeKey, NodeRecord<V>)>,
}

impl<V> NodeRecord<V> {
    pub fn new(value: V) -> Self {
        NodeRecord {
            value,
            children: vec![],
        }
    }

    /// Builder for nested records. An existing `key` is overwritten in place.
    pub fn with_child(mut self, key: impl Into<NodeKey>, child: NodeRecord<V>) -> Self {
        let key = key.into().normalize();
        match self.children.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = child,
            None => self.children.push((key, child)),
        }
        self
    }

    /// Number of records in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|(_, child)| child.size()).sum::<usize>()
    }

    /// Transforms every value, parents before children.
    pub fn map<U, F>(self, mut f: F) -> NodeRecord<U>
    where
        F: FnMut(V) -> U,
    {
        self.map_inner(&mut f)
    }

    fn map_inner<U, F>(self, f: &mut F) -> NodeRecord<U>
    where
        F: FnMut(V) -> U,
    {
        let NodeRecord { value, children } = self;
        NodeRecord {
            value: f(value),
            children: children
                .into_iter()
                .map(|(key, child)| (key, child.map_inner(f)))
                .collect_vec(),
        }
    }

    /// Like [NodeRecord::map] but stops at the first error.
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<NodeRecord<U>, E>
    where
        F: FnMut(V) -> Result<U, E>,
    {
        self.try_map_inner(&mut f)
    }

    fn try_map_inner<U, E, F>(self, f: &mut F) -> Result<NodeRecord<U>, E>
    where
        F: FnMut(V) -> Result<U, E>,
    {
        let NodeRecord { value, children } = self;
        let value = f(value)?;
        let children = children
            .into_iter()
            .map(|(key, child)| Ok::<_, E>((key, child.try_map_inner(f)?)))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(NodeRecord { value, children })
    }
}

impl<T> Node<T> {
    /// Exports the subtree rooted here, cloning every value.
    pub fn to_array(&self) -> NodeRecord<T>
    where
        T: Clone,
    {
        self.to_array_with(T::clone)
    }

    /// Exports the subtree rooted here. `serializer` is called exactly once per node, parents
    /// before children. It receives a borrowed value and must not mutate the tree.
    pub fn to_array_with<V, F>(&self, mut serializer: F) -> NodeRecord<V>
    where
        F: FnMut(&T) -> V,
    {
        self.export(&mut serializer)
    }

    fn export<V, F>(&self, serializer: &mut F) -> NodeRecord<V>
    where
        F: FnMut(&T) -> V,
    {
        let value = serializer(&*self.value());
        let children = self
            .children()
            .into_iter()
            .map(|(key, child)| (key, child.export(serializer)))
            .collect_vec();
        NodeRecord { value, children }
    }

    /// Rebuilds a tree from `record`. The returned node is a root.
    pub fn from_array(record: NodeRecord<T>) -> Self {
        Self::from_array_with(record, |value| value)
    }

    /// Rebuilds a tree from `record`, passing every value through `unserializer` exactly once,
    /// parents before children.
    #[instrument(level = "debug", skip_all, fields(size = record.size()))]
    pub fn from_array_with<V, F>(record: NodeRecord<V>, mut unserializer: F) -> Self
    where
        F: FnMut(V) -> T,
    {
        let root = Self::import(record, &mut unserializer);
        debug!(children = root.child_count(), "rebuilt tree");
        root
    }

    fn import<V, F>(record: NodeRecord<V>, unserializer: &mut F) -> Self
    where
        F: FnMut(V) -> T,
    {
        let NodeRecord { value, children } = record;
        let node = Node::new(unserializer(value));
        for (key, child) in children {
            node.add_child_at(key, &Self::import(child, unserializer));
        }
        node
    }
}

impl<T: Clone> From<&Node<T>> for NodeRecord<T> {
    fn from(node: &Node<T>) -> Self {
        node.to_array()
    }
}

impl<T> From<NodeRecord<T>> for Node<T> {
    fn from(record: NodeRecord<T>) -> Self {
        Node::from_array(record)
    }
}
