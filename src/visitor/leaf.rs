//! A visitor collecting the leaves below a node.

use super::Visitor;
use crate::Node;
use itertools::Itertools;

/// Collects every leaf reachable from the visited node, in pre-order. Visiting a leaf yields the
/// leaf itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafVisitor;

impl<T> Visitor<T> for LeafVisitor {
    type Output = Vec<Node<T>>;

    fn visit(&self, node: &Node<T>) -> Vec<Node<T>> {
        if node.is_leaf() {
            return vec![node.clone()];
        }
        node.children()
            .iter()
            .flat_map(|(_, child)| child.accept(self))
            .collect_vec()
    }
}
