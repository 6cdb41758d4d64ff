//! # Nomenclature
//!
//! Trees are not iterated but *visited*: [crate::Node::accept] hands the node to a [Visitor],
//! which decides on its own whether and how to descend into the children. The node imposes no
//! traversal policy.
//!
//! Visitors take `&self`. Results are aggregated through return values rather than through state
//! captured by the visitor.

pub mod closure;
pub mod leaf;

pub use closure::ClosureVisitor;
pub use leaf::LeafVisitor;

use crate::Node;

/// Computes a result from visiting one node, optionally recursing into its children via
/// [Node::accept].
pub trait Visitor<T> {
    type Output;

    fn visit(&self, node: &Node<T>) -> Self::Output;
}
