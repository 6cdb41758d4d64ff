//! A visitor that delegates to a callback.

use super::Visitor;
use crate::Node;
use core::fmt;
use std::marker::PhantomData;

/// Visitor backed by a callback. The callback receives the visited node *and the visitor itself*,
/// since a closure cannot otherwise name the visitor holding it. That is what allows recursion:
///
/// ```
/// use oaktree::{ClosureVisitor, Node, Visitor};
///
/// let root = Node::with_children(1, [("a", Node::new(2)), ("b", Node::new(3))]);
/// let sum = ClosureVisitor::new(|node: &Node<i32>, visitor: &dyn Visitor<i32, Output = i32>| {
///     let own = *node.value();
///     own + node.children().iter().map(|(_, child)| child.accept(visitor)).sum::<i32>()
/// });
///
/// assert_eq!(root.accept(&sum), 6);
/// ```
pub struct ClosureVisitor<T, R, F> {
    callback: F,
    // Ties the node and result type to the visitor without owning either
    marker: PhantomData<fn(&Node<T>) -> R>,
}

impl<T, R, F> ClosureVisitor<T, R, F>
where
    F: Fn(&Node<T>, &dyn Visitor<T, Output = R>) -> R,
{
    pub fn new(callback: F) -> Self {
        ClosureVisitor {
            callback,
            marker: PhantomData,
        }
    }
}

impl<T, R, F> Visitor<T> for ClosureVisitor<T, R, F>
where
    F: Fn(&Node<T>, &dyn Visitor<T, Output = R>) -> R,
{
    type Output = R;

    fn visit(&self, node: &Node<T>) -> R {
        (self.callback)(node, self)
    }
}

impl<T, R, F> fmt::Debug for ClosureVisitor<T, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureVisitor").finish_non_exhaustive()
    }
}
