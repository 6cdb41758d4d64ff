//! The tree vertex. A [Node] is a handle: cloning it yields another handle to the *same* vertex,
//! never a copy of the subtree. Parents own their children, children only hold a weak reference
//! back to their parent, so a detached subtree lives exactly as long as somebody holds a handle
//! to it.
//!
//! All mutators take `&self` and return `&Self` so that calls can be chained:
//!
//! ```
//! use oaktree::{Node, NodeKey};
//!
//! let root = Node::new("root");
//! let (a, b) = (Node::new("a"), Node::new("b"));
//! root.add_child(&a).add_child_at("b", &b);
//!
//! assert_eq!(root.children_keys(), vec![NodeKey::Index(0), NodeKey::from("b")]);
//! assert!(b.parent().unwrap().ptr_eq(&root));
//! ```

mod children;
mod key;

pub use key::NodeKey;

use crate::{TreeError, TreeResult, Visitor};
use children::Children;
use core::fmt;
use std::{
    cell::{Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};
use tracing::trace;

pub(crate) struct NodeData<T> {
    pub(crate) value: T,
    pub(crate) children: Children<T>,
    parent: Option<Weak<RefCell<NodeData<T>>>>,
}

/// Handle to a vertex holding a value, its keyed children and a back-reference to its parent.
pub struct Node<T>(pub(crate) Rc<RefCell<NodeData<T>>>);

impl<T> Node<T> {
    /// Creates a root without children.
    pub fn new(value: T) -> Self {
        Node(Rc::new(RefCell::new(NodeData {
            value,
            children: Children::new(),
            parent: None,
        })))
    }

    /// Creates a root and attaches `children` under their keys, in iteration order.
    pub fn with_children<K, I>(value: T, children: I) -> Self
    where
        K: Into<NodeKey>,
        I: IntoIterator<Item = (K, Node<T>)>,
    {
        let node = Node::new(value);
        for (key, child) in children {
            node.add_child_at(key, &child);
        }
        node
    }

    /// Whether both handles refer to the same vertex.
    pub fn ptr_eq(&self, other: &Node<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn value(&self) -> Ref<'_, T> {
        Ref::map(self.0.borrow(), |data| &data.value)
    }

    pub fn value_mut(&self) -> RefMut<'_, T> {
        RefMut::map(self.0.borrow_mut(), |data| &mut data.value)
    }

    pub fn set_value(&self, value: T) -> &Self {
        self.0.borrow_mut().value = value;
        self
    }

    /// Stores `value` and hands back the previous one.
    pub fn replace_value(&self, value: T) -> T {
        std::mem::replace(&mut self.0.borrow_mut().value, value)
    }

    /// Appends `child` under the next free integer key (one past the highest integer key this
    /// node has ever stored). A child attached elsewhere is detached from there first.
    pub fn add_child(&self, child: &Node<T>) -> &Self {
        child.pop();
        let key = self.0.borrow_mut().children.push(child.clone());
        child.set_parent(Some(self));
        trace!(%key, "attached child");
        self
    }

    /// Attaches `child` under `key`. An existing entry under `key` is overwritten in place and
    /// the node previously stored there is detached. Names spelling a canonical integer are
    /// stored as that index.
    pub fn add_child_at(&self, key: impl Into<NodeKey>, child: &Node<T>) -> &Self {
        let key = key.into().normalize();
        let already_there = self
            .0
            .borrow()
            .children
            .get(&key)
            .map_or(false, |current| current.ptr_eq(child));
        if already_there {
            child.set_parent(Some(self));
            return self;
        }

        child.pop();
        let displaced = self.0.borrow_mut().children.insert(key.clone(), child.clone());
        child.set_parent(Some(self));
        if let Some(displaced) = displaced {
            displaced.set_parent(None);
            trace!(%key, "detached overwritten child");
        }
        trace!(%key, "attached child");
        self
    }

    /// Sets the back-reference only. The children of `parent` are left untouched.
    pub fn set_parent(&self, parent: Option<&Node<T>>) -> &Self {
        self.0.borrow_mut().parent = parent.map(|parent| Rc::downgrade(&parent.0));
        self
    }

    /// The parent, if it is still alive.
    pub fn parent(&self) -> Option<Node<T>> {
        self.0.borrow().parent.as_ref().and_then(Weak::upgrade).map(Node)
    }

    /// Walks up the parent references. O(depth).
    pub fn root(&self) -> Node<T> {
        self.ancestors().last().unwrap_or_else(|| self.clone())
    }

    /// Parent, grandparent and so on, up to the root.
    fn ancestors(&self) -> impl Iterator<Item = Node<T>> {
        std::iter::successors(self.parent(), Node::parent)
    }

    /// Snapshot of the children in insertion order. The handles alias the real children, the
    /// vector itself is detached from the node.
    pub fn children(&self) -> Vec<(NodeKey, Node<T>)> {
        self.0.borrow().children.snapshot()
    }

    pub fn children_keys(&self) -> Vec<NodeKey> {
        self.0.borrow().children.keys()
    }

    pub fn child_by_key(&self, key: impl Into<NodeKey>) -> TreeResult<Node<T>> {
        let key = key.into().normalize();
        let child = self.0.borrow().children.get(&key).cloned();
        child.ok_or(TreeError::KeyNotFound(key))
    }

    /// Replaces all children by `children`, attached under their keys in iteration order.
    pub fn set_children<K, I>(&self, children: I) -> &Self
    where
        K: Into<NodeKey>,
        I: IntoIterator<Item = (K, Node<T>)>,
    {
        self.remove_all_children();
        for (key, child) in children {
            self.add_child_at(key, &child);
        }
        self
    }

    /// Detaches every child. The children keep their own subtrees.
    pub fn remove_all_children(&self) -> &Self {
        let removed = self.0.borrow_mut().children.drain();
        for (key, child) in removed {
            child.set_parent(None);
            trace!(%key, "detached child");
        }
        self
    }

    /// Detaches `child` (compared by identity). Does nothing if it is not a child of this node.
    pub fn remove_child(&self, child: &Node<T>) -> &Self {
        let removed = self.0.borrow_mut().children.remove_node(child);
        if let Some((key, child)) = removed {
            child.set_parent(None);
            trace!(%key, "detached child");
        }
        self
    }

    /// Detaches this node from its parent, turning it into the root of its own tree. Roots are
    /// returned unchanged.
    pub fn pop(&self) -> &Self {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
            // A parent set by hand may not list this node among its children
            self.set_parent(None);
            trace!("popped subtree");
        }
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    pub fn is_child(&self) -> bool {
        !self.is_root()
    }

    pub fn is_leaf(&self) -> bool {
        self.0.borrow().children.is_empty()
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Number of edges between this node and its root.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Lets `visitor` compute a result for this node. Traversal policy is entirely up to the
    /// visitor.
    pub fn accept<V>(&self, visitor: &V) -> V::Output
    where
        V: Visitor<T> + ?Sized,
    {
        visitor.visit(self)
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Node(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for Node<T> {
    fn default() -> Self {
        Node::new(T::default())
    }
}

/// Structural equality: same value and equal children under the same keys in the same order.
/// Parents are not compared.
impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let (this, that) = (self.0.borrow(), other.0.borrow());
        this.value == that.value && this.children.iter().eq(that.children.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(data) => f
                .debug_struct("Node")
                .field("value", &data.value)
                .field("children", &data.children)
                .finish(),
            Err(_) => f.write_str("Node { <mutably borrowed> }"),
        }
    }
}
