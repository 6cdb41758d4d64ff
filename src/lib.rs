//! ## About
//!
//! This crate contains an ordered, keyed tree: every [Node] holds a value, owns its children
//! (kept in insertion order under integer or string keys) and refers back to its parent without
//! owning it. Trees are traversed with [visitors](Visitor) and can be exported to nested
//! [records](NodeRecord) and rebuilt from them, optionally passing every value through a
//! transform. With the `json` feature (on by default) records read and write JSON.
//!
//! See the [Node] struct to get started.
//!
//! ```
//! use oaktree::{LeafVisitor, Node};
//!
//! //  root
//! //  |- a
//! //  \- b
//! //     \- c
//! let root = Node::new("root");
//! let (a, b, c) = (Node::new("a"), Node::new("b"), Node::new("c"));
//! root.add_child(&a).add_child_at("b", &b);
//! b.add_child(&c);
//!
//! let leaves = root.accept(&LeafVisitor);
//! assert!(leaves[0].ptr_eq(&a) && leaves[1].ptr_eq(&c));
//!
//! // Excise the subtree and use it on its own
//! b.pop();
//! assert!(b.is_root() && root.child_by_key("b").is_err());
//! ```
//!
//! ## Ownership
//!
//! [Node] is a handle around `Rc<RefCell<..>>`. Parents hold strong references to their
//! children, children hold a `Weak` reference to their parent. Trees are therefore confined to
//! one thread, and a subtree stays alive as long as its root is reachable from somewhere.
//!
//! ## Naming conventions
//! * Traits – capabilities ([Visitor])
//! * Structs – substantives that indicate entities implementing a behavior
//! * Methods – imperative forms with the exception of getters and factories, which
//!             use substantives (i.e., omit a `get_` prefix) much like the standard library.

pub mod errors;
pub mod node;
pub mod record;
pub mod visitor;

pub use errors::{TreeError, TreeResult};
pub use node::{Node, NodeKey};
pub use record::NodeRecord;
pub use visitor::{ClosureVisitor, LeafVisitor, Visitor};
