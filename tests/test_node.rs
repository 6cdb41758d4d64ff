use itertools::Itertools;
use oaktree::{Node, NodeKey, TreeError};

fn same(left: &[Node<&'static str>], right: &[&Node<&'static str>]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.ptr_eq(r))
}

fn child_nodes(node: &Node<&'static str>) -> Vec<Node<&'static str>> {
    node.children().into_iter().map(|(_, child)| child).collect_vec()
}

#[test_log::test]
fn test_add_child_then_lookup() {
    let parent = Node::new("parent");
    let child = Node::new("child");
    parent.add_child_at("k", &child);

    assert!(parent.child_by_key("k").unwrap().ptr_eq(&child));
    assert!(child.parent().unwrap().ptr_eq(&parent));
}

#[test_log::test]
fn test_constructor_wires_children() {
    let (first, second) = (Node::new("first"), Node::new("second"));
    let node = Node::with_children("abc", [("key", first.clone()), ("0", second.clone())]);

    assert_eq!(*node.value(), "abc");
    assert_eq!(node.children_keys(), vec![NodeKey::from("key"), NodeKey::Index(0)]);
    assert!(same(&child_nodes(&node), &[&first, &second]));
    assert!(first.parent().unwrap().ptr_eq(&node));
}

#[test_log::test]
fn test_set_children_replaces_previous_children() {
    let node = Node::new("node");
    let (old_a, old_b) = (Node::new("old a"), Node::new("old b"));
    node.add_child(&old_a).add_child(&old_b);

    let (new_a, new_b) = (Node::new("new a"), Node::new("new b"));
    node.set_children([(NodeKey::Index(0), new_a.clone()), (NodeKey::from("a"), new_b.clone())]);

    assert!(old_a.parent().is_none());
    assert!(old_b.parent().is_none());
    assert!(same(&child_nodes(&node), &[&new_a, &new_b]));
    assert!(new_a.parent().unwrap().ptr_eq(&node));
    assert!(new_b.parent().unwrap().ptr_eq(&node));
}

#[test_log::test]
fn test_set_children_with_current_children() {
    let node = Node::new("node");
    let (first, second) = (Node::new("1"), Node::new("2"));
    node.add_child_at(0, &first).add_child_at("a", &second);

    node.set_children(node.children());

    assert_eq!(node.children_keys(), vec![NodeKey::Index(0), NodeKey::from("a")]);
    assert!(same(&child_nodes(&node), &[&first, &second]));
    assert!(second.parent().unwrap().ptr_eq(&node));
}

#[test_log::test]
fn test_appending_after_mixed_keys() {
    let node = Node::new("node");
    node.add_child(&Node::new("0"))
        .add_child_at(5, &Node::new("5"))
        .add_child_at("x", &Node::new("x"))
        .add_child(&Node::new("6"));

    assert_eq!(
        node.children_keys().iter().map(NodeKey::to_string).join(","),
        "0,5,x,6"
    );
}

#[test_log::test]
fn test_set_parent_does_not_touch_children() {
    let (node, parent) = (Node::new("node"), Node::new("parent"));
    node.set_parent(Some(&parent));

    assert!(node.parent().unwrap().ptr_eq(&parent));
    assert!(parent.is_leaf());

    node.set_parent(None);
    assert!(node.is_root());
}

#[test_log::test]
fn test_remove_child() {
    let tree = Node::new("tree");
    let (first, second) = (Node::new("first"), Node::new("second"));
    tree.add_child(&first).add_child(&second);
    assert_eq!(tree.child_count(), 2);

    tree.remove_child(&first);

    assert_eq!(tree.child_count(), 1);
    assert!(first.parent().is_none());
    assert!(same(&child_nodes(&tree), &[&second]));
}

#[test_log::test]
fn test_remove_child_uses_identity() {
    let tree = Node::new("tree");
    let attached = Node::new("twin");
    let lookalike = Node::new("twin");
    tree.add_child(&attached);

    assert_eq!(attached, lookalike);
    tree.remove_child(&lookalike);

    assert_eq!(tree.child_count(), 1);
    assert!(attached.parent().unwrap().ptr_eq(&tree));
}

#[test_log::test]
fn test_remove_all_children_keeps_grandchildren() {
    let tree = Node::new("tree");
    let (child, grandchild) = (Node::new("child"), Node::new("grandchild"));
    tree.add_child(&child);
    child.add_child(&grandchild);

    tree.remove_all_children();

    assert!(tree.is_leaf());
    assert!(child.is_root());
    assert!(grandchild.parent().unwrap().ptr_eq(&child));
}

#[test_log::test]
fn test_pop_root_returns_root() {
    let root = Node::new("root");
    root.add_child(&Node::new("A"));

    assert!(root.pop().ptr_eq(&root));
    assert_eq!(root.child_count(), 1);
}

#[test_log::test]
fn test_pop_subtree() {
    let root = Node::new("root");
    let (a, b) = (Node::new("A"), Node::new("B"));
    root.add_child(&a);
    a.add_child(&b);

    let popped = a.pop();

    assert!(popped.ptr_eq(&a));
    assert!(a.parent().is_none());
    assert!(root.is_leaf());
    // The excised subtree is intact and usable as a tree of its own
    assert!(b.root().ptr_eq(&a));
}

#[test_log::test]
fn test_pop_with_hand_set_parent() {
    let (node, parent) = (Node::new("node"), Node::new("parent"));
    node.set_parent(Some(&parent));
    node.pop();

    assert!(node.is_root());
}

#[test_log::test]
fn test_predicates() {
    let tree = Node::new("tree");
    let child = Node::new("child");
    tree.add_child(&child);

    assert!(child.is_child() && !child.is_root() && child.is_leaf());
    assert!(tree.is_root() && !tree.is_child() && !tree.is_leaf());
    for node in [&tree, &child] {
        assert_eq!(node.is_root(), !node.is_child());
        assert_eq!(node.is_leaf(), node.children().is_empty());
    }
}

#[test_log::test]
fn test_child_by_absent_key() {
    let node = Node::with_children("node", [(0, Node::new("zero"))]);

    match node.child_by_key("missing") {
        Err(TreeError::KeyNotFound(key)) => assert_eq!(key, NodeKey::from("missing")),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(node.child_by_key(1), Err(TreeError::KeyNotFound(NodeKey::Index(1)))));
    assert_eq!(
        node.child_by_key("missing").unwrap_err().to_string(),
        "Key `missing` does not exist"
    );
}

#[test_log::test]
fn test_fluency() {
    let node = Node::new("node");
    let (parent, child) = (Node::new("parent"), Node::new("child"));

    assert!(node.add_child(&child).ptr_eq(&node));
    assert!(node.set_parent(Some(&parent)).ptr_eq(&node));
    assert!(node.set_value("value").ptr_eq(&node));
    assert!(node.remove_child(&child).ptr_eq(&node));
    assert!(node.remove_all_children().ptr_eq(&node));
}

#[test_log::test]
fn test_dropping_the_root_releases_the_tree() {
    let root = Node::new("root");
    let child = Node::new("child");
    root.add_child(&child);
    drop(child);

    let survivor = root.child_by_key(0).unwrap();
    assert!(survivor.is_child());
    drop(root);
    assert!(survivor.is_root());
}

#[test_log::test]
fn test_integer_names_share_the_index_slot() {
    let root = Node::new("root");
    let (first, second) = (Node::new("first"), Node::new("second"));
    root.add_child_at(NodeKey::Name("7".into()), &first);

    assert_eq!(root.children_keys(), vec![NodeKey::Index(7)]);
    assert!(root.child_by_key("7").unwrap().ptr_eq(&first));
    assert!(root.child_by_key(NodeKey::Name("7".into())).unwrap().ptr_eq(&first));

    root.add_child_at(7, &second);
    assert_eq!(root.child_count(), 1);
    assert!(first.is_root());
    assert!(root.child_by_key(7).unwrap().ptr_eq(&second));
}
