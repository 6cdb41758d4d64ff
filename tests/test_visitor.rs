use itertools::Itertools;
use oaktree::{ClosureVisitor, LeafVisitor, Node, Visitor};

/// Root
/// |- A
/// |- B
/// |  |- C
/// |  \- D
/// |     \- E
/// \- F
struct Fixture {
    root: Node<&'static str>,
    a: Node<&'static str>,
    b: Node<&'static str>,
    c: Node<&'static str>,
    d: Node<&'static str>,
    e: Node<&'static str>,
    f: Node<&'static str>,
}

fn fixture() -> Fixture {
    let root = Node::new("root");
    let (a, b, c, d, e, f) = ["A", "B", "C", "D", "E", "F"]
        .into_iter()
        .map(Node::new)
        .collect_tuple()
        .unwrap();
    root.add_child(&a).add_child(&b).add_child(&f);
    b.add_child(&c).add_child(&d);
    d.add_child(&e);
    Fixture { root, a, b, c, d, e, f }
}

fn assert_same(actual: &[Node<&'static str>], expected: &[&Node<&'static str>]) {
    assert_eq!(
        actual.iter().map(|node| *node.value()).collect_vec(),
        expected.iter().map(|node| *node.value()).collect_vec()
    );
    assert!(actual.iter().zip(expected).all(|(a, e)| a.ptr_eq(e)));
}

#[test_log::test]
fn test_leaves_of_single_node() {
    let node = Node::new("alone");
    assert_same(&LeafVisitor.visit(&node), &[&node]);
}

#[test_log::test]
fn test_leaves_of_tree() {
    let tree = fixture();
    assert_same(&tree.root.accept(&LeafVisitor), &[&tree.a, &tree.c, &tree.e, &tree.f]);
}

#[test_log::test]
fn test_leaves_of_subtree() {
    let tree = fixture();
    assert_same(&tree.b.accept(&LeafVisitor), &[&tree.c, &tree.e]);
}

#[test_log::test]
fn test_leaf_collection_does_not_detach() {
    let tree = fixture();
    let leaves = tree.root.accept(&LeafVisitor);

    assert!(leaves.iter().all(|leaf| leaf.root().ptr_eq(&tree.root)));
    assert_eq!(tree.root.child_count(), 3);
}

#[test_log::test]
fn test_closure_visitor_counts_nodes() {
    let tree = fixture();
    let count = ClosureVisitor::new(
        |node: &Node<&'static str>, visitor: &dyn Visitor<&'static str, Output = usize>| {
            1 + node
                .children()
                .iter()
                .map(|(_, child)| child.accept(visitor))
                .sum::<usize>()
        },
    );

    assert_eq!(tree.root.accept(&count), 7);
    assert_eq!(tree.b.accept(&count), 4);
}

#[test_log::test]
fn test_closure_visitor_renders_paths() {
    let tree = fixture();
    let paths = ClosureVisitor::new(
        |node: &Node<&'static str>, visitor: &dyn Visitor<&'static str, Output = Vec<String>>| {
            let name = node.value().to_string();
            let mut paths = vec![name.clone()];
            for (key, child) in node.children() {
                paths.extend(
                    child
                        .accept(visitor)
                        .into_iter()
                        .map(|path| format!("{name}/{key}:{path}")),
                );
            }
            paths
        },
    );

    assert_eq!(
        tree.b.accept(&paths),
        &["B", "B/0:C", "B/1:D", "B/1:D/0:E"]
    );
}

#[test_log::test]
fn test_closure_visitor_may_mutate_the_tree() {
    let tree = fixture();
    let prune = ClosureVisitor::new(
        |node: &Node<&'static str>, visitor: &dyn Visitor<&'static str, Output = ()>| {
            for (_, child) in node.children() {
                if *child.value() == "D" {
                    child.pop();
                } else {
                    child.accept(visitor);
                }
            }
        },
    );
    tree.root.accept(&prune);

    assert_same(&tree.root.accept(&LeafVisitor), &[&tree.a, &tree.c, &tree.f]);
    assert!(tree.e.root().ptr_eq(&tree.d));
    assert_eq!(*tree.e.root().value(), "D");

    // Nothing else owns the popped subtree
    drop(tree.d);
    assert!(tree.e.is_root());
}

#[test_log::test]
fn test_visitors_behind_trait_objects() {
    let tree = fixture();
    let visitors: Vec<Box<dyn Visitor<&'static str, Output = Vec<Node<&'static str>>>>> = vec![
        Box::new(LeafVisitor),
        Box::new(ClosureVisitor::new(
            |node: &Node<&'static str>, _: &dyn Visitor<&'static str, Output = Vec<Node<&'static str>>>| {
                vec![node.clone()]
            },
        )),
    ];

    let sizes = visitors
        .iter()
        .map(|visitor| tree.root.accept(visitor.as_ref()).len())
        .collect_vec();
    assert_eq!(sizes, &[4, 1]);
}
