//! Construction, population and introspection of nodes

use matrix_tree::*;
use pretty_assertions::assert_eq;

fn leaf(rows: usize, cols: usize, data: &[f64]) -> Node {
    Node::leaf_with_data(rows, cols, data).expect("leaf construction")
}

// ═══════════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_create_leaf_reports_shape_and_kind() {
    let node = Node::new(3, 4, NodeKind::Leaf).unwrap();
    assert_eq!(node.kind(), NodeKind::Leaf);
    assert!(node.is_leaf());
    assert!(!node.is_internal());
    assert_eq!((node.rows(), node.cols()), (3, 4));
    assert_eq!(node.shape(), Shape { rows: 3, cols: 4 });
    assert_eq!(node.num_children(), 0);
    assert_eq!(node.leaf_data().map(<[f64]>::len), Some(12));
}

#[test]
fn test_create_internal_starts_empty() {
    let node = Node::new(2, 5, NodeKind::Internal).unwrap();
    assert_eq!(node.kind(), NodeKind::Internal);
    assert_eq!(node.num_children(), 0);
    assert!(!node.is_populated());
    assert_eq!(node.leaf_data(), None);
}

#[test]
fn test_create_rejects_zero_dimensions() {
    for (rows, cols) in [(0, 0), (0, 1), (1, 0)] {
        for kind in [NodeKind::Leaf, NodeKind::Internal] {
            assert_eq!(
                Node::new(rows, cols, kind).unwrap_err(),
                MatrixTreeError::InvalidDimensions { rows, cols }
            );
        }
    }
}

#[test]
fn test_leaf_with_data_rejects_wrong_length() {
    assert_eq!(
        Node::leaf_with_data(2, 2, &[1.0, 2.0, 3.0]).unwrap_err(),
        MatrixTreeError::SizeMismatch {
            expected: 4,
            found: 3
        }
    );
}

// ═══════════════════════════════════════════════════════════════════════
// set_leaf
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_set_leaf_copies_data() {
    let mut node = Node::leaf(2, 2).unwrap();
    let mut source = vec![1.0, 2.0, 3.0, 4.0];
    node.set_leaf(&source).unwrap();

    // The node holds its own copy
    source[0] = 100.0;
    assert_eq!(node.leaf_data(), Some(&[1.0, 2.0, 3.0, 4.0][..]));
}

#[test]
fn test_set_leaf_can_overwrite() {
    let mut node = leaf(1, 2, &[1.0, 2.0]);
    node.set_leaf(&[3.0, 4.0]).unwrap();
    assert_eq!(node.leaf_data(), Some(&[3.0, 4.0][..]));
}

#[test]
fn test_set_leaf_size_mismatch_keeps_previous_contents() {
    let mut node = leaf(2, 2, &[1.0, 2.0, 3.0, 4.0]);

    for bad in [&[][..], &[9.0][..], &[9.0; 5][..]] {
        assert_eq!(
            node.set_leaf(bad).unwrap_err(),
            MatrixTreeError::SizeMismatch {
                expected: 4,
                found: bad.len()
            }
        );
        assert_eq!(node.leaf_data(), Some(&[1.0, 2.0, 3.0, 4.0][..]));
    }
}

#[test]
fn test_set_leaf_on_internal_is_type_mismatch() {
    let mut node = Node::internal(2, 2).unwrap();
    assert_eq!(
        node.set_leaf(&[0.0; 4]).unwrap_err(),
        MatrixTreeError::TypeMismatch {
            expected: NodeKind::Leaf,
            found: NodeKind::Internal
        }
    );
}

// ═══════════════════════════════════════════════════════════════════════
// set_internal
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_set_internal_takes_children_in_order() {
    let mut root = Node::internal(1, 1).unwrap();
    root.set_internal(vec![leaf(1, 1, &[1.0]), leaf(1, 1, &[2.0]), leaf(1, 1, &[3.0])])
        .unwrap();

    assert!(root.is_populated());
    assert_eq!(root.num_children(), 3);
    let values: Vec<f64> = root
        .children()
        .iter()
        .map(|c| c.leaf_data().unwrap()[0])
        .collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_set_internal_accepts_empty_list() {
    let mut root = Node::internal(2, 2).unwrap();
    root.set_internal(Vec::new()).unwrap();
    assert!(root.is_populated());
    assert_eq!(root.num_children(), 0);
}

#[test]
fn test_set_internal_on_leaf_returns_children() {
    let mut node = Node::leaf(1, 1).unwrap();
    let rejected = node
        .set_internal(vec![leaf(1, 1, &[5.0])])
        .unwrap_err();

    assert_eq!(
        rejected.error,
        MatrixTreeError::TypeMismatch {
            expected: NodeKind::Internal,
            found: NodeKind::Leaf
        }
    );
    let children = rejected.into_children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].leaf_data(), Some(&[5.0][..]));
    assert_eq!(node.leaf_data(), Some(&[0.0][..]));
}

#[test]
fn test_set_internal_is_one_shot() {
    let mut root = Node::internal(1, 1).unwrap();
    root.set_internal(vec![leaf(1, 1, &[1.0])]).unwrap();

    let rejected = root
        .set_internal(vec![leaf(1, 1, &[2.0]), leaf(1, 1, &[3.0])])
        .unwrap_err();
    assert_eq!(rejected.error, MatrixTreeError::ChildrenAlreadySet);
    assert_eq!(rejected.children.len(), 2);

    // Original children untouched
    assert_eq!(root.num_children(), 1);
    assert_eq!(root.collapse().unwrap().as_slice(), &[1.0]);
}

#[test]
fn test_set_internal_error_converts_with_question_mark() {
    fn build() -> Result<Node> {
        let mut root = Node::leaf(1, 1)?;
        root.set_internal(vec![])?;
        Ok(root)
    }
    assert!(matches!(
        build(),
        Err(MatrixTreeError::TypeMismatch { .. })
    ));
}

#[test]
fn test_set_internal_does_not_check_child_shapes() {
    let odd = leaf(3, 1, &[1.0, 2.0, 3.0]);
    let root = Node::internal_with_children(2, 2, vec![odd]).unwrap();
    assert_eq!(root.num_children(), 1);
}

// ═══════════════════════════════════════════════════════════════════════
// Introspection and teardown
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_counts_and_depth() {
    let inner = Node::internal_with_children(
        2,
        2,
        vec![leaf(2, 2, &[0.0; 4]), leaf(2, 2, &[0.0; 4])],
    )
    .unwrap();
    let root = Node::internal_with_children(2, 2, vec![inner, leaf(2, 2, &[0.0; 4])]).unwrap();

    assert_eq!(root.node_count(), 5);
    assert_eq!(root.leaf_count(), 3);
    assert_eq!(root.depth(), 2);
    assert_eq!(root.children()[0].depth(), 1);
}

#[test]
fn test_destroy_reports_released_nodes() {
    let root = Node::internal_with_children(1, 1, vec![leaf(1, 1, &[1.0]), leaf(1, 1, &[2.0])])
        .unwrap();
    assert_eq!(root.destroy(), 3);

    assert_eq!(Node::leaf(4, 4).unwrap().destroy(), 1);
}

#[test]
fn test_drop_absent_node_is_noop() {
    let absent: Option<Node> = None;
    drop(absent);
}

#[test]
fn test_clone_is_deep() {
    let original = Node::internal_with_children(1, 1, vec![leaf(1, 1, &[1.0])]).unwrap();
    let mut copy = original.clone();
    copy.scale(10.0);

    assert_eq!(original.collapse().unwrap().as_slice(), &[1.0]);
    assert_eq!(copy.collapse().unwrap().as_slice(), &[10.0]);
}

#[test]
fn test_kind_and_shape_display() {
    assert_eq!(NodeKind::Leaf.to_string(), "leaf");
    assert_eq!(NodeKind::Internal.to_string(), "internal");
    assert_eq!(Shape::new(3, 7).unwrap().to_string(), "3x7");
    assert_eq!(Shape::new(3, 7).unwrap().len(), 21);
}
