//! End-to-end tests: build a forest in memory, serialize it, reload it, and
//! classify samples through the full stack.

use rforest::{
    decode_forest, encode_forest, ClassificationStatus, DecodeError, Forest, Node, Operator,
    RandomForestModel, Tree, TreeBuilder, TreeOutcome,
};

/// Three-node tree: root(feat0 <= threshold) → leaf(left_label) / leaf(right_label).
fn stump(threshold: f64, left_label: i16, right_label: i16) -> Tree {
    let mut builder = TreeBuilder::new();
    builder.add_split(0, Operator::Le, threshold, 1, 2);
    builder.add_leaf(left_label);
    builder.add_leaf(right_label);
    builder.build()
}

fn leaf_tree(label: i16) -> Tree {
    let mut builder = TreeBuilder::new();
    builder.add_leaf(label);
    builder.build()
}

/// Tree whose right branch was pruned away: any feat0 > 2.0 yields Pruned.
fn half_pruned_tree() -> Tree {
    Tree::from_nodes(vec![
        Node {
            right: None,
            ..Node::split(0, Operator::Le, 2.0, 1, 1)
        },
        Node::leaf(0),
    ])
}

#[test]
fn single_leaf_forest_classifies_everything() {
    let mut forest = Forest::new(6, 4);
    forest.push_tree(leaf_tree(5));
    let model = RandomForestModel::from_forest(forest);

    for sample in [&[0.0, 0.0, 0.0, 0.0][..], &[1.0, -3.0, 7.5, 0.1][..]] {
        let result = model.classify(sample);
        assert_eq!(result.label, Some(5));
        assert_eq!(result.votes, 1);
        assert_eq!(result.status, ClassificationStatus::Ok);
    }
}

#[test]
fn three_node_tree_boundary_behavior() {
    let mut forest = Forest::new(2, 1);
    forest.push_tree(stump(2.0, 0, 1));
    let model = RandomForestModel::from_forest(forest);

    assert_eq!(model.classify(&[1.0]).label, Some(0));
    assert_eq!(model.classify(&[3.0]).label, Some(1));
    // Boundary is inclusive under LE.
    assert_eq!(model.classify(&[2.0]).label, Some(0));
}

#[test]
fn ensemble_majority_and_status_through_serialization() {
    let mut forest = Forest::new(3, 1);
    forest.push_tree(stump(2.0, 1, 2));
    forest.push_tree(stump(4.0, 1, 2));
    forest.push_tree(leaf_tree(2));

    let model = RandomForestModel::from_bytes(&encode_forest(&forest).unwrap()).unwrap();

    // feat0 = 1.0: votes [1, 1, 2] → leader 1 with 2 votes.
    let result = model.classify(&[1.0]);
    assert_eq!(result.label, Some(1));
    assert_eq!(result.votes, 2);
    assert_eq!(result.status, ClassificationStatus::Ok);

    // feat0 = 3.0: votes [2, 1, 2] → leader 2 with 2 votes.
    let result = model.classify(&[3.0]);
    assert_eq!(result.label, Some(2));
    assert_eq!(result.votes, 2);
}

#[test]
fn pruned_trees_are_excluded_but_do_not_abort() {
    let mut forest = Forest::new(2, 1);
    forest.push_tree(half_pruned_tree());
    forest.push_tree(leaf_tree(1));

    let model = RandomForestModel::from_bytes(&encode_forest(&forest).unwrap()).unwrap();
    let result = model.classify(&[3.0]);

    assert_eq!(result.status, ClassificationStatus::Pruned);
    assert_eq!(result.per_tree.outcomes()[0], TreeOutcome::Pruned);
    assert_eq!(result.label, Some(1));
    assert_eq!(result.votes, 1);
}

#[test]
fn all_trees_pruned_yields_no_leader() {
    let mut forest = Forest::new(2, 1);
    forest.push_tree(half_pruned_tree());
    forest.push_tree(half_pruned_tree());

    let model = RandomForestModel::from_forest(forest);
    let result = model.classify(&[3.0]);

    assert_eq!(result.status, ClassificationStatus::Pruned);
    assert_eq!(result.label, None);
    assert_eq!(result.votes, 0);
}

#[test]
fn corrupt_feature_index_degrades_only_that_tree() {
    let mut builder = TreeBuilder::new();
    builder.add_split(9, Operator::Le, 2.0, 1, 2);
    builder.add_leaf(0);
    builder.add_leaf(1);

    let mut forest = Forest::new(2, 1);
    forest.push_tree(builder.build());
    forest.push_tree(leaf_tree(0));

    let model = RandomForestModel::from_forest(forest);
    let result = model.classify(&[1.0]);

    assert!(matches!(
        result.per_tree.outcomes()[0],
        TreeOutcome::Failed(_)
    ));
    assert_eq!(result.label, Some(0));
    assert_eq!(result.votes, 1);
}

#[test]
fn cyclic_model_terminates() {
    // Two splits pointing at each other; must not hang.
    let mut builder = TreeBuilder::new();
    builder.add_split(0, Operator::Le, 2.0, 1, 1);
    builder.add_split(0, Operator::Le, 2.0, 0, 0);

    let mut forest = Forest::new(2, 1);
    forest.push_tree(builder.build());
    forest.push_tree(leaf_tree(1));

    let model = RandomForestModel::from_forest(forest);
    let result = model.classify(&[1.0]);

    assert!(matches!(
        result.per_tree.outcomes()[0],
        TreeOutcome::Failed(_)
    ));
    assert_eq!(result.label, Some(1));
}

#[test]
fn roundtrip_yields_identical_forest() {
    let mut forest = Forest::new(4, 3);
    forest.push_tree(stump(0.25, 0, 3));
    forest.push_tree(half_pruned_tree());
    forest.push_tree(leaf_tree(2));

    let bytes = encode_forest(&forest).unwrap();
    let decoded = decode_forest(&bytes).unwrap();

    assert_eq!(decoded, forest);
    assert_eq!(decoded.num_classes(), 4);
    assert_eq!(decoded.num_features(), 3);
    assert_eq!(encode_forest(&decoded).unwrap(), bytes);
}

#[test]
fn truncated_model_fails_to_load() {
    let mut forest = Forest::new(2, 1);
    forest.push_tree(stump(2.0, 0, 1));

    let bytes = encode_forest(&forest).unwrap();
    for cut in [0, 3, 7, bytes.len() - 1] {
        assert!(
            matches!(
                RandomForestModel::from_bytes(&bytes[..cut]),
                Err(DecodeError::TruncatedInput { .. })
            ),
            "cut at {cut} bytes"
        );
    }
}

#[test]
fn model_shared_across_threads() {
    let mut forest = Forest::new(3, 1);
    forest.push_tree(stump(2.0, 0, 1));
    forest.push_tree(stump(4.0, 0, 2));
    let model = RandomForestModel::from_forest(forest);

    let expected = model.classify(&[1.0]);
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                assert_eq!(model.classify(&[1.0]), expected);
            });
        }
    });
}

#[test]
fn batch_classification_keeps_sample_order() {
    let mut forest = Forest::new(2, 1);
    forest.push_tree(stump(2.0, 0, 1));
    let model = RandomForestModel::from_forest(forest);

    let samples: Vec<Vec<f64>> = (0..64).map(|i| vec![f64::from(i) / 16.0]).collect();
    let refs: Vec<&[f64]> = samples.iter().map(Vec::as_slice).collect();

    let batch = model.classify_batch(&refs);
    for (sample, result) in refs.iter().zip(&batch) {
        assert_eq!(*result, model.classify(sample));
    }
}
