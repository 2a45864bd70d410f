//! Integration tests for TabularData construction and train_test_split.

use std::collections::HashSet;

use covertype_classifiers::data_handling::{train_test_split, TabularData};
use ndarray::{Array1, Array2};

fn make_table(n: usize) -> TabularData {
    let x = Array2::from_shape_fn((n, 3), |(r, c)| (r * 3 + c) as f64);
    let y = Array1::from_iter((0..n).map(|i| i % 7 + 1));
    TabularData::new(
        x,
        y,
        vec!["Elevation".into(), "Aspect".into(), "Slope".into()],
        "Cover_Type",
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// TabularData construction
// ---------------------------------------------------------------------------

#[test]
fn tabular_data_new_valid() {
    let data = make_table(10);
    assert_eq!(data.nsamples(), 10);
    assert_eq!(data.nfeatures(), 3);
    assert_eq!(data.classes(), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(data.class_counts()[&1], 2);
    assert_eq!(data.class_counts()[&7], 1);
}

#[test]
fn tabular_data_label_length_mismatch() {
    let x = Array2::<f64>::zeros((4, 2));
    let y = Array1::from_vec(vec![1usize, 2]);
    let data = TabularData::new(x, y, vec!["a".into(), "b".into()], "label");
    assert!(data.is_err(), "should error on row/label mismatch");
}

#[test]
fn tabular_data_feature_name_mismatch() {
    let x = Array2::<f64>::zeros((2, 2));
    let y = Array1::from_vec(vec![1usize, 2]);
    let data = TabularData::new(x, y, vec!["a".into()], "label");
    assert!(data.is_err(), "should error on column/name mismatch");
}

#[test]
fn select_rows_keeps_row_contents() {
    let data = make_table(6);
    let subset = data.select_rows(&[4, 1]);
    assert_eq!(subset.nsamples(), 2);
    assert_eq!(subset.x.row(0), data.x.row(4));
    assert_eq!(subset.x.row(1), data.x.row(1));
    assert_eq!(subset.y[0], data.y[4]);
    assert_eq!(subset.feature_names, data.feature_names);
}

// ---------------------------------------------------------------------------
// train_test_split
// ---------------------------------------------------------------------------

#[test]
fn split_partitions_are_disjoint_and_cover_all_rows() {
    let data = make_table(101);
    let split = train_test_split(&data, 0.2, 42).unwrap();

    let train: HashSet<usize> = split.train_indices.iter().copied().collect();
    let test: HashSet<usize> = split.test_indices.iter().copied().collect();

    assert!(train.is_disjoint(&test));
    let union: HashSet<usize> = train.union(&test).copied().collect();
    assert_eq!(union, (0..101).collect::<HashSet<usize>>());
    assert_eq!(train.len() + test.len(), 101);
}

#[test]
fn split_sizes_round_test_side_up() {
    let data = make_table(101);
    let split = train_test_split(&data, 0.2, 42).unwrap();
    assert_eq!(split.test.nsamples(), 21);
    assert_eq!(split.train.nsamples(), 80);
}

#[test]
fn split_rows_match_their_indices() {
    let data = make_table(30);
    let split = train_test_split(&data, 0.3, 3).unwrap();
    for (pos, &row) in split.test_indices.iter().enumerate() {
        assert_eq!(split.test.x.row(pos), data.x.row(row));
        assert_eq!(split.test.y[pos], data.y[row]);
    }
    for (pos, &row) in split.train_indices.iter().enumerate() {
        assert_eq!(split.train.x.row(pos), data.x.row(row));
    }
}

#[test]
fn split_is_deterministic_for_a_seed() {
    let data = make_table(200);
    let a = train_test_split(&data, 0.2, 42).unwrap();
    let b = train_test_split(&data, 0.2, 42).unwrap();
    assert_eq!(a.train_indices, b.train_indices);
    assert_eq!(a.test_indices, b.test_indices);
    assert_eq!(a.test.x, b.test.x);
}

#[test]
fn split_differs_across_seeds() {
    let data = make_table(200);
    let a = train_test_split(&data, 0.2, 1).unwrap();
    let b = train_test_split(&data, 0.2, 2).unwrap();
    assert_ne!(a.test_indices, b.test_indices);
}

#[test]
fn split_rejects_bad_ratio() {
    let data = make_table(10);
    assert!(train_test_split(&data, 0.0, 42).is_err());
    assert!(train_test_split(&data, 1.0, 42).is_err());
    assert!(train_test_split(&data, -0.5, 42).is_err());
    assert!(train_test_split(&data, f64::NAN, 42).is_err());
}

#[test]
fn split_rejects_empty_partition() {
    let data = make_table(1);
    assert!(train_test_split(&data, 0.2, 42).is_err());
}
