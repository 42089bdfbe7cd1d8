//! Metrics Integration Tests
//!
//! Validates the evaluation metrics against hand-computed expectations and
//! the documented degenerate-input policies.

use ndarray::{array, Array2};
use windowed_dataset::{
    confusion_matrix, one_hot, overall_accuracy, per_class_accuracy, per_entity_accuracy,
    DatasetError,
};

// ============================================================================
// Overall Accuracy
// ============================================================================

#[test]
fn test_overall_accuracy_hand_computed() {
    let predicted = [0, 1, 2, 2, 1, 0, 1, 2];
    let actual = [0, 1, 2, 1, 1, 1, 1, 0];
    // 5 of 8 match.
    let acc = overall_accuracy(&predicted, &actual).unwrap();
    assert!((acc - 0.625).abs() < 1e-12);
}

#[test]
fn test_overall_accuracy_empty_is_zero_not_nan() {
    let acc = overall_accuracy(&[], &[]).unwrap();
    assert_eq!(acc, 0.0);
    assert!(!acc.is_nan());
}

#[test]
fn test_overall_accuracy_rejects_length_mismatch() {
    assert!(matches!(
        overall_accuracy(&[0, 1, 2], &[0, 1]),
        Err(DatasetError::ShapeMismatch { .. })
    ));
}

// ============================================================================
// Confusion Matrix
// ============================================================================

#[test]
fn test_confusion_matrix_row_sums_equal_class_counts() {
    let actual = [0, 0, 0, 1, 1, 2, 2, 2, 2];
    let predicted = [0, 1, 0, 1, 2, 2, 2, 0, 2];
    let matrix = confusion_matrix(&predicted, &actual, 3).unwrap();

    assert_eq!(matrix.sum(), actual.len() as u64);
    for c in 0..3 {
        let row_sum: u64 = matrix.row(c).sum();
        let count = actual.iter().filter(|&&a| a == c).count() as u64;
        assert_eq!(row_sum, count, "class {c}");
    }
}

#[test]
fn test_confusion_matrix_diagonal_is_correct_predictions() {
    let actual = [0, 1, 2, 0, 1, 2];
    let predicted = [0, 1, 2, 1, 1, 0];
    let matrix = confusion_matrix(&predicted, &actual, 3).unwrap();

    let diagonal: u64 = (0..3).map(|c| matrix[[c, c]]).sum();
    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count() as u64;
    assert_eq!(diagonal, correct);
}

#[test]
fn test_confusion_matrix_rejects_bad_classes() {
    assert!(matches!(
        confusion_matrix(&[0], &[0], 0),
        Err(DatasetError::InvalidParameter { .. })
    ));
    assert!(matches!(
        confusion_matrix(&[5], &[0], 3),
        Err(DatasetError::InvalidParameter { .. })
    ));
    assert!(matches!(
        confusion_matrix(&[0], &[5], 3),
        Err(DatasetError::InvalidParameter { .. })
    ));
}

// ============================================================================
// Per-Class Accuracy
// ============================================================================

#[test]
fn test_per_class_accuracy_bounds_and_empty_rows() {
    let matrix = array![[9u64, 1, 0], [0, 0, 0], [2, 2, 6]];
    let acc = per_class_accuracy(&matrix);

    assert_eq!(acc.len(), 3);
    assert!(acc.iter().all(|a| (0.0..=1.0).contains(a)));
    assert!((acc[0] - 0.9).abs() < 1e-12);
    // No true examples of class 1: reported as 0.0, never NaN.
    assert_eq!(acc[1], 0.0);
    assert!((acc[2] - 0.6).abs() < 1e-12);
}

// ============================================================================
// Per-Entity Accuracy
// ============================================================================

#[test]
fn test_per_entity_accuracy_hand_computed() {
    let entities = vec!["AAPL".to_string(), "MSFT".to_string()];
    // 2 samples, 1 horizon, 2 entities.
    let targets = array![[1.0, 0.0], [1.0, 1.0]];
    let predictions = array![[0.9, 0.4], [0.3, 0.8]];

    let acc = per_entity_accuracy(&predictions, &targets, &entities, 1).unwrap();

    // AAPL: 0.9 -> 1 == 1, 0.3 -> 0 != 1 -> 1/2.
    assert_eq!(acc[0].0, "AAPL");
    assert!((acc[0].1 - 0.5).abs() < 1e-12);
    // MSFT: 0.4 -> 0 == 0, 0.8 -> 1 == 1 -> 2/2.
    assert_eq!(acc[1].0, "MSFT");
    assert!((acc[1].1 - 1.0).abs() < 1e-12);
}

#[test]
fn test_per_entity_accuracy_threshold_is_strict() {
    let entities = vec!["A".to_string()];
    // Exactly 0.5 counts as the "not increased" class on both sides.
    let predictions = array![[0.5], [0.5]];
    let targets = array![[1.0], [0.0]];

    let acc = per_entity_accuracy(&predictions, &targets, &entities, 1).unwrap();
    assert!((acc[0].1 - 0.5).abs() < 1e-12);
}

#[test]
fn test_per_entity_accuracy_multi_horizon_layout() {
    let entities = vec!["A".to_string(), "B".to_string()];
    // Horizon-major columns: [h1 A, h1 B, h2 A, h2 B]. A is always predicted
    // and labeled 1, B predicted 1 but labeled 0.
    let predictions = array![[0.9, 0.9, 0.9, 0.9]];
    let targets = array![[1.0, 0.0, 1.0, 0.0]];

    let acc = per_entity_accuracy(&predictions, &targets, &entities, 2).unwrap();
    assert_eq!(acc[0], ("A".to_string(), 1.0));
    assert_eq!(acc[1], ("B".to_string(), 0.0));
}

#[test]
fn test_per_entity_accuracy_shape_errors() {
    let entities = vec!["A".to_string()];
    let predictions = array![[0.9, 0.1]];
    let targets = array![[1.0]];

    assert!(matches!(
        per_entity_accuracy(&predictions, &targets, &entities, 1),
        Err(DatasetError::ShapeMismatch { .. })
    ));

    // Matching arrays but a width that disagrees with horizons x entities.
    let targets = array![[1.0, 0.0]];
    assert!(matches!(
        per_entity_accuracy(&predictions, &targets, &entities, 3),
        Err(DatasetError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_per_entity_accuracy_no_samples_reports_zero() {
    let entities = vec!["A".to_string(), "B".to_string()];
    let predictions = Array2::<f64>::zeros((0, 2));
    let targets = Array2::<f64>::zeros((0, 2));

    let acc = per_entity_accuracy(&predictions, &targets, &entities, 1).unwrap();
    assert_eq!(acc.len(), 2);
    assert!(acc.iter().all(|(_, a)| *a == 0.0));
}

// ============================================================================
// One-Hot Encoding
// ============================================================================

#[test]
fn test_one_hot_each_row_sums_to_one() {
    let labels = [0, 4, 9, 2, 2];
    let encoded = one_hot(&labels, 10).unwrap();

    assert_eq!(encoded.dim(), (5, 10));
    for (i, &label) in labels.iter().enumerate() {
        assert_eq!(encoded.row(i).sum(), 1.0);
        assert_eq!(encoded[[i, label]], 1.0);
    }
}

#[test]
fn test_one_hot_rejects_out_of_range_label() {
    assert!(matches!(
        one_hot(&[0, 10], 10),
        Err(DatasetError::InvalidParameter { .. })
    ));
}
