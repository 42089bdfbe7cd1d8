//! Evaluation metrics: accuracy, confusion matrices, per-class and
//! per-entity multi-horizon accuracy.
//!
//! Every function here is stateless and pure: it consumes fully materialized
//! arrays and returns a fresh value. Results are never merged across calls.
//!
//! Shape disagreements between predictions and labels are reported as
//! [`DatasetError::ShapeMismatch`] with expected vs. actual dimensions;
//! degenerate denominators (no examples of a class, no samples for an
//! entity) yield 0.0 rather than NaN.

use crate::error::{DatasetError, Result};
use ndarray::Array2;

/// Fraction of examples where the predicted class equals the true class.
///
/// Empty input yields 0.0.
///
/// # Errors
///
/// [`DatasetError::ShapeMismatch`] if the slices differ in length.
pub fn overall_accuracy(predicted: &[usize], actual: &[usize]) -> Result<f64> {
    if predicted.len() != actual.len() {
        return Err(DatasetError::shape_mismatch(
            "predictions vs labels",
            format!("[{}]", actual.len()),
            format!("[{}]", predicted.len()),
        ));
    }
    if predicted.is_empty() {
        return Ok(0.0);
    }

    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();
    Ok(correct as f64 / predicted.len() as f64)
}

/// `num_classes × num_classes` confusion matrix: rows are true classes,
/// columns predicted classes, `matrix[true][pred]` counts examples.
///
/// # Errors
///
/// - [`DatasetError::ShapeMismatch`] if the slices differ in length.
/// - [`DatasetError::InvalidParameter`] if `num_classes` is 0 or any class
///   index is out of `[0, num_classes)`.
pub fn confusion_matrix(
    predicted: &[usize],
    actual: &[usize],
    num_classes: usize,
) -> Result<Array2<u64>> {
    if predicted.len() != actual.len() {
        return Err(DatasetError::shape_mismatch(
            "predictions vs labels",
            format!("[{}]", actual.len()),
            format!("[{}]", predicted.len()),
        ));
    }
    if num_classes == 0 {
        return Err(DatasetError::invalid_parameter(
            "num_classes",
            "must be at least 1",
        ));
    }

    let mut matrix = Array2::<u64>::zeros((num_classes, num_classes));
    for (&pred, &truth) in predicted.iter().zip(actual.iter()) {
        if pred >= num_classes || truth >= num_classes {
            return Err(DatasetError::invalid_parameter(
                "num_classes",
                format!(
                    "class index out of range: pred={pred}, true={truth}, num_classes={num_classes}"
                ),
            ));
        }
        matrix[[truth, pred]] += 1;
    }
    Ok(matrix)
}

/// Per-class accuracy: `matrix[c][c] / rowsum(c)` for each class, in class
/// order. A class with no true examples scores 0.0 rather than NaN.
pub fn per_class_accuracy(matrix: &Array2<u64>) -> Vec<f64> {
    matrix
        .rows()
        .into_iter()
        .enumerate()
        .map(|(c, row)| {
            let total: u64 = row.sum();
            if total == 0 {
                0.0
            } else {
                row[c] as f64 / total as f64
            }
        })
        .collect()
}

/// Per-entity accuracy over all samples and horizons for the multi-label
/// case.
///
/// `predictions` and `targets` are `[N, horizons × entities]`, laid out
/// horizon-major (matching the window builder's targets). Probabilities are
/// thresholded strictly at `> 0.5` — a prediction of exactly 0.5 counts as
/// the "not increased" class. Returns one `(entity, accuracy)` pair per
/// entity in canonical order; an empty prediction set reports 0.0 for every
/// entity.
///
/// # Errors
///
/// [`DatasetError::ShapeMismatch`] if the two arrays disagree, or if their
/// width is not `horizons × entities.len()`.
pub fn per_entity_accuracy(
    predictions: &Array2<f64>,
    targets: &Array2<f64>,
    entities: &[String],
    horizons: usize,
) -> Result<Vec<(String, f64)>> {
    if predictions.dim() != targets.dim() {
        return Err(DatasetError::shape_mismatch(
            "predictions vs targets",
            format!("{:?}", targets.dim()),
            format!("{:?}", predictions.dim()),
        ));
    }
    let expected_width = horizons * entities.len();
    if predictions.ncols() != expected_width {
        return Err(DatasetError::shape_mismatch(
            "prediction width vs horizons × entities",
            format!("[_, {expected_width}]"),
            format!("[_, {}]", predictions.ncols()),
        ));
    }

    let num_entities = entities.len();
    let mut correct = vec![0usize; num_entities];
    let mut total = vec![0usize; num_entities];

    for (pred_row, target_row) in predictions.rows().into_iter().zip(targets.rows()) {
        for h in 0..horizons {
            for e in 0..num_entities {
                let idx = h * num_entities + e;
                let predicted_bit = pred_row[idx] > 0.5;
                let actual_bit = target_row[idx] > 0.5;
                if predicted_bit == actual_bit {
                    correct[e] += 1;
                }
                total[e] += 1;
            }
        }
    }

    Ok(entities
        .iter()
        .enumerate()
        .map(|(e, name)| {
            let accuracy = if total[e] == 0 {
                0.0
            } else {
                correct[e] as f64 / total[e] as f64
            };
            (name.clone(), accuracy)
        })
        .collect())
}

/// One-hot encode single-label classes into an `[N, num_classes]` matrix.
///
/// # Errors
///
/// [`DatasetError::InvalidParameter`] if `num_classes` is 0 or any label is
/// out of range.
pub fn one_hot(labels: &[usize], num_classes: usize) -> Result<Array2<f64>> {
    if num_classes == 0 {
        return Err(DatasetError::invalid_parameter(
            "num_classes",
            "must be at least 1",
        ));
    }

    let mut encoded = Array2::<f64>::zeros((labels.len(), num_classes));
    for (i, &label) in labels.iter().enumerate() {
        if label >= num_classes {
            return Err(DatasetError::invalid_parameter(
                "num_classes",
                format!("label {label} out of range for {num_classes} classes"),
            ));
        }
        encoded[[i, label]] = 1.0;
    }
    Ok(encoded)
}
