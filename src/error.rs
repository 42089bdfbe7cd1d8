//! Error types for dataset construction and evaluation.
//!
//! Only dataset-level conditions are reported as errors. Malformed individual
//! rows are dropped or defaulted by the explicit policies in the ingestion and
//! window-building stages and never escalate to callers.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors raised by the dataset pipeline.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Input text could not be interpreted at all (e.g. a header missing the
    /// required entity or date column).
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number of the offending input line.
        line: usize,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// No valid records survived ingestion.
    #[error("no valid records in input ({parsed} parsed, {dropped} dropped)")]
    EmptyDataset {
        /// Records that parsed successfully.
        parsed: usize,
        /// Lines dropped as malformed.
        dropped: usize,
    },

    /// Not enough time steps to form a single window.
    #[error(
        "insufficient data: {dates} dates available, need at least {required} \
         (sequence length + horizons + 1)"
    )]
    InsufficientData {
        /// Number of distinct dates in the aligned series.
        dates: usize,
        /// Minimum number of dates required for one window.
        required: usize,
    },

    /// A caller-supplied parameter is out of its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value is rejected.
        reason: String,
    },

    /// A prediction array disagrees in shape with the labels it is compared to.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// What was being compared.
        context: &'static str,
        /// Expected shape, formatted for display.
        expected: String,
        /// Actual shape, formatted for display.
        actual: String,
    },

    /// I/O failure while exporting (the core transforms perform no I/O).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatasetError {
    /// Shorthand for an invalid-parameter error.
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Shorthand for a shape-mismatch error.
    pub(crate) fn shape_mismatch(
        context: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            context,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_contains_context() {
        let err = DatasetError::InsufficientData {
            dates: 10,
            required: 16,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("16"));

        let err = DatasetError::shape_mismatch("predictions vs targets", "[4, 6]", "[4, 5]");
        let msg = err.to_string();
        assert!(msg.contains("[4, 6]"));
        assert!(msg.contains("[4, 5]"));
    }
}
