//! Headerless digit-image CSV ingestion.
//!
//! Each line holds one labeled image: an integer class label followed by a
//! fixed number of pixel intensities. Lines with the wrong field count, an
//! unparseable field, or an out-of-range label are dropped (policy, not an
//! error); ingestion only fails when nothing valid remains.

use crate::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};

/// Shape of the digit-image format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitFormat {
    /// Pixels per image (P). Each line must contain exactly `1 + P` fields.
    pub pixel_count: usize,

    /// Number of classes (C). Labels must lie in `[0, C)`.
    pub class_count: usize,

    /// Field delimiter.
    pub delimiter: char,
}

impl DigitFormat {
    /// MNIST-style format: 28×28 grayscale, 10 classes, comma-delimited.
    pub fn mnist() -> Self {
        Self {
            pixel_count: 784,
            class_count: 10,
            delimiter: ',',
        }
    }

    /// Validate the format parameters.
    pub fn validate(&self) -> Result<()> {
        if self.pixel_count == 0 {
            return Err(DatasetError::invalid_parameter(
                "pixel_count",
                "must be at least 1",
            ));
        }
        if self.class_count == 0 {
            return Err(DatasetError::invalid_parameter(
                "class_count",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for DigitFormat {
    fn default() -> Self {
        Self::mnist()
    }
}

/// One labeled image, immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitRecord {
    /// Class label in `[0, class_count)`.
    pub label: usize,

    /// Raw pixel intensities, `pixel_count` values.
    pub pixels: Vec<f64>,
}

/// Parse digit-image lines into records, preserving input order.
///
/// Malformed lines are dropped silently (a debug log records the count).
/// A line is well-formed when it has exactly `1 + pixel_count` fields, the
/// first parses as an integer in `[0, class_count)`, and every remaining
/// field parses as a number.
///
/// # Errors
///
/// - [`DatasetError::InvalidParameter`] if the format itself is invalid.
/// - [`DatasetError::EmptyDataset`] if no valid lines remain.
pub fn parse_digit_lines(text: &str, format: &DigitFormat) -> Result<Vec<DigitRecord>> {
    format.validate()?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line, format) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!(
            "digit ingestion dropped {} malformed line(s), kept {}",
            dropped,
            records.len()
        );
    }

    if records.is_empty() {
        return Err(DatasetError::EmptyDataset { parsed: 0, dropped });
    }

    Ok(records)
}

fn parse_line(line: &str, format: &DigitFormat) -> Option<DigitRecord> {
    let fields: Vec<&str> = line.split(format.delimiter).collect();
    if fields.len() != 1 + format.pixel_count {
        return None;
    }

    let label: usize = fields[0].trim().parse().ok()?;
    if label >= format.class_count {
        return None;
    }

    let mut pixels = Vec::with_capacity(format.pixel_count);
    for field in &fields[1..] {
        let value: f64 = field.trim().parse().ok()?;
        pixels.push(value);
    }

    Some(DigitRecord { label, pixels })
}
