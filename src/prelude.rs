//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types and functions for ergonomic usage
//! of the dataset library.
//!
//! # Usage
//!
//! ```ignore
//! use windowed_dataset::prelude::*;
//!
//! let config = SeriesPipelineConfig::default();
//! let dataset = load_series_dataset(&text, &config)?;
//! let exporter = NumpyExporter::new("output");
//! ```

// ============================================================================
// Error Handling
// ============================================================================

pub use crate::error::{DatasetError, Result};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::{DigitPipelineConfig, SeriesPipelineConfig};

// ============================================================================
// Ingestion
// ============================================================================

pub use crate::ingest::{
    parse_digit_lines, parse_table, DigitFormat, DigitRecord, Record, RecordTable, TableFormat,
};

// ============================================================================
// Series Alignment & Normalization
// ============================================================================

pub use crate::series::{AlignedSeries, FieldStats, NormalizationScope, NormalizationStats};

// ============================================================================
// Windowing & Datasets
// ============================================================================

pub use crate::dataset::{Dataset, Sample, Target};
pub use crate::window::{WindowBuilder, WindowConfig};

// ============================================================================
// Metrics
// ============================================================================

pub use crate::metrics::{
    confusion_matrix, one_hot, overall_accuracy, per_class_accuracy, per_entity_accuracy,
};

// ============================================================================
// Export
// ============================================================================

pub use crate::export::{DatasetTensors, ExportMetadata, NumpyExporter};

// ============================================================================
// Pipelines
// ============================================================================

pub use crate::pipeline::{load_digit_dataset, load_series_dataset, DigitDataset, SeriesDataset};
