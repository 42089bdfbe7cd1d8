//! Windowed Dataset
//!
//! Dataset construction and evaluation metrics for sequence models.
//!
//! # Overview
//!
//! This library turns delimited text into ready-to-train tensors through a
//! pipeline of pure, composable stages:
//!
//! - **Tabular ingestion**: headerless labeled digit images and headered
//!   multi-entity time series
//! - **Series alignment**: one-pass pivot into (entity, date) keyed form with
//!   canonical orderings
//! - **Normalization**: per-entity min-max scaling with a divide-by-zero guard
//! - **Windowing**: fixed-length input windows with multi-horizon binary
//!   targets
//! - **Splitting**: contiguous, order-preserving train/test splits
//! - **Metrics**: accuracy, confusion matrices, per-class and per-entity
//!   multi-horizon accuracy
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Windowed Dataset                          │
//! ├────────────────────────────────────────────────────────────────┤
//! │  ingest/    - Digit and time-series text parsing               │
//! │  series/    - Pivot alignment and min-max normalization        │
//! │  window/    - Window and multi-horizon label construction      │
//! │  dataset    - Immutable datasets and contiguous splitting      │
//! │  metrics    - Accuracy, confusion matrix, per-entity accuracy  │
//! │  export     - NumPy export for Python/PyTorch                  │
//! │  pipeline   - End-to-end flows wiring the stages together      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use windowed_dataset::prelude::*;
//!
//! let config = SeriesPipelineConfig::default()
//!     .with_sequence_length(12)
//!     .with_horizons(3);
//! let dataset = load_series_dataset(&text, &config)?;
//!
//! println!("{} train / {} test windows", dataset.train.len(), dataset.test.len());
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod ingest;
pub mod metrics;
pub mod pipeline;
pub mod prelude;
pub mod series;
pub mod window;

// Re-exports - Errors
pub use error::{DatasetError, Result};

// Re-exports - Config
pub use config::{DigitPipelineConfig, SeriesPipelineConfig};

// Re-exports - Ingestion
pub use ingest::{
    parse_digit_lines, parse_table, DigitFormat, DigitRecord, Record, RecordTable, TableFormat,
};

// Re-exports - Series
pub use series::{AlignedSeries, FieldStats, NormalizationScope, NormalizationStats};

// Re-exports - Windowing
pub use window::{WindowBuilder, WindowConfig};

// Re-exports - Datasets
pub use dataset::{Dataset, Sample, Target};

// Re-exports - Metrics
pub use metrics::{
    confusion_matrix, one_hot, overall_accuracy, per_class_accuracy, per_entity_accuracy,
};

// Re-exports - Export
pub use export::{DatasetTensors, ExportMetadata, NumpyExporter};

// Re-exports - Pipeline
pub use pipeline::{load_digit_dataset, load_series_dataset, DigitDataset, SeriesDataset};
