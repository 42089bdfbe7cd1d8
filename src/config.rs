//! Pipeline configuration management.
//!
//! Unified configuration for the two dataset pipelines, with JSON
//! serialization for experiment reproducibility.
//!
//! # Example
//!
//! ```ignore
//! use windowed_dataset::config::SeriesPipelineConfig;
//!
//! let config = SeriesPipelineConfig::default()
//!     .with_sequence_length(12)
//!     .with_horizons(3);
//! config.save_json("experiment.json")?;
//!
//! let loaded = SeriesPipelineConfig::load_json("experiment.json")?;
//! ```

use crate::error::{DatasetError, Result};
use crate::ingest::{DigitFormat, TableFormat};
use crate::series::NormalizationScope;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for the tabular series pipeline: ingestion, alignment,
/// normalization, windowing, and the train/test split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPipelineConfig {
    /// Delimited-table parsing parameters.
    pub table: TableFormat,

    /// Time steps per input window (T).
    pub sequence_length: usize,

    /// Number of prediction horizons (H).
    pub horizons: usize,

    /// Fraction of windows assigned to the train split, in (0, 1).
    pub train_fraction: f64,

    /// Which date range normalization statistics are fitted on.
    #[serde(default)]
    pub normalization: NormalizationScope,

    /// Value fields used as window features. Empty means all fields.
    #[serde(default)]
    pub feature_fields: Vec<String>,

    /// Field compared across dates to derive binary targets.
    pub comparison_field: String,
}

impl Default for SeriesPipelineConfig {
    fn default() -> Self {
        Self {
            table: TableFormat::default(),
            sequence_length: 12,
            horizons: 3,
            train_fraction: 0.7,
            normalization: NormalizationScope::default(),
            feature_fields: Vec::new(),
            comparison_field: "Close".to_string(),
        }
    }
}

impl SeriesPipelineConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window length (T).
    pub fn with_sequence_length(mut self, sequence_length: usize) -> Self {
        self.sequence_length = sequence_length;
        self
    }

    /// Set the number of prediction horizons (H).
    pub fn with_horizons(mut self, horizons: usize) -> Self {
        self.horizons = horizons;
        self
    }

    /// Set the train split fraction.
    pub fn with_train_fraction(mut self, train_fraction: f64) -> Self {
        self.train_fraction = train_fraction;
        self
    }

    /// Set the normalization scope.
    pub fn with_normalization(mut self, normalization: NormalizationScope) -> Self {
        self.normalization = normalization;
        self
    }

    /// Restrict window features to the named fields.
    pub fn with_feature_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the field compared to derive targets.
    pub fn with_comparison_field(mut self, field: impl Into<String>) -> Self {
        self.comparison_field = field.into();
        self
    }

    /// Check the configuration before use.
    ///
    /// # Errors
    ///
    /// [`DatasetError::InvalidParameter`] for a zero window length or horizon
    /// count, a train fraction outside (0, 1), or an empty comparison field.
    pub fn validate(&self) -> Result<()> {
        self.table.validate()?;
        if self.sequence_length == 0 {
            return Err(DatasetError::invalid_parameter(
                "sequence_length",
                "must be at least 1",
            ));
        }
        if self.horizons == 0 {
            return Err(DatasetError::invalid_parameter(
                "horizons",
                "must be at least 1",
            ));
        }
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(DatasetError::invalid_parameter(
                "train_fraction",
                format!("must be in (0, 1), got {}", self.train_fraction),
            ));
        }
        if self.comparison_field.is_empty() {
            return Err(DatasetError::invalid_parameter(
                "comparison_field",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Save to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file and validate.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: SeriesPipelineConfig = serde_json::from_str(&contents).map_err(|e| {
            DatasetError::Parse {
                line: e.line(),
                reason: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration for the labeled digit pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitPipelineConfig {
    /// Digit line format: pixel count, class count, delimiter.
    pub format: DigitFormat,

    /// Fraction of records assigned to the train split, in (0, 1).
    pub train_fraction: f64,
}

impl Default for DigitPipelineConfig {
    fn default() -> Self {
        Self {
            format: DigitFormat::default(),
            train_fraction: 0.8,
        }
    }
}

impl DigitPipelineConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the train split fraction.
    pub fn with_train_fraction(mut self, train_fraction: f64) -> Self {
        self.train_fraction = train_fraction;
        self
    }

    /// Check the configuration before use.
    pub fn validate(&self) -> Result<()> {
        self.format.validate()?;
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(DatasetError::invalid_parameter(
                "train_fraction",
                format!("must be in (0, 1), got {}", self.train_fraction),
            ));
        }
        Ok(())
    }
}
