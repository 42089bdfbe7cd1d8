//! Window & label builder.
//!
//! For a series with `D` canonical dates, sequence length `T` and `H`
//! horizons, anchors range over `i ∈ [T, D - H)` and yield exactly
//! `D - T - H` (sample, target) pairs:
//!
//! - **Sample**: the feature vectors at `dates[i-T..i]`, each the
//!   concatenation over canonical entities of their feature-field values at
//!   that date. An entity with no usable value contributes zeros (the
//!   explicit missing-data default — applied here and nowhere earlier).
//! - **Target**: for each horizon `h ∈ [1, H]` and entity, 1 if the
//!   comparison field at `dates[i+h]` is strictly greater than at the anchor
//!   `dates[i]`, else 0; a missing value on either side yields 0.
//!
//! Anchors are independent, so sample construction is parallelized with
//! rayon; the output order is the anchor order regardless of thread count.

use crate::dataset::{Dataset, Sample, Target};
use crate::error::{DatasetError, Result};
use crate::series::align::AlignedSeries;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Parameters for window and label construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Time steps per input window (T).
    pub sequence_length: usize,

    /// Number of future horizons to label (H): horizons `1..=H`.
    pub horizons: usize,

    /// Fields used as features, in order. Empty means "all series fields".
    #[serde(default)]
    pub feature_fields: Vec<String>,

    /// Field compared against the anchor to produce binary labels.
    pub comparison_field: String,
}

impl WindowConfig {
    /// Create a config with the given window shape, all fields as features,
    /// and `Close` as the comparison field.
    pub fn new(sequence_length: usize, horizons: usize) -> Self {
        Self {
            sequence_length,
            horizons,
            feature_fields: Vec::new(),
            comparison_field: "Close".to_string(),
        }
    }

    /// Restrict features to the named fields.
    pub fn with_feature_fields(mut self, fields: Vec<String>) -> Self {
        self.feature_fields = fields;
        self
    }

    /// Use a different comparison field for labels.
    pub fn with_comparison_field(mut self, field: impl Into<String>) -> Self {
        self.comparison_field = field.into();
        self
    }

    /// Validate the shape parameters.
    pub fn validate(&self) -> Result<()> {
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
        if self.comparison_field.is_empty() {
            return Err(DatasetError::invalid_parameter(
                "comparison_field",
                "must name a series field",
            ));
        }
        Ok(())
    }

    /// Minimum number of dates needed to produce one window.
    pub fn min_dates_required(&self) -> usize {
        self.sequence_length + self.horizons + 1
    }
}

/// Builds (sample, target) pairs from a normalized aligned series.
pub struct WindowBuilder {
    config: WindowConfig,
}

impl WindowBuilder {
    /// Create a builder, validating the configuration up front.
    pub fn new(config: WindowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Build the ordered dataset of (sample, target) pairs.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::InvalidParameter`] if a configured field name does
    ///   not exist in the series.
    /// - [`DatasetError::InsufficientData`] if fewer than
    ///   `sequence_length + horizons + 1` dates are available.
    pub fn build(&self, series: &AlignedSeries) -> Result<Dataset> {
        let t = self.config.sequence_length;
        let h = self.config.horizons;

        let feature_indices = self.resolve_feature_indices(series)?;
        let comparison_idx = series
            .field_index(&self.config.comparison_field)
            .ok_or_else(|| {
                DatasetError::invalid_parameter(
                    "comparison_field",
                    format!("field `{}` not found in series", self.config.comparison_field),
                )
            })?;

        let dates = series.dates();
        let num_dates = dates.len();
        if num_dates < self.config.min_dates_required() {
            return Err(DatasetError::InsufficientData {
                dates: num_dates,
                required: self.config.min_dates_required(),
            });
        }

        let entities = series.entities();
        let step_width = entities.len() * feature_indices.len();
        let target_width = h * entities.len();

        // Anchors are independent; collect preserves anchor order.
        let pairs: Vec<(Sample, Target)> = (t..num_dates - h)
            .into_par_iter()
            .map(|anchor| {
                let sample = self.build_sample(series, &feature_indices, anchor);
                let target = self.build_target(series, comparison_idx, anchor);
                (sample, target)
            })
            .collect();

        let (samples, targets): (Vec<Sample>, Vec<Target>) = pairs.into_iter().unzip();

        log::debug!(
            "built {} windows (T={}, H={}, {} entities, {} features/step)",
            samples.len(),
            t,
            h,
            entities.len(),
            step_width
        );

        Ok(Dataset::new(samples, targets, t, step_width, target_width))
    }

    fn resolve_feature_indices(&self, series: &AlignedSeries) -> Result<Vec<usize>> {
        if self.config.feature_fields.is_empty() {
            return Ok((0..series.fields().len()).collect());
        }
        self.config
            .feature_fields
            .iter()
            .map(|name| {
                series.field_index(name).ok_or_else(|| {
                    DatasetError::invalid_parameter(
                        "feature_fields",
                        format!("field `{name}` not found in series"),
                    )
                })
            })
            .collect()
    }

    fn build_sample(
        &self,
        series: &AlignedSeries,
        feature_indices: &[usize],
        anchor: usize,
    ) -> Sample {
        let t = self.config.sequence_length;
        let dates = series.dates();
        let entities = series.entities();

        let steps: Vec<Vec<f64>> = (anchor - t..anchor)
            .map(|j| {
                let date = &dates[j];
                let mut step = Vec::with_capacity(entities.len() * feature_indices.len());
                for entity in entities {
                    for &field_idx in feature_indices {
                        // Missing-data default: absent pair or NaN cell -> 0.
                        step.push(series.value(entity, date, field_idx).unwrap_or(0.0));
                    }
                }
                step
            })
            .collect();

        Sample { steps }
    }

    fn build_target(
        &self,
        series: &AlignedSeries,
        comparison_idx: usize,
        anchor: usize,
    ) -> Target {
        let dates = series.dates();
        let entities = series.entities();
        let anchor_date = &dates[anchor];

        let mut target = Vec::with_capacity(self.config.horizons * entities.len());
        for h in 1..=self.config.horizons {
            let future_date = &dates[anchor + h];
            for entity in entities {
                let anchor_value = series.value(entity, anchor_date, comparison_idx);
                let future_value = series.value(entity, future_date, comparison_idx);
                // Strict increase; missing on either side labels 0.
                let bit = match (anchor_value, future_value) {
                    (Some(a), Some(f)) if f > a => 1.0,
                    _ => 0.0,
                };
                target.push(bit);
            }
        }
        target
    }
}
