//! End-to-end dataset pipelines.
//!
//! Connects the individual stages into two ready-to-train flows:
//!
//! ```text
//! series text → parse_table → AlignedSeries → NormalizationStats.apply
//!                  → WindowBuilder.build → Dataset.split → SeriesDataset
//!
//! digit text  → parse_digit_lines → scale 1/255 → one-hot
//!                  → contiguous split → DigitDataset
//! ```
//!
//! Each load function is a pure transformation of its input text: it returns
//! an owned value and keeps no state between calls. Intermediate stages stay
//! public, so callers needing custom behavior can compose them directly.

use crate::config::{DigitPipelineConfig, SeriesPipelineConfig};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::ingest::{parse_digit_lines, parse_table};
use crate::metrics::one_hot;
use crate::series::{AlignedSeries, NormalizationScope, NormalizationStats};
use crate::window::{WindowBuilder, WindowConfig};
use ndarray::Array2;

/// A fully constructed time-series dataset plus the context needed to
/// interpret and invert it.
#[derive(Debug, Clone)]
pub struct SeriesDataset {
    /// Train split, first `floor(N · train_fraction)` windows.
    pub train: Dataset,

    /// Test split, the remaining windows in order.
    pub test: Dataset,

    /// Entity names in canonical (first-seen) order.
    pub entities: Vec<String>,

    /// Distinct dates in ascending order.
    pub dates: Vec<String>,

    /// Value field names in header order.
    pub fields: Vec<String>,

    /// Fitted normalization statistics, for denormalizing predictions.
    pub stats: NormalizationStats,
}

/// Run the full series pipeline over delimited text.
///
/// Stages: parse, pivot into an aligned series, fit and apply per-entity
/// min-max normalization, build windows and multi-horizon targets, then
/// split contiguously into train and test.
///
/// With [`NormalizationScope::TrainOnly`], statistics are fitted on the
/// leading `floor(dates · train_fraction)` dates only and applied everywhere.
///
/// # Errors
///
/// Any stage error propagates: invalid configuration, an unusable header, an
/// empty dataset, or too few dates for a single window.
pub fn load_series_dataset(text: &str, config: &SeriesPipelineConfig) -> Result<SeriesDataset> {
    config.validate()?;

    let table = parse_table(text, &config.table)?;
    let series = AlignedSeries::from_records(&table);

    let stats = match config.normalization {
        NormalizationScope::FullSeries => NormalizationStats::fit(&series),
        NormalizationScope::TrainOnly => {
            let train_dates = (series.num_dates() as f64 * config.train_fraction).floor() as usize;
            NormalizationStats::fit_range(&series, 0..train_dates)
        }
    };
    let normalized = stats.apply(&series);

    let mut window_config = WindowConfig::new(config.sequence_length, config.horizons)
        .with_comparison_field(config.comparison_field.clone());
    if !config.feature_fields.is_empty() {
        window_config = window_config.with_feature_fields(config.feature_fields.clone());
    }
    let dataset = WindowBuilder::new(window_config)?.build(&normalized)?;

    let total = dataset.len();
    let (train, test) = dataset.split(config.train_fraction)?;

    log::info!(
        "series pipeline: {} entities, {} dates, {} fields -> {} windows ({} train, {} test)",
        series.num_entities(),
        series.num_dates(),
        series.fields().len(),
        total,
        train.len(),
        test.len()
    );

    Ok(SeriesDataset {
        train,
        test,
        entities: series.entities().to_vec(),
        dates: series.dates().to_vec(),
        fields: series.fields().to_vec(),
        stats,
    })
}

/// A labeled digit dataset in dense tensor form.
#[derive(Debug, Clone)]
pub struct DigitDataset {
    /// Train inputs, `[n_train, pixel_count]`, intensities scaled to `[0, 1]`.
    pub train_x: Array2<f64>,

    /// Train targets, one-hot `[n_train, class_count]`.
    pub train_y: Array2<f64>,

    /// Train class labels in record order.
    pub train_labels: Vec<usize>,

    /// Test inputs, `[n_test, pixel_count]`.
    pub test_x: Array2<f64>,

    /// Test targets, one-hot `[n_test, class_count]`.
    pub test_y: Array2<f64>,

    /// Test class labels in record order.
    pub test_labels: Vec<usize>,
}

impl DigitDataset {
    /// Train sample count.
    pub fn n_train(&self) -> usize {
        self.train_labels.len()
    }

    /// Test sample count.
    pub fn n_test(&self) -> usize {
        self.test_labels.len()
    }
}

/// Run the digit pipeline over headerless labeled-image text.
///
/// Pixel intensities are scaled by a fixed 1/255 (not fitted min-max, so a
/// constant-intensity image keeps its level), labels are one-hot encoded, and
/// the record order is preserved through a contiguous
/// `floor(N · train_fraction)` split.
///
/// # Errors
///
/// Invalid configuration, or [`crate::DatasetError::EmptyDataset`] when no
/// line parses.
pub fn load_digit_dataset(text: &str, config: &DigitPipelineConfig) -> Result<DigitDataset> {
    config.validate()?;

    let records = parse_digit_lines(text, &config.format)?;
    let n = records.len();
    let train_len = (n as f64 * config.train_fraction).floor() as usize;

    let labels: Vec<usize> = records.iter().map(|r| r.label).collect();
    let mut pixels = Vec::with_capacity(n * config.format.pixel_count);
    for record in &records {
        pixels.extend(record.pixels.iter().map(|&p| p / 255.0));
    }
    let features =
        Array2::from_shape_vec((n, config.format.pixel_count), pixels).map_err(|e| {
            crate::error::DatasetError::shape_mismatch(
                "digit features",
                format!("[{n}, {}]", config.format.pixel_count),
                e.to_string(),
            )
        })?;
    let targets = one_hot(&labels, config.format.class_count)?;

    let (train_labels, test_labels) = {
        let mut train = labels;
        let test = train.split_off(train_len);
        (train, test)
    };

    log::info!(
        "digit pipeline: {} records -> {} train, {} test",
        n,
        train_labels.len(),
        test_labels.len()
    );

    Ok(DigitDataset {
        train_x: features.slice(ndarray::s![..train_len, ..]).to_owned(),
        train_y: targets.slice(ndarray::s![..train_len, ..]).to_owned(),
        train_labels,
        test_x: features.slice(ndarray::s![train_len.., ..]).to_owned(),
        test_y: targets.slice(ndarray::s![train_len.., ..]).to_owned(),
        test_labels,
    })
}
