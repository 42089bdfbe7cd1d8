//! Immutable windowed datasets and the ordered train/test split.
//!
//! A [`Dataset`] is an ordered sequence of (sample, target) pairs produced by
//! the window builder. It is a plain value: construction fixes its contents,
//! consumers receive shared references, and dropping it releases the backing
//! storage — there is no disposal API and no ambient loader state.
//!
//! Splitting is contiguous and order-preserving: the first `floor(N·r)` pairs
//! become the train range and the remainder the test range, so test data is
//! strictly chronologically after train data.

use crate::error::{DatasetError, Result};

/// One model input: `sequence_length` consecutive time steps, each a feature
/// vector of `entities × fields` values in canonical entity order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Rows, oldest first; each row has the same width.
    pub steps: Vec<Vec<f64>>,
}

impl Sample {
    /// Flatten to a single `sequence_length × step_width` vector, row-major.
    pub fn as_flat(&self) -> Vec<f64> {
        let width = self.steps.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(self.steps.len() * width);
        for step in &self.steps {
            flat.extend_from_slice(step);
        }
        flat
    }
}

/// Multi-horizon binary target, length `horizons × entities`, laid out
/// horizon-major: index `(h - 1) * entities + entity_idx` for horizon `h`.
pub type Target = Vec<f64>;

/// Ordered, immutable sequence of (sample, target) pairs.
#[derive(Debug, Clone)]
pub struct Dataset {
    samples: Vec<Sample>,
    targets: Vec<Target>,
    sequence_length: usize,
    step_width: usize,
    target_width: usize,
}

impl Dataset {
    /// Assemble a dataset from parallel sample/target lists.
    ///
    /// Shape parameters describe every element; the window builder guarantees
    /// them by construction.
    pub(crate) fn new(
        samples: Vec<Sample>,
        targets: Vec<Target>,
        sequence_length: usize,
        step_width: usize,
        target_width: usize,
    ) -> Self {
        debug_assert_eq!(samples.len(), targets.len());
        Self {
            samples,
            targets,
            sequence_length,
            step_width,
            target_width,
        }
    }

    /// Number of (sample, target) pairs.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the dataset holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time steps per sample (T).
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Features per time step (entities × fields).
    pub fn step_width(&self) -> usize {
        self.step_width
    }

    /// Target length (horizons × entities).
    pub fn target_width(&self) -> usize {
        self.target_width
    }

    /// Sample at index `i`.
    pub fn sample(&self, i: usize) -> &Sample {
        &self.samples[i]
    }

    /// Target at index `i`.
    pub fn target(&self, i: usize) -> &Target {
        &self.targets[i]
    }

    /// All samples in order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// All targets in order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Iterate over (sample, target) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&Sample, &Target)> {
        self.samples.iter().zip(self.targets.iter())
    }

    /// Split into (train, test) at `floor(len · fraction)`.
    ///
    /// Order is preserved on both sides; there is no shuffling or sampling,
    /// so the test range is strictly after the train range.
    ///
    /// # Errors
    ///
    /// [`DatasetError::InvalidParameter`] unless `0 < fraction < 1`.
    pub fn split(self, fraction: f64) -> Result<(Dataset, Dataset)> {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(DatasetError::invalid_parameter(
                "fraction",
                format!("must be in (0, 1), got {fraction}"),
            ));
        }

        let train_len = (self.samples.len() as f64 * fraction).floor() as usize;

        let mut train_samples = self.samples;
        let mut train_targets = self.targets;
        let test_samples = train_samples.split_off(train_len);
        let test_targets = train_targets.split_off(train_len);

        let train = Dataset::new(
            train_samples,
            train_targets,
            self.sequence_length,
            self.step_width,
            self.target_width,
        );
        let test = Dataset::new(
            test_samples,
            test_targets,
            self.sequence_length,
            self.step_width,
            self.target_width,
        );
        Ok((train, test))
    }
}
