//! Dataset export to NumPy (.npy) files plus JSON metadata.
//!
//! Converts a windowed [`Dataset`] into dense tensors and writes one file per
//! split:
//!
//! - `{name}_x_train.npy`: `[N_train, T, entities × fields]`
//! - `{name}_y_train.npy`: `[N_train, horizons × entities]`
//! - `{name}_x_test.npy` / `{name}_y_test.npy`: same layout for the test range
//! - `{name}_metadata.json`: shapes, orderings, and export timestamp

use crate::dataset::Dataset;
use crate::error::{DatasetError, Result};
use ndarray::{Array2, Array3};
use ndarray_npy::WriteNpyExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Dense tensor form of a [`Dataset`].
#[derive(Debug, Clone)]
pub struct DatasetTensors {
    /// Inputs: `[samples, sequence_length, entities × fields]`.
    pub x: Array3<f64>,
    /// Targets: `[samples, horizons × entities]`.
    pub y: Array2<f64>,
}

impl DatasetTensors {
    /// Materialize a dataset's samples and targets as contiguous arrays.
    ///
    /// # Errors
    ///
    /// [`DatasetError::ShapeMismatch`] if any sample or target deviates from
    /// the dataset's declared shape.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let n = dataset.len();
        let seq_len = dataset.sequence_length();
        let step_width = dataset.step_width();
        let target_width = dataset.target_width();

        let mut x_flat = Vec::with_capacity(n * seq_len * step_width);
        for sample in dataset.samples() {
            if sample.steps.len() != seq_len {
                return Err(DatasetError::shape_mismatch(
                    "sample steps",
                    format!("[{seq_len}, {step_width}]"),
                    format!("[{}, _]", sample.steps.len()),
                ));
            }
            for step in &sample.steps {
                if step.len() != step_width {
                    return Err(DatasetError::shape_mismatch(
                        "sample step width",
                        format!("[{step_width}]"),
                        format!("[{}]", step.len()),
                    ));
                }
                x_flat.extend_from_slice(step);
            }
        }

        let mut y_flat = Vec::with_capacity(n * target_width);
        for target in dataset.targets() {
            if target.len() != target_width {
                return Err(DatasetError::shape_mismatch(
                    "target width",
                    format!("[{target_width}]"),
                    format!("[{}]", target.len()),
                ));
            }
            y_flat.extend_from_slice(target);
        }

        let x = Array3::from_shape_vec((n, seq_len, step_width), x_flat).map_err(|e| {
            DatasetError::shape_mismatch(
                "input tensor",
                format!("[{n}, {seq_len}, {step_width}]"),
                e.to_string(),
            )
        })?;
        let y = Array2::from_shape_vec((n, target_width), y_flat).map_err(|e| {
            DatasetError::shape_mismatch(
                "target tensor",
                format!("[{n}, {target_width}]"),
                e.to_string(),
            )
        })?;

        Ok(Self { x, y })
    }
}

/// Metadata written alongside the exported tensors.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Train sample count.
    pub n_train: usize,

    /// Test sample count.
    pub n_test: usize,

    /// Time steps per sample.
    pub sequence_length: usize,

    /// Features per time step (entities × fields).
    pub step_width: usize,

    /// Target length (horizons × entities).
    pub target_width: usize,

    /// Number of prediction horizons.
    pub horizons: usize,

    /// Entity names in canonical (first-seen) order.
    pub entities: Vec<String>,

    /// Value field names in header order.
    pub fields: Vec<String>,

    /// Export timestamp.
    pub export_timestamp: String,
}

/// Writes dataset splits as .npy files for Python consumers.
pub struct NumpyExporter {
    output_dir: PathBuf,
}

impl NumpyExporter {
    /// Create an exporter rooted at `output_dir`.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Export a train/test pair under the given dataset name.
    ///
    /// Creates the output directory if needed, then writes four .npy tensors
    /// and a `{name}_metadata.json` describing them.
    pub fn export_split(
        &self,
        name: &str,
        train: &Dataset,
        test: &Dataset,
        horizons: usize,
        entities: &[String],
        fields: &[String],
    ) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;

        let train_tensors = DatasetTensors::from_dataset(train)?;
        let test_tensors = DatasetTensors::from_dataset(test)?;

        self.write_array3(&format!("{name}_x_train.npy"), &train_tensors.x)?;
        self.write_array2(&format!("{name}_y_train.npy"), &train_tensors.y)?;
        self.write_array3(&format!("{name}_x_test.npy"), &test_tensors.x)?;
        self.write_array2(&format!("{name}_y_test.npy"), &test_tensors.y)?;

        let metadata = ExportMetadata {
            n_train: train.len(),
            n_test: test.len(),
            sequence_length: train.sequence_length(),
            step_width: train.step_width(),
            target_width: train.target_width(),
            horizons,
            entities: entities.to_vec(),
            fields: fields.to_vec(),
            export_timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.write_metadata(&format!("{name}_metadata.json"), &metadata)?;

        log::info!(
            "exported {name}: train [{}, {}, {}], test [{}, {}, {}] -> {}",
            train.len(),
            train.sequence_length(),
            train.step_width(),
            test.len(),
            test.sequence_length(),
            test.step_width(),
            self.output_dir.display()
        );

        Ok(())
    }

    fn write_array3(&self, filename: &str, array: &Array3<f64>) -> Result<()> {
        let path = self.output_dir.join(filename);
        let mut file = File::create(&path)?;
        array
            .write_npy(&mut file)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(())
    }

    fn write_array2(&self, filename: &str, array: &Array2<f64>) -> Result<()> {
        let path = self.output_dir.join(filename);
        let mut file = File::create(&path)?;
        array
            .write_npy(&mut file)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(())
    }

    fn write_metadata(&self, filename: &str, metadata: &ExportMetadata) -> Result<()> {
        let path = self.output_dir.join(filename);
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, metadata)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Sample, Target};

    fn make_dataset(n: usize, seq_len: usize, step_width: usize, target_width: usize) -> Dataset {
        let samples: Vec<Sample> = (0..n)
            .map(|i| Sample {
                steps: vec![vec![i as f64; step_width]; seq_len],
            })
            .collect();
        let targets: Vec<Target> = (0..n).map(|i| vec![(i % 2) as f64; target_width]).collect();
        Dataset::new(samples, targets, seq_len, step_width, target_width)
    }

    #[test]
    fn test_tensors_have_declared_shapes() {
        let dataset = make_dataset(4, 3, 2, 5);
        let tensors = DatasetTensors::from_dataset(&dataset).unwrap();

        assert_eq!(tensors.x.dim(), (4, 3, 2));
        assert_eq!(tensors.y.dim(), (4, 5));
    }

    #[test]
    fn test_tensors_preserve_values() {
        let dataset = make_dataset(3, 2, 2, 1);
        let tensors = DatasetTensors::from_dataset(&dataset).unwrap();

        for i in 0..3 {
            assert_eq!(tensors.x[[i, 0, 0]], i as f64);
            assert_eq!(tensors.x[[i, 1, 1]], i as f64);
            assert_eq!(tensors.y[[i, 0]], (i % 2) as f64);
        }
    }

    #[test]
    fn test_empty_dataset_yields_empty_tensors() {
        let dataset = make_dataset(0, 3, 2, 1);
        let tensors = DatasetTensors::from_dataset(&dataset).unwrap();
        assert_eq!(tensors.x.dim(), (0, 3, 2));
        assert_eq!(tensors.y.dim(), (0, 1));
    }
}
