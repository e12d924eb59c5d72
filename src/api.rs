//! High-level API for AROW training and cross-validation
//!
//! This module provides a builder over [`ArowConfig`] that wires the
//! delimited reader, the trainer, and the cross-validation harness.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use arow::api::Arow;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = Arow::new()
//!     .with_epochs(10)
//!     .with_hyper_parameter(1.0)
//!     .with_folds(10)
//!     .with_bias_feature(true)
//!     .with_reverse(true)
//!     .cross_validate_file("data/iris-twoclass.csv")?;
//!
//! println!("Error: {:.4}", report.average_error());
//! # Ok(())
//! # }
//! ```

use crate::core::{ArowConfig, Dataset, Result};
use crate::data::{DelimitedDataset, ReaderOptions};
use crate::trainer::{ArowTrainer, LinearModel};
use crate::validation::{CrossValidationReport, CrossValidator};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

/// High-level AROW interface with builder pattern
#[derive(Debug, Clone, Default)]
pub struct Arow {
    config: ArowConfig,
}

impl Arow {
    /// Create with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an existing configuration
    pub fn from_config(config: ArowConfig) -> Self {
        Self { config }
    }

    /// Set the number of epochs
    pub fn with_epochs(mut self, epoch: usize) -> Self {
        self.config.epoch = epoch;
        self
    }

    /// Set the regularization parameter r
    pub fn with_hyper_parameter(mut self, r: f64) -> Self {
        self.config.hyper_parameter = r;
        self
    }

    /// Set the number of cross-validation folds
    pub fn with_folds(mut self, fold: usize) -> Self {
        self.config.fold = fold;
        self
    }

    pub fn with_bias_feature(mut self, bias_feature: bool) -> Self {
        self.config.bias_feature = bias_feature;
        self
    }

    /// Read the label from the first field instead of the last
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.config.reverse = reverse;
        self
    }

    /// Treat every record as unlabeled, using `default_label` for all of them
    pub fn with_no_label(mut self, default_label: f64) -> Self {
        self.config.no_label = true;
        self.config.default_label = default_label;
        self
    }

    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.config.separator = separator.into();
        self
    }

    pub fn with_skip_malformed(mut self, skip_malformed: bool) -> Self {
        self.config.skip_malformed = skip_malformed;
        self
    }

    /// Fix the random seed for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &ArowConfig {
        &self.config
    }

    /// Load a delimited file using the configured layout
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<DelimitedDataset> {
        DelimitedDataset::from_file(path, &ReaderOptions::from(&self.config))
    }

    /// Cross-validate on an already loaded dataset
    pub fn cross_validate<D: Dataset + ?Sized>(&self, dataset: &D) -> Result<CrossValidationReport> {
        CrossValidator::new(&self.config)?.run(dataset)
    }

    /// Load a file and cross-validate on it
    pub fn cross_validate_file<P: AsRef<Path>>(&self, path: P) -> Result<CrossValidationReport> {
        let dataset = self.load(path)?;
        self.cross_validate(&dataset)
    }

    /// Train on the whole dataset
    pub fn train<D: Dataset + ?Sized>(&self, dataset: &D) -> Result<LinearModel> {
        let trainer = ArowTrainer::from_config(&self.config)?;
        let mut rng = match self.config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        info!(
            "training on {} instances for {} epochs",
            dataset.len(),
            trainer.epochs()
        );
        trainer.train(dataset.instances(), dataset.dim(), &mut rng)
    }

    /// Load a file and train on all of it
    pub fn train_from_file<P: AsRef<Path>>(&self, path: P) -> Result<LinearModel> {
        let dataset = self.load(path)?;
        self.train(&dataset)
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Cross-validate a comma-separated, label-first file with default parameters
    pub fn cross_validate_csv<P: AsRef<Path>>(path: P) -> Result<f64> {
        Ok(Arow::new().cross_validate_file(path)?.average_error())
    }

    /// Cross-validate with a custom r and fold count
    pub fn cross_validate_with<P: AsRef<Path>>(path: P, r: f64, fold: usize) -> Result<f64> {
        Ok(Arow::new()
            .with_hyper_parameter(r)
            .with_folds(fold)
            .cross_validate_file(path)?
            .average_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArowError, Classifier};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_clusters(n_per_class: usize) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for i in 0..n_per_class {
            let offset = i as f64 * 0.1;
            writeln!(temp_file, "1,{},{}", 2.0 + offset, 1.0 + offset).expect("Failed to write");
            writeln!(temp_file, "-1,{},{}", -2.0 - offset, -1.0 - offset)
                .expect("Failed to write");
        }
        temp_file.flush().expect("Failed to flush");
        temp_file
    }

    #[test]
    fn test_builder_pattern() {
        let arow = Arow::new()
            .with_epochs(5)
            .with_hyper_parameter(0.5)
            .with_folds(3)
            .with_bias_feature(false)
            .with_reverse(false)
            .with_separator(";")
            .with_seed(9);

        let config = arow.config();
        assert_eq!(config.epoch, 5);
        assert_eq!(config.hyper_parameter, 0.5);
        assert_eq!(config.fold, 3);
        assert!(!config.bias_feature);
        assert!(!config.reverse);
        assert_eq!(config.separator, ";");
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_with_no_label() {
        let arow = Arow::new().with_no_label(-1.0);
        assert!(arow.config().no_label);
        assert_eq!(arow.config().default_label, -1.0);
    }

    #[test]
    fn test_cross_validate_file() {
        let file = write_clusters(15);
        let report = Arow::new()
            .with_epochs(5)
            .with_folds(5)
            .with_seed(3)
            .cross_validate_file(file.path())
            .expect("Cross-validation should succeed");

        assert_eq!(report.folds.len(), 5);
        assert_eq!(report.feature_dimension, 3);
        assert!(report.average_error() <= 0.1);
    }

    #[test]
    fn test_train_from_file() {
        let file = write_clusters(10);
        let model = Arow::new()
            .with_epochs(5)
            .with_seed(5)
            .train_from_file(file.path())
            .expect("Training should succeed");

        assert_eq!(model.dim(), 3);
        assert_eq!(model.predict(&[1.0, 3.0, 2.0]).label, 1.0);
        assert_eq!(model.predict(&[1.0, -3.0, -2.0]).label, -1.0);
    }

    #[test]
    fn test_invalid_configuration_is_reported() {
        let file = write_clusters(5);
        let result = Arow::new().with_folds(1).cross_validate_file(file.path());
        assert!(matches!(result, Err(ArowError::InvalidParameter(_))));

        let result = Arow::new()
            .with_hyper_parameter(-1.0)
            .train_from_file(file.path());
        assert!(matches!(result, Err(ArowError::InvalidParameter(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Arow::new().cross_validate_file("/nonexistent/data.csv");
        assert!(matches!(result, Err(ArowError::IoError(_))));
    }

    #[test]
    fn test_quick_cross_validation() {
        let file = write_clusters(10);
        let error = quick::cross_validate_with(file.path(), 1.0, 4).expect("Should succeed");
        assert!((0.0..=1.0).contains(&error));
    }
}
