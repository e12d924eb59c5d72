//! k-fold cross-validation harness
//!
//! Shuffles a working copy of the dataset once, cuts it into contiguous
//! folds and, for every fold, trains on the remaining folds and evaluates
//! on the held-out one. The same random generator drives the dataset
//! shuffle and the per-epoch shuffles of the trainer.

use crate::core::{ArowConfig, ArowError, Dataset, Instance, Result};
use crate::evaluation::{evaluate, Evaluation};
use crate::linalg::format_vector;
use crate::trainer::{check_dimensions, ArowTrainer};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::ops::Range;

/// Split `n` instances into `fold` contiguous ranges
///
/// Every fold holds `n / fold` instances except the last, which also takes
/// the remainder. Requires `fold >= 2` and `n >= fold` so that no fold is
/// empty.
pub fn split_folds(n: usize, fold: usize) -> Result<Vec<Range<usize>>> {
    if fold < 2 {
        return Err(ArowError::InvalidParameter(format!(
            "fold must be at least 2, got: {fold}"
        )));
    }
    if n < fold {
        return Err(ArowError::InvalidDataset(format!(
            "{n} instances cannot be split into {fold} folds"
        )));
    }

    let size = n / fold;
    Ok((0..fold)
        .map(|i| {
            let start = i * size;
            let end = if i == fold - 1 { n } else { start + size };
            start..end
        })
        .collect())
}

/// Result of one train/evaluate round
#[derive(Debug, Clone)]
pub struct FoldResult {
    /// Index of the held-out fold
    pub index: usize,
    pub train_size: usize,
    pub test_size: usize,
    /// Learned weight vector
    pub weights: Vec<f64>,
    pub evaluation: Evaluation,
}

/// Aggregated cross-validation outcome
#[derive(Debug, Clone)]
pub struct CrossValidationReport {
    pub feature_dimension: usize,
    /// Per-fold results in the order they were run
    pub folds: Vec<FoldResult>,
}

impl CrossValidationReport {
    /// Arithmetic mean of the per-fold error rates
    pub fn average_error(&self) -> f64 {
        if self.folds.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .folds
            .iter()
            .map(|f| f.evaluation.error_rate())
            .sum();
        sum / self.folds.len() as f64
    }

    /// Confusion counts summed over all folds
    pub fn total(&self) -> Evaluation {
        let mut total = Evaluation::default();
        for fold in &self.folds {
            total += fold.evaluation;
        }
        total
    }
}

/// Runs k-fold cross-validation of the AROW trainer
pub struct CrossValidator {
    trainer: ArowTrainer,
    fold: usize,
    rng: StdRng,
}

impl CrossValidator {
    /// Create a harness from a configuration
    ///
    /// Uses `config.seed` when set, otherwise seeds from entropy.
    pub fn new(config: &ArowConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            trainer: ArowTrainer::from_config(config)?,
            fold: config.fold,
            rng,
        })
    }

    pub fn trainer(&self) -> &ArowTrainer {
        &self.trainer
    }

    pub fn fold(&self) -> usize {
        self.fold
    }

    /// Cross-validate on `dataset`
    pub fn run<D: Dataset + ?Sized>(&mut self, dataset: &D) -> Result<CrossValidationReport> {
        if dataset.is_empty() {
            return Err(ArowError::EmptyDataset);
        }

        let feature_dimension = dataset.instance(0).dim();
        check_dimensions(dataset.instances(), feature_dimension)?;

        let mut working: Vec<Instance> = dataset.instances().to_vec();
        working.shuffle(&mut self.rng);

        let ranges = split_folds(working.len(), self.fold)?;
        let label_policy = self.trainer.label_policy();

        info!(
            "cross-validating {} instances ({} features) over {} folds",
            working.len(),
            feature_dimension,
            self.fold
        );

        let mut folds = Vec::with_capacity(self.fold);
        for testing_index in (0..self.fold).rev() {
            let training_set: Vec<Instance> = ranges
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != testing_index)
                .flat_map(|(_, range)| working[range.clone()].iter().cloned())
                .collect();
            let testing_set = &working[ranges[testing_index].clone()];

            debug!(
                "fold {}: {} training instances, {} testing instances",
                testing_index,
                training_set.len(),
                testing_set.len()
            );

            let model = self
                .trainer
                .train(&training_set, feature_dimension, &mut self.rng)?;
            debug!("the learned weight is: {}", format_vector(model.weights()));

            let evaluation = evaluate(&model, testing_set, feature_dimension, label_policy)?;
            info!(
                "fold {}: {} of {} misclassified",
                testing_index, evaluation.misclassified, evaluation.total
            );

            folds.push(FoldResult {
                index: testing_index,
                train_size: training_set.len(),
                test_size: testing_set.len(),
                weights: model.into_weights(),
                evaluation,
            });
        }

        let report = CrossValidationReport {
            feature_dimension,
            folds,
        };
        info!("average error rate: {:.6}", report.average_error());
        Ok(report)
    }
}

/// Cross-validate `dataset` with a one-off harness built from `config`
pub fn cross_validate<D: Dataset + ?Sized>(
    dataset: &D,
    config: &ArowConfig,
) -> Result<CrossValidationReport> {
    CrossValidator::new(config)?.run(dataset)
}
