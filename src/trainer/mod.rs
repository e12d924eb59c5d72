//! AROW training engine
//!
//! Runs the per-instance update of [`ArowState`] over a training set for a
//! fixed number of epochs, visiting the instances in a fresh random order
//! every epoch.

pub mod update;

pub use self::update::{ArowState, UpdateOutcome};

use crate::core::{ArowConfig, ArowError, Classifier, Instance, LabelPolicy, Prediction, Result};
use crate::linalg;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

/// Trainer holding the AROW hyperparameters
#[derive(Debug, Clone)]
pub struct ArowTrainer {
    epochs: usize,
    hyper_parameter: f64,
    label_policy: LabelPolicy,
}

impl ArowTrainer {
    /// Create a trainer with explicit hyperparameters
    pub fn new(epochs: usize, hyper_parameter: f64, label_policy: LabelPolicy) -> Result<Self> {
        if !(hyper_parameter.is_finite() && hyper_parameter > 0.0) {
            return Err(ArowError::InvalidParameter(format!(
                "hyper parameter r must be positive and finite, got: {hyper_parameter}"
            )));
        }
        Ok(Self {
            epochs,
            hyper_parameter,
            label_policy,
        })
    }

    /// Create a trainer from the training section of a configuration
    pub fn from_config(config: &ArowConfig) -> Result<Self> {
        config.check_default_label()?;
        Self::new(config.epoch, config.hyper_parameter, config.label_policy())
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn hyper_parameter(&self) -> f64 {
        self.hyper_parameter
    }

    pub fn label_policy(&self) -> LabelPolicy {
        self.label_policy
    }

    /// Train a linear model on `training_set`
    ///
    /// Every instance must have exactly `feature_dimension` features. The
    /// covariance matrix lives only for the duration of this call.
    pub fn train<R: Rng + ?Sized>(
        &self,
        training_set: &[Instance],
        feature_dimension: usize,
        rng: &mut R,
    ) -> Result<LinearModel> {
        if training_set.is_empty() {
            return Err(ArowError::EmptyDataset);
        }
        check_dimensions(training_set, feature_dimension)?;

        let mut state = ArowState::new(feature_dimension, self.hyper_parameter);
        let mut order: Vec<usize> = (0..training_set.len()).collect();

        for epoch in 0..self.epochs {
            order.shuffle(rng);

            let mut updates = 0usize;
            for &i in &order {
                let instance = &training_set[i];
                let label = self.label_policy.label_of(instance);
                if state.update(&instance.features, label) == UpdateOutcome::Updated {
                    updates += 1;
                }
            }
            trace!("epoch {epoch}: {updates} updates");
        }

        debug!(
            "trained on {} instances for {} epochs",
            training_set.len(),
            self.epochs
        );
        Ok(LinearModel::new(state.into_weights()))
    }
}

/// Reject instances whose feature length differs from `feature_dimension`
pub(crate) fn check_dimensions(instances: &[Instance], feature_dimension: usize) -> Result<()> {
    match instances
        .iter()
        .find(|instance| instance.dim() != feature_dimension)
    {
        Some(instance) => Err(ArowError::DimensionMismatch {
            expected: feature_dimension,
            actual: instance.dim(),
        }),
        None => Ok(()),
    }
}

/// A learned linear classifier `sign(w · x)`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: Vec<f64>,
}

impl LinearModel {
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    pub fn into_weights(self) -> Vec<f64> {
        self.weights
    }

    /// Decision value `w · x`
    pub fn decision_function(&self, features: &[f64]) -> f64 {
        linalg::dot(&self.weights, features)
    }
}

impl Classifier for LinearModel {
    fn predict(&self, features: &[f64]) -> Prediction {
        Prediction::from_decision_value(self.decision_function(features))
    }
}
