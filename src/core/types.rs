//! Core type definitions for AROW

use crate::core::{ArowError, Result};
use crate::trainer::ArowTrainer;
use serde::{Deserialize, Serialize};

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label (+1 or -1)
    pub label: f64,
    /// Raw decision function value (the margin)
    pub decision_value: f64,
}

impl Prediction {
    /// Create a prediction from a raw decision value
    ///
    /// A decision value of exactly zero is reported as -1; the evaluator
    /// counts such instances as errors regardless of their label.
    pub fn from_decision_value(decision_value: f64) -> Self {
        let label = if decision_value > 0.0 { 1.0 } else { -1.0 };
        Self {
            label,
            decision_value,
        }
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// A dense feature vector together with its (optional) label
///
/// The bias feature, when enabled, has already been prepended to `features`
/// by the reader.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub features: Vec<f64>,
    /// `None` for unlabeled datasets
    pub label: Option<f64>,
}

impl Instance {
    /// Create a labeled instance
    pub fn new(features: Vec<f64>, label: f64) -> Self {
        Self {
            features,
            label: Some(label),
        }
    }

    /// Create an instance without a label
    pub fn unlabeled(features: Vec<f64>) -> Self {
        Self {
            features,
            label: None,
        }
    }

    /// Number of features, bias included
    pub fn dim(&self) -> usize {
        self.features.len()
    }
}

/// Decides which label an instance is trained and evaluated against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPolicy {
    pub no_label: bool,
    pub default_label: f64,
}

impl LabelPolicy {
    pub fn new(no_label: bool, default_label: f64) -> Self {
        Self {
            no_label,
            default_label,
        }
    }

    /// The effective label of an instance
    pub fn label_of(&self, instance: &Instance) -> f64 {
        if self.no_label {
            self.default_label
        } else {
            instance.label.unwrap_or(self.default_label)
        }
    }
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self::new(false, 1.0)
    }
}

/// Configuration for training, cross-validation, and data loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArowConfig {
    /// Number of passes over the training set
    pub epoch: usize,
    /// Regularization strength r (must be positive)
    pub hyper_parameter: f64,
    /// Number of cross-validation folds (at least 2)
    pub fold: usize,
    /// Prepend a constant 1.0 feature to every instance
    pub bias_feature: bool,
    /// Label is the first field instead of the last
    pub reverse: bool,
    /// Records carry no label; `default_label` is used for every instance
    pub no_label: bool,
    pub default_label: f64,
    /// Literal field separator
    pub separator: String,
    /// Drop unparsable lines instead of failing the whole load
    pub skip_malformed: bool,
    /// Seed for shuffling; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for ArowConfig {
    fn default() -> Self {
        Self {
            epoch: 10,
            hyper_parameter: 1.0,
            fold: 10,
            bias_feature: true,
            reverse: true,
            no_label: false,
            default_label: 1.0,
            separator: ",".to_string(),
            skip_malformed: false,
            seed: None,
        }
    }
}

impl ArowConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    /// Check the training parameters
    pub fn validate_training(&self) -> Result<()> {
        self.check_default_label()?;
        ArowTrainer::new(self.epoch, self.hyper_parameter, self.label_policy()).map(|_| ())
    }

    pub(crate) fn check_default_label(&self) -> Result<()> {
        if !self.default_label.is_finite() {
            return Err(ArowError::InvalidParameter(format!(
                "default label must be finite, got: {}",
                self.default_label
            )));
        }
        Ok(())
    }

    /// Check the training parameters plus the fold count
    pub fn validate(&self) -> Result<()> {
        self.validate_training()?;
        if self.fold < 2 {
            return Err(ArowError::InvalidParameter(format!(
                "fold must be at least 2, got: {}",
                self.fold
            )));
        }
        if self.separator.is_empty() {
            return Err(ArowError::InvalidParameter(
                "separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn label_policy(&self) -> LabelPolicy {
        LabelPolicy::new(self.no_label, self.default_label)
    }
}
