//! Misclassification rate and confusion counts for a trained weight vector

use crate::core::{ArowError, Classifier, Instance, LabelPolicy, Result};
use crate::trainer::{check_dimensions, LinearModel};
use log::debug;
use std::ops::AddAssign;

/// Outcome of evaluating a model on a testing set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Instances with `prediction * label <= 0`
    pub misclassified: usize,
    pub total: usize,
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl Evaluation {
    /// Fraction of misclassified instances, in [0, 1]
    pub fn error_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.misclassified as f64 / self.total as f64
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            1.0 - self.error_rate()
        }
    }

    /// Calculate precision: TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        let denominator = self.true_positives + self.false_positives;
        if denominator == 0 {
            0.0
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// Calculate recall (sensitivity): TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        let denominator = self.true_positives + self.false_negatives;
        if denominator == 0 {
            0.0
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// Calculate F1 score: 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * (p * r) / (p + r)
        }
    }
}

impl AddAssign for Evaluation {
    fn add_assign(&mut self, other: Self) {
        self.misclassified += other.misclassified;
        self.total += other.total;
        self.true_positives += other.true_positives;
        self.true_negatives += other.true_negatives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
    }
}

/// Evaluate `model` on `testing_set`
///
/// An instance counts as misclassified when `(w · x) * label <= 0`, so a
/// prediction of exactly zero is always an error.
pub fn evaluate(
    model: &LinearModel,
    testing_set: &[Instance],
    feature_dimension: usize,
    label_policy: LabelPolicy,
) -> Result<Evaluation> {
    if testing_set.is_empty() {
        return Err(ArowError::EmptyDataset);
    }
    if model.dim() != feature_dimension {
        return Err(ArowError::DimensionMismatch {
            expected: feature_dimension,
            actual: model.dim(),
        });
    }
    check_dimensions(testing_set, feature_dimension)?;

    let mut evaluation = Evaluation {
        total: testing_set.len(),
        ..Evaluation::default()
    };

    for instance in testing_set {
        let label = label_policy.label_of(instance);
        let prediction = model.predict(&instance.features);

        // Confusion counts follow the same rule, so FP + FN == misclassified.
        let correct = prediction.decision_value * label > 0.0;
        if !correct {
            evaluation.misclassified += 1;
        }

        match (correct, label > 0.0) {
            (true, true) => evaluation.true_positives += 1,
            (true, false) => evaluation.true_negatives += 1,
            (false, false) => evaluation.false_positives += 1,
            (false, true) => evaluation.false_negatives += 1,
        }
    }

    debug!(
        "misclassified {} of {} instances",
        evaluation.misclassified, evaluation.total
    );
    Ok(evaluation)
}
