//! Core traits for AROW

use crate::core::{Instance, Prediction};

/// Dataset abstraction over loaded instances
pub trait Dataset {
    /// Number of instances in the dataset
    fn len(&self) -> usize;

    /// Number of features (bias included)
    fn dim(&self) -> usize;

    /// Get a single instance by index
    ///
    /// # Panics
    /// Panics if index >= len()
    fn instance(&self, i: usize) -> &Instance;

    /// All instances in load order
    fn instances(&self) -> &[Instance];

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A trained linear classifier
pub trait Classifier {
    /// Predict a single feature vector
    fn predict(&self, features: &[f64]) -> Prediction;

    /// Predict multiple feature vectors
    fn predict_batch(&self, batch: &[Instance]) -> Vec<Prediction> {
        batch.iter().map(|i| self.predict(&i.features)).collect()
    }
}

impl Dataset for Vec<Instance> {
    fn len(&self) -> usize {
        <[Instance]>::len(self)
    }

    fn dim(&self) -> usize {
        self.first().map_or(0, Instance::dim)
    }

    fn instance(&self, i: usize) -> &Instance {
        &self[i]
    }

    fn instances(&self) -> &[Instance] {
        self
    }
}
