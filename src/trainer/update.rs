//! Single-instance AROW update
//!
//! Implements Figure 1 of "Adaptive Regularization of Weight Vectors"
//! (Crammer, Kulesza, Dredze): a hinge-triggered update of the mean weight
//! vector together with a rank-one shrink of the covariance matrix.

use crate::linalg::{self, Matrix};

/// Mean weights and covariance of one training run
#[derive(Debug, Clone)]
pub struct ArowState {
    weights: Vec<f64>,
    covariance: Matrix,
    hyper_parameter: f64,
}

/// What a single update step did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    /// `margin * label >= 1`, nothing to learn
    Confident,
    /// Hinge violated but the step vector was exactly zero
    ZeroStep,
    /// Weights and covariance were updated
    Updated,
}

impl ArowState {
    /// Zero weights and identity covariance
    pub fn new(dimension: usize, hyper_parameter: f64) -> Self {
        Self {
            weights: vec![0.0; dimension],
            covariance: Matrix::identity(dimension),
            hyper_parameter,
        }
    }

    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn covariance(&self) -> &Matrix {
        &self.covariance
    }

    pub fn into_weights(self) -> Vec<f64> {
        self.weights
    }

    /// Apply one AROW step for `(features, label)`
    ///
    /// # Panics
    /// Panics if `features.len() != self.dim()`
    pub fn update(&mut self, features: &[f64], label: f64) -> UpdateOutcome {
        let margin = linalg::dot(&self.weights, features);
        if margin * label >= 1.0 {
            return UpdateOutcome::Confident;
        }

        let confidence = self.covariance.quadratic_form(features);
        let beta = 1.0 / (confidence + self.hyper_parameter);
        let alpha = (beta * (1.0 - label * margin)).max(0.0);

        let sigma_x = self.covariance.mul_vec(features);
        let delta = linalg::scale(&sigma_x, alpha * label);

        // Exact-zero guard: skip both updates, keep going with the next instance.
        if linalg::is_zero_vector(&delta) {
            return UpdateOutcome::ZeroStep;
        }

        self.weights = linalg::add(&self.weights, &delta);

        // Σ ← Σ - β (Σx) xᵀ Σ
        let shrink = Matrix::outer(&sigma_x, features)
            .scale(beta)
            .matmul(&self.covariance);
        self.covariance = self.covariance.subtract(&shrink);

        UpdateOutcome::Updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_initial_state() {
        let state = ArowState::new(3, 1.0);
        assert_eq!(state.weights(), &[0.0, 0.0, 0.0]);
        assert_eq!(state.covariance(), &Matrix::identity(3));
    }

    #[test]
    fn test_first_update_by_hand() {
        // x = [1, 2], y = +1, r = 1, Σ = I, w = 0
        // v = 5, β = 1/6, α = 1/6, Δ = α y Σx = [1/6, 2/6]
        let mut state = ArowState::new(2, 1.0);
        assert_eq!(state.update(&[1.0, 2.0], 1.0), UpdateOutcome::Updated);

        assert_relative_eq!(state.weights()[0], 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(state.weights()[1], 2.0 / 6.0, epsilon = 1e-12);

        // Σ = I - β x xᵀ
        let sigma = state.covariance();
        assert_relative_eq!(sigma[(0, 0)], 1.0 - 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(sigma[(0, 1)], -2.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(sigma[(1, 0)], -2.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(sigma[(1, 1)], 1.0 - 4.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_confident_instance_is_skipped() {
        let mut state = ArowState::new(1, 1.0);
        // w = 0.4 after one step on x = 2, so x = 10 has margin 4.
        state.update(&[2.0], 1.0);
        assert_relative_eq!(state.weights()[0], 0.4, epsilon = 1e-12);

        let before = state.clone();
        assert_eq!(state.update(&[10.0], 1.0), UpdateOutcome::Confident);
        assert_eq!(state.weights(), before.weights());
        assert_eq!(state.covariance(), before.covariance());
    }

    #[test]
    fn test_zero_features_take_zero_step() {
        let mut state = ArowState::new(2, 1.0);
        assert_eq!(state.update(&[0.0, 0.0], 1.0), UpdateOutcome::ZeroStep);
        assert_eq!(state.weights(), &[0.0, 0.0]);
        assert_eq!(state.covariance(), &Matrix::identity(2));
    }

    #[test]
    fn test_negative_label_moves_weights_down() {
        let mut state = ArowState::new(2, 1.0);
        state.update(&[1.0, 1.0], -1.0);
        assert!(state.weights().iter().all(|&w| w < 0.0));
    }

    #[test]
    fn test_covariance_stays_symmetric() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = ArowState::new(4, 0.5);

        for _ in 0..200 {
            let features: Vec<f64> = (0..4).map(|_| rng.gen_range(-3.0..3.0)).collect();
            let label = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            if state.update(&features, label) == UpdateOutcome::Updated {
                assert!(
                    state.covariance().is_symmetric(1e-9),
                    "covariance lost symmetry: {:?}",
                    state.covariance()
                );
            }
        }
    }

    #[test]
    fn test_variance_shrinks_along_seen_direction() {
        let mut state = ArowState::new(2, 1.0);
        state.update(&[1.0, 0.0], 1.0);
        assert!(state.covariance()[(0, 0)] < 1.0);
        assert_eq!(state.covariance()[(1, 1)], 1.0);
    }
}
