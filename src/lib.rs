//! Rust implementation of Adaptive Regularization of Weight Vectors (AROW)
//!
//! Based on "Adaptive Regularization of Weight Vectors" by Crammer, Kulesza
//! and Dredze, with k-fold cross-validation of the learned linear classifier.

pub mod api;
pub mod core;
pub mod data;
pub mod evaluation;
pub mod linalg;
pub mod trainer;
pub mod validation;

// Re-export main types for convenience
pub use crate::api::Arow;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{ArowError, Result};
pub use crate::data::{DelimitedDataset, ReaderOptions};
pub use crate::evaluation::{evaluate, Evaluation};
pub use crate::linalg::Matrix;
pub use crate::trainer::{ArowState, ArowTrainer, LinearModel, UpdateOutcome};
pub use crate::validation::{cross_validate, split_folds, CrossValidationReport, CrossValidator, FoldResult};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
