//! Soft-margin binary SVM trained with simplified Sequential Minimal Optimization
//!
//! Training repeatedly picks a sample that violates the KKT conditions, pairs
//! it with a second sample chosen uniformly at random, and jointly optimizes
//! their dual weights in closed form. It stops once `max_passes` consecutive
//! sweeps over the data change nothing.

pub mod api;
pub mod core;
pub mod data;
pub mod kernel;
pub mod optimizer;
pub mod solver;

// Re-export main types for convenience
pub use crate::api::{EvaluationMetrics, ModelInfo, TrainedModel, TrainingReport, SVM};
pub use crate::core::error::*;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::{load_csv, read_csv};
pub use crate::kernel::{Kernel, LinearKernel, PolynomialKernel, RBFKernel};
pub use crate::optimizer::{SVMOptimizer, TrainedSVM};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
