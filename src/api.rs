//! High-level API for training and using the classifier
//!
//! This module provides a builder over [`SVMOptimizer`], model evaluation
//! helpers and a serializable training report.
//!
//! # Quick Start
//!
//! ```rust
//! use smosvm::api::SVM;
//! use smosvm::TrainingSet;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = TrainingSet::new(
//!     vec![vec![1.0, 2.0], vec![2.0, 3.0], vec![3.0, 3.0], vec![2.0, 1.0], vec![3.0, 2.0]],
//!     vec![1.0, 1.0, 1.0, -1.0, -1.0],
//! )?;
//!
//! let model = SVM::new()
//!     .with_c(1.0)
//!     .with_tolerance(0.001)
//!     .with_max_passes(100)
//!     .with_seed(42)
//!     .fit(&data)?;
//!
//! assert_eq!(model.predict(&[2.5, 2.5])?, 1.0);
//! # Ok(())
//! # }
//! ```

use crate::core::{Dataset, Prediction, Result, SMOConfig, SVMError, SVMModel, TrainingSet};
use crate::data::load_csv;
use crate::kernel::{Kernel, LinearKernel};
use crate::optimizer::{SVMOptimizer, TrainedSVM};
use rand::Rng;
use serde::Serialize;
use std::path::Path;

/// High-level SVM interface with builder pattern
pub struct SVM<K: Kernel = LinearKernel> {
    kernel: K,
    config: SMOConfig,
}

impl SVM<LinearKernel> {
    /// Create a new SVM with linear kernel and default parameters
    pub fn new() -> Self {
        Self {
            kernel: LinearKernel::new(),
            config: SMOConfig::default(),
        }
    }
}

impl Default for SVM<LinearKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Kernel> SVM<K> {
    /// Create SVM with custom kernel
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            config: SMOConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: SMOConfig) -> Self {
        self.config = config;
        self
    }

    /// Set regularization parameter C
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.c = c;
        self
    }

    /// Set the KKT violation tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the number of consecutive quiet sweeps that ends training
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.config.max_passes = max_passes;
        self
    }

    /// Fix the seed of the second-index selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Train on a dataset
    pub fn fit<D: Dataset>(self, dataset: &D) -> Result<TrainedModel<'_, K, D>> {
        let config = self.config.clone();
        let optimizer = SVMOptimizer::new(self.kernel, self.config);
        let model = optimizer.fit(dataset)?;
        Ok(TrainedModel { model, config })
    }

    /// Train on a dataset with a caller-supplied random source
    pub fn fit_with_rng<'a, D, R>(self, dataset: &'a D, rng: &mut R) -> Result<TrainedModel<'a, K, D>>
    where
        D: Dataset,
        R: Rng + ?Sized,
    {
        let config = self.config.clone();
        let optimizer = SVMOptimizer::new(self.kernel, self.config);
        let model = optimizer.fit_with_rng(dataset, rng)?;
        Ok(TrainedModel { model, config })
    }
}

/// Trained model with high-level prediction and evaluation interface
pub struct TrainedModel<'a, K: Kernel, D: Dataset> {
    model: TrainedSVM<'a, K, D>,
    config: SMOConfig,
}

impl<'a, K: Kernel, D: Dataset> TrainedModel<'a, K, D> {
    /// Predict the class (+1.0 / -1.0) of a feature vector
    pub fn predict(&self, x: &[f64]) -> Result<f64> {
        self.model.predict(x)
    }

    /// Predict a feature vector, keeping its decision value
    pub fn predict_with_decision(&self, x: &[f64]) -> Result<Prediction> {
        self.model.predict_with_decision(x)
    }

    /// Predict multiple feature vectors
    pub fn predict_batch(&self, xs: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        self.model.classify_batch(xs)
    }

    /// Predict every sample of a dataset
    pub fn predict_dataset<T: Dataset>(&self, dataset: &T) -> Result<Vec<Prediction>> {
        (0..dataset.len())
            .map(|i| self.model.predict_with_decision(dataset.features(i)))
            .collect()
    }

    /// Accuracy on a dataset
    pub fn evaluate<T: Dataset>(&self, dataset: &T) -> Result<f64> {
        Ok(self.evaluate_detailed(dataset)?.accuracy())
    }

    /// Confusion counts on a dataset
    pub fn evaluate_detailed<T: Dataset>(&self, dataset: &T) -> Result<EvaluationMetrics> {
        let predictions = self.predict_dataset(dataset)?;

        let mut tp = 0; // True positives
        let mut tn = 0; // True negatives
        let mut fp = 0; // False positives
        let mut fn_ = 0; // False negatives

        for (i, pred) in predictions.iter().enumerate() {
            match (pred.label > 0.0, dataset.label(i) > 0.0) {
                (true, true) => tp += 1,
                (false, false) => tn += 1,
                (true, false) => fp += 1,
                (false, true) => fn_ += 1,
            }
        }

        Ok(EvaluationMetrics::new(tp, tn, fp, fn_))
    }

    /// Get model information
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            n_support_vectors: self.model.n_support_vectors(),
            bias: self.model.bias(),
            support_vector_indices: self.model.support_vector_indices().to_vec(),
        }
    }

    /// Summarize the training run, scoring the model on its own training set
    pub fn report(&self) -> Result<TrainingReport> {
        let dataset = self.model.state().dataset();
        let result = self.model.result();

        Ok(TrainingReport {
            kernel: self.model.kernel().name().to_string(),
            config: self.config.clone(),
            n_samples: dataset.len(),
            n_features: dataset.dim(),
            n_support_vectors: result.support_vectors.len(),
            support_vector_indices: result.support_vectors.clone(),
            bias: result.b,
            sweeps: result.sweeps,
            updates: result.updates,
            objective_value: result.objective_value,
            training_accuracy: self.evaluate(dataset)?,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Hyperparameters the model was trained with
    pub fn config(&self) -> &SMOConfig {
        &self.config
    }

    /// Get the underlying trained model
    pub fn inner(&self) -> &TrainedSVM<'a, K, D> {
        &self.model
    }
}

/// Detailed evaluation metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationMetrics {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl EvaluationMetrics {
    fn new(tp: usize, tn: usize, fp: usize, fn_: usize) -> Self {
        Self {
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        }
    }

    /// Calculate accuracy: (TP + TN) / (TP + TN + FP + FN)
    pub fn accuracy(&self) -> f64 {
        let total =
            self.true_positives + self.true_negatives + self.false_positives + self.false_negatives;
        if total == 0 {
            0.0
        } else {
            (self.true_positives + self.true_negatives) as f64 / total as f64
        }
    }

    /// Calculate precision: TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// Calculate recall (sensitivity): TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
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

    /// Calculate specificity: TN / (TN + FP)
    pub fn specificity(&self) -> f64 {
        ratio(self.true_negatives, self.true_negatives + self.false_positives)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub n_support_vectors: usize,
    pub bias: f64,
    pub support_vector_indices: Vec<usize>,
}

/// Summary of one training run, written by the CLI as JSON
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub kernel: String,
    pub config: SMOConfig,
    pub n_samples: usize,
    pub n_features: usize,
    pub n_support_vectors: usize,
    pub support_vector_indices: Vec<usize>,
    pub bias: f64,
    pub sweeps: usize,
    pub updates: usize,
    pub objective_value: f64,
    pub training_accuracy: f64,
    /// RFC 3339 timestamp
    pub created_at: String,
}

impl TrainingReport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SVMError::SerializationError(e.to_string()))
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Train on the first `train_ratio` of `dataset` and return the accuracy
    /// on the rest (sequential split, not shuffled)
    pub fn holdout_accuracy(dataset: &TrainingSet, train_ratio: f64, config: SMOConfig) -> Result<f64> {
        if train_ratio <= 0.0 || train_ratio >= 1.0 {
            return Err(SVMError::InvalidParameter(format!(
                "Train ratio must be between 0 and 1, got: {train_ratio}"
            )));
        }

        let n = dataset.len();
        let train_size = (n as f64 * train_ratio) as usize;
        if train_size < 2 || train_size >= n {
            return Err(SVMError::InvalidDataset(format!(
                "Split of {n} samples at ratio {train_ratio} leaves no usable train/test part"
            )));
        }

        let train_indices: Vec<usize> = (0..train_size).collect();
        let test_indices: Vec<usize> = (train_size..n).collect();
        let train = dataset.subset(&train_indices)?;
        let test = dataset.subset(&test_indices)?;

        let model = SVM::new().with_config(config).fit(&train)?;
        model.evaluate(&test)
    }

    /// Train a linear model on one CSV file and return its accuracy on another
    pub fn evaluate_csv_split<P1: AsRef<Path>, P2: AsRef<Path>>(
        train_path: P1,
        test_path: P2,
        config: SMOConfig,
    ) -> Result<f64> {
        let train = load_csv(train_path)?;
        let test = load_csv(test_path)?;

        let model = SVM::new().with_config(config).fit(&train)?;
        model.evaluate(&test)
    }
}
