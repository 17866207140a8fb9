//! Training and prediction entry points
//!
//! `SVMOptimizer::fit` runs the SMO solver on a borrowed training set and
//! returns a `TrainedSVM`, the frozen dual model state used for prediction.

use crate::core::{Dataset, OptimizationResult, Prediction, Result, SMOConfig, SVMError, SVMModel};
use crate::kernel::Kernel;
use crate::solver::{DualState, SMOSolver};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Integrates a kernel and the SMO solver into complete training
pub struct SVMOptimizer<K: Kernel> {
    kernel: Arc<K>,
    config: SMOConfig,
}

impl<K: Kernel> SVMOptimizer<K> {
    /// Create a new optimizer with the given kernel and configuration
    pub fn new(kernel: K, config: SMOConfig) -> Self {
        Self {
            kernel: Arc::new(kernel),
            config,
        }
    }

    /// Create a new optimizer with default configuration
    pub fn with_kernel(kernel: K) -> Self {
        Self::new(kernel, SMOConfig::default())
    }

    /// Train on `dataset`, drawing second indices from a generator seeded
    /// with `config.seed` (or from entropy when no seed is set)
    pub fn fit<'a, D: Dataset>(&self, dataset: &'a D) -> Result<TrainedSVM<'a, K, D>> {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.fit_with_rng(dataset, &mut rng)
    }

    /// Train on `dataset` with a caller-supplied random source
    pub fn fit_with_rng<'a, D, R>(&self, dataset: &'a D, rng: &mut R) -> Result<TrainedSVM<'a, K, D>>
    where
        D: Dataset,
        R: Rng + ?Sized,
    {
        debug!(
            "Training on {} samples of dimension {} with {} kernel (C={}, tol={}, max_passes={})",
            dataset.len(),
            dataset.dim(),
            self.kernel.name(),
            self.config.c,
            self.config.tolerance,
            self.config.max_passes
        );

        let solver = SMOSolver::new(Arc::clone(&self.kernel), self.config.clone());
        let (state, result) = solver.solve(dataset, rng)?;

        Ok(TrainedSVM::from_state(state, result))
    }

    /// Get the optimizer configuration
    pub fn config(&self) -> &SMOConfig {
        &self.config
    }

    /// Get the kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

/// A trained SVM model that can make predictions
///
/// Holds the final dual weights and bias and borrows the training set they
/// were fitted on. Prediction never mutates the model.
pub struct TrainedSVM<'a, K: Kernel, D: Dataset> {
    state: DualState<'a, K, D>,
    result: OptimizationResult,
}

impl<'a, K: Kernel, D: Dataset> TrainedSVM<'a, K, D> {
    pub(crate) fn from_state(state: DualState<'a, K, D>, result: OptimizationResult) -> Self {
        Self { state, result }
    }

    /// Signed margin of `x`: Σ_i alpha[i] * y[i] * K(X[i], x) + b
    pub fn decision_function(&self, x: &[f64]) -> Result<f64> {
        let expected = self.dim();
        if x.len() != expected {
            return Err(SVMError::DimensionMismatch {
                expected,
                actual: x.len(),
            });
        }
        Ok(self.state.decision_function(x))
    }

    /// Class of `x`: +1.0 or -1.0 (a decision value of exactly 0 gives +1.0)
    pub fn predict(&self, x: &[f64]) -> Result<f64> {
        Ok(self.predict_with_decision(x)?.label)
    }

    /// Class of `x` together with its decision value
    pub fn predict_with_decision(&self, x: &[f64]) -> Result<Prediction> {
        self.decision_function(x).map(Prediction::from_decision)
    }

    /// Feature dimension the model was trained on
    pub fn dim(&self) -> usize {
        self.state.dataset().dim()
    }

    /// Dual weights for every training sample
    pub fn alpha_values(&self) -> &[f64] {
        self.state.alpha()
    }

    /// Indices of support vectors (alpha > 0) in the training set
    pub fn support_vector_indices(&self) -> &[usize] {
        &self.result.support_vectors
    }

    /// Feature vectors of the support vectors
    pub fn support_vectors(&self) -> Vec<&'a [f64]> {
        let dataset = self.state.dataset();
        self.result
            .support_vectors
            .iter()
            .map(|&i| dataset.features(i))
            .collect()
    }

    /// Statistics of the training run
    pub fn result(&self) -> &OptimizationResult {
        &self.result
    }

    /// The underlying dual state
    pub fn state(&self) -> &DualState<'a, K, D> {
        &self.state
    }

    /// The kernel used by this model
    pub fn kernel(&self) -> &K {
        self.state.kernel()
    }
}

impl<'a, K: Kernel, D: Dataset> SVMModel for TrainedSVM<'a, K, D> {
    fn classify(&self, x: &[f64]) -> Result<Prediction> {
        self.predict_with_decision(x)
    }

    fn n_support_vectors(&self) -> usize {
        self.result.support_vectors.len()
    }

    fn bias(&self) -> f64 {
        self.state.bias()
    }
}
