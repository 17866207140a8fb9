//! Dual model state shared by the solver and the trained model
//!
//! The state owns the dual weights and the bias and borrows the training set,
//! so kernel evaluations read the caller's rows in place.

use crate::core::Dataset;
use crate::kernel::Kernel;
use std::sync::Arc;

/// Per-sample dual weights, bias and the training set they refer to
pub struct DualState<'a, K: Kernel, D: Dataset> {
    kernel: Arc<K>,
    dataset: &'a D,
    pub(crate) alpha: Vec<f64>,
    pub(crate) bias: f64,
}

impl<'a, K: Kernel, D: Dataset> DualState<'a, K, D> {
    /// Zero-initialized state: every alpha is 0 and the bias is 0
    pub fn new(kernel: Arc<K>, dataset: &'a D) -> Self {
        Self {
            kernel,
            alpha: vec![0.0; dataset.len()],
            bias: 0.0,
            dataset,
        }
    }

    /// Σ_i alpha[i] * y[i] * K(X[i], x) + b
    ///
    /// `x` must have the training dimension.
    pub fn decision_function(&self, x: &[f64]) -> f64 {
        let mut result = 0.0;

        for (i, &alpha) in self.alpha.iter().enumerate() {
            if alpha == 0.0 {
                continue;
            }
            let kernel_value = self.kernel.compute(self.dataset.features(i), x);
            result += alpha * self.dataset.label(i) * kernel_value;
        }

        result + self.bias
    }

    /// E_i = f(X[i]) - y[i]
    pub fn error(&self, i: usize) -> f64 {
        self.decision_function(self.dataset.features(i)) - self.dataset.label(i)
    }

    /// K(X[i], X[j])
    pub fn kernel_value(&self, i: usize, j: usize) -> f64 {
        self.kernel
            .compute(self.dataset.features(i), self.dataset.features(j))
    }

    /// Dual objective: Σ α_i - ½ Σ_i Σ_j α_i α_j y_i y_j K(x_i, x_j)
    pub fn objective_value(&self) -> f64 {
        let mut obj: f64 = self.alpha.iter().sum();
        let support = self.support_vector_indices();

        for &i in &support {
            for &j in &support {
                obj -= 0.5
                    * self.alpha[i]
                    * self.alpha[j]
                    * self.dataset.label(i)
                    * self.dataset.label(j)
                    * self.kernel_value(i, j);
            }
        }

        obj
    }

    /// Indices of samples with alpha > 0
    pub fn support_vector_indices(&self) -> Vec<usize> {
        self.alpha
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| if a > 0.0 { Some(i) } else { None })
            .collect()
    }

    /// Dual weights, one per training sample
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// Bias term
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Borrowed training set
    pub fn dataset(&self) -> &'a D {
        self.dataset
    }

    /// Kernel used by this state
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Number of training samples
    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    /// True if the state covers no samples
    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TrainingSet;
    use crate::kernel::LinearKernel;
    use approx::assert_relative_eq;

    fn two_points() -> TrainingSet {
        TrainingSet::new(vec![vec![1.0, 0.0], vec![-1.0, 0.0]], vec![1.0, -1.0]).unwrap()
    }

    #[test]
    fn test_new_state_is_zeroed() {
        let set = two_points();
        let state = DualState::new(Arc::new(LinearKernel::new()), &set);

        assert_eq!(state.alpha(), &[0.0, 0.0]);
        assert_eq!(state.bias(), 0.0);
        assert_eq!(state.len(), 2);
        assert!(state.support_vector_indices().is_empty());
    }

    #[test]
    fn test_decision_function_with_zero_alphas_is_bias() {
        let set = two_points();
        let mut state = DualState::new(Arc::new(LinearKernel::new()), &set);
        state.bias = 0.25;

        assert_eq!(state.decision_function(&[5.0, -3.0]), 0.25);
        // E_i = b - y_i
        assert_relative_eq!(state.error(0), -0.75);
        assert_relative_eq!(state.error(1), 1.25);
    }

    #[test]
    fn test_decision_function_weighted_sum() {
        let set = two_points();
        let mut state = DualState::new(Arc::new(LinearKernel::new()), &set);
        state.alpha = vec![0.5, 0.5];

        // w = 0.5 * (1,0) - 0.5 * (-1,0) = (1,0)
        assert_relative_eq!(state.decision_function(&[2.0, 7.0]), 2.0);
        assert_relative_eq!(state.decision_function(&[-1.0, 0.0]), -1.0);
        assert_eq!(state.support_vector_indices(), vec![0, 1]);
    }

    #[test]
    fn test_objective_value() {
        let set = two_points();
        let mut state = DualState::new(Arc::new(LinearKernel::new()), &set);
        state.alpha = vec![0.5, 0.5];

        // Σα = 1, ||w||² = 1 -> 1 - 0.5 = 0.5
        assert_relative_eq!(state.objective_value(), 0.5);
    }

    #[test]
    fn test_kernel_value() {
        let set = two_points();
        let state = DualState::new(Arc::new(LinearKernel::new()), &set);

        assert_eq!(state.kernel_value(0, 1), -1.0);
        assert_eq!(state.kernel_value(1, 1), 1.0);
    }
}
