//! Core traits for the SMO trainer

use crate::core::{Prediction, Result};

/// Read-only access to a labelled training set
///
/// The solver borrows a `Dataset` for the whole run and evaluates the kernel
/// directly on the stored rows, so implementations hand out slices instead of
/// copies.
pub trait Dataset: Send + Sync {
    /// Number of samples in the dataset
    fn len(&self) -> usize;

    /// Number of features (dimensionality)
    fn dim(&self) -> usize;

    /// Feature vector of sample `i`
    ///
    /// # Panics
    /// Panics if index >= len()
    fn features(&self, i: usize) -> &[f64];

    /// Label of sample `i` (-1.0 or +1.0)
    ///
    /// # Panics
    /// Panics if index >= len()
    fn label(&self, i: usize) -> f64;

    /// Get all labels as a vector
    fn labels(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.label(i)).collect()
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trained binary classifier
pub trait SVMModel: Send + Sync {
    /// Classify a single feature vector, keeping the raw decision value
    fn classify(&self, x: &[f64]) -> Result<Prediction>;

    /// Classify multiple feature vectors, failing on the first invalid one
    fn classify_batch(&self, xs: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        xs.iter().map(|x| self.classify(x)).collect()
    }

    /// Get the number of support vectors
    fn n_support_vectors(&self) -> usize;

    /// Get the bias term
    fn bias(&self) -> f64;
}
