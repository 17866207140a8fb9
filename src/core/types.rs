//! Core type definitions for the SMO trainer

use crate::core::{Dataset, Result, SVMError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label (+1 or -1)
    pub label: f64,
    /// Raw decision function value
    pub decision_value: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: f64, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Build a prediction from a decision value.
    ///
    /// A decision value of exactly zero lies on the boundary and is labelled +1.
    pub fn from_decision(decision_value: f64) -> Self {
        let label = if decision_value >= 0.0 { 1.0 } else { -1.0 };
        Self::new(label, decision_value)
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Dense, labelled training set: `m` rows of dimension `n`, labels in {-1, +1}
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingSet {
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
    dimensions: usize,
}

impl TrainingSet {
    /// Create a training set, validating its shape and labels
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Self> {
        if features.is_empty() {
            return Err(SVMError::EmptyDataset);
        }
        if features.len() != labels.len() {
            return Err(SVMError::InvalidDataset(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let dimensions = features[0].len();
        for row in &features {
            if row.len() != dimensions {
                return Err(SVMError::DimensionMismatch {
                    expected: dimensions,
                    actual: row.len(),
                });
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(SVMError::InvalidDataset(
                    "Feature values must be finite".to_string(),
                ));
            }
        }

        if let Some(&bad) = labels.iter().find(|&&l| l != 1.0 && l != -1.0) {
            return Err(SVMError::InvalidLabel(bad));
        }

        Ok(Self {
            features,
            labels,
            dimensions,
        })
    }

    /// Build a new training set from the given rows of this one
    ///
    /// # Panics
    /// Panics if any index is out of range
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        let features = indices.iter().map(|&i| self.features[i].clone()).collect();
        let labels = indices.iter().map(|&i| self.labels[i]).collect();
        Self::new(features, labels)
    }

    /// Number of samples labelled +1
    pub fn n_positive(&self) -> usize {
        self.labels.iter().filter(|&&l| l > 0.0).count()
    }
}

impl Dataset for TrainingSet {
    fn len(&self) -> usize {
        self.features.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn features(&self, i: usize) -> &[f64] {
        &self.features[i]
    }

    fn label(&self, i: usize) -> f64 {
        self.labels[i]
    }

    fn labels(&self) -> Vec<f64> {
        self.labels.clone()
    }
}

/// Hyperparameters for the SMO solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SMOConfig {
    /// Regularization parameter (upper bound for alpha)
    pub c: f64,
    /// Tolerance for the KKT violation test
    pub tolerance: f64,
    /// Consecutive sweeps without any update before training stops
    pub max_passes: usize,
    /// Seed for second-index selection; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SMOConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 0.001,
            max_passes: 5,
            seed: None,
        }
    }
}

impl SMOConfig {
    /// Check that every hyperparameter is in its valid range
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "C must be positive and finite, got: {}",
                self.c
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "Tolerance must be positive and finite, got: {}",
                self.tolerance
            )));
        }
        if self.max_passes == 0 {
            return Err(SVMError::InvalidParameter(
                "max_passes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(SVMError::IoError)?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)
            .map_err(|e| SVMError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Result of optimization process
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    /// Lagrange multipliers (alpha values)
    pub alpha: Vec<f64>,
    /// Bias term (b)
    pub b: f64,
    /// Indices of support vectors (where alpha > 0)
    pub support_vectors: Vec<usize>,
    /// Number of full sweeps performed
    pub sweeps: usize,
    /// Number of successful pair updates
    pub updates: usize,
    /// Final dual objective value
    pub objective_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_training_set_creation() {
        let set = TrainingSet::new(
            vec![vec![1.0, 2.0], vec![2.0, 1.0]],
            vec![1.0, -1.0],
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.dim(), 2);
        assert_eq!(set.features(1), &[2.0, 1.0]);
        assert_eq!(set.label(0), 1.0);
        assert_eq!(set.labels(), vec![1.0, -1.0]);
        assert_eq!(set.n_positive(), 1);
    }

    #[test]
    fn test_training_set_rejects_bad_shapes() {
        assert!(matches!(
            TrainingSet::new(vec![], vec![]),
            Err(SVMError::EmptyDataset)
        ));
        assert!(matches!(
            TrainingSet::new(vec![vec![1.0]], vec![1.0, -1.0]),
            Err(SVMError::InvalidDataset(_))
        ));
        assert!(matches!(
            TrainingSet::new(vec![vec![1.0, 2.0], vec![1.0]], vec![1.0, -1.0]),
            Err(SVMError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            TrainingSet::new(vec![vec![f64::NAN], vec![1.0]], vec![1.0, -1.0]),
            Err(SVMError::InvalidDataset(_))
        ));
    }

    #[test]
    fn test_training_set_rejects_bad_labels() {
        let result = TrainingSet::new(vec![vec![1.0], vec![2.0]], vec![1.0, 0.0]);
        assert!(matches!(result, Err(SVMError::InvalidLabel(l)) if l == 0.0));
    }

    #[test]
    fn test_training_set_subset() {
        let set = TrainingSet::new(
            vec![vec![1.0], vec![2.0], vec![3.0]],
            vec![1.0, -1.0, 1.0],
        )
        .unwrap();

        let sub = set.subset(&[2, 0]).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.features(0), &[3.0]);
        assert_eq!(sub.labels(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_prediction() {
        let pred = Prediction::new(1.0, 2.5);
        assert_eq!(pred.label, 1.0);
        assert_eq!(pred.decision_value, 2.5);
        assert_eq!(pred.confidence(), 2.5);

        let neg_pred = Prediction::from_decision(-1.8);
        assert_eq!(neg_pred.label, -1.0);
        assert_eq!(neg_pred.confidence(), 1.8);
    }

    #[test]
    fn test_prediction_zero_is_positive() {
        assert_eq!(Prediction::from_decision(0.0).label, 1.0);
        assert_eq!(Prediction::from_decision(-0.0).label, 1.0);
    }

    #[test]
    fn test_config_default() {
        let config = SMOConfig::default();
        assert_eq!(config.c, 1.0);
        assert_eq!(config.tolerance, 0.001);
        assert_eq!(config.max_passes, 5);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let bad = [
            SMOConfig {
                c: 0.0,
                ..SMOConfig::default()
            },
            SMOConfig {
                c: f64::INFINITY,
                ..SMOConfig::default()
            },
            SMOConfig {
                tolerance: -1.0,
                ..SMOConfig::default()
            },
            SMOConfig {
                max_passes: 0,
                ..SMOConfig::default()
            },
        ];

        for config in &bad {
            assert!(matches!(
                config.validate(),
                Err(SVMError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_config_from_json_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, r#"{{ "c": 2.5, "max_passes": 10, "seed": 7 }}"#).expect("Failed to write");
        file.flush().expect("Failed to flush");

        let config = SMOConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.c, 2.5);
        assert_eq!(config.max_passes, 10);
        assert_eq!(config.seed, Some(7));
        // Missing field falls back to the default
        assert_eq!(config.tolerance, 0.001);
    }

    #[test]
    fn test_config_from_invalid_json_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "not json").expect("Failed to write");
        file.flush().expect("Failed to flush");

        assert!(matches!(
            SMOConfig::from_json_file(file.path()),
            Err(SVMError::SerializationError(_))
        ));

        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, r#"{{ "c": -1.0 }}"#).expect("Failed to write");
        file.flush().expect("Failed to flush");

        assert!(matches!(
            SMOConfig::from_json_file(file.path()),
            Err(SVMError::InvalidParameter(_))
        ));
    }
}
