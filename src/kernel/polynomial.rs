//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (γ * <x, y> + r)^d
//!
//! Where:
//! - γ (gamma): scaling factor for the dot product
//! - r (coef0): independent term in the polynomial
//! - d (degree): degree of the polynomial

use crate::kernel::traits::{dot, Kernel};

/// Polynomial kernel with configurable degree, gamma, and coefficient
#[derive(Debug, Clone)]
pub struct PolynomialKernel {
    /// Scaling factor for the dot product
    pub gamma: f64,
    /// Independent term in the polynomial
    pub coef0: f64,
    /// Degree of the polynomial
    pub degree: u32,
}

impl PolynomialKernel {
    /// Creates a new polynomial kernel with the specified parameters
    ///
    /// # Arguments
    /// * `degree` - Degree of the polynomial (must be > 0)
    /// * `gamma` - Scaling factor for the dot product (must be > 0)
    /// * `coef0` - Independent term in the polynomial
    ///
    /// # Examples
    /// ```
    /// use smosvm::kernel::PolynomialKernel;
    ///
    /// // Quadratic kernel: (x·y + 1)²
    /// let quad_kernel = PolynomialKernel::new(2, 1.0, 1.0);
    /// assert_eq!(quad_kernel.degree, 2);
    /// ```
    pub fn new(degree: u32, gamma: f64, coef0: f64) -> Self {
        assert!(degree > 0, "Polynomial degree must be positive");
        assert!(gamma > 0.0, "Gamma must be positive");

        Self {
            gamma,
            coef0,
            degree,
        }
    }

    /// Creates a quadratic kernel: (γ * <x,y> + 1)²
    pub fn quadratic(gamma: f64) -> Self {
        Self::new(2, gamma, 1.0)
    }

    /// Creates a polynomial kernel with gamma = 1.0 / n_features
    pub fn auto(degree: u32, n_features: usize) -> Self {
        assert!(n_features > 0, "Number of features must be positive");
        Self::new(degree, 1.0 / n_features as f64, 1.0)
    }
}

impl Kernel for PolynomialKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        (self.gamma * dot(x, y) + self.coef0).powi(self.degree as i32)
    }

    fn name(&self) -> &'static str {
        "polynomial"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial_kernel_creation() {
        let kernel = PolynomialKernel::new(3, 0.5, 1.0);
        assert_eq!(kernel.degree, 3);
        assert_eq!(kernel.gamma, 0.5);
        assert_eq!(kernel.coef0, 1.0);
    }

    #[test]
    fn test_quadratic_and_auto() {
        let kernel = PolynomialKernel::quadratic(2.0);
        assert_eq!(kernel.degree, 2);
        assert_eq!(kernel.coef0, 1.0);

        let kernel = PolynomialKernel::auto(2, 100);
        assert_eq!(kernel.gamma, 0.01);
    }

    #[test]
    fn test_polynomial_kernel_computation() {
        let kernel = PolynomialKernel::new(2, 1.0, 1.0);

        // Dot product: 1*2 + 2*1 = 4
        // Kernel: (1.0 * 4 + 1.0)² = 25
        assert_relative_eq!(kernel.compute(&[1.0, 2.0], &[2.0, 1.0]), 25.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polynomial_kernel_same_vector() {
        let kernel = PolynomialKernel::new(3, 0.5, 2.0);

        // Dot product: 3² + 4² = 25
        // Kernel: (0.5 * 25 + 2.0)³ = 14.5³ = 3048.625
        assert_relative_eq!(kernel.compute(&[3.0, 4.0], &[3.0, 4.0]), 3048.625, epsilon = 1e-6);
    }

    #[test]
    fn test_polynomial_kernel_odd_degree_keeps_sign() {
        let kernel = PolynomialKernel::new(3, 1.0, 0.0);

        // (-2)³ = -8
        assert_relative_eq!(kernel.compute(&[1.0], &[-2.0]), -8.0, epsilon = 1e-10);
    }

    #[test]
    #[should_panic(expected = "Polynomial degree must be positive")]
    fn test_invalid_degree() {
        PolynomialKernel::new(0, 1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "Gamma must be positive")]
    fn test_invalid_gamma() {
        PolynomialKernel::new(2, -1.0, 1.0);
    }
}
