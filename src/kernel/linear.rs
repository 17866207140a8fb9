//! Linear kernel implementation

use crate::kernel::traits::{dot, Kernel};

/// Linear kernel: K(x, y) = x^T * y
///
/// The default kernel. The decision function of a linear model is a plain
/// hyperplane in the input space.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearKernel;

impl LinearKernel {
    /// Create a new linear kernel
    pub fn new() -> Self {
        Self
    }
}

impl Kernel for LinearKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        dot(x, y)
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}
