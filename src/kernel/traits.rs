//! Kernel trait definition

/// Kernel function trait
///
/// A kernel function K(x, y) must be symmetric (and should satisfy Mercer's
/// condition) to be valid for the dual problem. The solver only ever calls
/// [`Kernel::compute`], so any implementation can be swapped in without
/// touching the optimization code.
///
/// Both arguments must have the same length. Dimension checks are done by
/// the callers (`fit` / `predict`), kernels only `debug_assert` it.
pub trait Kernel: Send + Sync {
    /// Compute kernel value K(x, y)
    fn compute(&self, x: &[f64], y: &[f64]) -> f64;

    /// Short, stable name used in logs and training reports
    fn name(&self) -> &'static str;
}

/// Dot product of two equal-length vectors
pub(crate) fn dot(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len(), "kernel inputs must have equal length");
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}
