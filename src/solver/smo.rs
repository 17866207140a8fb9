//! Sequential Minimal Optimization (SMO) solver implementation
//!
//! This is the simplified SMO variant: every sweep visits all samples in
//! index order, a KKT violator is paired with a second sample drawn
//! uniformly at random (not the maximum-|E_i - E_j| heuristic of full SMO),
//! and the pair is optimized analytically under the box constraints.
//! Training stops after `max_passes` consecutive sweeps without an update.

use crate::core::{Dataset, OptimizationResult, Result, SMOConfig, SVMError};
use crate::kernel::Kernel;
use crate::solver::convergence::{ConvergenceMonitor, SweepPhase};
use crate::solver::state::DualState;
use log::{debug, info, trace};
use rand::Rng;
use std::sync::Arc;

/// Changes of the second alpha smaller than this are treated as numerical noise
pub const MIN_ALPHA_CHANGE: f64 = 1e-5;

/// SMO solver for the soft-margin SVM dual
///
/// Solves the dual optimization problem by repeatedly optimizing pairs of
/// Lagrange multipliers (alpha values) until the patience rule is met.
pub struct SMOSolver<K: Kernel> {
    kernel: Arc<K>,
    config: SMOConfig,
}

impl<K: Kernel> SMOSolver<K> {
    /// Create a new SMO solver with the given kernel and configuration
    pub fn new(kernel: Arc<K>, config: SMOConfig) -> Self {
        Self { kernel, config }
    }

    /// Solver configuration
    pub fn config(&self) -> &SMOConfig {
        &self.config
    }

    /// Solve the dual problem on `dataset`
    ///
    /// `rng` drives the choice of the second index; a seeded generator makes
    /// the whole run reproducible. Returns the final dual state, which borrows
    /// `dataset`, together with run statistics.
    pub fn solve<'a, D, R>(
        &self,
        dataset: &'a D,
        rng: &mut R,
    ) -> Result<(DualState<'a, K, D>, OptimizationResult)>
    where
        D: Dataset,
        R: Rng + ?Sized,
    {
        self.config.validate()?;
        validate_training_set(dataset)?;

        let n = dataset.len();
        let mut state = DualState::new(Arc::clone(&self.kernel), dataset);
        let mut monitor = ConvergenceMonitor::new(self.config.max_passes);
        let mut updates = 0;

        while monitor.phase() == SweepPhase::Sweeping {
            let mut num_changed = 0;

            for i in 0..n {
                if self.examine_example(&mut state, i, rng) {
                    num_changed += 1;
                }
            }

            updates += num_changed;
            monitor.record_sweep(num_changed);
            debug!(
                "sweep {}: {} alphas changed, {}/{} quiet passes",
                monitor.sweeps(),
                num_changed,
                monitor.passes(),
                self.config.max_passes
            );
        }

        let support_vectors = state.support_vector_indices();
        let objective_value = state.objective_value();

        info!(
            "SMO finished after {} sweeps ({} updates, {} support vectors, objective {:.6})",
            monitor.sweeps(),
            updates,
            support_vectors.len(),
            objective_value
        );

        let result = OptimizationResult {
            alpha: state.alpha().to_vec(),
            b: state.bias(),
            support_vectors,
            sweeps: monitor.sweeps(),
            updates,
            objective_value,
        };

        Ok((state, result))
    }

    /// Examine sample `i` and, if it violates the KKT conditions, try one
    /// pairwise update with a randomly chosen partner.
    ///
    /// Returns true if the alphas changed.
    pub(crate) fn examine_example<D, R>(
        &self,
        state: &mut DualState<'_, K, D>,
        i: usize,
        rng: &mut R,
    ) -> bool
    where
        D: Dataset,
        R: Rng + ?Sized,
    {
        let y_i = state.dataset().label(i);
        let alpha_i = state.alpha[i];
        let e_i = state.error(i);

        let r_i = y_i * e_i;

        // KKT violation conditions:
        // - r_i < -tol and alpha_i < C (can increase alpha_i)
        // - r_i > tol and alpha_i > 0 (can decrease alpha_i)
        if (r_i < -self.config.tolerance && alpha_i < self.config.c)
            || (r_i > self.config.tolerance && alpha_i > 0.0)
        {
            let j = select_second_variable(i, state.len(), rng);
            return self.take_step(state, i, j, e_i);
        }

        false
    }

    /// Jointly optimize alpha[i] and alpha[j], given the current error `e_i`
    ///
    /// On every abort path the state is left untouched.
    pub(crate) fn take_step<D: Dataset>(
        &self,
        state: &mut DualState<'_, K, D>,
        i: usize,
        j: usize,
        e_i: f64,
    ) -> bool {
        if i == j {
            return false;
        }

        let c = self.config.c;
        let dataset = state.dataset();
        let y_i = dataset.label(i);
        let y_j = dataset.label(j);
        let alpha_i_old = state.alpha[i];
        let alpha_j_old = state.alpha[j];
        let e_j = state.error(j);

        // Bounds for the new alpha_j
        let (low, high) = if y_i != y_j {
            (
                0.0_f64.max(alpha_j_old - alpha_i_old),
                c.min(c + alpha_j_old - alpha_i_old),
            )
        } else {
            (
                0.0_f64.max(alpha_i_old + alpha_j_old - c),
                c.min(alpha_i_old + alpha_j_old),
            )
        };

        if low == high {
            trace!("pair ({i}, {j}) skipped: empty box L == H = {low}");
            return false;
        }

        let k_ii = state.kernel_value(i, i);
        let k_ij = state.kernel_value(i, j);
        let k_jj = state.kernel_value(j, j);

        let eta = 2.0 * k_ij - k_ii - k_jj;
        if eta >= 0.0 {
            trace!("pair ({i}, {j}) skipped: eta = {eta} >= 0");
            return false;
        }

        let alpha_j_new = (alpha_j_old - y_j * (e_i - e_j) / eta).clamp(low, high);

        if (alpha_j_new - alpha_j_old).abs() < MIN_ALPHA_CHANGE {
            trace!("pair ({i}, {j}) skipped: alpha change below threshold");
            return false;
        }

        // Rounding can push alpha_i a hair outside the box
        let alpha_i_new = (alpha_i_old + y_i * y_j * (alpha_j_old - alpha_j_new)).clamp(0.0, c);

        let delta_i = alpha_i_new - alpha_i_old;
        let delta_j = alpha_j_new - alpha_j_old;
        let b = state.bias;

        let b1 = b - e_i - y_i * delta_i * k_ii - y_j * delta_j * k_ij;
        let b2 = b - e_j - y_i * delta_i * k_ij - y_j * delta_j * k_jj;

        state.bias = if alpha_i_new > 0.0 && alpha_i_new < c {
            b1
        } else if alpha_j_new > 0.0 && alpha_j_new < c {
            b2
        } else {
            (b1 + b2) / 2.0
        };
        state.alpha[i] = alpha_i_new;
        state.alpha[j] = alpha_j_new;

        true
    }
}

/// Draw `j != i` uniformly from `0..n`
///
/// # Panics
/// Panics if `n < 2`
pub(crate) fn select_second_variable<R: Rng + ?Sized>(i: usize, n: usize, rng: &mut R) -> usize {
    let j = rng.gen_range(0..n - 1);
    if j >= i {
        j + 1
    } else {
        j
    }
}

/// Check the preconditions of `solve` on a training set
pub(crate) fn validate_training_set<D: Dataset>(dataset: &D) -> Result<()> {
    if dataset.is_empty() {
        return Err(SVMError::EmptyDataset);
    }
    if dataset.len() < 2 {
        return Err(SVMError::InvalidDataset(format!(
            "Dataset must contain at least 2 samples, got {}",
            dataset.len()
        )));
    }

    let dim = dataset.dim();
    for i in 0..dataset.len() {
        let label = dataset.label(i);
        if label != 1.0 && label != -1.0 {
            return Err(SVMError::InvalidLabel(label));
        }
        let actual = dataset.features(i).len();
        if actual != dim {
            return Err(SVMError::DimensionMismatch {
                expected: dim,
                actual,
            });
        }
    }

    Ok(())
}
