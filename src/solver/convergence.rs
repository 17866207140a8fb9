//! Patience-based stopping rule for the SMO sweep loop
//!
//! Training is SWEEPING until `max_passes` consecutive full sweeps make no
//! update, then it is CONVERGED. This is not a check of the KKT conditions:
//! with random pairing a sweep can miss an improving pair, so the result is
//! approximate and the number of sweeps varies from run to run.

/// Phase of the training loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepPhase {
    Sweeping,
    Converged,
}

/// Counts consecutive sweeps without any update
#[derive(Debug, Clone)]
pub struct ConvergenceMonitor {
    max_passes: usize,
    passes: usize,
    sweeps: usize,
}

impl ConvergenceMonitor {
    pub fn new(max_passes: usize) -> Self {
        Self {
            max_passes,
            passes: 0,
            sweeps: 0,
        }
    }

    /// Record the number of pair updates made by one full sweep
    pub fn record_sweep(&mut self, changed: usize) -> SweepPhase {
        self.sweeps += 1;
        if changed == 0 {
            self.passes += 1;
        } else {
            self.passes = 0;
        }
        self.phase()
    }

    pub fn phase(&self) -> SweepPhase {
        if self.passes >= self.max_passes {
            SweepPhase::Converged
        } else {
            SweepPhase::Sweeping
        }
    }

    /// Consecutive no-change sweeps so far
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Total sweeps recorded
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }
}
