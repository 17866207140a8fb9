//! SMO solver
//!
//! The dual model state, the pairwise update step and the patience-based
//! sweep loop of the simplified Sequential Minimal Optimization algorithm.

pub mod convergence;
pub mod smo;
pub mod state;

pub use self::convergence::*;
pub use self::smo::*;
pub use self::state::*;
