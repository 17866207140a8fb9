//! Data loading
//!
//! Dense CSV files are the only supported on-disk format.

pub mod csv;

pub use self::csv::*;
