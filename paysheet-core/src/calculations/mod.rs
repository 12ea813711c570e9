//! Pay computation for work-shift records.
//!
//! Pure transformations over the configured reference tables; all state
//! lives in the record store.

pub mod common;
pub mod payment;

pub use payment::{PayAmounts, PayCalculator, PayError, PayInput};
