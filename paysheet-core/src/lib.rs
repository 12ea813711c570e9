//! Core library for the paysheet tool: payment records, role-based pay
//! computation, and CSV sheet persistence.

pub mod calculations;
pub mod config;
pub mod models;
pub mod store;

pub use calculations::{PayAmounts, PayCalculator, PayError, PayInput};
pub use config::{ConfigError, PaysheetConfig};
pub use models::*;
pub use store::{Period, RecordStore, SheetError, StoreError};
