pub mod record_store;
pub mod sheet;

pub use record_store::{Period, RecordStore, StoreError};
pub use sheet::SheetError;
