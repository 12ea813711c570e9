mod pay_policy;
mod payment_record;
mod rate_table;
mod totals;

pub use pay_policy::PayPolicy;
pub use payment_record::PaymentRecord;
pub use rate_table::{FixedEmployees, RateTable, normalize_name, title_case};
pub use totals::Totals;
