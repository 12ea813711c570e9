use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One persisted work-shift payment.
///
/// `gross_pay` and `net_pay` are derived by the pay calculator and only
/// ever set together from the same input tuple; nothing updates them
/// independently. Under the simple policy `advance_amount` is zero and
/// `net_pay` equals `gross_pay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Day the record was entered (day/month/year on disk).
    pub date: NaiveDate,
    /// Employee name, stored title-cased.
    pub name: String,
    /// Role key into the rate table, after any fixed-employee override.
    pub role: String,
    pub days_worked: u32,
    /// Ad-hoc bonus entered for this record.
    pub extra_amount: Decimal,
    /// Free text explaining the bonus.
    pub extra_reason: String,
    /// Money already paid out before this computation.
    pub advance_amount: Decimal,
    /// Derived, rounded to 2 fractional digits.
    pub gross_pay: Decimal,
    /// Derived, rounded to 2 fractional digits, never negative.
    pub net_pay: Decimal,
}
