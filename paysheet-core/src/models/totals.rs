use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PaymentRecord;

/// Sheet-level money aggregate: the sums rendered under the record list.
///
/// All zeros for an empty store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub gross_sum: Decimal,
    pub net_sum: Decimal,
    pub advance_sum: Decimal,
}

impl Totals {
    pub fn accumulate(
        &mut self,
        record: &PaymentRecord,
    ) {
        self.gross_sum += record.gross_pay;
        self.net_sum += record.net_pay;
        self.advance_sum += record.advance_amount;
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PaymentRecord>,
    {
        let mut totals = Self::default();
        for record in records {
            totals.accumulate(record);
        }
        totals
    }
}
