//! In-memory ordered collection of payment records.
//!
//! The store is the application's only state: an ordered sequence mutated
//! by discrete add/edit/delete operations, loaded whole from the sheet
//! file at startup and written back whole on save. Record identity is the
//! position in the sequence; removing a record shifts everything after it
//! down by one.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{PayPolicy, PaymentRecord, Totals, normalize_name};
use crate::store::sheet::{self, SheetError};

/// Errors raised by positional store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Edit or delete addressed a position that does not exist. Nothing
    /// was mutated.
    #[error("no record at index {index} (store holds {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Reporting granularity for [`RecordStore::group_by_period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    /// Stable, lexically sortable label for the period containing `date`:
    /// `YYYY-MM` for months, ISO `YYYY-Www` for weeks.
    pub fn label_for(
        &self,
        date: NaiveDate,
    ) -> String {
        match self {
            Self::Month => format!("{:04}-{:02}", date.year(), date.month()),
            Self::Week => {
                let iso = date.iso_week();
                format!("{:04}-W{:02}", iso.year(), iso.week())
            }
        }
    }
}

/// The ordered payment-record collection and its sheet policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    policy: PayPolicy,
    records: Vec<PaymentRecord>,
}

impl RecordStore {
    /// An empty store under the given policy.
    pub fn new(policy: PayPolicy) -> Self {
        Self {
            policy,
            records: Vec::new(),
        }
    }

    /// Load the store from the sheet file at `path`. A missing file yields
    /// an empty store; an existing file that cannot be mapped to the
    /// schema is an error and the file is left alone.
    pub fn load(
        path: &Path,
        policy: PayPolicy,
    ) -> Result<Self, SheetError> {
        let records = sheet::read_sheet(path)?;
        info!(
            path = %path.display(),
            count = records.len(),
            policy = policy.as_str(),
            "sheet loaded"
        );
        Ok(Self { policy, records })
    }

    /// Write the full sequence to `path`, overwriting the previous sheet.
    /// On failure the in-memory store and the prior file are both intact.
    pub fn save(
        &self,
        path: &Path,
    ) -> Result<(), SheetError> {
        sheet::write_sheet(path, self.policy, &self.records)?;
        info!(path = %path.display(), count = self.records.len(), "sheet saved");
        Ok(())
    }

    pub fn policy(&self) -> PayPolicy {
        self.policy
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(
        &self,
        index: usize,
    ) -> Option<&PaymentRecord> {
        self.records.get(index)
    }

    /// Append a record at the end. Duplicates are allowed; the sheet is a
    /// journal of entries, not a keyed table.
    pub fn append(
        &mut self,
        record: PaymentRecord,
    ) {
        debug!(name = %record.name, gross = %record.gross_pay, "record appended");
        self.records.push(record);
    }

    /// Replace the record at `index`.
    pub fn update_at(
        &mut self,
        index: usize,
        record: PaymentRecord,
    ) -> Result<(), StoreError> {
        let len = self.records.len();
        match self.records.get_mut(index) {
            Some(slot) => {
                *slot = record;
                debug!(index, "record updated");
                Ok(())
            }
            None => Err(StoreError::IndexOutOfBounds { index, len }),
        }
    }

    /// Remove and return the record at `index`, shifting later records
    /// back by one position.
    pub fn remove_at(
        &mut self,
        index: usize,
    ) -> Result<PaymentRecord, StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.records.len(),
            });
        }
        debug!(index, "record removed");
        Ok(self.records.remove(index))
    }

    /// Sum of gross, net and advance amounts across all records.
    pub fn totals(&self) -> Totals {
        Totals::from_records(&self.records)
    }

    /// Records whose normalized name equals the normalized query name, in
    /// store order. Empty when none match.
    pub fn records_for_name(
        &self,
        name: &str,
    ) -> Vec<&PaymentRecord> {
        let wanted = normalize_name(name);
        self.records
            .iter()
            .filter(|r| normalize_name(&r.name) == wanted)
            .collect()
    }

    /// Records entered on `date`, in store order.
    pub fn records_for_date(
        &self,
        date: NaiveDate,
    ) -> Vec<&PaymentRecord> {
        self.records.iter().filter(|r| r.date == date).collect()
    }

    /// Unique dates present in the store, ascending.
    pub fn distinct_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.records.iter().map(|r| r.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    /// Money totals grouped by calendar period. The map iterates in label
    /// order, which for both label formats is chronological order.
    pub fn group_by_period(
        &self,
        period: Period,
    ) -> BTreeMap<String, Totals> {
        let mut groups: BTreeMap<String, Totals> = BTreeMap::new();
        for record in &self.records {
            groups
                .entry(period.label_for(record.date))
                .or_default()
                .accumulate(record);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use rust_decimal::Decimal;

    use super::*;

    fn date(
        day: u32,
        month: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn record(
        name: &str,
        on: NaiveDate,
        gross: Decimal,
        net: Decimal,
        advance: Decimal,
    ) -> PaymentRecord {
        PaymentRecord {
            date: on,
            name: name.to_string(),
            role: "bar".to_string(),
            days_worked: 1,
            extra_amount: dec!(0),
            extra_reason: String::new(),
            advance_amount: advance,
            gross_pay: gross,
            net_pay: net,
        }
    }

    fn three_record_store() -> RecordStore {
        let mut store = RecordStore::new(PayPolicy::Extended);
        store.append(record("Grace", date(1, 3), dec!(120.00), dec!(120.00), dec!(0)));
        store.append(record("Eddie", date(1, 3), dec!(300.00), dec!(250.00), dec!(50.00)));
        store.append(record("Andressa", date(2, 3), dec!(400.00), dec!(400.00), dec!(0)));
        store
    }

    // =========================================================================
    // Positional operations
    // =========================================================================

    #[test]
    fn append_preserves_insertion_order_and_duplicates() {
        let mut store = RecordStore::new(PayPolicy::Simple);
        let r = record("Grace", date(1, 3), dec!(120.00), dec!(120.00), dec!(0));
        store.append(r.clone());
        store.append(r.clone());

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0], store.records()[1]);
    }

    #[test]
    fn update_at_replaces_only_the_addressed_record() {
        let mut store = three_record_store();
        let replacement = record("Lucas", date(3, 3), dec!(160.00), dec!(160.00), dec!(0));

        store.update_at(1, replacement.clone()).unwrap();

        assert_eq!(store.records()[1], replacement);
        assert_eq!(store.records()[0].name, "Grace");
        assert_eq!(store.records()[2].name, "Andressa");
    }

    #[test]
    fn update_at_out_of_bounds_leaves_store_unchanged() {
        let mut store = three_record_store();
        let before = store.clone();
        let replacement = record("Lucas", date(3, 3), dec!(160.00), dec!(160.00), dec!(0));

        let result = store.update_at(3, replacement);

        assert_eq!(result, Err(StoreError::IndexOutOfBounds { index: 3, len: 3 }));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_at_shifts_later_records_down() {
        let mut store = three_record_store();

        let removed = store.remove_at(1).unwrap();

        assert_eq!(removed.name, "Eddie");
        assert_eq!(store.len(), 2);
        // The former index-2 record is now addressable at index 1.
        assert_eq!(store.get(1).unwrap().name, "Andressa");
        assert_eq!(store.totals().gross_sum, dec!(520.00));
    }

    #[test]
    fn remove_at_out_of_bounds_is_an_error() {
        let mut store = RecordStore::new(PayPolicy::Simple);

        let result = store.remove_at(0);

        assert_eq!(result, Err(StoreError::IndexOutOfBounds { index: 0, len: 0 }));
    }

    // =========================================================================
    // Aggregates and queries
    // =========================================================================

    #[test]
    fn totals_of_empty_store_are_zero() {
        let store = RecordStore::new(PayPolicy::Extended);

        assert_eq!(store.totals(), Totals::default());
    }

    #[test]
    fn totals_sum_every_money_column() {
        let store = three_record_store();

        let totals = store.totals();

        assert_eq!(totals.gross_sum, dec!(820.00));
        assert_eq!(totals.net_sum, dec!(770.00));
        assert_eq!(totals.advance_sum, dec!(50.00));
    }

    #[test]
    fn totals_stay_additive_across_mutations() {
        let mut store = three_record_store();
        store.remove_at(0).unwrap();
        store.append(record("Livia", date(5, 3), dec!(240.00), dec!(200.00), dec!(40.00)));
        store
            .update_at(0, record("Eli", date(5, 3), dec!(100.00), dec!(100.00), dec!(0)))
            .unwrap();

        let expected_gross: Decimal = store.records().iter().map(|r| r.gross_pay).sum();
        let expected_net: Decimal = store.records().iter().map(|r| r.net_pay).sum();
        let expected_advance: Decimal = store.records().iter().map(|r| r.advance_amount).sum();

        let totals = store.totals();
        assert_eq!(totals.gross_sum, expected_gross);
        assert_eq!(totals.net_sum, expected_net);
        assert_eq!(totals.advance_sum, expected_advance);
    }

    #[test]
    fn records_for_name_matches_normalized() {
        let store = three_record_store();

        let found = store.records_for_name("  eddie ");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Eddie");
        assert!(store.records_for_name("marina").is_empty());
    }

    #[test]
    fn records_for_date_filters_exact_day() {
        let store = three_record_store();

        assert_eq!(store.records_for_date(date(1, 3)).len(), 2);
        assert_eq!(store.records_for_date(date(2, 3)).len(), 1);
        assert!(store.records_for_date(date(9, 3)).is_empty());
    }

    #[test]
    fn distinct_dates_are_sorted_and_unique() {
        let mut store = three_record_store();
        store.append(record("Cleria", date(1, 2), dec!(160.00), dec!(160.00), dec!(0)));

        assert_eq!(store.distinct_dates(), vec![date(1, 2), date(1, 3), date(2, 3)]);
    }

    // =========================================================================
    // Period grouping
    // =========================================================================

    #[test]
    fn month_labels_are_stable_and_sortable() {
        assert_eq!(Period::Month.label_for(date(14, 3)), "2025-03");
        assert_eq!(Period::Month.label_for(date(1, 12)), "2025-12");
    }

    #[test]
    fn week_labels_use_iso_weeks() {
        // 2025-03-14 is a Friday in ISO week 11.
        assert_eq!(Period::Week.label_for(date(14, 3)), "2025-W11");
        // Jan 1st 2027 belongs to ISO week 53 of 2026.
        let new_year = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        assert_eq!(Period::Week.label_for(new_year), "2026-W53");
    }

    #[test]
    fn group_by_month_sums_each_bucket() {
        let mut store = three_record_store();
        store.append(record("Cleria", date(10, 4), dec!(160.00), dec!(160.00), dec!(0)));

        let groups = store.group_by_period(Period::Month);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["2025-03"].gross_sum, dec!(820.00));
        assert_eq!(groups["2025-04"].gross_sum, dec!(160.00));

        let labels: Vec<&String> = groups.keys().collect();
        assert_eq!(labels, vec!["2025-03", "2025-04"]);
    }

    #[test]
    fn group_by_week_splits_on_iso_week_boundaries() {
        let mut store = RecordStore::new(PayPolicy::Extended);
        // Sunday 2025-03-09 (week 10) and Monday 2025-03-10 (week 11).
        store.append(record("Grace", date(9, 3), dec!(120.00), dec!(120.00), dec!(0)));
        store.append(record("Grace", date(10, 3), dec!(120.00), dec!(120.00), dec!(0)));

        let groups = store.group_by_period(Period::Week);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["2025-W10"].gross_sum, dec!(120.00));
        assert_eq!(groups["2025-W11"].gross_sum, dec!(120.00));
    }

    #[test]
    fn period_parse_round_trips_with_as_str() {
        for period in [Period::Week, Period::Month] {
            assert_eq!(Period::parse(period.as_str()), Some(period));
        }
        assert_eq!(Period::parse("quarter"), None);
    }
}
