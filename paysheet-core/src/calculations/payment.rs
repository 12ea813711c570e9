//! Work-shift pay computation.
//!
//! One record's pay is computed from four inputs against the configured
//! rate table, under the active [`PayPolicy`]:
//!
//! | Line | Simple | Extended |
//! |------|--------|----------|
//! | base | rate × days | rate × days |
//! | extra | + extra | + extra × 1.10 |
//! | gross | base + extra | base + extra |
//! | net | gross | max(gross − advance, 0) |
//!
//! Gross and net are rounded to two decimal places (half-up) and are always
//! produced together, so a stored record can never carry amounts computed
//! from different inputs.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paysheet_core::calculations::{PayCalculator, PayInput};
//! use paysheet_core::models::{PayPolicy, RateTable};
//!
//! let rates = RateTable::default();
//! let calculator = PayCalculator::new(&rates, PayPolicy::Extended);
//!
//! let amounts = calculator
//!     .calculate(&PayInput {
//!         role: "gerente".to_string(),
//!         days_worked: 2,
//!         extra_amount: dec!(100.00),
//!         advance_amount: dec!(0.00),
//!     })
//!     .unwrap();
//!
//! assert_eq!(amounts.gross_pay, dec!(460.00));
//! assert_eq!(amounts.net_pay, dec!(460.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{max, round_half_up};
use crate::models::{PayPolicy, RateTable};

/// Bonus uplift applied under the extended policy (10%).
const EXTRA_UPLIFT_FACTOR: Decimal = Decimal::from_parts(110, 0, 0, false, 2);

/// Errors that can occur while computing pay.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayError {
    /// The role has no daily rate configured. The caller must report it and
    /// leave the store unmodified.
    #[error("role '{0}' has no daily rate configured")]
    RoleNotFound(String),
}

/// The semantically validated inputs of one pay computation.
///
/// Field-level parsing (integer days, decimal amounts, non-empty role) is
/// the presentation boundary's job; by the time a `PayInput` exists the
/// values are well-typed and non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayInput {
    /// Role after any fixed-employee override.
    pub role: String,
    pub days_worked: u32,
    pub extra_amount: Decimal,
    /// Ignored under the simple policy.
    pub advance_amount: Decimal,
}

/// The derived money amounts for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayAmounts {
    /// Pay before deducting advances, rounded to 2 decimal places.
    pub gross_pay: Decimal,
    /// Gross minus advances, floored at zero, rounded to 2 decimal places.
    pub net_pay: Decimal,
}

/// Prices pay inputs against a rate table under a fixed policy.
#[derive(Debug, Clone)]
pub struct PayCalculator<'a> {
    rates: &'a RateTable,
    policy: PayPolicy,
}

impl<'a> PayCalculator<'a> {
    pub fn new(
        rates: &'a RateTable,
        policy: PayPolicy,
    ) -> Self {
        Self { rates, policy }
    }

    pub fn policy(&self) -> PayPolicy {
        self.policy
    }

    /// Computes gross and net pay for one record.
    ///
    /// # Errors
    ///
    /// Returns [`PayError::RoleNotFound`] if `input.role` is not a key of
    /// the rate table.
    pub fn calculate(
        &self,
        input: &PayInput,
    ) -> Result<PayAmounts, PayError> {
        let rate = self
            .rates
            .daily_rate(&input.role)
            .ok_or_else(|| PayError::RoleNotFound(input.role.clone()))?;

        let base = rate * Decimal::from(input.days_worked);
        let gross = round_half_up(base + self.extra_line(input.extra_amount));
        let net = self.net_line(gross, input.advance_amount);

        Ok(PayAmounts {
            gross_pay: gross,
            net_pay: net,
        })
    }

    /// The bonus contribution to gross pay. The extended policy uplifts the
    /// bonus by 10%; the uplift never touches the base daily pay.
    fn extra_line(
        &self,
        extra_amount: Decimal,
    ) -> Decimal {
        match self.policy {
            PayPolicy::Simple => extra_amount,
            PayPolicy::Extended => extra_amount * EXTRA_UPLIFT_FACTOR,
        }
    }

    /// Net pay: gross under the simple policy, gross minus the advance
    /// (floored at zero) under the extended policy.
    fn net_line(
        &self,
        gross: Decimal,
        advance_amount: Decimal,
    ) -> Decimal {
        match self.policy {
            PayPolicy::Simple => gross,
            PayPolicy::Extended => max(round_half_up(gross - advance_amount), Decimal::ZERO),
        }
    }
}
