//! Reference tables for pay computation: the role → daily-rate table and
//! the fixed-employee override table.
//!
//! Both tables are fixed at configuration time; the store never mutates
//! them. Defaults carry the rates and staff the tool shipped with.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Normalizes an employee name for table lookup and record matching:
/// trimmed, lower-cased, inner whitespace runs collapsed to one space.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Title-cases a name for storage and display ("amiga eddie" → "Amiga Eddie").
pub fn title_case(name: &str) -> String {
    normalize_name(name)
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Role name → daily rate, in currency units per day worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<String, Decimal>,
}

impl RateTable {
    pub fn new(rates: BTreeMap<String, Decimal>) -> Self {
        Self { rates }
    }

    pub fn daily_rate(&self, role: &str) -> Option<Decimal> {
        self.rates.get(role).copied()
    }

    pub fn contains_role(&self, role: &str) -> bool {
        self.rates.contains_key(role)
    }

    /// Role names in sorted order, for pickers and help output.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        let rates = [
            ("gerente", 160),
            ("atendente", 120),
            ("cozinha", 100),
            ("bar", 200),
            ("churrasqueiro", 150),
            ("seguranca", 130),
        ]
        .into_iter()
        .map(|(role, rate)| (role.to_string(), Decimal::from(rate)))
        .collect();
        Self { rates }
    }
}

/// Employees whose role is predetermined: whatever role was entered for
/// them is replaced by this table's value at computation time.
///
/// Keys are stored normalized (see [`normalize_name`]); lookups normalize
/// the queried name the same way, so "  Eddie " matches "eddie".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FixedEmployees {
    overrides: BTreeMap<String, String>,
}

// Manual impl so keys coming from a config file are normalized the same
// way as programmatic ones.
impl<'de> Deserialize<'de> for FixedEmployees {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let overrides = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(Self::new(overrides))
    }
}

impl FixedEmployees {
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|(name, role)| (normalize_name(&name), role))
            .collect();
        Self { overrides }
    }

    /// Returns the fixed role for `name`, or `entered_role` unchanged when
    /// the employee is not in the table. Total: an empty entered role
    /// passes through and must be rejected by the caller before pricing.
    pub fn resolve(
        &self,
        name: &str,
        entered_role: &str,
    ) -> String {
        match self.overrides.get(&normalize_name(name)) {
            Some(fixed) => {
                if fixed != entered_role {
                    debug!(name, entered_role, fixed_role = %fixed, "fixed employee, role overridden");
                }
                fixed.clone()
            }
            None => entered_role.to_string(),
        }
    }

    /// The built-in staff list.
    pub fn builtin() -> Self {
        let overrides = [
            ("grace", "atendente"),
            ("cleria", "gerente"),
            ("lucas", "gerente"),
            ("emerson", "atendente"),
            ("livia", "atendente"),
            ("eli", "atendente"),
            ("andressa", "bar"),
            ("eddie", "cozinha"),
            ("amiga eddie", "cozinha"),
            ("anchieta", "churrasqueiro"),
        ]
        .into_iter()
        .map(|(name, role)| (name.to_string(), role.to_string()))
        .collect();
        Self { overrides }
    }
}
