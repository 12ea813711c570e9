use serde::{Deserialize, Serialize};

/// Which pay formula and sheet schema the application runs with.
///
/// Both variants exist in deployed sheets; the policy is an explicit
/// configuration value and is never inferred from file contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPolicy {
    /// `gross = rate × days + extra`, no advance concept, `net = gross`.
    #[default]
    Simple,
    /// `gross = rate × days + extra × 1.10`, `net = max(gross − advance, 0)`.
    Extended,
}

impl PayPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Extended => "extended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "simple" => Some(Self::Simple),
            "extended" => Some(Self::Extended),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_with_as_str() {
        for policy in [PayPolicy::Simple, PayPolicy::Extended] {
            assert_eq!(PayPolicy::parse(policy.as_str()), Some(policy));
        }
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(PayPolicy::parse("Extended"), None);
        assert_eq!(PayPolicy::parse(""), None);
    }
}
