// src/application/failure.rs
use serde::{Deserialize, Serialize};

/// What a failed manager operation does besides logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Return the error and record it in the view.
    #[default]
    Propagate,
    /// Record it in the view and return normally.
    Notify,
    /// Log only.
    Silent,
}

impl FailurePolicy {
    pub fn records(self) -> bool {
        matches!(self, FailurePolicy::Propagate | FailurePolicy::Notify)
    }

    pub fn returns_error(self) -> bool {
        self == FailurePolicy::Propagate
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "propagate" => Ok(FailurePolicy::Propagate),
            "notify" => Ok(FailurePolicy::Notify),
            "silent" => Ok(FailurePolicy::Silent),
            other => Err(format!("unknown failure policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("propagate", FailurePolicy::Propagate)]
    #[case("Notify", FailurePolicy::Notify)]
    #[case("SILENT", FailurePolicy::Silent)]
    fn test_parse_failure_policy(#[case] input: &str, #[case] expected: FailurePolicy) {
        assert_eq!(input.parse::<FailurePolicy>(), Ok(expected));
    }

    #[test]
    fn given_unknown_policy_when_parsing_then_fails() {
        assert!("retry".parse::<FailurePolicy>().is_err());
    }
}
