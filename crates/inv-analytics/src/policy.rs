//! Business thresholds used by the calculator

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("ABC thresholds must satisfy 0 < A ({a}) <= B ({b}) <= 100")]
    AbcThresholds { a: f64, b: f64 },

    #[error("expiry warning days must not be negative, got {0}")]
    NegativeWarningDays(i64),
}

/// Tunable thresholds; defaults match the dashboard's behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyticsPolicy {
    /// Cumulative value share (%) up to which products are class A
    pub abc_a_threshold: f64,
    /// Cumulative value share (%) up to which products are class B
    pub abc_b_threshold: f64,
    /// Days before expiry at which a product counts as expiring soon
    pub expiry_warning_days: i64,
}

impl Default for AnalyticsPolicy {
    fn default() -> Self {
        Self {
            abc_a_threshold: 70.0,
            abc_b_threshold: 90.0,
            expiry_warning_days: 3,
        }
    }
}

impl AnalyticsPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        let (a, b) = (self.abc_a_threshold, self.abc_b_threshold);
        if !(a > 0.0 && a <= b && b <= 100.0) {
            return Err(PolicyError::AbcThresholds { a, b });
        }
        if self.expiry_warning_days < 0 {
            return Err(PolicyError::NegativeWarningDays(self.expiry_warning_days));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AnalyticsPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let policy = AnalyticsPolicy {
            abc_a_threshold: 95.0,
            abc_b_threshold: 90.0,
            ..AnalyticsPolicy::default()
        };
        assert!(matches!(policy.validate(), Err(PolicyError::AbcThresholds { .. })));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let policy: AnalyticsPolicy = serde_json::from_str(r#"{"expiryWarningDays": 5}"#).unwrap();
        assert_eq!(policy.expiry_warning_days, 5);
        assert_eq!(policy.abc_a_threshold, 70.0);
    }
}
