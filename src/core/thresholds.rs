//! Warning/critical threshold resolution
//!
//! Operators may pin either threshold with `-w`/`-c`. Whatever is left open is
//! derived from the firewall's hard state limit, so a host whose limit is
//! raised does not need its check definition touched.

use crate::core::error::{Error, Result};
use crate::core::verdict::Verdict;

/// Default warning threshold, as a percentage of the state limit
pub const DEFAULT_WARN_PERCENT: u64 = 80;

/// Default critical threshold, as a percentage of the state limit
pub const DEFAULT_CRIT_PERCENT: u64 = 90;

/// Operator-supplied threshold overrides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdConfig {
    pub warning: Option<u64>,
    pub critical: Option<u64>,
}

impl ThresholdConfig {
    pub fn new(warning: Option<u64>, critical: Option<u64>) -> Self {
        Self { warning, critical }
    }

    /// Fills in missing thresholds from `hard_limit` and validates the pair.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvertedThresholds` if the resolved warning threshold is
    /// not strictly below the critical one. A zero limit with no overrides
    /// always ends up here (0/0).
    pub fn resolve(&self, hard_limit: u64) -> Result<Thresholds> {
        let warning = self
            .warning
            .unwrap_or_else(|| percent_of(hard_limit, DEFAULT_WARN_PERCENT));
        let critical = self
            .critical
            .unwrap_or_else(|| percent_of(hard_limit, DEFAULT_CRIT_PERCENT));
        Thresholds::new(warning, critical)
    }

    /// Rejects an explicitly inverted pair without needing the state limit.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvertedThresholds` when both overrides are present and
    /// `warning >= critical`.
    pub fn check_overrides(&self) -> Result<()> {
        match (self.warning, self.critical) {
            (Some(warning), Some(critical)) => Thresholds::new(warning, critical).map(|_| ()),
            _ => Ok(()),
        }
    }
}

/// `limit * percent / 100`, truncating.
///
/// Widened so a limit near `u64::MAX` cannot overflow the multiplication.
pub fn percent_of(limit: u64, percent: u64) -> u64 {
    let scaled = u128::from(limit) * u128::from(percent) / 100;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// A validated threshold pair; `warning < critical` always holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    warning: u64,
    critical: u64,
}

impl Thresholds {
    /// # Errors
    ///
    /// Returns `Error::InvertedThresholds` if `warning >= critical`.
    pub fn new(warning: u64, critical: u64) -> Result<Self> {
        if warning >= critical {
            return Err(Error::InvertedThresholds { warning, critical });
        }
        Ok(Self { warning, critical })
    }

    pub fn warning(&self) -> u64 {
        self.warning
    }

    pub fn critical(&self) -> u64 {
        self.critical
    }

    /// Classifies a raw state count. Only the enabled-firewall verdicts are
    /// produced here.
    pub fn classify(&self, current_count: u64) -> Verdict {
        if current_count >= self.critical {
            Verdict::Critical
        } else if current_count >= self.warning {
            Verdict::Warning
        } else {
            Verdict::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_from_limit() {
        let t = ThresholdConfig::default().resolve(10_000).unwrap();
        assert_eq!(t.warning(), 8_000);
        assert_eq!(t.critical(), 9_000);
    }

    #[test]
    fn test_defaults_truncate() {
        // 80% of 15 = 12, 90% of 15 = 13.5 -> 13
        let t = ThresholdConfig::default().resolve(15).unwrap();
        assert_eq!(t.warning(), 12);
        assert_eq!(t.critical(), 13);
    }

    #[test]
    fn test_zero_limit_defaults_are_degenerate() {
        let err = ThresholdConfig::default().resolve(0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvertedThresholds {
                warning: 0,
                critical: 0
            }
        ));
    }

    #[test]
    fn test_small_limit_collapses_thresholds() {
        // 80% and 90% of 5 both truncate to 4
        assert!(ThresholdConfig::default().resolve(5).is_err());
    }

    #[test]
    fn test_override_mixes_with_default() {
        let t = ThresholdConfig::new(Some(100), None).resolve(10_000).unwrap();
        assert_eq!(t.warning(), 100);
        assert_eq!(t.critical(), 9_000);

        let t = ThresholdConfig::new(None, Some(9_500)).resolve(10_000).unwrap();
        assert_eq!(t.warning(), 8_000);
        assert_eq!(t.critical(), 9_500);
    }

    #[test]
    fn test_override_above_default_critical_is_inverted() {
        let err = ThresholdConfig::new(Some(9_500), None)
            .resolve(10_000)
            .unwrap_err();
        assert!(matches!(err, Error::InvertedThresholds { .. }));
    }

    #[test]
    fn test_equal_thresholds_rejected() {
        assert!(Thresholds::new(50, 50).is_err());
        assert!(Thresholds::new(49, 50).is_ok());
    }

    #[test]
    fn test_check_overrides() {
        assert!(ThresholdConfig::new(Some(100), Some(50)).check_overrides().is_err());
        assert!(ThresholdConfig::new(Some(50), Some(50)).check_overrides().is_err());
        assert!(ThresholdConfig::new(Some(50), Some(100)).check_overrides().is_ok());
        // A lone override can only be judged against the limit
        assert!(ThresholdConfig::new(Some(u64::MAX), None).check_overrides().is_ok());
        assert!(ThresholdConfig::default().check_overrides().is_ok());
    }

    #[test]
    fn test_percent_of_huge_limit() {
        assert_eq!(percent_of(u64::MAX, 100), u64::MAX);
        assert!(percent_of(u64::MAX, 90) < u64::MAX);
    }

    #[test]
    fn test_classify_boundaries() {
        let t = Thresholds::new(8_000, 9_000).unwrap();
        assert_eq!(t.classify(0), Verdict::Ok);
        assert_eq!(t.classify(7_999), Verdict::Ok);
        assert_eq!(t.classify(8_000), Verdict::Warning);
        assert_eq!(t.classify(8_999), Verdict::Warning);
        assert_eq!(t.classify(9_000), Verdict::Critical);
        assert_eq!(t.classify(u64::MAX), Verdict::Critical);
    }

    proptest! {
        #[test]
        fn test_defaults_match_integer_formula(limit in 1u64..=u64::from(u32::MAX)) {
            let warning = limit * 80 / 100;
            let critical = limit * 90 / 100;
            match ThresholdConfig::default().resolve(limit) {
                Ok(t) => {
                    prop_assert_eq!(t.warning(), warning);
                    prop_assert_eq!(t.critical(), critical);
                }
                Err(_) => prop_assert!(warning >= critical),
            }
        }

        #[test]
        fn test_classify_matches_guards(
            warning in 0u64..1_000_000,
            gap in 1u64..1_000_000,
            count in 0u64..3_000_000,
        ) {
            let critical = warning + gap;
            let t = Thresholds::new(warning, critical).unwrap();
            let expected = if count >= critical {
                Verdict::Critical
            } else if count >= warning {
                Verdict::Warning
            } else {
                Verdict::Ok
            };
            prop_assert_eq!(t.classify(count), expected);
        }

        #[test]
        fn test_classify_monotonic(
            warning in 0u64..1_000_000,
            gap in 1u64..1_000_000,
            count in 0u64..3_000_000,
            extra in 0u64..1_000_000,
        ) {
            let t = Thresholds::new(warning, warning + gap).unwrap();
            prop_assert!(t.classify(count) <= t.classify(count + extra));
        }

        #[test]
        fn test_inverted_pairs_rejected(critical in any::<u64>(), below in any::<u64>()) {
            let warning = critical.saturating_add(below % 1_000);
            prop_assert!(Thresholds::new(warning, critical).is_err());
        }
    }
}
