//! Turns a status snapshot and threshold overrides into a verdict and the
//! single status line printed for the monitoring system.

use std::fmt;

use tracing::debug;

use crate::core::error::Error;
use crate::core::status::StatusSnapshot;
use crate::core::thresholds::{ThresholdConfig, Thresholds};
use crate::core::verdict::Verdict;

#[derive(Debug, Clone, PartialEq)]
enum Detail {
    States {
        current_count: u64,
        hard_limit: u64,
        thresholds: Thresholds,
    },
    Disabled {
        current_count: u64,
        hard_limit: u64,
        thresholds: Thresholds,
    },
    Unknown(String),
}

/// Outcome of one probe run
///
/// `Display` renders the exact line written to stdout.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    verdict: Verdict,
    detail: Detail,
}

impl Report {
    /// UNKNOWN report carrying `reason` verbatim
    pub fn unknown(reason: impl fmt::Display) -> Self {
        Self {
            verdict: Verdict::Unknown,
            detail: Detail::Unknown(reason.to_string()),
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn exit_code(&self) -> u8 {
        self.verdict.exit_code()
    }

    /// Share of the state limit in use, for display only.
    ///
    /// `None` for UNKNOWN and disabled reports.
    pub fn percent_used(&self) -> Option<f64> {
        match &self.detail {
            Detail::States {
                current_count,
                hard_limit,
                ..
            } => Some(*current_count as f64 / *hard_limit as f64 * 100.0),
            Detail::Disabled { .. } | Detail::Unknown(_) => None,
        }
    }

    /// Nagios performance data: `states=<count>;<warn>;<crit>;0;<limit>`
    pub fn perfdata(&self) -> Option<String> {
        match &self.detail {
            Detail::States {
                current_count,
                hard_limit,
                thresholds,
            }
            | Detail::Disabled {
                current_count,
                hard_limit,
                thresholds,
            } => Some(format!(
                "states={};{};{};0;{}",
                current_count,
                thresholds.warning(),
                thresholds.critical(),
                hard_limit
            )),
            Detail::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PF {} - ", self.verdict)?;
        match &self.detail {
            Detail::States {
                current_count,
                hard_limit,
                ..
            } => {
                let percent = self.percent_used().unwrap_or_default();
                write!(
                    f,
                    "states: {current_count} ({percent:.1}% - limit: {hard_limit})"
                )?;
            }
            Detail::Disabled { .. } => f.write_str("status: Disabled")?,
            Detail::Unknown(reason) => return f.write_str(reason),
        }
        if let Some(perfdata) = self.perfdata() {
            write!(f, " | {perfdata}")?;
        }
        Ok(())
    }
}

/// Classifies `snapshot` against the resolved thresholds.
///
/// Order of guards: threshold validation, firewall disabled, zero limit,
/// then the raw count against critical and warning. The percentage never
/// takes part in the decision.
pub fn evaluate(snapshot: &StatusSnapshot, config: &ThresholdConfig) -> Report {
    let thresholds = match config.resolve(snapshot.hard_limit) {
        Ok(thresholds) => thresholds,
        Err(e) => {
            debug!(?config, hard_limit = snapshot.hard_limit, "Degenerate thresholds");
            return Report::unknown(e);
        }
    };

    let StatusSnapshot {
        enabled,
        current_count,
        hard_limit,
    } = *snapshot;

    if !enabled {
        return Report {
            verdict: Verdict::Critical,
            detail: Detail::Disabled {
                current_count,
                hard_limit,
                thresholds,
            },
        };
    }

    // Explicit thresholds can validate against a zero limit
    if hard_limit == 0 {
        return Report::unknown(Error::ZeroLimit);
    }

    let verdict = thresholds.classify(current_count);
    debug!(
        %verdict,
        current_count,
        warning = thresholds.warning(),
        critical = thresholds.critical(),
        "Classified state count"
    );

    Report {
        verdict,
        detail: Detail::States {
            current_count,
            hard_limit,
            thresholds,
        },
    }
}
