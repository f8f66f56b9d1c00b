//! Firewall status model and the query interface the probe reads it through

use crate::core::error::Result;

/// Result of the status query alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PfStatus {
    pub enabled: bool,
    pub current_count: u64,
}

/// Everything the evaluator needs, gathered once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub enabled: bool,
    pub current_count: u64,
    pub hard_limit: u64,
}

impl StatusSnapshot {
    pub fn new(status: PfStatus, hard_limit: u64) -> Self {
        Self {
            enabled: status.enabled,
            current_count: status.current_count,
            hard_limit,
        }
    }
}

/// Read-only queries against the host firewall
///
/// Implementations hold whatever handle they acquired for as long as they
/// live; dropping the source releases it.
pub trait StatusSource {
    /// Whether the firewall is running and how many states it currently tracks.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` with `QueryStep::Status` if the read fails.
    fn status(&self) -> Result<PfStatus>;

    /// Hard limit on the number of state table entries.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` with `QueryStep::StateLimit` if the read fails.
    fn state_limit(&self) -> Result<u64>;
}
