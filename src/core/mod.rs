//! Core probe functionality
//!
//! - [`status`]: Firewall status model and the [`status::StatusSource`] query interface
//! - [`pfctl`]: `StatusSource` over the pf control device and `pfctl(8)`
//! - [`thresholds`]: Warning/critical threshold resolution and classification
//! - [`evaluator`]: Verdict and status line for one snapshot
//! - [`probe`]: Acquire, query, evaluate; failures become UNKNOWN
//! - [`verdict`]: Nagios verdicts and exit codes
//! - [`error`]: Error types whose messages are the UNKNOWN reasons

pub mod error;
pub mod evaluator;
pub mod pfctl;
pub mod probe;
pub mod status;
pub mod thresholds;
pub mod verdict;
