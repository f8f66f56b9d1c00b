//! check_pf - Nagios plugin for pf(4)
//!
//! Reports whether pf is enabled and how full its state table is, as a single
//! status line with performance data and a Nagios exit code.
//!
//! # Architecture
//!
//! - [`core`] - Status source, threshold policy, evaluation and the probe run
//! - [`validators`] - Threshold flag parsing
//!
//! # Example
//!
//! ```
//! use check_pf::{StatusSnapshot, ThresholdConfig, Verdict, evaluate};
//!
//! let snapshot = StatusSnapshot { enabled: true, current_count: 8500, hard_limit: 10000 };
//! let report = evaluate(&snapshot, &ThresholdConfig::default());
//! assert_eq!(report.verdict(), Verdict::Warning);
//! ```

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod core;
pub mod validators;

// Re-export commonly used types
pub use crate::core::error::{Error, Result};
pub use crate::core::evaluator::{Report, evaluate};
pub use crate::core::pfctl::{PfctlConfig, PfctlSource};
pub use crate::core::probe::probe;
pub use crate::core::status::{PfStatus, StatusSnapshot, StatusSource};
pub use crate::core::thresholds::{ThresholdConfig, Thresholds};
pub use crate::core::verdict::Verdict;
