use std::path::PathBuf;
use thiserror::Error;

/// Query steps performed against the firewall, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum QueryStep {
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "state limit")]
    StateLimit,
}

/// Core error types for check_pf
///
/// The `Display` text of every variant is the reason printed after
/// `PF UNKNOWN - `, so keep them short and on one line.
#[derive(Debug, Error)]
pub enum Error {
    /// The firewall control device could not be acquired
    #[error("open(\"{}\") failed", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A read-only query against the firewall failed
    #[error("{step} query failed: {message}")]
    Query { step: QueryStep, message: String },

    /// A threshold flag did not hold a non-negative integer
    #[error("-{flag} is {reason}: {value}")]
    InvalidThreshold {
        flag: char,
        reason: &'static str,
        value: String,
    },

    /// Resolved warning threshold is not strictly below the critical one
    #[error("<warning> must be less than <critical>")]
    InvertedThresholds { warning: u64, critical: u64 },

    /// The firewall reports a state limit of zero
    #[error("state limit is 0")]
    ZeroLimit,
}

impl Error {
    pub(crate) fn query(step: QueryStep, message: impl Into<String>) -> Self {
        Self::Query {
            step,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
