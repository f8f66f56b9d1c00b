//! One read-evaluate cycle against a status source
//!
//! Every failure on the way to a snapshot becomes an UNKNOWN report; the
//! source is dropped before `probe` returns on every path.

use tracing::{info, warn};

use crate::core::error::{Error, Result};
use crate::core::evaluator::{Report, evaluate};
use crate::core::status::{StatusSnapshot, StatusSource};
use crate::core::thresholds::ThresholdConfig;

/// Acquires a source, reads status then state limit, and evaluates.
///
/// The limit is only queried once the status query has succeeded.
pub fn probe<S, F>(acquire: F, config: &ThresholdConfig) -> Report
where
    S: StatusSource,
    F: FnOnce() -> Result<S>,
{
    match collect(acquire) {
        Ok(snapshot) => {
            info!(
                enabled = snapshot.enabled,
                current_count = snapshot.current_count,
                hard_limit = snapshot.hard_limit,
                "Read pf status"
            );
            evaluate(&snapshot, config)
        }
        Err(e) => {
            warn!(error = %e, "pf probe failed");
            if needs_root_hint(&e) {
                warn!("Not running as root; pf's control device usually requires it");
            }
            Report::unknown(e)
        }
    }
}

fn collect<S, F>(acquire: F) -> Result<StatusSnapshot>
where
    S: StatusSource,
    F: FnOnce() -> Result<S>,
{
    let source = acquire()?;
    let status = source.status()?;
    let hard_limit = source.state_limit()?;
    Ok(StatusSnapshot::new(status, hard_limit))
}

fn needs_root_hint(error: &Error) -> bool {
    let permission_related = match error {
        Error::Open { source, .. } => source.kind() == std::io::ErrorKind::PermissionDenied,
        Error::Query { .. } => true,
        _ => false,
    };
    permission_related && !nix::unistd::geteuid().is_root()
}
