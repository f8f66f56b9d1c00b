//! pf(4) status source backed by `pfctl(8)`
//!
//! The control device is opened read-only when the source is created and
//! held until the source is dropped, so permission problems surface as an
//! acquisition failure before any query runs. The two reads go through
//! `pfctl -s info` and `pfctl -s memory` and their text output is parsed.
//!
//! # Output Parsed
//!
//! ```text
//! Status: Enabled for 3 days 04:12:55              Debug: err
//!
//! State Table                          Total             Rate
//!   current entries                     5000
//! ```
//!
//! ```text
//! states        hard limit    10000
//! src-nodes     hard limit    10000
//! ```

use std::ffi::OsString;
use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::core::error::{Error, QueryStep, Result};
use crate::core::status::{PfStatus, StatusSource};

/// pf control device
pub const DEFAULT_DEVICE: &str = "/dev/pf";

/// Program used for both queries
pub const DEFAULT_PROGRAM: &str = "pfctl";

/// Where the source finds the device and the program to query through
#[derive(Debug, Clone)]
pub struct PfctlConfig {
    pub device: PathBuf,
    pub program: PathBuf,
    /// Arguments placed before `-s <table>`
    pub prefix_args: Vec<OsString>,
}

impl Default for PfctlConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            program: PathBuf::from(DEFAULT_PROGRAM),
            prefix_args: Vec::new(),
        }
    }
}

/// An open handle on the pf control device plus the means to query it
///
/// The device handle only proves the device is readable; both queries run
/// `pfctl`, which opens its own handle.
#[derive(Debug)]
pub struct PfctlSource {
    config: PfctlConfig,
    _device: File,
}

impl PfctlSource {
    /// Acquires the control device.
    ///
    /// # Errors
    ///
    /// Returns `Error::Open` if the device cannot be opened for reading.
    pub fn open(config: PfctlConfig) -> Result<Self> {
        let device = File::open(&config.device).map_err(|source| Error::Open {
            path: config.device.clone(),
            source,
        })?;
        debug!(device = %config.device.display(), "Opened pf control device");
        Ok(Self {
            config,
            _device: device,
        })
    }

    fn show(&self, step: QueryStep, table: &str) -> Result<String> {
        let program = self.config.program.display();
        debug!(%program, table, "Querying pf");

        let output = Command::new(&self.config.program)
            .args(&self.config.prefix_args)
            .args(["-s", table])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::query(step, format!("cannot run {program}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(%program, table, stderr = %stderr.trim(), "pf query failed");
            return Err(Error::query(
                step,
                format!("{program} -s {table} returned {}", output.status),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Drop for PfctlSource {
    fn drop(&mut self) {
        debug!(device = %self.config.device.display(), "Releasing pf control device");
    }
}

impl StatusSource for PfctlSource {
    fn status(&self) -> Result<PfStatus> {
        parse_info(&self.show(QueryStep::Status, "info")?)
    }

    fn state_limit(&self) -> Result<u64> {
        parse_memory(&self.show(QueryStep::StateLimit, "memory")?)
    }
}

/// Parses `pfctl -s info` output
fn parse_info(text: &str) -> Result<PfStatus> {
    let mut enabled = None;
    let mut current_count = None;

    for line in text.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("Status:") {
            enabled = match rest.split_whitespace().next() {
                Some("Enabled") => Some(true),
                Some("Disabled") => Some(false),
                other => {
                    return Err(Error::query(
                        QueryStep::Status,
                        format!("unrecognised status {:?}", other.unwrap_or_default()),
                    ));
                }
            };
        } else if current_count.is_none()
            && let Some(rest) = line.strip_prefix("current entries")
        {
            // First one belongs to the State Table; -v adds Source Tracking below it
            current_count = Some(parse_count(QueryStep::Status, rest, "current entries")?);
        }
    }

    match (enabled, current_count) {
        (Some(enabled), Some(current_count)) => Ok(PfStatus {
            enabled,
            current_count,
        }),
        (None, _) => Err(Error::query(QueryStep::Status, "no Status line in output")),
        (_, None) => Err(Error::query(
            QueryStep::Status,
            "no current entries line in output",
        )),
    }
}

/// Parses `pfctl -s memory` output for the state table hard limit
fn parse_memory(text: &str) -> Result<u64> {
    for line in text.lines() {
        let mut words = line.split_whitespace();
        if words.next() != Some("states") {
            continue;
        }
        if words.next() == Some("hard") && words.next() == Some("limit") {
            let value = words.next().unwrap_or_default();
            return parse_count(QueryStep::StateLimit, value, "states hard limit");
        }
    }
    Err(Error::query(
        QueryStep::StateLimit,
        "no states hard limit line in output",
    ))
}

fn parse_count(step: QueryStep, rest: &str, field: &str) -> Result<u64> {
    let word = rest.split_whitespace().next().unwrap_or_default();
    word.parse::<u64>()
        .map_err(|_| Error::query(step, format!("bad {field} value {word:?}")))
}
