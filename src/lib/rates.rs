use std::fs;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{RatesError, Result};

/// Rate file consulted for staleness when no `--rates-file` is given
pub const DEFAULT_RATES_PATH: &str = "config/rates.yaml";

/// Default rates older than this many days trigger a warning
pub const STALE_AFTER_DAYS: i64 = 180;

const LAST_UPDATED_MARKER: &str = "Last updated:";

/// Linear pricing model applied to resource requests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    pub cpu_per_core_per_hour: f64,
    pub memory_per_gb_per_hour: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            cpu_per_core_per_hour: 0.034,
            memory_per_gb_per_hour: 0.004,
        }
    }
}

impl Rates {
    /// Read rates from a YAML document with both rate keys present
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RatesError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let rates: Rates =
            serde_yaml::from_str(&content).map_err(|e| RatesError::ParseFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        rates.validate()?;

        debug!(
            "Loaded rates from {}: {}/core-hour, {}/GB-hour",
            path.display(),
            rates.cpu_per_core_per_hour,
            rates.memory_per_gb_per_hour
        );
        Ok(rates)
    }

    /// Both rates must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("cpu_per_core_per_hour", self.cpu_per_core_per_hour),
            ("memory_per_gb_per_hour", self.memory_per_gb_per_hour),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RatesError::InvalidValue(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Find the `Last updated: YYYY-MM-DD` marker in a rate file.
///
/// Returns the date and the number of whole days since it, counted against
/// today's UTC date.
pub fn last_updated(path: impl AsRef<Path>) -> Result<(NaiveDate, i64)> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| RatesError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    last_updated_in(&content, path, Utc::now().date_naive())
}

fn last_updated_in(content: &str, path: &Path, today: NaiveDate) -> Result<(NaiveDate, i64)> {
    for line in content.lines() {
        let Some((_, rest)) = line.split_once(LAST_UPDATED_MARKER) else {
            continue;
        };

        let raw = rest.split_whitespace().next().unwrap_or_default();
        let date =
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| RatesError::ParseFailed {
                path: path.to_path_buf(),
                message: format!("invalid date '{}': {}", raw, e),
            })?;
        let days_since = (today - date).num_days();
        return Ok((date, days_since));
    }

    Err(RatesError::NotFound(path.to_path_buf()).into())
}

/// Age in days of the rate file when it is past [`STALE_AFTER_DAYS`].
///
/// Missing files and missing or bad dates are not reported.
pub fn stale_age(path: impl AsRef<Path>) -> Option<i64> {
    let path = path.as_ref();
    match last_updated(path) {
        Ok((date, days_since)) => {
            debug!("Rates in {} last updated {}", path.display(), date);
            (days_since > STALE_AFTER_DAYS).then_some(days_since)
        }
        Err(e) => {
            debug!("Skipping staleness check: {}", e);
            None
        }
    }
}
