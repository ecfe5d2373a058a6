use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fixture_table::{KickoffZone, DEFAULT_ZONE};
use result_scraper::{ResultSource, DEFAULT_TIMEOUT_SECS};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OUTFILE: &str = "spain-eurobasket.ics";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub outfile: PathBuf,
    pub log_dir: PathBuf,
    pub zone: KickoffZone,
    /// "teď" pro rozhodnutí, které zápasy už skončily
    pub now: DateTime<Utc>,
    pub fetch_timeout: Duration,
    pub sources: Vec<ResultSource>,
    pub lookups_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let zone_spec = get("CALENDAR_TZ").unwrap_or_else(|| DEFAULT_ZONE.to_string());
        let zone = KickoffZone::parse(&zone_spec).context("CALENDAR_TZ")?;

        let now = match get("CALENDAR_NOW") {
            Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .with_context(|| format!("CALENDAR_NOW is not RFC 3339: {raw:?}"))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };

        // nevalidní timeout není důvod neposlat kalendář
        let timeout_secs = get("RESULT_FETCH_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let mut sources = ResultSource::fiba_defaults();
        if let Some(url) = get("RESULTS_URL").filter(|u| !u.trim().is_empty()) {
            if let Some(primary) = sources.first_mut() {
                primary.url = url.trim().to_string();
            }
        }

        let lookups_enabled = !get("RESULTS_DISABLED")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            outfile: get("CALENDAR_OUTFILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTFILE)),
            log_dir: get("CALENDAR_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            zone,
            now,
            fetch_timeout: Duration::from_secs(timeout_secs),
            sources,
            lookups_enabled,
        })
    }
}
