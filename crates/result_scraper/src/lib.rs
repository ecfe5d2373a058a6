//! Result fetcher - best-effort stažení stránek s výsledky (FIBA)
//!
//! Pravidla:
//!   - jeden GET na URL za běh (memoizováno), žádný retry, žádný backoff
//!   - browser User-Agent + timeout
//!   - jakékoliv selhání = "žádný text", nikdy nepropadne ven
//!
//! URL může obsahovat `{opponent}`, dosadí se slug jména soupeře ve zdroji.

pub mod extract;

use anyhow::{Context, Result};
use logger::{now_iso, EventLogger, SourceFetchEvent};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

pub use extract::{collapse_whitespace, CollapseWhitespace, ExtractorKind, HtmlText, TextExtractor};

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

pub const FIBA_GAMES_URL: &str = "https://www.fiba.basketball/en/events/fiba-eurobasket-2025/games";
pub const FIBA_TEAM_URL: &str = "https://www.fiba.basketball/eurobasket/2025/team/Spain";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct ResultSource {
    pub name: String,
    pub url: String,
    pub extractor: ExtractorKind,
}

impl ResultSource {
    pub fn new(name: &str, url: &str, extractor: ExtractorKind) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            extractor,
        }
    }

    /// Games stránka (markup + regex) a pak týmová stránka (text z HTML)
    pub fn fiba_defaults() -> Vec<Self> {
        vec![
            Self::new("fiba-games", FIBA_GAMES_URL, ExtractorKind::Collapse),
            Self::new("fiba-team", FIBA_TEAM_URL, ExtractorKind::Html),
        ]
    }

    pub fn url_for(&self, opponent: &str) -> String {
        if self.url.contains("{opponent}") {
            self.url.replace("{opponent}", &url_slug(opponent))
        } else {
            self.url.clone()
        }
    }
}

/// "Bosnia and Herzegovina" -> "bosnia-and-herzegovina"
pub fn url_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Timeout,
    Transport(String),
    Status(u16),
    Body(String),
}

impl FetchFailure {
    fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Status(code) => write!(f, "http_{code}"),
            Self::Body(e) => write!(f, "body: {e}"),
        }
    }
}

pub struct ResultFetcher {
    client: reqwest::Client,
    logger: EventLogger,
    // url -> normalizovaný text (None = selhalo, znovu se nezkouší)
    cache: HashMap<String, Option<String>>,
}

impl ResultFetcher {
    pub fn new(logger: EventLogger, timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            // FIBA vrací holou stránku / 403 bez browser UA
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .gzip(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            logger,
            cache: HashMap::new(),
        })
    }

    /// Počet různých URL, na které už šel request
    pub fn requests_made(&self) -> usize {
        self.cache.len()
    }

    async fn fetch_raw(&self, url: &str) -> std::result::Result<Vec<u8>, FetchFailure> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchFailure::Timeout
            } else {
                FetchFailure::Transport(e.to_string())
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchFailure::Timeout
            } else {
                FetchFailure::Body(e.to_string())
            }
        })?;
        Ok(body.to_vec())
    }

    /// Text zdroje pro daného soupeře (hint pro `{opponent}` v URL).
    /// `None` = zdroj nedostupný.
    pub async fn fetch_text(&mut self, source: &ResultSource, opponent: &str) -> Option<&str> {
        let url = source.url_for(opponent);

        if !self.cache.contains_key(&url) {
            let text = match self.fetch_raw(&url).await {
                Ok(raw) => {
                    let text = source.extractor.extract(&raw);
                    info!("{}: fetched {} bytes ({} bytes of text)", source.name, raw.len(), text.len());
                    self.log_fetch(source, &url, Ok(raw.len()));
                    Some(text)
                }
                Err(failure) => {
                    warn!("{}: fetch {} failed: {}", source.name, url, failure);
                    self.log_fetch(source, &url, Err(&failure));
                    None
                }
            };
            self.cache.insert(url.clone(), text);
        } else {
            debug!("{}: reusing response for {}", source.name, url);
        }

        self.cache.get(&url).and_then(|t| t.as_deref())
    }

    fn log_fetch(&self, source: &ResultSource, url: &str, result: std::result::Result<usize, &FetchFailure>) {
        let (ok, status_code, bytes, message) = match result {
            Ok(bytes) => (true, Some(200), bytes, "ok".to_string()),
            Err(failure) => (false, failure.status_code(), 0, failure.to_string()),
        };

        let _ = self.logger.log(&SourceFetchEvent {
            ts: now_iso(),
            event: "SOURCE_FETCH",
            source: source.name.clone(),
            url: url.to_string(),
            ok,
            status_code,
            bytes,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_punctuation_and_spaces() {
        assert_eq!(url_slug("Bosnia and Herzegovina"), "bosnia-and-herzegovina");
        assert_eq!(url_slug("  Côte d'Ivoire "), "côte-d-ivoire");
    }

    #[test]
    fn url_placeholder_is_optional() {
        let plain = ResultSource::new("a", "https://x.test/games", ExtractorKind::Collapse);
        assert_eq!(plain.url_for("Italy"), "https://x.test/games");

        let hinted = ResultSource::new("b", "https://x.test/h2h/spain-{opponent}", ExtractorKind::Html);
        assert_eq!(hinted.url_for("Italy"), "https://x.test/h2h/spain-italy");
    }

    #[test]
    fn failure_display() {
        assert_eq!(FetchFailure::Status(503).to_string(), "http_503");
        assert_eq!(FetchFailure::Status(503).status_code(), Some(503));
        assert_eq!(FetchFailure::Timeout.status_code(), None);
    }
}
