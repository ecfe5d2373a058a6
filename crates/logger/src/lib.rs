/// EuroBasket ICS - Logger
/// JSONL event stream (jeden soubor na UTC den)

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct EventLogger {
    log_dir: PathBuf,
}

impl EventLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let dir = log_dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("Cannot create log dir {}: {}", dir.display(), e);
        }
        Self { log_dir: dir }
    }

    pub fn dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn log<T: Serialize>(&self, event: &T) -> Result<()> {
        let date  = Utc::now().format("%Y-%m-%d").to_string();
        let path  = self.log_dir.join(format!("{date}.jsonl"));
        let line  = serde_json::to_string(event)?;
        let mut f = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(f, "{line}")?;
        Ok(())
    }
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ── Event typy ────────────────────────────────────────────────────────────────

#[derive(Serialize, Debug)]
pub struct SourceFetchEvent {
    pub ts:          String,
    pub event:       &'static str,   // "SOURCE_FETCH"
    pub source:      String,
    pub url:         String,
    pub ok:          bool,
    pub status_code: Option<u16>,
    pub bytes:       usize,
    pub message:     String,
}

#[derive(Serialize, Debug)]
pub struct ResultLookupEvent {
    pub ts:          String,
    pub event:       &'static str,   // "RESULT_LOOKUP"
    pub uid:         String,
    pub opponent:    String,
    pub outcome:     &'static str,   // FOUND | NOT_FOUND | SOURCE_UNAVAILABLE
    pub score:       Option<String>, // tracked-opponent
}

#[derive(Serialize, Debug)]
pub struct CalendarWrittenEvent {
    pub ts:          String,
    pub event:       &'static str,   // "CALENDAR_WRITTEN"
    pub path:        String,
    pub entries:     usize,
    pub scored:      usize,
    pub bytes:       usize,
}
