//! Fixture table: pevný rozpis zápasů sledovaného týmu + metadata turnaje
//!
//! Při sestavení se validuje:
//!   - chronologické pořadí
//!   - max. jeden zápas na (datum, soupeř), unikátní UID
//!   - alias pro každého soupeře
//!   - každý výkop jde převést na UTC zvolenou strategií zóny

pub mod alias;
pub mod time;
mod eurobasket;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

pub use alias::AliasTable;
pub use time::{FixtureWindow, KickoffZone, DEFAULT_ZONE, GAME_DURATION_HOURS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Home,
    Away,
}

impl Orientation {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "away" => Ok(Self::Away),
            other => bail!("unknown orientation {other:?} (expected home|away)"),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Home => "home",
            Self::Away => "away",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub date: NaiveDate,
    pub kickoff: NaiveTime,
    /// lokální jméno, klíč do alias tabulky
    pub opponent: String,
    pub venue: String,
    pub orientation: Orientation,
}

impl Fixture {
    /// `date` = YYYY-MM-DD, `kickoff` = HH:MM lokálního času
    pub fn new(date: &str, kickoff: &str, opponent: &str, venue: &str, orientation: &str) -> Result<Self> {
        Ok(Self {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .with_context(|| format!("invalid fixture date {date:?}"))?,
            kickoff: NaiveTime::parse_from_str(kickoff, "%H:%M")
                .with_context(|| format!("invalid kickoff time {kickoff:?}"))?,
            opponent: opponent.to_string(),
            venue: venue.to_string(),
            orientation: Orientation::parse(orientation)?,
        })
    }

    pub fn local_start(&self) -> NaiveDateTime {
        self.date.and_time(self.kickoff)
    }

    /// `2025-09-02-italia@eurobasket-spain`
    pub fn uid(&self, domain: &str) -> String {
        let slug: String = self
            .opponent
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        format!("{}-{}@{}", self.date.format("%Y-%m-%d"), slug, domain)
    }
}

#[derive(Debug, Clone)]
pub struct TrackedTeam {
    /// jméno v titulcích kalendáře
    pub local_name: String,
    /// všechna přijatelná hláskování ve zdroji výsledků
    pub source_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TournamentInfo {
    pub name: String,
    pub calendar_name: String,
    pub prodid: String,
    pub timezone_label: String,
    pub uid_domain: String,
    pub venue_label: String,
    pub group_label: String,
    pub broadcaster: String,
    pub source_note: String,
}

/// Zápas s dopočítaným UTC oknem, UID a jménem soupeře ve zdroji
#[derive(Debug, Clone)]
pub struct ScheduledFixture {
    pub fixture: Fixture,
    pub window: FixtureWindow,
    pub uid: String,
    pub source_opponent: String,
}

#[derive(Debug, Clone)]
pub struct Tournament {
    pub info: TournamentInfo,
    pub tracked: TrackedTeam,
    aliases: AliasTable,
    schedule: Vec<ScheduledFixture>,
}

impl Tournament {
    pub fn new(
        info: TournamentInfo,
        tracked: TrackedTeam,
        fixtures: Vec<Fixture>,
        aliases: AliasTable,
        zone: &KickoffZone,
    ) -> Result<Self> {
        if tracked.source_names.iter().all(|n| n.trim().is_empty()) {
            bail!("tracked team {:?} has no source names", tracked.local_name);
        }

        aliases.ensure_covers(fixtures.iter().map(|f| f.opponent.as_str()))?;

        let mut seen_pairs = HashSet::new();
        let mut seen_uids = HashSet::new();
        let mut schedule: Vec<ScheduledFixture> = Vec::with_capacity(fixtures.len());

        for fixture in fixtures {
            if !seen_pairs.insert((fixture.date, fixture.opponent.clone())) {
                bail!("duplicate fixture: {} vs {}", fixture.date, fixture.opponent);
            }

            let window = FixtureWindow::resolve(fixture.local_start(), zone)
                .with_context(|| format!("fixture {} vs {}", fixture.date, fixture.opponent))?;

            if let Some(prev) = schedule.last() {
                if window.start < prev.window.start {
                    bail!(
                        "fixtures out of order: {} vs {} before {} vs {}",
                        prev.fixture.date, prev.fixture.opponent, fixture.date, fixture.opponent
                    );
                }
            }

            let uid = fixture.uid(&info.uid_domain);
            if !seen_uids.insert(uid.clone()) {
                bail!("uid collision: {uid}");
            }

            // ensure_covers výše garantuje, že alias existuje
            let source_opponent = aliases
                .source_name(&fixture.opponent)
                .unwrap_or(&fixture.opponent)
                .to_string();

            debug!("fixture {} -> {} .. {} ({})", uid, window.start, window.end, zone);
            schedule.push(ScheduledFixture { fixture, window, uid, source_opponent });
        }

        Ok(Self { info, tracked, aliases, schedule })
    }

    pub fn schedule(&self) -> &[ScheduledFixture] {
        &self.schedule
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }
}
