//! Calendar emitter - zápasy (+ volitelné skóre) -> VEVENTy -> .ics text
//!
//! Titulek:
//!   home: "EuroBasket 2025: España vs Italia (82-76)"
//!   away: "EuroBasket 2025: Italia vs España (76-82)"
//! Čísla ve skóre jdou ve stejném pořadí jako jména v titulku.

pub mod fold;

use chrono::{DateTime, Utc};
use fixture_table::{Orientation, ScheduledFixture, Tournament, TournamentInfo};
use score_matcher::Score;

pub use fold::{escape_text, fold_line, unfold_lines, FOLD_LIMIT};

const ICS_DATETIME: &str = "%Y%m%dT%H%M%SZ";

pub fn ics_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(ICS_DATETIME).to_string()
}

pub fn title(tournament: &Tournament, scheduled: &ScheduledFixture, score: Option<Score>) -> String {
    let tracked = tournament.tracked.local_name.as_str();
    let rival = scheduled.fixture.opponent.as_str();

    let (first, second, numbers) = match scheduled.fixture.orientation {
        Orientation::Home => (tracked, rival, score.map(|s| (s.tracked, s.opponent))),
        Orientation::Away => (rival, tracked, score.map(|s| (s.opponent, s.tracked))),
    };

    let mut title = format!("{}: {} vs {}", tournament.info.name, first, second);
    if let Some((a, b)) = numbers {
        title.push_str(&format!(" ({a}-{b})"));
    }
    title
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub uid: String,
    pub dtstamp: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub summary: String,
    pub location: String,
    /// neescapovaný víceřádkový text
    pub description: String,
    pub transparent: bool,
}

impl CalendarEntry {
    pub fn for_fixture(
        tournament: &Tournament,
        scheduled: &ScheduledFixture,
        score: Option<Score>,
        dtstamp: DateTime<Utc>,
    ) -> Self {
        let info = &tournament.info;
        let summary = title(tournament, scheduled, score);
        let description = [
            summary.clone(),
            format!("{}: {}", info.venue_label, scheduled.fixture.venue),
            info.group_label.clone(),
            info.broadcaster.clone(),
            info.source_note.clone(),
        ]
        .join("\n");

        Self {
            uid: scheduled.uid.clone(),
            dtstamp,
            start: scheduled.window.start,
            end: scheduled.window.end,
            summary,
            location: scheduled.fixture.venue.clone(),
            description,
            // zápas neblokuje dostupnost majitele kalendáře
            transparent: true,
        }
    }

    /// Nesložené content lines
    pub fn content_lines(&self) -> Vec<String> {
        vec![
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", self.uid),
            format!("DTSTAMP:{}", ics_datetime(&self.dtstamp)),
            format!("DTSTART:{}", ics_datetime(&self.start)),
            format!("DTEND:{}", ics_datetime(&self.end)),
            format!("SUMMARY:{}", escape_text(&self.summary)),
            format!("LOCATION:{}", escape_text(&self.location)),
            format!("DESCRIPTION:{}", escape_text(&self.description)),
            format!("TRANSP:{}", if self.transparent { "TRANSPARENT" } else { "OPAQUE" }),
            "END:VEVENT".to_string(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Calendar {
    prodid: String,
    name: String,
    timezone: String,
    entries: Vec<CalendarEntry>,
}

impl Calendar {
    pub fn new(info: &TournamentInfo) -> Self {
        Self {
            prodid: info.prodid.clone(),
            name: info.calendar_name.clone(),
            timezone: info.timezone_label.clone(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: CalendarEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    /// Celý dokument v paměti, CRLF, každá řádka složená na FOLD_LIMIT
    pub fn render(&self) -> String {
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            format!("PRODID:{}", self.prodid),
            "VERSION:2.0".to_string(),
            "CALSCALE:GREGORIAN".to_string(),
            "METHOD:PUBLISH".to_string(),
            format!("X-WR-CALNAME:{}", escape_text(&self.name)),
            format!("X-WR-TIMEZONE:{}", self.timezone),
        ];
        for entry in &self.entries {
            lines.extend(entry.content_lines());
        }
        lines.push("END:VCALENDAR".to_string());

        let mut out = String::new();
        for line in &lines {
            for physical in fold_line(line) {
                out.push_str(&physical);
                out.push_str("\r\n");
            }
        }
        out
    }
}
