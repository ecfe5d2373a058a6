use crate::resolve::ResultResolver;
use chrono::{DateTime, Utc};
use fixture_table::Tournament;
use ics_emitter::{Calendar, CalendarEntry};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub entries: usize,
    pub lookups: usize,
    pub scored: usize,
}

/// Jeden VEVENT na zápas, sekvenčně. Lookup jen u zápasů, které už skončily.
pub async fn build_calendar(
    tournament: &Tournament,
    mut resolver: Option<&mut ResultResolver>,
    now: DateTime<Utc>,
    dtstamp: DateTime<Utc>,
) -> (Calendar, RunSummary) {
    let mut calendar = Calendar::new(&tournament.info);
    let mut summary = RunSummary::default();

    for scheduled in tournament.schedule() {
        let score = if !scheduled.window.is_over(now) {
            debug!("{}: ends {}, no lookup yet", scheduled.uid, scheduled.window.end);
            None
        } else if let Some(resolver) = resolver.as_deref_mut() {
            summary.lookups += 1;
            resolver.lookup(tournament.aliases(), scheduled).await.score()
        } else {
            None
        };

        if score.is_some() {
            summary.scored += 1;
        }
        calendar.push(CalendarEntry::for_fixture(tournament, scheduled, score, dtstamp));
    }

    summary.entries = calendar.entries().len();
    (calendar, summary)
}
