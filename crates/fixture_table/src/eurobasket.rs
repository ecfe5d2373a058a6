//! EuroBasket 2025, skupina C (Limassol) - rozpis Španělska

use crate::{AliasTable, Fixture, KickoffZone, Tournament, TournamentInfo, TrackedTeam};
use anyhow::Result;

const VENUE: &str = "Spyros Kyprianou Arena, Limassol (Chipre)";

// (datum, výkop v hodinách peninsulárního času, soupeř, home/away)
const GAMES: &[(&str, &str, &str, &str)] = &[
    ("2025-08-28", "14:00", "Georgia", "away"),
    ("2025-08-30", "20:30", "Bosnia y Herzegovina", "home"),
    ("2025-08-31", "17:15", "Chipre", "home"),
    ("2025-09-02", "20:30", "Italia", "away"),
    ("2025-09-04", "20:30", "Grecia", "home"),
];

// FIBA vede týmy anglicky
const ALIASES: &[(&str, &str)] = &[
    ("Bosnia y Herzegovina", "Bosnia and Herzegovina"),
    ("Grecia", "Greece"),
    ("Georgia", "Georgia"),
    ("Chipre", "Cyprus"),
    ("Italia", "Italy"),
];

impl Tournament {
    pub fn eurobasket_2025(zone: &KickoffZone) -> Result<Self> {
        let info = TournamentInfo {
            name: "EuroBasket 2025".to_string(),
            calendar_name: "EuroBasket 2025 - España".to_string(),
            prodid: "-//queridojavier//EuroBasket Spain 2025//ES".to_string(),
            timezone_label: "Europe/Madrid".to_string(),
            uid_domain: "eurobasket-spain".to_string(),
            venue_label: "Sede".to_string(),
            group_label: "Grupo C (Limassol).".to_string(),
            broadcaster: "TV en España: RTVE.".to_string(),
            source_note: "Fuente horarios/sede: FIBA 'Games'.".to_string(),
        };

        let tracked = TrackedTeam {
            local_name: "España".to_string(),
            source_names: vec!["Spain".to_string(), "España".to_string()],
        };

        let fixtures = GAMES
            .iter()
            .map(|(date, kickoff, rival, side)| Fixture::new(date, kickoff, rival, VENUE, side))
            .collect::<Result<Vec<_>>>()?;

        let aliases = AliasTable::new(ALIASES.iter().copied())?;

        Tournament::new(info, tracked, fixtures, aliases, zone)
    }
}
