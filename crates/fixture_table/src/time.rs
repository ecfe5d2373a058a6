//! Převod lokálního výkopu na UTC okno zápasu.
//!
//! Jedna strategie zóny na celý běh: buď pevný offset (`+02:00`),
//! nebo IANA zóna s DST pravidly (`Europe/Madrid`). "Teď" je vždy
//! absolutní UTC instant, takže se nic nemíchá.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

/// Max délka zápasu včetně prodloužení
pub const GAME_DURATION_HOURS: i64 = 2;

/// CEST, turnaj se hraje v létě
pub const DEFAULT_ZONE: &str = "+02:00";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KickoffZone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl KickoffZone {
    /// `+HH:MM` / `-HH:MM` => pevný offset, cokoliv jiného => IANA jméno
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if let Some(rest) = spec.strip_prefix('+') {
            return parse_offset(rest, 1).map(Self::Fixed);
        }
        if let Some(rest) = spec.strip_prefix('-') {
            return parse_offset(rest, -1).map(Self::Fixed);
        }

        let tz = spec
            .parse::<Tz>()
            .map_err(|e| anyhow!("unknown timezone {spec:?}: {e}"))?;
        Ok(Self::Named(tz))
    }

    /// Ambiguous čas (podzimní přechod) bere dřívější instant.
    /// Neexistující čas (jarní díra) je chyba konfigurace.
    pub fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        let resolved = match self {
            Self::Fixed(offset) => offset
                .from_local_datetime(&local)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Named(tz) => tz
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        };

        resolved.with_context(|| format!("local time {local} does not exist in zone {self}"))
    }
}

fn parse_offset(hhmm: &str, sign: i32) -> Result<FixedOffset> {
    let (hh, mm) = hhmm.split_once(':').unwrap_or((hhmm, "0"));
    let hours: i32 = hh.parse().with_context(|| format!("invalid offset hours {hh:?}"))?;
    let minutes: i32 = mm.parse().with_context(|| format!("invalid offset minutes {mm:?}"))?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(anyhow!("offset out of range: {hhmm}"));
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| anyhow!("offset out of range: {hhmm}"))
}

impl fmt::Display for KickoffZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) => write!(f, "{offset}"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FixtureWindow {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: start + Duration::hours(GAME_DURATION_HOURS),
        }
    }

    pub fn resolve(local_start: NaiveDateTime, zone: &KickoffZone) -> Result<Self> {
        Ok(Self::starting_at(zone.to_utc(local_start)?))
    }

    /// true až po konci okna, ne v okamžiku konce
    pub fn is_over(&self, now: DateTime<Utc>) -> bool {
        now > self.end
    }
}
