/// EuroBasket ICS - generátor kalendáře zápasů Španělska
///
/// Co dělá:
///   1. Načte pevný rozpis zápasů (fixture table) a převede výkopy na UTC
///   2. U zápasů, které už skončily, zkusí dohledat finální skóre na FIBA
///   3. Zapíše .ics se všemi zápasy (skóre v titulku, pokud se našlo)
///
/// Selhání sítě / parsování = zápas bez skóre. Fatální je jen
/// nevalidní konfigurace nebo nemožnost zapsat výstup.
///
/// Spuštění:
///   cargo run --bin calendar-gen

mod config;
mod lock;
mod output;
mod pipeline;
mod resolve;

use anyhow::{Context, Result};
use chrono::Utc;
use config::AppConfig;
use dotenv::dotenv;
use fixture_table::Tournament;
use logger::{now_iso, CalendarWrittenEvent, EventLogger};
use resolve::ResultResolver;
use result_scraper::ResultFetcher;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let tournament = Tournament::eurobasket_2025(&config.zone).context("Invalid fixture table")?;

    info!("=== EuroBasket ICS ===");
    info!("Fixtures: {} | zone: {} | now: {}", tournament.schedule().len(), config.zone, config.now.to_rfc3339());
    info!("Output: {} | logs: {}", config.outfile.display(), config.log_dir.display());

    // Single instance lock, dva běhy by si přepisovaly výstup
    let mut lock = lock::open(&config.outfile);
    let _write_guard = match lock.as_mut().map(|l| l.try_write()) {
        Some(Ok(guard)) => Some(guard),
        Some(Err(_)) => {
            warn!("Another instance of calendar-gen is writing {}! Exiting.", config.outfile.display());
            return Ok(());
        }
        None => None,
    };

    let mut resolver = if config.lookups_enabled {
        match ResultFetcher::new(EventLogger::new(&config.log_dir), config.fetch_timeout) {
            Ok(fetcher) => Some(ResultResolver::new(
                fetcher,
                config.sources.clone(),
                tournament.tracked.source_names.clone(),
                EventLogger::new(&config.log_dir),
            )),
            Err(e) => {
                warn!("Result lookups disabled: {:#}", e);
                None
            }
        }
    } else {
        info!("Result lookups disabled (RESULTS_DISABLED)");
        None
    };

    let (calendar, summary) =
        pipeline::build_calendar(&tournament, resolver.as_mut(), config.now, Utc::now()).await;

    let document = calendar.render();
    output::write_atomic(&config.outfile, &document)?;

    let _ = EventLogger::new(&config.log_dir).log(&CalendarWrittenEvent {
        ts: now_iso(),
        event: "CALENDAR_WRITTEN",
        path: config.outfile.display().to_string(),
        entries: summary.entries,
        scored: summary.scored,
        bytes: document.len(),
    });

    info!(
        "📅 Wrote {} ({} events, {} lookups, {} with score)",
        config.outfile.display(),
        summary.entries,
        summary.lookups,
        summary.scored
    );
    Ok(())
}
