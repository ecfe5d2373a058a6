use fixture_table::{AliasTable, ScheduledFixture};
use logger::{now_iso, EventLogger, ResultLookupEvent};
use result_scraper::{ResultFetcher, ResultSource};
use score_matcher::{LookupOutcome, ScoreMatcher};
use tracing::{info, warn};

/// Fetch + match pro jeden zápas. Zdroje se zkouší v pořadí,
/// první nalezené skóre vyhrává, selhání jednoho zdroje nic nezastaví.
pub struct ResultResolver {
    fetcher: ResultFetcher,
    sources: Vec<ResultSource>,
    tracked_names: Vec<String>,
    logger: EventLogger,
}

impl ResultResolver {
    pub fn new(
        fetcher: ResultFetcher,
        sources: Vec<ResultSource>,
        tracked_names: Vec<String>,
        logger: EventLogger,
    ) -> Self {
        Self { fetcher, sources, tracked_names, logger }
    }

    pub async fn lookup(&mut self, aliases: &AliasTable, scheduled: &ScheduledFixture) -> LookupOutcome {
        let opponent = scheduled.source_opponent.as_str();
        // zpětný překlad, v logu je vidět, pod čím zdroj soupeře vede i komu to patří
        let local = aliases.local_name(opponent).unwrap_or(&scheduled.fixture.opponent);

        let outcome = match ScoreMatcher::new(self.tracked_names.as_slice(), opponent) {
            Ok(matcher) => {
                let mut outcome = LookupOutcome::SourceUnavailable;
                for source in &self.sources {
                    let text = self.fetcher.fetch_text(source, opponent).await;
                    outcome = matcher.step(outcome, text);
                    if outcome.score().is_some() {
                        break;
                    }
                }
                outcome
            }
            Err(e) => {
                warn!("{}: cannot build matcher: {:#}", scheduled.uid, e);
                LookupOutcome::NotFound
            }
        };

        match outcome {
            LookupOutcome::Found(score) => info!("✅ {} ({}): {}", local, opponent, score),
            other => info!("{} ({}): {}", local, opponent, other.label()),
        }

        let _ = self.logger.log(&ResultLookupEvent {
            ts: now_iso(),
            event: "RESULT_LOOKUP",
            uid: scheduled.uid.clone(),
            opponent: opponent.to_string(),
            outcome: outcome.label(),
            score: outcome.score().map(|s| s.to_string()),
        });

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_table::{KickoffZone, Tournament};
    use mockito::Server;
    use result_scraper::ExtractorKind;
    use score_matcher::Score;
    use std::time::Duration;

    fn tournament() -> Tournament {
        Tournament::eurobasket_2025(&KickoffZone::parse("+02:00").unwrap()).unwrap()
    }

    fn resolver(urls: &[String], tag: &str) -> ResultResolver {
        let dir = std::env::temp_dir().join(format!("calendar-gen-resolve-{}-{}", tag, std::process::id()));
        let fetcher = ResultFetcher::new(EventLogger::new(&dir), Duration::from_secs(5)).unwrap();
        let sources = urls
            .iter()
            .enumerate()
            .map(|(i, url)| ResultSource::new(&format!("src{i}"), url, ExtractorKind::Collapse))
            .collect();
        ResultResolver::new(
            fetcher,
            sources,
            vec!["Spain".to_string(), "España".to_string()],
            EventLogger::new(&dir),
        )
    }

    // Italia hraje venku, ve zdroji "Italy"
    fn italy(t: &Tournament) -> &ScheduledFixture {
        t.schedule().iter().find(|s| s.source_opponent == "Italy").unwrap()
    }

    #[tokio::test]
    async fn all_sources_down_is_unavailable() {
        let mut server = Server::new_async().await;
        let _a = server.mock("GET", "/a").with_status(503).create_async().await;
        let _b = server.mock("GET", "/b").with_status(404).create_async().await;
        let mut r = resolver(&[format!("{}/a", server.url()), format!("{}/b", server.url())], "down");

        let t = tournament();
        assert_eq!(r.lookup(t.aliases(), italy(&t)).await, LookupOutcome::SourceUnavailable);
    }

    #[tokio::test]
    async fn one_answering_source_without_score_is_not_found() {
        let mut server = Server::new_async().await;
        let _a = server.mock("GET", "/a").with_status(503).create_async().await;
        let _b = server
            .mock("GET", "/b")
            .with_status(200)
            .with_body("<p>Spain vs Italy, 2 Sep</p>")
            .create_async()
            .await;
        let mut r = resolver(&[format!("{}/a", server.url()), format!("{}/b", server.url())], "notfound");

        let t = tournament();
        assert_eq!(r.lookup(t.aliases(), italy(&t)).await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn later_source_fills_the_score() {
        let mut server = Server::new_async().await;
        let _a = server
            .mock("GET", "/a")
            .with_status(200)
            .with_body("<p>nothing yet</p>")
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/b")
            .with_status(200)
            .with_body("<li>Italy 76-82 Spain</li>")
            .create_async()
            .await;
        let mut r = resolver(&[format!("{}/a", server.url()), format!("{}/b", server.url())], "later");

        let t = tournament();
        assert_eq!(r.lookup(t.aliases(), italy(&t)).await, LookupOutcome::Found(Score::new(82, 76)));
    }

    #[tokio::test]
    async fn found_score_skips_remaining_sources() {
        let mut server = Server::new_async().await;
        let a = server
            .mock("GET", "/a")
            .with_status(200)
            .with_body("<li>Spain 82-76 Italy</li>")
            .expect(1)
            .create_async()
            .await;
        let b = server.mock("GET", "/b").expect(0).create_async().await;
        let mut r = resolver(&[format!("{}/a", server.url()), format!("{}/b", server.url())], "skip");

        let t = tournament();
        assert_eq!(r.lookup(t.aliases(), italy(&t)).await, LookupOutcome::Found(Score::new(82, 76)));
        a.assert_async().await;
        b.assert_async().await;
    }
}
