//! Score matcher - jádro párování výsledků
//!
//! Hledá v normalizovaném textu vzor
//!   "TEAM_A 82-76 TEAM_B"   (pomlčka nebo en-dash, volitelné mezery)
//! kde jedna strana je sledovaný tým (libovolné hláskování) a druhá soupeř
//! podle alias tabulky. Zkouší obě pořadí, vyhrává první shoda v dokumentu.
//! Skóre se vždy vrací se sledovaným týmem na první pozici.
//!
//! Známý limit: pokud stránka obsahuje víc zápasů stejné dvojice (jiný
//! turnaj, odveta), vezme se první a nic se nerozlišuje.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fmt;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Finální skóre, sledovaný tým vždy první
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Score {
    pub tracked: u16,
    pub opponent: u16,
}

impl Score {
    pub fn new(tracked: u16, opponent: u16) -> Self {
        Self { tracked, opponent }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.tracked, self.opponent)
    }
}

/// Uzavřená množina výsledků lookupu. Nic z toho není chyba.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Score),
    /// zdroj odpověděl, ale skóre v textu není (zápas ještě nezapsán apod.)
    NotFound,
    /// žádný zdroj nedodal text
    SourceUnavailable,
}

impl LookupOutcome {
    pub fn score(&self) -> Option<Score> {
        match self {
            Self::Found(score) => Some(*score),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Found(_) => "FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::SourceUnavailable => "SOURCE_UNAVAILABLE",
        }
    }

    /// Found > NotFound > SourceUnavailable, při shodě vyhrává self
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Found(_), _) => self,
            (_, Self::Found(_)) => other,
            (Self::NotFound, _) | (_, Self::NotFound) => Self::NotFound,
            _ => Self::SourceUnavailable,
        }
    }
}

pub struct ScoreMatcher {
    pattern: Regex,
    opponent: String,
}

impl ScoreMatcher {
    /// `tracked_names` = hláskování sledovaného týmu ve zdroji ("Spain", "España"),
    /// `opponent` = identifikátor soupeře ve zdroji. Přijímá se celé jméno
    /// i jeho první slovo ("Bosnia and Herzegovina" / "Bosnia").
    pub fn new<S: AsRef<str>>(tracked_names: &[S], opponent: &str) -> Result<Self> {
        let tracked = alternation(tracked_names.iter().map(|s| s.as_ref()));
        if tracked.is_empty() {
            bail!("no tracked team names to match");
        }

        let opponent = opponent.trim();
        let mut opponent_names = vec![opponent];
        if let Some(first) = opponent.split_whitespace().next() {
            if first != opponent {
                opponent_names.push(first);
            }
        }
        let rival = alternation(opponent_names);
        if rival.is_empty() {
            bail!("empty opponent identifier");
        }

        let num = "[0-9]{2,3}";
        let sep = r"\s*[-–]\s*";
        let pattern = format!(
            r"(?i)(?:{tracked})\s*(?P<t1>{num}){sep}(?P<o1>{num})\s*(?:{rival})|(?:{rival})\s*(?P<o2>{num}){sep}(?P<t2>{num})\s*(?:{tracked})"
        );

        Ok(Self {
            pattern: Regex::new(&pattern).context("score pattern did not compile")?,
            opponent: opponent.to_string(),
        })
    }

    pub fn opponent(&self) -> &str {
        &self.opponent
    }

    /// První shoda v pořadí dokumentu, obě orientace
    pub fn find(&self, text: &str) -> Option<Score> {
        if text.is_empty() {
            return None;
        }

        let text: String = text.nfc().collect();
        let caps = self.pattern.captures(&text)?;

        let (tracked, opponent) = match (caps.name("t1"), caps.name("o1")) {
            (Some(t), Some(o)) => (t, o),
            // soupeř vlevo -> otočit
            _ => (caps.name("t2")?, caps.name("o2")?),
        };

        let score = Score::new(tracked.as_str().parse().ok()?, opponent.as_str().parse().ok()?);
        debug!(
            "matched {:?} -> {} (vs {})",
            caps.get(0).map(|m| m.as_str()).unwrap_or_default(),
            score,
            self.opponent
        );
        Some(score)
    }

    /// `None` = zdroj nedodal text
    pub fn match_text(&self, text: Option<&str>) -> LookupOutcome {
        match text {
            None => LookupOutcome::SourceUnavailable,
            Some(text) => self
                .find(text)
                .map(LookupOutcome::Found)
                .unwrap_or(LookupOutcome::NotFound),
        }
    }

    /// Jeden krok přes zdroje v pořadí priority. `acc` je dosavadní výsledek,
    /// jakmile je `Found`, další text se už nematchuje.
    pub fn step(&self, acc: LookupOutcome, text: Option<&str>) -> LookupOutcome {
        if acc.score().is_some() {
            return acc;
        }
        acc.combine(self.match_text(text))
    }
}

// delší jména první, aby "Bosnia and Herzegovina" vyhrálo nad "Bosnia"
fn alternation<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut names: Vec<String> = names
        .into_iter()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| n.nfc().collect::<String>())
        .collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names.dedup();

    names.iter().map(|n| regex::escape(n)).collect::<Vec<_>>().join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spain_vs(opponent: &str) -> ScoreMatcher {
        ScoreMatcher::new(&["Spain", "España"], opponent).unwrap()
    }

    #[test]
    fn tracked_first() {
        assert_eq!(spain_vs("Italy").find("Spain 82-76 Italy"), Some(Score::new(82, 76)));
    }

    #[test]
    fn opponent_first_is_swapped() {
        assert_eq!(spain_vs("Italy").find("Italy 76-82 Spain"), Some(Score::new(82, 76)));
    }

    #[test]
    fn separators_and_case() {
        let m = spain_vs("Italy");
        assert_eq!(m.find("SPAIN82 – 76ITALY"), Some(Score::new(82, 76)));
        assert_eq!(m.find("españa 101 -99 italy"), Some(Score::new(101, 99)));
    }

    #[test]
    fn decomposed_accent_still_matches() {
        let m = spain_vs("Italy");
        // "Espan" + combining tilde + "a"
        assert_eq!(m.find("Espan\u{303}a 70-68 Italy"), Some(Score::new(70, 68)));
    }

    #[test]
    fn first_word_of_opponent_is_enough() {
        let m = spain_vs("Bosnia and Herzegovina");
        assert_eq!(m.find("Spain 90-70 Bosnia"), Some(Score::new(90, 70)));
        assert_eq!(m.find("Bosnia and Herzegovina 70-90 Spain"), Some(Score::new(90, 70)));
    }

    #[test]
    fn first_in_document_order_wins() {
        let m = spain_vs("Italy");
        let text = "Italy 60-70 Spain ... Spain 82-76 Italy";
        assert_eq!(m.find(text), Some(Score::new(70, 60)));
    }

    #[test]
    fn rejects_single_digit_and_other_teams() {
        let m = spain_vs("Italy");
        assert_eq!(m.find("Spain 8-7 Italy"), None);
        assert_eq!(m.find("Spain 82-76 Greece"), None);
        assert_eq!(m.find("Spain 82 76 Italy"), None);
        assert_eq!(m.find(""), None);
    }

    #[test]
    fn regex_metacharacters_in_names_are_escaped() {
        let m = ScoreMatcher::new(&["Spain"], "Côte d'Ivoire (CIV)").unwrap();
        assert_eq!(m.find("Spain 80-60 Côte d'Ivoire (CIV)"), Some(Score::new(80, 60)));
    }

    #[test]
    fn empty_names_are_config_errors() {
        assert!(ScoreMatcher::new::<&str>(&[], "Italy").is_err());
        assert!(ScoreMatcher::new(&["Spain"], "  ").is_err());
    }

    #[test]
    fn outcome_combination() {
        let found = LookupOutcome::Found(Score::new(1, 2));
        assert_eq!(LookupOutcome::SourceUnavailable.combine(LookupOutcome::NotFound), LookupOutcome::NotFound);
        assert_eq!(LookupOutcome::NotFound.combine(found), found);
        assert_eq!(found.combine(LookupOutcome::Found(Score::new(3, 4))), found);
        assert_eq!(
            LookupOutcome::SourceUnavailable.combine(LookupOutcome::SourceUnavailable),
            LookupOutcome::SourceUnavailable
        );
    }

    #[test]
    fn step_over_sources() {
        let m = spain_vs("Italy");
        let start = LookupOutcome::SourceUnavailable;

        let acc = m.step(start, None);
        assert_eq!(m.step(acc, None), LookupOutcome::SourceUnavailable);

        let acc = m.step(start, None);
        assert_eq!(m.step(acc, Some("nothing here")), LookupOutcome::NotFound);

        let acc = m.step(start, Some("nothing"));
        assert_eq!(m.step(acc, Some("Italy 76-82 Spain")), LookupOutcome::Found(Score::new(82, 76)));
    }

    #[test]
    fn step_keeps_first_found() {
        let m = spain_vs("Italy");
        let found = m.step(LookupOutcome::SourceUnavailable, Some("Spain 82-76 Italy"));
        assert_eq!(m.step(found, Some("Italy 90-60 Spain")), LookupOutcome::Found(Score::new(82, 76)));
        assert_eq!(m.step(found, None), found);
    }
}
