use score_matcher::{LookupOutcome, Score, ScoreMatcher};

const TRACKED: [&str; 2] = ["Spain", "España"];

#[test]
fn swapping_sides_in_source_gives_same_score() {
    let m = ScoreMatcher::new(&TRACKED, "Italy").unwrap();
    let a = m.find("Final: Spain 82-76 Italy").unwrap();
    let b = m.find("Final: Italy 76-82 Spain").unwrap();
    assert_eq!(a, b);
    assert_eq!(a, Score::new(82, 76));
    assert_eq!(a.to_string(), "82-76");
}

#[test]
fn whitespace_collapsed_page_snippet() {
    let page = "<div class=\"game\"> <span>Group C</span> Georgia 83-69 Spain <a href=\"/games/1\">Box score</a> \
                <span>Group C</span> Spain 114-71 Cyprus </div>";
    let georgia = ScoreMatcher::new(&TRACKED, "Georgia").unwrap();
    let cyprus = ScoreMatcher::new(&TRACKED, "Cyprus").unwrap();
    let greece = ScoreMatcher::new(&TRACKED, "Greece").unwrap();

    assert_eq!(georgia.find(page), Some(Score::new(69, 83)));
    assert_eq!(cyprus.find(page), Some(Score::new(114, 71)));
    assert_eq!(greece.find(page), None);
}

#[test]
fn name_adjacent_but_no_two_numbers_is_not_found() {
    let m = ScoreMatcher::new(&TRACKED, "Greece").unwrap();
    assert_eq!(m.match_text(Some("Spain vs Greece, 20:30 CEST")), LookupOutcome::NotFound);
    assert_eq!(m.match_text(None), LookupOutcome::SourceUnavailable);
}

#[test]
fn outcome_labels_are_stable() {
    assert_eq!(LookupOutcome::Found(Score::new(1, 0)).label(), "FOUND");
    assert_eq!(LookupOutcome::NotFound.label(), "NOT_FOUND");
    assert_eq!(LookupOutcome::SourceUnavailable.label(), "SOURCE_UNAVAILABLE");
    assert_eq!(LookupOutcome::NotFound.score(), None);
}
