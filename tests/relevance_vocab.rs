// tests/relevance_vocab.rs
// Vocabulary-level checks for the relevance scorer.

use awards_watch::relevance::{score, score_item, MAX_SCORE, MAX_SIGNALS, MIN_SCORE};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn negative_only_text_floors_at_zero() {
    let r = score("New trailer and poster drop for the summer tentpole");
    assert_eq!(r.score, 0.0);
    assert!(r.signals.is_empty());
}

#[test]
fn many_hits_clamp_to_max_and_cap_signals() {
    // 13 award terms, no strong or negative terms
    let r = score("oscars academy awards bafta emmy golden globes sag dga pga wga guild");
    assert_eq!(r.score, MAX_SCORE);
    assert_eq!(r.signals.len(), MAX_SIGNALS);
    assert_eq!(
        r.signals,
        vec![
            "oscar",
            "oscars",
            "academy award",
            "academy awards",
            "bafta",
            "emmy",
            "golden globe",
            "golden globes",
            "sag",
            "dga",
        ]
    );
}

#[test]
fn matching_is_case_insensitive_substring() {
    // "Sundance" and "TIFF" hit regardless of case; "Berlinale" contains "berlin"
    let r = score("SUNDANCE, tiff and the Berlinale");
    assert!(approx(r.score, 3.0), "got {}", r.score);
    assert_eq!(r.signals, vec!["berlin", "sundance", "tiff"]);
}

#[test]
fn scores_stay_in_bounds() {
    let samples = [
        "",
        "box office box office trailer teaser first look poster",
        "Oscar nominations: every nominee, the shortlist and the winners",
        "FYC campaign: for your consideration, awards season contender",
        "random sports news about the weekend game",
    ];
    for s in samples {
        let r = score(s);
        assert!(
            (MIN_SCORE..=MAX_SCORE).contains(&r.score),
            "{s:?} scored {}",
            r.score
        );
        assert!(r.signals.len() <= MAX_SIGNALS);
    }
}

#[test]
fn title_and_summary_score_together() {
    let joined = score_item("Golden Globes", "winners list");
    let alone = score("Golden Globes winners list");
    assert_eq!(joined, alone);
}
