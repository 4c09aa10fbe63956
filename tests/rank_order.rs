// tests/rank_order.rs
use awards_watch::rank::rank;
use awards_watch::{Item, ScoredItem, SourceKind};

fn scored(id: &str, score: f64, published_at: Option<&str>) -> ScoredItem {
    ScoredItem {
        id: id.to_string(),
        item: Item {
            title: format!("item {id}"),
            url: format!("https://a.test/{id}"),
            summary: String::new(),
            published_at: published_at.map(str::to_string),
        },
        score,
        signals: vec![],
        source_name: "Trade".into(),
        source_kind: SourceKind::Feed,
        classification: "trade".into(),
        affects_nomination: false,
        affects_win: false,
    }
}

fn ids(items: &[ScoredItem]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn threshold_is_inclusive() {
    let out = rank(
        vec![scored("at", 3.5, None), scored("below", 3.49, None)],
        3.5,
    );
    assert_eq!(ids(&out), vec!["at"]);
}

#[test]
fn higher_scores_come_first() {
    let out = rank(
        vec![
            scored("low", 4.0, Some("2026-01-20T00:00:00Z")),
            scored("high", 9.0, Some("2020-01-01T00:00:00Z")),
            scored("mid", 6.5, None),
        ],
        0.0,
    );
    assert_eq!(ids(&out), vec!["high", "mid", "low"]);
}

#[test]
fn equal_scores_order_by_recency_with_epoch_fallback() {
    let out = rank(
        vec![
            scored("garbage", 5.0, Some("not a date")),
            scored("older", 5.0, Some("2026-01-10T09:00:00Z")),
            scored("newer", 5.0, Some("2026-01-11T07:00:00Z")),
        ],
        3.5,
    );
    assert_eq!(ids(&out), vec!["newer", "older", "garbage"]);
}

#[test]
fn full_ties_keep_input_order() {
    let out = rank(
        vec![
            scored("first", 5.0, None),
            scored("second", 5.0, Some("")),
            scored("third", 5.0, None),
        ],
        3.5,
    );
    assert_eq!(ids(&out), vec!["first", "second", "third"]);
}

#[test]
fn nothing_passes_a_high_threshold() {
    let out = rank(vec![scored("a", 9.9, None)], 10.0);
    assert!(out.is_empty());
}
