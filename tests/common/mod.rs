// tests/common/mod.rs
#![allow(dead_code)]

use awards_watch::{FixtureFetcher, Source, SourceKind};
use url::Url;

pub const RSS_URL: &str = "https://variety.test/feed/";
pub const LISTING_URL: &str = "https://example.com/awards/";
pub const ATOM_URL: &str = "https://awards.test/atom.xml";

pub const RSS_XML: &str = include_str!("../fixtures/variety_rss.xml");
pub const ATOM_XML: &str = include_str!("../fixtures/awards_atom.xml");
pub const ENTITIES_XML: &str = include_str!("../fixtures/entities_rss.xml");
pub const LISTING_HTML: &str = include_str!("../fixtures/listing.html");

pub fn source(name: &str, kind: SourceKind, location: &str) -> Source {
    Source {
        name: name.to_string(),
        kind,
        location: Url::parse(location).unwrap(),
        classification: "trade".to_string(),
        affects_nomination: true,
        affects_win: false,
    }
}

pub fn three_sources() -> Vec<Source> {
    vec![
        source("Variety", SourceKind::Feed, RSS_URL),
        source("Example Awards", SourceKind::Listing, LISTING_URL),
        source("Awards Desk", SourceKind::Feed, ATOM_URL),
    ]
}

pub fn full_fetcher() -> FixtureFetcher {
    FixtureFetcher::new()
        .with(RSS_URL, RSS_XML)
        .with(LISTING_URL, LISTING_HTML)
        .with(ATOM_URL, ATOM_XML)
}
