// src/ingest/providers/listing.rs
//! HTML listing-page adapter: every same-site headline link on the page.

use std::collections::HashSet;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::ingest::fetch::Fetcher;
use crate::ingest::types::{Item, RawEntry, Source, SourceAdapter, SourceKind};
use crate::ingest::{collapse_ws, normalize};

pub const DEFAULT_LISTING_LIMIT: usize = 50;

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("paragraph selector"));

fn element_text(el: ElementRef<'_>) -> String {
    collapse_ws(&el.text().collect::<Vec<_>>().join(" "))
}

/// Best-effort blurb: first `<p>` under the anchor's parent.
fn nearby_blurb(anchor: ElementRef<'_>) -> String {
    anchor
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(|parent| parent.select(&PARAGRAPH).next())
        .map(element_text)
        .unwrap_or_default()
}

/// Pull every hyperlink out of `html`. Absolute hrefs are kept as written
/// (item ids hash the exact string); relative ones are resolved against `page`.
/// No filtering happens here; that is the normalizer's job.
pub fn extract_anchors(html: &str, page: &Url) -> Vec<RawEntry> {
    let document = Html::parse_document(html);
    let mut out = Vec::new();

    for a in document.select(&ANCHOR) {
        let href = a.value().attr("href").unwrap_or_default().trim();
        let link = if href.starts_with("http") {
            href.to_string()
        } else {
            match page.join(href) {
                Ok(resolved) => resolved.to_string(),
                Err(_) => continue,
            }
        };
        out.push(RawEntry {
            title: element_text(a),
            link,
            summary: nearby_blurb(a),
            published_at: None,
        });
    }

    out
}

/// Normalize, drop repeated URLs (first wins) and cap.
pub fn select_items(raw: Vec<RawEntry>, source: &Source, limit: usize) -> Vec<Item> {
    let mut seen_urls = HashSet::new();
    raw.into_iter()
        .filter_map(|r| normalize(r, source))
        .filter(|item| seen_urls.insert(item.url.clone()))
        .take(limit)
        .collect()
}

pub struct ListingAdapter {
    pub limit: usize,
}

impl Default for ListingAdapter {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LISTING_LIMIT,
        }
    }
}

#[async_trait]
impl SourceAdapter for ListingAdapter {
    async fn fetch_items(&self, source: &Source, fetcher: &dyn Fetcher) -> Result<Vec<Item>> {
        let body = fetcher
            .fetch(source.location.as_str())
            .await
            .with_context(|| format!("fetching listing {}", source.location))?;

        // Html is !Send; keep it out of the await points.
        let t0 = std::time::Instant::now();
        let raw = extract_anchors(&body, &source.location);
        histogram!("ingest_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        counter!("ingest_entries_total").increment(raw.len() as u64);

        Ok(select_items(raw, source, self.limit))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Listing
    }
}
