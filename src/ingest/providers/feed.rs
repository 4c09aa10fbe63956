// src/ingest/providers/feed.rs
//! Syndication feed adapter: RSS 2.0, RSS 1.0 (RDF) and Atom.

use std::borrow::Cow;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use once_cell::sync::Lazy;
use quick_xml::de::from_str;
use quick_xml::events::Event;
use regex::{Captures, Regex};
use serde::Deserialize;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::{OffsetDateTime, UtcOffset};

use crate::ingest::fetch::Fetcher;
use crate::ingest::normalize;
use crate::ingest::normalize_text;
use crate::ingest::types::{Item, RawEntry, Source, SourceAdapter, SourceKind};

pub const DEFAULT_FEED_LIMIT: usize = 40;

#[derive(Debug, Deserialize)]
struct Rss {
    #[serde(default)]
    channel: Option<Channel>,
    // RSS 1.0 keeps items next to the channel, not inside it
    #[serde(rename = "item", default)]
    item: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(rename = "date", alias = "dc:date")]
    dc_date: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<AtomText>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<AtomText>,
    content: Option<AtomText>,
    published: Option<String>,
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomText {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

impl AtomEntry {
    /// `rel="alternate"` (or no rel) wins; otherwise the first link with an href.
    fn best_link(&self) -> Option<&str> {
        let alternate = self.links.iter().find(|l| {
            l.href.is_some() && matches!(l.rel.as_deref(), None | Some("alternate"))
        });
        alternate
            .or_else(|| self.links.iter().find(|l| l.href.is_some()))
            .and_then(|l| l.href.as_deref())
    }
}

/// Parse an RFC 2822 (RSS) or RFC 3339 (Atom, Dublin Core) timestamp and
/// re-emit it as ISO-8601 UTC.
pub fn to_iso_utc(ts: &str) -> Option<String> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }
    let parsed = OffsetDateTime::parse(ts, &Rfc2822)
        .or_else(|_| OffsetDateTime::parse(ts, &Rfc3339))
        .ok()
        .or_else(|| {
            // chrono accepts the obsolete zone names (GMT, EST, ...) many feeds still emit
            chrono::DateTime::parse_from_rfc2822(ts)
                .ok()
                .and_then(|dt| OffsetDateTime::from_unix_timestamp(dt.timestamp()).ok())
        })?;
    parsed.to_offset(UtcOffset::UTC).format(&Rfc3339).ok()
}

fn root_element(xml: &str) -> Option<String> {
    let mut reader = quick_xml::Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Some(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

fn trimmed(s: Option<&str>) -> String {
    s.unwrap_or_default().trim().to_string()
}

fn rss_entries(xml: &str) -> Result<Vec<RawEntry>> {
    let rss: Rss = from_str(xml).context("parsing rss xml")?;
    let items = rss
        .channel
        .map(|c| c.item)
        .unwrap_or_default()
        .into_iter()
        .chain(rss.item);

    Ok(items
        .map(|it| RawEntry {
            title: trimmed(it.title.as_deref()),
            link: trimmed(it.link.as_deref()),
            summary: normalize_text(it.description.as_deref().unwrap_or_default()),
            published_at: it
                .pub_date
                .as_deref()
                .or(it.dc_date.as_deref())
                .and_then(to_iso_utc),
        })
        .collect())
}

fn atom_entries(xml: &str) -> Result<Vec<RawEntry>> {
    let feed: AtomFeed = from_str(xml).context("parsing atom xml")?;
    Ok(feed
        .entry
        .into_iter()
        .map(|e| {
            let summary_html = e
                .summary
                .as_ref()
                .or(e.content.as_ref())
                .map(|t| t.value.as_str())
                .unwrap_or_default();
            RawEntry {
                title: trimmed(e.title.as_ref().map(|t| t.value.as_str())),
                link: trimmed(e.best_link()),
                summary: normalize_text(summary_html),
                published_at: e
                    .published
                    .as_deref()
                    .or(e.updated.as_deref())
                    .and_then(to_iso_utc),
            }
        })
        .collect())
}

/// Extract up to `limit` raw entries from a feed document.
///
/// The limit applies in document order before entries lacking a title or a
/// link are dropped.
pub fn parse_feed(xml: &str, limit: usize) -> Result<Vec<RawEntry>> {
    let xml_clean = scrub_html_entities_for_xml(xml);
    let entries = match root_element(&xml_clean).as_deref() {
        Some("rss") | Some("RDF") => rss_entries(&xml_clean)?,
        Some("feed") => atom_entries(&xml_clean)?,
        Some(other) => return Err(anyhow!("unsupported feed root element <{other}>")),
        None => return Err(anyhow!("document has no root element")),
    };

    Ok(entries
        .into_iter()
        .take(limit)
        .filter(|e| !e.title.is_empty() && !e.link.is_empty())
        .collect())
}

pub struct FeedAdapter {
    pub limit: usize,
}

impl Default for FeedAdapter {
    fn default() -> Self {
        Self {
            limit: DEFAULT_FEED_LIMIT,
        }
    }
}

#[async_trait]
impl SourceAdapter for FeedAdapter {
    async fn fetch_items(&self, source: &Source, fetcher: &dyn Fetcher) -> Result<Vec<Item>> {
        let body = fetcher
            .fetch(source.location.as_str())
            .await
            .with_context(|| format!("fetching feed {}", source.location))?;

        let t0 = std::time::Instant::now();
        let raw = parse_feed(&body, self.limit)
            .with_context(|| format!("parsing feed {}", source.location))?;
        histogram!("ingest_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        counter!("ingest_entries_total").increment(raw.len() as u64);

        Ok(raw.into_iter().filter_map(|r| normalize(r, source)).collect())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Feed
    }
}

/// Rewrite HTML named entities XML does not predefine (`&nbsp;`, `&eacute;`,
/// ...) into the characters they stand for. Names html-escape does not know
/// are escaped as literal text so the XML parse still succeeds.
fn scrub_html_entities_for_xml(s: &str) -> Cow<'_, str> {
    static RE_ENTITY: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"&([A-Za-z][A-Za-z0-9]{0,31});").expect("entity regex"));

    RE_ENTITY.replace_all(s, |caps: &Captures<'_>| {
        let name = &caps[1];
        if XML_ENTITIES.contains(&name) {
            return caps[0].to_string();
        }
        let decoded = html_escape::decode_html_entities(&caps[0]);
        if decoded == caps[0] {
            format!("&amp;{name};")
        } else {
            html_escape::encode_text(&decoded).into_owned()
        }
    })
}

const XML_ENTITIES: &[&str] = &["amp", "lt", "gt", "quot", "apos"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc2822_converts_to_utc() {
        assert_eq!(
            to_iso_utc("Tue, 07 Jan 2025 09:30:00 -0500").as_deref(),
            Some("2025-01-07T14:30:00Z")
        );
    }

    #[test]
    fn obsolete_zone_names_are_accepted() {
        assert_eq!(
            to_iso_utc("Tue, 07 Jan 2025 14:30:00 GMT").as_deref(),
            Some("2025-01-07T14:30:00Z")
        );
    }

    #[test]
    fn rfc3339_passes_through_as_utc() {
        assert_eq!(
            to_iso_utc("2025-01-07T16:30:00+02:00").as_deref(),
            Some("2025-01-07T14:30:00Z")
        );
    }

    #[test]
    fn garbage_dates_are_none() {
        assert_eq!(to_iso_utc("sometime last week"), None);
        assert_eq!(to_iso_utc("   "), None);
    }

    #[test]
    fn unknown_root_is_an_error() {
        assert!(parse_feed("<html><body/></html>", 10).is_err());
    }

    #[test]
    fn html_entities_are_decoded_before_xml_parse() {
        assert_eq!(
            scrub_html_entities_for_xml("Caf&eacute; &amp; Bar&nbsp;&copy;"),
            "Caf\u{e9} &amp; Bar\u{a0}\u{a9}"
        );
        assert_eq!(scrub_html_entities_for_xml("&bogus; &lt;"), "&amp;bogus; &lt;");
    }

    #[test]
    fn stray_entities_do_not_fail_the_feed() {
        let xml = r#"<rss><channel>
            <item><title>Caf&eacute; Society wins Oscar</title><link>https://a.test/1</link></item>
            <item><title>Oscar nominations&trade; &weird;</title><link>https://a.test/2</link></item>
        </channel></rss>"#;
        let out = parse_feed(xml, 40).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Caf\u{e9} Society wins Oscar");
        assert_eq!(out[1].title, "Oscar nominations\u{2122} &weird;");
    }

    #[test]
    fn limit_applies_before_dropping_incomplete_entries() {
        let xml = r#"<rss><channel>
            <item><title></title><link>https://a.test/1</link></item>
            <item><title>Second</title><link>https://a.test/2</link></item>
            <item><title>Third</title><link>https://a.test/3</link></item>
        </channel></rss>"#;
        let out = parse_feed(xml, 2).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Second");
    }
}
