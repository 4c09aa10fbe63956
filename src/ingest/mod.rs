// src/ingest/mod.rs
pub mod fetch;
pub mod providers;
pub mod types;

use crate::ingest::types::{Item, RawEntry, Source, SourceKind};
use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use url::Url;

/// Listing anchors shorter than this are navigation, not headlines.
pub const MIN_LISTING_TITLE_CHARS: usize = 18;

/// Path fragments of non-article pages on listing sites.
pub const LISTING_URL_DENYLIST: &[&str] = &[
    "privacy",
    "terms",
    "account",
    "login",
    "subscribe",
    "newsletter",
    "contact",
    "about",
];

/// One-time metrics registration (so series show up once a recorder is installed).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "ingest_entries_total",
            "Raw entries extracted from sources."
        );
        describe_counter!(
            "ingest_kept_total",
            "Items scored and kept after dedup + threshold."
        );
        describe_counter!(
            "ingest_seen_total",
            "Items skipped because they were already seen."
        );
        describe_counter!(
            "ingest_source_errors_total",
            "Source fetch/parse errors."
        );
        describe_histogram!("ingest_parse_ms", "Source parse time in milliseconds.");
    });
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn an HTML fragment into plain text: strip tags, decode entities,
/// collapse whitespace. The full text is kept; scoring reads all of it.
pub fn normalize_text(s: &str) -> String {
    // Strip tags before decoding so `&lt;b&gt;` survives as literal text
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[a-z!][^>]*>").unwrap());
    let stripped = re_tags.replace_all(s, " ");

    collapse_ws(&html_escape::decode_html_entities(&stripped))
}

fn absolute_http_url(link: &str) -> Option<Url> {
    let url = Url::parse(link.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str().map(str::to_ascii_lowercase) == b.host_str().map(str::to_ascii_lowercase)
        && a.port() == b.port()
}

fn is_denylisted(url: &str) -> bool {
    let lower = url.to_lowercase();
    LISTING_URL_DENYLIST.iter().any(|bad| lower.contains(bad))
}

/// Convert a raw entry into an [`Item`], or `None` when it is noise.
///
/// Feed entries only need a title and an absolute link. Listing entries must
/// also carry a headline-length title, stay on the source's host and avoid
/// denylisted pages.
pub fn normalize(raw: RawEntry, source: &Source) -> Option<Item> {
    let title = collapse_ws(&raw.title);
    if title.is_empty() {
        return None;
    }

    let url = absolute_http_url(&raw.link)?;

    if source.kind == SourceKind::Listing {
        if title.chars().count() < MIN_LISTING_TITLE_CHARS {
            return None;
        }
        if !same_host(&url, &source.location) {
            return None;
        }
        if is_denylisted(url.as_str()) {
            return None;
        }
    }

    Some(Item {
        title,
        url: raw.link.trim().to_string(),
        summary: collapse_ws(&raw.summary),
        published_at: raw.published_at.filter(|p| !p.trim().is_empty()),
    })
}
