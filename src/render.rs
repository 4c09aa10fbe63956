// src/render.rs
//! Static HTML digest page.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::ingest::types::ScoredItem;
use crate::pipeline::Digest;

const STYLE: &str = r#"
    body { font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Arial; margin: 24px; background:#0b0c10; color:#e5e7eb; }
    a { color: #93c5fd; text-decoration: none; }
    a:hover { text-decoration: underline; }
    .header { display:flex; justify-content:space-between; align-items:baseline; gap:16px; flex-wrap:wrap; }
    .muted { color:#9ca3af; }
    .grid { display:grid; grid-template-columns: repeat(auto-fill, minmax(320px, 1fr)); gap:16px; margin-top:18px; }
    .card { background:#111827; border:1px solid #1f2937; border-radius:14px; padding:14px; }
    .top { display:flex; justify-content:space-between; gap:12px; align-items:flex-start; }
    .title { font-weight:700; line-height:1.25; }
    .score { font-weight:800; background:#0f172a; border:1px solid #1f2937; padding:4px 10px; border-radius:999px; }
    .meta { font-size:12px; margin-top:8px; color:#cbd5e1; }
    .summary { margin-top:10px; font-size:14px; }
    .hits { margin-top:10px; font-size:12px; color:#a7f3d0; }
    .failures { margin-top:24px; font-size:12px; color:#fca5a5; }
    .pill { display:inline-block; padding:4px 10px; border-radius:999px; border:1px solid #1f2937; background:#0f172a; }
"#;

fn yes_no(b: bool) -> char {
    if b {
        'Y'
    } else {
        'N'
    }
}

fn render_card(out: &mut String, it: &ScoredItem) {
    let _ = write!(
        out,
        r#"
    <div class="card">
      <div class="top">
        <div class="title"><a href="{url}" target="_blank" rel="noreferrer">{title}</a></div>
        <div class="score">{score:.1}</div>
      </div>
      <div class="meta">
        <span class="source">{source}</span> · <span>{class}</span> · <span>Nom: {nom}</span> · <span>Win: {win}</span>"#,
        url = encode_double_quoted_attribute(&it.item.url),
        title = encode_text(&it.item.title),
        score = it.score,
        source = encode_text(&it.source_name),
        class = encode_text(&it.classification),
        nom = yes_no(it.affects_nomination),
        win = yes_no(it.affects_win),
    );
    if let Some(p) = it.item.published_at.as_deref() {
        let _ = write!(out, r#" · <span class="pub">{}</span>"#, encode_text(p));
    }
    out.push_str("\n      </div>");

    if !it.item.summary.is_empty() {
        let _ = write!(
            out,
            r#"
      <div class="summary">{}</div>"#,
            encode_text(&it.item.summary)
        );
    }
    if !it.signals.is_empty() {
        let _ = write!(
            out,
            r#"
      <div class="hits">Signals: {}</div>"#,
            encode_text(&it.signals.join(", "))
        );
    }
    out.push_str("\n    </div>");
}

/// Render the whole page. Every piece of feed-provided text is escaped.
pub fn render_html(digest: &Digest) -> String {
    let mut cards = String::new();
    for it in &digest.items {
        render_card(&mut cards, it);
    }
    if cards.is_empty() {
        cards.push_str(r#"<div class="muted">No items matched your threshold.</div>"#);
    }

    let mut failures = String::new();
    if !digest.failures.is_empty() {
        failures.push_str(r#"<div class="failures">Sources that failed this run:<ul>"#);
        for f in &digest.failures {
            let _ = write!(
                failures,
                "<li>{}: {}</li>",
                encode_text(&f.source),
                encode_text(&f.detail)
            );
        }
        failures.push_str("</ul></div>");
    }

    format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Awards Watch Digest</title>
  <style>{STYLE}</style>
</head>
<body>
  <div class="header">
    <h1 style="margin:0;">Awards Watch Digest</h1>
    <div class="muted">Generated: {generated}</div>
  </div>
  <div class="muted">
    <span class="pill">Min score: {min_score:.1}</span>
    <span class="pill">Items: {count}</span>
  </div>
  <div class="grid">{cards}
  </div>
  {failures}
</body>
</html>
"#,
        generated = encode_text(&digest.generated_at.to_rfc3339()),
        min_score = digest.min_score,
        count = digest.item_count(),
    )
}
