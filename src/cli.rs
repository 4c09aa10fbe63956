//! Command-line interface. Every option also reads from the environment,
//! so a scheduler can drive the binary with env vars alone.

use std::path::PathBuf;

use clap::Parser;

use awards_watch::config::RunParams;
use awards_watch::seen::DEFAULT_STATE_PATH;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Source list (JSON or TOML). Defaults to sources.json, then config/sources.{toml,json}
    #[arg(short, long, env = "AWARDS_SOURCES_PATH")]
    pub sources: Option<PathBuf>,

    /// Seen-state file
    #[arg(long, env = "AWARDS_STATE_PATH", default_value = DEFAULT_STATE_PATH)]
    pub state: PathBuf,

    /// Rendered digest page
    #[arg(short, long, env = "AWARDS_OUTPUT", default_value = "docs/index.html")]
    pub output: PathBuf,

    /// Items scoring below this are dropped
    #[arg(long, env = "MIN_SCORE", default_value_t = 3.5)]
    pub min_score: f64,

    /// Record surfaced items so later runs skip them
    #[arg(long, env = "MARK_SEEN")]
    pub mark_seen: bool,

    /// Max entries read per feed
    #[arg(long, env = "FEED_LIMIT", default_value_t = 40)]
    pub feed_limit: usize,

    /// Max items kept per listing page
    #[arg(long, env = "LISTING_LIMIT", default_value_t = 50)]
    pub listing_limit: usize,

    /// Per-fetch timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 20)]
    pub fetch_timeout_secs: u64,
}

impl Cli {
    pub fn run_params(&self) -> RunParams {
        RunParams {
            feed_limit: self.feed_limit,
            listing_limit: self.listing_limit,
            fetch_timeout: std::time::Duration::from_secs(self.fetch_timeout_secs),
            ..RunParams::default()
        }
        .with_min_score(self.min_score)
        .with_mark_seen(self.mark_seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let cli = Cli::parse_from(["awards-watch"]);
        let p = cli.run_params();
        assert_eq!(cli.output, PathBuf::from("docs/index.html"));
        assert_eq!(cli.state, PathBuf::from(DEFAULT_STATE_PATH));
        assert_eq!(cli.state, PathBuf::from("state_seen.json"));
        assert_eq!(p.min_score, 3.5);
        assert!(!p.mark_seen);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "awards-watch",
            "--min-score",
            "5",
            "--mark-seen",
            "-s",
            "cfg/sources.toml",
        ]);
        let p = cli.run_params();
        assert_eq!(p.min_score, 5.0);
        assert!(p.mark_seen);
        assert_eq!(cli.sources, Some(PathBuf::from("cfg/sources.toml")));
    }
}
