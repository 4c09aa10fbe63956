// tests/sources_config.rs
use std::{env, fs};

use awards_watch::config::sources::{load_sources_default, load_sources_from, ENV_SOURCES_PATH};
use awards_watch::{ConfigError, SourceKind};

#[test]
fn json_and_toml_files_load_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let p_json = dir.path().join("sources.json");
    fs::write(
        &p_json,
        r#"[
  {"name": " Variety ", "rss": "https://variety.com/v/film/feed/", "url": "https://variety.com",
   "type": "trade", "affects_nom": true, "affects_win": false},
  {"name": "Gold Derby", "rss": "", "url": "https://www.goldderby.com/awards/",
   "type": "critic", "affects_nom": false, "affects_win": true}
]"#,
    )
    .unwrap();
    let v = load_sources_from(&p_json).unwrap();
    assert_eq!(v.len(), 2);
    assert_eq!(v[0].name, "Variety");
    assert_eq!(v[0].kind, SourceKind::Feed);
    assert_eq!(v[1].kind, SourceKind::Listing);
    assert_eq!(v[1].location.as_str(), "https://www.goldderby.com/awards/");

    let p_toml = dir.path().join("sources.toml");
    fs::write(
        &p_toml,
        r#"
[[sources]]
name = "Deadline"
kind = "feed"
location = "https://deadline.com/feed/"
classification = "trade"
affects_nomination = true

[[sources]]
name = "IndieWire"
url = "https://www.indiewire.com/c/awards/"
"#,
    )
    .unwrap();
    let t = load_sources_from(&p_toml).unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(t[0].kind, SourceKind::Feed);
    assert!(t[0].affects_nomination);
    assert_eq!(t[1].kind, SourceKind::Listing);
    assert_eq!(t[1].classification, "");
}

#[test]
fn unreadable_and_malformed_files_are_config_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("nope.json");
    assert!(matches!(
        load_sources_from(&missing),
        Err(ConfigError::Read { .. })
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ this is not json").unwrap();
    assert!(matches!(
        load_sources_from(&broken),
        Err(ConfigError::Parse(_))
    ));

    let non_http = dir.path().join("ftp.json");
    fs::write(&non_http, r#"[{"name": "A", "url": "ftp://a.test/list"}]"#).unwrap();
    assert!(matches!(
        load_sources_from(&non_http),
        Err(ConfigError::InvalidLocation { .. })
    ));
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // isolate cwd so the repo's own config/ is never read
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_SOURCES_PATH);

    // 1) nothing anywhere
    assert!(matches!(load_sources_default(), Err(ConfigError::Missing)));

    // 2) config/sources.toml
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(
        cfg_dir.join("sources.toml"),
        r#"
[[sources]]
name = "From config"
url = "https://config.test/awards/"
"#,
    )
    .unwrap();
    let v = load_sources_default().unwrap();
    assert_eq!(v[0].name, "From config");

    // 3) ./sources.json beats config/
    fs::write(
        tmp.path().join("sources.json"),
        r#"[{"name": "From root", "rss": "https://root.test/feed"}]"#,
    )
    .unwrap();
    let v = load_sources_default().unwrap();
    assert_eq!(v[0].name, "From root");

    // 4) env wins over both
    let p_env = tmp.path().join("elsewhere.json");
    fs::write(
        &p_env,
        r#"[{"name": "From env", "url": "https://env.test/"}]"#,
    )
    .unwrap();
    env::set_var(ENV_SOURCES_PATH, p_env.display().to_string());
    let v = load_sources_default().unwrap();
    assert_eq!(v[0].name, "From env");
    env::remove_var(ENV_SOURCES_PATH);

    env::set_current_dir(&old).unwrap();
}
