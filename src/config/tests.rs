use super::settings::Settings;
use super::{
    PartialSettings, load_config, load_offline_config, resolve, resolve_offline,
};
use crate::handler::TimestampLayout;
use crate::tracking::{Mmsi, SubscriptionMode};

use config::ConfigError;
use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const KEYS: [&str; 12] = [
    "TRAFI_URL",
    "TRAFI_USERNAME",
    "TRAFI_PASSWORD",
    "VESSELS_TO_TRACK",
    "MMSIS_TO_TRACK",
    "SUBSCRIPTION_MODE",
    "TIMESTAMP_LAYOUT",
    "KEEP_ALIVE_SECS",
    "PING_TIMEOUT_SECS",
    "CONNECT_TIMEOUT_SECS",
    "CLIENT_ID",
    "LOG_LEVEL",
];

/// Runs `f` with every known key cleared except the given overrides.
fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let kvs: Vec<(&str, Option<&str>)> = KEYS
        .iter()
        .map(|key| {
            let value = vars.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
            (*key, value)
        })
        .collect();
    temp_env::with_vars(kvs, f)
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert!(settings.broker.url.is_empty());
    assert_eq!(settings.broker.keep_alive, Duration::from_secs(2));
    assert_eq!(settings.broker.ping_timeout, Duration::from_secs(1));
    assert!(settings.broker.client_id.starts_with("vessel-tracker-"));
    assert_eq!(settings.tracking.mode, SubscriptionMode::PerVessel);
    assert_eq!(settings.tracking.timestamp_layout, TimestampLayout::Nested);
    assert_eq!(settings.log_level, "info");
}

#[test]
fn test_resolve_requires_url() {
    let err = resolve(PartialSettings::default()).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(key) if key == "TRAFI_URL"));
}

#[test]
fn test_resolve_offline_allows_missing_url() {
    let partial = PartialSettings {
        vessels_to_track: Some("5".to_string()),
        subscription_mode: Some("wildcard".to_string()),
        ..Default::default()
    };
    let settings = resolve_offline(partial).unwrap();
    assert!(settings.broker.url.is_empty());
    assert_eq!(settings.tracking.vessels, vec![Mmsi(5)]);
    assert_eq!(settings.tracking.mode, SubscriptionMode::Wildcard);
}

#[test]
fn test_resolve_offline_still_rejects_bad_layout() {
    let partial = PartialSettings {
        timestamp_layout: Some("sideways".to_string()),
        ..Default::default()
    };
    assert!(matches!(resolve_offline(partial), Err(ConfigError::Message(_))));
}

#[test]
fn test_resolve_rejects_unknown_mode() {
    let partial = PartialSettings {
        trafi_url: Some("tcp://localhost:1883".to_string()),
        subscription_mode: Some("some".to_string()),
        ..Default::default()
    };
    assert!(matches!(resolve(partial), Err(ConfigError::Message(_))));
}

#[test]
fn test_resolve_prefers_vessels_over_mmsis() {
    let partial = PartialSettings {
        trafi_url: Some("tcp://localhost:1883".to_string()),
        vessels_to_track: Some("1,2".to_string()),
        mmsis_to_track: Some("3".to_string()),
        ..Default::default()
    };
    let settings = resolve(partial).unwrap();
    assert_eq!(settings.tracking.vessels, vec![Mmsi(1), Mmsi(2)]);
}

#[test]
#[serial]
fn test_load_config_from_env() {
    let settings = with_env(
        &[
            ("TRAFI_URL", "wss://meri.example.org:443/mqtt"),
            ("TRAFI_USERNAME", "digitraffic"),
            ("TRAFI_PASSWORD", "secret"),
            ("MMSIS_TO_TRACK", "230, abc, 123456789, "),
            ("SUBSCRIPTION_MODE", "wildcard"),
            ("TIMESTAMP_LAYOUT", "flat"),
            ("KEEP_ALIVE_SECS", "10"),
            ("CLIENT_ID", "tracker-1"),
        ],
        load_config,
    )
    .expect("load_config failed");

    assert_eq!(settings.broker.url, "wss://meri.example.org:443/mqtt");
    assert_eq!(settings.broker.username.as_deref(), Some("digitraffic"));
    assert_eq!(settings.broker.password.as_deref(), Some("secret"));
    assert_eq!(settings.broker.client_id, "tracker-1");
    assert_eq!(settings.broker.keep_alive, Duration::from_secs(10));
    assert_eq!(settings.broker.ping_timeout, Duration::from_secs(1));
    assert_eq!(settings.tracking.vessels, vec![Mmsi(230), Mmsi(123456789)]);
    assert_eq!(settings.tracking.mode, SubscriptionMode::Wildcard);
    assert_eq!(settings.tracking.timestamp_layout, TimestampLayout::Flat);
}

#[test]
#[serial]
fn test_load_config_ignores_empty_credentials() {
    let settings = with_env(
        &[
            ("TRAFI_URL", "tcp://localhost:1883"),
            ("TRAFI_USERNAME", ""),
            ("VESSELS_TO_TRACK", "42"),
        ],
        load_config,
    )
    .unwrap();

    assert!(settings.broker.username.is_none());
    assert_eq!(settings.tracking.vessels, vec![Mmsi(42)]);
}

#[test]
#[serial]
fn test_load_config_without_url_fails() {
    let result = with_env(&[("VESSELS_TO_TRACK", "42")], load_config);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_offline_config_without_url_lists_vessels() {
    let settings = with_env(&[("VESSELS_TO_TRACK", "42, 43")], load_offline_config)
        .expect("load_offline_config failed");
    assert!(settings.broker.url.is_empty());
    assert_eq!(settings.tracking.vessels, vec![Mmsi(42), Mmsi(43)]);
}

#[test]
#[serial]
fn test_load_config_from_file_fills_gaps() {
    // load_config reads config/default.toml relative to the working directory.
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        trafi_url = "tcp://file.example.org:1883"
        vessels_to_track = "7, 8"
        connect_timeout_secs = 5
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let result = with_env(&[("LOG_LEVEL", "debug")], load_config);

    env::set_current_dir(orig).expect("restore cwd");

    let cfg = result.expect("load_config failed");
    assert_eq!(cfg.broker.url, "tcp://file.example.org:1883");
    assert_eq!(cfg.broker.connect_timeout, Duration::from_secs(5));
    assert_eq!(cfg.tracking.vessels, vec![Mmsi(7), Mmsi(8)]);
    assert_eq!(cfg.log_level, "debug");
}
