use std::time::Duration;

use serde::Deserialize;

use crate::handler::TimestampLayout;
use crate::tracking::{Mmsi, SubscriptionMode};

/// Top-level configuration settings for the application.
///
/// Built once at startup and handed to the components that need it.
#[derive(Debug, Clone)]
pub struct Settings {
    pub broker: BrokerSettings,
    pub tracking: TrackingSettings,
    pub log_level: String,
}

/// How to reach and authenticate with the broker.
#[derive(Debug, Clone)]
pub struct BrokerSettings {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: String,
    pub keep_alive: Duration,
    pub ping_timeout: Duration,
    /// Upper bound on waiting for CONNACK and SUBACK.
    pub connect_timeout: Duration,
}

/// What to subscribe to and how to read the payloads.
#[derive(Debug, Clone, Default)]
pub struct TrackingSettings {
    pub vessels: Vec<Mmsi>,
    pub mode: SubscriptionMode,
    pub timestamp_layout: TimestampLayout,
}

/// Settings as found in the environment or the optional config file.
///
/// Keys are the lowercased environment variable names, so `TRAFI_URL`
/// lands in `trafi_url`. Missing values are filled from [`Settings::default`].
#[derive(Debug, Deserialize, Default)]
pub struct PartialSettings {
    pub trafi_url: Option<String>,
    pub trafi_username: Option<String>,
    pub trafi_password: Option<String>,
    pub vessels_to_track: Option<String>,
    pub mmsis_to_track: Option<String>,
    pub subscription_mode: Option<String>,
    pub timestamp_layout: Option<String>,
    pub keep_alive_secs: Option<u64>,
    pub ping_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub client_id: Option<String>,
    pub log_level: Option<String>,
}

pub fn default_client_id() -> String {
    format!("vessel-tracker-{}", uuid::Uuid::new_v4())
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: None,
            password: None,
            client_id: default_client_id(),
            keep_alive: Duration::from_secs(2),
            ping_timeout: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// Provides default values for `Settings`.
///
/// The broker url has no sensible default and stays empty.
impl Default for Settings {
    fn default() -> Self {
        Self {
            broker: BrokerSettings::default(),
            tracking: TrackingSettings::default(),
            log_level: "info".to_string(),
        }
    }
}
