mod settings;

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};

pub use settings::{BrokerSettings, PartialSettings, Settings, TrackingSettings};

use crate::handler::TimestampLayout;
use crate::tracking::{SubscriptionMode, parse_identifiers};

pub const URL_KEY: &str = "TRAFI_URL";

/// Loads the configuration from the optional `config/default` file and the
/// process environment, then merges it with the default values.
///
/// `.env` files are not read here; `main` loads them into the environment first.
pub fn load_config() -> Result<Settings, ConfigError> {
    resolve(load_partial()?)
}

/// Same sources as [`load_config`], but a missing broker url is not an
/// error. For commands that never connect.
pub fn load_offline_config() -> Result<Settings, ConfigError> {
    resolve_offline(load_partial()?)
}

fn load_partial() -> Result<PartialSettings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().ignore_empty(true));

    builder.build()?.try_deserialize()
}

/// Merges partial settings with the defaults.
pub fn resolve(partial: PartialSettings) -> Result<Settings, ConfigError> {
    if partial.trafi_url.is_none() {
        return Err(ConfigError::NotFound(URL_KEY.to_string()));
    }
    resolve_offline(partial)
}

/// Like [`resolve`], leaving the broker url empty when none is configured.
pub fn resolve_offline(partial: PartialSettings) -> Result<Settings, ConfigError> {
    let default = Settings::default();

    let mode = match partial.subscription_mode {
        Some(raw) => raw
            .parse::<SubscriptionMode>()
            .map_err(ConfigError::Message)?,
        None => default.tracking.mode,
    };

    let timestamp_layout = match partial.timestamp_layout {
        Some(raw) => raw
            .parse::<TimestampLayout>()
            .map_err(ConfigError::Message)?,
        None => default.tracking.timestamp_layout,
    };

    let vessels = partial
        .vessels_to_track
        .or(partial.mmsis_to_track)
        .map(|raw| parse_identifiers(&raw))
        .unwrap_or_default();

    Ok(Settings {
        broker: BrokerSettings {
            url: partial.trafi_url.unwrap_or(default.broker.url),
            username: partial.trafi_username,
            password: partial.trafi_password,
            client_id: partial.client_id.unwrap_or(default.broker.client_id),
            keep_alive: partial
                .keep_alive_secs
                .map(Duration::from_secs)
                .unwrap_or(default.broker.keep_alive),
            ping_timeout: partial
                .ping_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(default.broker.ping_timeout),
            connect_timeout: partial
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(default.broker.connect_timeout),
        },
        tracking: TrackingSettings {
            vessels,
            mode,
            timestamp_layout,
        },
        log_level: partial.log_level.unwrap_or(default.log_level),
    })
}

#[cfg(test)]
mod tests;
