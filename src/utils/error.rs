//! The `error` module defines the error types used within `vessel-tracker`.
//!
//! Only configuration, connect and subscribe failures are fatal; they bubble
//! up to `main` as an [`AppError`]. Everything else is logged where it happens.

use thiserror::Error;

/// Failure to establish the broker session.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid broker url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("broker connection failed: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    #[error("no CONNACK received within {0:?}")]
    Timeout(std::time::Duration),
}

/// Failure to register the topic subscriptions.
#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("no topics to subscribe to")]
    NoTopics,

    #[error("subscriptions are already being dispatched")]
    AlreadyDispatching,

    #[error("failed to send subscribe request: {0}")]
    Request(#[from] rumqttc::ClientError),

    #[error("broker connection failed while subscribing: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    #[error("broker refused subscription to '{topic}'")]
    Rejected { topic: String },

    #[error("no SUBACK received within {0:?}")]
    Timeout(std::time::Duration),
}

/// Failure of a best-effort request issued on an established session.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request could not be queued: {0}")]
    Request(#[from] rumqttc::ClientError),

    #[error("dispatch task did not stop within {0:?}, aborted")]
    DisconnectTimeout(std::time::Duration),
}

/// A payload that could not be turned into a position report.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected at least 2 coordinates, got {0}")]
    MissingCoordinates(usize),
}

/// Fatal errors that abort the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Subscribe(#[from] SubscribeError),
}
