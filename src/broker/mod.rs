//! The `broker` module is the tracker's side of the publish/subscribe
//! session: endpoint parsing, the MQTT connection, and the [`PubSubClient`]
//! seam the shutdown sequence talks to.

pub mod endpoint;
pub mod mqtt;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::handler::MessageHandler;
use crate::tracking::TopicSet;
use crate::utils::error::{ClientError, SubscribeError};

pub use endpoint::{BrokerEndpoint, Scheme};
pub use mqtt::MqttConnection;

/// Operations available on an established broker session.
#[async_trait]
pub trait PubSubClient: Send {
    /// Subscribes to every topic in `topics` and routes each inbound message
    /// to `handler`.
    async fn subscribe_multiple(
        &mut self,
        topics: &TopicSet,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<(), SubscribeError>;

    /// Best-effort; the broker's answer is not awaited.
    async fn unsubscribe(&mut self, topic: &str) -> Result<(), ClientError>;

    /// Closes the session. The session is torn down unconditionally once
    /// `timeout` has elapsed.
    async fn disconnect(&mut self, timeout: Duration) -> Result<(), ClientError>;
}
