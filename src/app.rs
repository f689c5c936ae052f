use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::broker::{MqttConnection, PubSubClient};
use crate::config::Settings;
use crate::handler::{ConsoleHandler, MessageHandler};
use crate::shutdown::{ShutdownCoordinator, termination_signal};
use crate::tracking::{TopicSet, subscription_topics};
use crate::utils::error::AppError;

pub fn topics_for(settings: &Settings) -> TopicSet {
    subscription_topics(settings.tracking.mode, &settings.tracking.vessels)
}

/// Connects, subscribes and blocks until a termination signal has been
/// handled. Returns once the session is closed; the caller exits the process.
pub async fn track(settings: Settings) -> Result<(), AppError> {
    let topics = topics_for(&settings);
    if topics.is_empty() {
        warn!("no valid vessel identifiers configured");
    }
    for topic in topics.keys() {
        info!("tracking {topic}");
    }

    let mut connection = MqttConnection::connect(&settings.broker).await?;

    let handler: Arc<dyn MessageHandler> =
        Arc::new(ConsoleHandler::new(settings.tracking.timestamp_layout));
    connection.subscribe_multiple(&topics, handler).await?;

    let (done_tx, done_rx) = oneshot::channel();
    let coordinator = ShutdownCoordinator::new(connection, topics);
    tokio::spawn(coordinator.run(termination_signal(), done_tx));

    if done_rx.await.is_err() {
        warn!("shutdown task ended without reporting completion");
    }
    Ok(())
}
