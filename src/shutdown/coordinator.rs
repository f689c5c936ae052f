use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::broker::PubSubClient;
use crate::tracking::TopicSet;

/// Bound handed to `disconnect` during teardown.
pub const DISCONNECT_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    Running,
    ShuttingDown,
    Terminated,
}

/// Owns the broker session once subscriptions are in place and tears it
/// down when a termination signal arrives.
pub struct ShutdownCoordinator<C> {
    client: C,
    topics: TopicSet,
    state: ShutdownState,
}

impl<C: PubSubClient> ShutdownCoordinator<C> {
    pub fn new(client: C, topics: TopicSet) -> Self {
        Self {
            client,
            topics,
            state: ShutdownState::Running,
        }
    }

    pub fn state(&self) -> ShutdownState {
        self.state
    }

    /// Waits for `signal`, tears the session down and then resolves `done`.
    pub async fn run<S>(mut self, signal: S, done: oneshot::Sender<()>)
    where
        S: Future<Output = &'static str>,
    {
        let name = signal.await;
        info!("received {name}, shutting down");

        self.shutdown().await;

        if done.send(()).is_err() {
            warn!("nobody is waiting for shutdown to complete");
        }
    }

    /// Unsubscribes every topic, then disconnects. Failures are logged and
    /// never stop the sequence. Calling this again after it finished is a no-op.
    pub async fn shutdown(&mut self) {
        if self.state != ShutdownState::Running {
            return;
        }
        self.state = ShutdownState::ShuttingDown;

        for topic in self.topics.keys() {
            if let Err(e) = self.client.unsubscribe(topic).await {
                warn!("failed to unsubscribe from {topic}: {e}");
            }
        }

        if let Err(e) = self.client.disconnect(DISCONNECT_TIMEOUT).await {
            warn!("disconnect did not complete cleanly: {e}");
        }
        println!("Disconnected and closed");

        self.state = ShutdownState::Terminated;
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }
}
