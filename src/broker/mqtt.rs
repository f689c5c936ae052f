//! MQTT session
//!
//! `MqttConnection` wraps a `rumqttc` client and its event loop. The event
//! loop is driven inline while waiting for CONNACK and SUBACK, then handed to
//! a dispatch task that feeds every inbound PUBLISH to the registered handler
//! until the session is closed. Nothing is retried: once the event loop
//! reports an error the dispatch task stops.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{
    AsyncClient, ConnAck, ConnectionError, Event, EventLoop, MqttOptions, Outgoing, Packet, SubAck,
    SubscribeFilter, SubscribeReasonCode,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::broker::PubSubClient;
use crate::broker::endpoint::BrokerEndpoint;
use crate::config::BrokerSettings;
use crate::handler::MessageHandler;
use crate::tracking::TopicSet;
use crate::utils::error::{ClientError, ConnectError, SubscribeError};

const REQUEST_CAPACITY: usize = 10;

pub struct MqttConnection {
    client: AsyncClient,
    eventloop: Option<EventLoop>,
    dispatcher: Option<JoinHandle<()>>,
    ack_timeout: Duration,
}

impl MqttConnection {
    /// Opens the session and waits until the broker acknowledges it.
    pub async fn connect(settings: &BrokerSettings) -> Result<Self, ConnectError> {
        let endpoint = BrokerEndpoint::parse(&settings.url)?;

        let mut options =
            MqttOptions::new(settings.client_id.clone(), endpoint.host.clone(), endpoint.port);
        options.set_keep_alive(settings.keep_alive);
        options.set_transport(endpoint.transport());
        if let Some(username) = &settings.username {
            options.set_credentials(
                username.clone(),
                settings.password.clone().unwrap_or_default(),
            );
        }

        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);
        // A missing PINGRESP surfaces at the next keep-alive tick; the ping
        // timeout bounds every network round trip in between.
        eventloop
            .network_options
            .set_connection_timeout(settings.ping_timeout.as_secs().max(1));

        info!("connecting to {} as {}", settings.url, settings.client_id);

        let connack = async {
            loop {
                match eventloop.poll().await? {
                    Event::Incoming(Packet::ConnAck(ack)) => {
                        return Ok::<ConnAck, ConnectionError>(ack);
                    }
                    event => trace!("{event:?}"),
                }
            }
        };

        match tokio::time::timeout(settings.connect_timeout, connack).await {
            Err(_) => Err(ConnectError::Timeout(settings.connect_timeout)),
            Ok(Err(e)) => Err(e.into()),
            Ok(Ok(ack)) => {
                debug!("connected, session present: {}", ack.session_present);
                Ok(MqttConnection {
                    client,
                    eventloop: Some(eventloop),
                    dispatcher: None,
                    ack_timeout: settings.connect_timeout,
                })
            }
        }
    }
}

#[async_trait]
impl PubSubClient for MqttConnection {
    async fn subscribe_multiple(
        &mut self,
        topics: &TopicSet,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<(), SubscribeError> {
        if topics.is_empty() {
            return Err(SubscribeError::NoTopics);
        }
        let mut eventloop = self
            .eventloop
            .take()
            .ok_or(SubscribeError::AlreadyDispatching)?;

        let filters: Vec<SubscribeFilter> = topics
            .iter()
            .map(|(topic, level)| SubscribeFilter::new(topic.clone(), (*level).into()))
            .collect();
        let requested: Vec<String> = filters.iter().map(|f| f.path.clone()).collect();

        self.client.subscribe_many(filters).await?;

        // Retained or early messages may arrive before the SUBACK.
        let suback = async {
            loop {
                match eventloop.poll().await? {
                    Event::Incoming(Packet::SubAck(ack)) => {
                        return Ok::<SubAck, ConnectionError>(ack);
                    }
                    Event::Incoming(Packet::Publish(publish)) => handler.handle(&publish.payload),
                    event => trace!("{event:?}"),
                }
            }
        };

        let ack = tokio::time::timeout(self.ack_timeout, suback)
            .await
            .map_err(|_| SubscribeError::Timeout(self.ack_timeout))??;

        for (topic, code) in requested.iter().zip(&ack.return_codes) {
            if matches!(code, SubscribeReasonCode::Failure) {
                return Err(SubscribeError::Rejected {
                    topic: topic.clone(),
                });
            }
        }

        info!("subscribed to {} topics", requested.len());
        self.dispatcher = Some(tokio::spawn(dispatch(eventloop, handler)));
        Ok(())
    }

    async fn unsubscribe(&mut self, topic: &str) -> Result<(), ClientError> {
        self.client.unsubscribe(topic).await?;
        Ok(())
    }

    async fn disconnect(&mut self, timeout: Duration) -> Result<(), ClientError> {
        let Some(mut dispatcher) = self.dispatcher.take() else {
            // Nobody drives the event loop, so there is nothing to flush.
            self.client.try_disconnect()?;
            return Ok(());
        };

        let client = &self.client;
        let close = async {
            client.disconnect().await?;
            let _ = (&mut dispatcher).await;
            Ok::<(), ClientError>(())
        };

        match tokio::time::timeout(timeout, close).await {
            Ok(result) => result,
            Err(_) => {
                dispatcher.abort();
                Err(ClientError::DisconnectTimeout(timeout))
            }
        }
    }
}

async fn dispatch(mut eventloop: EventLoop, handler: Arc<dyn MessageHandler>) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                trace!("message on {}", publish.topic);
                handler.handle(&publish.payload);
            }
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                debug!("disconnect sent, dispatch stopped");
                break;
            }
            Ok(event) => trace!("{event:?}"),
            Err(e) => {
                warn!("broker connection closed: {e}");
                break;
            }
        }
    }
}
