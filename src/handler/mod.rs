//! The `handler` module turns inbound broker payloads into console output.
//!
//! A [`MessageHandler`] is registered with the broker client at subscribe
//! time and is invoked from the client's dispatch task once per message.

pub mod console;
pub mod message;

pub use console::ConsoleHandler;
pub use message::{PositionMessage, TimestampLayout};

/// Receives the raw payload of every message on the subscribed topics.
///
/// Implementations must not fail: problems with a single payload are
/// reported and the message is dropped.
pub trait MessageHandler: Send + Sync {
    fn handle(&self, payload: &[u8]);
}
