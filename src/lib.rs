//! # vessel-tracker
//!
//! `vessel-tracker` is a small MQTT subscriber that follows the location
//! updates of a configured set of vessels and prints each decoded position
//! report to the console.
//!
//! ## Core Modules
//!
//! - `config`: Loads settings from the environment and an optional config file.
//! - `tracking`: Parses vessel identifiers and derives the topics to subscribe to.
//! - `broker`: Manages the MQTT session and dispatches inbound messages.
//! - `handler`: Decodes position payloads and prints them.
//! - `shutdown`: Unsubscribes and disconnects when the process is signalled.
//! - `utils`: Error types and logging setup.

pub mod app;
pub mod broker;
pub mod config;
pub mod handler;
pub mod shutdown;
pub mod tracking;
pub mod utils;
