use chrono::Local;
use tracing::{debug, error};

use crate::handler::MessageHandler;
use crate::handler::message::{PositionMessage, TimestampLayout};
use crate::utils::error::DecodeError;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// Prints one line per decoded position report to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleHandler {
    layout: TimestampLayout,
}

impl ConsoleHandler {
    pub fn new(layout: TimestampLayout) -> Self {
        Self { layout }
    }

    /// Decodes `payload` and formats the line that `handle` prints.
    pub fn render(&self, payload: &[u8]) -> Result<String, DecodeError> {
        let msg = PositionMessage::decode(payload, self.layout)?;
        debug!("received {msg}");
        Ok(format_position(&msg))
    }
}

pub fn format_position(msg: &PositionMessage) -> String {
    let mut line = String::new();
    if let Some(ts) = msg.timestamp() {
        line.push_str(&ts.with_timezone(&Local).format(TIME_FORMAT).to_string());
        line.push(' ');
    }
    line.push_str(&format!(
        "vessel {} lon {} lat {}",
        msg.mmsi,
        msg.longitude(),
        msg.latitude()
    ));
    if let Some(heading) = msg.heading {
        line.push_str(&format!(" heading {heading}"));
    }
    line
}

impl MessageHandler for ConsoleHandler {
    fn handle(&self, payload: &[u8]) {
        match self.render(payload) {
            Ok(line) => println!("{line}"),
            Err(e) => error!(
                "failed to decode position message: {e} | {}",
                String::from_utf8_lossy(payload)
            ),
        }
    }
}
