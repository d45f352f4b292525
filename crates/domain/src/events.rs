use serde::{Deserialize, Serialize};

use crate::channel::Channel;

/// Where an input came from. Provenance only; scoring ignores it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum InputSource {
    Keyboard,
    Touch,
    Midi,
    Hid,
    Gamepad,
}

/// A single trainee input. Timestamps are milliseconds since session start
/// on the caller's monotonic clock. Each event must be delivered to the
/// engine exactly once; the matcher has no dedup key of its own.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct InputEvent {
    pub channel: Channel,
    pub timestamp: f64,
    pub source: InputSource,
}

impl InputEvent {
    pub fn new(channel: Channel, timestamp: f64, source: InputSource) -> Self {
        Self {
            channel,
            timestamp,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_recorded_log_entry() {
        let event: InputEvent = serde_json::from_str(
            r#"{"channel": "left-hand", "timestamp": 1010.5, "source": "keyboard"}"#,
        )
        .unwrap();
        assert_eq!(event.channel, Channel::LeftHand);
        assert_eq!(event.source, InputSource::Keyboard);
        assert_eq!(event.timestamp, 1010.5);
    }
}
