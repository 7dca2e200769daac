//! The `{event, payload}` frame envelope carried by every session.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single message on the duplex channel.
///
/// `event` is one of the names in [`crate::events`]; `payload` is whatever
/// shape that event defines (see `kiosk_proto::device`, `::server`, `::admin`).
/// Unknown events are valid to decode — the router logs and drops them rather
/// than treating them as a framing error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    pub payload: Value,
}

impl Frame {
    pub fn new(event: impl Into<String>, payload: impl Serialize) -> serde_json::Result<Self> {
        Ok(Self {
            event: event.into(),
            payload: serde_json::to_value(payload)?,
        })
    }

    /// An empty-payload frame, for events that carry no data (e.g. `display:refresh`).
    pub fn bare(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            payload: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn payload_as<T: for<'de> Deserialize<'de>>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Ping {
        n: u32,
    }

    #[test]
    fn roundtrips_through_json() {
        let frame = Frame::new("test:ping", Ping { n: 3 }).unwrap();
        let json = serde_json::to_string(&frame).unwrap();
        let back: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event, "test:ping");
        assert_eq!(back.payload_as::<Ping>().unwrap(), Ping { n: 3 });
    }

    #[test]
    fn bare_frame_has_empty_object_payload() {
        let frame = Frame::bare("display:refresh");
        assert_eq!(frame.payload, Value::Object(serde_json::Map::new()));
    }
}
