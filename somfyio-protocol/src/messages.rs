//! Link messages and topic conventions
//!
//! Inbound commands arrive as publishes on `<base>/cmd/channel<d>` with the
//! action token as payload. The bridge publishes its status under
//! `<base>/state/...`. Keep-alive is a bare ping/pong pair so the adapter
//! can tell a busy bridge from a dead one.

use core::fmt::Write;

use heapless::String;

use crate::frame::{
    LinkError, LinkFrame, MAX_PAYLOAD_LEN, MAX_TOPIC_LEN, TYPE_PING, TYPE_PONG, TYPE_PUBLISH,
};

/// Topic segment that precedes the channel digit on command topics.
pub const COMMAND_TOPIC_MARKER: &str = "/cmd/channel";

/// Status topic suffix for the tracked channel.
pub const CHANNEL_STATUS_SUFFIX: &str = "state/channel";

/// Status topic suffix for the last executed command.
pub const COMMAND_STATUS_SUFFIX: &str = "state/command";

/// Messages crossing the adapter link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusMessage {
    /// Topic/payload pair relayed to or from the bus
    Publish {
        /// Full bus topic
        topic: String<MAX_TOPIC_LEN>,
        /// Message body
        payload: String<MAX_PAYLOAD_LEN>,
    },
    /// Keep-alive request from the adapter
    Ping,
    /// Keep-alive answer
    Pong,
}

impl BusMessage {
    /// Build a publish message, checking the field lengths.
    pub fn publish(topic: &str, payload: &str) -> Result<Self, LinkError> {
        let frame = LinkFrame::new(TYPE_PUBLISH, topic, payload)?;
        Ok(BusMessage::Publish {
            topic: frame.topic,
            payload: frame.payload,
        })
    }

    /// Decode a parsed frame.
    pub fn from_frame(frame: &LinkFrame) -> Result<Self, LinkError> {
        match frame.frame_type {
            TYPE_PUBLISH => Ok(BusMessage::Publish {
                topic: frame.topic.clone(),
                payload: frame.payload.clone(),
            }),
            TYPE_PING => Ok(BusMessage::Ping),
            TYPE_PONG => Ok(BusMessage::Pong),
            _ => Err(LinkError::UnknownType),
        }
    }

    /// Encode this message into a frame.
    pub fn to_frame(&self) -> Result<LinkFrame, LinkError> {
        match self {
            BusMessage::Publish { topic, payload } => LinkFrame::new(TYPE_PUBLISH, topic, payload),
            BusMessage::Ping => Ok(LinkFrame::empty(TYPE_PING)),
            BusMessage::Pong => Ok(LinkFrame::empty(TYPE_PONG)),
        }
    }
}

/// Extract the channel number from a command topic.
///
/// Accepts `<anything>/cmd/channel<digits>`; anything else is `None`. The
/// number is not range-checked here - the dispatcher knows the channel
/// count.
pub fn channel_from_topic(topic: &str) -> Option<u8> {
    let marker = topic.rfind(COMMAND_TOPIC_MARKER)?;
    let digits = &topic[marker + COMMAND_TOPIC_MARKER.len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Render the tracked-channel status payload, `-1` while unknown.
pub fn render_channel_status(selected: Option<u8>) -> String<MAX_PAYLOAD_LEN> {
    let value = selected.map_or(-1, i16::from);
    let mut payload = String::new();
    // Within capacity for any i16
    let _ = write!(payload, "{{\"channel\":{}}}", value);
    payload
}

/// Render the last-command status payload.
pub fn render_command_status(name: &str) -> String<MAX_PAYLOAD_LEN> {
    let mut payload = String::new();
    let _ = write!(payload, "{{\"command\":\"{}\"}}", name);
    payload
}

/// Build a status publish under `<base>/<suffix>`.
pub fn status_publish(base: &str, suffix: &str, payload: &str) -> Result<BusMessage, LinkError> {
    let mut topic = String::<MAX_TOPIC_LEN>::new();
    topic.push_str(base).map_err(|_| LinkError::TopicTooLong)?;
    topic.push('/').map_err(|_| LinkError::TopicTooLong)?;
    topic.push_str(suffix).map_err(|_| LinkError::TopicTooLong)?;
    BusMessage::publish(&topic, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::LinkParser;

    #[test]
    fn test_publish_roundtrip() {
        let original = BusMessage::publish("shades/terrace/cmd/channel1", "up").unwrap();
        let frame = original.to_frame().unwrap();

        let mut buffer = [0u8; crate::frame::MAX_FRAME_LEN];
        let len = frame.encode(&mut buffer).unwrap();

        let mut parser = LinkParser::new();
        let parsed = parser.feed_bytes(&buffer[..len]).unwrap().unwrap();
        assert_eq!(BusMessage::from_frame(&parsed).unwrap(), original);
    }

    #[test]
    fn test_keep_alive_roundtrip() {
        for msg in [BusMessage::Ping, BusMessage::Pong] {
            let frame = msg.to_frame().unwrap();
            assert_eq!(BusMessage::from_frame(&frame).unwrap(), msg);
        }
    }

    #[test]
    fn test_channel_from_topic_accepts() {
        assert_eq!(
            channel_from_topic("shades/terrace/cmd/channel2"),
            Some(2)
        );
        assert_eq!(channel_from_topic("x/cmd/channel0"), Some(0));
        // Not range-checked here; the dispatcher rejects out-of-range
        assert_eq!(channel_from_topic("x/cmd/channel12"), Some(12));
    }

    #[test]
    fn test_channel_from_topic_rejects() {
        assert_eq!(channel_from_topic("shades/terrace/cmd/channel"), None);
        assert_eq!(channel_from_topic("shades/terrace/cmd/channelx"), None);
        assert_eq!(channel_from_topic("shades/terrace/state/channel1"), None);
        assert_eq!(channel_from_topic("shades/terrace/cmd/channel2/extra"), None);
        assert_eq!(channel_from_topic(""), None);
        // Larger than any u8 channel
        assert_eq!(channel_from_topic("x/cmd/channel999"), None);
    }

    #[test]
    fn test_render_channel_status() {
        assert_eq!(render_channel_status(Some(2)).as_str(), "{\"channel\":2}");
        assert_eq!(render_channel_status(None).as_str(), "{\"channel\":-1}");
    }

    #[test]
    fn test_render_command_status() {
        assert_eq!(
            render_command_status("up").as_str(),
            "{\"command\":\"up\"}"
        );
        assert_eq!(
            render_command_status("none").as_str(),
            "{\"command\":\"none\"}"
        );
    }

    #[test]
    fn test_status_publish_topic() {
        let msg = status_publish("shades/terrace", CHANNEL_STATUS_SUFFIX, "{\"channel\":3}")
            .unwrap();
        let BusMessage::Publish { topic, payload } = msg else {
            panic!("expected a publish");
        };
        assert_eq!(topic.as_str(), "shades/terrace/state/channel");
        assert_eq!(payload.as_str(), "{\"channel\":3}");
    }
}
