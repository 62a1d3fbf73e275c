//! Bus-adapter link protocol
//!
//! The bridge does not speak to the network itself. A bus adapter (the
//! MQTT-facing half of the deployment) relays topic publishes over UART in
//! both directions, and this crate defines that link:
//!
//! ```text
//! ┌───────┬──────┬───────────┬─────────────┬───────┬─────────┬──────────┐
//! │ START │ TYPE │ TOPIC_LEN │ PAYLOAD_LEN │ TOPIC │ PAYLOAD │ CHECKSUM │
//! │ 1B    │ 1B   │ 1B        │ 1B          │ 0-64B │ 0-32B   │ 1B       │
//! └───────┴──────┴───────────┴─────────────┴───────┴─────────┴──────────┘
//! ```
//!
//! The adapter stays a dumb relay: it forwards matching publishes verbatim
//! and answers nothing on its own. Command decoding, channel validation and
//! status rendering all live on the bridge side.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{
    LinkError, LinkFrame, LinkParser, FRAME_START, MAX_FRAME_LEN, MAX_PAYLOAD_LEN, MAX_TOPIC_LEN,
};
pub use messages::{
    channel_from_topic, render_channel_status, render_command_status, status_publish, BusMessage,
    CHANNEL_STATUS_SUFFIX, COMMAND_STATUS_SUFFIX, COMMAND_TOPIC_MARKER,
};
