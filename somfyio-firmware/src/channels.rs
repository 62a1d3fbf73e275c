//! Inter-task communication statics
//!
//! Defines the static channels shared between Embassy tasks, the indicator
//! edge counter, and the status snapshot for the periodic reporter.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;

use somfyio_core::command::Command;
use somfyio_core::dispatcher::StatusSnapshot;
use somfyio_core::edge::EdgeCounter;
use somfyio_protocol::BusMessage;

/// Handoff capacity from link RX into the dispatcher's own bounded queue
const COMMAND_CHANNEL_SIZE: usize = 2;

/// Outbound messages waiting for the UART
const OUTBOUND_CHANNEL_SIZE: usize = 4;

/// Commands parsed off the bus, on their way to the dispatcher's queue
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Messages headed out to the bus adapter
pub static OUTBOUND_CHANNEL: Channel<CriticalSectionRawMutex, BusMessage, OUTBOUND_CHANNEL_SIZE> =
    Channel::new();

/// Falling-edge tally from the channel indicator line.
/// Incremented by the edge monitor, drained only by the remote task.
pub static EDGE_COUNTER: EdgeCounter = EdgeCounter::new();

/// Latest dispatcher status for the periodic reporter
pub static STATUS: Mutex<CriticalSectionRawMutex, StatusSnapshot> =
    Mutex::new(StatusSnapshot::empty());
