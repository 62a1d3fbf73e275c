//! Periodic status reporter task
//!
//! Publishes the tracked channel and the last executed command to the bus
//! on a fixed period.

use defmt::*;
use embassy_time::{Duration, Ticker};

use somfyio_core::dispatcher::StatusSnapshot;
use somfyio_protocol::{
    render_channel_status, render_command_status, status_publish, CHANNEL_STATUS_SUFFIX,
    COMMAND_STATUS_SUFFIX,
};

use crate::channels::{OUTBOUND_CHANNEL, STATUS};
use crate::BASE_TOPIC;

/// Reporting period in seconds
const STATUS_PERIOD_SECS: u64 = 30;

/// Status task - reports bridge state to the bus
#[embassy_executor::task]
pub async fn status_task() {
    info!("Status task started");

    let mut ticker = Ticker::every(Duration::from_secs(STATUS_PERIOD_SECS));

    loop {
        ticker.next().await;

        let snapshot = { *STATUS.lock().await };
        send_status(&snapshot).await;
    }
}

/// Publish both status snippets
async fn send_status(snapshot: &StatusSnapshot) {
    let channel_payload = render_channel_status(snapshot.channel_selected);
    let command_payload = render_command_status(snapshot.last_executed.name());

    for (suffix, payload) in [
        (CHANNEL_STATUS_SUFFIX, channel_payload),
        (COMMAND_STATUS_SUFFIX, command_payload),
    ] {
        match status_publish(BASE_TOPIC, suffix, &payload) {
            Ok(msg) => OUTBOUND_CHANNEL.send(msg).await,
            Err(e) => warn!("Status encode error: {:?}", e),
        }
    }
}
