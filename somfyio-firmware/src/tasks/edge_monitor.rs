//! Indicator edge monitor task
//!
//! Counts falling edges on the feedback line. The selected channel's
//! indicator flashes once after a select press and the all-channel position
//! blinks rapidly; the remote task drains the tally after each probe settle
//! window to classify what it saw.

use defmt::*;
use embassy_rp::gpio::Input;

use crate::channels::EDGE_COUNTER;

/// Edge monitor task - tallies indicator blinks
#[embassy_executor::task]
pub async fn edge_monitor_task(mut feedback: Input<'static>) {
    info!("Edge monitor task started");

    loop {
        feedback.wait_for_falling_edge().await;
        EDGE_COUNTER.on_edge();
    }
}
