//! Remote dispatcher task
//!
//! Owns the button lines and the command dispatcher. Executes the press
//! requests the dispatcher emits, feeds indicator edge counts back after
//! each probe, and keeps the shared status snapshot current.
//!
//! A press blocks only this task; keep-alive and status publication keep
//! running in their own tasks while a button is held.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Delay, Timer};

use somfyio_core::command::Command;
use somfyio_core::config::RemoteConfig;
use somfyio_core::dispatcher::{Dispatcher, PulseKind, PulseRequest, SubmitError, TickAction};
use somfyio_drivers::RemoteButtons;

use crate::channels::{COMMAND_CHANNEL, EDGE_COUNTER, STATUS};

/// Remote task - converges the channel selector and fires action presses
#[embassy_executor::task]
pub async fn remote_task(mut buttons: RemoteButtons<Output<'static>>, config: RemoteConfig) {
    info!("Remote task started");

    let mut dispatcher = Dispatcher::new(config);
    let mut delay = Delay;

    loop {
        // Pull in anything the link delivered while a press was running
        while let Ok(cmd) = COMMAND_CHANNEL.try_receive() {
            submit(&mut dispatcher, cmd);
        }

        match dispatcher.tick() {
            TickAction::Idle => {
                let cmd = COMMAND_CHANNEL.receive().await;
                submit(&mut dispatcher, cmd);
            }
            TickAction::Pulse(req) => {
                execute_pulse(&mut buttons, &mut delay, &mut dispatcher, req).await;
                publish_status(&dispatcher).await;
            }
            TickAction::Failed(e) => {
                warn!("Request dropped: {:?}", e);
            }
        }
    }
}

/// Feed one command into the dispatcher's queue
fn submit(dispatcher: &mut Dispatcher, cmd: Command) {
    match dispatcher.submit(cmd) {
        Ok(()) => debug!("Queued {:?} for channel {}", cmd.action, cmd.channel),
        Err(SubmitError::QueueFull(dropped)) => {
            warn!("Command queue full, rejecting {:?}", dropped.action);
        }
        Err(SubmitError::ChannelOutOfRange(channel)) => {
            warn!("Channel {} out of range, rejecting", channel);
        }
        Err(SubmitError::UnmappedAction) => {
            warn!("Action has no button mapping, rejecting");
        }
    }
}

/// Perform one press request and report its completion
async fn execute_pulse(
    buttons: &mut RemoteButtons<Output<'static>>,
    delay: &mut Delay,
    dispatcher: &mut Dispatcher,
    req: PulseRequest,
) {
    // Stale blinks from before this probe must not leak into its window
    if req.kind == PulseKind::Probe {
        let _ = EDGE_COUNTER.read_and_reset();
    }

    buttons.press(req.line, delay, req.hold_ms).await;

    if req.settle_ms > 0 {
        Timer::after_millis(u64::from(req.settle_ms)).await;
    }

    let edges = EDGE_COUNTER.read_and_reset();
    if req.kind == PulseKind::Probe {
        debug!("Probe saw {} edges", edges);
    }

    dispatcher.pulse_done(edges);
}

/// Refresh the snapshot the status reporter publishes
async fn publish_status(dispatcher: &Dispatcher) {
    let mut status = STATUS.lock().await;
    *status = dispatcher.status();
}
