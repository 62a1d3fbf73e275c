//! Bus link receive task
//!
//! Receives frames from the bus adapter, answers keep-alives, and turns
//! command publishes into queued commands.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use somfyio_core::command::{Action, Command};
use somfyio_protocol::{channel_from_topic, BusMessage, LinkParser};

use crate::channels::{COMMAND_CHANNEL, OUTBOUND_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the bus adapter
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx<'static>, channel_count: u8) {
    info!("Link RX task started");

    let mut parser = LinkParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match BusMessage::from_frame(&frame) {
                            Ok(msg) => handle_message(msg, channel_count).await,
                            Err(e) => warn!("Failed to decode link message: {:?}", e),
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Link frame error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Handle a decoded link message
async fn handle_message(msg: BusMessage, channel_count: u8) {
    match msg {
        BusMessage::Ping => {
            trace!("PING received");
            OUTBOUND_CHANNEL.send(BusMessage::Pong).await;
        }
        BusMessage::Pong => {
            // The adapter never expects an answer from us
            trace!("PONG received");
        }
        BusMessage::Publish { topic, payload } => {
            let Some(channel) = channel_from_topic(&topic) else {
                warn!("Ignoring publish on unrecognized topic");
                return;
            };
            if channel >= channel_count {
                warn!("Channel {} out of range, ignoring", channel);
                return;
            }

            // The dispatcher classifies unknown tokens at submit time
            let cmd = Command::new(Action::from_token(payload.trim()), channel);
            debug!("Command: {:?} on channel {}", cmd.action, cmd.channel);

            // Send to command channel, dropping if full
            if COMMAND_CHANNEL.try_send(cmd).is_err() {
                warn!("Command channel full, dropping command");
            }
        }
    }
}
