//! Bus link transmit task
//!
//! Encodes outbound messages and writes them to the bus adapter UART.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use somfyio_protocol::MAX_FRAME_LEN;

use crate::channels::OUTBOUND_CHANNEL;

/// Link TX task - sends frames to the bus adapter
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx<'static>) {
    info!("Link TX task started");

    loop {
        let msg = OUTBOUND_CHANNEL.receive().await;

        let frame = match msg.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to encode message: {:?}", e);
                continue;
            }
        };

        let mut buf = [0u8; MAX_FRAME_LEN];
        match frame.encode(&mut buf) {
            Ok(len) => {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    warn!("UART write error: {:?}", e);
                }
            }
            Err(e) => warn!("Frame encode error: {:?}", e),
        }
    }
}
