//! somfyio - Somfy blind remote bridge firmware
//!
//! Emulates button presses on a multi-channel Somfy handheld remote. The
//! remote's PCB hangs off GPIO: four idle-high button lines (channel select,
//! up, my/stop, down) and the channel indicator LED feeding back as a
//! falling-edge pulse train. Commands arrive from a message-bus adapter
//! over UART; the bridge converges the shared channel selector onto the
//! requested channel, fires the action press, and reports its status back.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use somfyio_core::config::RemoteConfig;
use somfyio_drivers::RemoteButtons;

mod channels;
mod tasks;

/// Topic prefix the bus adapter relays for this bridge.
pub const BASE_TOPIC: &str = "shades/terrace";

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("somfyio firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = RemoteConfig::default();

    // Setup UART for the bus adapter link
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for bus adapter link");

    // Remote button lines, idle high; pressing pulls a line low
    let buttons = RemoteButtons::new(
        Output::new(p.PIN_2, Level::High), // channel select
        Output::new(p.PIN_3, Level::High), // up
        Output::new(p.PIN_4, Level::High), // my / stop
        Output::new(p.PIN_5, Level::High), // down
    );

    // Channel indicator feedback, one falling edge per blink
    let feedback = Input::new(p.PIN_6, Pull::Up);

    info!("Remote pins initialized, {} channels", config.channel_count);

    // Spawn tasks
    spawner
        .spawn(tasks::link_rx_task(rx, config.channel_count))
        .unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner.spawn(tasks::edge_monitor_task(feedback)).unwrap();
    spawner.spawn(tasks::remote_task(buttons, config)).unwrap();
    spawner.spawn(tasks::status_task()).unwrap();

    info!("All tasks spawned, bridge running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
