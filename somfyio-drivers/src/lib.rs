//! Hardware actuation for the somfyio blind remote bridge
//!
//! The remote's buttons are wired to GPIO lines that idle high; a press is
//! emulated by pulling a line low for a bounded hold time. This crate keeps
//! the pin handling generic over `embedded-hal` traits so the press logic
//! tests on the host with mock pins.

#![no_std]
#![deny(unsafe_code)]

pub mod button;

pub use button::{ButtonActuator, RemoteButtons};
