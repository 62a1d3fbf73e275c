//! Remote configuration types
//!
//! Typed, compiled-in configuration for the attached remote. There is no
//! config file or flash persistence; the bridge is stateless across boots.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hold and settle windows for the emulated presses, in milliseconds.
///
/// The remote needs a minimum press length to register at all, and the
/// indicator keeps blinking for a short while after the select button is
/// released, so probes carry a settle window during which edges are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PressTimings {
    /// Select press used to provoke the indicator while the channel is unknown
    pub probe_hold_ms: u32,
    /// Window after a probe during which indicator edges are counted
    pub probe_settle_ms: u32,
    /// Select press used to advance the selector by one channel
    pub step_hold_ms: u32,
    /// Pause after a step press before the next press
    pub step_settle_ms: u32,
    /// Default action press
    pub action_hold_ms: u32,
    /// Longer hold that turns a stop press into approach-stop
    pub my_hold_ms: u32,
}

impl Default for PressTimings {
    fn default() -> Self {
        Self {
            probe_hold_ms: 250,
            probe_settle_ms: 200,
            step_hold_ms: 100,
            step_settle_ms: 250,
            action_hold_ms: 250,
            my_hold_ms: 500,
        }
    }
}

/// Parameters of the attached remote model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RemoteConfig {
    /// Number of channels the shared select button cycles through
    pub channel_count: u8,
    /// Probe edge count above which the selector is on the all-channel
    /// position (its indicator blinks much faster than a single channel's
    /// confirmation flash)
    pub high_edge_threshold: u32,
    /// Press timing windows
    pub timings: PressTimings,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            channel_count: 4,
            high_edge_threshold: 20,
            timings: PressTimings::default(),
        }
    }
}
