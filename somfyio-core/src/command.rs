//! Command data model
//!
//! A command pairs one remote action with the channel it applies to.
//! Commands are immutable once built; ownership flows from the bus intake
//! through the queue to the dispatcher.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Remote actions, one per button press variant.
///
/// `My` is the approach-stop position: it shares the physical stop button
/// and differs only in hold duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Sentinel decode of an unrecognized token; never executable
    #[default]
    None,
    /// Raise the blind
    Up,
    /// Approach-stop ("my" position), long hold on the stop button
    My,
    /// Stop movement
    Stop,
    /// Lower the blind
    Down,
}

impl Action {
    /// Decode a lowercase ASCII token.
    ///
    /// Unknown tokens map to [`Action::None`], which the dispatcher rejects
    /// with a classified error at submit time.
    pub fn from_token(token: &str) -> Self {
        match token {
            "up" => Action::Up,
            "down" => Action::Down,
            "my" => Action::My,
            "stop" => Action::Stop,
            _ => Action::None,
        }
    }

    /// Canonical name used in status reports.
    pub fn name(&self) -> &'static str {
        match self {
            Action::None => "none",
            Action::Up => "up",
            Action::My => "my",
            Action::Stop => "stop",
            Action::Down => "down",
        }
    }
}

/// One request: an action on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Command {
    /// Button to press once the channel is selected
    pub action: Action,
    /// Target channel index, `0..channel_count`
    pub channel: u8,
}

impl Command {
    /// Create a new command.
    pub const fn new(action: Action, channel: u8) -> Self {
        Self { action, channel }
    }
}
