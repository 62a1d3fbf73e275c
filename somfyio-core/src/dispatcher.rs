//! Command dispatcher
//!
//! The single control loop of the bridge: pops one queued command at a time,
//! converges the channel selector via the tracker, then fires the action
//! press. Hardware and time stay with the caller: [`Dispatcher::tick`] emits
//! at most one outstanding [`PulseRequest`], and the caller completes it
//! with [`Dispatcher::pulse_done`] before ticking again.

use crate::command::{Action, Command};
use crate::config::RemoteConfig;
use crate::queue::CommandQueue;
use crate::tracker::{ChannelTracker, TrackerStep};

/// Consecutive uninformative probes tolerated before the pending request is
/// dropped. Bounds the otherwise-unbounded probe retry loop.
pub const MAX_PROBE_ATTEMPTS: u8 = 8;

/// Output line a pulse drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Shared channel-select button
    Select,
    /// Up button
    Up,
    /// My/stop button
    My,
    /// Down button
    Down,
}

/// What an emitted pulse is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseKind {
    /// Select press to provoke the indicator; edge count expected back
    Probe,
    /// Select press advancing one channel
    Step,
    /// The requested action press itself
    Action,
}

/// One press for the caller to perform: drive `line` active for `hold_ms`,
/// restore idle, wait `settle_ms`, then call [`Dispatcher::pulse_done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseRequest {
    /// Line to drive
    pub line: Line,
    /// Active hold time
    pub hold_ms: u32,
    /// Quiet window after release
    pub settle_ms: u32,
    /// Purpose of the press
    pub kind: PulseKind,
}

/// Dispatcher phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchState {
    /// No request in flight
    Idle,
    /// Converging the selector onto the requested channel
    Selecting,
    /// Firing the action press
    Acting,
}

/// Why `submit` refused a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubmitError {
    /// The bounded queue is at capacity; the command is handed back
    QueueFull(Command),
    /// Channel index outside the configured range
    ChannelOutOfRange(u8),
    /// The sentinel action has no button mapping
    UnmappedAction,
}

/// Why an accepted command was dropped mid-flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Probe retry budget exhausted without classifying the channel
    ChannelUndetermined(Command),
    /// The pending action had no button mapping
    UnmappedAction(Command),
}

/// Caller instruction for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickAction {
    /// Nothing to do; wait for the next command
    Idle,
    /// Perform this press, then call `pulse_done`
    Pulse(PulseRequest),
    /// The pending request was dropped
    Failed(DispatchError),
}

/// Status values exposed to the periodic reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    /// Tracked channel, `None` while unknown
    pub channel_selected: Option<u8>,
    /// Last action whose press completed
    pub last_executed: Action,
    /// Commands waiting behind the in-flight one
    pub queued: usize,
}

impl StatusSnapshot {
    /// Boot-time snapshot: nothing tracked, nothing executed.
    pub const fn empty() -> Self {
        Self {
            channel_selected: None,
            last_executed: Action::None,
            queued: 0,
        }
    }
}

/// Owns the queue, the tracker and the in-flight request.
#[derive(Debug)]
pub struct Dispatcher {
    config: RemoteConfig,
    queue: CommandQueue,
    tracker: ChannelTracker,
    state: DispatchState,
    pending: Option<Command>,
    awaiting: Option<PulseKind>,
    probe_attempts: u8,
    last_executed: Action,
}

impl Dispatcher {
    /// Create an idle dispatcher with an unknown selector position.
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            tracker: ChannelTracker::new(config.channel_count, config.high_edge_threshold),
            config,
            queue: CommandQueue::new(),
            state: DispatchState::Idle,
            pending: None,
            awaiting: None,
            probe_attempts: 0,
            last_executed: Action::None,
        }
    }

    /// Current phase.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// The in-flight command, if any.
    pub fn pending(&self) -> Option<&Command> {
        self.pending.as_ref()
    }

    /// Values for the status reporter.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            channel_selected: self.tracker.selected(),
            last_executed: self.last_executed,
            queued: self.queue.len(),
        }
    }

    /// Accept a command into the queue.
    ///
    /// Sentinel actions and out-of-range channels are refused here with a
    /// classified error rather than reaching the actuation step.
    pub fn submit(&mut self, cmd: Command) -> Result<(), SubmitError> {
        if cmd.action == Action::None {
            return Err(SubmitError::UnmappedAction);
        }
        if cmd.channel >= self.config.channel_count {
            return Err(SubmitError::ChannelOutOfRange(cmd.channel));
        }
        self.queue.push(cmd).map_err(SubmitError::QueueFull)
    }

    /// Advance the state machine.
    ///
    /// Emits at most one press. While a press is outstanding this returns
    /// [`TickAction::Idle`]; complete it with [`Dispatcher::pulse_done`]
    /// first. A tick may run through several phases at once - popping a
    /// command, finding the selector already converged and moving straight
    /// to the action press.
    pub fn tick(&mut self) -> TickAction {
        if self.awaiting.is_some() {
            return TickAction::Idle;
        }
        loop {
            match self.state {
                DispatchState::Idle => match self.queue.pop() {
                    Some(cmd) => {
                        self.pending = Some(cmd);
                        self.probe_attempts = 0;
                        self.state = DispatchState::Selecting;
                    }
                    None => return TickAction::Idle,
                },
                DispatchState::Selecting => {
                    let Some(cmd) = self.pending else {
                        self.state = DispatchState::Idle;
                        continue;
                    };
                    match self.tracker.advance_toward(cmd.channel) {
                        TrackerStep::Converged => self.state = DispatchState::Acting,
                        TrackerStep::Probe => {
                            if self.probe_attempts >= MAX_PROBE_ATTEMPTS {
                                self.pending = None;
                                self.state = DispatchState::Idle;
                                return TickAction::Failed(DispatchError::ChannelUndetermined(
                                    cmd,
                                ));
                            }
                            return self.emit(PulseRequest {
                                line: Line::Select,
                                hold_ms: self.config.timings.probe_hold_ms,
                                settle_ms: self.config.timings.probe_settle_ms,
                                kind: PulseKind::Probe,
                            });
                        }
                        TrackerStep::Step => {
                            return self.emit(PulseRequest {
                                line: Line::Select,
                                hold_ms: self.config.timings.step_hold_ms,
                                settle_ms: self.config.timings.step_settle_ms,
                                kind: PulseKind::Step,
                            });
                        }
                    }
                }
                DispatchState::Acting => {
                    let Some(cmd) = self.pending else {
                        self.state = DispatchState::Idle;
                        continue;
                    };
                    match self.action_pulse(cmd.action) {
                        Some(req) => return self.emit(req),
                        None => {
                            // submit() refuses sentinel actions, so this arm
                            // only fires if a mapping is ever removed
                            self.pending = None;
                            self.state = DispatchState::Idle;
                            return TickAction::Failed(DispatchError::UnmappedAction(cmd));
                        }
                    }
                }
            }
        }
    }

    /// Complete the outstanding press.
    ///
    /// `edges` is the feedback tally drained after the settle window; it is
    /// only meaningful for probes and ignored otherwise.
    pub fn pulse_done(&mut self, edges: u32) {
        match self.awaiting.take() {
            Some(PulseKind::Probe) => {
                self.tracker.note_probe(edges);
                if self.tracker.selected().is_some() {
                    self.probe_attempts = 0;
                } else {
                    self.probe_attempts += 1;
                }
            }
            Some(PulseKind::Step) => self.tracker.note_step(),
            Some(PulseKind::Action) => {
                if let Some(cmd) = self.pending.take() {
                    self.last_executed = cmd.action;
                }
                self.state = DispatchState::Idle;
            }
            // No press outstanding; nothing to record
            None => {}
        }
    }

    fn emit(&mut self, req: PulseRequest) -> TickAction {
        self.awaiting = Some(req.kind);
        TickAction::Pulse(req)
    }

    /// Map an action to its button press.
    ///
    /// Approach-stop shares the stop button and differs only in hold time.
    fn action_pulse(&self, action: Action) -> Option<PulseRequest> {
        let timings = &self.config.timings;
        let (line, hold_ms) = match action {
            Action::Up => (Line::Up, timings.action_hold_ms),
            Action::Down => (Line::Down, timings.action_hold_ms),
            Action::Stop => (Line::My, timings.action_hold_ms),
            Action::My => (Line::My, timings.my_hold_ms),
            Action::None => return None,
        };
        Some(PulseRequest {
            line,
            hold_ms,
            settle_ms: 0,
            kind: PulseKind::Action,
        })
    }
}
