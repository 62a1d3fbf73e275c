//! Channel-tracking state machine
//!
//! The remote exposes no channel register. The only feedback is the
//! indicator line: after a select press, the indicator of the selected
//! channel flashes once, and the all-channel position blinks rapidly. The
//! tracker infers the selection from the edge count observed after a probe
//! press, then plans the forward steps needed to reach a target channel.
//!
//! The tracker never touches pins or time. [`ChannelTracker::advance_toward`]
//! names the next select-line press; the caller performs it and reports back
//! with [`ChannelTracker::note_probe`] or [`ChannelTracker::note_step`].

/// Believed position of the remote's channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelState {
    /// No confirmed selection (boot, or an unclassifiable probe)
    #[default]
    Unknown,
    /// The remote has this channel selected
    Selected(u8),
}

/// Next select-line press decided by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerStep {
    /// Tracked channel equals the target; nothing to press
    Converged,
    /// Press select to provoke the indicator, then report the edge count
    /// via `note_probe`
    Probe,
    /// Press select to advance one channel, then report via `note_step`
    Step,
}

/// Edge count that identifies a single selected channel after a probe.
pub const SINGLE_EDGE_COUNT: u32 = 1;

/// Planned multi-step move toward a target channel.
#[derive(Debug, Clone, Copy)]
struct StepPlan {
    target: u8,
    remaining: u8,
}

/// Tracks the selector position and drives it toward requested channels.
#[derive(Debug)]
pub struct ChannelTracker {
    state: ChannelState,
    plan: Option<StepPlan>,
    channel_count: u8,
    high_edge_threshold: u32,
}

impl ChannelTracker {
    /// Create a tracker with no confirmed selection.
    pub fn new(channel_count: u8, high_edge_threshold: u32) -> Self {
        Self {
            state: ChannelState::Unknown,
            plan: None,
            channel_count,
            high_edge_threshold,
        }
    }

    /// Current tracked state.
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Tracked channel, `None` while unknown.
    pub fn selected(&self) -> Option<u8> {
        match self.state {
            ChannelState::Selected(c) => Some(c),
            ChannelState::Unknown => None,
        }
    }

    /// Decide the next press toward `target`.
    ///
    /// Returns [`TrackerStep::Converged`] without side effects once the
    /// tracked channel equals the target.
    pub fn advance_toward(&mut self, target: u8) -> TrackerStep {
        match self.state {
            ChannelState::Selected(current) if current == target => {
                self.plan = None;
                TrackerStep::Converged
            }
            ChannelState::Unknown => TrackerStep::Probe,
            ChannelState::Selected(current) => {
                let stale = match &self.plan {
                    Some(plan) => plan.target != target,
                    None => true,
                };
                if stale {
                    self.plan = Some(StepPlan {
                        target,
                        remaining: forward_distance(current, target, self.channel_count),
                    });
                }
                TrackerStep::Step
            }
        }
    }

    /// Classify the edge count observed in the settle window after a probe.
    ///
    /// Zero edges carries no information. Counts between 2 and the high
    /// threshold form an unclassified band: the selector stays `Unknown` and
    /// the caller probes again rather than risk actuating the wrong blind.
    pub fn note_probe(&mut self, edges: u32) {
        self.state = if edges > self.high_edge_threshold {
            // All-channel indicator, far faster blink than any single channel
            ChannelState::Selected(0)
        } else if edges == SINGLE_EDGE_COUNT {
            ChannelState::Selected(1)
        } else {
            ChannelState::Unknown
        };
    }

    /// Record a completed step press.
    pub fn note_step(&mut self) {
        if let Some(plan) = self.plan.as_mut() {
            plan.remaining = plan.remaining.saturating_sub(1);
            if plan.remaining == 0 {
                self.state = ChannelState::Selected(plan.target);
                self.plan = None;
            }
        }
    }
}

/// Steps the forward-only select button needs to reach `target`.
///
/// The selector only advances, so a lower index wraps around;
/// `(target - current) mod count` is always the minimal press count.
fn forward_distance(current: u8, target: u8, count: u8) -> u8 {
    (target + count - current) % count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ChannelTracker {
        ChannelTracker::new(4, 20)
    }

    /// Drive the tracker to `target`, counting step presses.
    fn steps_to_converge(tracker: &mut ChannelTracker, target: u8) -> u32 {
        let mut steps = 0;
        loop {
            match tracker.advance_toward(target) {
                TrackerStep::Converged => return steps,
                TrackerStep::Step => {
                    tracker.note_step();
                    steps += 1;
                }
                TrackerStep::Probe => panic!("unexpected probe"),
            }
        }
    }

    #[test]
    fn test_starts_unknown_and_probes() {
        let mut t = tracker();
        assert_eq!(t.state(), ChannelState::Unknown);
        assert_eq!(t.advance_toward(2), TrackerStep::Probe);
    }

    #[test]
    fn test_probe_classification() {
        let cases = [
            (0, ChannelState::Unknown),
            (1, ChannelState::Selected(1)),
            (21, ChannelState::Selected(0)),
            // Unclassified band: stay unknown and retry
            (2, ChannelState::Unknown),
            (20, ChannelState::Unknown),
        ];
        for (edges, expected) in cases {
            let mut t = tracker();
            t.note_probe(edges);
            assert_eq!(t.state(), expected, "edges = {}", edges);
        }
    }

    #[test]
    fn test_forward_distance_grid() {
        // Full N=4 grid: always (target - current) mod 4 presses
        for current in 0..4u8 {
            for target in 0..4u8 {
                let mut t = tracker();
                t.note_probe(1);
                // Place the tracker on `current` by stepping from channel 1
                steps_to_converge(&mut t, current);
                let expected = u32::from((target + 4 - current) % 4);
                assert_eq!(
                    steps_to_converge(&mut t, target),
                    expected,
                    "current = {}, target = {}",
                    current,
                    target
                );
            }
        }
    }

    #[test]
    fn test_wrap_around_move() {
        let mut t = tracker();
        t.note_probe(1);
        // 3 is two presses ahead of 1; 1 from 3 wraps: 3 -> 0 -> 1
        assert_eq!(steps_to_converge(&mut t, 3), 2);
        assert_eq!(steps_to_converge(&mut t, 1), 2);
    }

    #[test]
    fn test_converged_issues_no_press() {
        let mut t = tracker();
        t.note_probe(1);
        assert_eq!(t.advance_toward(1), TrackerStep::Converged);
        assert_eq!(t.selected(), Some(1));
    }

    #[test]
    fn test_uninformative_probe_keeps_probing() {
        let mut t = tracker();
        assert_eq!(t.advance_toward(2), TrackerStep::Probe);
        t.note_probe(0);
        assert_eq!(t.advance_toward(2), TrackerStep::Probe);
        t.note_probe(7);
        assert_eq!(t.advance_toward(2), TrackerStep::Probe);
    }

    #[test]
    fn test_partial_move_keeps_counting() {
        let mut t = tracker();
        t.note_probe(21);
        // 0 -> 3 needs three presses; state stays on the plan until done
        assert_eq!(t.advance_toward(3), TrackerStep::Step);
        t.note_step();
        assert_eq!(t.advance_toward(3), TrackerStep::Step);
        t.note_step();
        assert_eq!(t.state(), ChannelState::Selected(0));
        assert_eq!(t.advance_toward(3), TrackerStep::Step);
        t.note_step();
        assert_eq!(t.advance_toward(3), TrackerStep::Converged);
        assert_eq!(t.selected(), Some(3));
    }
}
