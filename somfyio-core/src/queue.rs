//! Bounded command queue
//!
//! FIFO buffer between the bus intake and the dispatcher. Capacity is fixed;
//! a push to a full queue hands the command back instead of evicting older
//! requests, so accepted commands always execute in arrival order.

use heapless::Deque;

use crate::command::Command;

/// Queue capacity.
pub const COMMAND_QUEUE_DEPTH: usize = 5;

/// Bounded FIFO of pending commands.
///
/// Single producer, single consumer; not synchronized internally.
#[derive(Debug, Default)]
pub struct CommandQueue {
    items: Deque<Command, COMMAND_QUEUE_DEPTH>,
}

impl CommandQueue {
    /// Create an empty queue. Usable in statics.
    pub const fn new() -> Self {
        Self {
            items: Deque::new(),
        }
    }

    /// Append a command, or hand it back if the queue is full.
    pub fn push(&mut self, cmd: Command) -> Result<(), Command> {
        self.items.push_back(cmd)
    }

    /// Remove and return the oldest command.
    pub fn pop(&mut self) -> Option<Command> {
        self.items.pop_front()
    }

    /// Number of queued commands.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no commands.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Action;
    use proptest::prelude::*;

    fn cmd(channel: u8) -> Command {
        Command::new(Action::Up, channel)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = CommandQueue::new();
        for ch in 0..3 {
            queue.push(cmd(ch)).unwrap();
        }
        assert_eq!(queue.pop(), Some(cmd(0)));
        assert_eq!(queue.pop(), Some(cmd(1)));
        assert_eq!(queue.pop(), Some(cmd(2)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_overflow_rejected_and_contents_untouched() {
        let mut queue = CommandQueue::new();
        for ch in 0..COMMAND_QUEUE_DEPTH as u8 {
            queue.push(cmd(ch)).unwrap();
        }
        assert!(queue.is_full());

        // The sixth push is rejected and handed back
        assert_eq!(queue.push(cmd(99)), Err(cmd(99)));
        assert_eq!(queue.len(), COMMAND_QUEUE_DEPTH);

        // The original five drain unchanged, in order
        for ch in 0..COMMAND_QUEUE_DEPTH as u8 {
            assert_eq!(queue.pop(), Some(cmd(ch)));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_len_tracks_pushes_and_pops() {
        let mut queue = CommandQueue::new();
        assert_eq!(queue.len(), 0);
        queue.push(cmd(1)).unwrap();
        queue.push(cmd(2)).unwrap();
        assert_eq!(queue.len(), 2);
        queue.pop();
        assert_eq!(queue.len(), 1);
    }

    proptest! {
        /// Any interleaving of pushes and pops behaves like an unbounded
        /// FIFO truncated at capacity, and never exceeds the capacity.
        #[test]
        fn fifo_model(ops in proptest::collection::vec(0u8..=9, 0..64)) {
            let mut queue = CommandQueue::new();
            let mut model: std::collections::VecDeque<Command> = std::collections::VecDeque::new();

            for op in ops {
                if op == 0 {
                    prop_assert_eq!(queue.pop(), model.pop_front());
                } else {
                    let accepted = queue.push(cmd(op)).is_ok();
                    prop_assert_eq!(accepted, model.len() < COMMAND_QUEUE_DEPTH);
                    if accepted {
                        model.push_back(cmd(op));
                    }
                }
                prop_assert!(queue.len() <= COMMAND_QUEUE_DEPTH);
                prop_assert_eq!(queue.len(), model.len());
            }

            while let Some(expected) = model.pop_front() {
                prop_assert_eq!(queue.pop(), Some(expected));
            }
            prop_assert!(queue.is_empty());
        }
    }
}
