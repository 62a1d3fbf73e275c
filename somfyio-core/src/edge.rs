//! Interrupt-shared edge counter
//!
//! The remote's channel indicator blinks on the feedback line; each blink is
//! one falling edge. Edges are recorded from interrupt context and drained
//! by the dispatcher after each probe settle window.

use portable_atomic::{AtomicU32, Ordering};

/// Monotonic falling-edge tally.
///
/// Single asynchronous producer (the edge interrupt), single consumer (the
/// dispatcher). The consumer drains with an atomic swap, so an edge arriving
/// concurrently is neither lost nor counted twice.
#[derive(Debug, Default)]
pub struct EdgeCounter {
    count: AtomicU32,
}

impl EdgeCounter {
    /// Create a counter at zero. Usable in statics.
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Record one edge. Safe from interrupt context; never blocks.
    pub fn on_edge(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the tally and reset it to zero.
    pub fn read_and_reset(&self) -> u32 {
        self.count.swap(0, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_edges() {
        let counter = EdgeCounter::new();
        for _ in 0..21 {
            counter.on_edge();
        }
        assert_eq!(counter.read_and_reset(), 21);
    }

    #[test]
    fn test_read_and_reset_clears() {
        let counter = EdgeCounter::new();
        counter.on_edge();
        assert_eq!(counter.read_and_reset(), 1);
        // No intervening edges: the next drain sees zero
        assert_eq!(counter.read_and_reset(), 0);
        assert_eq!(counter.read_and_reset(), 0);
    }

    #[test]
    fn test_counts_resume_after_reset() {
        let counter = EdgeCounter::new();
        counter.on_edge();
        counter.read_and_reset();
        counter.on_edge();
        counter.on_edge();
        assert_eq!(counter.read_and_reset(), 2);
    }
}
