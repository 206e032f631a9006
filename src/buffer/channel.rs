//! # Rolling Channel
//!
//! Fixed-capacity sample sequence with drop-oldest insertion.

use std::collections::VecDeque;

/// Fixed-capacity rolling sequence of samples
///
/// The channel always holds exactly `capacity` samples: construction
/// pre-fills with zeros, and every steady-state push evicts the oldest
/// sample from the back while inserting the newest at the front. Index 0
/// is therefore always the most recent sample and higher indices are
/// progressively older.
///
/// # Examples
///
/// ```
/// use serial_scope::buffer::channel::RollingChannel;
///
/// let mut channel = RollingChannel::new(4);
/// channel.push(1.0);
/// channel.push(2.0);
/// channel.push(3.0);
/// assert_eq!(channel.snapshot(), vec![3.0, 2.0, 1.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RollingChannel {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl RollingChannel {
    /// Create a channel pre-filled with `capacity` zero samples
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Capacity always comes from validated
    /// configuration, which rejects zero before this point.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "channel capacity must be positive");
        Self {
            samples: VecDeque::from(vec![0.0; capacity]),
            capacity,
        }
    }

    /// Insert `value` as the new head, evicting the oldest sample
    ///
    /// Never fails and never changes the channel length. The under-capacity
    /// branch only fires if the deque was somehow drained below capacity;
    /// in steady state the channel is always full.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() < self.capacity {
            self.samples.push_back(value);
        } else {
            self.samples.pop_back();
            self.samples.push_front(value);
        }
    }

    /// Configured capacity (also the constant length)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of stored samples (always equals the capacity)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: the channel is pre-filled at construction
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current contents, newest first
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}
