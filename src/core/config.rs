//! # Broadcaster configuration.
//!
//! [`BroadcasterConfig`] defines the settings fixed at construction time.
//! Today that is only the per-listener buffer depth.
//!
//! # Example
//! ```
//! use announcer::{Broadcaster, BroadcasterConfig};
//!
//! let cfg = BroadcasterConfig::default().with_capacity(8);
//! assert_eq!(cfg.capacity, 8);
//!
//! let bc: Broadcaster<String> = Broadcaster::with_config(cfg);
//! assert_eq!(bc.capacity(), 8);
//! ```

/// Default buffer depth of every listener channel.
pub const DEFAULT_CAPACITY: usize = 64;

/// Construction settings for a [`Broadcaster`](crate::Broadcaster).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadcasterConfig {
    /// Buffer depth of each listener's delivery channel.
    ///
    /// A `send` blocks once any registered listener holds this many undrained values.
    /// Zero means unbuffered: each delivery waits until the listener takes the value.
    pub capacity: usize,
}

impl BroadcasterConfig {
    /// Sets the per-listener buffer depth.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Depth of the underlying channels (never below 1; 0 is emulated on a 1-slot channel).
    pub(crate) fn effective_capacity(&self) -> usize {
        self.capacity.max(1)
    }
}

impl Default for BroadcasterConfig {
    /// Provides a default configuration:
    /// - `capacity = 64`
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(BroadcasterConfig::default().capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_zero_capacity_uses_one_slot_channel() {
        let cfg = BroadcasterConfig::default().with_capacity(0);
        assert_eq!(cfg.capacity, 0);
        assert_eq!(cfg.effective_capacity(), 1);
    }
}
