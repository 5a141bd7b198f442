//! Error types used by the broadcaster.
//!
//! - [`BroadcastError`] — errors raised by [`Broadcaster`](crate::Broadcaster) operations.
//!
//! Only `send` is fallible. Listening, closing and unregistering never fail, and the
//! end of a listener's stream is reported as `None` on receive rather than as an error.

use thiserror::Error;

/// # Errors produced by the broadcaster.
///
/// `StreamClosed` is terminal: once returned, every later `send` returns it again
/// and nothing is delivered. Callers should stop producing.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastError {
    /// `send` was called after the broadcaster was closed; the value reached nobody.
    #[error("called send after close")]
    StreamClosed,
}

impl BroadcastError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use announcer::BroadcastError;
    ///
    /// assert_eq!(BroadcastError::StreamClosed.as_label(), "stream_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BroadcastError::StreamClosed => "stream_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BroadcastError::StreamClosed => {
                "stream closed: the broadcaster was shut down".to_string()
            }
        }
    }
}
