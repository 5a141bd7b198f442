//! # announcer
//!
//! **announcer** is an in-process broadcast primitive: one producer publishes
//! announcements, and any number of independently paced listeners join and
//! leave at will. Each listener receives its own copy of every announcement
//! sent while it is registered.
//!
//! ## Architecture
//! ```text
//!                 ┌───────────────────────────────────────────┐
//!  send(v) ──────►│ Broadcaster                               │
//!  listen() ─────►│  Mutex<Registry>                          │
//!  close() ──────►│   - id → Slot (bounded channel sender)    │
//!                 │   - id cursor                             │
//!                 │   - closed flag                           │
//!                 └──────┬──────────────┬──────────────┬──────┘
//!                        ▼              ▼              ▼
//!                   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!                   │Listener 0│   │Listener 1│   │Listener N│
//!                   │ recv()   │   │ recv()   │   │ recv()   │
//!                   │ close() ─┼───┼──────────┼───┼─► unregister (under lock)
//!                   └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! listen() ──► Listener ──► recv() = Some(v) ... ──┬─► Broadcaster::close() ──► recv() = None
//!                                                  └─► Listener::close()     ──► no further values
//! ```
//!
//! ## Guarantees
//! - Every listener registered when a `send` takes the lock receives exactly one copy.
//! - A single listener sees successive sends in order.
//! - After [`Broadcaster::close`], buffered values are still delivered, then `None`.
//! - `send` after close fails with [`BroadcastError::StreamClosed`] and delivers nothing.
//!
//! ## Blocking behavior
//! `send` waits for room in each listener's buffer while holding the
//! broadcaster's lock. A slow listener therefore stalls the producer and every
//! concurrent `listen`/`close`. Size the capacity accordingly.
//!
//! ## Features
//! | Area              | Description                                          | Key types                       |
//! |-------------------|------------------------------------------------------|---------------------------------|
//! | **Broadcasting**  | Register listeners, fan out values, shut down.       | [`Broadcaster`]                 |
//! | **Listening**     | Receive, drain, unregister; also a `Stream`.         | [`Listener`]                    |
//! | **Errors**        | Typed send failure.                                  | [`BroadcastError`]              |
//! | **Configuration** | Per-listener buffer depth.                           | [`BroadcasterConfig`]           |
//!
//! Every async operation has a `blocking_*` twin for synchronous callers.
//!
//! ## Example
//! ```rust
//! use announcer::{BroadcastError, Broadcaster};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), BroadcastError> {
//!     let bc = Broadcaster::new(5);
//!     let mut a = bc.listen().await;
//!     let mut b = bc.listen().await;
//!
//!     bc.send("Hullo").await?;
//!     assert_eq!(a.recv().await, Some("Hullo"));
//!     assert_eq!(b.recv().await, Some("Hullo"));
//!
//!     bc.close().await;
//!     assert_eq!(a.recv().await, None);
//!     assert_eq!(bc.send("late").await, Err(BroadcastError::StreamClosed));
//!     Ok(())
//! }
//! ```
mod core;
mod error;

// ---- Public re-exports ----

pub use crate::core::{Broadcaster, BroadcasterConfig, DEFAULT_CAPACITY, Listener};
pub use error::BroadcastError;
