//! # Broadcaster - single-producer fan-out to registered listeners.
//!
//! [`Broadcaster`] owns the listener registry behind one mutex. Every public
//! operation takes that mutex for its whole critical section, so registrations,
//! sends and shutdown are totally ordered.
//!
//! ## Architecture
//! ```text
//! producer ── send(v) ──► [ Mutex<Registry> ]
//!                            ├─► Slot 0 ──► bounded chan ──► Listener 0
//!                            ├─► Slot 1 ──► bounded chan ──► Listener 1
//!                            └─► Slot N ──► bounded chan ──► Listener N
//! ```
//!
//! ## Rules
//! - **Blocking push**: `send` waits for buffer space on each listener while
//!   holding the lock. One full listener stalls every other operation on the
//!   broadcaster until it drains a slot.
//! - **Exactly once**: every listener registered when `send` takes the lock gets
//!   one clone of the value. Order across listeners is unspecified; order of
//!   successive sends seen by one listener is preserved.
//! - **Shutdown**: `close` ends every registered channel; listeners drain what
//!   is buffered, then receive `None`. Later `send`s fail with
//!   [`BroadcastError::StreamClosed`]; later `listen`s return ended listeners.
//! - **Dropped listeners**: a listener dropped without `close` is pruned by the
//!   next `send`, which finds its receiver gone.
//! - No tasks or threads are spawned; all waiting happens on the caller.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, trace};

use super::config::BroadcasterConfig;
use super::listener::Listener;
use super::registry::Registry;
use crate::error::BroadcastError;

/// Shared broadcaster handle.
///
/// Cheap to clone; clones share one registry. When the last clone is dropped
/// every listener's stream ends, as if [`close`](Self::close) had been called.
pub struct Broadcaster<T> {
    registry: Arc<Mutex<Registry<T>>>,
    capacity: usize,
    /// Channel depth; equals `capacity` except for the unbuffered case, which uses 1.
    buffer: usize,
}

impl<T> Broadcaster<T> {
    /// Creates a broadcaster whose listeners buffer up to `capacity` values.
    ///
    /// A capacity of 0 makes delivery a hand-off: `send` returns only after
    /// every listener has taken the value.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(BroadcasterConfig::default().with_capacity(capacity))
    }

    /// Creates a broadcaster from a [`BroadcasterConfig`].
    pub fn with_config(cfg: BroadcasterConfig) -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::new())),
            capacity: cfg.capacity,
            buffer: cfg.effective_capacity(),
        }
    }

    /// Buffer depth configured for every listener channel (0 = unbuffered).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Registers a new listener.
    ///
    /// After [`close`](Self::close) the listener is still registered, but its
    /// first receive returns `None` immediately.
    pub async fn listen(&self) -> Listener<T> {
        let mut registry = self.registry.lock().await;
        let (id, rx) = registry.register(self.buffer);
        debug!(
            listener_id = id,
            closed = registry.is_closed(),
            "listener registered"
        );
        Listener::new(id, rx, Arc::downgrade(&self.registry))
    }

    /// Ends the stream for good.
    ///
    /// Closes every registered channel; entries stay in the registry. Calling
    /// it again is harmless.
    pub async fn close(&self) {
        let mut registry = self.registry.lock().await;
        let was_closed = registry.is_closed();
        let ended = registry.close_all();
        if !was_closed {
            debug!(listeners = ended, "broadcaster closed");
        }
    }

    /// Number of registry entries, including ones left behind by shutdown.
    pub async fn listener_count(&self) -> usize {
        self.registry.lock().await.len()
    }

    /// True once [`close`](Self::close) has been called.
    pub async fn is_closed(&self) -> bool {
        self.registry.lock().await.is_closed()
    }

    /// Blocking twin of [`listen`](Self::listen) for synchronous callers.
    ///
    /// Parks the calling thread until the lock is free, which may be behind a
    /// stalled `send`; do not call it from an async task.
    pub fn blocking_listen(&self) -> Listener<T> {
        futures::executor::block_on(self.listen())
    }

    /// Blocking twin of [`close`](Self::close) for synchronous callers.
    ///
    /// Parks the calling thread until the lock is free, which may be behind a
    /// stalled `send`; do not call it from an async task.
    pub fn blocking_close(&self) {
        futures::executor::block_on(self.close());
    }
}

impl<T: Clone> Broadcaster<T> {
    /// Delivers `value` to every registered listener.
    ///
    /// Waits on any listener whose buffer is full, holding the lock meanwhile.
    /// With capacity 0 it also waits, per listener, until the value is taken.
    ///
    /// # Errors
    /// [`BroadcastError::StreamClosed`] if the broadcaster was closed; nothing
    /// is delivered in that case.
    ///
    /// # Cancel safety
    /// Not cancel safe. Listeners are served one after another, so dropping the
    /// future before it completes (e.g. under `tokio::time::timeout`) may leave
    /// the value delivered to some listeners and not to others. Nothing is
    /// retried; the lock is released and later sends proceed normally.
    pub async fn send(&self, value: T) -> Result<(), BroadcastError> {
        let mut registry = self.registry.lock().await;
        if registry.is_closed() {
            return Err(BroadcastError::StreamClosed);
        }

        let mut delivered = 0usize;
        let mut gone = Vec::new();
        for (id, tx) in registry.open_senders() {
            if tx.send(value.clone()).await.is_err() {
                gone.push(id);
                continue;
            }
            // a permit on the 1-slot channel frees up only once the value is taken
            if self.capacity == 0 && tx.reserve().await.is_err() {
                gone.push(id);
                continue;
            }
            delivered += 1;
        }

        for id in gone {
            registry.remove(id);
            debug!(listener_id = id, "dropped listener pruned");
        }
        trace!(delivered, "announcement sent");
        Ok(())
    }

    /// Blocking twin of [`send`](Self::send) for synchronous callers.
    ///
    /// Parks the calling thread for as long as the delivery stalls; do not call
    /// it from an async task.
    ///
    /// # Errors
    /// Same as [`send`](Self::send).
    pub fn blocking_send(&self, value: T) -> Result<(), BroadcastError> {
        futures::executor::block_on(self.send(value))
    }
}

impl<T> Clone for Broadcaster<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            capacity: self.capacity,
            buffer: self.buffer,
        }
    }
}

impl<T> fmt::Debug for Broadcaster<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
