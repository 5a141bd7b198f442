//! # Listener - the subscriber-side handle.
//!
//! A [`Listener`] wraps the read side of one delivery channel plus the id it is
//! registered under. It reads without touching the broadcaster's lock; only
//! [`Listener::close`] calls back into the broadcaster to unregister.
//!
//! ## Receiving
//! `recv()` returns `Some(value)` for every announcement and `None` once the
//! stream has ended (broadcaster closed or dropped, after buffered values are
//! drained). A `Listener` is also a [`Stream`] of announcements.
//!
//! ## Unregistering
//! `close()` removes the registry entry but does **not** end the stream: values
//! already buffered can still be drained, then receives simply wait. Stop
//! reading after `close()` rather than waiting for `None`.

use std::fmt;
use std::pin::Pin;
use std::sync::Weak;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

use super::registry::{Registry, Slot};

/// Subscriber handle returned by [`Broadcaster::listen`](crate::Broadcaster::listen).
pub struct Listener<T> {
    id: usize,
    rx: mpsc::Receiver<T>,
    owner: Weak<Mutex<Registry<T>>>,
    /// Write side taken back from the registry on `close`; keeps the channel open.
    parked: Option<mpsc::Sender<T>>,
    detached: bool,
}

impl<T> Listener<T> {
    pub(crate) fn new(
        id: usize,
        rx: mpsc::Receiver<T>,
        owner: Weak<Mutex<Registry<T>>>,
    ) -> Self {
        Self {
            id,
            rx,
            owner,
            parked: None,
            detached: false,
        }
    }

    /// Registry id of this listener; unique among the broadcaster's live entries.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Receive endpoint of this listener. Every call returns the same channel.
    pub fn endpoint(&mut self) -> &mut mpsc::Receiver<T> {
        &mut self.rx
    }

    /// Waits for the next announcement.
    ///
    /// Returns `None` once the broadcaster has shut down and the buffer is empty.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Takes a buffered announcement without waiting.
    pub fn try_recv(&mut self) -> Result<T, mpsc::error::TryRecvError> {
        self.rx.try_recv()
    }

    /// Blocking twin of [`recv`](Self::recv) for synchronous callers.
    ///
    /// Parks the calling thread; do not call it from an async task.
    pub fn blocking_recv(&mut self) -> Option<T> {
        futures::executor::block_on(self.rx.recv())
    }

    /// Unregisters this listener so later sends skip it.
    ///
    /// The channel is not closed: buffered values stay readable, and no
    /// end-of-stream is signalled afterwards. Calling it again, or after the
    /// broadcaster is gone, does nothing.
    pub async fn close(&mut self) {
        self.detached = true;
        let Some(registry) = self.owner.upgrade() else {
            return;
        };
        let removed = registry.lock().await.remove(self.id);
        if let Some(slot) = removed {
            debug!(listener_id = self.id, "listener unregistered");
            if let Slot::Open(tx) = slot {
                self.parked = Some(tx);
            }
        }
    }

    /// Blocking twin of [`close`](Self::close) for synchronous callers.
    pub fn blocking_close(&mut self) {
        futures::executor::block_on(self.close());
    }

    /// True once [`close`](Self::close) has been called on this listener.
    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

impl<T> Stream for Listener<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("detached", &self.detached)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use crate::Broadcaster;

    #[tokio::test]
    async fn test_endpoint_is_the_same_channel() {
        let bc = Broadcaster::new(4);
        let mut l = bc.listen().await;

        bc.send(1u32).await.unwrap();
        bc.send(2u32).await.unwrap();

        assert_eq!(l.endpoint().recv().await, Some(1));
        assert_eq!(l.endpoint().recv().await, Some(2));
    }

    #[tokio::test]
    async fn test_buffered_values_survive_close() {
        let bc = Broadcaster::new(4);
        let mut l = bc.listen().await;

        bc.send("before").await.unwrap();
        l.close().await;
        bc.send("after").await.unwrap();

        assert!(l.is_detached());
        assert_eq!(l.recv().await, Some("before"));
        assert!(matches!(
            l.try_recv(),
            Err(tokio::sync::mpsc::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_close_does_not_signal_end_of_stream() {
        let bc = Broadcaster::<u8>::new(1);
        let mut l = bc.listen().await;
        l.close().await;
        bc.close().await;

        // detached before shutdown, so shutdown does not reach this channel
        let res = tokio::time::timeout(std::time::Duration::from_millis(20), l.recv()).await;
        assert!(res.is_err(), "receive after close should wait, got {res:?}");
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let bc = Broadcaster::<u8>::new(1);
        let mut l = bc.listen().await;
        let _other = bc.listen().await;

        l.close().await;
        l.close().await;
        assert_eq!(bc.listener_count().await, 1);
    }

    #[tokio::test]
    async fn test_close_after_broadcaster_dropped_is_noop() {
        let bc = Broadcaster::<u8>::new(1);
        let mut l = bc.listen().await;
        drop(bc);

        l.close().await;
        assert!(l.is_detached());
        assert_eq!(l.recv().await, None);
    }

    #[tokio::test]
    async fn test_stream_yields_until_end() {
        let bc = Broadcaster::new(8);
        let l = bc.listen().await;

        for v in 0..5u32 {
            bc.send(v).await.unwrap();
        }
        bc.close().await;

        let got: Vec<u32> = l.collect().await;
        assert_eq!(got, vec![0, 1, 2, 3, 4]);
    }
}
