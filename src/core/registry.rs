//! # Listener registry - the lock-guarded state of a broadcaster.
//!
//! Registry maps listener ids to delivery slots and owns the id cursor and the
//! shutdown flag. It holds no lock itself: the [`Broadcaster`](super::Broadcaster)
//! wraps it in a single mutex and every operation runs under that mutex.
//!
//! ## Slots
//! ```text
//! id ─► Slot::Open(Sender)   live channel, receives every send
//!   └─► Slot::Closed         channel ended by shutdown; entry kept, sender released
//! ```
//!
//! ## Rules
//! - Ids are chosen by forward search from the cursor, skipping occupied keys.
//!   The cursor never moves backwards, so a freed low id is not reused unless
//!   the cursor is still sitting on it.
//! - `closed` goes false → true once and never back.
//! - Shutdown closes channels but keeps entries; only `remove` deletes one.

use std::collections::HashMap;

use tokio::sync::mpsc;

/// Delivery side of one registered listener.
pub(crate) enum Slot<T> {
    /// Live channel: sends are delivered here.
    Open(mpsc::Sender<T>),
    /// Channel closed by shutdown; the entry lingers without a sender.
    Closed,
}

/// Id → slot map plus cursor and shutdown flag.
pub(crate) struct Registry<T> {
    slots: HashMap<usize, Slot<T>>,
    next_id: usize,
    closed: bool,
}

impl<T> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next_id: 0,
            closed: false,
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of entries, including the ones left behind by shutdown.
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Advances the cursor past occupied keys and returns the first free id.
    ///
    /// Does not reserve the id; the caller inserts under it.
    fn next_free_id(&mut self) -> usize {
        while self.slots.contains_key(&self.next_id) {
            self.next_id = self.next_id.wrapping_add(1);
        }
        self.next_id
    }

    /// Creates a channel of `capacity`, registers it, and returns its id and read side.
    ///
    /// After shutdown the write side is dropped immediately, so the returned
    /// receiver reports end-of-stream on its first receive. The entry is still
    /// registered in that case.
    pub(crate) fn register(&mut self, capacity: usize) -> (usize, mpsc::Receiver<T>) {
        let id = self.next_free_id();
        let (tx, rx) = mpsc::channel(capacity);
        let slot = if self.closed {
            drop(tx);
            Slot::Closed
        } else {
            Slot::Open(tx)
        };
        self.slots.insert(id, slot);
        (id, rx)
    }

    /// Removes the entry for `id`; absent ids are a no-op.
    pub(crate) fn remove(&mut self, id: usize) -> Option<Slot<T>> {
        self.slots.remove(&id)
    }

    /// Marks the registry closed and releases every open sender.
    ///
    /// Returns how many channels were closed by this call (0 on a repeat call).
    pub(crate) fn close_all(&mut self) -> usize {
        self.closed = true;
        let mut closed = 0;
        for slot in self.slots.values_mut() {
            if matches!(slot, Slot::Open(_)) {
                *slot = Slot::Closed;
                closed += 1;
            }
        }
        closed
    }

    /// Live delivery channels, in unspecified order.
    pub(crate) fn open_senders(&self) -> impl Iterator<Item = (usize, &mpsc::Sender<T>)> {
        self.slots.iter().filter_map(|(id, slot)| match slot {
            Slot::Open(tx) => Some((*id, tx)),
            Slot::Closed => None,
        })
    }
}
