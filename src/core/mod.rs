//! Broadcaster core: registry, delivery and the listener handle.
//!
//! The public API from this module is [`Broadcaster`], [`Listener`] and
//! [`BroadcasterConfig`].
//!
//! Internal modules:
//! - [`broadcaster`]: registration, fan-out delivery and shutdown under one lock;
//! - [`listener`]: subscriber handle, receive side and self-unregistration;
//! - [`registry`]: id → slot map, id cursor and shutdown flag;
//! - [`config`]: construction settings.

mod broadcaster;
mod config;
mod listener;
mod registry;

pub use broadcaster::Broadcaster;
pub use config::{BroadcasterConfig, DEFAULT_CAPACITY};
pub use listener::Listener;
