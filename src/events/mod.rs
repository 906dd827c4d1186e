//! Cell events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by a [`ReloadCell`](crate::ReloadCell),
//! its ticker and its subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `ReloadCell` (load/invalidate paths), the ticker task,
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the cell's subscriber listener (fans out to `SubscriberSet`)
//!   and any receiver obtained from [`ReloadCell::subscribe`](crate::ReloadCell::subscribe).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, InvalidateSource};
