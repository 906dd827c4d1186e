//! # Event subscribers for reload cells.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out,
//! and built-in implementations for handling cell events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! ReloadCell ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                          │
//!                                      ┌──────────┬────────┴──┬───────┐
//!                                      ▼          ▼           ▼       ▼
//!                                  LogWriter TracingWriter  Custom   ...
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use reloadcell::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct StaleAlerts;
//!
//! #[async_trait]
//! impl Subscribe for StaleAlerts {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::StaleServed {
//!             // page someone
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "stale-alerts" }
//! }
//! ```

mod embedded;
mod set;
mod subscribe;

pub(crate) use set::panic_message;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
#[cfg(feature = "tracing")]
pub use embedded::TracingWriter;
