//! # reloadcell
//!
//! **reloadcell** is a concurrency-safe container for a single value that is
//! expensive to compute and changes slowly: parsed configuration, a remote
//! snapshot, a derived index.
//!
//! The value is produced by a user-supplied [`Load`]er. It is loaded lazily on
//! first access, marked stale on a schedule or on demand, and reloaded by the
//! next reader. Many readers share it; at most one reload runs at a time; a
//! failed reload keeps serving the last good value.
//!
//! ## Architecture
//! ```text
//!   reader 1 ─┐                    ┌──────────────────────────────┐
//!   reader 2 ─┼── access(read) ──► │ ReloadCell                   │
//!   reader N ─┘                    │  - RwLock<value, stale, gen> │ ──► Load::load()
//!                                  │  - Bus (broadcast events)    │     (write lock held)
//!   ticker ──── invalidate ──────► │                              │
//!   (every interval)               └──────────────┬───────────────┘
//!                                                 ▼
//!                                      listener ──► SubscriberSet
//!                                                  ┌─────┼─────┐
//!                                                  ▼     ▼     ▼
//!                                                sub1  sub2  subN
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                      |
//! |-------------------|--------------------------------------------------------------|-----------------------------------------|
//! | **Cell**          | Lazy load, double-checked reload, stale-on-error reads.      | [`ReloadCell`], [`CellState`]           |
//! | **Loaders**       | Produce values as trait objects or closures.                 | [`Load`], [`LoadFn`], [`LoaderRef`]     |
//! | **Subscriber API**| Observe loads, failures and degraded reads.                  | [`Subscribe`], [`Event`], [`EventKind`] |
//! | **Errors**        | Typed errors for loaders and accessors.                      | [`LoadError`], [`AccessError`]          |
//! | **Configuration** | Ticker interval and bus capacity.                            | [`CellConfig`], [`ReloadCellBuilder`]   |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` _(demo/reference only)_.
//! - `tracing`: exports `TracingWriter`, which forwards events to `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::time::Duration;
//! use reloadcell::{LoadError, LoadFn, ReloadCell};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let version = Arc::new(AtomicU32::new(0));
//!     let v = version.clone();
//!
//!     // Reload at most every 30 seconds, and only when someone reads.
//!     let cell = ReloadCell::builder(LoadFn::new(move || {
//!         let v = v.clone();
//!         async move { Ok::<_, LoadError>(format!("snapshot-{}", v.fetch_add(1, Ordering::SeqCst))) }
//!     }))
//!     .with_name("snapshot")
//!     .with_interval(Duration::from_secs(30))
//!     .build();
//!
//!     let len = cell.access(|s| Ok::<_, std::io::Error>(s.len())).await?;
//!     assert_eq!(len, "snapshot-0".len());
//!
//!     cell.invalidate().await;
//!     assert_eq!(cell.get().await?, "snapshot-1");
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod loaders;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{CellConfig, CellState, ReloadCell, ReloadCellBuilder};
pub use error::{AccessError, LoadError};
pub use events::{Bus, Event, EventKind, InvalidateSource};
pub use loaders::{Load, LoadFn, LoaderRef};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;

// Optional: forward events to `tracing`.
// Enable with: `--features tracing`
#[cfg(feature = "tracing")]
pub use subscribers::TracingWriter;
