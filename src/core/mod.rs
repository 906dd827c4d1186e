//! Cell core: state machine, reload protocol and background tasks.
//!
//! The public API from this module is [`ReloadCell`], its builder and its
//! configuration.
//!
//! Internal modules:
//! - [`cell`]: value slot, double-checked reload, access and invalidation;
//! - [`builder`]: wires loader, bus, subscribers and ticker together;
//! - [`ticker`]: periodic staleness marking and the subscriber listener;
//! - [`config`]: construction-time settings.
//!
//! ```text
//!   access(read) ──► load() ──► read lock: fresh? ──yes──► read lock ──► read(&T)
//!                                   │no
//!                                   ▼
//!                             write lock: fresh? ──yes──┘
//!                                   │no
//!                                   ▼
//!                              loader.load() ──► commit / keep old + LoadFailed
//!
//!   ticker ── every interval ──► write lock: stale = true
//! ```

mod builder;
mod cell;
mod config;
mod ticker;

pub use builder::ReloadCellBuilder;
pub use cell::{CellState, ReloadCell};
pub use config::CellConfig;
