//! # Built-in subscribers
//!
//! - [`LogWriter`]: prints events in a human-readable form (demo/debug).
//! - [`TracingWriter`]: forwards events to `tracing` as structured records.

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "tracing")]
mod trace;

#[cfg(feature = "logging")]
pub use log::LogWriter;
#[cfg(feature = "tracing")]
pub use trace::TracingWriter;
