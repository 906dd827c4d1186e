//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [invalidated] cell="routes" source=Interval
//! [load-starting] cell="routes" generation=3
//! [load-failed] cell="routes" err="connection refused" elapsed_ms=12
//! [stale-served] cell="routes" generation=3 err="connection refused"
//! [load-succeeded] cell="routes" generation=4 elapsed_ms=9
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let cell = e.cell.as_deref().unwrap_or("unnamed");
        let reason = e.reason.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::Invalidated => {
                println!("[invalidated] cell={cell:?} source={:?}", e.source);
            }
            EventKind::LoadStarting => {
                println!("[load-starting] cell={cell:?} generation={:?}", e.generation);
            }
            EventKind::LoadSucceeded => {
                println!(
                    "[load-succeeded] cell={cell:?} generation={:?} elapsed_ms={:?}",
                    e.generation, e.elapsed_ms
                );
            }
            EventKind::LoadFailed => {
                println!(
                    "[load-failed] cell={cell:?} err={reason:?} elapsed_ms={:?}",
                    e.elapsed_ms
                );
            }
            EventKind::StaleServed => {
                println!(
                    "[stale-served] cell={cell:?} generation={:?} err={reason:?}",
                    e.generation
                );
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] subscriber={cell} reason={reason}");
            }
            EventKind::SubscriberPanicked => {
                println!("[subscriber-panicked] subscriber={cell} info={reason}");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
