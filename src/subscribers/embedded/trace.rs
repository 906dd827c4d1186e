//! # TracingWriter — events as `tracing` records
//!
//! Degraded states (`LoadFailed`, `StaleServed`, subscriber trouble) are
//! emitted at `warn`/`error`, routine cell activity at `debug`.

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Subscriber forwarding cell events to the `tracing` dispatcher.
#[derive(Default)]
pub struct TracingWriter;

impl TracingWriter {
    /// Construct a new [`TracingWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for TracingWriter {
    async fn on_event(&self, e: &Event) {
        let cell = e.cell.as_deref().unwrap_or("unnamed");
        let reason = e.reason.as_deref();
        match e.kind {
            EventKind::Invalidated => {
                tracing::debug!(cell, source = ?e.source, "reloadcell: invalidated");
            }
            EventKind::LoadStarting => {
                tracing::debug!(cell, generation = e.generation, "reloadcell: loading");
            }
            EventKind::LoadSucceeded => {
                tracing::debug!(
                    cell,
                    generation = e.generation,
                    elapsed_ms = e.elapsed_ms,
                    "reloadcell: load succeeded"
                );
            }
            EventKind::LoadFailed => {
                tracing::error!(
                    cell,
                    error = reason,
                    elapsed_ms = e.elapsed_ms,
                    "reloadcell: reload failed"
                );
            }
            EventKind::StaleServed => {
                tracing::warn!(
                    cell,
                    generation = e.generation,
                    error = reason,
                    "reloadcell: using previously loaded data"
                );
            }
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked => {
                tracing::warn!(subscriber = cell, reason, kind = ?e.kind, "reloadcell: subscriber trouble");
            }
        }
    }

    fn name(&self) -> &'static str {
        "TracingWriter"
    }
}
