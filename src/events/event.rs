//! # Events emitted by a reload cell.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **Cell events**: load attempts, invalidations and degraded reads
//! - **Subscriber events**: overflow and panics inside subscriber workers
//!
//! The [`Event`] struct carries additional metadata such as timestamps, cell name,
//! reasons, value generation and load duration.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use reloadcell::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::LoadFailed)
//!     .with_cell("routes")
//!     .with_reason("connection refused")
//!     .with_generation(3);
//!
//! assert_eq!(ev.kind, EventKind::LoadFailed);
//! assert_eq!(ev.cell.as_deref(), Some("routes"));
//! assert_eq!(ev.generation, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of cell events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `cell`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `cell`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Cell events ===
    /// The cell was marked stale.
    ///
    /// Sets:
    /// - `cell`: cell name
    /// - `source`: `Manual` or `Interval`
    Invalidated,

    /// The loader is about to run (exclusive lock held).
    ///
    /// Sets:
    /// - `cell`: cell name
    /// - `generation`: generation currently stored (0 = never loaded)
    LoadStarting,

    /// The loader succeeded and its value was committed.
    ///
    /// Sets:
    /// - `cell`: cell name
    /// - `generation`: generation of the new value
    /// - `elapsed_ms`: loader duration (ms)
    LoadSucceeded,

    /// The loader failed; nothing was committed.
    ///
    /// Sets:
    /// - `cell`: cell name
    /// - `generation`: generation still stored (0 = never loaded)
    /// - `elapsed_ms`: loader duration (ms)
    /// - `reason`: failure message
    LoadFailed,

    /// A reload failed but an earlier value exists; the read proceeds on it.
    ///
    /// Sets:
    /// - `cell`: cell name
    /// - `generation`: generation being served
    /// - `reason`: the reload failure message
    StaleServed,
}

/// What marked the cell stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidateSource {
    /// Explicit call to [`ReloadCell::invalidate`](crate::ReloadCell::invalidate).
    Manual,
    /// The periodic ticker.
    Interval,
}

/// Cell event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,

    /// Event classification.
    pub kind: EventKind,
    /// Name of the cell (or subscriber, for subscriber events).
    pub cell: Option<Arc<str>>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Value generation the event refers to.
    pub generation: Option<u64>,
    /// Loader duration in milliseconds (compact).
    pub elapsed_ms: Option<u32>,
    /// Origin of an invalidation.
    pub source: Option<InvalidateSource>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            cell: None,
            reason: None,
            generation: None,
            elapsed_ms: None,
            source: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a cell name.
    #[inline]
    pub fn with_cell(mut self, cell: impl Into<Arc<str>>) -> Self {
        self.cell = Some(cell.into());
        self
    }

    /// Attaches a value generation.
    #[inline]
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Attaches a loader duration (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.elapsed_ms = Some(ms);
        self
    }

    /// Attaches the origin of an invalidation.
    #[inline]
    pub fn with_source(mut self, source: InvalidateSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_cell(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_cell(subscriber)
            .with_reason(info)
    }

    /// True if this event reports a dropped subscriber delivery.
    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }

    /// True for events about a subscriber rather than the cell
    /// (`SubscriberPanicked`, `SubscriberOverflow`). Their `cell` field holds
    /// the subscriber name.
    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberPanicked | EventKind::SubscriberOverflow
        )
    }

    /// True for events that describe degraded-but-available state.
    #[inline]
    pub fn is_degraded(&self) -> bool {
        matches!(self.kind, EventKind::LoadFailed | EventKind::StaleServed)
    }
}
