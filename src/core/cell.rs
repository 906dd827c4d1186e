//! # ReloadCell: a single value with lazy, demand-driven reloads.
//!
//! The cell stores one value produced by a [`Load`](crate::Load)er together
//! with two pieces of state:
//! - **valid**: a load has succeeded at least once (never reverts);
//! - **stale**: the next access must attempt a reload.
//!
//! ## State machine
//! ```text
//!            load ok                    invalidate / tick
//! [empty] ───────────► [fresh] ──────────────────────────► [stale]
//!    │  ▲                 ▲                                  │
//!    └──┘ load err        └──────────── load ok ─────────────┤
//!   (access errors)                                          │ load err
//!                                                            ▼
//!                                            [stale] (last good value served)
//! ```
//!
//! ## Rules
//! - The value is replaced only under the write lock, only by a successful load.
//! - At most one load runs at a time; waiters re-check freshness after taking
//!   the write lock, so one staleness episode costs one load.
//! - Readers hold the read lock for the whole read callback; a reload can not
//!   swap the value out from under them.
//! - A started load runs on its own task and always commits; dropping the
//!   caller only abandons the wait.
//! - Once the cell has a value, reload failures are published as events and
//!   never returned from [`ReloadCell::access`].

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock, broadcast};
use tokio::time::Instant;
use tokio_util::sync::DropGuard;

use crate::{
    error::{AccessError, LoadError},
    events::{Bus, Event, EventKind, InvalidateSource},
    loaders::{Load, LoaderRef},
    subscribers::panic_message,
};

use super::builder::ReloadCellBuilder;
use super::config::CellConfig;

/// Mutable part of the cell, guarded by the reader/writer lock.
pub(super) struct Slot<T> {
    value: Option<T>,
    stale: bool,
    generation: u64,
}

impl<T> Slot<T> {
    pub(super) fn empty() -> Self {
        Self {
            value: None,
            stale: false,
            generation: 0,
        }
    }

    #[inline]
    fn is_fresh(&self) -> bool {
        self.value.is_some() && !self.stale
    }
}

/// State shared by all handles of one cell and its background tasks.
pub(super) struct Shared<T> {
    pub(super) name: Arc<str>,
    pub(super) slot: Arc<RwLock<Slot<T>>>,
    pub(super) loader: LoaderRef<T>,
    pub(super) bus: Bus,
    /// Cancels the ticker and the subscriber listener once the last handle is gone.
    pub(super) _guard: DropGuard,
}

impl<T: Send + Sync + 'static> Shared<T> {
    /// Runs one loader attempt, holding the write lock until it commits or fails.
    async fn reload(
        self: Arc<Self>,
        mut slot: OwnedRwLockWriteGuard<Slot<T>>,
    ) -> Result<(), LoadError> {
        let name = &self.name;
        self.bus.publish(
            Event::new(EventKind::LoadStarting)
                .with_cell(Arc::clone(name))
                .with_generation(slot.generation),
        );

        let started = Instant::now();
        let res = std::panic::AssertUnwindSafe(self.loader.load())
            .catch_unwind()
            .await
            .unwrap_or_else(|panic_err| {
                Err(LoadError::Panicked {
                    info: panic_message(&*panic_err),
                })
            });
        let elapsed = started.elapsed();

        match res {
            Ok(value) => {
                slot.value = Some(value);
                slot.stale = false;
                slot.generation += 1;
                self.bus.publish(
                    Event::new(EventKind::LoadSucceeded)
                        .with_cell(Arc::clone(name))
                        .with_generation(slot.generation)
                        .with_elapsed(elapsed),
                );
                Ok(())
            }
            Err(err) => {
                slot.stale = true;
                self.bus.publish(
                    Event::new(EventKind::LoadFailed)
                        .with_cell(Arc::clone(name))
                        .with_generation(slot.generation)
                        .with_elapsed(elapsed)
                        .with_reason(err.to_string()),
                );
                Err(err)
            }
        }
    }

    /// Marks the cell stale. Never runs the loader.
    pub(super) async fn mark_stale(&self, source: InvalidateSource) {
        self.slot.write().await.stale = true;
        self.bus.publish(
            Event::new(EventKind::Invalidated)
                .with_cell(Arc::clone(&self.name))
                .with_source(source),
        );
    }
}

/// Point-in-time view of a cell's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellState {
    /// A load has succeeded at least once.
    pub valid: bool,
    /// The next access will attempt a reload.
    pub stale: bool,
    /// Number of successful loads so far (0 = never loaded).
    pub generation: u64,
}

/// Concurrency-safe single-value cell with lazy reloads.
///
/// Cheap to clone; clones share the same value. Background tasks stop once
/// the last clone is dropped.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use reloadcell::{LoadError, LoadFn, ReloadCell};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cell = ReloadCell::new(
///     LoadFn::new(|| async { Ok::<_, LoadError>(vec!["a".to_string(), "b".to_string()]) }),
///     Duration::ZERO,
/// );
///
/// let len = cell.access(|v| Ok::<_, ()>(v.len())).await.unwrap();
/// assert_eq!(len, 2);
/// # }
/// ```
pub struct ReloadCell<T> {
    pub(super) inner: Arc<Shared<T>>,
}

impl<T> Clone for ReloadCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for ReloadCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadCell")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> ReloadCell<T> {
    /// Creates a builder for a cell backed by `loader`.
    pub fn builder(loader: impl Load<T>) -> ReloadCellBuilder<T> {
        ReloadCellBuilder::new(Arc::new(loader))
    }

    /// Creates a cell with default configuration and the given ticker interval.
    ///
    /// Must be called from within a Tokio runtime when `interval > 0`.
    pub fn new(loader: impl Load<T>, interval: Duration) -> Self {
        Self::builder(loader)
            .with_config(CellConfig::with_interval(interval))
            .build()
    }

    /// Name used in events.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Runs `read` against the current value, reloading first if needed.
    ///
    /// ### Errors
    /// - [`AccessError::NeverLoaded`] if no load has ever succeeded; `read` is not called.
    /// - [`AccessError::Read`] with whatever `read` returned.
    ///
    /// A failed reload of a cell that already has a value is **not** an error:
    /// `LoadFailed` and `StaleServed` are published and `read` sees the last
    /// good value.
    pub async fn access<R, E, F>(&self, read: F) -> Result<R, AccessError<E>>
    where
        F: FnOnce(&T) -> Result<R, E>,
    {
        let failure = self.load().await.err();
        let slot = self.inner.slot.read().await;

        // No value and no failure means the attempt never finished.
        let Some(value) = slot.value.as_ref() else {
            return Err(AccessError::NeverLoaded(failure.unwrap_or(LoadError::Aborted)));
        };
        if let Some(err) = failure {
            self.inner.bus.publish(
                Event::new(EventKind::StaleServed)
                    .with_cell(Arc::clone(&self.inner.name))
                    .with_generation(slot.generation)
                    .with_reason(err.to_string()),
            );
        }

        read(value).map_err(AccessError::Read)
    }

    /// Returns a clone of the current value, reloading first if needed.
    pub async fn get(&self) -> Result<T, LoadError>
    where
        T: Clone,
    {
        self.access(|v| Ok::<_, Infallible>(v.clone()))
            .await
            .map_err(|err| match err {
                AccessError::NeverLoaded(err) => err,
                AccessError::Read(never) => match never {},
            })
    }

    /// Ensures the value is loaded and not stale (double-checked).
    ///
    /// 1. Read lock: return if fresh.
    /// 2. Write lock: return if another caller reloaded meanwhile.
    /// 3. Run the loader on its own task, which owns the write lock.
    ///
    /// A started load runs to completion and commits even if this future is
    /// dropped. Returns the loader's error if step 3 fails; the stored value,
    /// if any, is left untouched and the cell stays stale.
    pub async fn load(&self) -> Result<(), LoadError> {
        let fresh = self.inner.slot.read().await.is_fresh();
        if fresh {
            return Ok(());
        }

        let slot = Arc::clone(&self.inner.slot).write_owned().await;
        if slot.is_fresh() {
            return Ok(());
        }

        let attempt = tokio::spawn(Arc::clone(&self.inner).reload(slot));
        match attempt.await {
            Ok(res) => res,
            Err(join_err) if join_err.is_panic() => Err(LoadError::Panicked {
                info: panic_message(&*join_err.into_panic()),
            }),
            Err(_) => Err(LoadError::Aborted),
        }
    }

    /// Marks the value stale; the next access reloads it.
    pub async fn invalidate(&self) {
        self.inner.mark_stale(InvalidateSource::Manual).await;
    }

    /// Snapshot of the cell's flags.
    pub async fn state(&self) -> CellState {
        let slot = self.inner.slot.read().await;
        CellState {
            valid: slot.value.is_some(),
            stale: slot.stale,
            generation: slot.generation,
        }
    }

    /// Creates a receiver for this cell's events.
    ///
    /// Only events published after this call are observed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.inner.bus.subscribe()
    }
}
