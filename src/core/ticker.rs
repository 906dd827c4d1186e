//! # Background tasks owned by a cell.
//!
//! - [`spawn_ticker`]: marks the cell stale every `interval`. It never runs the
//!   loader: staleness is resolved by the next access, so a cell nobody reads
//!   never reloads.
//! - [`spawn_listener`]: forwards bus events to the cell's [`SubscriberSet`].
//!
//! Both stop when the cell's [`CancellationToken`] fires, which happens when
//! the last [`ReloadCell`](crate::ReloadCell) handle is dropped.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, InvalidateSource};
use crate::subscribers::SubscriberSet;

use super::cell::Shared;

/// Spawns the periodic invalidation task.
///
/// The first tick fires one full `period` after the call. Ticks missed while
/// the write lock was contended are not replayed in a burst.
pub(super) fn spawn_ticker<T>(shared: Weak<Shared<T>>, period: Duration, token: CancellationToken)
where
    T: Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticks = time::interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticks.tick() => {
                    let Some(cell) = shared.upgrade() else { break };
                    cell.mark_stale(InvalidateSource::Interval).await;
                }
            }
        }
    });
}

/// Subscribes to the bus and forwards events to the subscriber set (fire-and-forget).
///
/// Events already queued on the bus are forwarded before cancellation is
/// honored; the subscriber workers are then drained and joined.
pub(super) fn spawn_listener(bus: &Bus, set: SubscriberSet, token: CancellationToken) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                ev = rx.recv() => match ev {
                    Ok(ev) => set.emit(&ev),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
                _ = token.cancelled() => break,
            }
        }
        set.shutdown().await;
    });
}
