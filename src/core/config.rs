//! # Cell configuration.
//!
//! Provides [`CellConfig`], the construction-time settings of a
//! [`ReloadCell`](crate::ReloadCell).
//!
//! ## Sentinel values
//! - `interval = 0s` → no automatic invalidation (no ticker spawned); the
//!   value is reloaded only after [`ReloadCell::invalidate`](crate::ReloadCell::invalidate)
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use reloadcell::CellConfig;
//!
//! let mut cfg = CellConfig::default();
//! cfg.interval = Duration::from_secs(30);
//!
//! assert_eq!(cfg.refresh_interval(), Some(Duration::from_secs(30)));
//! ```

use std::time::Duration;

/// Construction-time configuration of a reload cell.
///
/// ## Field semantics
/// - `interval`: period between automatic staleness markings (`0s` = never)
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
#[derive(Clone, Debug)]
pub struct CellConfig {
    /// Period of the background ticker that marks the cell stale.
    ///
    /// - `Duration::ZERO` = no ticker; reloads happen only after explicit invalidation
    /// - `> 0` = the first tick fires one full `interval` after construction
    ///
    /// The ticker never runs the loader itself; the next access does.
    pub interval: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` events skip the
    /// oldest ones. Minimum value is 1 (enforced by Bus).
    pub bus_capacity: usize,
}

impl CellConfig {
    /// Creates a configuration with the given interval and default bus capacity.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Returns the ticker period as an `Option`.
    ///
    /// - `None` → no automatic invalidation
    /// - `Some(d)` → invalidate every `d`
    #[inline]
    pub fn refresh_interval(&self) -> Option<Duration> {
        if self.interval == Duration::ZERO {
            None
        } else {
            Some(self.interval)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for CellConfig {
    /// Default configuration:
    ///
    /// - `interval = 0s` (reload only on explicit invalidation)
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            interval: Duration::ZERO,
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_disables_ticker() {
        let cfg = CellConfig::default();
        assert_eq!(cfg.refresh_interval(), None);
    }

    #[test]
    fn test_with_interval_keeps_defaults() {
        let cfg = CellConfig::with_interval(Duration::from_millis(100));
        assert_eq!(cfg.refresh_interval(), Some(Duration::from_millis(100)));
        assert_eq!(cfg.bus_capacity, 1024);
    }

    #[test]
    fn test_bus_capacity_clamped() {
        let cfg = CellConfig {
            bus_capacity: 0,
            ..CellConfig::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
