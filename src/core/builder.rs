use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::{
    core::CellConfig,
    events::Bus,
    loaders::LoaderRef,
    subscribers::{Subscribe, SubscriberSet},
};

use super::cell::{ReloadCell, Shared, Slot};
use super::ticker::{spawn_listener, spawn_ticker};

/// Builder for constructing a [`ReloadCell`] with optional features.
pub struct ReloadCellBuilder<T> {
    loader: LoaderRef<T>,
    name: Option<Arc<str>>,
    cfg: CellConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl<T: Send + Sync + 'static> ReloadCellBuilder<T> {
    /// Creates a new builder with default configuration.
    pub fn new(loader: LoaderRef<T>) -> Self {
        Self {
            loader,
            name: None,
            cfg: CellConfig::default(),
            subscribers: Vec::new(),
        }
    }

    /// Sets the name reported in events (defaults to the value's type name).
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: CellConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the ticker period (`Duration::ZERO` disables it).
    pub fn with_interval(mut self, interval: std::time::Duration) -> Self {
        self.cfg.interval = interval;
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive cell events (loads, failures, stale reads)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the cell.
    ///
    /// Spawns the ticker (if the interval is non-zero) and the subscriber
    /// listener (if any subscribers were given); either requires a Tokio
    /// runtime. Nothing is loaded until the first access.
    pub fn build(self) -> ReloadCell<T> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let token = CancellationToken::new();

        if !self.subscribers.is_empty() {
            let set = SubscriberSet::new(self.subscribers, bus.clone());
            spawn_listener(&bus, set, token.clone());
        }

        let shared = Arc::new(Shared {
            name: self
                .name
                .unwrap_or_else(|| Arc::from(std::any::type_name::<T>())),
            slot: Arc::new(RwLock::new(Slot::empty())),
            loader: self.loader,
            bus,
            _guard: token.clone().drop_guard(),
        });

        if let Some(period) = self.cfg.refresh_interval() {
            spawn_ticker(Arc::downgrade(&shared), period, token);
        }

        ReloadCell { inner: shared }
    }
}
