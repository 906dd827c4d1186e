//! # Loader abstraction.
//!
//! A loader produces a fresh value for a [`ReloadCell`](crate::ReloadCell).
//! The cell calls it while holding its exclusive lock, so:
//! - it is never invoked concurrently with itself by the same cell;
//! - it must not call back into the cell that owns it (that would deadlock);
//! - it should bound its own latency: the cell never times out or cancels a load.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LoadError;

/// # Producer of cell values.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use reloadcell::{Load, LoadError};
///
/// struct Motd;
///
/// #[async_trait]
/// impl Load<String> for Motd {
///     async fn load(&self) -> Result<String, LoadError> {
///         Ok("hello".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Load<T>: Send + Sync + 'static {
    /// Produces a fresh value, or the reason it could not.
    async fn load(&self) -> Result<T, LoadError>;
}

/// Shared handle to a loader.
pub type LoaderRef<T> = Arc<dyn Load<T>>;

#[async_trait]
impl<T, L> Load<T> for Arc<L>
where
    T: 'static,
    L: Load<T> + ?Sized,
{
    async fn load(&self) -> Result<T, LoadError> {
        (**self).load().await
    }
}
