//! # Function-backed loader (`LoadFn`)
//!
//! [`LoadFn`] wraps a closure `F: Fn() -> Fut`, producing a fresh future per
//! load. Shared state the closure needs across loads goes behind an explicit
//! `Arc<...>` captured by the closure.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use reloadcell::{LoadError, LoadFn, LoaderRef};
//!
//! let counter = Arc::new(AtomicU32::new(0));
//! let loader: LoaderRef<u32> = LoadFn::arc(move || {
//!     let counter = counter.clone();
//!     async move { Ok::<_, LoadError>(counter.fetch_add(1, Ordering::SeqCst)) }
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::loaders::load::Load;

/// Function-backed loader implementation.
#[derive(Debug, Clone)]
pub struct LoadFn<F> {
    f: F,
}

impl<F> LoadFn<F> {
    /// Creates a new function-backed loader.
    ///
    /// Prefer [`LoadFn::arc`] when you immediately need a [`LoaderRef`](crate::LoaderRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the loader and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<T, F, Fut> Load<T> for LoadFn<F>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<T, LoadError>> + Send + 'static,
{
    async fn load(&self) -> Result<T, LoadError> {
        (self.f)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_each_load_runs_closure() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let loader = LoadFn::new(move || {
            let n = c.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, LoadError>(n) }
        });

        assert_eq!(loader.load().await, Ok(0));
        assert_eq!(loader.load().await, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_passes_through() {
        let loader = LoadFn::new(|| async { Err::<u8, _>(LoadError::fail("nope")) });
        assert_eq!(loader.load().await, Err(LoadError::fail("nope")));
    }
}
