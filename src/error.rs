//! Error types used by the reload cell and its loaders.
//!
//! This module defines two error enums:
//!
//! - [`LoadError`] — errors raised by a loader attempt.
//! - [`AccessError`] — errors returned to callers of [`ReloadCell::access`](crate::ReloadCell::access).
//!
//! Both types provide `as_label` for logging/metrics.
//!
//! A failed *reload* of a cell that already holds a value is not an error at
//! this level: the cell keeps serving the last good value and reports the
//! failure through [`EventKind::StaleServed`](crate::EventKind::StaleServed).

use thiserror::Error;

/// # Errors produced by a loader attempt.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The loader reported a failure.
    #[error("load failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The loader panicked; the panic was caught and the cell left untouched.
    #[error("loader panicked: {info}")]
    Panicked {
        /// Panic payload, if it was a string.
        info: String,
    },

    /// The load task ended without producing a result (runtime shutting down).
    #[error("load aborted")]
    Aborted,
}

impl LoadError {
    /// Shorthand for [`LoadError::Fail`].
    ///
    /// # Example
    /// ```
    /// use reloadcell::LoadError;
    ///
    /// let err = LoadError::fail("connection refused");
    /// assert_eq!(err.to_string(), "load failed: connection refused");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        LoadError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use reloadcell::LoadError;
    ///
    /// let err = LoadError::Panicked { info: "boom".into() };
    /// assert_eq!(err.as_label(), "load_panicked");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LoadError::Fail { .. } => "load_failed",
            LoadError::Panicked { .. } => "load_panicked",
            LoadError::Aborted => "load_aborted",
        }
    }
}

/// # Errors returned by [`ReloadCell::access`](crate::ReloadCell::access).
///
/// `E` is the error type of the read callback; it is passed through untouched.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AccessError<E> {
    /// The loader has never succeeded, so there is no value to read.
    #[error("value never loaded: {0}")]
    NeverLoaded(#[source] LoadError),

    /// The read callback failed.
    #[error("read failed: {0}")]
    Read(E),
}

impl<E> AccessError<E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            AccessError::NeverLoaded(_) => "access_never_loaded",
            AccessError::Read(_) => "access_read_failed",
        }
    }

    /// Returns the read callback's error, if that is what failed.
    pub fn into_read(self) -> Option<E> {
        match self {
            AccessError::Read(e) => Some(e),
            AccessError::NeverLoaded(_) => None,
        }
    }

    /// Returns the loader error if the cell was never loaded.
    pub fn load_error(&self) -> Option<&LoadError> {
        match self {
            AccessError::NeverLoaded(e) => Some(e),
            AccessError::Read(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(LoadError::fail("x").as_label(), "load_failed");
        assert_eq!(LoadError::Aborted.as_label(), "load_aborted");
        assert_eq!(
            AccessError::<()>::NeverLoaded(LoadError::fail("x")).as_label(),
            "access_never_loaded"
        );
        assert_eq!(AccessError::Read(()).as_label(), "access_read_failed");
    }

    #[test]
    fn test_never_loaded_keeps_source() {
        let err: AccessError<String> = AccessError::NeverLoaded(LoadError::fail("offline"));
        assert_eq!(err.load_error(), Some(&LoadError::fail("offline")));
        assert_eq!(err.to_string(), "value never loaded: load failed: offline");
        assert!(err.into_read().is_none());
    }

    #[test]
    fn test_read_error_passes_through() {
        let err: AccessError<&str> = AccessError::Read("missing key");
        assert!(err.load_error().is_none());
        assert_eq!(err.into_read(), Some("missing key"));
    }
}
