//! # Loader abstractions.
//!
//! - [`Load`] - trait for producing a fresh cell value
//! - [`LoadFn`] - closure-backed loader
//! - [`LoaderRef`] - shared reference to a loader (`Arc<dyn Load<T>>`)

mod load;
mod load_fn;

pub use load::{Load, LoaderRef};
pub use load_fn::LoadFn;
