#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
pub mod node;
pub mod observable;
pub mod overlay;
pub mod sync;
pub mod view;

#[doc(hidden)]
pub mod prelude;

pub use error::{ViewError, ViewResult};

/// Tracing target for view operations.
pub const TRACING_TARGET: &str = "pipelens_view";
