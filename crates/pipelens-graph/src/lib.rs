#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod definition;
mod error;
pub mod graph;
pub mod state;

#[doc(hidden)]
pub mod prelude;

pub use error::{GraphError, GraphResult};

/// Tracing target for graph operations.
pub const TRACING_TARGET: &str = "pipelens_graph";
