//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use pipelens_graph::prelude::*;
//! ```

pub use crate::definition::{
    AnnoTaskAttributes, DataExportAttributes, ElementId, ExportId, PipelineMeta,
    PipelineSnapshot, StageKind, StageSnapshot, TaskId,
};
pub use crate::error::{GraphError, GraphResult};
pub use crate::graph::{Edge, PipelineGraph, StageDef};
pub use crate::state::NodeState;
