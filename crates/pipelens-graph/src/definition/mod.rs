//! Pipeline definition types delivered by the backend.
//!
//! This module provides the wire-format records a backend sync collaborator
//! delivers for a visualized pipeline:
//! - [`ElementId`], [`TaskId`], [`ExportId`]: typed backend identifiers
//! - [`StageKind`]: which kind of running stage a snapshot describes
//! - [`AnnoTaskAttributes`], [`DataExportAttributes`]: per-kind attribute
//!   snapshots
//! - [`StageSnapshot`]: one stage record (`peN`, `peOut`, state, payload)
//! - [`PipelineSnapshot`], [`PipelineMeta`]: the full pipeline fetch

mod id;
mod snapshot;
mod stage;

pub use id::{ElementId, ExportId, TaskId};
pub use snapshot::{PipelineMeta, PipelineSnapshot, StageSnapshot};
pub use stage::{AnnoTaskAttributes, DataExportAttributes, StageKind};
