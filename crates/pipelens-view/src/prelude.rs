//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use pipelens_view::prelude::*;
//! ```

pub use pipelens_graph::prelude::*;

pub use crate::error::{ViewError, ViewResult};
pub use crate::node::{AnnotationTaskNode, DataExportNode, NodeIdentity, NodeModel};
pub use crate::observable::{Observable, Subscription};
pub use crate::overlay::{ImageInfo, ImageOverlay, LabelCatalog};
pub use crate::sync::{SnapshotSource, SyncConfig, SyncDispatcher, SyncHandle, UpdateEvent};
pub use crate::view::PipelineView;
