//! View error types.

use pipelens_graph::GraphError;
use pipelens_graph::definition::{ElementId, StageKind};
use thiserror::Error;

/// Result type for view operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors that can occur while constructing or updating a pipeline view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Underlying graph or definition error.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// A snapshot was applied to a node of a different kind.
    #[error("stage {element} is not a {expected} stage")]
    WrongKind {
        /// Element the snapshot was applied to.
        element: ElementId,
        /// Kind the node was constructed as.
        expected: StageKind,
    },

    /// A snapshot was applied to a node mirroring a different element.
    #[error("snapshot for element {found} applied to node {expected}")]
    StageMismatch {
        /// Element the node mirrors.
        expected: ElementId,
        /// Element the snapshot describes.
        found: ElementId,
    },

    /// The update channel has been closed.
    #[error("update channel closed")]
    ChannelClosed,

    /// The update channel is at capacity.
    #[error("update channel full")]
    ChannelFull,

    /// The backend snapshot source failed.
    #[error("snapshot source error: {0}")]
    Source(String),
}
