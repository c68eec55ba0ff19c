//! Graph error types.

use thiserror::Error;

use crate::definition::ElementId;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while building or validating a pipeline graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Stage snapshot does not declare a pipeline element.
    ///
    /// Every node is keyed on its element id; a snapshot without one can
    /// never become a node.
    #[error("stage snapshot {id} does not declare a pipeline element (peN)")]
    MissingElement {
        /// Backend id of the offending snapshot.
        id: i64,
    },

    /// Stage snapshot carries neither an annotation-task nor a data-export
    /// payload, so its kind cannot be resolved.
    #[error("stage snapshot {id} carries no annotation-task or data-export attributes")]
    MissingAttributes {
        /// Backend id of the offending snapshot.
        id: i64,
    },

    /// Stage snapshot carries both payload kinds at once.
    #[error("stage snapshot {id} carries both annotation-task and data-export attributes")]
    AmbiguousPayload {
        /// Backend id of the offending snapshot.
        id: i64,
    },

    /// A stage with the same element id already exists in the graph.
    #[error("duplicate pipeline element {0}")]
    DuplicateElement(ElementId),

    /// An edge references an element that is not part of the graph.
    #[error("element {from} declares unknown output element {to}")]
    UnknownElement {
        /// Source element of the edge.
        from: ElementId,
        /// Declared target element that does not exist.
        to: ElementId,
    },

    /// The pipeline graph contains a cycle.
    #[error("cycle detected in pipeline graph")]
    CycleDetected,

    /// The pipeline snapshot contains no stages.
    #[error("pipeline snapshot contains no stages")]
    EmptyPipeline,

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
