//! Update events consumed by the sync dispatcher.

use pipelens_graph::definition::{ElementId, PipelineSnapshot, StageSnapshot};

/// One unit of backend-reported change, queued for the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateEvent {
    /// A single stage was created or changed state.
    Stage(StageSnapshot),
    /// A full pipeline refresh.
    Pipeline(PipelineSnapshot),
    /// A stage left the visualized pipeline.
    Remove(ElementId),
    /// Stop dispatching and hand the view back.
    Shutdown,
}

impl UpdateEvent {
    /// Returns whether this event stops the dispatcher.
    pub const fn is_shutdown(&self) -> bool {
        matches!(self, UpdateEvent::Shutdown)
    }
}
