//! Node models for the pipeline view.
//!
//! This module provides the reactive models a graph renderer consumes:
//! - [`NodeIdentity`]: the identity contract shared by every node kind
//! - [`AnnotationTaskNode`]: a running annotation-task stage
//! - [`DataExportNode`]: a running data-export stage
//! - [`NodeModel`]: the tagged variant over both stage kinds
//!
//! Models are constructed once per backend stage instance and updated in
//! place afterwards, so renderer subscriptions on their observable fields
//! stay valid for the node's whole lifetime.

mod annotation_task;
mod data_export;
mod identity;

use derive_more::From;
use pipelens_graph::definition::{ElementId, StageKind, StageSnapshot};
use pipelens_graph::state::NodeState;

pub use annotation_task::AnnotationTaskNode;
pub use data_export::DataExportNode;
pub use identity::NodeIdentity;

use crate::error::{ViewError, ViewResult};
use crate::observable::Observable;

/// A pipeline-view node, one of the visualized stage kinds.
#[derive(Debug, From)]
pub enum NodeModel {
    /// A running annotation task.
    AnnotationTask(AnnotationTaskNode),
    /// A running data-export job.
    DataExport(DataExportNode),
}

impl NodeModel {
    /// Builds the matching node model for a backend snapshot.
    ///
    /// The kind is resolved from which payload the snapshot carries; a
    /// snapshot without `peN` fails for every kind.
    pub fn from_snapshot(snapshot: &StageSnapshot) -> ViewResult<Self> {
        match snapshot.kind()? {
            StageKind::AnnotationTask => {
                Ok(Self::AnnotationTask(AnnotationTaskNode::from_snapshot(snapshot)?))
            }
            StageKind::DataExport => {
                Ok(Self::DataExport(DataExportNode::from_snapshot(snapshot)?))
            }
        }
    }

    /// Returns the node's identity.
    pub fn identity(&self) -> &NodeIdentity {
        match self {
            Self::AnnotationTask(node) => node.identity(),
            Self::DataExport(node) => node.identity(),
        }
    }

    /// Returns the pipeline element this node represents.
    pub fn element(&self) -> ElementId {
        self.identity().element()
    }

    /// Returns the stage kind of this node.
    pub const fn kind(&self) -> StageKind {
        match self {
            Self::AnnotationTask(_) => StageKind::AnnotationTask,
            Self::DataExport(_) => StageKind::DataExport,
        }
    }

    /// Returns whether this is an annotation-task node.
    pub const fn is_annotation_task(&self) -> bool {
        matches!(self, Self::AnnotationTask(_))
    }

    /// Returns whether this is a data-export node.
    pub const fn is_data_export(&self) -> bool {
        matches!(self, Self::DataExport(_))
    }

    /// Returns the observable lifecycle state.
    pub fn state(&self) -> &Observable<NodeState> {
        match self {
            Self::AnnotationTask(node) => node.state(),
            Self::DataExport(node) => node.state(),
        }
    }

    /// Returns the observable lifecycle state for mutation.
    ///
    /// Write access is reserved to the sync layer; renderers subscribe and
    /// read only.
    pub fn state_mut(&mut self) -> &mut Observable<NodeState> {
        match self {
            Self::AnnotationTask(node) => node.state_mut(),
            Self::DataExport(node) => node.state_mut(),
        }
    }

    /// Returns the observable progress, for kinds that measure one.
    ///
    /// Export jobs are not fractionally measurable in this model, so only
    /// annotation-task nodes answer with a cell.
    pub fn progress(&self) -> Option<&Observable<f32>> {
        match self {
            Self::AnnotationTask(node) => Some(node.progress()),
            Self::DataExport(_) => None,
        }
    }

    /// Returns the observable progress for mutation.
    pub fn progress_mut(&mut self) -> Option<&mut Observable<f32>> {
        match self {
            Self::AnnotationTask(node) => Some(node.progress_mut()),
            Self::DataExport(_) => None,
        }
    }

    /// Returns whether the node is structurally safe to render and sync.
    ///
    /// Each variant answers for itself; there is no implicit combination
    /// with a base result. Both current kinds delegate to the identity
    /// default, which holds by construction.
    pub fn is_validated(&self) -> bool {
        match self {
            Self::AnnotationTask(node) => node.is_validated(),
            Self::DataExport(node) => node.is_validated(),
        }
    }

    /// Applies a backend push snapshot to this node's observable fields.
    ///
    /// The node instance itself is never replaced; see the variant `apply`
    /// methods for per-kind semantics. A snapshot whose payload resolves to
    /// a different stage kind is rejected.
    pub fn apply(&mut self, snapshot: &StageSnapshot) -> ViewResult<()> {
        if snapshot.kind()? != self.kind() {
            return Err(ViewError::WrongKind {
                element: self.element(),
                expected: self.kind(),
            });
        }
        match self {
            Self::AnnotationTask(node) => node.apply(snapshot),
            Self::DataExport(node) => node.apply(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use pipelens_graph::definition::{AnnoTaskAttributes, DataExportAttributes};
    use pipelens_graph::GraphError;

    use super::*;
    use crate::error::ViewError;

    fn task_snapshot() -> StageSnapshot {
        StageSnapshot::annotation_task(
            21,
            ElementId::from_raw(3),
            NodeState::Running,
            AnnoTaskAttributes::new().with_progress(42.0),
        )
    }

    #[test]
    fn test_kind_dispatch() {
        let node = NodeModel::from_snapshot(&task_snapshot()).unwrap();
        assert!(node.is_annotation_task());
        assert_eq!(node.kind(), StageKind::AnnotationTask);
        assert!(node.progress().is_some());

        let export = NodeModel::from_snapshot(&StageSnapshot::data_export(
            22,
            ElementId::from_raw(4),
            NodeState::Pending,
            DataExportAttributes::new(),
        ))
        .unwrap();
        assert!(export.is_data_export());
        assert!(export.progress().is_none());
    }

    #[test]
    fn test_missing_element_fails_for_every_variant() {
        let mut task = task_snapshot();
        task.element = None;
        assert!(matches!(
            NodeModel::from_snapshot(&task),
            Err(ViewError::Graph(GraphError::MissingElement { id: 21 }))
        ));

        let mut export = StageSnapshot::data_export(
            22,
            ElementId::from_raw(4),
            NodeState::Pending,
            DataExportAttributes::new(),
        );
        export.element = None;
        assert!(matches!(
            NodeModel::from_snapshot(&export),
            Err(ViewError::Graph(GraphError::MissingElement { id: 22 }))
        ));
    }

    #[test]
    fn test_missing_payload_fails_construction() {
        let mut snapshot = task_snapshot();
        snapshot.anno_task = None;
        assert!(matches!(
            NodeModel::from_snapshot(&snapshot),
            Err(ViewError::Graph(GraphError::MissingAttributes { id: 21 }))
        ));
    }

    #[test]
    fn test_freshly_constructed_node_is_validated() {
        let node = NodeModel::from_snapshot(&task_snapshot()).unwrap();
        assert!(node.is_validated());
    }
}
