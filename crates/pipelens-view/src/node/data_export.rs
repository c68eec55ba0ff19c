//! Node model for a running data-export job.

use pipelens_graph::definition::{DataExportAttributes, ExportId, StageKind, StageSnapshot};
use pipelens_graph::state::NodeState;

use super::identity::NodeIdentity;
use crate::error::{ViewError, ViewResult};
use crate::observable::Observable;

/// A running data-export stage, adapted for the reactive graph view.
///
/// Export jobs have no progress dimension in this model; the only mutable
/// field is the observable lifecycle state.
#[derive(Debug)]
pub struct DataExportNode {
    identity: NodeIdentity,
    export_id: ExportId,
    attributes: DataExportAttributes,
    state: Observable<NodeState>,
}

impl DataExportNode {
    /// Builds the node from a backend snapshot.
    ///
    /// Fails when the snapshot lacks `peN` or does not carry data-export
    /// attributes.
    pub fn from_snapshot(snapshot: &StageSnapshot) -> ViewResult<Self> {
        let identity = NodeIdentity::from_snapshot(snapshot)?;
        let attributes = snapshot.data_export.clone().ok_or(ViewError::WrongKind {
            element: identity.element(),
            expected: StageKind::DataExport,
        })?;

        Ok(Self {
            export_id: ExportId::from_raw(snapshot.id),
            state: Observable::new(snapshot.state.clone()),
            attributes,
            identity,
        })
    }

    /// Returns the node's identity.
    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    /// Returns the backend id of the export job this node mirrors.
    #[inline]
    pub fn export_id(&self) -> ExportId {
        self.export_id
    }

    /// Returns the attribute snapshot the node was constructed with.
    pub fn attributes(&self) -> &DataExportAttributes {
        &self.attributes
    }

    /// Returns the observable lifecycle state.
    pub fn state(&self) -> &Observable<NodeState> {
        &self.state
    }

    /// Returns the observable lifecycle state for mutation.
    pub fn state_mut(&mut self) -> &mut Observable<NodeState> {
        &mut self.state
    }

    /// Returns whether the node is structurally safe to render and sync.
    pub fn is_validated(&self) -> bool {
        self.identity.is_validated()
    }

    /// Applies a backend push snapshot.
    ///
    /// Writes the reported state into the state cell. The snapshot must
    /// describe the same element this node was constructed for.
    pub fn apply(&mut self, snapshot: &StageSnapshot) -> ViewResult<()> {
        let element = snapshot.element()?;
        if element != self.identity.element() {
            return Err(ViewError::StageMismatch {
                expected: self.identity.element(),
                found: element,
            });
        }

        self.state.set(snapshot.state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pipelens_graph::definition::ElementId;

    use super::*;

    fn export_snapshot() -> StageSnapshot {
        StageSnapshot::data_export(
            31,
            ElementId::from_raw(6),
            NodeState::Pending,
            DataExportAttributes::new().with_download_path("/data/exports/out.zip"),
        )
    }

    #[test]
    fn test_construction_keeps_attributes() {
        let node = DataExportNode::from_snapshot(&export_snapshot()).unwrap();
        assert_eq!(node.export_id(), ExportId::from_raw(31));
        assert_eq!(node.attributes().file_name(), Some("out.zip"));
        assert_eq!(*node.state().get(), NodeState::Pending);
        assert!(node.is_validated());
    }

    #[test]
    fn test_construction_requires_export_payload() {
        let mut snapshot = export_snapshot();
        snapshot.data_export = None;
        snapshot.anno_task = Some(Default::default());

        assert!(matches!(
            DataExportNode::from_snapshot(&snapshot),
            Err(ViewError::WrongKind {
                expected: StageKind::DataExport,
                ..
            })
        ));
    }

    #[test]
    fn test_apply_updates_state() {
        let mut node = DataExportNode::from_snapshot(&export_snapshot()).unwrap();

        let mut push = export_snapshot();
        push.state = NodeState::Finished;
        node.apply(&push).unwrap();

        assert_eq!(*node.state().get(), NodeState::Finished);
    }
}
