//! Node model for a running annotation task.

use pipelens_graph::definition::{AnnoTaskAttributes, StageKind, StageSnapshot, TaskId};
use pipelens_graph::state::NodeState;

use super::identity::NodeIdentity;
use crate::error::{ViewError, ViewResult};
use crate::observable::Observable;

/// A running annotation-task stage, adapted for the reactive graph view.
///
/// The task id and attribute snapshot are fixed at construction; only the
/// observable `state` and `progress` cells change afterwards, and always in
/// place, so renderer subscriptions survive every backend push.
#[derive(Debug)]
pub struct AnnotationTaskNode {
    identity: NodeIdentity,
    task_id: TaskId,
    attributes: AnnoTaskAttributes,
    state: Observable<NodeState>,
    progress: Observable<f32>,
}

impl AnnotationTaskNode {
    /// Builds the node from a backend snapshot.
    ///
    /// Fails when the snapshot lacks `peN` or does not carry annotation-task
    /// attributes. Progress starts at the snapshot's figure, or `0.0` for
    /// tasks the backend has not measured yet.
    pub fn from_snapshot(snapshot: &StageSnapshot) -> ViewResult<Self> {
        let identity = NodeIdentity::from_snapshot(snapshot)?;
        let attributes = snapshot.anno_task.clone().ok_or(ViewError::WrongKind {
            element: identity.element(),
            expected: StageKind::AnnotationTask,
        })?;

        Ok(Self {
            task_id: TaskId::from_raw(snapshot.id),
            state: Observable::new(snapshot.state.clone()),
            progress: Observable::new(attributes.progress_or_default()),
            attributes,
            identity,
        })
    }

    /// Returns the node's identity.
    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    /// Returns the backend id of the task instance this node mirrors.
    #[inline]
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the attribute snapshot the node was constructed with.
    pub fn attributes(&self) -> &AnnoTaskAttributes {
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

    /// Returns the observable progress percentage.
    pub fn progress(&self) -> &Observable<f32> {
        &self.progress
    }

    /// Returns the observable progress percentage for mutation.
    pub fn progress_mut(&mut self) -> &mut Observable<f32> {
        &mut self.progress
    }

    /// Returns whether the node is structurally safe to render and sync.
    pub fn is_validated(&self) -> bool {
        self.identity.is_validated()
    }

    /// Applies a backend push snapshot.
    ///
    /// Writes the reported state into the state cell and, when the push
    /// carries a progress figure, the progress cell. A push without one
    /// leaves the last known progress standing. The snapshot must describe
    /// the same element this node was constructed for.
    pub fn apply(&mut self, snapshot: &StageSnapshot) -> ViewResult<()> {
        let element = snapshot.element()?;
        if element != self.identity.element() {
            return Err(ViewError::StageMismatch {
                expected: self.identity.element(),
                found: element,
            });
        }

        self.state.set(snapshot.state.clone());
        if let Some(progress) = snapshot.anno_task.as_ref().and_then(|a| a.progress) {
            self.progress.set(progress);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pipelens_graph::definition::ElementId;

    use super::*;

    fn snapshot_with(attributes: AnnoTaskAttributes) -> StageSnapshot {
        StageSnapshot::annotation_task(11, ElementId::from_raw(5), NodeState::Pending, attributes)
    }

    #[test]
    fn test_progress_defaults_to_zero() {
        let node = AnnotationTaskNode::from_snapshot(&snapshot_with(AnnoTaskAttributes::new()))
            .unwrap();
        assert_eq!(*node.progress().get(), 0.0);
    }

    #[test]
    fn test_progress_taken_from_snapshot() {
        let node = AnnotationTaskNode::from_snapshot(&snapshot_with(
            AnnoTaskAttributes::new().with_progress(42.0),
        ))
        .unwrap();
        assert_eq!(*node.progress().get(), 42.0);
    }

    #[test]
    fn test_apply_updates_observables_in_place() {
        let mut node =
            AnnotationTaskNode::from_snapshot(&snapshot_with(AnnoTaskAttributes::new())).unwrap();

        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        node.state_mut()
            .subscribe(move |s: &NodeState| sink.borrow_mut().push(s.clone()));

        let mut push = snapshot_with(AnnoTaskAttributes::new().with_progress(50.0));
        push.state = NodeState::Running;
        node.apply(&push).unwrap();

        let mut push = snapshot_with(AnnoTaskAttributes::new());
        push.state = NodeState::Finished;
        node.apply(&push).unwrap();

        assert_eq!(
            *states.borrow(),
            vec![NodeState::Running, NodeState::Finished]
        );
        // The second push carried no progress figure; the last one stands.
        assert_eq!(*node.progress().get(), 50.0);
    }

    #[test]
    fn test_apply_rejects_foreign_element() {
        let mut node =
            AnnotationTaskNode::from_snapshot(&snapshot_with(AnnoTaskAttributes::new())).unwrap();

        let foreign = StageSnapshot::annotation_task(
            12,
            ElementId::from_raw(9),
            NodeState::Running,
            AnnoTaskAttributes::new(),
        );
        assert!(matches!(
            node.apply(&foreign),
            Err(ViewError::StageMismatch { .. })
        ));
    }

    #[test]
    fn test_nodes_with_same_backend_id_do_not_share_state() {
        let snapshot = snapshot_with(AnnoTaskAttributes::new());
        let mut first = AnnotationTaskNode::from_snapshot(&snapshot).unwrap();
        let second = AnnotationTaskNode::from_snapshot(&snapshot).unwrap();

        first.state_mut().set(NodeState::Error);

        assert_eq!(*first.state().get(), NodeState::Error);
        assert_eq!(*second.state().get(), NodeState::Pending);
    }
}
