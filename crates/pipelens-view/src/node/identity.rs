//! Shared identity contract for pipeline-view nodes.

use pipelens_graph::definition::{ElementId, StageSnapshot};

use crate::error::ViewResult;

/// Identity of one pipeline-view node.
///
/// The renderer and the sync layer key every lookup and all edge wiring on
/// the element id, so a node without one must never exist: construction
/// from a snapshot that lacks `peN` fails instead of defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    element: ElementId,
    outputs: Vec<ElementId>,
}

impl NodeIdentity {
    /// Creates an identity from an element id and its declared successors.
    pub fn new(element: ElementId, outputs: Vec<ElementId>) -> Self {
        Self { element, outputs }
    }

    /// Derives the identity from a backend snapshot.
    ///
    /// Fails when the snapshot does not declare a pipeline element.
    pub fn from_snapshot(snapshot: &StageSnapshot) -> ViewResult<Self> {
        Ok(Self {
            element: snapshot.element()?,
            outputs: snapshot.outputs.clone(),
        })
    }

    /// Returns the pipeline element this node represents.
    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Returns the declared successor elements.
    pub fn outputs(&self) -> &[ElementId] {
        &self.outputs
    }

    /// Returns whether the node is structurally safe to render and sync.
    ///
    /// The default contract holds for every identity that was constructed
    /// at all, since construction already refuses a missing element id.
    /// Node kinds needing stronger checks define their own `is_validated`
    /// and decide the full semantics themselves.
    pub fn is_validated(&self) -> bool {
        true
    }
}
