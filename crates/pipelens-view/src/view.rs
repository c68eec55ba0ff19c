//! The pipeline view: exclusive owner of all node models on display.

use std::collections::{HashMap, HashSet};

use pipelens_graph::GraphError;
use pipelens_graph::definition::{ElementId, PipelineMeta, PipelineSnapshot, StageSnapshot};
use pipelens_graph::graph::{PipelineGraph, StageDef};

use crate::TRACING_TARGET;
use crate::error::ViewResult;
use crate::node::NodeModel;

/// Reactive view over one visualized pipeline.
///
/// Owns a node model per displayed stage plus the graph that wires them.
/// Models are updated in place for their entire lifetime: a backend push
/// never replaces a node instance, so renderer subscriptions made once at
/// draw time stay valid until the stage is removed or the view dropped.
///
/// Node models do not reference each other; edges exist only as element-id
/// pairs in the graph.
#[derive(Debug, Default)]
pub struct PipelineView {
    graph: PipelineGraph,
    models: HashMap<ElementId, NodeModel>,
}

impl PipelineView {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a view from a full backend snapshot.
    ///
    /// Constructs the stage graph and one node model per stage. Fails on
    /// the first snapshot that cannot become a node (missing `peN`,
    /// unresolvable kind) or that breaks graph wiring.
    pub fn from_snapshot(snapshot: &PipelineSnapshot) -> ViewResult<Self> {
        let graph = PipelineGraph::from_snapshot(snapshot)?;

        let mut models = HashMap::with_capacity(snapshot.stages.len());
        for stage in &snapshot.stages {
            let model = NodeModel::from_snapshot(stage)?;
            models.insert(model.element(), model);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            node_count = models.len(),
            "Pipeline view built from snapshot"
        );

        Ok(Self { graph, models })
    }

    /// Returns the stage graph.
    pub fn graph(&self) -> &PipelineGraph {
        &self.graph
    }

    /// Returns the pipeline metadata.
    pub fn meta(&self) -> &PipelineMeta {
        &self.graph.meta
    }

    /// Returns the number of displayed nodes.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns whether the view displays no nodes.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Returns whether a node exists for an element.
    pub fn contains(&self, element: ElementId) -> bool {
        self.models.contains_key(&element)
    }

    /// Returns a reference to a node model.
    pub fn get(&self, element: ElementId) -> Option<&NodeModel> {
        self.models.get(&element)
    }

    /// Returns a mutable reference to a node model.
    ///
    /// Mutation is reserved to the sync layer; renderers subscribe through
    /// the shared reference.
    pub fn get_mut(&mut self, element: ElementId) -> Option<&mut NodeModel> {
        self.models.get_mut(&element)
    }

    /// Returns an iterator over all node models.
    pub fn models(&self) -> impl Iterator<Item = &NodeModel> {
        self.models.values()
    }

    /// Returns an iterator over all displayed element ids.
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.models.keys().copied()
    }

    /// Applies one backend stage snapshot.
    ///
    /// An element already on display is updated in place. A snapshot for an
    /// element the view has not seen creates the node and wires its edges in
    /// both directions, since earlier stages may already declare the new
    /// element as an output.
    pub fn apply(&mut self, snapshot: &StageSnapshot) -> ViewResult<()> {
        let element = snapshot.element()?;

        if let Some(model) = self.models.get_mut(&element) {
            model.apply(snapshot)?;
            tracing::trace!(
                target: TRACING_TARGET,
                element = %element,
                state = %snapshot.state,
                "Stage updated in place"
            );
            return Ok(());
        }

        let def = StageDef::from_snapshot(snapshot)?;
        for output in &def.outputs {
            if !self.graph.contains(*output) {
                return Err(GraphError::UnknownElement {
                    from: element,
                    to: *output,
                }
                .into());
            }
        }

        let model = NodeModel::from_snapshot(snapshot)?;
        self.graph.add_stage(def.clone())?;
        for output in &def.outputs {
            self.graph.connect(element, *output)?;
        }
        let incoming: Vec<ElementId> = self
            .graph
            .stages()
            .filter(|d| d.element != element && d.outputs.contains(&element))
            .map(|d| d.element)
            .collect();
        for from in incoming {
            self.graph.connect(from, element)?;
        }
        self.models.insert(element, model);

        tracing::debug!(
            target: TRACING_TARGET,
            element = %element,
            "New stage added to view"
        );
        Ok(())
    }

    /// Applies a full pipeline snapshot.
    ///
    /// Every stage in the snapshot is applied in place (or created), and
    /// stages the snapshot no longer mentions are removed. Existing nodes
    /// are never recreated, so subscriptions survive a full refresh.
    pub fn apply_pipeline(&mut self, snapshot: &PipelineSnapshot) -> ViewResult<()> {
        let mut seen = HashSet::with_capacity(snapshot.stages.len());
        for stage in &snapshot.stages {
            self.apply(stage)?;
            seen.insert(stage.element()?);
        }

        let stale: Vec<ElementId> = self
            .models
            .keys()
            .filter(|element| !seen.contains(*element))
            .copied()
            .collect();
        for element in stale {
            self.remove(element);
        }

        self.graph.meta = snapshot.meta.clone();
        Ok(())
    }

    /// Removes a stage that left the visualized pipeline.
    ///
    /// Returns the removed model, dropping its subscriptions with it.
    /// Removing an element the view does not display is a no-op.
    pub fn remove(&mut self, element: ElementId) -> Option<NodeModel> {
        let model = self.models.remove(&element);
        match model {
            Some(_) => {
                self.graph.remove_stage(element);
                tracing::debug!(
                    target: TRACING_TARGET,
                    element = %element,
                    "Stage removed from view"
                );
            }
            None => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    element = %element,
                    "Removal of unknown element ignored"
                );
            }
        }
        model
    }
}
