//! Pipeline graph runtime representation.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET;
use crate::definition::{ElementId, PipelineMeta, PipelineSnapshot, StageKind, StageSnapshot};
use crate::error::{GraphError, GraphResult};

/// Static definition of one visualized stage.
///
/// Holds the identity facts the graph layer keys on; the mutable,
/// observable side of a stage lives in the view layer on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDef {
    /// Pipeline element this stage runs as.
    pub element: ElementId,
    /// Kind of the running stage.
    pub kind: StageKind,
    /// Declared successor elements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<ElementId>,
}

impl StageDef {
    /// Creates a stage definition with no successors.
    pub fn new(element: ElementId, kind: StageKind) -> Self {
        Self {
            element,
            kind,
            outputs: Vec::new(),
        }
    }

    /// Sets the declared successor elements.
    pub fn with_outputs(mut self, outputs: impl IntoIterator<Item = ElementId>) -> Self {
        self.outputs = outputs.into_iter().collect();
        self
    }

    /// Derives a stage definition from a backend snapshot.
    ///
    /// Fails when the snapshot lacks `peN` or its kind cannot be resolved.
    pub fn from_snapshot(snapshot: &StageSnapshot) -> GraphResult<Self> {
        Ok(Self {
            element: snapshot.element()?,
            kind: snapshot.kind()?,
            outputs: snapshot.outputs.clone(),
        })
    }
}

/// A directed edge between two pipeline elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source element.
    pub from: ElementId,
    /// Target element.
    pub to: ElementId,
}

impl Edge {
    /// Creates an edge between two elements.
    pub fn new(from: ElementId, to: ElementId) -> Self {
        Self { from, to }
    }
}

/// A pipeline graph containing stage definitions and their wiring.
///
/// Internally uses petgraph's `StableDiGraph` so node indices survive
/// removals while stages come and go over the view's lifetime.
#[derive(Debug, Clone, Default)]
pub struct PipelineGraph {
    /// The underlying directed graph.
    graph: StableDiGraph<StageDef, ()>,
    /// Mapping from ElementId to petgraph's NodeIndex.
    node_indices: HashMap<ElementId, NodeIndex>,
    /// Pipeline metadata.
    pub meta: PipelineMeta,
}

impl PipelineGraph {
    /// Creates a new empty pipeline graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new pipeline graph with metadata.
    pub fn with_meta(meta: PipelineMeta) -> Self {
        Self {
            meta,
            ..Default::default()
        }
    }

    /// Returns the number of stages in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Adds a stage to the graph.
    ///
    /// The stage's declared outputs are recorded but not wired; call
    /// [`connect`](Self::connect) or build via
    /// [`from_snapshot`](Self::from_snapshot) for edge wiring.
    pub fn add_stage(&mut self, def: StageDef) -> GraphResult<()> {
        if self.node_indices.contains_key(&def.element) {
            return Err(GraphError::DuplicateElement(def.element));
        }
        let element = def.element;
        let index = self.graph.add_node(def);
        self.node_indices.insert(element, index);
        Ok(())
    }

    /// Removes a stage and all its connected edges.
    pub fn remove_stage(&mut self, element: ElementId) -> Option<StageDef> {
        let index = self.node_indices.remove(&element)?;
        self.graph.remove_node(index)
    }

    /// Returns a reference to a stage's definition.
    pub fn get(&self, element: ElementId) -> Option<&StageDef> {
        let index = self.node_indices.get(&element)?;
        self.graph.node_weight(*index)
    }

    /// Returns whether a stage exists.
    pub fn contains(&self, element: ElementId) -> bool {
        self.node_indices.contains_key(&element)
    }

    /// Returns an iterator over all stage definitions.
    pub fn stages(&self) -> impl Iterator<Item = &StageDef> {
        self.graph.node_weights()
    }

    /// Returns an iterator over all element ids.
    pub fn element_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.node_indices.keys().copied()
    }

    /// Connects two stages with a directed edge.
    pub fn connect(&mut self, from: ElementId, to: ElementId) -> GraphResult<()> {
        let from_index = *self
            .node_indices
            .get(&from)
            .ok_or(GraphError::UnknownElement { from, to })?;
        let to_index = *self
            .node_indices
            .get(&to)
            .ok_or(GraphError::UnknownElement { from, to })?;

        self.graph.add_edge(from_index, to_index, ());
        Ok(())
    }

    /// Returns an iterator over all edges.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().filter_map(|edge_ref| {
            let from = self.graph.node_weight(edge_ref.source())?.element;
            let to = self.graph.node_weight(edge_ref.target())?.element;
            Some(Edge { from, to })
        })
    }

    /// Returns the declared successors of a stage that exist in the graph.
    pub fn successors(&self, element: ElementId) -> Vec<ElementId> {
        self.neighbors(element, Direction::Outgoing)
    }

    /// Returns the predecessors of a stage.
    pub fn predecessors(&self, element: ElementId) -> Vec<ElementId> {
        self.neighbors(element, Direction::Incoming)
    }

    fn neighbors(&self, element: ElementId, direction: Direction) -> Vec<ElementId> {
        let Some(index) = self.node_indices.get(&element) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(*index, direction)
            .filter_map(|index| self.graph.node_weight(index))
            .map(|def| def.element)
            .collect()
    }

    /// Validates the pipeline graph structure.
    ///
    /// Checks that:
    /// - The graph has at least one stage
    /// - Every declared output resolves to a stage in the graph
    /// - The graph is acyclic
    pub fn validate(&self) -> GraphResult<()> {
        if self.graph.node_count() == 0 {
            return Err(GraphError::EmptyPipeline);
        }

        for def in self.graph.node_weights() {
            for output in &def.outputs {
                if !self.node_indices.contains_key(output) {
                    return Err(GraphError::UnknownElement {
                        from: def.element,
                        to: *output,
                    });
                }
            }
        }

        if is_cyclic_directed(&self.graph) {
            return Err(GraphError::CycleDetected);
        }

        Ok(())
    }

    /// Returns stages in topological order.
    pub fn topological_order(&self) -> GraphResult<Vec<ElementId>> {
        toposort(&self.graph, None)
            .map(|indices| {
                indices
                    .into_iter()
                    .filter_map(|index| self.graph.node_weight(index))
                    .map(|def| def.element)
                    .collect()
            })
            .map_err(|_| GraphError::CycleDetected)
    }

    /// Builds a pipeline graph from a full backend snapshot.
    ///
    /// Stages are added first, then each stage's declared outputs are wired
    /// as edges. Returns an error on duplicate elements or outputs that
    /// reference elements absent from the snapshot.
    pub fn from_snapshot(snapshot: &PipelineSnapshot) -> GraphResult<Self> {
        let mut graph = Self::with_meta(snapshot.meta.clone());

        for stage in &snapshot.stages {
            graph.add_stage(StageDef::from_snapshot(stage)?)?;
        }

        let defs: Vec<StageDef> = graph.stages().cloned().collect();
        for def in defs {
            for output in &def.outputs {
                graph.connect(def.element, *output)?;
            }
        }

        tracing::debug!(
            target: TRACING_TARGET,
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            "Pipeline graph built from snapshot"
        );

        Ok(graph)
    }
}
