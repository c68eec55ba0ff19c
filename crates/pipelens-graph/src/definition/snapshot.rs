//! Backend snapshot records.

use jiff::Timestamp;
use semver::Version;
use serde::{Deserialize, Serialize};

use super::id::ElementId;
use super::stage::{AnnoTaskAttributes, DataExportAttributes, StageKind};
use crate::error::{GraphError, GraphResult};
use crate::state::NodeState;

/// One stage record as delivered by the backend sync collaborator.
///
/// Delivered once when the pipeline view is constructed and again on every
/// state change. The wire keys (`peN`, `peOut`, `annoTask`, `dataExport`)
/// are the backend's; field names here are not.
///
/// `element` is optional at this layer so that a missing `peN` surfaces as
/// a *construction* error ([`GraphError::MissingElement`]) at the point a
/// node is built from the snapshot, not as a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSnapshot {
    /// Backend id of the stage instance (task or export job).
    pub id: i64,
    /// Pipeline element this stage runs as (`peN`).
    #[serde(rename = "peN")]
    pub element: Option<ElementId>,
    /// Declared successor elements (`peOut`), used for edge wiring.
    #[serde(rename = "peOut", default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<ElementId>,
    /// Current lifecycle phase.
    pub state: NodeState,
    /// Annotation-task attributes, present for task stages.
    #[serde(rename = "annoTask", skip_serializing_if = "Option::is_none")]
    pub anno_task: Option<AnnoTaskAttributes>,
    /// Data-export attributes, present for export stages.
    #[serde(rename = "dataExport", skip_serializing_if = "Option::is_none")]
    pub data_export: Option<DataExportAttributes>,
    /// Backend timestamp of this snapshot.
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl StageSnapshot {
    /// Creates a snapshot for a running annotation task.
    pub fn annotation_task(
        id: i64,
        element: ElementId,
        state: NodeState,
        attributes: AnnoTaskAttributes,
    ) -> Self {
        Self {
            id,
            element: Some(element),
            outputs: Vec::new(),
            state,
            anno_task: Some(attributes),
            data_export: None,
            updated_at: None,
        }
    }

    /// Creates a snapshot for a running data-export job.
    pub fn data_export(
        id: i64,
        element: ElementId,
        state: NodeState,
        attributes: DataExportAttributes,
    ) -> Self {
        Self {
            id,
            element: Some(element),
            outputs: Vec::new(),
            state,
            anno_task: None,
            data_export: Some(attributes),
            updated_at: None,
        }
    }

    /// Sets the declared successor elements.
    pub fn with_outputs(mut self, outputs: impl IntoIterator<Item = ElementId>) -> Self {
        self.outputs = outputs.into_iter().collect();
        self
    }

    /// Sets the snapshot timestamp.
    pub fn with_updated_at(mut self, at: Timestamp) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Returns the pipeline element this stage runs as.
    ///
    /// Fails with [`GraphError::MissingElement`] when the snapshot does not
    /// declare one; such a snapshot must never become a node.
    pub fn element(&self) -> GraphResult<ElementId> {
        self.element
            .ok_or(GraphError::MissingElement { id: self.id })
    }

    /// Resolves the stage kind from which payload is present.
    pub fn kind(&self) -> GraphResult<StageKind> {
        match (&self.anno_task, &self.data_export) {
            (Some(_), None) => Ok(StageKind::AnnotationTask),
            (None, Some(_)) => Ok(StageKind::DataExport),
            (Some(_), Some(_)) => Err(GraphError::AmbiguousPayload { id: self.id }),
            (None, None) => Err(GraphError::MissingAttributes { id: self.id }),
        }
    }
}

/// Pipeline metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineMeta {
    /// Pipeline name (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pipeline description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Pipeline-template version (semver, optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl PipelineMeta {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pipeline name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the pipeline description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the pipeline-template version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }
}

/// Full pipeline fetch: metadata plus one snapshot per visualized stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineSnapshot {
    /// Pipeline metadata.
    #[serde(default)]
    pub meta: PipelineMeta,
    /// Stage records, in backend delivery order.
    #[serde(default)]
    pub stages: Vec<StageSnapshot>,
}

impl PipelineSnapshot {
    /// Creates an empty pipeline snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline snapshot with metadata.
    pub fn with_meta(meta: PipelineMeta) -> Self {
        Self {
            meta,
            stages: Vec::new(),
        }
    }

    /// Adds a stage record.
    pub fn add_stage(&mut self, stage: StageSnapshot) -> &mut Self {
        self.stages.push(stage);
        self
    }

    /// Returns the number of stage records.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}
