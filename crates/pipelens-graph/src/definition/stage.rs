//! Stage kinds and per-kind attribute snapshots.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Kind of a running pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// A running annotation task worked on by annotators.
    AnnotationTask,
    /// A running data-export job producing downloadable artifacts.
    DataExport,
}

impl StageKind {
    /// Returns whether this is an annotation-task stage.
    pub fn is_annotation_task(&self) -> bool {
        matches!(self, StageKind::AnnotationTask)
    }

    /// Returns whether this is a data-export stage.
    pub fn is_data_export(&self) -> bool {
        matches!(self, StageKind::DataExport)
    }
}

/// Backend attribute snapshot for an annotation task.
///
/// Immutable once delivered; a fresh snapshot arrives with every backend
/// push. `progress` is absent for tasks that have not computed one yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnoTaskAttributes {
    /// Display name of the task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fraction of the task's images annotated so far, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
    /// Last backend update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl AnnoTaskAttributes {
    /// Creates an empty attribute snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the progress percentage.
    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Returns the progress percentage, or `0.0` when the backend has not
    /// reported one. The view must always have a defined value to render.
    #[inline]
    pub fn progress_or_default(&self) -> f32 {
        self.progress.unwrap_or(0.0)
    }
}

/// Backend attribute snapshot for a data-export job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExportAttributes {
    /// Display name of the export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Server-side path of the produced artifact, once available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_path: Option<String>,
    /// Last backend update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl DataExportAttributes {
    /// Creates an empty attribute snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the export name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the artifact path.
    pub fn with_download_path(mut self, path: impl Into<String>) -> Self {
        self.download_path = Some(path.into());
        self
    }

    /// Returns the artifact's file name (the last path segment), if a
    /// download path has been reported.
    pub fn file_name(&self) -> Option<&str> {
        self.download_path
            .as_deref()
            .map(|path| path.rsplit('/').next().unwrap_or(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_kind_helpers() {
        assert!(StageKind::AnnotationTask.is_annotation_task());
        assert!(!StageKind::AnnotationTask.is_data_export());
        assert!(StageKind::DataExport.is_data_export());
    }

    #[test]
    fn test_stage_kind_serializes_snake_case() {
        let json = serde_json::to_string(&StageKind::AnnotationTask).unwrap();
        assert_eq!(json, "\"annotation_task\"");
    }

    #[test]
    fn test_progress_default() {
        let attrs = AnnoTaskAttributes::new().with_name("first_annotation");
        assert_eq!(attrs.progress_or_default(), 0.0);

        let attrs = attrs.with_progress(42.0);
        assert_eq!(attrs.progress_or_default(), 42.0);
    }

    #[test]
    fn test_export_file_name() {
        let attrs = DataExportAttributes::new()
            .with_download_path("/data/exports/pipe_7/annotations.parquet");
        assert_eq!(attrs.file_name(), Some("annotations.parquet"));

        let attrs = DataExportAttributes::new();
        assert_eq!(attrs.file_name(), None);
    }

    #[test]
    fn test_attributes_wire_names_are_camel_case() {
        let attrs = DataExportAttributes::new().with_download_path("/tmp/out.zip");
        let json = serde_json::to_value(&attrs).unwrap();
        assert!(json.get("downloadPath").is_some());
    }
}
