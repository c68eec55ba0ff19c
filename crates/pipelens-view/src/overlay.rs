//! Overlay model for the image currently being annotated.
//!
//! Sits next to the pipeline nodes in the annotation view: a bar showing
//! which image an annotator is working on, how far into the batch it is,
//! and which image-level labels it carries. Only the data and its label
//! formatting live here; positioning and drawing are the renderer's.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::observable::Observable;

/// Metadata about the image currently on the annotation canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    /// Backend id of the image.
    pub id: i64,
    /// Source URL the image is served from.
    pub url: String,
    /// Position of this image within the annotation batch, starting at 1.
    pub number: u32,
    /// Total number of images in the batch.
    pub amount: u32,
    /// Ids of image-level labels assigned so far.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<i64>,
}

impl ImageInfo {
    /// Creates image metadata without labels.
    pub fn new(id: i64, url: impl Into<String>, number: u32, amount: u32) -> Self {
        Self {
            id,
            url: url.into(),
            number,
            amount,
            label_ids: Vec::new(),
        }
    }

    /// Sets the assigned image-level label ids.
    pub fn with_label_ids(mut self, label_ids: impl IntoIterator<Item = i64>) -> Self {
        self.label_ids = label_ids.into_iter().collect();
        self
    }

    /// Returns the image's file name (the last segment of its URL).
    pub fn file_name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }

    /// Returns the bar caption, e.g. `img_001.jpg (ID: 7)`.
    pub fn caption(&self) -> String {
        format!("{} (ID: {})", self.file_name(), self.id)
    }

    /// Returns the batch position text, e.g. `3 / 12`.
    pub fn position(&self) -> String {
        format!("{} / {}", self.number, self.amount)
    }
}

/// Known image-level labels, keyed by backend label id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelCatalog {
    labels: HashMap<i64, String>,
}

impl LabelCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a label name under its backend id.
    pub fn insert(&mut self, id: i64, name: impl Into<String>) {
        self.labels.insert(id, name.into());
    }

    /// Returns the label name for an id.
    pub fn get(&self, id: i64) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    /// Joins the names for the given label ids with `", "`.
    ///
    /// Ids the catalog does not know are skipped rather than rendered as
    /// placeholders.
    pub fn resolve(&self, label_ids: &[i64]) -> String {
        let mut joined = String::new();
        for id in label_ids {
            let Some(name) = self.get(*id) else {
                continue;
            };
            if !joined.is_empty() {
                joined.push_str(", ");
            }
            joined.push_str(name);
        }
        joined
    }
}

impl FromIterator<(i64, String)> for LabelCatalog {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

/// Reactive overlay state: visibility plus the image under annotation.
///
/// Both fields are observable the same way node state is, so a renderer
/// subscribes once and redraws the bar only when the sync layer moves to
/// another image or toggles visibility.
#[derive(Debug, Default)]
pub struct ImageOverlay {
    visible: Observable<bool>,
    image: Observable<Option<ImageInfo>>,
}

impl ImageOverlay {
    /// Creates a hidden overlay with no image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the overlay for an image.
    pub fn show(&mut self, info: ImageInfo) {
        self.image.set(Some(info));
        self.visible.set(true);
    }

    /// Hides the overlay, keeping the image for a later re-show.
    pub fn hide(&mut self) {
        self.visible.set(false);
    }

    /// Hides the overlay and drops the image.
    pub fn clear(&mut self) {
        self.image.set(None);
        self.visible.set(false);
    }

    /// Returns whether the overlay should be drawn.
    pub fn is_visible(&self) -> bool {
        *self.visible.get()
    }

    /// Returns the observable visibility flag.
    pub fn visible(&self) -> &Observable<bool> {
        &self.visible
    }

    /// Returns the observable visibility flag for mutation.
    pub fn visible_mut(&mut self) -> &mut Observable<bool> {
        &mut self.visible
    }

    /// Returns the observable image metadata.
    pub fn image(&self) -> &Observable<Option<ImageInfo>> {
        &self.image
    }

    /// Returns the observable image metadata for mutation.
    pub fn image_mut(&mut self) -> &mut Observable<Option<ImageInfo>> {
        &mut self.image
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_caption_and_position_formatting() {
        let info = ImageInfo::new(7, "http://backend/media/batch_3/img_001.jpg", 3, 12);
        assert_eq!(info.file_name(), "img_001.jpg");
        assert_eq!(info.caption(), "img_001.jpg (ID: 7)");
        assert_eq!(info.position(), "3 / 12");
    }

    #[test]
    fn test_label_resolution_skips_unknown_ids() {
        let catalog: LabelCatalog = [(1, "person".to_string()), (2, "car".to_string())]
            .into_iter()
            .collect();

        let info = ImageInfo::new(7, "img.jpg", 1, 1).with_label_ids([1, 99, 2]);
        assert_eq!(catalog.resolve(&info.label_ids), "person, car");
        assert_eq!(catalog.resolve(&[]), "");
    }

    #[test]
    fn test_overlay_show_hide() {
        let mut overlay = ImageOverlay::new();
        assert!(!overlay.is_visible());

        let shown = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&shown);
        overlay
            .visible_mut()
            .subscribe(move |v: &bool| sink.borrow_mut().push(*v));

        overlay.show(ImageInfo::new(7, "img.jpg", 1, 1));
        assert!(overlay.is_visible());
        assert_eq!(overlay.image().get().as_ref().unwrap().id, 7);

        overlay.hide();
        assert!(overlay.image().get().is_some());

        overlay.clear();
        assert!(overlay.image().get().is_none());

        // hide() after show(), then clear() while already hidden.
        assert_eq!(*shown.borrow(), vec![true, false]);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let info = ImageInfo::new(7, "img.jpg", 1, 1).with_label_ids([1]);
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("labelIds").is_some());
    }
}
