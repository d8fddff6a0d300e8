//! Decoration markers
//!
//! A marker is an inline `<span>` wrapping exactly one decorated occurrence.
//! Its kind is carried by a style class, looked up from a fixed table.

use serde::{Deserialize, Serialize};

/// Class of the transient "Add to list" button
pub const AFFORDANCE_CLASS: &str = "easyWord_addToList";

/// Decoration kind of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// Word the user added to the tracked list
    #[default]
    Selected,
    /// Word flagged as unknown
    Unknown,
}

/// Kind -> style class, in a fixed order
const MARKER_CLASSES: [(MarkerKind, &str); 2] = [
    (MarkerKind::Selected, "easyWord_selectedWord"),
    (MarkerKind::Unknown, "easyWord_unknownWord"),
];

impl MarkerKind {
    pub const ALL: [MarkerKind; 2] = [MarkerKind::Selected, MarkerKind::Unknown];

    /// Style class carried by markers of this kind
    pub fn class_name(self) -> &'static str {
        MARKER_CLASSES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, class)| *class)
            .unwrap_or(MARKER_CLASSES[0].1)
    }

    /// Reverse lookup from a style class
    pub fn from_class(class: &str) -> Option<Self> {
        MARKER_CLASSES
            .iter()
            .find(|(_, name)| *name == class)
            .map(|(kind, _)| *kind)
    }
}

/// Every class that identifies a marker element
pub fn marker_classes() -> [&'static str; 2] {
    [MARKER_CLASSES[0].1, MARKER_CLASSES[1].1]
}
