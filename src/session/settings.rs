//! Highlight settings
//!
//! Field names on the wire match the persisted `settings` record.

use serde::{Deserialize, Serialize};

/// Default background for markers of unknown words
pub const DEFAULT_UNKNOWN_COLOR: &str = "#FF0000";
/// Default background for markers of tracked words
pub const DEFAULT_SELECTED_COLOR: &str = "#acf7c1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run the bulk highlight pass on load and page show
    #[serde(rename = "highlightSelectedWords")]
    pub highlight_enabled: bool,
    #[serde(rename = "unknownWordsColor")]
    pub unknown_color: String,
    #[serde(rename = "selectedWordsColor")]
    pub selected_color: String,
}

impl Default for Settings {
    /// Persisted defaults, used when the store has no `settings` record
    fn default() -> Self {
        Self {
            highlight_enabled: true,
            unknown_color: DEFAULT_UNKNOWN_COLOR.to_string(),
            selected_color: DEFAULT_SELECTED_COLOR.to_string(),
        }
    }
}

impl Settings {
    /// Page-side settings before the store has answered: nothing is highlighted
    pub fn disabled() -> Self {
        Self {
            highlight_enabled: false,
            unknown_color: String::new(),
            selected_color: String::new(),
        }
    }
}
