use serde::{Deserialize, Serialize};

/// Release events this soon after an activation are ignored
pub const DEFAULT_DEBOUNCE_MS: f64 = 300.0;
/// Untouched affordances disappear after this long
pub const DEFAULT_AFFORDANCE_TIMEOUT_MS: f64 = 3000.0;
pub const DEFAULT_AFFORDANCE_LABEL: &str = "Add to list";

/// Interaction timing and labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerConfig {
    pub debounce_ms: f64,
    pub affordance_timeout_ms: f64,
    pub affordance_label: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            affordance_timeout_ms: DEFAULT_AFFORDANCE_TIMEOUT_MS,
            affordance_label: DEFAULT_AFFORDANCE_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.debounce_ms, 300.0);
        assert_eq!(config.affordance_timeout_ms, 3000.0);
        assert_eq!(config.affordance_label, "Add to list");
    }

    #[test]
    fn test_partial_override() {
        let config: ControllerConfig = serde_json::from_str(r#"{"debounceMs": 150}"#).unwrap();
        assert_eq!(config.debounce_ms, 150.0);
        assert_eq!(config.affordance_timeout_ms, 3000.0);
    }
}
