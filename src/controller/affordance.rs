//! Transient "Add to list" control and the UI events that drive it

/// A rendered affordance and the selection it was shown for
#[derive(Debug, Clone, PartialEq)]
pub struct Affordance<N> {
    pub node: N,
    pub selection: String,
    pub shown_at_ms: f64,
}

impl<N> Affordance<N> {
    pub fn is_expired(&self, now_ms: f64, timeout_ms: f64) -> bool {
        now_ms - self.shown_at_ms >= timeout_ms
    }
}

/// Page events the controller reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Rapid double-click; `selection` is the current selection text
    DoubleClick { selection: String },
    /// Pointer released at page coordinates
    PointerRelease {
        selection: String,
        x: f64,
        y: f64,
        on_affordance: bool,
    },
    /// Click anywhere on the page
    Click { selection: String, on_affordance: bool },
    Scroll,
    /// Affordance timer fired
    AffordanceTimeout,
}

/// Observable controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    ShowingAffordance { selection: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let a = Affordance {
            node: 1u8,
            selection: "cat".to_string(),
            shown_at_ms: 1000.0,
        };
        assert!(!a.is_expired(3999.0, 3000.0));
        assert!(a.is_expired(4000.0, 3000.0));
    }
}
