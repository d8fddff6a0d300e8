//! Tests for the selection-gesture state machine
//!
//! Debounce window, affordance lifecycle and dismissal paths.

use std::rc::Rc;

use crate::background::{BackgroundService, QueuedNotifier};
use crate::controller::{
    ControllerConfig, InteractionController, InteractionState, ManualClock, UiEvent,
};
use crate::dom::{Document, DomTree};
use crate::storage::MemoryStore;

type Service = BackgroundService<MemoryStore, QueuedNotifier>;
type Controller = InteractionController<Document, Rc<Service>, Rc<ManualClock>>;

fn controller() -> (Controller, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(10_000.0));
    let service = Rc::new(BackgroundService::new(MemoryStore::new(), QueuedNotifier::new()));
    let ctrl = InteractionController::with_clock(
        Document::new(),
        service,
        clock.clone(),
        ControllerConfig::default(),
    );
    (ctrl, clock)
}

fn release(selection: &str, on_affordance: bool) -> UiEvent {
    UiEvent::PointerRelease {
        selection: selection.to_string(),
        x: 40.0,
        y: 80.0,
        on_affordance,
    }
}

fn buttons(ctrl: &Controller) -> usize {
    ctrl.dom().query_class(&["easyWord_addToList"]).len()
}

// ============================================================================
// Affordance
// ============================================================================

#[test]
fn test_release_with_selection_shows_affordance() {
    let (mut ctrl, _) = controller();

    assert_eq!(ctrl.handle_event(release(" cat ", false)), None);

    assert_eq!(
        ctrl.state(),
        InteractionState::ShowingAffordance {
            selection: "cat".to_string()
        }
    );
    assert_eq!(
        ctrl.dom().body_html(),
        "<button class=\"easyWord_addToList\" style=\"position: absolute; left: 40px; top: 80px;\">Add to list</button>"
    );
}

#[test]
fn test_release_without_selection_stays_idle() {
    let (mut ctrl, _) = controller();
    ctrl.handle_event(release("   ", false));
    assert_eq!(ctrl.state(), InteractionState::Idle);
    assert_eq!(buttons(&ctrl), 0);
}

#[test]
fn test_release_on_affordance_returns_pending_selection() {
    let (mut ctrl, clock) = controller();
    ctrl.handle_event(release("cat", false));
    clock.advance(500.0);

    let word = ctrl.handle_event(release("", true));

    assert_eq!(word, Some("cat".to_string()));
    assert_eq!(ctrl.state(), InteractionState::Idle);
    assert_eq!(buttons(&ctrl), 0);
}

#[test]
fn test_new_release_replaces_affordance() {
    let (mut ctrl, clock) = controller();
    ctrl.handle_event(release("cat", false));
    clock.advance(400.0);
    ctrl.handle_event(release("dog", false));

    assert_eq!(buttons(&ctrl), 1);
    assert_eq!(
        ctrl.state(),
        InteractionState::ShowingAffordance {
            selection: "dog".to_string()
        }
    );
}

#[test]
fn test_click_outside_without_selection_dismisses() {
    let (mut ctrl, _) = controller();
    ctrl.handle_event(release("cat", false));

    ctrl.handle_event(UiEvent::Click {
        selection: "cat".to_string(),
        on_affordance: false,
    });
    assert_ne!(ctrl.state(), InteractionState::Idle);

    ctrl.handle_event(UiEvent::Click {
        selection: String::new(),
        on_affordance: true,
    });
    assert_ne!(ctrl.state(), InteractionState::Idle);

    ctrl.handle_event(UiEvent::Click {
        selection: String::new(),
        on_affordance: false,
    });
    assert_eq!(ctrl.state(), InteractionState::Idle);
    assert_eq!(buttons(&ctrl), 0);
}

#[test]
fn test_scroll_dismisses() {
    let (mut ctrl, _) = controller();
    ctrl.handle_event(release("cat", false));
    ctrl.handle_event(UiEvent::Scroll);
    assert_eq!(ctrl.state(), InteractionState::Idle);
    assert_eq!(buttons(&ctrl), 0);
}

#[test]
fn test_scroll_when_idle_is_harmless() {
    let (mut ctrl, _) = controller();
    assert_eq!(ctrl.handle_event(UiEvent::Scroll), None);
    assert_eq!(ctrl.state(), InteractionState::Idle);
}

#[test]
fn test_affordance_times_out() {
    let (mut ctrl, clock) = controller();
    ctrl.handle_event(release("cat", false));

    clock.advance(2999.0);
    ctrl.handle_event(UiEvent::AffordanceTimeout);
    assert_ne!(ctrl.state(), InteractionState::Idle);

    clock.advance(1.0);
    ctrl.handle_event(UiEvent::AffordanceTimeout);
    assert_eq!(ctrl.state(), InteractionState::Idle);
    assert_eq!(buttons(&ctrl), 0);
}

#[test]
fn test_stale_timer_spares_newer_affordance() {
    let (mut ctrl, clock) = controller();
    ctrl.handle_event(release("cat", false));
    clock.advance(2000.0);
    ctrl.handle_event(release("dog", false));

    // timer of the first affordance fires
    clock.advance(1000.0);
    ctrl.handle_event(UiEvent::AffordanceTimeout);

    assert_eq!(
        ctrl.state(),
        InteractionState::ShowingAffordance {
            selection: "dog".to_string()
        }
    );
}

// ============================================================================
// Double-click and debounce
// ============================================================================

#[test]
fn test_double_click_returns_word_immediately() {
    let (mut ctrl, _) = controller();
    let word = ctrl.handle_event(UiEvent::DoubleClick {
        selection: "  cat\n".to_string(),
    });
    assert_eq!(word, Some("cat".to_string()));
    assert_eq!(ctrl.state(), InteractionState::Idle);
}

#[test]
fn test_release_within_debounce_after_double_click_ignored() {
    let (mut ctrl, clock) = controller();
    ctrl.handle_event(UiEvent::DoubleClick {
        selection: "cat".to_string(),
    });
    clock.advance(299.0);

    assert_eq!(ctrl.handle_event(release("cat", false)), None);
    assert_eq!(ctrl.state(), InteractionState::Idle);
    assert_eq!(buttons(&ctrl), 0);
}

#[test]
fn test_release_after_debounce_shows_affordance() {
    let (mut ctrl, clock) = controller();
    ctrl.handle_event(UiEvent::DoubleClick {
        selection: "cat".to_string(),
    });
    clock.advance(300.0);

    ctrl.handle_event(release("cat", false));
    assert_eq!(buttons(&ctrl), 1);
}

#[test]
fn test_double_click_dismisses_open_affordance() {
    let (mut ctrl, clock) = controller();
    ctrl.handle_event(release("cat", false));
    clock.advance(50.0);
    ctrl.handle_event(UiEvent::DoubleClick {
        selection: "cat".to_string(),
    });
    assert_eq!(buttons(&ctrl), 0);
}

#[test]
fn test_rapid_releases_are_debounced() {
    let (mut ctrl, clock) = controller();
    ctrl.handle_event(release("cat", false));
    clock.advance(100.0);

    // the second release is inside the window and does not touch the first
    ctrl.handle_event(release("dog", false));
    assert_eq!(
        ctrl.state(),
        InteractionState::ShowingAffordance {
            selection: "cat".to_string()
        }
    );
}
