//! Content script entry: wires page events to the interaction controller
//!
//! ```javascript,ignore
//! import init, { startContentScript } from './easyword.js';
//! await init();
//! await startContentScript();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Event, EventTarget, MouseEvent, Node, Window};

use super::chrome::{add_message_listener, from_js, RuntimeChannel};
use super::web_dom::WebDom;
use crate::controller::{submit_edit, InteractionController, UiEvent};
use crate::error::EasyWordError;
use crate::messaging::Notification;

type PageController = InteractionController<WebDom, RuntimeChannel>;
type Listener = Closure<dyn FnMut(JsValue)>;

thread_local! {
    static CONTENT: RefCell<Option<ContentScript>> = const { RefCell::new(None) };
}

/// Live controller plus the closures the page holds on to
struct ContentScript {
    _controller: Rc<RefCell<PageController>>,
    _listeners: Vec<Listener>,
}

/// Load the session, style and highlight the page, then start listening
#[wasm_bindgen(js_name = startContentScript)]
pub async fn start_content_script() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let dom = WebDom::from_window().ok_or_else(|| JsValue::from_str("no document"))?;
    let mut controller = InteractionController::new(dom, RuntimeChannel);

    if let Err(e) = controller.load().await {
        console::error_1(&format!("[EasyWord] session not loaded: {}", e).into());
    }
    if let Err(e) = controller.dom().inject_stylesheet(&controller.stylesheet()) {
        console::error_1(&format!("[EasyWord] stylesheet not injected: {}", e).into());
    }
    let count = controller.highlight_all();
    console::log_1(&format!("[EasyWord] {} words highlighted", count).into());

    let controller = Rc::new(RefCell::new(controller));
    let listeners = attach_listeners(&window, &controller)?;

    CONTENT.with(|slot| {
        *slot.borrow_mut() = Some(ContentScript {
            _controller: controller,
            _listeners: listeners,
        });
    });
    Ok(())
}

fn attach_listeners(
    window: &Window,
    controller: &Rc<RefCell<PageController>>,
) -> Result<Vec<Listener>, JsValue> {
    let document = controller.borrow().dom().document().clone();
    let mut listeners = Vec::new();

    let ctrl = controller.clone();
    listeners.push(listen(&document, "dblclick", move |_| {
        on_event(&ctrl, UiEvent::DoubleClick {
            selection: current_selection(),
        });
    })?);

    let ctrl = controller.clone();
    listeners.push(listen(&document, "mouseup", move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let on_affordance = targets_affordance(&ctrl, mouse);
        let before = shown_at(&ctrl);
        on_event(&ctrl, UiEvent::PointerRelease {
            selection: current_selection(),
            x: f64::from(mouse.page_x()),
            y: f64::from(mouse.page_y()),
            on_affordance,
        });
        if let Some(shown) = shown_at(&ctrl).filter(|t| Some(*t) != before) {
            schedule_timeout(&ctrl, shown);
        }
    })?);

    let ctrl = controller.clone();
    listeners.push(listen(&document, "click", move |event| {
        let on_affordance = event
            .dyn_ref::<Event>()
            .is_some_and(|e| targets_affordance(&ctrl, e));
        on_event(&ctrl, UiEvent::Click {
            selection: current_selection(),
            on_affordance,
        });
    })?);

    let ctrl = controller.clone();
    listeners.push(listen(window, "scroll", move |_| {
        on_event(&ctrl, UiEvent::Scroll);
    })?);

    let ctrl = controller.clone();
    listeners.push(listen(window, "pageshow", move |_| {
        ctrl.borrow_mut().highlight_all();
    })?);

    let ctrl = controller.clone();
    let on_message = Closure::<dyn FnMut(JsValue)>::new(move |message: JsValue| {
        match from_js::<Notification>(message) {
            Ok(notification) => ctrl.borrow_mut().handle_notification(notification),
            Err(e) => console::log_1(&format!("[EasyWord] ignored message: {:?}", e).into()),
        }
    });
    add_message_listener(on_message.as_ref().unchecked_ref());
    listeners.push(on_message);

    Ok(listeners)
}

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(JsValue) + 'static,
) -> Result<Listener, JsValue> {
    let closure = Closure::<dyn FnMut(JsValue)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn current_selection() -> String {
    web_sys::window()
        .and_then(|w| w.get_selection().ok().flatten())
        .map(|s| String::from(s.to_string()))
        .unwrap_or_default()
}

fn targets_affordance(controller: &Rc<RefCell<PageController>>, event: &Event) -> bool {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
        return false;
    };
    controller
        .borrow()
        .affordance()
        .is_some_and(|a| a.node.contains(Some(&target)))
}

fn shown_at(controller: &Rc<RefCell<PageController>>) -> Option<f64> {
    controller.borrow().affordance().map(|a| a.shown_at_ms)
}

fn schedule_timeout(controller: &Rc<RefCell<PageController>>, shown_at_ms: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let delay = controller.borrow().config().affordance_timeout_ms;
    let ctrl = controller.clone();
    let callback = Closure::once_into_js(move || {
        // a newer affordance gets its own timer
        if shown_at(&ctrl) == Some(shown_at_ms) {
            ctrl.borrow_mut().handle_event(UiEvent::AffordanceTimeout);
        }
    });
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay as i32)
    {
        console::error_1(&format!("[EasyWord] timer not set: {:?}", e).into());
    }
}

fn on_event(controller: &Rc<RefCell<PageController>>, event: UiEvent) {
    let word = controller.borrow_mut().handle_event(event);
    if let Some(word) = word {
        run_edit(controller.clone(), word);
    }
}

/// Same plan/submit/commit steps as `InteractionController::edit_word_list`,
/// with the controller borrowed only around the synchronous steps
fn run_edit(controller: Rc<RefCell<PageController>>, word: String) {
    let planned = controller.borrow().plan_edit(&word);
    let edit = match planned {
        Ok(edit) => edit,
        Err(e @ EasyWordError::UserPolicyViolation(_)) => {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&e.to_string());
            }
            return;
        }
        Err(e) => {
            console::error_1(&format!("[EasyWord] {}", e).into());
            return;
        }
    };
    let channel = *controller.borrow().channel();
    wasm_bindgen_futures::spawn_local(async move {
        // failures are logged by submit_edit
        if submit_edit(&channel, &edit).await.is_ok() {
            controller.borrow_mut().commit_edit(&edit);
        }
    });
}
