//! Background service worker entry

use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::console;

use super::chrome::{add_message_listener, from_js, to_js, ActiveTabNotifier, ChromeStorage};
use crate::background::BackgroundService;
use crate::messaging::{Reply, Request};

type Service = BackgroundService<ChromeStorage, ActiveTabNotifier>;

/// Register the request handler on `chrome.runtime.onMessage`.
///
/// Every request gets a [`Reply`]; failures come back as `{ error }`.
#[wasm_bindgen(js_name = startBackground)]
pub fn start_background() {
    let service: Rc<Service> = Rc::new(BackgroundService::new(ChromeStorage, ActiveTabNotifier));

    let listener = Closure::<dyn FnMut(JsValue, JsValue, Function) -> bool>::new(
        move |message: JsValue, _sender: JsValue, send_response: Function| {
            let request: Request = match from_js(message) {
                Ok(request) => request,
                Err(e) => {
                    console::log_1(&format!("[EasyWord] not a request: {:?}", e).into());
                    return false;
                }
            };
            let service = service.clone();
            wasm_bindgen_futures::spawn_local(async move {
                // failures are logged by BackgroundService::handle
                let reply = Reply::from_result(service.handle(request).await);
                match to_js(&reply) {
                    Ok(value) => {
                        let _ = send_response.call1(&JsValue::NULL, &value);
                    }
                    Err(e) => console::error_1(&e),
                }
            });
            // reply is sent asynchronously
            true
        },
    );
    add_message_listener(listener.as_ref().unchecked_ref());
    listener.forget();
    console::log_1(&format!("[EasyWord] background ready ({})", crate::version()).into());
}
