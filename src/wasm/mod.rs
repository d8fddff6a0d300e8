//! Browser bindings (wasm32 only)
//!
//! - `web_dom.rs` - WebDom: [`crate::dom::DomTree`] over the live page
//! - `chrome.rs` - runtime messaging, `storage.local` and tab notification
//! - `content.rs` - content script entry (`startContentScript`)
//! - `background.rs` - service worker entry (`startBackground`)
//! - `popup.rs` - popup page model (`Popup`)
//!
//! Core `tracing` events reach the devtools console through
//! [`install_console_logging`].

pub mod background;
pub mod chrome;
pub mod content;
pub mod popup;
pub mod web_dom;

pub use background::start_background;
pub use chrome::{ActiveTabNotifier, ChromeStorage, RuntimeChannel};
pub use content::start_content_script;
pub use popup::Popup;
pub use web_dom::WebDom;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use wasm_bindgen::JsValue;
use web_sys::console;

fn console_sink(level: Level, line: &str) {
    let line = JsValue::from_str(line);
    if level == Level::ERROR {
        console::error_1(&line);
    } else if level == Level::WARN {
        console::warn_1(&line);
    } else {
        console::log_1(&line);
    }
}

/// Route core `tracing` output to the devtools console
pub fn install_console_logging() {
    let subscriber = crate::logging::subscriber(console_sink, LevelFilter::INFO);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        console::log_1(&"[EasyWord] console logging already installed".into());
    }
}
