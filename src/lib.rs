//! EasyWord: word-highlighting engine for a browser extension
//!
//! The user picks words on any page; every occurrence of a tracked word is
//! wrapped in a colored marker, words the user already knows are refused, and
//! the list lives in extension storage behind a background service.
//!
//! # Architecture
//!
//! ## Page engine
//! - `dom/` - DomTree: the node operations the engine needs, plus an in-memory `Document`
//! - `annotate/` - text scanning, case-insensitive matching, decorate/undecorate
//! - `controller/` - InteractionController: gestures, debounce, affordance, add/remove decision
//! - `session/` - settings, tracked words, dictionary, generated stylesheet
//!
//! ## Extension plumbing
//! - `messaging/` - request/response/notification protocol and the `Channel` seam
//! - `storage/` - `KeyValueStore` seam and the typed `WordRepository`
//! - `background/` - BackgroundService: routes requests, notifies the active tab
//! - `logging.rs` - `tracing` subscriber that hands formatted lines to a sink
//! - `popup/` - PopupModel: list, delete, clear, clipboard and CSV export
//! - `wasm/` - web-sys/chrome bindings and the JS entry points (wasm32 only)
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { startBackground } from 'easyword';
//! await init();
//! startBackground();
//!
//! // content script
//! import init, { startContentScript } from 'easyword';
//! await init();
//! await startContentScript();
//!
//! // popup
//! import init, { Popup } from 'easyword';
//! await init();
//! const popup = new Popup();
//! await popup.load();
//! render(popup.displayWords());
//! ```

pub mod annotate;
pub mod background;
pub mod controller;
pub mod dom;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod popup;
pub mod session;
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use annotate::{decorate, remove_decoration, MarkerKind};
pub use background::{BackgroundService, TabNotifier};
pub use controller::{ControllerConfig, InteractionController, UiEvent, WordEdit};
pub use dom::{Document, DomTree};
pub use error::{DomError, EasyWordError, Result};
pub use messaging::{Action, Channel, Notification, Reply, Request, Response, WordData};
pub use popup::PopupModel;
pub use session::{SessionState, Settings};
pub use storage::{KeyValueStore, WordRepository};

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook and console logging for the browser
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    wasm::install_console_logging();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("easyword v{}", env!("CARGO_PKG_VERSION"))
}
