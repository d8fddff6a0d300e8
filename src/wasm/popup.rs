//! Popup page bindings around [`PopupModel`]
//!
//! Each method clones the shared model into its promise, so calls may overlap.

use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::chrome::{to_js, RuntimeChannel};
use crate::popup::{PopupModel, EXPORT_FILENAME};

#[wasm_bindgen]
pub struct Popup {
    model: Rc<PopupModel<RuntimeChannel>>,
}

impl Default for Popup {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Popup {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            model: Rc::new(PopupModel::new(RuntimeChannel)),
        }
    }

    /// Fetch the list; resolves once it is ready to render
    pub fn load(&self) -> Promise {
        let model = self.model.clone();
        future_to_promise(async move {
            model.load().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Words to render, most recent first
    #[wasm_bindgen(js_name = displayWords)]
    pub fn display_words(&self) -> Result<JsValue, JsValue> {
        to_js(&self.model.display_words())
    }

    pub fn delete(&self, word: String) -> Promise {
        let model = self.model.clone();
        future_to_promise(async move {
            model
                .delete(&word)
                .await
                .map(|_| JsValue::UNDEFINED)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        })
    }

    pub fn clear(&self) -> Promise {
        let model = self.model.clone();
        future_to_promise(async move {
            model
                .clear()
                .await
                .map(|_| JsValue::UNDEFINED)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        })
    }

    #[wasm_bindgen(js_name = clipboardText)]
    pub fn clipboard_text(&self) -> String {
        self.model.clipboard_text()
    }

    #[wasm_bindgen(js_name = csvDataUri)]
    pub fn csv_data_uri(&self) -> String {
        self.model.csv_data_uri()
    }

    #[wasm_bindgen(js_name = exportFilename)]
    pub fn export_filename() -> String {
        EXPORT_FILENAME.to_string()
    }
}
