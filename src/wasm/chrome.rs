//! Extension runtime bindings: messaging, `storage.local` and tabs
//!
//! Every call uses the promise form of the `chrome.*` API.

use async_trait::async_trait;
use js_sys::{Array, Object, Promise, Reflect};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::background::TabNotifier;
use crate::error::{EasyWordError, Result};
use crate::messaging::{Channel, Notification, Reply, Request, Response};
use crate::storage::KeyValueStore;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = sendMessage)]
    fn runtime_send_message(message: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    fn storage_local_get(keys: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    fn storage_local_set(items: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    fn tabs_query(query: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = sendMessage)]
    fn tabs_send_message(tab_id: f64, message: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    pub(crate) fn add_message_listener(listener: &js_sys::Function);
}

fn describe(e: &JsValue) -> String {
    e.as_string()
        .or_else(|| {
            Reflect::get(e, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", e))
}

pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> std::result::Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue) -> std::result::Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

async fn settle(call: std::result::Result<Promise, JsValue>) -> std::result::Result<JsValue, JsValue> {
    JsFuture::from(call?).await
}

// =============================================================================
// RuntimeChannel
// =============================================================================

/// Page/popup side of the request channel: `chrome.runtime.sendMessage`
#[derive(Debug, Default, Clone, Copy)]
pub struct RuntimeChannel;

#[async_trait(?Send)]
impl Channel for RuntimeChannel {
    async fn send(&self, request: Request) -> Result<Response> {
        let message = to_js(&request).map_err(|e| EasyWordError::ChannelDelivery(describe(&e)))?;
        let reply = settle(runtime_send_message(&message))
            .await
            .map_err(|e| EasyWordError::ChannelDelivery(describe(&e)))?;
        from_js::<Reply>(reply)
            .map_err(|e| EasyWordError::ChannelDelivery(describe(&e)))?
            .into_result()
    }
}

// =============================================================================
// ChromeStorage
// =============================================================================

/// [`KeyValueStore`] over `chrome.storage.local`
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromeStorage;

#[async_trait(?Send)]
impl KeyValueStore for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let items = settle(storage_local_get(&JsValue::from_str(key)))
            .await
            .map_err(|e| EasyWordError::StorageAccess(describe(&e)))?;
        let value = Reflect::get(&items, &JsValue::from_str(key))
            .map_err(|e| EasyWordError::StorageAccess(describe(&e)))?;
        if value.is_undefined() {
            return Ok(None);
        }
        from_js(value)
            .map(Some)
            .map_err(|e| EasyWordError::StorageAccess(describe(&e)))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let items = Object::new();
        let value = to_js(&value).map_err(|e| EasyWordError::StorageAccess(describe(&e)))?;
        Reflect::set(&items, &JsValue::from_str(key), &value)
            .map_err(|e| EasyWordError::StorageAccess(describe(&e)))?;
        settle(storage_local_set(&items))
            .await
            .map(|_| ())
            .map_err(|e| EasyWordError::StorageAccess(describe(&e)))
    }
}

// =============================================================================
// ActiveTabNotifier
// =============================================================================

/// [`TabNotifier`] that messages the active tab of the current window
#[derive(Debug, Default, Clone, Copy)]
pub struct ActiveTabNotifier;

impl ActiveTabNotifier {
    async fn active_tab_id(&self) -> Result<f64> {
        let query = Object::new();
        Reflect::set(&query, &"active".into(), &JsValue::TRUE)
            .and_then(|_| Reflect::set(&query, &"currentWindow".into(), &JsValue::TRUE))
            .map_err(|e| EasyWordError::ChannelDelivery(describe(&e)))?;
        let tabs: Array = settle(tabs_query(&query))
            .await
            .map_err(|e| EasyWordError::ChannelDelivery(describe(&e)))?
            .into();
        Reflect::get(&tabs.get(0), &"id".into())
            .ok()
            .and_then(|id| id.as_f64())
            .ok_or_else(|| EasyWordError::ChannelDelivery("no active tab".to_string()))
    }
}

#[async_trait(?Send)]
impl TabNotifier for ActiveTabNotifier {
    async fn notify_active_tab(&self, notification: Notification) -> Result<()> {
        let tab_id = self.active_tab_id().await?;
        let message =
            to_js(&notification).map_err(|e| EasyWordError::ChannelDelivery(describe(&e)))?;
        settle(tabs_send_message(tab_id, &message))
            .await
            .map(|_| ())
            .map_err(|e| EasyWordError::ChannelDelivery(describe(&e)))
    }
}
