//! Extension messaging protocol
//!
//! Requests travel page/popup → background as `{ action, payload? }`.
//! Notifications travel background → page and need no answer.

pub mod channel;

pub use channel::*;

use serde::{Deserialize, Serialize};

use crate::error::{EasyWordError, Result};
use crate::session::Settings;

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// page → background: settings, words and dictionary
    GetData,
    /// popup → background: tracked words
    GetWords,
    /// page → background: track a word
    AddWordContent,
    /// page → background: stop tracking a word
    DeleteWordContent,
    /// popup → background: stop tracking a word, then tell the active page
    DeleteWordPopup,
    /// popup → background: clear the list, then tell the active page
    ClearWordsPopup,
}

impl Action {
    pub fn requires_payload(self) -> bool {
        matches!(
            self,
            Action::AddWordContent | Action::DeleteWordContent | Action::DeleteWordPopup
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl Request {
    pub fn new(action: Action) -> Self {
        Self { action, payload: None }
    }

    pub fn with_word(action: Action, word: impl Into<String>) -> Self {
        Self {
            action,
            payload: Some(word.into()),
        }
    }

    /// The payload of a payload-carrying action
    pub fn word(&self) -> Result<&str> {
        self.payload.as_deref().ok_or_else(|| {
            EasyWordError::InvalidRequest(format!("{:?} requires a word payload", self.action))
        })
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Everything a page needs to start a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordData {
    pub settings: Settings,
    pub words: Vec<String>,
    pub dictionary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Data(WordData),
    Words(Vec<String>),
    Ack,
}

impl Response {
    pub fn into_word_data(self) -> Result<WordData> {
        match self {
            Response::Data(data) => Ok(data),
            other => Err(EasyWordError::ChannelDelivery(format!(
                "expected word data, got {:?}",
                other
            ))),
        }
    }

    pub fn into_words(self) -> Result<Vec<String>> {
        match self {
            Response::Words(words) => Ok(words),
            other => Err(EasyWordError::ChannelDelivery(format!(
                "expected a word list, got {:?}",
                other
            ))),
        }
    }
}

/// What the background sends back for every request. A failure is an explicit
/// `{ error }` object so the sender does not wait for the port to close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Failure { error: String },
    Success(Response),
}

impl Reply {
    pub fn from_result(result: Result<Response>) -> Self {
        match result {
            Ok(response) => Reply::Success(response),
            Err(e) => Reply::Failure {
                error: e.to_string(),
            },
        }
    }

    pub fn into_result(self) -> Result<Response> {
        match self {
            Reply::Success(response) => Ok(response),
            Reply::Failure { error } => Err(EasyWordError::ChannelDelivery(format!(
                "background rejected request: {}",
                error
            ))),
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Background → page broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Notification {
    /// A word was deleted from the popup
    WordDeletedPopup(String),
    /// The popup cleared the whole list
    ClearWordsPopup,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let req = Request::with_word(Action::AddWordContent, "cat");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "action": "ADD_WORD_CONTENT", "payload": "cat" })
        );
        assert_eq!(
            serde_json::to_value(Request::new(Action::GetData)).unwrap(),
            json!({ "action": "GET_DATA" })
        );
    }

    #[test]
    fn test_request_parses_without_payload() {
        let req: Request = serde_json::from_value(json!({ "action": "CLEAR_WORDS_POPUP" })).unwrap();
        assert_eq!(req, Request::new(Action::ClearWordsPopup));
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(serde_json::from_value::<Request>(json!({ "action": "NOPE" })).is_err());
    }

    #[test]
    fn test_word_payload_required() {
        let req = Request::new(Action::DeleteWordContent);
        assert!(matches!(req.word(), Err(EasyWordError::InvalidRequest(_))));
        assert!(Action::DeleteWordContent.requires_payload());
        assert!(!Action::GetWords.requires_payload());
    }

    #[test]
    fn test_notification_wire_shape() {
        assert_eq!(
            serde_json::to_value(Notification::WordDeletedPopup("cat".into())).unwrap(),
            json!({ "action": "WORD_DELETED_POPUP", "payload": "cat" })
        );
        let clear: Notification =
            serde_json::from_value(json!({ "action": "CLEAR_WORDS_POPUP" })).unwrap();
        assert_eq!(clear, Notification::ClearWordsPopup);
    }

    #[test]
    fn test_failure_reply_wire_shape() {
        let reply = Reply::from_result(Err(EasyWordError::StorageAccess("quota".into())));
        let wire = serde_json::to_value(&reply).unwrap();
        assert_eq!(wire, json!({ "error": "Storage access failed: quota" }));

        let parsed: Reply = serde_json::from_value(wire).unwrap();
        assert!(matches!(
            parsed.into_result(),
            Err(EasyWordError::ChannelDelivery(msg)) if msg.contains("quota")
        ));
    }

    #[test]
    fn test_success_replies_keep_response_shape() {
        let ack: Reply = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(ack.into_result().unwrap(), Response::Ack);

        let words: Reply = serde_json::from_value(json!(["cat"])).unwrap();
        assert_eq!(words.into_result().unwrap().into_words().unwrap(), vec!["cat"]);
    }

    #[test]
    fn test_response_untagged() {
        let words: Response = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(words.into_words().unwrap(), vec!["a", "b"]);

        let ack: Response = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(ack, Response::Ack);
        assert!(Response::Ack.into_word_data().is_err());
    }
}
