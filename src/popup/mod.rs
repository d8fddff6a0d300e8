//! Popup view model: the tracked-word list with delete, clear and export
//!
//! The popup updates its own list first and tells the background afterwards;
//! a failed request is only logged. Methods take `&self` and never hold the
//! list borrowed while a request is in flight, so several deletes may
//! overlap.

use std::cell::RefCell;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{error, warn};

use crate::error::Result;
use crate::messaging::{Action, Channel, Request};

/// Default file name offered for the CSV download
pub const EXPORT_FILENAME: &str = "words_list.csv";

const CSV_DATA_PREFIX: &str = "data:text/csv;charset=utf-8,";

/// Characters `encodeURI` leaves untouched besides ASCII alphanumerics
const URI_KEEP: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

pub struct PopupModel<C> {
    channel: C,
    words: RefCell<Vec<String>>,
}

impl<C: Channel> PopupModel<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            words: RefCell::new(Vec::new()),
        }
    }

    /// Fetch the list. Any failure leaves it empty.
    pub async fn load(&self) {
        let response = self.channel.send(Request::new(Action::GetWords)).await;
        let words = match response.and_then(|r| r.into_words()) {
            Ok(words) => words,
            Err(e) => {
                warn!(error = %e, "could not fetch words");
                Vec::new()
            }
        };
        *self.words.borrow_mut() = words;
    }

    /// Insertion order
    pub fn words(&self) -> Vec<String> {
        self.words.borrow().clone()
    }

    /// Most recently added first
    pub fn display_words(&self) -> Vec<String> {
        self.words.borrow().iter().rev().cloned().collect()
    }

    pub async fn delete(&self, word: &str) -> Result<()> {
        self.words.borrow_mut().retain(|w| w != word);
        self.notify(Request::with_word(Action::DeleteWordPopup, word))
            .await
    }

    pub async fn clear(&self) -> Result<()> {
        self.words.borrow_mut().clear();
        self.notify(Request::new(Action::ClearWordsPopup)).await
    }

    async fn notify(&self, request: Request) -> Result<()> {
        let action = request.action;
        self.channel.send(request).await.map(|_| ()).map_err(|e| {
            error!(?action, error = %e, "popup request failed");
            e
        })
    }

    /// Text placed on the clipboard: one word per line
    pub fn clipboard_text(&self) -> String {
        self.words.borrow().join("\n")
    }

    /// `data:` URI for the CSV download, escaped like `encodeURI`
    pub fn csv_data_uri(&self) -> String {
        let raw = format!("{}{}", CSV_DATA_PREFIX, self.words.borrow().join("\n"));
        utf8_percent_encode(&raw, URI_KEEP).to_string()
    }
}
