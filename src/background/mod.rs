//! Background service: owns storage and answers page/popup requests
//!
//! Popup-initiated deletes and clears are forwarded to the active page as
//! notifications once the store has acknowledged them.

pub mod notifier;

pub use notifier::*;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::messaging::{Action, Channel, Notification, Request, Response};
use crate::storage::{KeyValueStore, WordRepository};

pub struct BackgroundService<S, N> {
    repo: WordRepository<S>,
    notifier: N,
}

impl<S: KeyValueStore, N: TabNotifier> BackgroundService<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            repo: WordRepository::new(store),
            notifier,
        }
    }

    pub fn repository(&self) -> &WordRepository<S> {
        &self.repo
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Route one request. Failures are logged here and returned to the sender.
    pub async fn handle(&self, request: Request) -> Result<Response> {
        let action = request.action;
        let result = self.dispatch(request).await;
        if let Err(e) = &result {
            error!(?action, error = %e, "request failed");
        }
        result
    }

    async fn dispatch(&self, request: Request) -> Result<Response> {
        debug!(action = ?request.action, "handling request");
        match request.action {
            Action::GetData => Ok(Response::Data(self.repo.word_data().await)),
            Action::GetWords => Ok(Response::Words(self.repo.words().await)),
            Action::AddWordContent => {
                self.repo.add_word(request.word()?).await?;
                Ok(Response::Ack)
            }
            Action::DeleteWordContent => {
                self.repo.delete_word(request.word()?).await?;
                Ok(Response::Ack)
            }
            Action::DeleteWordPopup => {
                let word = request.word()?;
                self.repo.delete_word(word).await?;
                self.broadcast(Notification::WordDeletedPopup(word.to_string()))
                    .await;
                Ok(Response::Ack)
            }
            Action::ClearWordsPopup => {
                self.repo.set_words(&[]).await?;
                self.broadcast(Notification::ClearWordsPopup).await;
                Ok(Response::Ack)
            }
        }
    }

    async fn broadcast(&self, notification: Notification) {
        if let Err(e) = self.notifier.notify_active_tab(notification).await {
            warn!(error = %e, "could not notify active tab");
        }
    }
}

/// In-process channel: pages and popups in the same context talk to the
/// service directly
#[async_trait(?Send)]
impl<S: KeyValueStore, N: TabNotifier> Channel for BackgroundService<S, N> {
    async fn send(&self, request: Request) -> Result<Response> {
        self.handle(request).await
    }
}
