//! InteractionController: selection gestures → tracked-word edits
//!
//! States: `Idle` and `ShowingAffordance(selection)`.
//! - double-click: edit the selected word right away, back to `Idle`
//! - release with a selection: show the affordance at the pointer
//! - release on the affordance: edit the pending selection, back to `Idle`
//! - click outside with no selection, scroll, timeout: back to `Idle`
//!
//! A release within the debounce window of the previous activation is
//! ignored so one double-click never also produces an affordance.
//!
//! Edits are two-phase: [`InteractionController::plan_edit`] checks policy
//! and picks add or remove, the store is asked, and only an acknowledged edit
//! is applied with [`InteractionController::commit_edit`].

use tracing::{debug, error, warn};

use super::affordance::{Affordance, InteractionState, UiEvent};
use super::clock::{Clock, InstantClock};
use super::config::ControllerConfig;
use crate::annotate::marker::{MarkerKind, AFFORDANCE_CLASS};
use crate::annotate::matching::normalize_selection;
use crate::annotate::{decorate, remove_decoration};
use crate::dom::DomTree;
use crate::error::{EasyWordError, Result};
use crate::messaging::{Action, Channel, Notification, Request};
use crate::session::{generate_stylesheet, SessionState};

// =============================================================================
// WordEdit
// =============================================================================

/// A decided change to the tracked-word list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordEdit {
    Add(String),
    /// Carries the stored spelling of the tracked word
    Remove(String),
}

impl WordEdit {
    pub fn word(&self) -> &str {
        match self {
            WordEdit::Add(word) | WordEdit::Remove(word) => word,
        }
    }

    /// Store request that must be acknowledged before the edit is applied
    pub fn request(&self) -> Request {
        match self {
            WordEdit::Add(word) => Request::with_word(Action::AddWordContent, word.as_str()),
            WordEdit::Remove(word) => Request::with_word(Action::DeleteWordContent, word.as_str()),
        }
    }
}

/// Ask the store to apply `edit`. Callers commit only on `Ok`.
///
/// Takes the channel alone so a caller sharing the controller can await this
/// without keeping the controller borrowed.
pub async fn submit_edit<C: Channel>(channel: &C, edit: &WordEdit) -> Result<()> {
    match channel.send(edit.request()).await {
        Ok(_) => Ok(()),
        Err(e) => {
            error!(word = edit.word(), error = %e, "store rejected edit");
            Err(e)
        }
    }
}

// =============================================================================
// InteractionController
// =============================================================================

pub struct InteractionController<D: DomTree, C, K = InstantClock> {
    dom: D,
    channel: C,
    clock: K,
    config: ControllerConfig,
    session: SessionState,
    last_activation_ms: Option<f64>,
    affordance: Option<Affordance<D::Node>>,
}

impl<D: DomTree, C: Channel> InteractionController<D, C, InstantClock> {
    pub fn new(dom: D, channel: C) -> Self {
        Self::with_clock(dom, channel, InstantClock::new(), ControllerConfig::default())
    }
}

impl<D: DomTree, C: Channel, K: Clock> InteractionController<D, C, K> {
    pub fn with_clock(dom: D, channel: C, clock: K, config: ControllerConfig) -> Self {
        Self {
            dom,
            channel,
            clock,
            config,
            session: SessionState::default(),
            last_activation_ms: None,
            affordance: None,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn set_session(&mut self, session: SessionState) {
        self.session = session;
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> InteractionState {
        match &self.affordance {
            Some(a) => InteractionState::ShowingAffordance {
                selection: a.selection.clone(),
            },
            None => InteractionState::Idle,
        }
    }

    pub fn affordance(&self) -> Option<&Affordance<D::Node>> {
        self.affordance.as_ref()
    }

    /// Stylesheet for the current settings
    pub fn stylesheet(&self) -> String {
        generate_stylesheet(&self.session.settings)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Fetch settings, words and dictionary. On failure the session keeps its
    /// inert defaults.
    pub async fn load(&mut self) -> Result<()> {
        let response = self.channel.send(Request::new(Action::GetData)).await;
        match response.and_then(|r| r.into_word_data()) {
            Ok(data) => {
                self.session = SessionState::from(data);
                debug!(
                    words = self.session.words.len(),
                    dictionary = self.session.dictionary.len(),
                    "session loaded"
                );
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to load session data");
                Err(e)
            }
        }
    }

    /// Decorate every tracked word if highlighting is enabled
    pub fn highlight_all(&mut self) -> usize {
        if !self.session.settings.highlight_enabled {
            return 0;
        }
        let words: Vec<String> = self.session.words.iter().cloned().collect();
        words
            .iter()
            .map(|word| decorate(&mut self.dom, word, MarkerKind::Selected))
            .sum()
    }

    /// Undecorate and forget every tracked word
    pub fn clear_words(&mut self) {
        for word in self.session.words.clear() {
            remove_decoration(&mut self.dom, &word);
        }
    }

    pub fn handle_notification(&mut self, notification: Notification) {
        debug!(?notification, "notification received");
        match notification {
            Notification::WordDeletedPopup(word) => {
                self.session.words.remove(&word);
                remove_decoration(&mut self.dom, &word);
            }
            Notification::ClearWordsPopup => self.clear_words(),
        }
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    /// Advance the state machine. Returns the word whose add/remove decision
    /// should run, if the event asked for one.
    pub fn handle_event(&mut self, event: UiEvent) -> Option<String> {
        let now = self.clock.now_ms();
        match event {
            UiEvent::DoubleClick { selection } => {
                self.last_activation_ms = Some(now);
                self.dismiss_affordance();
                normalize_selection(&selection).map(str::to_string)
            }
            UiEvent::PointerRelease {
                selection,
                x,
                y,
                on_affordance,
            } => {
                if self.within_debounce(now) {
                    return None;
                }
                let word = self.on_release(&selection, x, y, on_affordance, now);
                self.last_activation_ms = Some(now);
                word
            }
            UiEvent::Click {
                selection,
                on_affordance,
            } => {
                if normalize_selection(&selection).is_none() && !on_affordance {
                    self.dismiss_affordance();
                }
                None
            }
            UiEvent::Scroll => {
                self.dismiss_affordance();
                None
            }
            UiEvent::AffordanceTimeout => {
                let timeout = self.config.affordance_timeout_ms;
                if self
                    .affordance
                    .as_ref()
                    .is_some_and(|a| a.is_expired(now, timeout))
                {
                    self.dismiss_affordance();
                }
                None
            }
        }
    }

    fn within_debounce(&self, now: f64) -> bool {
        self.last_activation_ms
            .is_some_and(|last| now - last < self.config.debounce_ms)
    }

    fn on_release(
        &mut self,
        selection: &str,
        x: f64,
        y: f64,
        on_affordance: bool,
        now: f64,
    ) -> Option<String> {
        if on_affordance {
            if let Some(affordance) = self.affordance.take() {
                self.dom.remove(&affordance.node);
                return Some(affordance.selection);
            }
        }

        let selection = normalize_selection(selection)?;
        self.dismiss_affordance();
        match self.dom.append_affordance(
            x,
            y,
            &self.config.affordance_label,
            AFFORDANCE_CLASS,
        ) {
            Ok(node) => {
                self.affordance = Some(Affordance {
                    node,
                    selection: selection.to_string(),
                    shown_at_ms: now,
                });
            }
            Err(e) => warn!(error = %e, "could not show affordance"),
        }
        None
    }

    fn dismiss_affordance(&mut self) {
        if let Some(affordance) = self.affordance.take() {
            if self.dom.is_attached(&affordance.node) {
                self.dom.remove(&affordance.node);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Add/remove decision
    // -------------------------------------------------------------------------

    /// Decide what selecting `word` means. Known words are rejected before
    /// anything is sent to the store.
    pub fn plan_edit(&self, word: &str) -> Result<WordEdit> {
        let word = normalize_selection(word)
            .ok_or_else(|| EasyWordError::InvalidRequest("empty selection".to_string()))?;
        if self.session.is_known(word) {
            return Err(EasyWordError::UserPolicyViolation(word.to_string()));
        }
        Ok(match self.session.words.get(word) {
            Some(stored) => WordEdit::Remove(stored.to_string()),
            None => WordEdit::Add(word.to_string()),
        })
    }

    /// Apply an edit the store has acknowledged
    pub fn commit_edit(&mut self, edit: &WordEdit) {
        debug!(?edit, "applying edit");
        match edit {
            WordEdit::Add(word) => {
                self.session.words.push(word.clone());
                decorate(&mut self.dom, word, MarkerKind::Selected);
            }
            WordEdit::Remove(word) => {
                self.session.words.remove(word);
                remove_decoration(&mut self.dom, word);
            }
        }
    }

    /// Full decision path: plan, ask the store, apply on acknowledgement.
    ///
    /// A failed store request is logged and leaves DOM and local list as
    /// they were.
    pub async fn edit_word_list(&mut self, word: &str) -> Result<WordEdit> {
        let edit = self.plan_edit(word)?;
        submit_edit(&self.channel, &edit).await?;
        self.commit_edit(&edit);
        Ok(edit)
    }

    /// Handle an event and run the decision path it triggers
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<Option<WordEdit>> {
        match self.handle_event(event) {
            Some(word) => self.edit_word_list(&word).await.map(Some),
            None => Ok(None),
        }
    }
}
