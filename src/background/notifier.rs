//! Delivery of background → page notifications

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::error::{EasyWordError, Result};
use crate::messaging::Notification;

/// Sends a notification to the page in the active tab
#[async_trait(?Send)]
pub trait TabNotifier {
    async fn notify_active_tab(&self, notification: Notification) -> Result<()>;
}

/// FIFO mailbox standing in for the active tab.
///
/// The receiving page drains it on its next turn of the event loop.
#[derive(Debug)]
pub struct QueuedNotifier {
    queue: RefCell<VecDeque<Notification>>,
    has_active_tab: Cell<bool>,
}

impl Default for QueuedNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl QueuedNotifier {
    pub fn new() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
            has_active_tab: Cell::new(true),
        }
    }

    /// Without an active tab every delivery fails
    pub fn set_active_tab(&self, present: bool) {
        self.has_active_tab.set(present);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Take everything pending, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

#[async_trait(?Send)]
impl TabNotifier for QueuedNotifier {
    async fn notify_active_tab(&self, notification: Notification) -> Result<()> {
        if !self.has_active_tab.get() {
            return Err(EasyWordError::ChannelDelivery("no active tab".to_string()));
        }
        self.queue.borrow_mut().push_back(notification);
        Ok(())
    }
}
