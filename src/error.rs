//! Error taxonomy
//!
//! Storage and channel failures are logged at the call site and treated as
//! no-ops. A policy violation is the only error that reaches the user.

use thiserror::Error;

/// Failures of the DOM adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Node is detached from the document")]
    Detached,

    #[error("Not a text node")]
    NotText,

    #[error("Range {start}..{end} is outside a text of {len} bytes")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Range {start}..{end} does not fall on character boundaries")]
    SplitCharacter { start: usize, end: usize },

    #[error("No document body")]
    NoBody,

    #[error("DOM operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EasyWordError {
    /// Backing store or the channel to it failed
    #[error("Storage access failed: {0}")]
    StorageAccess(String),

    /// Message could not be delivered or had no receiver
    #[error("Channel delivery failed: {0}")]
    ChannelDelivery(String),

    /// The word is already in the known-word dictionary
    #[error("You already know this word: {0}")]
    UserPolicyViolation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, EasyWordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_violation_names_word() {
        let err = EasyWordError::UserPolicyViolation("is".to_string());
        let display = err.to_string();
        assert!(display.contains("already know"));
        assert!(display.contains("is"));
    }

    #[test]
    fn test_dom_error_converts() {
        let err: EasyWordError = DomError::NotText.into();
        assert_eq!(err, EasyWordError::Dom(DomError::NotText));
        assert_eq!(err.to_string(), "Not a text node");
    }

    #[test]
    fn test_range_error_display() {
        let err = DomError::RangeOutOfBounds { start: 2, end: 9, len: 4 };
        assert!(err.to_string().contains("2..9"));
        assert!(err.to_string().contains("4 bytes"));
    }
}
