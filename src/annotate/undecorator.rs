//! Undecorator: turn markers for a word back into plain text

use tracing::{debug, warn};

use super::marker::marker_classes;
use super::matching::comparison_key;
use crate::dom::DomTree;

/// Replace every marker (of any kind) whose text matches `word`
/// case-insensitively with a plain text node holding the same text.
/// Returns the number of markers removed.
pub fn remove_decoration<D: DomTree>(dom: &mut D, word: &str) -> usize {
    let key = comparison_key(word);
    let markers = dom.query_class(&marker_classes());
    let mut removed = 0;

    for marker in markers {
        let text = dom.text_content(&marker);
        if comparison_key(&text) != key {
            continue;
        }
        match dom.replace_with_text(&marker, &text) {
            Ok(()) => removed += 1,
            Err(e) => warn!(word, error = %e, "failed to remove marker"),
        }
    }

    debug!(word, removed, "undecorated");
    removed
}
