//! Decorator: wrap the first occurrence of a word in every text node
//!
//! Occurrences that straddle several text nodes (split by inline markup) are
//! not matched, and only the first occurrence inside each node is wrapped per
//! call. Text already inside a marker is left alone so repeated passes over an
//! unchanged region do not nest markers.

use tracing::{debug, warn};

use super::marker::{marker_classes, MarkerKind};
use super::matching::find_ignore_case;
use super::scanner::text_nodes;
use crate::dom::DomTree;

/// Decorate `word` across the document body. Returns the number of markers
/// created.
pub fn decorate<D: DomTree>(dom: &mut D, word: &str, kind: MarkerKind) -> usize {
    let Some(body) = dom.body() else {
        warn!(word, "decorate skipped: document has no body");
        return 0;
    };
    decorate_within(dom, &body, word, kind)
}

/// Decorate `word` below an arbitrary root
pub fn decorate_within<D: DomTree>(
    dom: &mut D,
    root: &D::Node,
    word: &str,
    kind: MarkerKind,
) -> usize {
    if word.is_empty() {
        return 0;
    }

    // Snapshot first: wrapping splits nodes and must not feed back into the walk
    let candidates = text_nodes(dom, root);
    let class = kind.class_name();
    let mut wrapped = 0;

    for node in candidates {
        if inside_marker(dom, &node) {
            continue;
        }
        let Some(text) = dom.text(&node) else {
            continue;
        };
        let Some(range) = find_ignore_case(&text, word) else {
            continue;
        };
        match dom.wrap_range(&node, range, class) {
            Ok(_) => wrapped += 1,
            Err(e) => warn!(word, error = %e, "failed to wrap occurrence"),
        }
    }

    debug!(word, ?kind, wrapped, "decorated");
    wrapped
}

fn inside_marker<D: DomTree>(dom: &D, node: &D::Node) -> bool {
    dom.parent(node)
        .map(|parent| marker_classes().iter().any(|class| dom.has_class(&parent, class)))
        .unwrap_or(false)
}
