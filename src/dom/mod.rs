//! DOM surface used by the annotation engine
//!
//! The engine never talks to a browser directly. It works against
//! [`DomTree`], which is implemented by the in-memory [`Document`] (native
//! builds and tests) and by `wasm::WebDom` over the live page.

pub mod document;

pub use document::*;

use std::fmt::Debug;
use std::ops::Range;

use crate::error::DomError;

/// Coarse node classification the scanner dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// Comments, processing instructions, doctypes
    Other,
}

/// The operations the annotation engine and the interaction controller need
/// from a document tree.
///
/// Text ranges are byte ranges into the UTF-8 string returned by
/// [`DomTree::text`]. Adapters backed by UTF-16 storage convert them.
pub trait DomTree {
    type Node: Clone + PartialEq + Debug;

    fn body(&self) -> Option<Self::Node>;

    fn kind(&self, node: &Self::Node) -> NodeKind;

    /// Child nodes in document order
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Node value of a text node, `None` for anything else
    fn text(&self, node: &Self::Node) -> Option<String>;

    /// Concatenated text of all descendant text nodes
    fn text_content(&self, node: &Self::Node) -> String;

    /// Returns true if the element's class list contains `class`
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Replace `range` of a text node with a `<span class=...>` holding the
    /// same text. Empty before/after remainders are not created.
    fn wrap_range(
        &mut self,
        text_node: &Self::Node,
        range: Range<usize>,
        class: &str,
    ) -> Result<Self::Node, DomError>;

    /// All attached elements carrying any of `classes`, in document order
    fn query_class(&self, classes: &[&str]) -> Vec<Self::Node>;

    /// Swap `node` for a single text node holding `text`
    fn replace_with_text(&mut self, node: &Self::Node, text: &str) -> Result<(), DomError>;

    /// Append an absolutely positioned button to the body
    fn append_affordance(
        &mut self,
        x: f64,
        y: f64,
        label: &str,
        class: &str,
    ) -> Result<Self::Node, DomError>;

    /// Detach a node. Removing a detached node is a no-op.
    fn remove(&mut self, node: &Self::Node);

    /// Returns true while the node is attached under the document root
    fn is_attached(&self, node: &Self::Node) -> bool;
}
