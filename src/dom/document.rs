//! Document: Arena-backed In-memory DOM
//!
//! A small DOM with just enough structure for text annotation: elements with
//! a tag, class list and inline style, text nodes and comments. Nodes live in
//! a flat arena and are addressed by [`NodeId`]; detached nodes stay in the
//! arena so stale ids never alias a different node.

use std::ops::Range;

use super::{DomTree, NodeKind};
use crate::error::DomError;

// =============================================================================
// Types
// =============================================================================

/// Handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        classes: Vec<String>,
        style: Option<String>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct NodeEntry {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

// =============================================================================
// Document
// =============================================================================

/// In-memory document with `<html>`, `<head>` and `<body>` pre-created
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeEntry>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
        };
        let root = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.attach(root, head);
        doc.attach(root, body);
        doc.root = root;
        doc.head = head;
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body_id(&self) -> NodeId {
        self.body
    }

    /// Number of nodes ever created, attached or not
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            style: None,
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    /// Move `child` to the end of `parent`'s children
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if !matches!(self.nodes[parent.0].data, NodeData::Element { .. }) {
            return Err(DomError::Operation("only elements can have children".to_string()));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DomError::Operation("cannot append a node into itself".to_string()));
        }
        self.detach(child);
        self.attach(parent, child);
        Ok(())
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DomError> {
        let node = self.create_element(tag);
        self.append_child(parent, node)?;
        Ok(node)
    }

    /// Create a text node and append it to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        let node = self.create_text(text);
        self.append_child(parent, node)?;
        Ok(node)
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        let node = self.create_comment(text);
        self.append_child(parent, node)?;
        Ok(node)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.check(node)?;
        match &mut self.nodes[node.0].data {
            NodeData::Element { classes, .. } => {
                if !classes.iter().any(|c| c == class) {
                    classes.push(class.to_string());
                }
                Ok(())
            }
            _ => Err(DomError::Operation("classes require an element".to_string())),
        }
    }

    pub fn set_style(&mut self, node: NodeId, css: &str) -> Result<(), DomError> {
        self.check(node)?;
        match &mut self.nodes[node.0].data {
            NodeData::Element { style, .. } => {
                *style = Some(css.to_string());
                Ok(())
            }
            _ => Err(DomError::Operation("style requires an element".to_string())),
        }
    }

    /// Overwrite the value of a text node
    pub fn set_text(&mut self, node: NodeId, value: &str) -> Result<(), DomError> {
        self.check(node)?;
        match &mut self.nodes[node.0].data {
            NodeData::Text(text) => {
                *text = value.to_string();
                Ok(())
            }
            _ => Err(DomError::NotText),
        }
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn style(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Element { style, .. } => style.as_deref(),
            _ => None,
        }
    }

    /// Serialize a subtree to HTML-like markup
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Serialize the children of `<body>`
    pub fn body_html(&self) -> String {
        let mut out = String::new();
        for child in &self.nodes[self.body.0].children {
            self.write_html(*child, &mut out);
        }
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(entry) = self.nodes.get(node.0) else {
            return;
        };
        match &entry.data {
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Element { tag, classes, style } => {
                out.push('<');
                out.push_str(tag);
                if !classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", classes.join(" ")));
                }
                if let Some(style) = style {
                    out.push_str(&format!(" style=\"{}\"", style));
                }
                out.push('>');
                for child in &entry.children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Arena plumbing
    // -------------------------------------------------------------------------

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeEntry {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn check(&self, node: NodeId) -> Result<(), DomError> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(DomError::Operation(format!("unknown node {:?}", node)))
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes[node.0].parent;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    fn index_in_parent(&self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.nodes.get(node.0)?.parent?;
        let index = self.nodes[parent.0].children.iter().position(|c| *c == node)?;
        Some((parent, index))
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment(_) => {}
            NodeData::Element { .. } => {
                for child in &self.nodes[node.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    fn collect_class(&self, node: NodeId, wanted: &[&str], out: &mut Vec<NodeId>) {
        let entry = &self.nodes[node.0];
        if let NodeData::Element { classes, .. } = &entry.data {
            if classes.iter().any(|c| wanted.contains(&c.as_str())) {
                out.push(node);
            }
            for child in &entry.children {
                self.collect_class(*child, wanted, out);
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

// =============================================================================
// DomTree
// =============================================================================

impl DomTree for Document {
    type Node = NodeId;

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn kind(&self, node: &NodeId) -> NodeKind {
        match self.nodes.get(node.0).map(|e| &e.data) {
            Some(NodeData::Element { .. }) => NodeKind::Element,
            Some(NodeData::Text(_)) => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn text(&self, node: &NodeId) -> Option<String> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    fn text_content(&self, node: &NodeId) -> String {
        match self.nodes.get(node.0).map(|e| &e.data) {
            Some(NodeData::Comment(text)) => text.clone(),
            Some(_) => {
                let mut out = String::new();
                self.collect_text(*node, &mut out);
                out
            }
            None => String::new(),
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        match self.nodes.get(node.0).map(|e| &e.data) {
            Some(NodeData::Element { classes, .. }) => classes.iter().any(|c| c == class),
            _ => false,
        }
    }

    fn wrap_range(
        &mut self,
        text_node: &NodeId,
        range: Range<usize>,
        class: &str,
    ) -> Result<NodeId, DomError> {
        let node = *text_node;
        let text = self.text(&node).ok_or(DomError::NotText)?;
        if range.start > range.end || range.end > text.len() {
            return Err(DomError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(range.start) || !text.is_char_boundary(range.end) {
            return Err(DomError::SplitCharacter {
                start: range.start,
                end: range.end,
            });
        }
        let (parent, index) = self.index_in_parent(node).ok_or(DomError::Detached)?;

        let before = &text[..range.start];
        let matched = &text[range.clone()];
        let after = &text[range.end..];

        let marker = self.create_element("span");
        self.add_class(marker, class)?;
        let inner = self.create_text(matched);
        self.attach(marker, inner);

        let mut replacement = Vec::with_capacity(3);
        if before.is_empty() {
            self.nodes[node.0].parent = None;
        } else {
            self.set_text(node, before)?;
            replacement.push(node);
        }
        replacement.push(marker);
        if !after.is_empty() {
            replacement.push(self.create_text(after));
        }
        let siblings = &mut self.nodes[parent.0].children;
        siblings.remove(index);
        for (offset, id) in replacement.iter().enumerate() {
            siblings.insert(index + offset, *id);
        }
        for id in replacement {
            self.nodes[id.0].parent = Some(parent);
        }

        Ok(marker)
    }

    fn query_class(&self, classes: &[&str]) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_class(self.root, classes, &mut out);
        out
    }

    fn replace_with_text(&mut self, node: &NodeId, text: &str) -> Result<(), DomError> {
        let (parent, index) = self.index_in_parent(*node).ok_or(DomError::Detached)?;
        let replacement = self.create_text(text);
        self.nodes[replacement.0].parent = Some(parent);
        self.nodes[parent.0].children[index] = replacement;
        self.nodes[node.0].parent = None;
        Ok(())
    }

    fn append_affordance(
        &mut self,
        x: f64,
        y: f64,
        label: &str,
        class: &str,
    ) -> Result<NodeId, DomError> {
        let body = self.body;
        let button = self.append_element(body, "button")?;
        self.add_class(button, class)?;
        self.set_style(button, &format!("position: absolute; left: {}px; top: {}px;", x, y))?;
        self.append_text(button, label)?;
        Ok(button)
    }

    fn remove(&mut self, node: &NodeId) {
        if node.0 < self.nodes.len() {
            self.detach(*node);
        }
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        if node.0 >= self.nodes.len() {
            return false;
        }
        *node == self.root || self.is_ancestor(self.root, *node)
    }
}
