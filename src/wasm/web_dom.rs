//! WebDom: [`DomTree`] over the live page via web-sys
//!
//! Byte ranges from the engine are converted to the UTF-16 offsets the DOM
//! uses before any split.

use std::ops::Range;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node, Text};

use crate::dom::{DomTree, NodeKind};
use crate::error::DomError;

fn js_err(e: JsValue) -> DomError {
    DomError::Operation(format!("{:?}", e))
}

fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The page's document, if running in a window
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Append a `<style>` element with `css` to `<head>`
    pub fn inject_stylesheet(&self, css: &str) -> Result<(), DomError> {
        let style = self.document.create_element("style").map_err(js_err)?;
        style.set_text_content(Some(css));
        let head = self.document.head().ok_or(DomError::NoBody)?;
        head.append_child(&style).map_err(js_err)?;
        Ok(())
    }
}

impl DomTree for WebDom {
    type Node = Node;

    fn body(&self) -> Option<Node> {
        self.document.body().map(Node::from)
    }

    fn kind(&self, node: &Node) -> NodeKind {
        match node.node_type() {
            Node::ELEMENT_NODE => NodeKind::Element,
            Node::TEXT_NODE => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn text(&self, node: &Node) -> Option<String> {
        if node.node_type() == Node::TEXT_NODE {
            node.node_value()
        } else {
            None
        }
    }

    fn text_content(&self, node: &Node) -> String {
        node.text_content().unwrap_or_default()
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        node.dyn_ref::<Element>()
            .map(|el| el.class_list().contains(class))
            .unwrap_or(false)
    }

    fn wrap_range(
        &mut self,
        text_node: &Node,
        range: Range<usize>,
        class: &str,
    ) -> Result<Node, DomError> {
        let value = self.text(text_node).ok_or(DomError::NotText)?;
        if range.start > range.end || range.end > value.len() {
            return Err(DomError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: value.len(),
            });
        }
        if !value.is_char_boundary(range.start) || !value.is_char_boundary(range.end) {
            return Err(DomError::SplitCharacter {
                start: range.start,
                end: range.end,
            });
        }
        let parent = text_node.parent_node().ok_or(DomError::Detached)?;
        let text: Text = text_node.clone().dyn_into().map_err(|_| DomError::NotText)?;

        let start16 = utf16_len(&value[..range.start]);
        let matched16 = utf16_len(&value[range.clone()]);
        let rest16 = utf16_len(&value[range.start..]);

        let matched = if start16 > 0 {
            text.split_text(start16).map_err(js_err)?
        } else {
            text
        };
        if rest16 > matched16 {
            matched.split_text(matched16).map_err(js_err)?;
        }

        let span = self.document.create_element("span").map_err(js_err)?;
        span.set_class_name(class);
        parent.replace_child(&span, &matched).map_err(js_err)?;
        span.append_child(&matched).map_err(js_err)?;
        Ok(span.into())
    }

    fn query_class(&self, classes: &[&str]) -> Vec<Node> {
        let selector = classes
            .iter()
            .map(|c| format!(".{}", c))
            .collect::<Vec<_>>()
            .join(", ");
        match self.document.query_selector_all(&selector) {
            Ok(list) => (0..list.length()).filter_map(|i| list.item(i)).collect(),
            Err(e) => {
                web_sys::console::error_1(&format!("[WebDom] query failed: {:?}", e).into());
                Vec::new()
            }
        }
    }

    fn replace_with_text(&mut self, node: &Node, text: &str) -> Result<(), DomError> {
        let parent = node.parent_node().ok_or(DomError::Detached)?;
        let replacement = self.document.create_text_node(text);
        parent.replace_child(&replacement, node).map_err(js_err)?;
        Ok(())
    }

    fn append_affordance(
        &mut self,
        x: f64,
        y: f64,
        label: &str,
        class: &str,
    ) -> Result<Node, DomError> {
        let body = self.document.body().ok_or(DomError::NoBody)?;
        let button = self.document.create_element("button").map_err(js_err)?;
        button.set_text_content(Some(label));
        button.set_class_name(class);
        button
            .set_attribute(
                "style",
                &format!("position: absolute; left: {}px; top: {}px;", x, y),
            )
            .map_err(js_err)?;
        body.append_child(&button).map_err(js_err)?;
        Ok(button.into())
    }

    fn remove(&mut self, node: &Node) {
        if let Some(parent) = node.parent_node() {
            let _ = parent.remove_child(node);
        }
    }

    fn is_attached(&self, node: &Node) -> bool {
        node.is_connected()
    }
}
