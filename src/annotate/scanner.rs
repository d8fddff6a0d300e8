//! Text Scanner: leaf text nodes in document order
//!
//! Depth-first pre-order walk over element children. Text nodes are yielded,
//! elements are descended into, everything else (comments etc.) is skipped.
//! The walk holds no state between calls, so it can be re-run on a tree that
//! was mutated in between.

use crate::dom::{DomTree, NodeKind};

/// Lazy iterator over the text nodes below a root
pub struct TextNodes<'a, D: DomTree> {
    dom: &'a D,
    stack: Vec<D::Node>,
}

impl<'a, D: DomTree> Iterator for TextNodes<'a, D> {
    type Item = D::Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match self.dom.kind(&node) {
                NodeKind::Text => return Some(node),
                NodeKind::Element => {
                    let children = self.dom.children(&node);
                    self.stack.extend(children.into_iter().rev());
                }
                NodeKind::Other => {}
            }
        }
        None
    }
}

/// Walk `root` and yield its text nodes (including `root` itself if it is one)
pub fn scan<'a, D: DomTree>(dom: &'a D, root: &D::Node) -> TextNodes<'a, D> {
    TextNodes {
        dom,
        stack: vec![root.clone()],
    }
}

/// Snapshot of all text nodes below `root`, taken before any mutation
pub fn text_nodes<D: DomTree>(dom: &D, root: &D::Node) -> Vec<D::Node> {
    scan(dom, root).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_document_order() {
        let mut doc = Document::new();
        let body = doc.body_id();
        let a = doc.append_text(body, "a").unwrap();
        let div = doc.append_element(body, "div").unwrap();
        let b = doc.append_text(div, "b").unwrap();
        let em = doc.append_element(div, "em").unwrap();
        let c = doc.append_text(em, "c").unwrap();
        let d = doc.append_text(body, "d").unwrap();

        assert_eq!(text_nodes(&doc, &body), vec![a, b, c, d]);
    }

    #[test]
    fn test_comments_skipped() {
        let mut doc = Document::new();
        let body = doc.body_id();
        doc.append_comment(body, "not text").unwrap();
        let t = doc.append_text(body, "text").unwrap();

        assert_eq!(text_nodes(&doc, &body), vec![t]);
    }

    #[test]
    fn test_root_text_node_yields_itself() {
        let mut doc = Document::new();
        let t = doc.append_text(doc.body_id(), "solo").unwrap();
        assert_eq!(text_nodes(&doc, &t), vec![t]);
    }

    #[test]
    fn test_empty_element() {
        let doc = Document::new();
        assert!(text_nodes(&doc, &doc.body_id()).is_empty());
    }

    #[test]
    fn test_rescan_sees_mutations() {
        let mut doc = Document::new();
        let body = doc.body_id();
        doc.append_text(body, "first").unwrap();
        assert_eq!(scan(&doc, &body).count(), 1);

        let p = doc.append_element(body, "p").unwrap();
        doc.append_text(p, "second").unwrap();
        assert_eq!(scan(&doc, &body).count(), 2);
    }
}
