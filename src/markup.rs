//! Page markup the host builds before creating the dialog.

use lazymodal::{Document, NodeId};

pub const ROOT_ID: &str = "dialog";

/// Nodes of the demo page.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub root: NodeId,
}

/// Build a page holding a paragraph and a hidden dialog:
///
/// ```text
/// div#dialog.modal-wrap
/// └── div.modal
///     ├── div.modal-header   title
///     ├── div.modal-body     message
///     └── div.modal-footer
///         ├── button.confirm
///         └── button.cancel
/// ```
pub fn build(doc: &mut Document, title: &str, message: &str, hint: &str) -> Page {
    let body = doc.body();

    let paragraph = element(doc, body, "p", "page-hint");
    doc.set_text(paragraph, hint);

    let root = element(doc, body, "div", "modal-wrap");
    doc.set_id(root, ROOT_ID);
    doc.set_style(root, "display", "none");
    doc.set_style(root, "position", "fixed");
    doc.set_style(root, "inset", "0");

    let panel = element(doc, root, "div", "modal");
    doc.set_style(panel, "position", "absolute");
    doc.set_style(panel, "border", "1");

    let header = element(doc, panel, "div", "modal-header");
    doc.set_text(header, title);
    let content = element(doc, panel, "div", "modal-body");
    doc.set_text(content, message);

    let footer = element(doc, panel, "div", "modal-footer");
    element(doc, footer, "button", "confirm");
    element(doc, footer, "button", "cancel");

    Page { root }
}

fn element(doc: &mut Document, parent: NodeId, tag: &str, class: &str) -> NodeId {
    let node = doc.create_element(tag);
    doc.add_class(node, class);
    doc.append_child(parent, node);
    node
}

#[cfg(test)]
mod tests {
    use lazymodal::dialog::{CANCEL_SELECTOR, CONFIRM_SELECTOR, FOOTER_SELECTOR, PANEL_SELECTOR};

    use super::*;

    #[test]
    fn test_markup_matches_dialog_contract() {
        let mut doc = Document::new(80, 24);
        let page = build(&mut doc, "Title", "Body", "hint");

        assert!(!doc.is_displayed(page.root));
        assert_eq!(doc.query_document(&format!("#{ROOT_ID}")).first(), Some(page.root));
        assert_eq!(doc.query(page.root, PANEL_SELECTOR).len(), 1);
        let footer = doc.query(page.root, FOOTER_SELECTOR);
        assert_eq!(footer.find(&doc, CONFIRM_SELECTOR).len(), 1);
        assert_eq!(footer.find(&doc, CANCEL_SELECTOR).len(), 1);
    }
}
