//! Cell-based box layout of a [`Document`].
//!
//! Every length is read in terminal cells: `"40px"` is forty columns wide.
//! Rules:
//!
//! - `display: none` removes a node and its subtree.
//! - `position: fixed` with `inset: 0` covers the viewport; otherwise
//!   `absolute`/`fixed` nodes are placed at `left`/`top` relative to the
//!   viewport and do not take up space in their parent.
//! - `border: 1` adds a one-cell frame around the content.
//! - Block children stack vertically below the node's own text. Runs of
//!   inline children share one row, separated by a single cell.

use unicode_width::UnicodeWidthStr;

use super::css;
use super::{Document, NodeId};

/// Extra cells a button takes around its label (`"[ OK ]"`).
pub const BUTTON_PADDING: i32 = 4;

/// A box in viewport cells. Coordinates may be negative or exceed the
/// viewport when an element is placed partly off screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x < self.x.saturating_add(self.width)
            && y >= self.y
            && y < self.y.saturating_add(self.height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The area inside a border of `inset` cells.
    pub const fn inner(&self, inset: i32) -> Self {
        Self {
            x: self.x.saturating_add(inset),
            y: self.y.saturating_add(inset),
            width: self.width.saturating_sub(inset.saturating_mul(2)),
            height: self.height.saturating_sub(inset.saturating_mul(2)),
        }
    }
}

/// Boxes of every rendered node in paint order.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    boxes: Vec<(NodeId, Rect)>,
}

impl Layout {
    pub fn compute(doc: &Document) -> Self {
        let mut layout = Self::default();
        let viewport = doc.viewport();
        let body = doc.body();
        let area = Rect::new(0, 0, i32::from(viewport.width), i32::from(viewport.height));
        layout.boxes.push((body, area));
        let mut cursor = 0;
        layout.place_children(doc, body, area, &mut cursor);
        layout
    }

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.boxes
            .iter()
            .find(|(id, _)| *id == node)
            .map(|(_, rect)| *rect)
    }

    /// Rendered nodes, parents before their descendants.
    pub fn boxes(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        self.boxes.iter().copied()
    }

    /// The topmost rendered node covering the cell `(x, y)`.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<NodeId> {
        self.boxes
            .iter()
            .rev()
            .find(|(_, rect)| !rect.is_empty() && rect.contains(x, y))
            .map(|(id, _)| *id)
    }

    /// Lay out `node` with its top-left corner at `(x, y)` inside a
    /// containing block `width` cells wide. Returns the height it occupies in
    /// the flow of its parent.
    fn place(&mut self, doc: &Document, node: NodeId, x: i32, y: i32, width: i32) -> i32 {
        let Some(element) = doc.node(node) else {
            return 0;
        };
        let style = element.style();
        let viewport = doc.viewport();

        let covers_viewport =
            style.get("position") == Some("fixed") && style.get("inset") == Some("0");
        let (x, y, width) = if covers_viewport {
            (0, 0, i32::from(viewport.width))
        } else if element.is_positioned() {
            let left = style.get("left").and_then(css::cells).unwrap_or(0);
            let top = style.get("top").and_then(css::cells).unwrap_or(0);
            let width = style
                .get("width")
                .and_then(css::cells)
                .unwrap_or_else(|| i32::from(viewport.width));
            (left, top, width)
        } else {
            let width = style.get("width").and_then(css::cells).unwrap_or(width);
            (x, y, width)
        };

        let slot = self.boxes.len();
        self.boxes.push((node, Rect::new(x, y, width, 0)));

        let border = i32::from(style.get("border") == Some("1"));
        let content = Rect::new(x, y, width, 0).inner(border);
        let mut cursor = content.y.saturating_add(text_lines(element.text()));
        self.place_children(doc, node, content, &mut cursor);

        let height = if covers_viewport {
            i32::from(viewport.height)
        } else {
            style
                .get("height")
                .and_then(css::cells)
                .unwrap_or_else(|| cursor.saturating_sub(y).saturating_add(border))
        };
        self.boxes[slot].1.height = height;

        if element.is_positioned() { 0 } else { height }
    }

    fn place_children(&mut self, doc: &Document, node: NodeId, content: Rect, cursor: &mut i32) {
        let Some(element) = doc.node(node) else {
            return;
        };
        let mut row_x: Option<i32> = None;

        for &child in element.children() {
            let Some(child_node) = doc.node(child) else {
                continue;
            };
            if child_node.is_hidden() {
                continue;
            }

            if child_node.is_inline() && !child_node.is_positioned() {
                let x = row_x.unwrap_or(content.x);
                let width = inline_width(child_node.tag(), child_node.text());
                self.boxes.push((child, Rect::new(x, *cursor, width, 1)));
                row_x = Some(x.saturating_add(width).saturating_add(1));
                continue;
            }

            if row_x.take().is_some() {
                *cursor = cursor.saturating_add(1);
            }
            let height = self.place(doc, child, content.x, *cursor, content.width);
            *cursor = cursor.saturating_add(height);
        }

        if row_x.is_some() {
            *cursor = cursor.saturating_add(1);
        }
    }
}

fn text_lines(text: Option<&str>) -> i32 {
    text.map_or(0, |text| i32::try_from(text.lines().count()).unwrap_or(i32::MAX))
}

fn inline_width(tag: &str, text: Option<&str>) -> i32 {
    let label = i32::try_from(text.unwrap_or_default().width()).unwrap_or(i32::MAX);
    if tag == "button" {
        label.saturating_add(BUTTON_PADDING)
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog(doc: &mut Document) -> (NodeId, NodeId, NodeId, NodeId) {
        let root = doc.create_element("div");
        doc.set_style(root, "position", "fixed");
        doc.set_style(root, "inset", "0");
        let panel = doc.create_element("div");
        doc.set_style(panel, "position", "absolute");
        doc.set_style(panel, "border", "1");
        doc.set_style(panel, "width", "20px");
        doc.set_style(panel, "left", "3px");
        doc.set_style(panel, "top", "2px");
        let body = doc.create_element("div");
        doc.set_text(body, "Delete?");
        let footer = doc.create_element("div");
        let confirm = doc.create_element("button");
        doc.set_text(confirm, "OK");
        let cancel = doc.create_element("button");
        doc.set_text(cancel, "Cancel");

        let document_body = doc.body();
        doc.append_child(document_body, root);
        doc.append_child(root, panel);
        doc.append_child(panel, body);
        doc.append_child(panel, footer);
        doc.append_child(footer, confirm);
        doc.append_child(footer, cancel);
        (root, panel, confirm, cancel)
    }

    #[test]
    fn test_bordered_panel_height() {
        let mut doc = Document::new(80, 24);
        let (root, panel, _, _) = dialog(&mut doc);
        let layout = Layout::compute(&doc);

        assert_eq!(layout.rect(root), Some(Rect::new(0, 0, 80, 24)));
        // Two border rows, one body line, one footer row.
        assert_eq!(layout.rect(panel), Some(Rect::new(3, 2, 20, 4)));
    }

    #[test]
    fn test_inline_row() {
        let mut doc = Document::new(80, 24);
        let (_, _, confirm, cancel) = dialog(&mut doc);
        let layout = Layout::compute(&doc);

        assert_eq!(layout.rect(confirm), Some(Rect::new(4, 4, 6, 1)));
        assert_eq!(layout.rect(cancel), Some(Rect::new(11, 4, 10, 1)));
    }

    #[test]
    fn test_hit_test_prefers_deepest() {
        let mut doc = Document::new(80, 24);
        let (root, panel, confirm, _) = dialog(&mut doc);
        let layout = Layout::compute(&doc);

        assert_eq!(layout.hit_test(5, 4), Some(confirm));
        assert_eq!(layout.hit_test(3, 2), Some(panel));
        assert_eq!(layout.hit_test(60, 20), Some(root));
    }

    #[test]
    fn test_hidden_subtree_has_no_box() {
        let mut doc = Document::new(80, 24);
        let (root, panel, confirm, _) = dialog(&mut doc);
        doc.hide(root);
        let layout = Layout::compute(&doc);

        assert!(layout.rect(root).is_none());
        assert!(layout.rect(panel).is_none());
        assert!(layout.rect(confirm).is_none());
        assert_eq!(layout.hit_test(5, 4), Some(doc.body()));
    }

    #[test]
    fn test_extreme_lengths_do_not_overflow() {
        let mut doc = Document::new(80, 24);
        let (root, panel, _, _) = dialog(&mut doc);
        doc.set_style(panel, "left", "1500000040px");
        doc.set_style(panel, "top", "-2147483648px");
        for width in ["-3000000000px", "3000000000px", "-2147483648px"] {
            doc.set_style(panel, "width", width);
            let layout = Layout::compute(&doc);
            assert!(layout.rect(panel).is_some());
            assert_eq!(layout.hit_test(1, 1), Some(root));
        }
    }

    #[test]
    fn test_rect_arithmetic_saturates() {
        let rect = Rect::new(i32::MAX - 1, 0, i32::MAX, 1);
        assert!(rect.contains(i32::MAX - 1, 0));
        let inner = Rect::new(0, 0, i32::MIN, i32::MIN).inner(1);
        assert_eq!(inner.width, i32::MIN);
        assert!(inner.is_empty());
    }

    #[test]
    fn test_wide_characters() {
        assert_eq!(inline_width("button", Some("确定")), 8);
        assert_eq!(inline_width("span", Some("OK")), 2);
    }
}
