//! Draws a laid out [`Document`] into a ratatui frame.

use lazymodal::dom::layout::{Layout, Rect as CellRect};
use lazymodal::{Document, NodeId};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Theme;

/// The part of `rect` that falls inside `area`, plus how far its top-left
/// corner was cut off as `(rows, columns)`.
fn clip(rect: CellRect, area: Rect) -> Option<(Rect, (u16, u16))> {
    let left = i32::from(area.x).saturating_add(rect.x);
    let top = i32::from(area.y).saturating_add(rect.y);
    let right = left.saturating_add(rect.width).min(i32::from(area.right()));
    let bottom = top.saturating_add(rect.height).min(i32::from(area.bottom()));
    let x = left.max(i32::from(area.x));
    let y = top.max(i32::from(area.y));
    if right <= x || bottom <= y {
        return None;
    }

    let to_u16 = |v: i32| u16::try_from(v).unwrap_or(u16::MAX);
    Some((
        Rect::new(to_u16(x), to_u16(y), to_u16(right - x), to_u16(bottom - y)),
        (to_u16(y.saturating_sub(top)), to_u16(x.saturating_sub(left))),
    ))
}

fn covers_viewport(doc: &Document, node: NodeId) -> bool {
    doc.style(node, "position") == Some("fixed") && doc.style(node, "inset") == Some("0")
}

/// Render every shown node of `doc` into `area`. `focused` is drawn
/// highlighted.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    doc: &Document,
    focused: Option<NodeId>,
    theme: &Theme,
) {
    frame.render_widget(Block::default().style(Style::default().bg(theme.page())), area);

    let layout = Layout::compute(doc);
    for (id, rect) in layout.boxes() {
        if id == doc.body() {
            continue;
        }
        let Some(node) = doc.node(id) else {
            continue;
        };
        let Some((visible, scroll)) = clip(rect, area) else {
            continue;
        };

        if covers_viewport(doc, id) {
            let backdrop = Block::default().style(Style::default().bg(theme.backdrop()));
            frame.render_widget(backdrop, visible);
        }

        if node.tag() == "button" {
            let color = if node.has_class("confirm") {
                theme.confirm()
            } else if node.has_class("cancel") {
                theme.cancel()
            } else {
                theme.text
            };
            let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            if focused == Some(id) {
                style = style.bg(theme.focus_bg()).add_modifier(Modifier::UNDERLINED);
            }
            let label = format!("[ {} ]", node.text().unwrap_or_default());
            frame.render_widget(Paragraph::new(label).style(style).scroll(scroll), visible);
            continue;
        }

        let bordered = doc.style(id, "border") == Some("1");
        if bordered {
            frame.render_widget(Clear, visible);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border()))
                .style(Style::default().bg(theme.panel()));
            frame.render_widget(block, visible);
        }

        if let Some(text) = node.text() {
            let inner = rect.inner(i32::from(bordered));
            let lines = i32::try_from(text.lines().count()).unwrap_or(i32::MAX);
            let text_rect = CellRect::new(inner.x, inner.y, inner.width, lines);
            let Some((text_area, text_scroll)) = clip(text_rect, area) else {
                continue;
            };
            let style = if node.has_class("modal-header") {
                Style::default().fg(theme.title()).add_modifier(Modifier::BOLD)
            } else if node.has_class("page-hint") {
                Style::default().fg(theme.subtext0)
            } else {
                Style::default().fg(theme.text)
            };
            frame.render_widget(
                Paragraph::new(text.to_string()).style(style).scroll(text_scroll),
                text_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use lazymodal::{PartialConfig, create_dialog};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::markup;

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_clip() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(
            clip(CellRect::new(2, 1, 4, 2), area),
            Some((Rect::new(2, 1, 4, 2), (0, 0)))
        );
        assert_eq!(
            clip(CellRect::new(-3, -1, 6, 3), area),
            Some((Rect::new(0, 0, 3, 2), (1, 3)))
        );
        assert_eq!(clip(CellRect::new(12, 0, 4, 1), area), None);
    }

    #[test]
    fn test_renders_centered_dialog() {
        let mut doc = Document::new(40, 12);
        let page = markup::build(&mut doc, "Title", "Sure?", "press o");
        create_dialog(&mut doc, page.root, PartialConfig::new().width("20px")).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &doc, None, &Theme::default()))
            .unwrap();
        let rows = screen(&terminal);

        // Panel is 20 wide at column 10 and five rows tall starting at row 3.
        assert_eq!(doc.style(page.root, "display"), Some("block"));
        assert!(rows[3][10..].starts_with('╭'));
        assert!(rows[4].contains("Title"));
        assert!(rows[5].contains("Sure?"));
        assert!(rows[6].contains("[ OK ] [ Cancel ]"));
        assert!(rows[7][10..].starts_with('╰'));
    }

    #[test]
    fn test_huge_width_renders_without_panel() {
        let mut doc = Document::new(40, 12);
        let page = markup::build(&mut doc, "Title", "Sure?", "press o");
        let overrides = PartialConfig::new().width("-3000000000px");
        create_dialog(&mut doc, page.root, overrides).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &doc, None, &Theme::default()))
            .unwrap();
        let rows = screen(&terminal);

        assert!(rows.iter().all(|row| !row.contains("Title")));
        assert_eq!(
            clip(CellRect::new(i32::MAX, i32::MIN, i32::MAX, i32::MAX), Rect::new(0, 0, 40, 12)),
            None
        );
    }

    #[test]
    fn test_hidden_dialog_is_not_drawn() {
        let mut doc = Document::new(40, 12);
        markup::build(&mut doc, "Title", "Sure?", "press o");

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &doc, None, &Theme::default()))
            .unwrap();
        let rows = screen(&terminal);

        assert!(rows[0].starts_with("press o"));
        assert!(rows.iter().all(|row| !row.contains("Title")));
    }
}
