use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::config::{Action, KeybindingsConfig};

/// Rows taken by the status bar: a top border and one line.
pub const STATUS_BAR_HEIGHT: u16 = 2;

const HINTS: &[(Action, &str)] = &[
    (Action::FocusNext, "focus"),
    (Action::Press, "press"),
    (Action::Reopen, "reopen"),
    (Action::Quit, "quit"),
];

/// One-line bar under the document with the last dialog outcome and the key
/// hints.
pub struct StatusBar {
    hints: Vec<(String, &'static str)>,
}

impl StatusBar {
    pub fn new(keys: &KeybindingsConfig) -> Self {
        Self {
            hints: HINTS
                .iter()
                .map(|(action, label)| (keys.display(*action), *label))
                .collect(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, outcome: &str) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.overlay0))
            .style(Style::default().bg(theme.surface0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let key_style = Style::default().fg(theme.key_hint()).add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(theme.subtext0);

        let mut spans = vec![
            Span::styled(format!(" {outcome} "), Style::default().fg(theme.text)),
            Span::raw(" "),
        ];
        for (key, label) in &self.hints {
            spans.push(Span::styled(key.clone(), key_style));
            spans.push(Span::styled(format!(" {label}  "), label_style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    #[test]
    fn test_shows_outcome_and_hints() {
        let bar = StatusBar::new(&KeybindingsConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(80, STATUS_BAR_HEIGHT)).unwrap();
        terminal
            .draw(|frame| bar.render(frame, frame.area(), &Theme::default(), "Confirmed"))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let line: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 1)].symbol().to_string())
            .collect();
        assert!(line.contains("Confirmed"));
        assert!(line.contains("o reopen"));
        assert!(line.contains("q quit"));
    }
}
