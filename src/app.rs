use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use lazymodal::{Dialog, Document, Locale, NodeId, PartialConfig, create_dialog_localized};
use ratatui::layout::{Constraint, Layout};
use tracing::{debug, info, warn};

use crate::Theme;
use crate::config::{Action, KeybindingsConfig};
use crate::markup::{self, Page};
use crate::tui::{Event, Tui};
use crate::ui::{STATUS_BAR_HEIGHT, StatusBar, document_view};

/// Two clicks on the same cell within this window also fire `dblclick`.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy)]
struct Click {
    column: u16,
    row: u16,
    at: Instant,
}

pub struct App {
    doc: Document,
    page: Page,
    overrides: Option<PartialConfig>,
    locale: Locale,
    dialog: Option<Dialog>,
    controls: Vec<NodeId>,
    focused: Option<usize>,
    outcome: Rc<RefCell<String>>,
    last_click: Option<Click>,
    keys: KeybindingsConfig,
    status_bar: StatusBar,
    theme: Theme,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(
        title: &str,
        message: &str,
        overrides: PartialConfig,
        locale: Locale,
        keys: KeybindingsConfig,
        theme: Theme,
    ) -> Self {
        let mut doc = Document::new(0, 0);
        let hint = format!("Press {} to open the dialog.", keys.display(Action::Reopen));
        let page = markup::build(&mut doc, title, message, &hint);
        let outcome = Rc::new(RefCell::new(String::from("Ready")));

        let confirmed = Rc::clone(&outcome);
        let cancelled = Rc::clone(&outcome);
        let overrides = overrides
            .merge(PartialConfig::new().on_confirm(move |dialog: &Dialog, doc, _| {
                info!("Dialog confirmed");
                *confirmed.borrow_mut() = "Confirmed".to_string();
                dialog.hide(doc);
            }))
            .merge(PartialConfig::new().on_cancel(move |dialog: &Dialog, doc, _| {
                info!("Dialog cancelled");
                *cancelled.borrow_mut() = "Cancelled".to_string();
                dialog.hide(doc);
            }));

        Self {
            doc,
            page,
            overrides: Some(overrides),
            locale,
            dialog: None,
            controls: Vec::new(),
            focused: None,
            outcome,
            last_click: None,
            status_bar: StatusBar::new(&keys),
            keys,
            theme,
            should_quit: false,
            should_suspend: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(30.0, 4.0)?;
        tui.enter()?;

        let size = tui.size()?;
        self.resize(size.width, size.height);
        self.open();

        while !self.should_quit {
            let Some(event) = tui.next_event().await else {
                break;
            };
            match event {
                Event::Quit => self.should_quit = true,
                Event::Render => self.render(&mut tui)?,
                Event::Resize(width, height) => {
                    self.resize(width, height);
                    self.render(&mut tui)?;
                }
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
                Event::Error(message) => warn!(%message, "Terminal input error"),
                Event::Init | Event::Tick => {}
            }

            if self.should_suspend {
                info!("Suspending");
                tui.suspend()?;
                tui.resume()?;
                self.should_suspend = false;
                tui.clear()?;
                self.render(&mut tui)?;
            }
        }

        tui.exit()?;
        Ok(())
    }

    /// The document gets everything above the status bar.
    fn resize(&mut self, width: u16, height: u16) {
        self.doc
            .set_viewport(width, height.saturating_sub(STATUS_BAR_HEIGHT));
    }

    /// Create the dialog on first use, re-activate it afterwards.
    fn open(&mut self) {
        if let Some(dialog) = &self.dialog {
            dialog.activate(&mut self.doc);
        } else if let Some(overrides) = self.overrides.take() {
            self.dialog =
                create_dialog_localized(&mut self.doc, self.page.root, overrides, self.locale);
        }
        self.controls = self.doc.query(self.page.root, "button").nodes().to_vec();
        self.focused = (!self.controls.is_empty()).then_some(0);
        debug!(controls = self.controls.len(), "Dialog opened");
    }

    fn is_open(&self) -> bool {
        self.dialog.as_ref().is_some_and(|d| d.is_visible(&self.doc))
    }

    fn focused_control(&self) -> Option<NodeId> {
        self.focused.and_then(|i| self.controls.get(i).copied())
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.controls.len();
        if count == 0 {
            return;
        }
        let current = self.focused.unwrap_or(0);
        self.focused = Some(if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let Some(action) = self.keys.action_for(&key) else {
            return;
        };
        match action {
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Reopen if !self.is_open() => self.open(),
            Action::FocusNext if self.is_open() => self.move_focus(true),
            Action::FocusPrev if self.is_open() => self.move_focus(false),
            Action::Press if self.is_open() => {
                if let Some(control) = self.focused_control() {
                    self.doc.dispatch(control, "click");
                }
            }
            _ => {}
        }
    }

    /// Translate a terminal mouse event into document events on the node
    /// under the pointer.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let Some(target) = self.doc.hit_test(mouse.column, mouse.row) else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.controls.iter().position(|c| *c == target) {
                    self.focused = Some(index);
                }
                self.doc.dispatch(target, "mousedown");
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.doc.dispatch(target, "mouseup");
                self.doc.dispatch(target, "click");

                let click = Click {
                    column: mouse.column,
                    row: mouse.row,
                    at: now,
                };
                let is_double = self.last_click.is_some_and(|last| {
                    last.column == click.column
                        && last.row == click.row
                        && now.duration_since(last.at) <= DOUBLE_CLICK_WINDOW
                });
                if is_double {
                    self.doc.dispatch(target, "dblclick");
                    self.last_click = None;
                } else {
                    self.last_click = Some(click);
                }
            }
            _ => {}
        }
    }

    fn render(&self, tui: &mut Tui) -> color_eyre::Result<()> {
        let outcome = self.outcome.borrow().clone();
        let focused = if self.is_open() {
            self.focused_control()
        } else {
            None
        };
        tui.draw(|frame| {
            let [document_area, status_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
                    .areas(frame.area());
            document_view::render(frame, document_area, &self.doc, focused, &self.theme);
            self.status_bar.render(frame, status_area, &self.theme, &outcome);
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn app(overrides: PartialConfig) -> App {
        let mut app = App::new(
            "Title",
            "Message",
            overrides,
            Locale::En,
            KeybindingsConfig::default(),
            Theme::default(),
        );
        app.resize(80, 26);
        app.open();
        app
    }

    fn key(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16, at: Instant) {
        app.handle_mouse(
            MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
            at,
        );
    }

    fn click(app: &mut App, column: u16, row: u16, at: Instant) {
        mouse(app, MouseEventKind::Down(MouseButton::Left), column, row, at);
        mouse(app, MouseEventKind::Up(MouseButton::Left), column, row, at);
    }

    #[test]
    fn test_opens_centered() {
        let app = app(PartialConfig::new().width("40px"));
        assert!(app.is_open());
        let panel = app.doc.query(app.page.root, ".modal").first().unwrap();
        assert_eq!(app.doc.style(panel, "left"), Some("20px"));
        assert_eq!(app.controls.len(), 2);
        assert_eq!(app.focused_control(), Some(app.controls[0]));
    }

    #[test]
    fn test_enter_confirms() {
        let mut app = app(PartialConfig::new().width("40px"));
        key(&mut app, KeyCode::Enter);
        assert_eq!(*app.outcome.borrow(), "Confirmed");
        assert!(!app.is_open());
    }

    #[test]
    fn test_tab_then_enter_cancels() {
        let mut app = app(PartialConfig::new().width("40px"));
        key(&mut app, KeyCode::Tab);
        key(&mut app, KeyCode::Enter);
        assert_eq!(*app.outcome.borrow(), "Cancelled");
        assert!(!app.is_open());
    }

    #[test]
    fn test_focus_wraps_backwards() {
        let mut app = app(PartialConfig::new());
        key(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_control(), Some(app.controls[1]));
    }

    #[test]
    fn test_reopen_after_dismissal() {
        let mut app = app(PartialConfig::new().width("40px"));
        click(&mut app, 1, 1, Instant::now());
        assert!(!app.is_open());
        assert_eq!(*app.outcome.borrow(), "Ready");

        key(&mut app, KeyCode::Char('o'));
        assert!(app.is_open());
        let root = app.page.root;
        assert_eq!(app.doc.listener_count(root, "click"), 1);
    }

    #[test]
    fn test_click_on_panel_keeps_dialog() {
        let mut app = app(PartialConfig::new().width("40px"));
        // Panel spans columns 20..60 and rows 9..14 of a 24 row document.
        click(&mut app, 30, 11, Instant::now());
        assert!(app.is_open());
    }

    #[test]
    fn test_mouse_click_on_confirm() {
        let mut app = app(PartialConfig::new().width("40px"));
        // Footer row sits above the bottom border; confirm starts at column 21.
        click(&mut app, 22, 12, Instant::now());
        assert_eq!(*app.outcome.borrow(), "Confirmed");
    }

    #[test]
    fn test_double_click_event() {
        let mut app = app(PartialConfig::new().width("40px").confirm_event_name("dblclick"));
        let start = Instant::now();
        click(&mut app, 22, 12, start);
        assert!(app.is_open());
        click(&mut app, 22, 12, start + Duration::from_millis(100));
        assert_eq!(*app.outcome.borrow(), "Confirmed");
    }

    #[test]
    fn test_slow_clicks_are_not_double() {
        let mut app = app(PartialConfig::new().width("40px").confirm_event_name("dblclick"));
        let start = Instant::now();
        click(&mut app, 22, 12, start);
        click(&mut app, 22, 12, start + Duration::from_secs(1));
        assert!(app.is_open());
    }

    #[test]
    fn test_ctrl_z_requests_suspend() {
        let mut app = app(PartialConfig::new());
        app.handle_key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL));
        assert!(app.should_suspend);
        assert!(!app.should_quit);
        assert!(app.is_open());
    }

    #[test]
    fn test_quit() {
        let mut app = app(PartialConfig::new());
        key(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
