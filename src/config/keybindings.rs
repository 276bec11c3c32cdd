use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

use crate::config::key::KeyBinding;

/// Something the user can ask the host to do from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Move focus to the next dialog control.
    FocusNext,
    /// Move focus to the previous dialog control.
    FocusPrev,
    /// Click the focused control.
    Press,
    /// Bring the dialog back after it was dismissed.
    Reopen,
    /// Hand the terminal back to the shell until resumed.
    Suspend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub quit: KeyBinding,
    pub focus_next: KeyBinding,
    pub focus_prev: KeyBinding,
    pub press: KeyBinding,
    pub reopen: KeyBinding,
    pub suspend: KeyBinding,
}

impl KeybindingsConfig {
    /// The action bound to `event`, checked in declaration order.
    pub fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        [
            (&self.quit, Action::Quit),
            (&self.focus_next, Action::FocusNext),
            (&self.focus_prev, Action::FocusPrev),
            (&self.press, Action::Press),
            (&self.reopen, Action::Reopen),
            (&self.suspend, Action::Suspend),
        ]
        .into_iter()
        .find(|(binding, _)| binding.matches(event))
        .map(|(_, action)| action)
    }

    pub fn display(&self, action: Action) -> String {
        match action {
            Action::Quit => self.quit.display(),
            Action::FocusNext => self.focus_next.display(),
            Action::FocusPrev => self.focus_prev.display(),
            Action::Press => self.press.display(),
            Action::Reopen => self.reopen.display(),
            Action::Suspend => self.suspend.display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn test_default_actions() {
        let keys = KeybindingsConfig::default();
        let press = |code| keys.action_for(&KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(press(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(press(KeyCode::Tab), Some(Action::FocusNext));
        assert_eq!(press(KeyCode::Enter), Some(Action::Press));
        assert_eq!(press(KeyCode::Char('o')), Some(Action::Reopen));
        assert_eq!(press(KeyCode::Char('x')), None);
        let ctrl_z = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(keys.action_for(&ctrl_z), Some(Action::Suspend));
        assert_eq!(keys.display(Action::Suspend), "ctrl+z");
    }

    #[test]
    fn test_partial_override() {
        let keys: KeybindingsConfig = toml::from_str("reopen = \"r\"").unwrap();
        assert_eq!(keys.display(Action::Reopen), "r");
        assert_eq!(keys.display(Action::Quit), "q/ctrl+q");
    }
}
