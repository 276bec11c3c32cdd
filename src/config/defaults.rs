use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::KeybindingsConfig;

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            quit: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('q')),
                Key::with_ctrl(KeyCode::Char('q')),
            ]),
            focus_next: KeyBinding::multiple(vec![
                Key::new(KeyCode::Tab),
                Key::new(KeyCode::Right),
                Key::new(KeyCode::Char('l')),
            ]),
            focus_prev: KeyBinding::multiple(vec![
                Key::new(KeyCode::BackTab),
                Key::new(KeyCode::Left),
                Key::new(KeyCode::Char('h')),
            ]),
            press: KeyBinding::multiple(vec![
                Key::new(KeyCode::Enter),
                Key::new(KeyCode::Char(' ')),
            ]),
            reopen: Key::new(KeyCode::Char('o')).into(),
            suspend: Key::with_ctrl(KeyCode::Char('z')).into(),
        }
    }
}
