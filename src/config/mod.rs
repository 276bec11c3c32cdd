mod defaults;
pub mod key;
pub mod keybindings;
pub mod loader;

pub use keybindings::{Action, KeybindingsConfig};
pub use loader::load;
use lazymodal::{Locale, PartialConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

/// Content of the demo dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub title: String,
    pub message: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            title: "Confirm".to_string(),
            message: "Apply the pending changes?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub content: ContentConfig,
    /// Dialog option overrides, same keys as `--options`.
    #[serde(default)]
    pub dialog: PartialConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.theme.name, "Catppuccin Mocha");
        assert_eq!(config.locale, Locale::En);
        assert!(config.dialog.width.is_none());
    }

    #[test]
    fn test_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            locale = "zh"

            [theme]
            name = "Catppuccin Latte"

            [content]
            title = "Delete"

            [dialog]
            width = "48px"
            cancelBtnText = "Back"
            shadow = true

            [keybindings]
            quit = ["q", "ctrl+q"]
            "#,
        )
        .unwrap();
        assert_eq!(config.locale, Locale::Zh);
        assert_eq!(config.theme.name, "Catppuccin Latte");
        assert_eq!(config.content.title, "Delete");
        assert_eq!(config.content.message, ContentConfig::default().message);
        assert_eq!(config.dialog.width.as_deref(), Some("48px"));
        assert_eq!(config.dialog.cancel_button_text.as_deref(), Some("Back"));
        assert_eq!(config.keybindings.quit.display(), "q/ctrl+q");
    }
}
