//! Dialog options and their resolution against built-in defaults.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Dialog;
use crate::dom::{Document, Event};

/// Caller code run when a dialog control fires. The dialog that bound it is
/// passed as the first argument.
pub type Callback = Rc<dyn Fn(&Dialog, &mut Document, &mut Event)>;

pub const DEFAULT_WIDTH: &str = "500px";
pub const DEFAULT_EVENT: &str = "click";

/// Language of the default button labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    const fn button_texts(self) -> (&'static str, &'static str) {
        match self {
            Self::En => ("OK", "Cancel"),
            Self::Zh => ("确定", "取消"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "zh" | "zh-cn" | "chinese" => Ok(Self::Zh),
            other => Err(format!("Unknown locale: {other}")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::En => "en",
            Self::Zh => "zh",
        })
    }
}

/// Fully resolved options of one dialog instance.
#[derive(Clone)]
pub struct DialogConfig {
    /// CSS length of the panel, e.g. `"500px"`.
    pub width: String,
    pub confirm_button_text: String,
    pub cancel_button_text: String,
    /// Event the confirm control responds to.
    pub confirm_event_name: String,
    /// Event the cancel control responds to.
    pub cancel_event_name: String,
    pub on_confirm: Callback,
    pub on_cancel: Callback,
}

impl DialogConfig {
    /// A fresh set of defaults. Nothing is shared with other instances; the
    /// default cancel hides whichever dialog invokes it.
    pub fn defaults(locale: Locale) -> Self {
        let (confirm, cancel) = locale.button_texts();
        Self {
            width: DEFAULT_WIDTH.to_string(),
            confirm_button_text: confirm.to_string(),
            cancel_button_text: cancel.to_string(),
            confirm_event_name: DEFAULT_EVENT.to_string(),
            cancel_event_name: DEFAULT_EVENT.to_string(),
            on_confirm: Rc::new(|_: &Dialog, _: &mut Document, _: &mut Event| {}),
            on_cancel: Rc::new(|dialog: &Dialog, doc: &mut Document, _: &mut Event| {
                dialog.hide(doc);
            }),
        }
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self::defaults(Locale::default())
    }
}

impl fmt::Debug for DialogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogConfig")
            .field("width", &self.width)
            .field("confirm_button_text", &self.confirm_button_text)
            .field("cancel_button_text", &self.cancel_button_text)
            .field("confirm_event_name", &self.confirm_event_name)
            .field("cancel_event_name", &self.cancel_event_name)
            .finish_non_exhaustive()
    }
}

/// Caller overrides. Absent fields fall back to the defaults.
///
/// Deserializes from TOML or JSON using either snake_case or camelCase keys;
/// unknown keys are ignored. Callbacks can only be set from code.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(
        alias = "confirmButtonText",
        alias = "confirmBtnText",
        skip_serializing_if = "Option::is_none"
    )]
    pub confirm_button_text: Option<String>,
    #[serde(
        alias = "cancelButtonText",
        alias = "cancelBtnText",
        skip_serializing_if = "Option::is_none"
    )]
    pub cancel_button_text: Option<String>,
    #[serde(
        alias = "confirmEventName",
        alias = "confirmEvent",
        skip_serializing_if = "Option::is_none"
    )]
    pub confirm_event_name: Option<String>,
    #[serde(
        alias = "cancelEventName",
        alias = "cancelEvent",
        skip_serializing_if = "Option::is_none"
    )]
    pub cancel_event_name: Option<String>,
    #[serde(skip)]
    pub on_confirm: Option<Callback>,
    #[serde(skip)]
    pub on_cancel: Option<Callback>,
}

impl PartialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    #[must_use]
    pub fn confirm_button_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_button_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn cancel_button_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_button_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn confirm_event_name(mut self, name: impl Into<String>) -> Self {
        self.confirm_event_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn cancel_event_name(mut self, name: impl Into<String>) -> Self {
        self.cancel_event_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn on_confirm(
        mut self,
        callback: impl Fn(&Dialog, &mut Document, &mut Event) + 'static,
    ) -> Self {
        self.on_confirm = Some(Rc::new(callback));
        self
    }

    #[must_use]
    pub fn on_cancel(
        mut self,
        callback: impl Fn(&Dialog, &mut Document, &mut Event) + 'static,
    ) -> Self {
        self.on_cancel = Some(Rc::new(callback));
        self
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            width: other.width.or(self.width),
            confirm_button_text: other.confirm_button_text.or(self.confirm_button_text),
            cancel_button_text: other.cancel_button_text.or(self.cancel_button_text),
            confirm_event_name: other.confirm_event_name.or(self.confirm_event_name),
            cancel_event_name: other.cancel_event_name.or(self.cancel_event_name),
            on_confirm: other.on_confirm.or(self.on_confirm),
            on_cancel: other.on_cancel.or(self.on_cancel),
        }
    }
}

impl fmt::Debug for PartialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialConfig")
            .field("width", &self.width)
            .field("confirm_button_text", &self.confirm_button_text)
            .field("cancel_button_text", &self.cancel_button_text)
            .field("confirm_event_name", &self.confirm_event_name)
            .field("cancel_event_name", &self.cancel_event_name)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// Resolve overrides against the English defaults.
pub fn resolve(overrides: PartialConfig) -> DialogConfig {
    resolve_localized(overrides, Locale::En)
}

/// Resolve overrides against the defaults of `locale`.
pub fn resolve_localized(overrides: PartialConfig, locale: Locale) -> DialogConfig {
    let defaults = DialogConfig::defaults(locale);
    DialogConfig {
        width: overrides.width.unwrap_or(defaults.width),
        confirm_button_text: overrides
            .confirm_button_text
            .unwrap_or(defaults.confirm_button_text),
        cancel_button_text: overrides
            .cancel_button_text
            .unwrap_or(defaults.cancel_button_text),
        confirm_event_name: overrides
            .confirm_event_name
            .unwrap_or(defaults.confirm_event_name),
        cancel_event_name: overrides
            .cancel_event_name
            .unwrap_or(defaults.cancel_event_name),
        on_confirm: overrides.on_confirm.unwrap_or(defaults.on_confirm),
        on_cancel: overrides.on_cancel.unwrap_or(defaults.on_cancel),
    }
}
