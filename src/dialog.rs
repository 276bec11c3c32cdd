//! Modal dialog controller.
//!
//! A dialog is bound to a root element that already exists in the
//! [`Document`], hidden. The markup it expects is:
//!
//! ```text
//! root                  (backdrop, toggled between hidden and shown)
//! └── .modal            (panel, centered on activation)
//!     └── .modal-footer
//!         ├── button.confirm
//!         └── button.cancel
//! ```
//!
//! Missing parts are tolerated: the steps that need them do nothing.

mod controller;
mod options;

use tracing::warn;

pub use controller::{
    CANCEL_SELECTOR, CONFIRM_SELECTOR, Dialog, FOOTER_SELECTOR, PANEL_SELECTOR, centered_offset,
};
pub use options::{
    Callback, DEFAULT_EVENT, DEFAULT_WIDTH, DialogConfig, Locale, PartialConfig, resolve,
    resolve_localized,
};

use crate::dom::{Document, NodeId};

/// How the caller names the dialog root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootRef {
    Node(NodeId),
    /// Selector evaluated against the whole document; the first match wins.
    Selector(String),
}

impl From<NodeId> for RootRef {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for RootRef {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for RootRef {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl RootRef {
    fn locate(&self, doc: &Document) -> Option<NodeId> {
        match self {
            Self::Node(node) => doc.node(*node).map(|_| *node),
            Self::Selector(selector) => doc.query_document(selector).first(),
        }
    }
}

/// Bind a dialog to `root`, resolve `overrides` and activate it.
///
/// Returns `None` when the root cannot be found; nothing is changed in that
/// case.
pub fn create_dialog(
    doc: &mut Document,
    root: impl Into<RootRef>,
    overrides: PartialConfig,
) -> Option<Dialog> {
    create_dialog_localized(doc, root, overrides, Locale::En)
}

/// Like [`create_dialog`], with button labels defaulting to `locale`.
pub fn create_dialog_localized(
    doc: &mut Document,
    root: impl Into<RootRef>,
    overrides: PartialConfig,
    locale: Locale,
) -> Option<Dialog> {
    let root = root.into();
    let Some(node) = root.locate(doc) else {
        warn!(?root, "Dialog root not found");
        return None;
    };
    let dialog = Dialog::with_config(node, resolve_localized(overrides, locale));
    dialog.activate(doc);
    Some(dialog)
}
