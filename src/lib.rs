//! Modal dialogs over an in-memory element tree.
//!
//! [`dom`] provides the element tree with styles, bubbling events and a
//! cell-based layout. [`dialog`] is the controller that reveals a hidden
//! root, centers its panel and wires the confirm and cancel controls.

pub mod dialog;
pub mod dom;

pub use dialog::{
    Callback, Dialog, DialogConfig, Locale, PartialConfig, RootRef, create_dialog,
    create_dialog_localized, resolve, resolve_localized,
};
pub use dom::{Document, Event, NodeId, Selection};
