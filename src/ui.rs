//! Drawing for the terminal host.

pub mod document_view;
mod status_bar;

pub use status_bar::{STATUS_BAR_HEIGHT, StatusBar};
