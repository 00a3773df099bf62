//! UI layer for the desktop GUI: the product page app shell.

pub mod app;

pub use app::{ProductEditorApp, APP_TITLE};
