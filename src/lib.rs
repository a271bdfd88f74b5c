//! Inline AI text suggestions
//!
//! The suggestion core (`suggestion`, `completion`, `document`) is editor
//! agnostic. `editor`, `app` and `render` host it in a terminal text editor.

pub mod app;
pub mod completion;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod render;
pub mod suggestion;
