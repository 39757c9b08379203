//! Scribe - Elm-style notepad core
//!
//! This crate provides the document model, the three view modes (rich text,
//! code and spreadsheet) and the message/update/command loop that drives
//! them. A shell feeds [`Msg`]s into [`update::update`] and executes the
//! returned [`Cmd`]s; [`view::render`] turns the model into a visual tree.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod grid;
pub mod image;
pub mod messages;
pub mod model;
pub mod syntax;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use error::EditorError;
pub use messages::Msg;
pub use model::AppModel;
pub use theme::Theme;
