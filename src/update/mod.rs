//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod file;
mod format;
mod grid;
mod mode;
mod text_edit;

use crate::commands::Cmd;
use crate::error::EditorError;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::SessionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use file::update_file;
pub use format::update_format;
pub use grid::update_grid;
pub use mode::update_mode;
pub use text_edit::update_edit;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Edit(m) => text_edit::update_edit(model, m),
        Msg::Format(m) => format::update_format(model, m),
        Msg::Mode(m) => mode::update_mode(model, m),
        Msg::File(m) => file::update_file(model, m),
        Msg::Grid(m) => grid::update_grid(model, m),
    }
}

/// Turn a failed model operation into what the user sees.
///
/// I/O failures become an error dialog; state errors (bad ranges, empty
/// selections) only reach the status bar.
pub(crate) fn report_error(model: &mut AppModel, err: EditorError) -> Option<Cmd> {
    if err.is_io() {
        tracing::warn!("{}", err);
        Some(Cmd::ShowError(err.to_string()))
    } else {
        tracing::debug!("{}", err);
        model.ui.set_status(err.to_string());
        Some(Cmd::Redraw)
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after session state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = SessionSnapshot::from_session(model.session());
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = SessionSnapshot::from_session(model.session());
    if let Some(diff) = before.diff(&after) {
        debug!(target: "session", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Edit::InsertChar('x')`
/// - `Mode::Switch(Code)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        // Pasted images would dump their whole pixel buffer
        Msg::Edit(crate::messages::EditMsg::Pasted(content)) => match content {
            crate::clipboard::ClipboardContent::Image(img) => {
                format!("Edit::Pasted(Image {}x{})", img.width, img.height)
            }
            other => format!("Edit::Pasted({:?})", other),
        },
        Msg::Edit(m) => format!("Edit::{:?}", m),
        Msg::Format(m) => format!("Format::{:?}", m),
        Msg::Mode(m) => format!("Mode::{:?}", m),
        Msg::File(m) => format!("File::{:?}", m),
        Msg::Grid(m) => format!("Grid::{:?}", m),
    }
}
