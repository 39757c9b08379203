//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The shell executes them; anything that produces a result comes back in as
//! a message.

use std::path::PathBuf;
use std::time::Duration;

use crate::messages::Msg;
use crate::model::PendingAction;

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a full redraw of the UI
    Redraw,
    /// Deliver `msg` after `delay` (fire-and-forget timer)
    After { delay: Duration, msg: Box<Msg> },
    /// Ask Save / Don't Save / Cancel before running `then`.
    /// Answer with `FileMsg::ResolveUnsaved`.
    ConfirmUnsaved { message: String, then: PendingAction },
    /// Show a save dialog; answer with `FileMsg::SaveAs`
    ShowSaveDialog {
        /// Suggested file path (for pre-filling name/directory)
        suggested_path: Option<PathBuf>,
        /// Extension the dialog appends when none is typed
        default_extension: &'static str,
    },
    /// Modal error dialog
    ShowError(String),
    /// Modal warning dialog
    ShowWarning(String),
    /// Put text on the system clipboard
    WriteClipboard(String),
    /// Read the clipboard; answer with `EditMsg::Pasted` (or `GridMsg::PasteBlock`)
    ReadClipboard,
    /// Persist `model.config` to the user's config file
    SaveConfig,
    /// Request application exit
    Quit,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, dropping no-ops
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Cmd::None))
            .collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Schedule `msg` after `delay`
    pub fn after(delay: Duration, msg: Msg) -> Self {
        Cmd::After {
            delay,
            msg: Box::new(msg),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Timers and dialogs answer with messages that redraw themselves
            Cmd::After { .. }
            | Cmd::ConfirmUnsaved { .. }
            | Cmd::ShowSaveDialog { .. }
            | Cmd::ShowError(_)
            | Cmd::ShowWarning(_)
            | Cmd::WriteClipboard(_)
            | Cmd::ReadClipboard
            | Cmd::SaveConfig => false,
            // Quit doesn't need redraw - app is exiting
            Cmd::Quit => false,
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}
