//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::clipboard::ClipboardContent;
use crate::grid::CellPosition;
use crate::model::formatting::Rgb;
use crate::syntax::LanguageId;
use crate::view::mode::ViewMode;

/// Text editing, caret movement and clipboard results
#[derive(Debug, Clone)]
pub enum EditMsg {
    // === Typing ===
    /// Printable character (replaces the selection if any)
    InsertChar(char),
    /// Return key
    InsertNewline,
    /// Backspace key
    DeleteBackward,
    /// Delete key
    DeleteForward,

    // === Caret & selection ===
    /// Move the caret to a character offset (mouse click)
    SetCaret(usize),
    /// Move the caret to a 0-indexed line/column
    SetCaretPosition { line: usize, column: usize },
    /// Select from anchor to head (drag)
    Select { anchor: usize, head: usize },
    /// Select all text (Ctrl+A)
    SelectAll,

    // === Clipboard ===
    Copy,
    Cut,
    /// Ask the shell to read the clipboard
    Paste,
    /// Clipboard contents read by the shell in answer to [`EditMsg::Paste`]
    Pasted(ClipboardContent),

    /// Deferred removal of a pasted image's highlight
    RemoveTransientTag(u64),
}

/// Inline formatting (normal mode toolbar)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMsg {
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    SetFontSize(u16),
    SetTextColor(Rgb),
    SetHighlightColor(Rgb),
}

/// View mode, language and appearance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeMsg {
    Switch(ViewMode),
    SetLanguage(LanguageId),
    /// Theme id: "dark", "light", "system" or a user theme
    SetTheme(String),
    ToggleAlwaysOnTop,
}

/// Answer to the unsaved-changes prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChoice {
    /// Save first, then continue
    Save,
    /// Drop the changes and continue
    Discard,
    /// Abort the pending action
    Cancel,
}

/// File operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileMsg {
    New,
    /// Open a path chosen by the shell
    Open(PathBuf),
    /// Save to the current path, or ask for one
    Save,
    /// Ask the shell for a Save As path
    RequestSaveAs,
    /// Save to a path chosen by the shell (exports the grid in spreadsheet mode)
    SaveAs(PathBuf),
    /// Window close
    Close,
    ResolveUnsaved(UnsavedChoice),
}

/// Spreadsheet grid editing and navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridMsg {
    /// Commit a cell value
    SetCell(CellPosition, String),
    /// Focus a cell (clamped to the grid)
    MoveTo { row: usize, col: usize },
    /// Arrow-key navigation
    Move { d_row: isize, d_col: isize },
    AddRow,
    AddColumn,
    /// Copy the active cell's value
    CopyCell,
    /// Paste a block of text at the active cell
    PasteBlock(String),
    ClearAll,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Edit(EditMsg),
    Format(FormatMsg),
    Mode(ModeMsg),
    File(FileMsg),
    Grid(GridMsg),
}
