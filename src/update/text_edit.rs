//! Text editing, caret and clipboard message handlers

use crate::clipboard::ClipboardContent;
use crate::commands::Cmd;
use crate::messages::{EditMsg, GridMsg, Msg};
use crate::model::AppModel;
use crate::view::mode::ViewMode;

use super::report_error;

/// Handle edit messages
pub fn update_edit(model: &mut AppModel, msg: EditMsg) -> Option<Cmd> {
    if model.mode() == ViewMode::Spreadsheet {
        return update_edit_in_grid(model, msg);
    }

    match msg {
        EditMsg::InsertChar(ch) => {
            let result = model.session_mut().type_character(ch);
            content_changed(model, result.map(|_| true))
        }

        EditMsg::InsertNewline => {
            let result = model.session_mut().insert_newline();
            content_changed(model, result.map(|_| true))
        }

        EditMsg::DeleteBackward => {
            let result = model.session_mut().backspace();
            content_changed(model, result)
        }

        EditMsg::DeleteForward => {
            let result = model.session_mut().delete_forward();
            content_changed(model, result)
        }

        EditMsg::SetCaret(offset) => {
            model.session_mut().set_caret(offset);
            caret_moved(model)
        }

        EditMsg::SetCaretPosition { line, column } => {
            let offset = model
                .session()
                .buffer
                .position_to_offset(line, column);
            model.session_mut().set_caret(offset);
            caret_moved(model)
        }

        EditMsg::Select { anchor, head } => {
            model.session_mut().select(anchor, head);
            caret_moved(model)
        }

        EditMsg::SelectAll => {
            model.session_mut().select_all();
            model.ui.set_status("All text selected");
            Some(Cmd::Redraw)
        }

        EditMsg::Copy => match model.session().copy() {
            Some(text) => {
                model.ui.set_status("Text copied to clipboard");
                Some(Cmd::batch(vec![Cmd::WriteClipboard(text), Cmd::Redraw]))
            }
            None => {
                model.ui.set_status("No text selected");
                Some(Cmd::Redraw)
            }
        },

        EditMsg::Cut => match model.session_mut().cut() {
            Ok(Some(text)) => {
                model.after_content_change();
                model.ui.set_status("Text cut to clipboard");
                Some(Cmd::batch(vec![Cmd::WriteClipboard(text), Cmd::Redraw]))
            }
            Ok(None) => {
                model.ui.set_status("No text selected");
                Some(Cmd::Redraw)
            }
            Err(e) => report_error(model, e),
        },

        EditMsg::Paste => Some(Cmd::ReadClipboard),

        EditMsg::Pasted(content) => paste(model, content),

        EditMsg::RemoveTransientTag(id) => {
            model.session_mut().remove_transient_highlight(id);
            Some(Cmd::Redraw)
        }
    }
}

/// Spreadsheet mode hides the text view: only clipboard traffic and the
/// image-highlight timer still mean something.
fn update_edit_in_grid(model: &mut AppModel, msg: EditMsg) -> Option<Cmd> {
    match msg {
        EditMsg::Paste => Some(Cmd::ReadClipboard),
        EditMsg::Copy => super::update_grid(model, GridMsg::CopyCell),
        EditMsg::Pasted(ClipboardContent::Text(text)) => {
            super::update_grid(model, GridMsg::PasteBlock(text))
        }
        EditMsg::RemoveTransientTag(id) => {
            model.session_mut().remove_transient_highlight(id);
            None
        }
        other => {
            tracing::debug!("Ignoring {:?} in spreadsheet mode", other);
            None
        }
    }
}

fn paste(model: &mut AppModel, content: ClipboardContent) -> Option<Cmd> {
    match content {
        ClipboardContent::Image(image) => {
            // The transient highlight only makes sense over rich text
            let highlight = model.mode() == ViewMode::Normal;
            match model.session_mut().paste_image(image, highlight) {
                Ok(pasted) => {
                    model.after_content_change();
                    model.ui.set_status("Image pasted from clipboard");
                    let timer = if pasted.highlighted {
                        Cmd::after(
                            model.image_highlight_delay(),
                            Msg::Edit(EditMsg::RemoveTransientTag(pasted.id)),
                        )
                    } else {
                        Cmd::None
                    };
                    Some(Cmd::batch(vec![Cmd::Redraw, timer]))
                }
                Err(e) => {
                    model.ui.set_status(format!("Error pasting image: {}", e));
                    Some(Cmd::Redraw)
                }
            }
        }
        ClipboardContent::Text(text) if !text.is_empty() => {
            match model.session_mut().paste_text(&text) {
                Ok(()) => {
                    model.after_content_change();
                    model.ui.set_status("Text pasted from clipboard");
                    Some(Cmd::Redraw)
                }
                Err(e) => report_error(model, e),
            }
        }
        ClipboardContent::Text(_) | ClipboardContent::Empty => {
            model.ui.set_status("Nothing to paste");
            Some(Cmd::Redraw)
        }
    }
}

/// Shared tail of every content edit: mark modified, re-highlight in code
/// mode and show the caret position.
fn content_changed(
    model: &mut AppModel,
    result: Result<bool, crate::error::EditorError>,
) -> Option<Cmd> {
    match result {
        Ok(true) => {
            model.after_content_change();
            caret_moved(model)
        }
        // Backspace at the start, Delete at the end
        Ok(false) => None,
        Err(e) => report_error(model, e),
    }
}

fn caret_moved(model: &mut AppModel) -> Option<Cmd> {
    let status = model.session().cursor_status();
    model.ui.set_status(status);
    Some(Cmd::Redraw)
}
