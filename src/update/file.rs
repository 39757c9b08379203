//! File message handlers (new, open, save, close and the unsaved-changes gate)

use std::path::Path;

use crate::commands::Cmd;
use crate::grid;
use crate::messages::{FileMsg, UnsavedChoice};
use crate::model::ui::UNSAVED_PROMPT;
use crate::model::{AppModel, PendingAction};
use crate::view::mode::ViewMode;

use super::report_error;

/// Handle file messages
pub fn update_file(model: &mut AppModel, msg: FileMsg) -> Option<Cmd> {
    match msg {
        FileMsg::New => gate(model, PendingAction::New),
        FileMsg::Open(path) => gate(model, PendingAction::Open(path)),
        FileMsg::Close => gate(model, PendingAction::Close),

        FileMsg::Save => match model.document.file_path.clone() {
            Some(path) => save(model, &path, false),
            None => request_save_as(model),
        },

        FileMsg::RequestSaveAs => request_save_as(model),

        FileMsg::SaveAs(path) => {
            let cmd = save(model, &path, true);
            if model.document.is_modified {
                return cmd;
            }
            // A save dialog opened from the unsaved-changes prompt resumes here
            match model.ui.pending.take() {
                Some(action) => {
                    let next = run_action(model, action);
                    Some(Cmd::batch(vec![Cmd::from(cmd), Cmd::from(next)]))
                }
                None => cmd,
            }
        }

        FileMsg::ResolveUnsaved(choice) => {
            let Some(action) = model.ui.pending.take() else {
                tracing::debug!("Unsaved-changes answer with nothing pending");
                return None;
            };
            match choice {
                UnsavedChoice::Cancel => None,
                UnsavedChoice::Discard => run_action(model, action),
                UnsavedChoice::Save => match model.document.file_path.clone() {
                    Some(path) => {
                        let cmd = save(model, &path, false);
                        if model.document.is_modified {
                            // Save failed: stay put and show the error
                            return cmd;
                        }
                        let next = run_action(model, action);
                        Some(Cmd::batch(vec![Cmd::from(cmd), Cmd::from(next)]))
                    }
                    None => {
                        model.ui.pending = Some(action);
                        request_save_as(model)
                    }
                },
            }
        }
    }
}

/// Run `action` now, or park it behind the unsaved-changes prompt
fn gate(model: &mut AppModel, action: PendingAction) -> Option<Cmd> {
    if !model.document.is_modified {
        return run_action(model, action);
    }
    model.ui.pending = Some(action.clone());
    Some(Cmd::ConfirmUnsaved {
        message: UNSAVED_PROMPT.to_string(),
        then: action,
    })
}

fn run_action(model: &mut AppModel, action: PendingAction) -> Option<Cmd> {
    match action {
        PendingAction::New => {
            model.document.reset();
            model.ui.set_status("New file created");
            Some(Cmd::Redraw)
        }
        PendingAction::Open(path) => match model.document.open(&path) {
            Ok(()) => {
                model
                    .view
                    .rehighlight(&mut model.document.session, &mut model.highlighter);
                model
                    .ui
                    .set_status(format!("Opened: {}", file_name(&path)));
                Some(Cmd::Redraw)
            }
            Err(e) => report_error(model, e),
        },
        PendingAction::Close => Some(Cmd::Quit),
    }
}

fn request_save_as(model: &mut AppModel) -> Option<Cmd> {
    Some(Cmd::ShowSaveDialog {
        suggested_path: model.document.file_path.clone(),
        default_extension: model.view.default_extension(),
    })
}

/// Save the text, or export the grid in spreadsheet mode
fn save(model: &mut AppModel, path: &Path, save_as: bool) -> Option<Cmd> {
    let verb = if save_as { "Saved as" } else { "Saved" };

    if model.mode() == ViewMode::Spreadsheet {
        return match grid::export(&model.grid, path) {
            Ok(outcome) => {
                let written = outcome.written_path().to_path_buf();
                model.ui.set_status(format!("{}: {}", verb, file_name(&written)));
                model.document.file_path = Some(written);
                model.document.is_modified = false;
                match outcome.warning() {
                    Some(warning) => Some(Cmd::batch(vec![Cmd::ShowWarning(warning), Cmd::Redraw])),
                    None => Some(Cmd::Redraw),
                }
            }
            Err(e) => report_error(model, e),
        };
    }

    match model.document.save_to(path) {
        Ok(()) => {
            model.ui.set_status(format!("{}: {}", verb, file_name(path)));
            Some(Cmd::Redraw)
        }
        Err(e) => report_error(model, e),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::EditMsg;
    use crate::update::update_edit;
    use std::path::PathBuf;

    fn dirty_model() -> AppModel {
        let mut model = AppModel::default();
        update_edit(&mut model, EditMsg::InsertChar('x'));
        assert!(model.document.is_modified);
        model
    }

    #[test]
    fn test_new_on_clean_document() {
        let mut model = AppModel::default();
        update_file(&mut model, FileMsg::New);
        assert_eq!(model.ui.status, "New file created");
    }

    #[test]
    fn test_new_on_dirty_document_asks_first() {
        let mut model = dirty_model();
        let cmd = update_file(&mut model, FileMsg::New).unwrap();
        assert!(matches!(
            cmd,
            Cmd::ConfirmUnsaved { then: PendingAction::New, .. }
        ));
        assert_eq!(model.session().buffer.text(), "x");

        update_file(&mut model, FileMsg::ResolveUnsaved(UnsavedChoice::Cancel));
        assert_eq!(model.session().buffer.text(), "x");
        assert!(model.ui.pending.is_none());
    }

    #[test]
    fn test_discard_runs_pending_action() {
        let mut model = dirty_model();
        update_file(&mut model, FileMsg::New);
        update_file(&mut model, FileMsg::ResolveUnsaved(UnsavedChoice::Discard));
        assert!(model.session().buffer.is_empty());
        assert!(!model.document.is_modified);
    }

    #[test]
    fn test_save_without_path_asks_for_one() {
        let mut model = dirty_model();
        let cmd = update_file(&mut model, FileMsg::Save).unwrap();
        assert!(matches!(
            cmd,
            Cmd::ShowSaveDialog { default_extension: ".txt", suggested_path: None }
        ));
    }

    #[test]
    fn test_save_choice_without_path_resumes_after_save_as() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut model = dirty_model();

        update_file(&mut model, FileMsg::Close);
        let cmd = update_file(&mut model, FileMsg::ResolveUnsaved(UnsavedChoice::Save)).unwrap();
        assert!(matches!(cmd, Cmd::ShowSaveDialog { .. }));

        let cmd = update_file(&mut model, FileMsg::SaveAs(path.clone())).unwrap();
        assert!(cmd.flatten().iter().any(|c| matches!(c, Cmd::Quit)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn test_open_missing_file_shows_error() {
        let mut model = AppModel::default();
        let cmd = update_file(&mut model, FileMsg::Open(PathBuf::from("/no/such/file.txt")));
        assert!(matches!(cmd, Some(Cmd::ShowError(ref m)) if m.contains("could not open file")));
        assert!(model.document.file_path.is_none());
    }
}
