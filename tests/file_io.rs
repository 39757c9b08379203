//! File round-trips through the message loop: open, save, save-as, the
//! unsaved-changes prompt and spreadsheet export

mod common;

use common::*;
use scribe::commands::Cmd;
use scribe::grid::CellPosition;
use scribe::messages::{FileMsg, GridMsg, Msg, UnsavedChoice};
use scribe::model::PendingAction;
use scribe::view::mode::ViewMode;

#[test]
fn test_open_edit_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "first line\nsecond").unwrap();

    let mut model = test_model("");
    send(&mut model, Msg::File(FileMsg::Open(path.clone())));
    assert_eq!(model.session().buffer.text(), "first line\nsecond");
    assert_eq!(model.ui.status, "Opened: notes.txt");
    assert_eq!(model.title(), "notes.txt - Modern Notepad");

    model.session_mut().set_caret(5);
    type_text(&mut model, "!");
    assert_eq!(model.title(), "*notes.txt - Modern Notepad");

    send(&mut model, Msg::File(FileMsg::Save));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "first! line\nsecond"
    );
    assert_eq!(model.ui.status, "Saved: notes.txt");
    assert!(!model.document.is_modified);
}

#[test]
fn test_save_as_adopts_new_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("draft.txt");

    let mut model = test_model("");
    type_text(&mut model, "draft");
    send(&mut model, Msg::File(FileMsg::SaveAs(path.clone())));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "draft");
    assert_eq!(model.document.file_path.as_deref(), Some(path.as_path()));
    assert_eq!(model.ui.status, "Saved as: draft.txt");
}

#[test]
fn test_save_failure_keeps_state_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("x.txt");

    let mut model = test_model("");
    type_text(&mut model, "keep me");
    let cmds = send(&mut model, Msg::File(FileMsg::SaveAs(path)));

    assert!(has_cmd(&cmds, |c| matches!(c, Cmd::ShowError(m) if m.contains("could not save file"))));
    assert!(model.document.is_modified);
    assert!(model.document.file_path.is_none());
    assert_eq!(model.session().buffer.text(), "keep me");
}

#[test]
fn test_save_dialog_extension_follows_mode() {
    let mut model = test_model("");
    let ext = |cmds: Vec<Cmd>| match cmds.into_iter().next() {
        Some(Cmd::ShowSaveDialog {
            default_extension, ..
        }) => default_extension,
        other => panic!("expected save dialog, got {:?}", other),
    };

    assert_eq!(ext(send(&mut model, Msg::File(FileMsg::Save))), ".txt");

    switch_mode(&mut model, ViewMode::Code);
    assert_eq!(ext(send(&mut model, Msg::File(FileMsg::RequestSaveAs))), ".py");

    switch_mode(&mut model, ViewMode::Spreadsheet);
    assert_eq!(ext(send(&mut model, Msg::File(FileMsg::Save))), ".xlsx");
}

#[test]
fn test_open_over_unsaved_changes_with_save_choice() {
    let dir = tempfile::tempdir().unwrap();
    let current = dir.path().join("current.txt");
    let other = dir.path().join("other.txt");
    std::fs::write(&other, "other content").unwrap();

    let mut model = test_model("");
    send(&mut model, Msg::File(FileMsg::SaveAs(current.clone())));
    type_text(&mut model, "unsaved");

    let cmds = send(&mut model, Msg::File(FileMsg::Open(other.clone())));
    assert!(has_cmd(&cmds, |c| matches!(
        c,
        Cmd::ConfirmUnsaved { then: PendingAction::Open(p), .. } if *p == other
    )));
    assert_eq!(model.session().buffer.text(), "unsaved");

    send(
        &mut model,
        Msg::File(FileMsg::ResolveUnsaved(UnsavedChoice::Save)),
    );
    assert_eq!(std::fs::read_to_string(&current).unwrap(), "unsaved");
    assert_eq!(model.session().buffer.text(), "other content");
    assert_eq!(model.ui.status, "Opened: other.txt");
}

#[test]
fn test_close_on_clean_document_quits() {
    let mut model = test_model("");
    let cmds = send(&mut model, Msg::File(FileMsg::Close));
    assert!(has_cmd(&cmds, |c| matches!(c, Cmd::Quit)));
}

#[test]
fn test_cancel_keeps_everything() {
    let mut model = test_model("");
    type_text(&mut model, "work");
    send(&mut model, Msg::File(FileMsg::Close));
    let cmds = send(
        &mut model,
        Msg::File(FileMsg::ResolveUnsaved(UnsavedChoice::Cancel)),
    );
    assert!(!has_cmd(&cmds, |c| matches!(c, Cmd::Quit)));
    assert!(model.document.is_modified);
}

#[test]
fn test_image_slots_are_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("with-image.txt");

    let mut model = test_model("");
    type_text(&mut model, "caption");
    let image =
        scribe::image::EmbeddedImage::from_rgba(2, 2, vec![255; 16], (400, 300)).unwrap();
    model.session_mut().paste_image(image, false).unwrap();
    type_text(&mut model, "after");

    send(&mut model, Msg::File(FileMsg::SaveAs(path.clone())));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "caption\n\nafter"
    );
}

// ============================================================================
// Spreadsheet export
// ============================================================================

fn filled_grid_model() -> scribe::AppModel {
    let mut model = test_model("");
    switch_mode(&mut model, ViewMode::Spreadsheet);
    for (row, col, value) in [(0, 0, "name"), (0, 1, "qty"), (2, 0, "apples"), (2, 1, "3")] {
        send(
            &mut model,
            Msg::Grid(GridMsg::SetCell(CellPosition::new(row, col), value.into())),
        );
    }
    model
}

#[test]
fn test_spreadsheet_save_as_csv_skips_empty_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.csv");

    let mut model = filled_grid_model();
    send(&mut model, Msg::File(FileMsg::SaveAs(path.clone())));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .unwrap();
    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 26);
    assert_eq!(&rows[0][..2], ["name", "qty"]);
    assert_eq!(&rows[1][..2], ["apples", "3"]);
    assert_eq!(model.ui.status, "Saved as: sheet.csv");
}

#[test]
fn test_spreadsheet_unknown_extension_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = filled_grid_model();
    send(
        &mut model,
        Msg::File(FileMsg::SaveAs(dir.path().join("sheet.dat"))),
    );
    assert!(dir.path().join("sheet.csv").exists());
    assert_eq!(
        model.document.file_path.as_deref(),
        Some(dir.path().join("sheet.csv").as_path())
    );
}

#[cfg(not(feature = "xlsx"))]
#[test]
fn test_xlsx_without_feature_falls_back_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = filled_grid_model();
    let cmds = send(
        &mut model,
        Msg::File(FileMsg::SaveAs(dir.path().join("sheet.xlsx"))),
    );

    assert!(has_cmd(&cmds, |c| matches!(c, Cmd::ShowWarning(_))));
    assert!(dir.path().join("sheet.csv").exists());
    assert!(!dir.path().join("sheet.xlsx").exists());
}

#[cfg(feature = "xlsx")]
#[test]
fn test_xlsx_export_writes_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.xlsx");
    let mut model = filled_grid_model();
    let cmds = send(&mut model, Msg::File(FileMsg::SaveAs(path.clone())));

    assert!(!has_cmd(&cmds, |c| matches!(c, Cmd::ShowWarning(_))));
    let bytes = std::fs::read(&path).unwrap();
    // xlsx is a zip container
    assert_eq!(&bytes[..2], b"PK");
}
