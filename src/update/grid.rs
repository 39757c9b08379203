//! Spreadsheet grid message handlers

use crate::commands::Cmd;
use crate::messages::GridMsg;
use crate::model::AppModel;

use super::report_error;

pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::SetCell(pos, value) => match model.grid.set(pos, value) {
            Ok(()) => Some(Cmd::Redraw),
            Err(e) => report_error(model, e),
        },

        GridMsg::MoveTo { row, col } => {
            let pos = model.grid.move_to(row, col);
            model.ui.set_status(format!("Cell {}", pos));
            Some(Cmd::Redraw)
        }

        GridMsg::Move { d_row, d_col } => {
            let pos = model.grid.move_by(d_row, d_col);
            model.ui.set_status(format!("Cell {}", pos));
            Some(Cmd::Redraw)
        }

        GridMsg::AddRow => {
            let rows = model.grid.add_row();
            model.ui.set_status(format!("Added row {}", rows));
            Some(Cmd::Redraw)
        }

        GridMsg::AddColumn => {
            let cols = model.grid.add_column();
            model.ui.set_status(format!(
                "Added column {}",
                crate::grid::column_to_letters(cols - 1)
            ));
            Some(Cmd::Redraw)
        }

        GridMsg::CopyCell => {
            let value = model.grid.get(model.grid.active()).to_string();
            Some(Cmd::WriteClipboard(value))
        }

        GridMsg::PasteBlock(text) => {
            let at = model.grid.active();
            match model.grid.paste_block(at, &text) {
                Ok(_) => Some(Cmd::Redraw),
                Err(e) => report_error(model, e),
            }
        }

        GridMsg::ClearAll => {
            model.grid.clear_all();
            Some(Cmd::Redraw)
        }
    }
}
