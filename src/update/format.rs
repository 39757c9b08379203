//! Formatting toolbar message handlers

use crate::commands::Cmd;
use crate::messages::FormatMsg;
use crate::model::AppModel;
use crate::view::mode::ViewMode;

/// Handle formatting messages. The toolbar only exists in normal mode.
pub fn update_format(model: &mut AppModel, msg: FormatMsg) -> Option<Cmd> {
    if model.mode() != ViewMode::Normal {
        tracing::debug!("Ignoring {:?} outside normal mode", msg);
        return None;
    }

    let session = model.session_mut();
    let touches_text = session.has_selection();
    match msg {
        FormatMsg::ToggleBold => session.toggle_bold(),
        FormatMsg::ToggleItalic => session.toggle_italic(),
        FormatMsg::ToggleUnderline => session.toggle_underline(),
        FormatMsg::SetFontSize(size) => session.change_font_size(size),
        FormatMsg::SetTextColor(color) => session.change_text_color(color),
        FormatMsg::SetHighlightColor(color) => session.change_highlight_color(color),
    }

    if touches_text {
        model.document.mark_modified();
    }
    Some(Cmd::Redraw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rgb, Tag};

    #[test]
    fn test_bold_over_selection() {
        let mut model = AppModel::default();
        model.document.session.load_text("hello");
        model.session_mut().select(0, 5);
        update_format(&mut model, FormatMsg::ToggleBold);

        assert_eq!(model.session().buffer.ranges_of(&Tag::Bold), vec![(0, 5)]);
        assert!(model.session().formatting.bold);
        assert_eq!(model.session().selection_range(), Some((0, 5)));
        assert!(model.document.is_modified);
    }

    #[test]
    fn test_pending_only_without_selection() {
        let mut model = AppModel::default();
        update_format(&mut model, FormatMsg::SetTextColor(Rgb::new(255, 0, 0)));
        assert_eq!(model.session().formatting.color, Some(Rgb::new(255, 0, 0)));
        assert!(!model.document.is_modified);
    }

    #[test]
    fn test_ignored_in_code_mode() {
        let mut model = AppModel::default();
        model.switch_mode(ViewMode::Code);
        assert!(update_format(&mut model, FormatMsg::ToggleBold).is_none());
        assert!(!model.session().formatting.bold);
    }
}
