//! View mode, language and theme message handlers

use crate::commands::Cmd;
use crate::messages::ModeMsg;
use crate::model::AppModel;
use crate::theme::load_theme;

pub fn update_mode(model: &mut AppModel, msg: ModeMsg) -> Option<Cmd> {
    match msg {
        ModeMsg::Switch(mode) => {
            if model.switch_mode(mode) {
                Some(Cmd::Redraw)
            } else {
                None
            }
        }

        ModeMsg::SetLanguage(language) => {
            let status = model.view.set_language(
                language,
                &mut model.document.session,
                &mut model.highlighter,
            );
            model.ui.set_status(status);
            Some(Cmd::Redraw)
        }

        ModeMsg::SetTheme(id) => match load_theme(&id) {
            Ok(theme) => {
                model.theme = theme;
                model.config.theme = id;
                model
                    .view
                    .rehighlight(&mut model.document.session, &mut model.highlighter);
                let status = format!("Theme changed to {}", model.theme.title());
                model.ui.set_status(status);
                Some(Cmd::batch(vec![Cmd::SaveConfig, Cmd::Redraw]))
            }
            Err(e) => {
                tracing::warn!("Failed to load theme '{}': {}", id, e);
                model.ui.set_status(format!("Could not load theme '{}'", id));
                Some(Cmd::Redraw)
            }
        },

        ModeMsg::ToggleAlwaysOnTop => {
            let status = model.view.toggle_always_on_top();
            model.ui.set_status(status);
            Some(Cmd::Redraw)
        }
    }
}
