//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use scribe::commands::Cmd;
use scribe::config::EditorConfig;
use scribe::messages::{EditMsg, FormatMsg, ModeMsg, Msg};
use scribe::model::{AppModel, Tag};
use scribe::theme::Theme;
use scribe::update::update;
use scribe::view::mode::ViewMode;

/// Create a test model holding `text`, caret at offset 0
pub fn test_model(text: &str) -> AppModel {
    test_model_with_config(text, EditorConfig::default())
}

/// Create a test model from a custom config (built-in dark theme, no disk access)
pub fn test_model_with_config(text: &str, config: EditorConfig) -> AppModel {
    let mut model = AppModel::with_theme(config, Theme::default());
    model.session_mut().load_text(text);
    model
}

/// Run one message and return the leaf commands it produced
pub fn send(model: &mut AppModel, msg: Msg) -> Vec<Cmd> {
    update(model, msg).map(Cmd::flatten).unwrap_or_default()
}

/// Type `text` one character at a time, newlines via the Return key
pub fn type_text(model: &mut AppModel, text: &str) {
    for ch in text.chars() {
        let msg = if ch == '\n' {
            EditMsg::InsertNewline
        } else {
            EditMsg::InsertChar(ch)
        };
        send(model, Msg::Edit(msg));
    }
}

pub fn select(model: &mut AppModel, anchor: usize, head: usize) {
    send(model, Msg::Edit(EditMsg::Select { anchor, head }));
}

pub fn format(model: &mut AppModel, msg: FormatMsg) {
    send(model, Msg::Format(msg));
}

pub fn switch_mode(model: &mut AppModel, mode: ViewMode) -> Vec<Cmd> {
    send(model, Msg::Mode(ModeMsg::Switch(mode)))
}

/// Spans covered by the tag with this name (`bold`, `size_14`, `keyword`, ...)
pub fn ranges_named(model: &AppModel, name: &str) -> Vec<(usize, usize)> {
    let tag: Tag = name.parse().expect("valid tag name");
    model.session().buffer.ranges_of(&tag)
}

/// Tag names covering `offset`, sorted
pub fn tag_names_at(model: &AppModel, offset: usize) -> Vec<String> {
    let mut names: Vec<String> = model
        .session()
        .buffer
        .tag_names_at(offset)
        .iter()
        .map(|t| t.to_string())
        .collect();
    names.sort();
    names
}

/// Snapshot of every (tag name, start, end), sorted, for comparisons
pub fn tag_snapshot(model: &AppModel) -> Vec<(String, usize, usize)> {
    let mut all: Vec<(String, usize, usize)> = model
        .session()
        .buffer
        .tags()
        .iter()
        .map(|r| (r.tag.to_string(), r.start, r.end))
        .collect();
    all.sort();
    all
}

pub fn has_cmd(cmds: &[Cmd], pred: impl Fn(&Cmd) -> bool) -> bool {
    cmds.iter().any(pred)
}
