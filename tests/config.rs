//! Configuration system tests
//!
//! Tests for config paths and editor config persistence.

mod common;

use common::*;
use scribe::config::EditorConfig;
use scribe::config_paths;
use scribe::messages::{FileMsg, Msg};
use scribe::model::FormattingPolicy;
use scribe::syntax::{HighlightRules, LanguageId};
use scribe::view::mode::ViewMode;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_named_after_app() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.ends_with("scribe"), "got {}", dir.display());
    }
}

#[test]
fn test_config_file_is_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert_eq!(path.file_name().unwrap(), "config.yaml");
    }
}

#[test]
fn test_themes_and_logs_live_under_config_dir() {
    if let (Some(base), Some(themes), Some(logs)) = (
        config_paths::config_dir(),
        config_paths::themes_dir(),
        config_paths::logs_dir(),
    ) {
        assert!(themes.starts_with(&base));
        assert!(logs.starts_with(&base));
    }
}

// ========================================================================
// EditorConfig persistence
// ========================================================================

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut config = EditorConfig::default();
    config.theme = "light".into();
    config.default_language = LanguageId::Rust;
    config.formatting.replace_conflicting_tags = false;
    config.syntax.per_language_rules = true;
    config.grid.rows = 10;
    config.grid.columns = 4;
    config.image.highlight_ms = 500;

    config.save_to(&path).unwrap();
    let loaded = EditorConfig::load_from(&path);
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = EditorConfig::load_from(&dir.path().join("nope.yaml"));
    assert_eq!(loaded, EditorConfig::default());
}

#[test]
fn test_invalid_yaml_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "theme: [unclosed").unwrap();
    assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "grid:\n  clear_on_mode_switch: false\n").unwrap();

    let loaded = EditorConfig::load_from(&path);
    assert!(!loaded.grid.clear_on_mode_switch);
    assert_eq!(loaded.grid.rows, EditorConfig::default().grid.rows);
    assert_eq!(loaded.theme, "dark");
}

// ========================================================================
// Config flowing into the model
// ========================================================================

#[test]
fn test_config_shapes_new_model() {
    let mut config = EditorConfig::default();
    config.default_language = LanguageId::Sql;
    config.formatting.replace_conflicting_tags = false;
    config.formatting.default_font_size = 16;
    config.syntax.per_language_rules = true;
    config.grid.rows = 5;
    config.grid.columns = 3;

    assert_eq!(config.formatting_policy(), FormattingPolicy::Accumulate);
    assert_eq!(config.highlight_rules(), HighlightRules::PerLanguage);

    let mut model = test_model_with_config("", config);
    assert_eq!(model.session().policy, FormattingPolicy::Accumulate);
    assert_eq!(model.grid.rows(), 5);
    assert_eq!(model.grid.cols(), 3);

    switch_mode(&mut model, ViewMode::Code);
    assert_eq!(model.ui.status, "Switched to Code Mode - SQL");
}

#[test]
fn test_default_font_size_is_stamped_when_not_twelve() {
    let mut config = EditorConfig::default();
    config.formatting.default_font_size = 16;
    let mut model = test_model_with_config("", config);
    type_text(&mut model, "a");
    assert_eq!(ranges_named(&model, "size_16"), vec![(0, 1)]);
}

#[test]
fn test_formatting_config_survives_new_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.txt");
    std::fs::write(&path, "").unwrap();

    let mut config = EditorConfig::default();
    config.formatting.default_font_size = 16;
    config.formatting.replace_conflicting_tags = false;
    let mut model = test_model_with_config("", config);

    send(&mut model, Msg::File(FileMsg::New));
    assert_eq!(model.session().formatting.size, 16);

    send(&mut model, Msg::File(FileMsg::Open(path)));
    assert_eq!(model.session().formatting.size, 16);
    assert_eq!(model.session().policy, FormattingPolicy::Accumulate);
    type_text(&mut model, "b");
    assert_eq!(ranges_named(&model, "size_16"), vec![(0, 1)]);
}
