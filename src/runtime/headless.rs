//! Headless runner: applies CLI options as messages and executes the
//! resulting commands the way a windowed shell would.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use scribe::cli::StartupConfig;
use scribe::clipboard::{self, ClipboardContent};
use scribe::commands::Cmd;
use scribe::grid;
use scribe::image::EmbeddedImage;
use scribe::messages::{EditMsg, FileMsg, ModeMsg, Msg, UnsavedChoice};
use scribe::model::AppModel;
use scribe::update::update;
use scribe::view::mode::ViewMode;

pub struct Runner {
    pub model: AppModel,
    /// Where `Cmd::SaveConfig` writes; `None` means the user config file
    config_path: Option<PathBuf>,
    quit: bool,
}

impl Runner {
    pub fn new(model: AppModel, config_path: Option<PathBuf>) -> Self {
        Self {
            model,
            config_path,
            quit: false,
        }
    }

    /// Feed one message through `update` and run whatever it asks for
    pub fn dispatch(&mut self, msg: Msg) -> Result<()> {
        if self.quit {
            tracing::debug!("Ignoring message after quit");
            return Ok(());
        }
        match update(&mut self.model, msg) {
            Some(cmd) => self.process_cmd(cmd),
            None => Ok(()),
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) -> Result<()> {
        match cmd {
            Cmd::None | Cmd::Redraw => Ok(()),
            Cmd::After { delay, msg } => {
                // One-shot run: nothing is around when the timer would fire
                tracing::debug!("Dropping {:?} timer for {:?}", delay, msg);
                Ok(())
            }
            Cmd::ConfirmUnsaved { then, .. } => {
                tracing::info!("Discarding unsaved changes before {:?}", then);
                self.dispatch(Msg::File(FileMsg::ResolveUnsaved(UnsavedChoice::Discard)))
            }
            Cmd::ShowSaveDialog { .. } => {
                bail!("No file name given; pass --export PATH")
            }
            Cmd::ShowError(message) => bail!(message),
            Cmd::ShowWarning(message) => {
                tracing::warn!("{}", message);
                eprintln!("warning: {}", message);
                Ok(())
            }
            Cmd::WriteClipboard(text) => {
                clipboard::write_text(&text).context("Failed to write clipboard")
            }
            Cmd::ReadClipboard => {
                let content = clipboard::read(self.model.config.image_max());
                self.dispatch(Msg::Edit(EditMsg::Pasted(content)))
            }
            Cmd::SaveConfig => {
                let saved = match &self.config_path {
                    Some(path) => self.model.config.save_to(path),
                    None => self.model.config.save(),
                };
                if let Err(e) = saved {
                    tracing::warn!("Failed to save config: {}", e);
                }
                Ok(())
            }
            Cmd::Quit => {
                self.quit = true;
                Ok(())
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd)?;
                }
                Ok(())
            }
        }
    }

    /// Apply startup options in a fixed order: open, theme, language, mode,
    /// grid cells, paste, image, export.
    pub fn apply(&mut self, startup: &StartupConfig) -> Result<()> {
        if let Some(path) = &startup.file {
            self.dispatch(Msg::File(FileMsg::Open(path.clone())))?;
        }
        if let Some(theme) = &startup.theme {
            self.dispatch(Msg::Mode(ModeMsg::SetTheme(theme.clone())))?;
        }
        if let Some(language) = startup.language {
            self.dispatch(Msg::Mode(ModeMsg::SetLanguage(language)))?;
        }
        if let Some(mode) = startup.mode {
            self.dispatch(Msg::Mode(ModeMsg::Switch(mode)))?;
        }
        if let Some(path) = &startup.cells {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let filled = grid::import_csv(&mut self.model.grid, &content)?;
            tracing::info!("Loaded {} cells from {}", filled, path.display());
        }
        if startup.paste {
            self.move_caret_to_end()?;
            self.dispatch(Msg::Edit(EditMsg::Paste))?;
        }
        if let Some(path) = &startup.image {
            let bytes =
                std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            let image = EmbeddedImage::decode(&bytes, self.model.config.image_max())?;
            self.move_caret_to_end()?;
            self.dispatch(Msg::Edit(EditMsg::Pasted(ClipboardContent::Image(image))))?;
        }
        if let Some(path) = &startup.export {
            self.dispatch(Msg::File(FileMsg::SaveAs(path.clone())))?;
        }
        Ok(())
    }

    fn move_caret_to_end(&mut self) -> Result<()> {
        let end = self.model.session().buffer.len_chars();
        self.dispatch(Msg::Edit(EditMsg::SetCaret(end)))
    }
}

/// Plain-text rendering: title, body (text or grid CSV) and the status line
pub fn write_summary<W: Write>(model: &AppModel, mut out: W) -> Result<()> {
    writeln!(out, "{}", model.title())?;
    writeln!(out)?;

    match model.mode() {
        ViewMode::Spreadsheet => {
            grid::write_csv(&model.grid, &mut out)?;
        }
        mode => {
            let buffer = &model.session().buffer;
            let width = buffer.line_count().to_string().len();
            for idx in 0..buffer.line_count() {
                let line = buffer.line(idx).unwrap_or_default();
                if mode == ViewMode::Code {
                    writeln!(out, "{:>width$} | {}", idx + 1, line, width = width)?;
                } else {
                    writeln!(out, "{}", line)?;
                }
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", model.ui.status)?;
    Ok(())
}
