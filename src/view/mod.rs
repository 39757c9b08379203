//! Headless presentation: turns the model into a plain visual tree
//!
//! The tree carries everything a GUI shell needs to paint one frame: window
//! title, visible chrome, styled text runs, the line-number gutter, grid
//! cells and the status line. It serializes with serde so the CLI can dump
//! it as JSON.

pub mod mode;

use serde::Serialize;

use crate::grid::{column_to_letters, CellPosition};
use crate::model::buffer::TextBuffer;
use crate::model::formatting::{Rgb, DEFAULT_FONT_SIZE};
use crate::model::tags::{StyleRange, Tag, TagFamily};
use crate::model::AppModel;
use crate::syntax::SyntaxKind;
use crate::theme::Theme;

use mode::{Chrome, ViewMode};

/// One rendered frame
#[derive(Debug, Clone, Serialize)]
pub struct VisualTree {
    pub title: String,
    pub mode: ViewMode,
    pub theme: String,
    pub chrome: Chrome,
    pub palette: Palette,
    /// Pending formatting, shown in the toolbar (normal mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolbar: Option<ToolbarState>,
    /// Selected language (code mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gutter: Option<Gutter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridView>,
    pub status: String,
}

/// Window-level colors
#[derive(Debug, Clone, Serialize)]
pub struct Palette {
    pub window: Rgb,
    pub header: Rgb,
    pub text_background: Rgb,
    pub text_foreground: Rgb,
    pub selection: Rgb,
    pub status_background: Rgb,
    pub status_foreground: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub size: u16,
    pub color: Option<Rgb>,
    pub highlight: Option<Rgb>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Gutter {
    pub background: Rgb,
    pub foreground: Rgb,
    /// 1-based line numbers, one per text line
    pub numbers: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextView {
    pub wrap: bool,
    /// Caret as (line, column), 0-indexed
    pub caret: (usize, usize),
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextLine {
    pub runs: Vec<TextRun>,
}

/// Consecutive characters sharing one style
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    /// Buffer offset of the first character
    pub start: usize,
    pub text: String,
    pub style: RunStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub size: u16,
    pub foreground: Rgb,
    pub background: Option<Rgb>,
    pub border: Option<Rgb>,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridView {
    /// Column header letters
    pub columns: Vec<String>,
    pub rows: usize,
    pub active: String,
    /// Non-empty cells only
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellView {
    pub id: String,
    pub value: String,
}

/// Render the whole model
pub fn render(model: &AppModel) -> VisualTree {
    let chrome = model.view.chrome();
    let theme = &model.theme;
    let session = model.session();

    let toolbar = chrome.formatting_toolbar.then(|| {
        let f = &session.formatting;
        ToolbarState {
            bold: f.bold,
            italic: f.italic,
            underline: f.underline,
            size: f.size,
            color: f.color,
            highlight: f.highlight,
        }
    });

    let gutter = chrome.line_numbers.then(|| Gutter {
        background: theme.gutter.background,
        foreground: theme.gutter.foreground,
        numbers: (1..=session.buffer.line_count()).collect(),
    });

    let text = chrome.text_view.then(|| TextView {
        wrap: chrome.word_wrap,
        caret: session.caret_position(),
        lines: render_lines(&session.buffer, session.selection_range(), theme),
    });

    let grid = chrome.grid.then(|| render_grid(model));

    VisualTree {
        title: model.title(),
        mode: model.mode(),
        theme: theme.id.clone(),
        chrome,
        palette: Palette {
            window: theme.window.background,
            header: theme.window.header_background,
            text_background: theme.editor.background,
            text_foreground: theme.editor.foreground,
            selection: theme.editor.selection_background,
            status_background: theme.status_bar.background,
            status_foreground: theme.status_bar.foreground,
        },
        toolbar,
        language: chrome
            .language_selector
            .then(|| model.view.language.display_name().to_string()),
        gutter,
        text,
        grid,
        status: model.ui.status.clone(),
    }
}

fn render_grid(model: &AppModel) -> GridView {
    let grid = &model.grid;
    GridView {
        columns: (0..grid.cols()).map(column_to_letters).collect(),
        rows: grid.rows(),
        active: grid.active().to_string(),
        cells: grid
            .iter()
            .map(|(pos, value): (CellPosition, &str)| CellView {
                id: pos.to_string(),
                value: value.to_string(),
            })
            .collect(),
    }
}

fn render_lines(
    buffer: &TextBuffer,
    selection: Option<(usize, usize)>,
    theme: &Theme,
) -> Vec<TextLine> {
    (0..buffer.line_count())
        .map(|line_idx| {
            let start = buffer.line_start(line_idx);
            let end = start + buffer.line_length(line_idx);
            TextLine {
                runs: render_runs(buffer, start, end, selection, theme),
            }
        })
        .collect()
}

fn render_runs(
    buffer: &TextBuffer,
    start: usize,
    end: usize,
    selection: Option<(usize, usize)>,
    theme: &Theme,
) -> Vec<TextRun> {
    let ranges = buffer.ranges_in(start, end);
    let text = buffer.slice(start..end);
    let mut runs: Vec<TextRun> = Vec::new();

    for (i, ch) in text.chars().enumerate() {
        let offset = start + i;
        let covering: Vec<&StyleRange> = ranges
            .iter()
            .copied()
            .filter(|r| r.contains(offset))
            .collect();
        let selected = selection.is_some_and(|(s, e)| s <= offset && offset < e);
        let style = style_at(&covering, selected, theme);

        if let Some(img) = buffer.image_at(offset) {
            runs.push(TextRun {
                start: offset,
                text: ch.to_string(),
                style,
                image: Some(ImageRef {
                    id: img.id,
                    width: img.width,
                    height: img.height,
                }),
            });
            continue;
        }

        match runs.last_mut() {
            Some(run) if run.image.is_none() && run.style == style => run.text.push(ch),
            _ => runs.push(TextRun {
                start: offset,
                text: ch.to_string(),
                style,
                image: None,
            }),
        }
    }
    runs
}

/// Resolve the tags over one character into a style.
///
/// Within one family the latest applied tag wins. An explicit text color
/// beats syntax coloring; among overlapping syntax tags the later pass wins
/// (a keyword inside a comment paints as comment).
fn style_at(covering: &[&StyleRange], selected: bool, theme: &Theme) -> RunStyle {
    let latest = |family: TagFamily| {
        covering
            .iter()
            .filter(|r| r.tag.family() == family)
            .max_by_key(|r| r.seq)
            .map(|r| &r.tag)
    };

    let syntax = covering
        .iter()
        .filter_map(|r| match r.tag {
            Tag::Syntax(kind) => Some(kind),
            _ => None,
        })
        .max();

    let foreground = match latest(TagFamily::Color) {
        Some(Tag::Color(c)) => *c,
        _ => syntax
            .map(|kind: SyntaxKind| theme.syntax.color(kind))
            .unwrap_or(theme.editor.foreground),
    };
    let size = match latest(TagFamily::Size) {
        Some(Tag::Size(n)) => *n,
        _ => DEFAULT_FONT_SIZE,
    };
    let image_highlight = latest(TagFamily::Transient).is_some();
    let background = if image_highlight {
        Some(theme.image_highlight.background)
    } else if selected {
        Some(theme.editor.selection_background)
    } else {
        match latest(TagFamily::Highlight) {
            Some(Tag::Highlight(c)) => Some(*c),
            _ => None,
        }
    };

    RunStyle {
        bold: latest(TagFamily::Bold).is_some(),
        italic: latest(TagFamily::Italic).is_some(),
        underline: latest(TagFamily::Underline).is_some(),
        size,
        foreground,
        background,
        border: image_highlight.then_some(theme.image_highlight.border),
        selected,
    }
}
