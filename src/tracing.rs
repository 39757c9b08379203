//! Tracing setup and state snapshots for debugging edits
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=scribe::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/scribe/logs/scribe.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::session::EditSession;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `~/.config/scribe/logs/scribe.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so stdout stays clean for `--json` dumps
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of caret, selection and pending formatting for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub caret: usize,
    pub selection: Option<(usize, usize)>,
    pub len_chars: usize,
    pub stamp: Vec<String>,
}

impl SessionSnapshot {
    pub fn from_session(session: &EditSession) -> Self {
        Self {
            caret: session.caret(),
            selection: session.selection_range(),
            len_chars: session.buffer.len_chars(),
            stamp: session
                .formatting
                .stamp_tags()
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.caret != other.caret {
            changes.push(format!("caret: {} → {}", self.caret, other.caret));
        }
        if self.selection != other.selection {
            changes.push(format!(
                "selection: {:?} → {:?}",
                self.selection, other.selection
            ));
        }
        if self.len_chars != other.len_chars {
            changes.push(format!("len: {} → {}", self.len_chars, other.len_chars));
        }
        if self.stamp != other.stamp {
            changes.push(format!(
                "stamp: [{}] → [{}]",
                self.stamp.join(","),
                other.stamp.join(",")
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
