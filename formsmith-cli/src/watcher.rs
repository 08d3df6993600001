//! Watching a form configuration for changes.

use crate::error::{CliResult, WatchError};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// A change to the watched configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The file was created or modified.
    Modified(PathBuf),
    /// The file was removed.
    Deleted(PathBuf),
    /// The watcher reported an error.
    Error(String),
}

/// Watches one JSON form configuration.
///
/// The parent directory is watched non-recursively since editors often
/// replace files instead of writing them in place.
pub struct FileWatcher {
    file: PathBuf,
    debounce_ms: u64,
}

impl FileWatcher {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            debounce_ms: 300,
        }
    }

    /// Set the debounce duration in milliseconds.
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Start watching. Keep the returned debouncer alive for as long as
    /// events are wanted.
    pub fn watch(&self) -> CliResult<(Debouncer<RecommendedWatcher>, Receiver<WatchEvent>)> {
        let (tx, rx) = channel::<WatchEvent>();
        let target = self.file.file_name().map(|name| name.to_os_string());

        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    for event in events {
                        if !is_relevant(&event.path, target.as_deref()) {
                            continue;
                        }
                        let watch_event = if event.path.exists() {
                            WatchEvent::Modified(event.path)
                        } else {
                            WatchEvent::Deleted(event.path)
                        };
                        let _ = tx.send(watch_event);
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            },
        )
        .map_err(|e| WatchError::Init(e.to_string()))?;

        let dir = match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::Notify(e.to_string()))?;

        tracing::debug!(dir = %dir.display(), "watching for changes");
        Ok((debouncer, rx))
    }
}

/// Whether a changed path is the watched JSON file.
fn is_relevant(path: &Path, target: Option<&std::ffi::OsStr>) -> bool {
    if path.extension().map_or(true, |ext| ext != "json") {
        return false;
    }
    match target {
        Some(name) => path.file_name() == Some(name),
        None => true,
    }
}

impl WatchEvent {
    pub fn path(&self) -> Option<&Path> {
        match self {
            WatchEvent::Modified(p) | WatchEvent::Deleted(p) => Some(p),
            WatchEvent::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            WatchEvent::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
