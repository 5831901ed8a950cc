use std::fs;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Navigation model
// ---------------------------------------------------------------------------

/// Ordered list of files to display plus the position of the one on screen.
///
/// The entries are fixed once resolved; only the cursor moves, and it wraps
/// in both directions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathList {
    entries: Vec<PathBuf>,
    cursor: usize,
}

impl PathList {
    /// Resolve raw command-line paths into displayable entries.
    ///
    /// Directories are skipped with a warning. A symbolic link is followed one
    /// level: a link to a directory is skipped, anything else is replaced by the
    /// link target. Other paths are kept as given, without checking that they
    /// exist; unreadable files surface later as decode failures.
    pub fn resolve<I, P>(raw_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut entries = Vec::new();
        for raw in raw_paths {
            let path = raw.as_ref();
            if path.is_dir() {
                log::warn!("{}: not a file, skipping...", path.display());
                continue;
            }

            let is_symlink = fs::symlink_metadata(path)
                .map(|meta| meta.file_type().is_symlink())
                .unwrap_or(false);
            if !is_symlink {
                entries.push(path.to_path_buf());
                continue;
            }

            match fs::read_link(path) {
                Ok(target) => {
                    let target = match path.parent() {
                        Some(parent) if target.is_relative() => parent.join(target),
                        _ => target,
                    };
                    if target.is_dir() {
                        log::warn!("{}: not a file, skipping...", path.display());
                    } else {
                        log::debug!("{} -> {}", path.display(), target.display());
                        entries.push(target);
                    }
                }
                Err(e) => {
                    log::warn!("{}: cannot read link ({}), keeping as given", path.display(), e);
                    entries.push(path.to_path_buf());
                }
            }
        }
        Self::from_entries(entries)
    }

    /// Build a list from already-resolved entries, cursor on the first one.
    pub fn from_entries(entries: Vec<PathBuf>) -> Self {
        Self { entries, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, `None` for an empty list.
    pub fn index(&self) -> Option<usize> {
        if self.entries.is_empty() { None } else { Some(self.cursor) }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn current(&self) -> Option<&Path> {
        self.entries.get(self.cursor).map(PathBuf::as_path)
    }

    pub fn step_forward(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
    }

    pub fn step_backward(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.entries.len() - 1
        } else {
            self.cursor - 1
        };
    }

    /// Step forward and return the new current entry.
    pub fn to_next(&mut self) -> Option<&Path> {
        self.step_forward();
        self.current()
    }

    /// Step backward and return the new current entry.
    pub fn to_previous(&mut self) -> Option<&Path> {
        self.step_backward();
        self.current()
    }
}
