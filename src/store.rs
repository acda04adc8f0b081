//! State Store
//!
//! Loads and saves the JSON state file. Loading never fails: a missing or
//! corrupt file yields an empty document with default settings. Saving is
//! atomic and reports every failure, since a failed save means the user's
//! edits are not durable.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::document::{serialize_state, Document, LineStatuses};
use crate::settings::Settings;

/// File-backed persistence for the single note document
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted document, recovering silently from absence or corruption
    pub fn load(&self) -> Document {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No state file at {}, starting empty", self.path.display());
                return Document::default();
            }
            Err(e) => {
                log::warn!(
                    "Could not read state file {}: {}; starting empty",
                    self.path.display(),
                    e
                );
                return Document::default();
            }
        };

        match Document::from_json(&content) {
            Ok(document) => {
                log::info!(
                    "Loaded {} lines and {} line statuses from {}",
                    document.line_count(),
                    document.line_status.len(),
                    self.path.display()
                );
                document
            }
            Err(e) => {
                log::warn!(
                    "Corrupt state file {}: {:#}; starting empty",
                    self.path.display(),
                    e
                );
                Document::default()
            }
        }
    }

    /// Write the full document, replacing whatever was there.
    ///
    /// The content goes to a temporary file in the same directory first and is
    /// then renamed over the target, so a crash mid-write leaves the previous
    /// state intact. An existing file keeps its permissions.
    pub fn save(&self, text: &str, line_status: &LineStatuses, settings: &Settings) -> Result<()> {
        let json = serialize_state(text, line_status, settings)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create state directory: {}", dir.display()))?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.flush())
            .and_then(|_| tmp.as_file().sync_all())
            .with_context(|| format!("Failed to write state for {}", self.path.display()))?;
        if let Ok(existing) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .with_context(|| {
                    format!("Failed to copy permissions of {}", self.path.display())
                })?;
        }
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace state file: {}", self.path.display()))?;

        log::debug!("Saved state to {}", self.path.display());
        Ok(())
    }

    pub fn save_document(&self, document: &Document) -> Result<()> {
        self.save(&document.text, &document.line_status, &document.settings)
    }
}

/// Read an external plain-text file for import.
///
/// The file must be valid UTF-8; `\r\n` and lone `\r` line endings become `\n`.
pub fn import_text(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8 text", path.display()))?;
    Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
}
