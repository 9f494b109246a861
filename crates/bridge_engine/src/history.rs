//! Copy history: the most recent extracted prompts, newest first.
//!
//! Stored as pretty-printed JSON under the `gpt_to_cc` key. Keys written by
//! other tools sharing the file are carried through untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bridge_logging::{bridge_debug, bridge_warn};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::decode_text;
use crate::persist::{write_atomically, PersistError};

pub const MAX_ENTRIES: usize = 50;
pub const PREVIEW_LENGTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub preview: String,
    pub content: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    gpt_to_cc: Vec<HistoryEntry>,
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug)]
pub struct CopyHistory {
    path: PathBuf,
    data: HistoryFile,
}

impl CopyHistory {
    /// Opens the history at `path`. Missing or unreadable files start empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = load(&path);
        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.data.gpt_to_cc
    }

    pub fn content(&self, index: usize) -> Option<&str> {
        self.data
            .gpt_to_cc
            .get(index)
            .map(|entry| entry.content.as_str())
    }

    /// Records `content` as the newest entry and saves.
    ///
    /// `prefix_to_remove` is only stripped from the preview; the stored
    /// content stays complete.
    pub fn add(
        &mut self,
        content: &str,
        prefix_to_remove: &str,
        at: NaiveDateTime,
    ) -> Result<(), HistoryError> {
        let mut preview_source = content;
        if !prefix_to_remove.is_empty() {
            if let Some(rest) = content.strip_prefix(prefix_to_remove) {
                preview_source = rest.trim_start_matches(['\r', '\n']);
            }
        }

        let entry = HistoryEntry {
            timestamp: at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            preview: make_preview(preview_source),
            content: content.to_owned(),
        };
        self.data.gpt_to_cc.insert(0, entry);
        self.data.gpt_to_cc.truncate(MAX_ENTRIES);
        self.save()
    }

    /// Removes the entry at `index`; returns `false` when out of range.
    pub fn delete(&mut self, index: usize) -> Result<bool, HistoryError> {
        if index >= self.data.gpt_to_cc.len() {
            return Ok(false);
        }
        self.data.gpt_to_cc.remove(index);
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(&self.data)?;
        write_atomically(&self.path, json.as_bytes())?;
        bridge_debug!(
            "saved {} history entries to {:?}",
            self.data.gpt_to_cc.len(),
            self.path
        );
        Ok(())
    }
}

fn load(path: &Path) -> HistoryFile {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return HistoryFile::default(),
        Err(err) => {
            bridge_warn!("Failed to read history from {:?}: {}", path, err);
            return HistoryFile::default();
        }
    };
    let text = match decode_text(&bytes) {
        Ok(decoded) => decoded.text,
        Err(err) => {
            bridge_warn!("Failed to decode history from {:?}: {}", path, err);
            return HistoryFile::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(data) => data,
        Err(err) => {
            bridge_warn!("Failed to parse history from {:?}: {}", path, err);
            HistoryFile::default()
        }
    }
}

/// Single-line preview: newlines become spaces, carriage returns vanish.
fn make_preview(content: &str) -> String {
    content
        .replace('\n', " ")
        .replace('\r', "")
        .chars()
        .take(PREVIEW_LENGTH)
        .collect()
}
