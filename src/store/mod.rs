use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::assignment::AssignmentResult;

/// Append-only history of assignment results.
pub trait LogStore {
    /// Prior entries. Never fails: an unreadable history counts as empty.
    fn load(&self) -> Vec<Value>;

    /// Appends `results` after the existing entries and returns the new total.
    fn append(&self, results: &[AssignmentResult]) -> Result<usize, AppError>;
}

/// History kept as one pretty-printed JSON array.
///
/// Appending reads the whole file and overwrites it. That is not atomic, so
/// two writers sharing a path can drop each other's entries; callers run one
/// batch at a time.
#[derive(Debug, Clone)]
pub struct JsonFileLogStore {
    path: PathBuf,
}

impl JsonFileLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Vec<Value>, AppError> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl LogStore for JsonFileLogStore {
    fn load(&self) -> Vec<Value> {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(AppError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no assignment log yet");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "assignment log unreadable; starting from empty history"
                );
                Vec::new()
            }
        }
    }

    fn append(&self, results: &[AssignmentResult]) -> Result<usize, AppError> {
        let mut entries = self.load();
        for result in results {
            entries.push(serde_json::to_value(result)?);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;

        debug!(
            path = %self.path.display(),
            appended = results.len(),
            total = entries.len(),
            "assignment log written"
        );
        Ok(entries.len())
    }
}

/// Timestamp of a stored entry. Accepts RFC 3339 as well as naive ISO-8601
/// stamps, which are read as UTC.
pub fn entry_timestamp(entry: &Value) -> Option<DateTime<Utc>> {
    let raw = entry.get("timestamp")?.as_str()?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Entries ordered newest first; entries without a usable timestamp go last.
pub fn newest_first(mut entries: Vec<Value>) -> Vec<Value> {
    entries.sort_by_key(|entry| std::cmp::Reverse(entry_timestamp(entry)));
    entries
}
