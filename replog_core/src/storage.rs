//! Durable history persistence with file locking.
//!
//! The entire serialized workout sequence lives in a single keyed JSON file,
//! rewritten wholesale on every append and read once at startup. Writes are
//! atomic (temp file + rename) and serialized with file locks. Reads never
//! fail the caller: a missing, unreadable or corrupt file degrades to an
//! empty history with a warning.

use crate::types::Workout;
use crate::{Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Destination for the serialized history sequence
pub trait HistorySink {
    /// Rewrite the durable copy with the full ordered sequence
    fn write_all(&mut self, workouts: &[Workout]) -> Result<()>;

    /// Best-effort load of the durable copy; empty on any failure
    fn load(&self) -> Vec<Workout>;
}

/// JSON-file-backed history sink
pub struct JsonHistoryFile {
    path: PathBuf,
}

impl JsonHistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySink for JsonHistoryFile {
    fn load(&self) -> Vec<Workout> {
        if !self.path.exists() {
            tracing::info!("No history file found, starting empty");
            return Vec::new();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open history file {:?}: {}. Starting empty.",
                    self.path,
                    e
                );
                return Vec::new();
            }
        };

        // Shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock history file {:?}: {}. Starting empty.",
                self.path,
                e
            );
            return Vec::new();
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        let _ = file.unlock();

        if let Err(e) = read_result {
            tracing::warn!(
                "Failed to read history file {:?}: {}. Starting empty.",
                self.path,
                e
            );
            return Vec::new();
        }

        match serde_json::from_str::<Vec<Workout>>(&contents) {
            Ok(workouts) => {
                tracing::debug!("Loaded {} workouts from {:?}", workouts.len(), self.path);
                workouts
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse history file {:?}: {}. Starting empty.",
                    self.path,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Atomically rewrite the history file:
    /// 1. Write to a temp file in the same directory
    /// 2. Sync to disk
    /// 3. Rename over the original
    fn write_all(&mut self, workouts: &[Workout]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "history path missing parent")
        })?)?;

        // Exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(workouts)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} workouts to {:?}", workouts.len(), self.path);
        Ok(())
    }
}
