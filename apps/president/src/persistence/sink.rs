//! Where game records go.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use super::record::GameRecord;
use crate::errors::domain::DomainError;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<SinkError> for DomainError {
    fn from(err: SinkError) -> Self {
        DomainError::persistence(err.to_string())
    }
}

/// Receives exactly one record per completed game.
pub trait ResultSink: Send {
    fn save_game(&mut self, record: &GameRecord) -> Result<(), SinkError>;
}

/// Appends one JSON object per line.
pub struct JsonlFileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlFileSink {
    /// Open `path` for appending, creating it (but not its directory) if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonlFileSink {
    fn save_game(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        debug!(path = %self.path.display(), game_no = record.game_no, "record appended");
        Ok(())
    }
}

/// Keeps records in memory; clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<GameRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<GameRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl ResultSink for MemorySink {
    fn save_game(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Every sink gets every record; the first failure stops the fan-out.
impl ResultSink for Vec<Box<dyn ResultSink>> {
    fn save_game(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        for sink in self.iter_mut() {
            sink.save_game(record)?;
        }
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn save_game(&mut self, _record: &GameRecord) -> Result<(), SinkError> {
        Ok(())
    }
}
