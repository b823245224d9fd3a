//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use president::{GameRecord, ResultSink, SinkError};
use serde::Serialize;
use tracing::debug;

use crate::error::SimulatorError;
use crate::types::OutputFormat;

/// One CSV line per completed game.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_no: u32,
    pub recorded_at: String,
    pub rounds: usize,
    pub president: String,
    pub troufion: String,
    pub players: String,
}

impl From<&GameRecord> for CsvSummaryRow {
    fn from(record: &GameRecord) -> Self {
        Self {
            game_no: record.game_no,
            recorded_at: record.recorded_at.clone(),
            rounds: record.plays.len(),
            president: record.president().unwrap_or_default().to_string(),
            troufion: record
                .winners
                .last()
                .map(|w| w.player.clone())
                .unwrap_or_default(),
            players: record.players.join("|"),
        }
    }
}

/// Writes every finished game as a JSONL record and a CSV summary row.
pub struct OutputWriter {
    jsonl_writer: Option<Box<dyn Write + Send>>,
    csv_writer: csv::Writer<BufWriter<File>>,
    jsonl_path: Option<PathBuf>,
    csv_path: PathBuf,
}

impl OutputWriter {
    pub fn new(
        output_dir: impl AsRef<Path>,
        format: &OutputFormat,
        compress: bool,
    ) -> Result<Self, SimulatorError> {
        let dir = output_dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let (jsonl_writer, jsonl_path) = match format {
            OutputFormat::Jsonl => {
                let filename = format!("president_{timestamp}.jsonl");
                if compress {
                    let path = dir.join(format!("{filename}.gz"));
                    let writer: Box<dyn Write + Send> = Box::new(BufWriter::new(GzEncoder::new(
                        File::create(&path)?,
                        Compression::default(),
                    )));
                    (Some(writer), Some(path))
                } else {
                    let path = dir.join(filename);
                    let file = OpenOptions::new()
                        .create(true)
                        .write(true)
                        .truncate(true)
                        .open(&path)?;
                    let writer: Box<dyn Write + Send> = Box::new(BufWriter::new(file));
                    (Some(writer), Some(path))
                }
            }
            OutputFormat::None => (None, None),
        };

        let csv_path = dir.join(format!("president_{timestamp}_summary.csv"));
        let csv_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&csv_path)?;
        let csv_writer = csv::Writer::from_writer(BufWriter::new(csv_file));

        Ok(Self {
            jsonl_writer,
            csv_writer,
            jsonl_path,
            csv_path,
        })
    }

    pub fn write_game(&mut self, record: &GameRecord) -> Result<(), SimulatorError> {
        if let Some(ref mut writer) = self.jsonl_writer {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{json}")?;
            writer.flush()?;
        }

        self.csv_writer.serialize(CsvSummaryRow::from(record))?;
        self.csv_writer.flush()?;
        debug!(game_no = record.game_no, "game written");
        Ok(())
    }

    pub fn output_paths(&self) -> (Option<&PathBuf>, &PathBuf) {
        (self.jsonl_path.as_ref(), &self.csv_path)
    }
}

impl ResultSink for OutputWriter {
    fn save_game(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        self.write_game(record).map_err(SinkError::from)
    }
}
