//! History logger - persists transitions to a JSONL file
//!
//! Subscribes to the history bus and appends each record to
//! `{dir}/transitions.jsonl` for later analytics replay. Runs as a
//! background task; write failures are logged and never propagate to the
//! workflow write path.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tokio::sync::broadcast;
use tracing::{debug, error, warn};

use super::bus::HistoryBus;
use super::types::TransitionRecord;

/// Appends transition records to a JSONL file
pub struct HistoryLogger {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl HistoryLogger {
    /// Create a logger writing to `{dir}/transitions.jsonl`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join("transitions.jsonl");
        debug!(?path, "HistoryLogger::new: creating logger");
        Self { path, writer: None }
    }

    /// Append one record
    pub fn write_record(&mut self, record: &TransitionRecord) -> eyre::Result<()> {
        let writer = match &mut self.writer {
            Some(w) => w,
            None => {
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
                self.writer.insert(BufWriter::new(file))
            }
        };

        let json = serde_json::to_string(record)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;
        Ok(())
    }

    /// Consume records from a bus subscription until the channel closes
    ///
    /// Meant to be spawned as a background task.
    pub async fn run(mut self, mut rx: broadcast::Receiver<TransitionRecord>) {
        debug!("HistoryLogger::run: starting");

        loop {
            match rx.recv().await {
                Ok(record) => {
                    if let Err(e) = self.write_record(&record) {
                        error!(session_id = %record.session_id, error = %e, "HistoryLogger: failed to write record");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "HistoryLogger: lagged behind, missed records");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("HistoryLogger: channel closed, shutting down");
                    break;
                }
            }
        }

        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

/// Spawn a history logger consuming from the given bus
///
/// Subscribes before spawning, so records emitted right after this call
/// are not missed.
pub fn spawn_history_logger(dir: impl AsRef<Path>, bus: &HistoryBus) -> tokio::task::JoinHandle<()> {
    let logger = HistoryLogger::new(dir);
    let rx = bus.subscribe();
    tokio::spawn(logger.run(rx))
}
