//! # Record Logger
//!
//! Appends applied records to rotating JSONL files.

use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;
use crate::record::types::TelemetryRecord;

/// One logged record line
#[derive(Debug, Serialize)]
struct RecordEntry {
    /// RFC 3339 UTC timestamp of the write
    ts: String,
    channel_a: f64,
    channel_b: f64,
    ordering: f64,
}

/// Rotating JSONL record logger
///
/// Each applied record becomes one JSON line. Files rotate after
/// `max_records_per_file` records; only the newest `max_files_to_keep`
/// files are retained. File names sort lexicographically by creation
/// time, so retention is a sort-and-truncate over the directory.
pub struct RecordLogger {
    dir: PathBuf,
    max_records_per_file: usize,
    max_files_to_keep: usize,
    writer: Option<BufWriter<File>>,
    records_in_file: usize,
    file_seq: u64,
}

impl RecordLogger {
    /// Create the log directory; the first file opens on the first append
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory for record logs (created if missing)
    /// * `max_records_per_file` - Records per file before rotation
    /// * `max_files_to_keep` - Newest files retained after rotation
    pub fn new<P: AsRef<Path>>(
        dir: P,
        max_records_per_file: usize,
        max_files_to_keep: usize,
    ) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
            max_records_per_file,
            max_files_to_keep,
            writer: None,
            records_in_file: 0,
            file_seq: 0,
        })
    }

    /// Append one applied record as a JSON line
    ///
    /// Flushes per line so record logs tail cleanly while the session is
    /// live.
    pub fn append(&mut self, record: &TelemetryRecord) -> Result<()> {
        if self.writer.is_none() || self.records_in_file >= self.max_records_per_file {
            self.rotate()?;
        }

        let entry = RecordEntry {
            ts: Utc::now().to_rfc3339(),
            channel_a: record.channel_a,
            channel_b: record.channel_b,
            ordering: record.ordering,
        };
        let line = serde_json::to_string(&entry)?;

        if let Some(writer) = self.writer.as_mut() {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            self.records_in_file += 1;
        }

        Ok(())
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Close the current file, open the next one, prune old files
    fn rotate(&mut self) -> Result<()> {
        if let Some(mut previous) = self.writer.take() {
            previous.flush()?;
        }

        self.file_seq += 1;
        let name = format!(
            "records-{}-{:04}.jsonl",
            Utc::now().format("%Y%m%d-%H%M%S"),
            self.file_seq
        );
        let path = self.dir.join(name);
        let file = File::create(&path)?;
        info!("Record log rotated to {}", path.display());

        self.writer = Some(BufWriter::new(file));
        self.records_in_file = 0;
        self.prune()?;
        Ok(())
    }

    /// Remove the oldest logs beyond the retention limit
    fn prune(&self) -> Result<()> {
        let mut logs: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |ext| ext == "jsonl"))
            .collect();
        logs.sort();

        while logs.len() > self.max_files_to_keep {
            let oldest = logs.remove(0);
            debug!("Removing old record log {}", oldest.display());
            fs::remove_file(&oldest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(a: f64, b: f64, ordering: f64) -> TelemetryRecord {
        TelemetryRecord {
            channel_a: a,
            channel_b: b,
            ordering,
        }
    }

    fn log_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_append_writes_one_json_line_per_record() {
        let dir = tempdir().unwrap();
        let mut logger = RecordLogger::new(dir.path(), 100, 5).unwrap();

        logger.append(&record(1.0, 2.0, 3.0)).unwrap();
        logger.append(&record(4.0, 5.0, 6.0)).unwrap();
        logger.flush().unwrap();

        let files = log_files(dir.path());
        assert_eq!(files.len(), 1);

        let contents = fs::read_to_string(&files[0]).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["channel_a"], 1.0);
        assert_eq!(parsed["channel_b"], 2.0);
        assert_eq!(parsed["ordering"], 3.0);
        assert!(parsed["ts"].is_string());
    }

    #[test]
    fn test_rotation_after_max_records() {
        let dir = tempdir().unwrap();
        let mut logger = RecordLogger::new(dir.path(), 2, 10).unwrap();

        for i in 0..5 {
            logger.append(&record(i as f64, 0.0, 0.0)).unwrap();
        }

        // 5 records at 2 per file: three files (2 + 2 + 1)
        let files = log_files(dir.path());
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_retention_prunes_oldest_files() {
        let dir = tempdir().unwrap();
        let mut logger = RecordLogger::new(dir.path(), 1, 2).unwrap();

        for i in 0..6 {
            logger.append(&record(i as f64, 0.0, 0.0)).unwrap();
        }
        logger.flush().unwrap();

        let files = log_files(dir.path());
        assert_eq!(files.len(), 2, "retention limit not enforced");

        // The surviving files hold the newest records
        let newest = fs::read_to_string(files.last().unwrap()).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(newest.lines().next().unwrap()).unwrap();
        assert_eq!(parsed["channel_a"], 5.0);
    }

    #[test]
    fn test_creates_missing_log_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("records").join("today");

        let mut logger = RecordLogger::new(&nested, 10, 2).unwrap();
        logger.append(&record(1.0, 1.0, 1.0)).unwrap();

        assert!(nested.is_dir());
        assert_eq!(log_files(&nested).len(), 1);
    }

    #[test]
    fn test_non_finite_samples_still_log() {
        // serde_json writes non-finite floats as null; the line must stay
        // one valid JSON document either way
        let dir = tempdir().unwrap();
        let mut logger = RecordLogger::new(dir.path(), 10, 2).unwrap();

        logger.append(&record(f64::NAN, f64::INFINITY, 1.0)).unwrap();
        logger.flush().unwrap();

        let files = log_files(dir.path());
        let contents = fs::read_to_string(&files[0]).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert!(parsed["channel_a"].is_null());
        assert!(parsed["channel_b"].is_null());
        assert_eq!(parsed["ordering"], 1.0);
    }
}
