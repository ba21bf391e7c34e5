//! CSV file backend for the event log.

use crate::EventLog;
use chargewatch_core::{EVENT_COLUMNS, PredictionEvent};
use chargewatch_error::{ChargewatchResult, LogError, LogErrorKind};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Event log stored as a UTF-8, comma-separated file with a header row.
///
/// # Layout
///
/// ```text
/// timestamp,model_version,model_type,input_summary,predicted_charges,latency_ms,feedback_score,feedback_text
/// 2025-03-01T10:15:00.250000Z,v1_old,baseline,"age=30, sex=male, ...",13256.4,1.2,4,
/// ```
///
/// Absent `latency_ms` and `feedback_score` values are empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvEventLog {
    path: PathBuf,
}

impl CsvEventLog {
    /// Create a log handle for `path`. Nothing is touched on disk until the
    /// first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the log file exists yet.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Encode rows (and optionally the header) into one buffer.
    fn encode(events: &[PredictionEvent], with_header: bool) -> ChargewatchResult<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        if with_header {
            writer
                .write_record(EVENT_COLUMNS)
                .map_err(|e| LogError::new(LogErrorKind::Serialize(e.to_string())))?;
        }
        for event in events {
            writer
                .serialize(event)
                .map_err(|e| LogError::new(LogErrorKind::Serialize(e.to_string())))?;
        }

        let buffer = writer
            .into_inner()
            .map_err(|e| LogError::new(LogErrorKind::Serialize(e.error().to_string())))?;
        Ok(buffer)
    }

    /// Open the file for appending, creating it if needed.
    ///
    /// Returns the handle and whether this call created the file. Creation
    /// uses `create_new`, so only one of several racing writers sees `true`.
    fn open_for_append(&self) -> ChargewatchResult<(File, bool)> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                LogError::new(LogErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        match OpenOptions::new()
            .append(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => Ok((file, true)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let file = OpenOptions::new()
                    .append(true)
                    .open(&self.path)
                    .map_err(|e| self.open_error(e))?;
                // An existing but empty file never received its header.
                let empty = file
                    .metadata()
                    .map(|m| m.len() == 0)
                    .map_err(|e| self.open_error(e))?;
                Ok((file, empty))
            }
            Err(e) => Err(self.open_error(e).into()),
        }
    }

    fn open_error(&self, e: std::io::Error) -> LogError {
        LogError::new(LogErrorKind::FileOpen(format!(
            "{}: {}",
            self.path.display(),
            e
        )))
    }
}

impl EventLog for CsvEventLog {
    #[tracing::instrument(skip(self, events), fields(path = %self.path.display(), rows = events.len()))]
    fn append(&self, events: &[PredictionEvent]) -> ChargewatchResult<()> {
        if events.is_empty() {
            return Ok(());
        }

        // Encode before opening so a serialization failure writes nothing.
        let rows = Self::encode(events, false)?;
        let (mut file, needs_header) = self.open_for_append()?;

        let buffer = if needs_header {
            let mut buffer = Self::encode(&[], true)?;
            buffer.extend_from_slice(&rows);
            buffer
        } else {
            rows
        };

        file.write_all(&buffer).map_err(|e| {
            LogError::new(LogErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        tracing::debug!(created = needs_header, bytes = buffer.len(), "Appended events");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> ChargewatchResult<Vec<PredictionEvent>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No log file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(LogError::new(LogErrorKind::FileRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
                .into());
            }
        };

        // Every append ends with a newline, so anything else is a torn write.
        if bytes.last().is_some_and(|&b| b != b'\n') {
            let line = bytes.iter().filter(|&&b| b == b'\n').count() + 1;
            return Err(LogError::new(LogErrorKind::Parse(format!(
                "line {}: truncated final row",
                line
            )))
            .into());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes.as_slice());

        let headers = reader
            .headers()
            .map_err(|e| LogError::new(LogErrorKind::FileRead(e.to_string())))?
            .clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if headers.iter().ne(EVENT_COLUMNS.iter().copied()) {
            return Err(LogError::new(LogErrorKind::HeaderMismatch(
                headers.iter().collect::<Vec<_>>().join(","),
            ))
            .into());
        }

        let mut events = Vec::new();
        for result in reader.deserialize::<PredictionEvent>() {
            let event = result.map_err(|e| {
                let line = e
                    .position()
                    .map(|p| p.line().to_string())
                    .unwrap_or_else(|| "?".to_string());
                LogError::new(LogErrorKind::Parse(format!("line {}: {}", line, e)))
            })?;
            events.push(event);
        }

        // Stable: equal timestamps keep file order.
        events.sort_by_key(|event| event.timestamp);

        tracing::debug!(rows = events.len(), "Loaded events");
        Ok(events)
    }
}
