//! JSONL key-event recording for later playback and regression testing.
//!
//! A write-only sink: every classified key, click and repeat can be mirrored
//! here so a day of till operation becomes a replayable script. Nothing in
//! the pipeline ever reads it back.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::keys::KeyButton;

pub const KEY_LOG_SCHEMA_VERSION: u32 = 1;

/// How the recorded key was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyLogKind {
    Press,
    Click,
    Repeat,
}

/// One recorded key/button event, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLogRecord {
    pub schema_version: u32,
    pub timestamp_unix_ms: u64,
    pub kind: KeyLogKind,
    pub key: KeyButton,
    pub x: i32,
    pub y: i32,
}

impl KeyLogRecord {
    pub fn now(kind: KeyLogKind, key: KeyButton, at: Point) -> Self {
        Self {
            schema_version: KEY_LOG_SCHEMA_VERSION,
            timestamp_unix_ms: unix_ms_now(),
            kind,
            key,
            x: at.x,
            y: at.y,
        }
    }
}

/// Append-only JSONL writer for key records.
#[derive(Debug)]
pub struct KeyLogWriter {
    path: PathBuf,
    file: BufWriter<File>,
    lines_written: u64,
}

impl KeyLogWriter {
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: BufWriter::new(file),
            lines_written: 0,
        })
    }

    pub fn append(&mut self, record: &KeyLogRecord) -> io::Result<()> {
        let json = serde_json::to_string(record)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        writeln!(self.file, "{json}")?;
        self.file.flush()?;
        self.lines_written = self.lines_written.saturating_add(1);
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records appended by this writer instance.
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

fn unix_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
