//! bg-logging: append-only NDJSON match events + an atomically written
//! match manifest, for post-mortems of simulation runs.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Match manifest schema version.
pub const MATCH_MANIFEST_VERSION: u32 = 1;

/// Top-level record for one simulation run, written next to its logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchManifestV1 {
    pub match_manifest_version: u32,

    pub match_id: String,
    pub created_ts_ms: u64,
    pub ruleset_id: String,

    // Hashes for reproducibility.
    pub git_hash: Option<String>,
    pub config_hash: Option<String>,

    // Layout.
    pub logs_dir: String,

    // Counters.
    pub games_completed: u64,
    pub white_wins: u64,
    pub black_wins: u64,
}

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

pub fn hash_config_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

pub fn try_git_hash() -> Option<String> {
    use std::process::Command;

    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8(out.stdout).ok()?;
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

pub fn read_manifest(path: impl AsRef<Path>) -> Result<MatchManifestV1, NdjsonError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice::<MatchManifestV1>(&bytes)?)
}

/// Write via temp file + rename so readers never observe a torn manifest.
pub fn write_manifest_atomic(
    path: impl AsRef<Path>,
    m: &MatchManifestV1,
) -> Result<(), NdjsonError> {
    let path = path.as_ref();
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(m)?;
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// One applied move, with the board snapshot after it.
#[derive(Debug, Clone, Serialize)]
pub struct MoveEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub ruleset_id: &'static str,

    pub game_id: u64,
    pub ply: u32,
    pub color: &'static str,

    pub label: String,
    pub die: u8,
    /// The turn's full roll (2 values, or 4 on doubles).
    pub dice: Vec<u8>,

    pub points: [i8; 24],
    pub bar: [u8; 2],
    pub off: [u8; 2],
}

/// One finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameResultEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub ruleset_id: &'static str,

    pub game_id: u64,
    pub plies: u32,
    pub winner: &'static str,
    pub hits: u32,
    pub white_off: u8,
    pub black_off: u8,
}

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a
/// newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}
