//! Hand history records and JSONL persistence.

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Rank;
use crate::game::{HandOutcome, RecordedAction};
use crate::variants::VariantId;

/// Complete record of one hand: every action in order, the outcome, and
/// enough context (variant, seed, wild ranks) to replay or audit it.
/// Serialized to JSONL, one hand per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier (format: YYYYMMDD-NNNNNN).
    pub hand_id: String,
    pub variant: VariantId,
    /// RNG seed used for the shuffle, for deterministic replay.
    pub seed: Option<u64>,
    pub dealer: usize,
    /// Chronological actions across all phases.
    pub actions: Vec<RecordedAction>,
    /// Payouts, revealed hands, and carryover.
    pub outcome: Option<HandOutcome>,
    /// Ranks that were wild at showdown, if the variant has wilds.
    #[serde(default)]
    pub wild_ranks: Vec<Rank>,
    /// Timestamp the hand finished (RFC3339).
    #[serde(default)]
    pub ts: Option<String>,
    /// Extensible metadata (table name, stakes, and the like).
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`HandRecord`]s to a JSONL file, one line per hand, flushing
/// after each write so histories survive a crash mid-session.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that numbers hands but writes nowhere, for tests.
    pub fn sink(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
