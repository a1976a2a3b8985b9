//! JSON-lines event log.
//!
//! One serialized [`LogRecord`] per line. The log is best effort: the first
//! failed write turns it off and play continues.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::core::{EngineConfig, Grid, Hint, MatchSet, SwapOutcome};
use crate::types::Position;

/// What happened
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent<'a> {
    SessionStart {
        seed: Option<u32>,
        config: &'a EngineConfig,
        grid: &'a Grid,
    },
    Swap {
        from: Position,
        to: Position,
        #[serde(flatten)]
        outcome: &'a SwapOutcome,
    },
    Wave {
        chain_index: u32,
        matched: &'a MatchSet,
        score_gained: u32,
        total_score: u32,
    },
    Hint {
        hint: Option<Hint>,
    },
    Expired {
        score: u32,
        best_chain: u32,
    },
}

/// One line of the log
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord<'a> {
    pub seq: u64,
    pub episode_id: u32,
    #[serde(flatten)]
    pub event: LogEvent<'a>,
}

pub struct EventLog {
    out: Option<Box<dyn Write + Send>>,
    seq: u64,
    buf: Vec<u8>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("enabled", &self.is_enabled())
            .field("seq", &self.seq)
            .finish()
    }
}

impl EventLog {
    /// A log that drops every record
    pub fn disabled() -> Self {
        Self {
            out: None,
            seq: 0,
            buf: Vec::new(),
        }
    }

    /// Append to the file at `path`, creating it if needed.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow!("event log: open {} failed: {}", path, e))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    /// Log to `path` if given. An unopenable path is reported on stderr and
    /// leaves the log disabled.
    pub fn open_optional(path: Option<&str>) -> Self {
        match path {
            Some(path) => Self::open(path).unwrap_or_else(|e| {
                eprintln!("[match3] {}; logging disabled", e);
                Self::disabled()
            }),
            None => Self::disabled(),
        }
    }

    pub fn from_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Some(Box::new(out)),
            seq: 0,
            buf: Vec::with_capacity(1024),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Records written so far
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, episode_id: u32, event: LogEvent<'_>) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        let record = LogRecord {
            seq: self.seq,
            episode_id,
            event,
        };
        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &record).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if out.write_all(&self.buf).and_then(|_| out.flush()).is_err() {
            self.out = None;
            return;
        }
        self.seq += 1;
    }
}
