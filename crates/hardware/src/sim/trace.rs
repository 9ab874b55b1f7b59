//! Trace reading.
//!
//! A trace holds one memory reference per line:
//!
//! ```text
//! R 0x7ffd3a10
//! W 0x0040a2c8
//! ```
//!
//! Lines that do not parse are skipped: they never reach the simulator and
//! never touch statistics.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::common::{AccessType, TraceError};

/// One parsed trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Read or write.
    pub op: AccessType,
    /// Byte address.
    pub addr: u64,
}

impl TraceRecord {
    /// Creates a record.
    pub const fn new(op: AccessType, addr: u64) -> Self {
        Self { op, addr }
    }
}

impl FromStr for TraceRecord {
    type Err = TraceError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();

        let op_token = tokens.next().ok_or(TraceError::Empty)?;
        let mut op_chars = op_token.chars();
        let op = match (op_chars.next(), op_chars.next()) {
            (Some(c), None) => AccessType::from_op(c),
            _ => None,
        }
        .ok_or_else(|| TraceError::UnknownOp(op_token.to_string()))?;

        let addr_token = tokens
            .next()
            .ok_or_else(|| TraceError::BadAddress(String::new()))?;
        let hex = addr_token
            .strip_prefix("0x")
            .or_else(|| addr_token.strip_prefix("0X"))
            .ok_or_else(|| TraceError::MissingHexPrefix(addr_token.to_string()))?;
        let addr = u64::from_str_radix(hex, 16)
            .map_err(|_| TraceError::BadAddress(addr_token.to_string()))?;

        if let Some(extra) = tokens.next() {
            return Err(TraceError::TrailingInput(extra.to_string()));
        }

        Ok(Self { op, addr })
    }
}

/// Iterator over the well-formed records of a trace.
///
/// Malformed lines are logged at `debug` level and skipped; I/O errors are
/// yielded to the caller.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: io::Lines<R>,
    line_no: usize,
    skipped: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Number of non-blank lines skipped so far.
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = io::Result<TraceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<TraceRecord>() {
                Ok(record) => return Some(Ok(record)),
                Err(e) => {
                    self.skipped += 1;
                    debug!(line = self.line_no, error = %e, "skipping malformed trace line");
                }
            }
        }
    }
}

/// Parses a whole in-memory trace, skipping malformed lines.
pub fn parse_trace(text: &str) -> Vec<TraceRecord> {
    text.lines().filter_map(|line| line.parse().ok()).collect()
}
