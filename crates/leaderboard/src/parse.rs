//! Leaderboard file parsing.
//!
//! One entry per line, `winner_name, character1, character2`. Line order is
//! rank order. Blank lines are skipped and do not take a rank.

use std::fmt;

use crate::{CardRecord, LeaderboardError};

const FIELD_COUNT: usize = 3;

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    FieldCount(usize),
    EmptyField(&'static str),
}

/// A rejected leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry {
    /// 1-based line number in the file.
    pub line: usize,
    pub content: String,
    pub reason: MalformedReason,
}

impl fmt::Display for MalformedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            MalformedReason::FieldCount(found) => write!(
                f,
                "line {}: expected {FIELD_COUNT} comma-separated fields, found {found}: '{}'",
                self.line, self.content
            ),
            MalformedReason::EmptyField(field) => {
                write!(f, "line {}: {field} is empty: '{}'", self.line, self.content)
            }
        }
    }
}

/// Parse a single `winner, character1, character2` line.
pub fn parse_line(line: &str, line_no: usize, rank: u32) -> Result<CardRecord, MalformedEntry> {
    let malformed = |reason| MalformedEntry {
        line: line_no,
        content: line.trim().to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [winner, first, second] = fields.as_slice() else {
        return Err(malformed(MalformedReason::FieldCount(fields.len())));
    };

    for (value, name) in [
        (winner, "winner name"),
        (first, "character 1"),
        (second, "character 2"),
    ] {
        if value.is_empty() {
            return Err(malformed(MalformedReason::EmptyField(name)));
        }
    }

    Ok(CardRecord {
        winner_name: winner.to_string(),
        character1: first.to_string(),
        character2: second.to_string(),
        rank,
    })
}

/// Parse a whole leaderboard file.
///
/// Every malformed line is reported, not just the first.
pub fn parse_leaderboard(content: &str) -> Result<Vec<CardRecord>, LeaderboardError> {
    let mut records = Vec::new();
    let mut malformed = Vec::new();
    let mut rank = 0u32;

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        rank += 1;
        match parse_line(line, idx + 1, rank) {
            Ok(record) => records.push(record),
            Err(entry) => {
                tracing::warn!(line = entry.line, "{entry}");
                malformed.push(entry);
            }
        }
    }

    if !malformed.is_empty() {
        return Err(LeaderboardError::Malformed(malformed));
    }

    tracing::debug!(count = records.len(), "Parsed leaderboard");
    Ok(records)
}
