//! Tournament leaderboard input.
//!
//! Parses `winner, character1, character2` lines into card records, checks
//! character identifiers against the scanned portrait roster and decides
//! whether a record uses the paired or the solo portrait layout.

pub mod parse;
pub mod roster;

use std::fmt;

// Re-exports for convenience
pub use parse::{MalformedEntry, MalformedReason, parse_leaderboard, parse_line};
pub use roster::{PortraitSelection, Roster, SoloRules};

/// One placement on the leaderboard, consumed once by the card composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub winner_name: String,
    pub character1: String,
    pub character2: String,
    /// 1-based placement.
    pub rank: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("Malformed leaderboard entries:\n{}", MalformedList(.0))]
    Malformed(Vec<MalformedEntry>),

    #[error("Unknown character '{name}' (choose from: {})", .valid.join(", "))]
    InvalidCharacter { name: String, valid: Vec<String> },
}

struct MalformedList<'a>(&'a [MalformedEntry]);

impl fmt::Display for MalformedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {entry}")?;
        }
        Ok(())
    }
}

/// English ordinal: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`, ...
pub fn ordinal(n: u32) -> String {
    let suffix = if (10..=20).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (8, "8th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (102, "102nd"),
            (111, "111th"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected);
        }
    }

    #[test]
    fn invalid_character_lists_valid_names() {
        let err = LeaderboardError::InvalidCharacter {
            name: "gokku".into(),
            valid: vec!["goku".into(), "vegeta".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown character 'gokku' (choose from: goku, vegeta)"
        );
    }
}
