//! Interactive placement entry, used when no leaderboard file exists.
//!
//! Ranks are asked for from last place up to first. Typing `END` as a winner
//! name, or closing input, stops collection early.

use std::io::{self, BufRead, Write};

use leaderboard::{CardRecord, Roster, ordinal};

const END_SENTINEL: &str = "END";

pub struct PromptSession<'a, R, W> {
    input: R,
    output: W,
    roster: &'a Roster,
}

impl<'a, R: BufRead, W: Write> PromptSession<'a, R, W> {
    pub fn new(input: R, output: W, roster: &'a Roster) -> Self {
        Self {
            input,
            output,
            roster,
        }
    }

    /// Collect placements for ranks `max_rank` down to 1.
    pub fn collect(&mut self, max_rank: u32) -> io::Result<Vec<CardRecord>> {
        let mut records = Vec::new();
        for rank in (1..=max_rank).rev() {
            match self.collect_rank(rank)? {
                Some(record) => records.push(record),
                None => {
                    tracing::info!(rank, "Placement entry ended");
                    break;
                }
            }
        }
        Ok(records)
    }

    fn collect_rank(&mut self, rank: u32) -> io::Result<Option<CardRecord>> {
        let winner_name = loop {
            let prompt = format!(
                "Enter the {} place winner's name (or type '{END_SENTINEL}' to exit): ",
                ordinal(rank)
            );
            let Some(name) = self.ask(&prompt)? else {
                return Ok(None);
            };
            if name.eq_ignore_ascii_case(END_SENTINEL) {
                return Ok(None);
            }
            if !name.is_empty() {
                break name;
            }
        };

        let Some(character1) = self.ask_character(1)? else {
            return Ok(None);
        };
        let roster = self.roster;
        let rules = roster.rules();
        let character2 = if rules.is_reserved(&character1) {
            rules.blank.clone()
        } else {
            match self.ask_character(2)? {
                Some(id) => id,
                None => return Ok(None),
            }
        };

        Ok(Some(CardRecord {
            winner_name,
            character1,
            character2,
            rank,
        }))
    }

    /// Ask until a known character is entered. Names are lowercased.
    fn ask_character(&mut self, slot: u8) -> io::Result<Option<String>> {
        let prompt = format!(
            "Name of Character {slot} (Choose from: {}): ",
            self.roster.characters().join(", ")
        );
        loop {
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(None);
            };
            let id = answer.to_lowercase();
            match self.roster.validate(&id) {
                Ok(()) => return Ok(Some(id)),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard::SoloRules;

    fn roster() -> Roster {
        Roster::new(["goku", "vegeta", "ptx", "blank"], SoloRules::default())
    }

    fn run(input: &str, max_rank: u32) -> (Vec<CardRecord>, String) {
        let roster = roster();
        let mut output = Vec::new();
        let records = PromptSession::new(input.as_bytes(), &mut output, &roster)
            .collect(max_rank)
            .unwrap();
        (records, String::from_utf8(output).unwrap())
    }

    #[test]
    fn ranks_count_down() {
        let (records, output) = run("Alice\ngoku\nvegeta\nBob\nGOKU\nGoku\n", 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rank, 2);
        assert_eq!(records[0].winner_name, "Alice");
        assert_eq!(records[1].rank, 1);
        assert_eq!(records[1].character1, "goku");
        assert_eq!(records[1].character2, "goku");
        assert!(output.contains("Enter the 2nd place winner's name"));
        assert!(output.contains("Enter the 1st place winner's name"));
    }

    #[test]
    fn end_stops_collection() {
        let (records, _) = run("Alice\ngoku\nvegeta\nend\nBob\n", 8);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rank, 8);
    }

    #[test]
    fn reserved_character_skips_second_prompt() {
        let (records, output) = run("Alice\nptx\n", 1);
        assert_eq!(records[0].character1, "ptx");
        assert_eq!(records[0].character2, "blank");
        assert!(!output.contains("Name of Character 2"));
    }

    #[test]
    fn unknown_character_is_asked_again() {
        let (records, output) = run("Alice\nbroly\ngoku\nvegeta\n", 1);
        assert_eq!(records[0].character1, "goku");
        assert!(output.contains("Unknown character 'broly'"));
    }

    #[test]
    fn end_of_input_keeps_completed_ranks() {
        let (records, _) = run("Alice\ngoku\nvegeta\nBob\ngoku\n", 8);
        assert_eq!(records.len(), 1);
    }
}
