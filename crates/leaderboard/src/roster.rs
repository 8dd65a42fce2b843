//! Character roster and portrait selection.

use crate::{CardRecord, LeaderboardError};

/// Characters that fill both portrait slots on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoloRules {
    pub reserved: Vec<String>,
    /// Placeholder identifier meaning "no second character".
    pub blank: String,
}

impl Default for SoloRules {
    fn default() -> Self {
        Self {
            reserved: vec!["ptx".to_string(), "gold".to_string()],
            blank: "blank".to_string(),
        }
    }
}

impl SoloRules {
    pub fn is_reserved(&self, id: &str) -> bool {
        self.reserved.iter().any(|r| r == id)
    }

    pub fn is_blank(&self, id: &str) -> bool {
        self.blank == id
    }
}

/// Which portraits a card shows, by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortraitSelection {
    /// `right` is drawn over `left`.
    Paired { left: String, right: String },
    Solo(String),
}

/// The set of character identifiers that have a portrait on disk.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    characters: Vec<String>,
    rules: SoloRules,
}

impl Roster {
    pub fn new<I, S>(characters: I, rules: SoloRules) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut characters: Vec<String> = characters.into_iter().map(Into::into).collect();
        characters.sort();
        characters.dedup();
        Self { characters, rules }
    }

    /// Sorted identifiers.
    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn rules(&self) -> &SoloRules {
        &self.rules
    }

    pub fn contains(&self, id: &str) -> bool {
        self.characters.binary_search_by(|c| c.as_str().cmp(id)).is_ok()
    }

    pub fn validate(&self, id: &str) -> Result<(), LeaderboardError> {
        if self.contains(id) {
            return Ok(());
        }
        Err(LeaderboardError::InvalidCharacter {
            name: id.to_string(),
            valid: self.characters.clone(),
        })
    }

    /// Decide the portrait layout for a record.
    ///
    /// A reserved character paired with the blank placeholder, or with
    /// itself, is shown solo. Otherwise `character2` takes the left slot and
    /// `character1` is drawn over it on the right.
    pub fn resolve(&self, record: &CardRecord) -> Result<PortraitSelection, LeaderboardError> {
        let (first, second) = (record.character1.as_str(), record.character2.as_str());

        let solo = if self.rules.is_reserved(first)
            && (self.rules.is_blank(second) || second == first)
        {
            Some(first)
        } else if self.rules.is_reserved(second) && self.rules.is_blank(first) {
            Some(second)
        } else {
            None
        };

        if let Some(id) = solo {
            self.validate(id)?;
            tracing::debug!(rank = record.rank, character = id, "Solo portrait layout");
            return Ok(PortraitSelection::Solo(id.to_string()));
        }

        self.validate(first)?;
        self.validate(second)?;
        Ok(PortraitSelection::Paired {
            left: second.to_string(),
            right: first.to_string(),
        })
    }

    /// Resolve every record, failing on the first unknown identifier.
    pub fn resolve_all(
        &self,
        records: &[CardRecord],
    ) -> Result<Vec<PortraitSelection>, LeaderboardError> {
        records.iter().map(|r| self.resolve(r)).collect()
    }
}
