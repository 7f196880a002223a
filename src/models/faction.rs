//! The three canonical factions (gods).
//!
//! The upstream game names them in Chinese (梵天 / 比湿奴 / 湿婆); the legacy
//! ranking page additionally identifies them by a numeric god index (1, 2, 4
//! — index 3 was never assigned). Records keep faction as a plain string;
//! this enum is the canonical key used for filtering and roll-ups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three mutually exclusive teams a player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Brahma,
    Vishnu,
    Shiva,
}

impl Faction {
    /// All factions, in the display order the original dashboard used.
    pub const ALL: [Faction; 3] = [Faction::Brahma, Faction::Vishnu, Faction::Shiva];

    /// Parse a faction from any of its known spellings.
    ///
    /// Accepts the English name (any case), the Chinese name, and the
    /// legacy numeric god index. Returns `None` for anything else so
    /// callers can fall back to raw string comparison.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "梵天" | "1" => Some(Faction::Brahma),
            "比湿奴" | "2" => Some(Faction::Vishnu),
            "湿婆" | "4" => Some(Faction::Shiva),
            other => match other.to_ascii_lowercase().as_str() {
                "brahma" => Some(Faction::Brahma),
                "vishnu" => Some(Faction::Vishnu),
                "shiva" => Some(Faction::Shiva),
                _ => None,
            },
        }
    }

    /// Canonical English name.
    pub fn name(&self) -> &'static str {
        match self {
            Faction::Brahma => "Brahma",
            Faction::Vishnu => "Vishnu",
            Faction::Shiva => "Shiva",
        }
    }

    /// Chinese name as it appears in game data.
    pub fn zh_name(&self) -> &'static str {
        match self {
            Faction::Brahma => "梵天",
            Faction::Vishnu => "比湿奴",
            Faction::Shiva => "湿婆",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Compare a record's faction string against a filter key.
///
/// Both sides are parsed to the canonical enum when possible; unparseable
/// strings fall back to a case-insensitive comparison. Total: a malformed
/// faction simply never matches a canonical key.
pub fn faction_matches(record_faction: &str, key: &str) -> bool {
    match (Faction::parse(record_faction), Faction::parse(key)) {
        (Some(a), Some(b)) => a == b,
        _ => record_faction.trim().eq_ignore_ascii_case(key.trim()),
    }
}
