//! Rank-band level classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cosmetic tier label derived from a 1-based leaderboard rank.
///
/// Band widths are fixed and non-uniform, taken from the original ranking
/// page. The page subdivided some bands further (2–3 vs 4–6 and so on) but
/// mapped them to the same label, so only the visible boundaries survive
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Monarch,
    Avatar,
    Brahmin,
    Kshatriya,
    Unranked,
}

impl Level {
    /// Classify a rank into its level band.
    ///
    /// Total over all inputs: rank 0 (or anything past the last band)
    /// classifies as `Unranked` rather than erroring, since this sits on a
    /// display path.
    pub fn from_rank(rank: u32) -> Self {
        match rank {
            1..=6 => Level::Monarch,
            7..=28 => Level::Avatar,
            29..=88 => Level::Brahmin,
            89..=248 => Level::Kshatriya,
            _ => Level::Unranked,
        }
    }

    /// Classify an optional rank; `None` is unranked.
    pub fn from_rank_opt(rank: Option<u32>) -> Self {
        rank.map_or(Level::Unranked, Level::from_rank)
    }

    /// Chinese label as shown by the legacy client.
    pub fn zh_label(&self) -> &'static str {
        match self {
            Level::Monarch => "君主",
            Level::Avatar => "化身",
            Level::Brahmin => "婆罗门",
            Level::Kshatriya => "刹帝利",
            Level::Unranked => "未知",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Monarch => "Monarch",
            Level::Avatar => "Avatar",
            Level::Brahmin => "Brahmin",
            Level::Kshatriya => "Kshatriya",
            Level::Unranked => "Unranked",
        };
        write!(f, "{}", s)
    }
}
