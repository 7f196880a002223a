//! Faction roll-up view-models.

use serde::{Deserialize, Serialize};

use crate::calculate::{compute_kd_ratio, compute_score};

/// Name plus the single statistic it was picked by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEntry {
    pub name: String,
    pub value: i64,
}

/// Roll-up over the player records of one faction (or all of them).
///
/// `top_killer` / `top_scorer` are unset for an empty input set; an empty
/// set is a zero-valued aggregate, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactionAggregate {
    /// Count of records after filtering; grouped rows count once
    pub player_count: u32,

    pub total_kills: u32,
    pub total_deaths: u32,
    pub total_blessings: u32,

    /// Score of the summed counters (identical to the sum of per-record
    /// scores, the formula being linear)
    pub total_score: i64,

    /// KD ratio of the summed counters
    pub kd_ratio: f64,

    /// Record with the most kills; first occurrence wins ties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_killer: Option<TopEntry>,

    /// Record with the highest score; first occurrence wins ties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_scorer: Option<TopEntry>,
}

impl FactionAggregate {
    /// Build the aggregate from already-summed counters.
    pub fn from_totals(
        player_count: u32,
        total_kills: u32,
        total_deaths: u32,
        total_blessings: u32,
    ) -> Self {
        Self {
            player_count,
            total_kills,
            total_deaths,
            total_blessings,
            total_score: compute_score(total_kills, total_deaths, total_blessings),
            kd_ratio: compute_kd_ratio(total_kills, total_deaths),
            top_killer: None,
            top_scorer: None,
        }
    }
}
