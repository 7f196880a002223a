//! Ranked player view-model.

use serde::{Deserialize, Serialize};

use super::Level;
use crate::calculate::{compute_kd_ratio, compute_score};

/// One player's battle statistics for a query window.
///
/// Ephemeral: rebuilt from stored events on every query, never persisted.
/// `score` and `kd_ratio` are always recomputable from the three counters
/// and carry no independent state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player name (unique within a query window, not globally)
    pub name: String,

    /// Faction string as stored on the roster; canonicalised at filter time
    pub faction: String,

    /// Free-text role/class label
    pub job: String,

    pub kills: u32,
    pub deaths: u32,
    pub blessings: u32,

    /// Derived: kills*3 + blessings - deaths. May be negative.
    pub score: i64,

    /// Derived: kills/deaths rounded to 2 decimals; kills when deaths == 0
    pub kd_ratio: f64,

    /// 1-based leaderboard position, assigned after sorting
    pub rank: Option<u32>,

    /// Tier label derived from rank
    pub level: Level,

    /// True once this record represents a collapsed group row
    #[serde(default)]
    pub is_group: bool,

    /// Raw group key from the roster; cleared when the record is collapsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

impl PlayerRecord {
    /// Create a record with derived fields computed and no rank assigned.
    pub fn new(
        name: String,
        faction: String,
        job: String,
        kills: u32,
        deaths: u32,
        blessings: u32,
    ) -> Self {
        Self {
            name,
            faction,
            job,
            kills,
            deaths,
            blessings,
            score: compute_score(kills, deaths, blessings),
            kd_ratio: compute_kd_ratio(kills, deaths),
            rank: None,
            level: Level::Unranked,
            is_group: false,
            group_name: None,
        }
    }

    /// Builder method to attach a roster group key.
    pub fn with_group(mut self, group_name: Option<String>) -> Self {
        self.group_name = group_name;
        self
    }

    /// Recompute `score` and `kd_ratio` after the counters changed.
    pub fn recompute_derived(&mut self) {
        self.score = compute_score(self.kills, self.deaths, self.blessings);
        self.kd_ratio = compute_kd_ratio(self.kills, self.deaths);
    }

    /// Assign a 1-based rank and the level that falls out of it.
    pub fn assign_rank(&mut self, rank: u32) {
        self.rank = Some(rank);
        self.level = Level::from_rank(rank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_derived_fields() {
        let p = PlayerRecord::new(
            "白素贞".to_string(),
            "梵天".to_string(),
            "法师".to_string(),
            10,
            4,
            2,
        );
        assert_eq!(p.score, 28); // 10*3 + 2 - 4
        assert!((p.kd_ratio - 2.5).abs() < f64::EPSILON);
        assert_eq!(p.rank, None);
        assert_eq!(p.level, Level::Unranked);
    }

    #[test]
    fn test_negative_score() {
        let p = PlayerRecord::new(
            "p".to_string(),
            "湿婆".to_string(),
            "刺客".to_string(),
            0,
            5,
            0,
        );
        assert_eq!(p.score, -5);
    }

    #[test]
    fn test_assign_rank_sets_level() {
        let mut p = PlayerRecord::new(
            "p".to_string(),
            "梵天".to_string(),
            "弓".to_string(),
            3,
            1,
            0,
        );
        p.assign_rank(5);
        assert_eq!(p.rank, Some(5));
        assert_eq!(p.level, Level::Monarch);

        p.assign_rank(300);
        assert_eq!(p.level, Level::Unranked);
    }

    #[test]
    fn test_recompute_after_merge() {
        let mut p = PlayerRecord::new(
            "p".to_string(),
            "梵天".to_string(),
            "奶".to_string(),
            3,
            0,
            1,
        );
        p.kills += 4;
        p.deaths += 2;
        p.recompute_derived();
        assert_eq!(p.score, 7 * 3 + 1 - 2);
        assert!((p.kd_ratio - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let p = PlayerRecord::new(
            "p".to_string(),
            "比湿奴".to_string(),
            "金刚".to_string(),
            1,
            2,
            3,
        )
        .with_group(Some("夜袭小队".to_string()));

        let json = serde_json::to_string(&p).unwrap();
        let parsed: PlayerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, p.name);
        assert_eq!(parsed.score, p.score);
        assert_eq!(parsed.group_name, Some("夜袭小队".to_string()));
        assert!(!parsed.is_group);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        // Older stored snapshots have no is_group / group_name fields
        let json = r#"{"name":"p","faction":"梵天","job":"狂","kills":1,
            "deaths":0,"blessings":0,"score":3,"kd_ratio":1.0,
            "rank":null,"level":"Unranked"}"#;
        let parsed: PlayerRecord = serde_json::from_str(json).unwrap();
        assert!(!parsed.is_group);
        assert_eq!(parsed.group_name, None);
    }
}
