//! Stored battle events.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{BattleRecordId, BlessingRecordId, EntityId};

/// A single kill event parsed from a battle log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleRecord {
    /// Deterministic ID (killer + victim + timestamp)
    pub id: BattleRecordId,

    /// Name of the killing player
    pub killer: String,

    /// Name of the killed player
    pub victim: String,

    /// Map coordinates where the kill happened
    pub x: u32,
    pub y: u32,

    /// Event time as written in the log (server-local, no zone)
    pub occurred_at: NaiveDateTime,
}

impl BattleRecord {
    /// Create a record with an auto-generated deterministic ID.
    pub fn new(killer: String, victim: String, x: u32, y: u32, occurred_at: NaiveDateTime) -> Self {
        let ts = occurred_at.format("%Y%m%d,%H:%M:%S").to_string();
        let id = EntityId::generate(&["kill", &killer, &victim, &ts]);
        Self {
            id,
            killer,
            victim,
            x,
            y,
            occurred_at,
        }
    }
}

/// A blessing event parsed from a battle log announcement line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlessingRecord {
    /// Deterministic ID (player + blessing + timestamp)
    pub id: BlessingRecordId,

    /// Name of the blessed player
    pub player: String,

    /// Blessing name as announced (free text)
    pub blessing: String,

    /// Event time as written in the log
    pub occurred_at: NaiveDateTime,
}

impl BlessingRecord {
    /// Create a record with an auto-generated deterministic ID.
    pub fn new(player: String, blessing: String, occurred_at: NaiveDateTime) -> Self {
        let ts = occurred_at.format("%Y%m%d,%H:%M:%S").to_string();
        let id = EntityId::generate(&["bless", &player, &blessing, &ts]);
        Self {
            id,
            player,
            blessing,
            occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 4)
            .unwrap()
            .and_hms_opt(21, 3, 17)
            .unwrap()
    }

    #[test]
    fn test_battle_record_id_deterministic() {
        let a = BattleRecord::new("白素贞".into(), "将臣".into(), 120, 88, ts());
        let b = BattleRecord::new("白素贞".into(), "将臣".into(), 120, 88, ts());
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_battle_record_id_direction_matters() {
        let a = BattleRecord::new("白素贞".into(), "将臣".into(), 120, 88, ts());
        let b = BattleRecord::new("将臣".into(), "白素贞".into(), 120, 88, ts());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blessing_record_id_deterministic() {
        let a = BlessingRecord::new("白素贞".into(), "湿婆祝福".into(), ts());
        let b = BlessingRecord::new("白素贞".into(), "湿婆祝福".into(), ts());
        assert_eq!(a.id, b.id);
        let c = BlessingRecord::new("白素贞".into(), "梵天祝福".into(), ts());
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let record = BattleRecord::new("a".into(), "b".into(), 1, 2, ts());
        let json = serde_json::to_string(&record).unwrap();
        let parsed: BattleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.occurred_at, record.occurred_at);
    }
}
