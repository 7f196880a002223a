//! Roster models: persons and player groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, GroupId, PersonId};

/// A roster entry mapping a game name to faction, job and optional group.
///
/// Battle logs only carry names; faction and job attribution at query time
/// comes from this roster. Names not on the roster are ignored by the
/// ranking queries, same as the original server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Deterministic ID derived from the name
    pub id: PersonId,

    /// Game name (unique on the roster)
    pub name: String,

    /// Faction string (one of the three canonical gods, usually)
    pub faction: String,

    /// Free-text role/class label
    pub job: String,

    /// Group this alias belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    /// When this entry was created
    pub created_at: DateTime<Utc>,
}

impl Person {
    /// Create a roster entry with an auto-generated ID.
    pub fn new(name: String, faction: String, job: String) -> Self {
        let id = EntityId::generate(&["person", &name]);
        Self {
            id,
            name,
            faction,
            job,
            group_name: None,
            created_at: Utc::now(),
        }
    }

    /// Builder method to assign a group.
    pub fn with_group(mut self, group_name: String) -> Self {
        self.group_name = Some(group_name);
        self
    }
}

/// Resolve re-appended roster edits: the last entry for a name wins, kept
/// at the name's first position.
pub fn dedup_roster(persons: Vec<Person>) -> Vec<Person> {
    let mut slot_by_name: std::collections::HashMap<String, usize> =
        std::collections::HashMap::new();
    let mut result: Vec<Person> = Vec::new();
    for p in persons {
        match slot_by_name.get(&p.name) {
            Some(&slot) => result[slot] = p,
            None => {
                slot_by_name.insert(p.name.clone(), result.len());
                result.push(p);
            }
        }
    }
    result
}

/// A named collection of player aliases, shown as one row in grouped view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerGroup {
    /// Deterministic ID derived from the group name
    pub id: GroupId,

    /// Group display name (doubles as the raw group key on persons)
    pub name: String,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When this group was created
    pub created_at: DateTime<Utc>,
}

impl PlayerGroup {
    /// Create a group with an auto-generated ID.
    pub fn new(name: String, description: Option<String>) -> Self {
        let id = EntityId::generate(&["group", &name]);
        Self {
            id,
            name,
            description,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_id_deterministic() {
        let a = Person::new("白素贞".into(), "梵天".into(), "法师".into());
        let b = Person::new("白素贞".into(), "湿婆".into(), "刺客".into());
        // Faction/job are mutable attributes, not identity
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_person_with_group() {
        let p = Person::new("小青".into(), "梵天".into(), "刺客".into())
            .with_group("夜袭小队".into());
        assert_eq!(p.group_name, Some("夜袭小队".to_string()));
    }

    #[test]
    fn test_group_creation() {
        let g = PlayerGroup::new("夜袭小队".into(), Some("同一个人的小号".into()));
        assert_eq!(g.name, "夜袭小队");
        assert!(g.description.is_some());

        let g2 = PlayerGroup::new("夜袭小队".into(), None);
        assert_eq!(g.id, g2.id);
    }

    #[test]
    fn test_dedup_roster_last_entry_wins() {
        let persons = vec![
            Person::new("白素贞".into(), "梵天".into(), "法师".into()),
            Person::new("小青".into(), "梵天".into(), "刺客".into()),
            Person::new("白素贞".into(), "湿婆".into(), "金刚".into()),
        ];
        let deduped = dedup_roster(persons);

        assert_eq!(deduped.len(), 2);
        // Edited entry keeps its original roster position
        assert_eq!(deduped[0].name, "白素贞");
        assert_eq!(deduped[0].faction, "湿婆");
        assert_eq!(deduped[0].job, "金刚");
        assert_eq!(deduped[1].name, "小青");
    }

    #[test]
    fn test_person_serialization_without_group() {
        let p = Person::new("许仙".into(), "比湿奴".into(), "奶".into());
        let json = serde_json::to_string(&p).unwrap();
        // Absent group is omitted entirely, not null
        assert!(!json.contains("group_name"));
        let parsed: Person = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.group_name, None);
    }
}
