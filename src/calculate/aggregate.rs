//! Faction roll-ups and grouped-view collapsing.

use std::collections::HashMap;

use crate::models::{faction_matches, FactionAggregate, PlayerRecord, TopEntry};

/// Roll up player records for one faction, or all records when no key is
/// given.
///
/// Each record counts once; grouped rows are opaque single entries here.
/// Top picks use a strict comparison, so the first record encountered wins
/// ties. An empty filtered set yields the zero aggregate with both picks
/// unset.
pub fn aggregate_by_faction(records: &[PlayerRecord], faction: Option<&str>) -> FactionAggregate {
    let filtered: Vec<&PlayerRecord> = records
        .iter()
        .filter(|r| match faction {
            Some(key) => faction_matches(&r.faction, key),
            None => true,
        })
        .collect();

    let mut agg = FactionAggregate::from_totals(
        filtered.len() as u32,
        filtered.iter().map(|r| r.kills).sum(),
        filtered.iter().map(|r| r.deaths).sum(),
        filtered.iter().map(|r| r.blessings).sum(),
    );

    let mut top_killer: Option<&PlayerRecord> = None;
    let mut top_scorer: Option<&PlayerRecord> = None;
    for record in &filtered {
        if top_killer.map_or(true, |best| record.kills > best.kills) {
            top_killer = Some(record);
        }
        if top_scorer.map_or(true, |best| record.score > best.score) {
            top_scorer = Some(record);
        }
    }

    agg.top_killer = top_killer.map(|r| TopEntry {
        name: r.name.clone(),
        value: r.kills as i64,
    });
    agg.top_scorer = top_scorer.map(|r| TopEntry {
        name: r.name.clone(),
        value: r.score,
    });

    agg
}

/// Collapse records sharing a raw group key into one display entry.
///
/// Merged entries take the group name as their display name, sum the three
/// counters, recompute derived fields, and keep the first member's faction
/// and job. The group key is cleared and `is_group` set on the result, so a
/// second pass finds nothing left to merge. Ungrouped records pass through
/// unchanged; output preserves first-encounter order.
pub fn collapse_groups(records: Vec<PlayerRecord>) -> Vec<PlayerRecord> {
    let mut out: Vec<PlayerRecord> = Vec::with_capacity(records.len());
    let mut slot_by_group: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(group) = record.group_name.clone() else {
            out.push(record);
            continue;
        };

        match slot_by_group.get(&group) {
            Some(&slot) => {
                let merged = &mut out[slot];
                merged.kills += record.kills;
                merged.deaths += record.deaths;
                merged.blessings += record.blessings;
                merged.recompute_derived();
            }
            None => {
                let mut merged = record;
                merged.name = group.clone();
                merged.is_group = true;
                merged.group_name = None;
                merged.rank = None;
                merged.level = crate::models::Level::Unranked;
                slot_by_group.insert(group, out.len());
                out.push(merged);
            }
        }
    }

    out
}
