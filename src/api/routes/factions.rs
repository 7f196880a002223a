//! Per-faction roll-up endpoint (the "three gods" statistics).

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{aggregate_by_faction, collapse_groups};
use crate::models::{faction_matches, Faction, FactionAggregate, PlayerRecord};

use super::{load_player_records, resolve_window};

#[derive(Debug, Deserialize)]
pub struct FactionStatsParams {
    pub time_range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub show_grouped: bool,
}

#[derive(Debug, Serialize)]
pub struct FactionBlock {
    pub faction: String,
    pub faction_zh: String,
    pub aggregate: FactionAggregate,
    /// Faction members sorted by kills desc, deaths asc (display order)
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Serialize)]
pub struct FactionStatsResponse {
    pub factions: Vec<FactionBlock>,
    pub show_grouped: bool,
}

pub async fn faction_stats(
    State(state): State<AppState>,
    Query(params): Query<FactionStatsParams>,
) -> Result<Json<FactionStatsResponse>, ApiError> {
    let window = resolve_window(
        params.time_range.as_deref(),
        params.start.as_deref(),
        params.end.as_deref(),
    )?;

    let mut records = load_player_records(&state, &window)?;
    if params.show_grouped {
        records = collapse_groups(records);
    }

    let mut factions = Vec::with_capacity(Faction::ALL.len());
    for faction in Faction::ALL {
        let aggregate = aggregate_by_faction(&records, Some(faction.name()));

        let mut players: Vec<PlayerRecord> = records
            .iter()
            .filter(|r| faction_matches(&r.faction, faction.name()))
            .cloned()
            .collect();
        players.sort_by(|a, b| b.kills.cmp(&a.kills).then(a.deaths.cmp(&b.deaths)));

        factions.push(FactionBlock {
            faction: faction.name().to_string(),
            faction_zh: faction.zh_name().to_string(),
            aggregate,
            players,
        });
    }

    Ok(Json(FactionStatsResponse {
        factions,
        show_grouped: params.show_grouped,
    }))
}
