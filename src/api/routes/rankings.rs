//! Player ranking endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{assign_ranks, collapse_groups};
use crate::models::{faction_matches, PlayerRecord};

use super::{load_player_records, resolve_window};

#[derive(Debug, Deserialize)]
pub struct RankingsParams {
    pub faction: Option<String>,
    pub job: Option<String>,
    pub time_range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub show_grouped: bool,
}

#[derive(Debug, Serialize)]
pub struct RankingsResponse {
    pub players: Vec<PlayerRecord>,
    pub total: usize,
}

pub async fn rankings(
    State(state): State<AppState>,
    Query(params): Query<RankingsParams>,
) -> Result<Json<RankingsResponse>, ApiError> {
    let window = resolve_window(
        params.time_range.as_deref(),
        params.start.as_deref(),
        params.end.as_deref(),
    )?;

    let mut records = load_player_records(&state, &window)?;

    if let Some(faction) = params.faction.as_deref() {
        records.retain(|r| faction_matches(&r.faction, faction));
    }
    if let Some(job) = params.job.as_deref() {
        records.retain(|r| r.job == job);
    }

    if params.show_grouped {
        records = collapse_groups(records);
    }

    assign_ranks(&mut records);

    let total = records.len();
    Ok(Json(RankingsResponse {
        players: records,
        total,
    }))
}
