//! Route handlers.

pub mod battles;
pub mod dashboard;
pub mod factions;
pub mod rankings;
pub mod roster;

use chrono::Utc;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::ingest::build_player_records;
use crate::models::{
    dedup_roster, parse_client_datetime, BattleRecord, BlessingRecord, Person, PlayerRecord,
    TimeWindow,
};
use crate::storage::{dedup_by_id, EntityType, JsonlReader};

/// Read stored kill events, deduplicated by ID.
pub(crate) fn read_kills(state: &AppState) -> Result<Vec<BattleRecord>, ApiError> {
    let reader = JsonlReader::<BattleRecord>::for_entity(&state.storage, EntityType::BattleRecord);
    let kills = reader
        .read_all()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(dedup_by_id(kills, |k| k.id.as_str()))
}

/// Read stored blessing events, deduplicated by ID.
pub(crate) fn read_blessings(state: &AppState) -> Result<Vec<BlessingRecord>, ApiError> {
    let reader =
        JsonlReader::<BlessingRecord>::for_entity(&state.storage, EntityType::BlessingRecord);
    let blessings = reader
        .read_all()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(dedup_by_id(blessings, |b| b.id.as_str()))
}

/// Read the roster. Edits re-append, so the last entry for a name wins.
pub(crate) fn read_roster(state: &AppState) -> Result<Vec<Person>, ApiError> {
    let reader = JsonlReader::<Person>::for_entity(&state.storage, EntityType::Person);
    let persons = reader
        .read_all()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(dedup_roster(persons))
}

/// Resolve query-time filters into a [`TimeWindow`].
///
/// Explicit `start`/`end` datetimes win over the keyword; a malformed
/// datetime or unknown keyword is a bad request. The keyword defaults to
/// `today`, matching the original ranking screens.
pub(crate) fn resolve_window(
    time_range: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<TimeWindow, ApiError> {
    if start.is_some() || end.is_some() {
        let parse = |s: Option<&str>, which: &str| match s {
            None => Ok(None),
            Some(raw) => parse_client_datetime(raw).map(Some).ok_or_else(|| {
                ApiError::BadRequest(format!(
                    "Invalid {} datetime (expected YYYY-MM-DDTHH:MM): {}",
                    which, raw
                ))
            }),
        };
        return Ok(TimeWindow::new(
            parse(start, "start")?,
            parse(end, "end")?,
        ));
    }

    let keyword = time_range.unwrap_or("today");
    TimeWindow::from_keyword(keyword, Utc::now().naive_utc())
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown time_range: {}", keyword)))
}

/// Load everything needed to build ranked player records for a window.
pub(crate) fn load_player_records(
    state: &AppState,
    window: &TimeWindow,
) -> Result<Vec<PlayerRecord>, ApiError> {
    let kills = read_kills(state)?;
    let blessings = read_blessings(state)?;
    let roster = read_roster(state)?;
    Ok(build_player_records(&kills, &blessings, &roster, window))
}
