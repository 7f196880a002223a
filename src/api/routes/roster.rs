//! Roster endpoints: persons and player groups.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Person, PlayerGroup};
use crate::storage::{dedup_by_id, EntityType, JsonlReader, JsonlWriter};

use super::read_roster;

#[derive(Debug, Serialize)]
pub struct PersonsResponse {
    pub persons: Vec<Person>,
    pub total: usize,
}

pub async fn list_persons(
    State(state): State<AppState>,
) -> Result<Json<PersonsResponse>, ApiError> {
    let persons = read_roster(&state)?;
    let total = persons.len();
    Ok(Json(PersonsResponse { persons, total }))
}

#[derive(Debug, Deserialize)]
pub struct CreatePersonRequest {
    pub name: String,
    pub faction: String,
    pub job: String,
    pub group_name: Option<String>,
}

pub async fn create_person(
    State(state): State<AppState>,
    Json(req): Json<CreatePersonRequest>,
) -> Result<Json<Person>, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Person name must not be empty".to_string()));
    }

    let existing = read_roster(&state)?;
    if existing.iter().any(|p| p.name == name) {
        return Err(ApiError::BadRequest(format!(
            "Person already on the roster: {}",
            name
        )));
    }

    let mut person = Person::new(name.to_string(), req.faction.trim().to_string(), req.job);
    person.group_name = req.group_name.filter(|g| !g.trim().is_empty());

    JsonlWriter::for_entity(&state.storage, EntityType::Person)
        .append(&person)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!("Added roster person: {}", person.name);
    Ok(Json(person))
}

#[derive(Debug, Serialize)]
pub struct GroupsResponse {
    pub groups: Vec<PlayerGroup>,
    pub total: usize,
}

pub async fn list_groups(State(state): State<AppState>) -> Result<Json<GroupsResponse>, ApiError> {
    let reader = JsonlReader::<PlayerGroup>::for_entity(&state.storage, EntityType::PlayerGroup);
    let groups = reader
        .read_all()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let groups = dedup_by_id(groups, |g| g.id.as_str());
    let total = groups.len();
    Ok(Json(GroupsResponse { groups, total }))
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

pub async fn create_group(
    State(state): State<AppState>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<PlayerGroup>, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Group name must not be empty".to_string()));
    }

    let reader = JsonlReader::<PlayerGroup>::for_entity(&state.storage, EntityType::PlayerGroup);
    let existing = reader
        .read_all()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if existing.iter().any(|g| g.name == name) {
        return Err(ApiError::BadRequest(format!("Group already exists: {}", name)));
    }

    let group = PlayerGroup::new(name.to_string(), req.description);
    JsonlWriter::for_entity(&state.storage, EntityType::PlayerGroup)
        .append(&group)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!("Added player group: {}", group.name);
    Ok(Json(group))
}
