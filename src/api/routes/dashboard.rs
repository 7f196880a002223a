//! Dashboard summary endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{aggregate_by_faction, collapse_groups};
use crate::models::{Faction, PlayerRecord};

use super::{load_player_records, resolve_window};

const TOP_N: usize = 3;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub time_range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub show_grouped: bool,
}

#[derive(Debug, Serialize)]
pub struct SummaryTotals {
    pub total_players: u32,
    pub total_kills: u32,
    pub total_deaths: u32,
    pub total_blessings: u32,
    pub total_score: i64,
}

/// Per-faction series aligned by index, shaped for the client's bar chart.
#[derive(Debug, Serialize)]
pub struct FactionChart {
    pub labels: Vec<String>,
    pub player_counts: Vec<u32>,
    pub kills: Vec<u32>,
    pub deaths: Vec<u32>,
    pub blessings: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct TopPlayer {
    pub name: String,
    pub faction: String,
    pub kills: u32,
    pub score: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub totals: SummaryTotals,
    pub faction_chart: FactionChart,
    pub top_killers: Vec<TopPlayer>,
    pub top_scorers: Vec<TopPlayer>,
}

fn top_player(record: &PlayerRecord) -> TopPlayer {
    TopPlayer {
        name: record.name.clone(),
        faction: record.faction.clone(),
        kills: record.kills,
        score: record.score,
    }
}

pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardSummary>, ApiError> {
    let window = resolve_window(
        params.time_range.as_deref(),
        params.start.as_deref(),
        params.end.as_deref(),
    )?;

    let mut records = load_player_records(&state, &window)?;
    if params.show_grouped {
        records = collapse_groups(records);
    }

    let overall = aggregate_by_faction(&records, None);
    let totals = SummaryTotals {
        total_players: overall.player_count,
        total_kills: overall.total_kills,
        total_deaths: overall.total_deaths,
        total_blessings: overall.total_blessings,
        total_score: overall.total_score,
    };

    let mut chart = FactionChart {
        labels: Vec::new(),
        player_counts: Vec::new(),
        kills: Vec::new(),
        deaths: Vec::new(),
        blessings: Vec::new(),
    };
    for faction in Faction::ALL {
        let agg = aggregate_by_faction(&records, Some(faction.name()));
        chart.labels.push(faction.zh_name().to_string());
        chart.player_counts.push(agg.player_count);
        chart.kills.push(agg.total_kills);
        chart.deaths.push(agg.total_deaths);
        chart.blessings.push(agg.total_blessings);
    }

    // Stable sorts keep first-encounter order on ties
    let mut by_kills: Vec<&PlayerRecord> = records.iter().collect();
    by_kills.sort_by(|a, b| b.kills.cmp(&a.kills));
    let top_killers = by_kills.iter().take(TOP_N).map(|r| top_player(r)).collect();

    let mut by_score: Vec<&PlayerRecord> = records.iter().collect();
    by_score.sort_by(|a, b| b.score.cmp(&a.score));
    let top_scorers = by_score.iter().take(TOP_N).map(|r| top_player(r)).collect();

    Ok(Json(DashboardSummary {
        totals,
        faction_chart: chart,
        top_killers,
        top_scorers,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::models::{BattleRecord, BlessingRecord, Person};
    use crate::storage::{EntityType, JsonlWriter, StorageConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn ts(h: u32, m: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn setup_state(dir: &std::path::Path) -> AppState {
        let storage = StorageConfig::new(dir.to_path_buf());

        let persons = vec![
            Person::new("白素贞".into(), "梵天".into(), "法师".into()),
            Person::new("小青".into(), "梵天".into(), "刺客".into()),
            Person::new("将臣".into(), "湿婆".into(), "金刚".into()),
            Person::new("许仙".into(), "比湿奴".into(), "奶".into()),
        ];
        JsonlWriter::for_entity(&storage, EntityType::Person)
            .append_batch(&persons)
            .unwrap();

        let kills = vec![
            BattleRecord::new("白素贞".into(), "将臣".into(), 1, 1, ts(12, 0)),
            BattleRecord::new("白素贞".into(), "许仙".into(), 2, 2, ts(12, 5)),
            BattleRecord::new("小青".into(), "将臣".into(), 3, 3, ts(12, 10)),
            BattleRecord::new("将臣".into(), "小青".into(), 4, 4, ts(12, 15)),
        ];
        JsonlWriter::for_entity(&storage, EntityType::BattleRecord)
            .append_batch(&kills)
            .unwrap();

        let blessings = vec![BlessingRecord::new(
            "小青".into(),
            "梵天神".into(),
            ts(12, 11),
        )];
        JsonlWriter::for_entity(&storage, EntityType::BlessingRecord)
            .append_batch(&blessings)
            .unwrap();

        AppState::new(storage, 1024 * 1024)
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_summary_totals() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path()));

        let (status, json) = get_json(app, "/api/dashboard/summary?time_range=all").await;
        assert_eq!(status, StatusCode::OK);

        let totals = &json["totals"];
        assert_eq!(totals["total_players"], 4);
        assert_eq!(totals["total_kills"], 4);
        assert_eq!(totals["total_deaths"], 4);
        assert_eq!(totals["total_blessings"], 1);
        // 4*3 + 1 - 4
        assert_eq!(totals["total_score"], 9);
    }

    #[tokio::test]
    async fn test_summary_chart_series_aligned() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path()));

        let (_, json) = get_json(app, "/api/dashboard/summary?time_range=all").await;
        let chart = &json["faction_chart"];
        assert_eq!(
            chart["labels"],
            serde_json::json!(["梵天", "比湿奴", "湿婆"])
        );
        // 梵天: 白素贞 2 kills + 小青 1 kill
        assert_eq!(chart["kills"][0], 3);
        // 比湿奴: 许仙 has one death only
        assert_eq!(chart["kills"][1], 0);
        assert_eq!(chart["deaths"][1], 1);
        // 湿婆: 将臣 1 kill, 2 deaths
        assert_eq!(chart["kills"][2], 1);
        assert_eq!(chart["deaths"][2], 2);
    }

    #[tokio::test]
    async fn test_summary_top_lists() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path()));

        let (_, json) = get_json(app, "/api/dashboard/summary?time_range=all").await;

        let killers = json["top_killers"].as_array().unwrap();
        assert_eq!(killers.len(), 3);
        assert_eq!(killers[0]["name"], "白素贞");
        assert_eq!(killers[0]["kills"], 2);

        let scorers = json["top_scorers"].as_array().unwrap();
        assert_eq!(scorers[0]["name"], "白素贞");
        assert_eq!(scorers[0]["score"], 6);
        // 小青: 1 kill, 1 death, 1 blessing
        assert_eq!(scorers[1]["name"], "小青");
        assert_eq!(scorers[1]["score"], 3);
    }

    #[tokio::test]
    async fn test_summary_empty_store() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::new(StorageConfig::new(tmp.path().to_path_buf()), 1024);
        let app = build_router(state);

        let (status, json) = get_json(app, "/api/dashboard/summary?time_range=all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totals"]["total_players"], 0);
        assert!(json["top_killers"].as_array().unwrap().is_empty());
        assert_eq!(json["faction_chart"]["labels"].as_array().unwrap().len(), 3);
    }
}
