//! Battle log upload endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::ingest::parse_battle_log;
use crate::models::{BattleRecord, BlessingRecord};
use crate::storage::{EntityType, JsonlWriter};

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// Drop previously stored events before storing this log
    #[serde(default)]
    pub replace: bool,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub kills_stored: usize,
    pub blessings_stored: usize,
    pub lines_total: usize,
    pub lines_skipped: usize,
    pub replaced: bool,
}

pub async fn upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: String,
) -> Result<Json<UploadResponse>, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::BadRequest("Empty battle log".to_string()));
    }
    if body.len() > state.upload_max_bytes {
        return Err(ApiError::BadRequest(format!(
            "Battle log exceeds {} byte limit",
            state.upload_max_bytes
        )));
    }

    let parsed = parse_battle_log(&body);
    if parsed.kills.is_empty() && parsed.blessings.is_empty() {
        return Err(ApiError::BadRequest(
            "No kill or blessing lines recognised in the log".to_string(),
        ));
    }

    let kill_writer = JsonlWriter::<BattleRecord>::for_entity(&state.storage, EntityType::BattleRecord);
    let blessing_writer =
        JsonlWriter::<BlessingRecord>::for_entity(&state.storage, EntityType::BlessingRecord);

    let (kills_stored, blessings_stored) = if params.replace {
        (
            kill_writer
                .replace_all(&parsed.kills)
                .map_err(|e| ApiError::Internal(e.to_string()))?,
            blessing_writer
                .replace_all(&parsed.blessings)
                .map_err(|e| ApiError::Internal(e.to_string()))?,
        )
    } else {
        (
            kill_writer
                .append_batch(&parsed.kills)
                .map_err(|e| ApiError::Internal(e.to_string()))?,
            blessing_writer
                .append_batch(&parsed.blessings)
                .map_err(|e| ApiError::Internal(e.to_string()))?,
        )
    };

    info!(
        "Stored battle log upload: {} kills, {} blessings (replace={})",
        kills_stored, blessings_stored, params.replace
    );

    Ok(Json(UploadResponse {
        kills_stored,
        blessings_stored,
        lines_total: parsed.lines_total,
        lines_skipped: parsed.lines_skipped,
        replaced: params.replace,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::models::BattleRecord;
    use crate::storage::{EntityType, JsonlReader, StorageConfig};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    const SAMPLE_LOG: &str = "\
[战况]白素贞 击杀 将臣 !坐标:120，88  (20251104,21:03:17)
[公告]  白素贞 得到了 湿婆神 的祝福! (20251104,21:03:20)
闲聊一句
";

    fn setup_state(dir: &std::path::Path) -> AppState {
        AppState::new(StorageConfig::new(dir.to_path_buf()), 1024 * 1024)
    }

    async fn post_text(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header("content-type", "text/plain; charset=utf-8")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_upload_stores_events() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());
        let storage = state.storage.clone();
        let app = build_router(state);

        let (status, json) = post_text(app, "/api/battles/upload", SAMPLE_LOG).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["kills_stored"], 1);
        assert_eq!(json["blessings_stored"], 1);
        assert_eq!(json["lines_skipped"], 1);
        assert_eq!(json["replaced"], false);

        let reader = JsonlReader::<BattleRecord>::for_entity(&storage, EntityType::BattleRecord);
        assert_eq!(reader.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upload_append_then_replace() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());
        let storage = state.storage.clone();

        let app = build_router(AppState {
            storage: storage.clone(),
            upload_max_bytes: 1024 * 1024,
        });
        post_text(app, "/api/battles/upload", SAMPLE_LOG).await;

        let app = build_router(AppState {
            storage: storage.clone(),
            upload_max_bytes: 1024 * 1024,
        });
        post_text(app, "/api/battles/upload", SAMPLE_LOG).await;

        let reader = JsonlReader::<BattleRecord>::for_entity(&storage, EntityType::BattleRecord);
        assert_eq!(reader.count().unwrap(), 2);

        let app = build_router(AppState {
            storage: storage.clone(),
            upload_max_bytes: 1024 * 1024,
        });
        let (status, json) =
            post_text(app, "/api/battles/upload?replace=true", SAMPLE_LOG).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["replaced"], true);

        assert_eq!(reader.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upload_empty_body_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path()));

        let (status, json) = post_text(app, "/api/battles/upload", "   \n ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_upload_unrecognised_log_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path()));

        let (status, _) = post_text(app, "/api/battles/upload", "只是聊天\n没有战况\n").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_size_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::new(StorageConfig::new(tmp.path().to_path_buf()), 64);
        let app = build_router(state);

        let big = SAMPLE_LOG.repeat(10);
        let resp = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/battles/upload")
                    .body(Body::from(big))
                    .unwrap(),
            )
            .await
            .unwrap();
        // Either our own check or axum's body limit fires first
        assert!(
            resp.status() == StatusCode::BAD_REQUEST
                || resp.status() == StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
