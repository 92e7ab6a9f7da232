//! HTTP 接口
//!
//! 页面与 JSON API，处理函数只做参数转换，逻辑全部委托给 session 命令

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::session::{self, AppState, ValidateOutcome, VocabularySummary};

use super::page;

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tagger: String,
}

/// GET /
async fn index() -> Html<String> {
    Html(page::index_page())
}

/// GET /api/health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        tagger: state.validator.tagger_name().to_string(),
    })
}

/// GET /api/vocabulary
async fn get_vocabulary(State(state): State<AppState>) -> Json<VocabularySummary> {
    Json(session::vocabulary_status(&state))
}

/// POST /api/vocabulary（请求体为词表文件原始内容）
async fn upload_vocabulary(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VocabularySummary>, impl IntoResponse> {
    session::load_vocabulary(&state, &body)
        .map(Json)
        .map_err(|error| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })))
}

/// DELETE /api/vocabulary
async fn clear_vocabulary(State(state): State<AppState>) -> Json<VocabularySummary> {
    Json(session::clear_vocabulary(&state))
}

/// POST /api/validate
async fn validate(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Json<ValidateOutcome> {
    Json(session::validate_text(&state, &req.text))
}

/// 创建路由
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route(
            "/api/vocabulary",
            get(get_vocabulary)
                .post(upload_vocabulary)
                .delete(clear_vocabulary),
        )
        .route("/api/validate", post(validate))
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
