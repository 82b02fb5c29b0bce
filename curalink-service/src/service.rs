use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware::from_fn,
    response::Json,
    routing::{get, post},
};
use curalink::{
    Action, CuraError, Dataset, InMemorySessionStorage, MockAiService, SessionRunner,
    SessionStorage,
    search::{filter_experts, filter_publications, filter_trials},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::{
    config::ServiceConfig,
    models::{CatalogQuery, ExpertCatalog, PublicationCatalog, SessionResponse, TrialCatalog},
    telemetry::correlation_id_middleware,
};

type ApiResult<T> = Result<Json<T>, ApiError>;
type ApiError = (StatusCode, Json<Value>);

fn status_for(err: &CuraError) -> StatusCode {
    match err {
        CuraError::SessionNotFound(_)
        | CuraError::UnknownPost(_)
        | CuraError::UnknownItem { .. } => StatusCode::NOT_FOUND,
        CuraError::InvalidTransition { .. } | CuraError::ScreenMismatch { .. } => {
            StatusCode::CONFLICT
        }
        CuraError::Validation(_) => StatusCode::BAD_REQUEST,
        CuraError::AiService(_) => StatusCode::BAD_GATEWAY,
        CuraError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(err: CuraError, session_id: Option<&str>) -> ApiError {
    let status = status_for(&err);
    if status.is_server_error() {
        error!(?session_id, error = %err, "Request failed");
    } else {
        warn!(?session_id, error = %err, "Request rejected");
    }

    let mut body = json!({ "error": err.to_string() });
    if let Some(id) = session_id {
        body["session_id"] = json!(id);
    }
    (status, Json(body))
}

#[derive(Clone)]
pub struct AppState {
    pub runner: SessionRunner,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Self {
        let dataset = Arc::new(Dataset::builtin());
        let ai = Arc::new(MockAiService::new(dataset.clone(), config.ai_latency));
        let storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
        info!(latency = ?config.ai_latency, "Using in-memory session storage and mock AI service");

        Self {
            runner: SessionRunner::new(storage, ai, dataset),
        }
    }
}

pub fn create_app(config: &ServiceConfig) -> Router {
    build_router(AppState::new(config))
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/sessions", post(create_session))
        .route("/sessions/{session_id}", get(get_session).delete(delete_session))
        .route("/sessions/{session_id}/actions", post(apply_action))
        .route("/catalog/trials", get(search_trials))
        .route("/catalog/experts", get(search_experts))
        .route("/catalog/publications", get(search_publications))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(correlation_id_middleware))
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "CuraLink",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Connecting patients and researchers to clinical trials, publications, and health experts",
        "endpoints": {
            "POST /sessions": "Start a new session on the landing screen",
            "GET /sessions/{session_id}": "Get the current screen",
            "POST /sessions/{session_id}/actions": "Apply a UI action and get the next screen",
            "DELETE /sessions/{session_id}": "Discard a session",
            "GET /catalog/trials?q=": "Search clinical trials by title",
            "GET /catalog/experts?q=": "Search experts by name or specialty",
            "GET /catalog/publications?q=": "Search publications by title",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn create_session(State(state): State<AppState>) -> ApiResult<SessionResponse> {
    let session = state.runner.create().await.map_err(|e| api_error(e, None))?;
    let screen = session.render(state.runner.dataset());

    Ok(Json(SessionResponse {
        session_id: session.id,
        view: screen.view(),
        screen,
    }))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<SessionResponse> {
    let screen = state
        .runner
        .screen(&session_id)
        .await
        .map_err(|e| api_error(e, Some(&session_id)))?;

    Ok(Json(SessionResponse {
        view: screen.view(),
        session_id,
        screen,
    }))
}

async fn apply_action(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(action): Json<Action>,
) -> ApiResult<SessionResponse> {
    info!(session_id = %session_id, action = action.name(), "Applying action");

    let screen = state
        .runner
        .run(&session_id, action)
        .await
        .map_err(|e| api_error(e, Some(&session_id)))?;

    Ok(Json(SessionResponse {
        view: screen.view(),
        session_id,
        screen,
    }))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .runner
        .delete(&session_id)
        .await
        .map_err(|e| api_error(e, Some(&session_id)))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_trials(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<TrialCatalog> {
    let items = filter_trials(&state.runner.dataset().trials, &query.q);
    Json(TrialCatalog::new(query.q, items))
}

async fn search_experts(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<ExpertCatalog> {
    let items = filter_experts(&state.runner.dataset().experts, &query.q);
    Json(ExpertCatalog::new(query.q, items))
}

async fn search_publications(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<PublicationCatalog> {
    let items = filter_publications(&state.runner.dataset().publications, &query.q);
    Json(PublicationCatalog::new(query.q, items))
}
