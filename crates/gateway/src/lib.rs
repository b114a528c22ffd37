//! HTTP API gateway for Uniplan.
//!
//! Exposes the advisor over REST:
//! - `GET /health` — catalog counts and backend status
//! - `POST /query` — answer a student question
//!
//! Built on Axum. The gateway is plumbing: request validation and wire
//! mapping live here, all decisions live in `uniplan-providers` and
//! `uniplan-planner`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use uniplan_catalog::Catalog;
use uniplan_core::{AdvisorReply, ChatTurn, StudentProfile};
use uniplan_providers::Advisor;

/// Shared application state for the gateway.
///
/// The catalog is loaded once and never mutated afterwards, so it is
/// safe for unlimited concurrent readers behind the `Arc`.
pub struct AdvisorState {
    pub config: uniplan_config::AppConfig,
    pub catalog: Arc<Catalog>,
    pub advisor: Advisor,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

type SharedState = Arc<AdvisorState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.gateway.allowed_origins);

    Router::new()
        .route("/health", get(health_handler))
        .route("/query", post(query_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// CORS restricted to the configured origins; an unparseable origin is
/// skipped with a warning rather than taking the server down.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<axum::http::HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::list(parsed))
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Start the gateway HTTP server.
pub async fn start(config: uniplan_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let store = uniplan_catalog::CatalogStore::new(&config.data_dir);
    let catalog = store.get().await;
    let advisor = Advisor::from_config(&config);

    let state = Arc::new(AdvisorState {
        config,
        catalog,
        advisor,
        started_at: chrono::Utc::now(),
    });

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    sections: usize,
    professors: usize,
    degree_courses: usize,
    model_configured: bool,
    uptime_secs: i64,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sections: state.catalog.sections.len(),
        professors: state.catalog.professors.len(),
        degree_courses: state.catalog.degree_course_count(),
        model_configured: state.advisor.model_configured(),
        uptime_secs: (chrono::Utc::now() - state.started_at).num_seconds(),
    })
}

/// A student query as it arrives on the wire.
///
/// `user` is the setup blob the frontend keeps in localStorage; it may
/// arrive as a JSON string or as the object itself. History roles are
/// restricted to user/assistant by deserialization.
#[derive(Deserialize)]
struct QueryRequest {
    user: serde_json::Value,
    message: String,

    #[serde(default)]
    history: Vec<ChatTurn>,
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

fn bad_request(detail: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}

async fn query_handler(
    State(state): State<SharedState>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<AdvisorReply>, (StatusCode, Json<ErrorResponse>)> {
    if payload.message.trim().is_empty() {
        return Err(bad_request("message must not be empty"));
    }

    let setup_json = match &payload.user {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(_) => payload.user.to_string(),
        _ => return Err(bad_request("user payload must be a JSON string or object")),
    };
    let profile = StudentProfile::from_setup_json(&setup_json);

    let request_id = uuid::Uuid::new_v4();
    info!(
        %request_id,
        message_len = payload.message.len(),
        history_turns = payload.history.len(),
        "Query received"
    );

    let response = state
        .advisor
        .plan_response(&profile, &state.catalog, &payload.message, &payload.history)
        .await;

    info!(%request_id, provider = response.provider_tag(), "Query answered");
    Ok(Json(response.into_tagged_reply()))
}
