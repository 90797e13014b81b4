use axum::{
    http::{HeaderValue, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::database::Store;
use crate::error::ApiError;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::services::{AuthService, JobService};

pub const API_PREFIX: &str = "/api/v1";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenIssuer>,
    pub auth: AuthService,
    pub jobs: JobService,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn Store>) -> Self {
        let tokens = Arc::new(TokenIssuer::from_config(&config.security));
        let timeout = config.database.query_timeout();

        Self {
            auth: AuthService::new(store.clone(), tokens.clone(), timeout),
            jobs: JobService::new(store.clone(), timeout),
            store,
            tokens,
        }
    }
}

/// Build the main application router
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
        .nest(API_PREFIX, auth_public_routes().merge(job_routes(&state)))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.security.enable_cors {
        router.layer(cors_layer(&config.security.cors_origins))
    } else {
        router
    }
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/auth/register", post(auth::register_post).fallback(not_found))
        .route("/auth/login", post(auth::login_post).fallback(not_found))
}

fn job_routes(state: &AppState) -> Router<AppState> {
    use handlers::protected::jobs;

    Router::new()
        .route(
            "/jobs",
            get(jobs::jobs_get).post(jobs::jobs_post).fallback(not_found),
        )
        .route(
            "/jobs/:id",
            get(jobs::job_get)
                .patch(jobs::job_patch)
                .delete(jobs::job_delete)
                .fallback(not_found),
        )
        .route_layer(from_fn_with_state(state.tokens.clone(), jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Jobs API",
        "version": version,
        "endpoints": {
            "register": "POST /api/v1/auth/register (public)",
            "login": "POST /api/v1/auth/login (public)",
            "jobs": "GET, POST /api/v1/jobs (bearer token)",
            "job": "GET, PATCH, DELETE /api/v1/jobs/:id (bearer token)",
            "health": "GET /health (public)",
        }
    }))
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now })),
            )
        }
    }
}

/// Unknown paths and unsupported methods on known paths.
async fn not_found() -> ApiError {
    ApiError::not_found("Route does not exist")
}
