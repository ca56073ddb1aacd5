//! Axum application state, router, and request handlers

use crate::config::{AppConfig, LiveParams, UpdateParams};
use crate::error::RatingError;
use crate::forecast::live_probability;
use crate::rating::RatingEngine;
use crate::types::{MatchScore, PlayerRating, Team};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared state for the rating service
#[derive(Debug, Clone)]
pub struct AppState {
    config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Create the Axum router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/update_ratings", post(update_ratings_handler))
        .route("/win_probability", post(win_probability_handler))
        .route("/live_probability", post(live_probability_handler))
        .with_state(state)
}

/// Rating update request body
#[derive(Debug, Deserialize)]
struct UpdateRequest {
    #[serde(rename = "teamA")]
    team_a: Vec<PlayerRating>,
    #[serde(rename = "teamB")]
    team_b: Vec<PlayerRating>,
    #[serde(rename = "scoreA")]
    score_a: i64,
    #[serde(rename = "scoreB")]
    score_b: i64,
    /// Optional partial parameter overrides
    #[serde(default)]
    params: Option<UpdateParams>,
}

/// Pre-match win probability request body
#[derive(Debug, Deserialize)]
struct WinProbabilityRequest {
    #[serde(rename = "teamA")]
    team_a: Vec<PlayerRating>,
    #[serde(rename = "teamB")]
    team_b: Vec<PlayerRating>,
}

/// Live win probability request body
#[derive(Debug, Deserialize)]
struct LiveProbabilityRequest {
    #[serde(rename = "muA")]
    mu_a: f64,
    #[serde(rename = "sigmaA")]
    sigma_a: f64,
    #[serde(rename = "muB")]
    mu_b: f64,
    #[serde(rename = "sigmaB")]
    sigma_b: f64,
    #[serde(rename = "scoreA")]
    score_a: i64,
    #[serde(rename = "scoreB")]
    score_b: i64,
    /// Optional partial parameter overrides
    #[serde(default)]
    params: Option<LiveParams>,
    /// Optional fixed seed for reproducible sampling
    #[serde(default)]
    seed: Option<u64>,
}

/// Root endpoint handler - shows service information
async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "service": "rally-rating",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/health",
            "/update_ratings",
            "/win_probability",
            "/live_probability"
        ]
    }))
}

/// Lightweight health check endpoint handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": state.config().service.name,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn update_ratings_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRequest>,
) -> impl IntoResponse {
    debug!(
        score_a = request.score_a,
        score_b = request.score_b,
        "rating update requested"
    );

    let result = (|| {
        let team_a = Team::try_from(request.team_a)?;
        let team_b = Team::try_from(request.team_b)?;
        let score = MatchScore::new(request.score_a, request.score_b)?;
        let params = request
            .params
            .unwrap_or_else(|| state.config().update.clone());
        let engine = RatingEngine::new(params).map_err(flatten)?;
        engine.update_ratings(&team_a, &team_b, score).map_err(flatten)
    })();

    match result {
        Ok(update) => (StatusCode::OK, Json(json!(update))),
        Err(err) => error_response(err),
    }
}

async fn win_probability_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WinProbabilityRequest>,
) -> impl IntoResponse {
    let result = (|| {
        let team_a = Team::try_from(request.team_a)?;
        let team_b = Team::try_from(request.team_b)?;
        let engine = RatingEngine::new(state.config().update.clone()).map_err(flatten)?;
        engine.pre_match_probability(&team_a, &team_b).map_err(flatten)
    })();

    match result {
        Ok(probability) => (StatusCode::OK, Json(json!(probability))),
        Err(err) => error_response(err),
    }
}

async fn live_probability_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LiveProbabilityRequest>,
) -> impl IntoResponse {
    let result = (|| {
        let side_a = PlayerRating::new(request.mu_a, request.sigma_a);
        let side_b = PlayerRating::new(request.mu_b, request.sigma_b);
        let score = MatchScore::new(request.score_a, request.score_b)?;
        let params = request
            .params
            .unwrap_or_else(|| state.config().live.clone());
        // Each request gets its own generator; a pinned seed makes the
        // sampling bit-reproducible.
        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        live_probability(&side_a, &side_b, score, &params, &mut rng).map_err(flatten)
    })();

    match result {
        Ok(live) => (StatusCode::OK, Json(json!(live))),
        Err(err) => error_response(err),
    }
}

/// Pull the typed error back out of an anyhow chain at the adapter boundary
fn flatten(err: anyhow::Error) -> RatingError {
    match err.downcast::<RatingError>() {
        Ok(rating_err) => rating_err,
        Err(other) => RatingError::ConfigurationError {
            message: other.to_string(),
        },
    }
}

/// Translate core errors into user-visible HTTP failures
fn error_response(err: RatingError) -> (StatusCode, Json<serde_json::Value>) {
    warn!(error = %err, "request rejected");
    let status = match err {
        RatingError::InvalidTeamSize { .. }
        | RatingError::InvalidPlayerState { .. }
        | RatingError::InvalidScore { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        RatingError::ConfigurationError { .. } => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": err.to_string() })))
}
