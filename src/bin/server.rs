use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scoreboard_engine::{
    AvatarImage, FilterState, HttpIdentityProvider, HttpScoresFetcher, LeaderboardView, NewScore,
    ProfileUpdate, RankPolicy, ScoreListState, ScoreRecord, ScoreboardEngine, ShareTarget,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<ScoreboardEngine>,
}

#[derive(Debug, Deserialize)]
struct LeaderboardParams {
    #[serde(default)]
    search: String,
    min_score: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct MyScoresParams {
    email: String,
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    username: String,
    score: i64,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct EditRequest {
    score: i64,
}

#[derive(Debug, Deserialize)]
struct ShareParams {
    target: ShareTarget,
    username: String,
    score: i64,
}

#[derive(Debug, Serialize)]
struct ShareResponse {
    url: String,
}

#[derive(Debug, Deserialize)]
struct AvatarRequest {
    file_name: String,
    content_type: String,
    /// Base64-encoded image bytes
    data: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoreboard_server=debug,scoreboard_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = std::env::var("SCORES_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:3001/scores".to_string());
    let policy = std::env::var("RANK_POLICY")
        .ok()
        .and_then(|p| p.parse::<RankPolicy>().ok())
        .unwrap_or_default();
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    tracing::info!("Starting Scoreboard Server");
    tracing::info!("Scores API: {}", api_url);
    tracing::info!("Rank policy: {:?}", policy);
    tracing::info!("Port: {}", port);

    let fetcher = Arc::new(HttpScoresFetcher::new(api_url)?);
    let mut engine = ScoreboardEngine::new(fetcher).with_policy(policy);

    // Identity provider is optional; without it profile routes return 502
    if let (Ok(identity_url), Ok(token)) = (
        std::env::var("IDENTITY_API_URL"),
        std::env::var("IDENTITY_API_TOKEN"),
    ) {
        tracing::info!("Identity provider: {}", identity_url);
        engine =
            engine.with_identity_provider(Arc::new(HttpIdentityProvider::new(identity_url, token)?));
    }

    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/leaderboard", get(leaderboard_handler))
        .route("/v1/scores", get(my_scores_handler).post(submit_handler))
        .route("/v1/scores/:id", put(edit_handler).delete(remove_handler))
        .route("/v1/share", get(share_handler))
        .route("/v1/profile", post(profile_handler))
        .route("/v1/profile/avatar", post(avatar_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: scoreboard_engine::VERSION.to_string(),
    })
}

/// Fetch failure degrades to an empty view so the page can render its
/// empty state; all other routes surface errors as status codes
async fn leaderboard_handler(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Json<LeaderboardView> {
    let filter = FilterState::new(params.search, params.min_score);
    let view = state.engine.leaderboard_or_empty(&filter).await;

    tracing::info!(
        shown = view.entries.len(),
        matching = view.matching_records,
        "Leaderboard served ({:.2}ms)",
        view.latency_ms
    );
    Json(view)
}

async fn my_scores_handler(
    State(state): State<AppState>,
    Query(params): Query<MyScoresParams>,
) -> Result<Json<ScoreListState>, AppError> {
    let scores = state.engine.my_scores(&params.email).await?;
    Ok(Json(scores))
}

async fn submit_handler(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<ScoreRecord>), AppError> {
    let mut scratch = ScoreListState::default();
    let stored = state
        .engine
        .submit_score(
            &mut scratch,
            NewScore::now(req.username, req.score, req.photo_url, req.email),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

async fn edit_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<EditRequest>,
) -> Result<Json<ScoreRecord>, AppError> {
    let mut scratch = ScoreListState::default();
    let updated = state.engine.edit_score(&mut scratch, id, req.score).await?;
    Ok(Json(updated))
}

async fn remove_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let mut scratch = ScoreListState::default();
    state.engine.remove_score(&mut scratch, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn share_handler(Query(params): Query<ShareParams>) -> Json<ShareResponse> {
    Json(ShareResponse {
        url: scoreboard_engine::share_url(params.target, &params.username, params.score),
    })
}

async fn profile_handler(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<StatusCode, AppError> {
    state.engine.update_profile(update).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn avatar_handler(
    State(state): State<AppState>,
    Json(req): Json<AvatarRequest>,
) -> Result<StatusCode, AppError> {
    let bytes = B64.decode(&req.data).map_err(|e| {
        AppError(scoreboard_engine::ScoreboardError::Other(format!(
            "Invalid avatar data: {}",
            e
        )))
    })?;

    state
        .engine
        .set_avatar(AvatarImage::new(req.file_name, req.content_type, bytes))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// Error handling
struct AppError(scoreboard_engine::ScoreboardError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            scoreboard_engine::ScoreboardError::ScoreNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Score {} not found", id))
            }
            scoreboard_engine::ScoreboardError::Api { status, message } => (
                StatusCode::BAD_GATEWAY,
                format!("Scores API error (HTTP {}): {}", status, message),
            ),
            scoreboard_engine::ScoreboardError::Identity(message) => {
                (StatusCode::BAD_GATEWAY, message)
            }
            e => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        tracing::error!("Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<scoreboard_engine::ScoreboardError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
