use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{
        ModelInfo, RecommendationRequest, RecommendationResponse, RecommendedTrack,
        TrackCandidate,
    },
    services::{track_search, Session},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionSearchRequest {
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub index: usize,
    #[serde(default)]
    pub limit: Option<usize>,
    /// Resolve cover art and links for each recommendation
    #[serde(default)]
    pub enrich: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub session: Session,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Describe the loaded model and catalog
pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.recommender.info())
}

/// Recommend songs for already-resolved track metadata
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        title = %request.metadata.title,
        genres = request.genres.len(),
        "Processing recommendation request"
    );

    let exclude_title = request
        .exclude_title
        .as_deref()
        .unwrap_or(&request.metadata.title);

    let recommendation = state.recommender.recommend(
        &request.metadata,
        request.genres.as_slice(),
        exclude_title,
        request.limit,
    )?;

    Ok(Json(RecommendationResponse {
        cluster: recommendation.cluster,
        recommendations: recommendation
            .songs
            .into_iter()
            .map(RecommendedTrack::from)
            .collect(),
    }))
}

/// Search the lookup provider for candidate seed tracks
pub async fn search_tracks(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<TrackCandidate>>> {
    let tracks =
        track_search::search_tracks(state.provider.as_ref(), &params.title, &params.artist).await?;
    Ok(Json(tracks))
}

/// Start a new search session
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let (id, session) = state.create_session().await;
    tracing::info!(session_id = %id, "Session created");
    (StatusCode::CREATED, Json(SessionResponse { id, session }))
}

/// Get the current state of a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let session = state.load_session(id).await?;
    Ok(Json(SessionResponse { id, session }))
}

/// End a session and discard its state
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.remove_session(id).await?;
    tracing::info!(session_id = %id, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Search for songs within a session
pub async fn session_search(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SessionSearchRequest>,
) -> AppResult<Json<SessionResponse>> {
    let mut session = state.load_session(id).await?;
    session
        .search(state.provider.as_ref(), &request.title, &request.artist)
        .await?;

    tracing::info!(session_id = %id, state = session.state_name(), "Session advanced");
    state.store_session(id, session.clone()).await;
    Ok(Json(SessionResponse { id, session }))
}

/// Choose a seed song and compute its recommendations
pub async fn session_select(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectRequest>,
) -> AppResult<Json<SessionResponse>> {
    let mut session = state.load_session(id).await?;
    session
        .select(
            request.index,
            state.provider.as_ref(),
            &state.recommender,
            request.limit,
            request.enrich,
        )
        .await?;

    tracing::info!(session_id = %id, state = session.state_name(), "Session advanced");
    state.store_session(id, session.clone()).await;
    Ok(Json(SessionResponse { id, session }))
}

/// Step a session back to its previous state
pub async fn session_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let mut session = state.load_session(id).await?;
    session.back();
    state.store_session(id, session.clone()).await;
    Ok(Json(SessionResponse { id, session }))
}
