use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    db::dataset,
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{MovieRecord, Recommendation},
    services::Recommender,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub n: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub movies: usize,
}

// Handlers

pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// All movies in dataset order
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieRecord>> {
    let recommender = state.recommender.read().await;
    Json(recommender.store().records().to_vec())
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<MovieRecord>> {
    let recommender = state.recommender.read().await;
    recommender
        .store()
        .find(&title)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound(title))
}

pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let n = query.n.unwrap_or(state.default_count);

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        n = n,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.read().await.rank(&query.title, n)?;

    Ok(Json(RecommendationResponse {
        title: query.title,
        recommendations,
    }))
}

/// Re-reads the dataset file and rebuilds the similarity matrix
///
/// The current snapshot keeps serving until the new one is fully built; a
/// failed reload leaves it in place.
pub async fn reload_dataset(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<ReloadResponse>> {
    let path = state.dataset_path.clone();
    let rebuilt = tokio::task::spawn_blocking(move || {
        let store = dataset::load(&path)?;
        Recommender::build(store)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let movies = rebuilt.store().len();
    *state.recommender.write().await = rebuilt;

    tracing::info!(request_id = %request_id, movies = movies, "Dataset reloaded");

    Ok(Json(ReloadResponse { movies }))
}
