use axum::{
    extract::{Path, State},
    response::Json,
};
use cinedex_core::catalog::{Modified, Single};
use cinedex_model::AddMovieReviewRequest;
use tracing::info;

use crate::AppState;
use crate::infra::errors::AppResult;

pub async fn add_review_handler(
    State(state): State<AppState>,
    Json(request): Json<AddMovieReviewRequest>,
) -> AppResult<Json<Modified>> {
    info!(item_id = request.movie_item_id, "adding movie review");
    let response = state.catalog().add_review(&request).await?;
    Ok(Json(response))
}

pub async fn show_reviews_handler(
    State(state): State<AppState>,
    Path(movie_item_id): Path<i64>,
) -> AppResult<Json<Single>> {
    Ok(Json(state.catalog().show_reviews(movie_item_id).await?))
}
