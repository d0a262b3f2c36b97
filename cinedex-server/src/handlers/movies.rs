use axum::{
    extract::{Path, State},
    response::Json,
};
use cinedex_core::catalog::{Listing, Modified, Single};
use cinedex_model::UpdateMovieInfoRequest;
use tracing::info;

use crate::AppState;
use crate::infra::errors::AppResult;

pub async fn basic_info_handler(
    State(state): State<AppState>,
    Path(movie_item_id): Path<i64>,
) -> AppResult<Json<Single>> {
    Ok(Json(state.catalog().basic_info(movie_item_id).await?))
}

pub async fn update_movie_info_handler(
    State(state): State<AppState>,
    Json(request): Json<UpdateMovieInfoRequest>,
) -> AppResult<Json<Modified>> {
    info!(item_id = request.movie_item_id, "updating movie info");
    Ok(Json(state.catalog().update_movie_info(&request).await?))
}

/// Exact, case-sensitive title match.
pub async fn find_by_title_handler(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<Listing>> {
    Ok(Json(state.catalog().find_by_title(&title).await?))
}

pub async fn find_by_director_handler(
    State(state): State<AppState>,
    Path(director): Path<String>,
) -> AppResult<Json<Listing>> {
    Ok(Json(state.catalog().by_director(&director).await?))
}
