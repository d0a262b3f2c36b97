//! Paged listings. Page numbers and sizes arrive unvalidated and are repaired
//! by the catalog, so any integer is accepted here.

use axum::{
    extract::{Path, State},
    response::Json,
};
use cinedex_core::catalog::Listing;

use crate::AppState;
use crate::infra::errors::AppResult;

pub async fn top_rated_handler(
    State(state): State<AppState>,
    Path((page, page_size)): Path<(i64, i64)>,
) -> AppResult<Json<Listing>> {
    Ok(Json(state.catalog().top_rated(page, page_size).await?))
}

pub async fn in_rating_range_handler(
    State(state): State<AppState>,
    Path((lower_range, upper_range, page, page_size)): Path<(f64, f64, i64, i64)>,
) -> AppResult<Json<Listing>> {
    let response = state
        .catalog()
        .in_rating_range(lower_range, upper_range, page, page_size)
        .await?;
    Ok(Json(response))
}

pub async fn better_than_rating_handler(
    State(state): State<AppState>,
    Path((rating, page, page_size)): Path<(f64, i64, i64)>,
) -> AppResult<Json<Listing>> {
    let response = state
        .catalog()
        .better_than_rating(rating, page, page_size)
        .await?;
    Ok(Json(response))
}

pub async fn title_contains_handler(
    State(state): State<AppState>,
    Path((keyword, page, page_size)): Path<(String, i64, i64)>,
) -> AppResult<Json<Listing>> {
    let response = state
        .catalog()
        .title_contains(&keyword, page, page_size)
        .await?;
    Ok(Json(response))
}

pub async fn with_tag_handler(
    State(state): State<AppState>,
    Path((tag, page, page_size)): Path<(String, i64, i64)>,
) -> AppResult<Json<Listing>> {
    Ok(Json(state.catalog().with_tag(&tag, page, page_size).await?))
}

pub async fn with_star_handler(
    State(state): State<AppState>,
    Path((star, page, page_size)): Path<(String, i64, i64)>,
) -> AppResult<Json<Listing>> {
    Ok(Json(state.catalog().with_star(&star, page, page_size).await?))
}
