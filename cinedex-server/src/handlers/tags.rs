use axum::{
    extract::{Path, State},
    response::Json,
};
use cinedex_core::catalog::{Modified, Single};
use cinedex_model::{AddTagRequest, DeleteTagRequest};
use tracing::info;

use crate::AppState;
use crate::infra::errors::AppResult;

pub async fn display_tags_handler(
    State(state): State<AppState>,
    Path(movie_item_id): Path<i64>,
) -> AppResult<Json<Single>> {
    Ok(Json(state.catalog().display_tags(movie_item_id).await?))
}

pub async fn add_tag_handler(
    State(state): State<AppState>,
    Json(request): Json<AddTagRequest>,
) -> AppResult<Json<Modified>> {
    info!(item_id = request.movie_item_id, tag = %request.new_tag_name, "adding tag");
    Ok(Json(state.catalog().add_tag(&request).await?))
}

pub async fn delete_tag_handler(
    State(state): State<AppState>,
    Json(request): Json<DeleteTagRequest>,
) -> AppResult<Json<Modified>> {
    info!(item_id = request.movie_item_id, tag = %request.tag_name, "deleting tag");
    Ok(Json(state.catalog().delete_tag(&request).await?))
}
