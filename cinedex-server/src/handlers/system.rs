use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Redirect},
};
use cinedex_model::routes::{self, listings, movies, reviews, tags};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::AppState;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RouteDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

const fn doc(method: &'static str, path: &'static str, description: &'static str) -> RouteDoc {
    RouteDoc {
        method,
        path,
        description,
    }
}

pub const OPERATIONS: &[RouteDoc] = &[
    doc("POST", reviews::ADD, "Append a review to a movie"),
    doc("POST", reviews::SHOW, "Show the reviews of a movie"),
    doc("GET", movies::BASIC_INFO, "Movie fields except tags and reviews"),
    doc("PUT", movies::UPDATE_INFO, "Update title, director or cast"),
    doc("GET", movies::BY_TITLE, "Movies with exactly this title"),
    doc("GET", listings::TOP_RATED, "Titles by descending rating"),
    doc("GET", movies::BY_DIRECTOR, "Movies by this director"),
    doc("GET", listings::IN_RATING_RANGE, "Movies rated within an inclusive range"),
    doc("GET", listings::TITLE_CONTAINS, "Movies whose title contains a keyword"),
    doc("GET", listings::BETTER_THAN_RATING, "Movies rated strictly above a threshold"),
    doc("GET", listings::WITH_TAG, "Movies carrying a tag"),
    doc("GET", listings::WITH_STAR, "Movies starring someone"),
    doc("GET", tags::DISPLAY, "Title and tags of a movie"),
    doc("POST", tags::ADD, "Append a tag to a movie"),
    doc("DELETE", tags::DELETE, "Remove every occurrence of a tag"),
    doc("GET", routes::PING, "Liveness probe"),
    doc("GET", routes::HEALTH, "Store connectivity check"),
];

pub async fn root_handler() -> Redirect {
    Redirect::temporary(routes::DOCS)
}

pub async fn docs_handler() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "operations": OPERATIONS,
    }))
}

pub async fn ping_handler() -> Json<Value> {
    info!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "Cinedex catalog is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    match state.catalog().diagnostics().await {
        Ok(diagnostics) => {
            health_status["checks"]["store"] = json!({
                "status": "healthy",
                "backend": diagnostics.backend,
                "collection": diagnostics.collection,
                "documents": diagnostics.document_count,
            });
            (StatusCode::OK, Json(health_status))
        }
        Err(e) => {
            warn!(error = %e, "store health check failed");
            health_status["status"] = json!("unhealthy");
            health_status["checks"]["store"] = json!({
                "status": "unhealthy",
                "error": e.to_string()
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(health_status))
        }
    }
}
