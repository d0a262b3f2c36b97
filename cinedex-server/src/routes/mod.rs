use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post, put},
};
use cinedex_model::routes::{self, listings, movies, reviews, tags};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::AppState;
use crate::handlers::{listings as listing, movies as movie, reviews as review, system, tags as tag};
use crate::infra::config::CorsConfig;

/// The fifteen catalog operations.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        // Reviews
        .route(reviews::ADD, post(review::add_review_handler))
        .route(reviews::SHOW, post(review::show_reviews_handler))
        // Single movie
        .route(movies::BASIC_INFO, get(movie::basic_info_handler))
        .route(movies::UPDATE_INFO, put(movie::update_movie_info_handler))
        .route(movies::BY_TITLE, get(movie::find_by_title_handler))
        .route(movies::BY_DIRECTOR, get(movie::find_by_director_handler))
        // Listings
        .route(listings::TOP_RATED, get(listing::top_rated_handler))
        .route(listings::IN_RATING_RANGE, get(listing::in_rating_range_handler))
        .route(listings::BETTER_THAN_RATING, get(listing::better_than_rating_handler))
        .route(listings::TITLE_CONTAINS, get(listing::title_contains_handler))
        .route(listings::WITH_TAG, get(listing::with_tag_handler))
        .route(listings::WITH_STAR, get(listing::with_star_handler))
        // Tags
        .route(tags::DISPLAY, get(tag::display_tags_handler))
        .route(tags::ADD, post(tag::add_tag_handler))
        .route(tags::DELETE, delete(tag::delete_tag_handler))
}

/// Full application: operations, system endpoints and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.config().cors);

    Router::new()
        .route(routes::ROOT, get(system::root_handler))
        .route(routes::DOCS, get(system::docs_handler))
        .route(routes::PING, get(system::ping_handler))
        .route(routes::HEALTH, get(system::health_handler))
        .merge(create_api_router())
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let allow_origin = if cors.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
