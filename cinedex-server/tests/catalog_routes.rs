use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use cinedex_core::mutation::UpdateCommand;
use cinedex_core::query::{Filter, FindQuery, Projection};
use cinedex_core::{
    CatalogError, DocumentStore, InMemoryDocumentStore, StoreDiagnostics, UpdateOutcome,
};
use cinedex_model::Document;
use cinedex_model::routes::{self, listings, movies, reviews, tags, utils as route_utils};
use cinedex_server::infra::config::SearchConfig;
use serde_json::{Value, json};

mod common;

use common::{FIXTURE, build_test_app, build_test_app_with};

fn titles(body: &Value) -> Vec<&str> {
    body["data"]["results"]
        .as_array()
        .map(|docs| {
            docs.iter()
                .map(|doc| doc["title"].as_str().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}

fn listing(route: &str, params: &[(&str, &str)]) -> String {
    route_utils::replace_params(route, params)
}

struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn find(&self, _query: &FindQuery) -> cinedex_core::Result<Vec<Document>> {
        Err(CatalogError::Unavailable("connection refused".into()))
    }

    async fn find_one(
        &self,
        _filter: &Filter,
        _projection: &Projection,
    ) -> cinedex_core::Result<Option<Document>> {
        Err(CatalogError::Unavailable("connection refused".into()))
    }

    async fn update_one(
        &self,
        _filter: &Filter,
        _update: &UpdateCommand,
    ) -> cinedex_core::Result<UpdateOutcome> {
        Err(CatalogError::Unavailable("connection refused".into()))
    }

    async fn diagnostics(&self) -> cinedex_core::Result<StoreDiagnostics> {
        Err(CatalogError::Unavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn root_redirects_to_docs() {
    let app = build_test_app();
    let response = app.server.get(routes::ROOT).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), routes::DOCS);
}

#[tokio::test]
async fn docs_lists_every_operation() {
    let app = build_test_app();
    let response = app.server.get(routes::DOCS).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let operations = body["operations"].as_array().unwrap();
    assert_eq!(operations.len(), 17);
    assert!(
        operations
            .iter()
            .any(|op| op["method"] == "DELETE" && op["path"] == tags::DELETE)
    );
}

#[tokio::test]
async fn ping_and_health_report_ok() {
    let app = build_test_app();

    let ping = app.server.get(routes::PING).await;
    ping.assert_status_ok();
    assert_eq!(ping.json::<Value>()["status"], "ok");

    let health = app.server.get(routes::HEALTH).await;
    health.assert_status_ok();
    let body: Value = health.json();
    assert_eq!(body["checks"]["store"]["backend"], "memory");
    assert_eq!(body["checks"]["store"]["documents"], 8);
}

#[tokio::test]
async fn health_is_unavailable_when_store_is_down() {
    let app = build_test_app_with(Arc::new(UnreachableStore), SearchConfig::default());
    let response = app.server.get(routes::HEALTH).await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["status"], "unhealthy");
}

#[tokio::test]
async fn store_faults_become_internal_errors() {
    let app = build_test_app_with(Arc::new(UnreachableStore), SearchConfig::default());
    let path = route_utils::replace_param(movies::BASIC_INFO, "{movie_item_id}", "1");
    let response = app.server.get(&path).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"]["status"], 500);
}

#[tokio::test]
async fn top_rated_returns_envelope_with_projection() {
    let app = build_test_app();
    let path = listing(listings::TOP_RATED, &[("{page}", "1"), ("{page_size}", "3")]);
    let response = app.server.get(&path).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "Succeed");
    assert_eq!(titles(&body), ["Alien", "Blade Runner", "Heat"]);
    assert_eq!(
        body["data"]["results"][0],
        json!({ "title": "Alien", "avgRating": 4.5 })
    );
}

#[tokio::test]
async fn out_of_range_paging_is_repaired() {
    let app = build_test_app();
    let path = listing(listings::TOP_RATED, &[("{page}", "-1"), ("{page_size}", "0")]);
    let response = app.server.get(&path).await;

    response.assert_status_ok();
    assert_eq!(titles(&response.json()), ["Alien"]);
}

#[tokio::test]
async fn non_numeric_page_is_rejected() {
    let app = build_test_app();
    let path = listing(listings::TOP_RATED, &[("{page}", "first"), ("{page_size}", "10")]);
    let response = app.server.get(&path).await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn rating_range_and_threshold() {
    let app = build_test_app();

    let path = listing(
        listings::IN_RATING_RANGE,
        &[
            ("{lower_range}", "3.9"),
            ("{upper_range}", "4.1"),
            ("{page}", "1"),
            ("{page_size}", "10"),
        ],
    );
    let response = app.server.get(&path).await;
    response.assert_status_ok();
    assert_eq!(titles(&response.json()), ["Heat", "Cast Away", "Se7en (1995)"]);

    let path = listing(
        listings::BETTER_THAN_RATING,
        &[("{rating}", "4.1"), ("{page}", "1"), ("{page_size}", "10")],
    );
    let response = app.server.get(&path).await;
    response.assert_status_ok();
    assert_eq!(titles(&response.json()), ["Alien", "Blade Runner"]);
}

#[tokio::test]
async fn unknown_movie_is_null_data() {
    let app = build_test_app();
    let path = route_utils::replace_param(movies::BASIC_INFO, "{movie_item_id}", "42");
    let response = app.server.get(&path).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "Succeed", "data": null }));
}

#[tokio::test]
async fn title_and_director_lookups_decode_path_segments() {
    let app = build_test_app();

    let path = route_utils::replace_param(movies::BY_TITLE, "{title}", "Blade%20Runner");
    let response = app.server.get(&path).await;
    response.assert_status_ok();
    assert_eq!(titles(&response.json()), ["Blade Runner"]);

    let path = route_utils::replace_param(movies::BY_DIRECTOR, "{director}", "Ridley%20Scott");
    let response = app.server.get(&path).await;
    response.assert_status_ok();
    assert_eq!(titles(&response.json()), ["Alien", "Blade Runner"]);
}

#[tokio::test]
async fn star_and_keyword_search() {
    let app = build_test_app();

    let path = listing(
        listings::WITH_STAR,
        &[("{star}", "Tom%20Hanks"), ("{page}", "1"), ("{page_size}", "10")],
    );
    let response = app.server.get(&path).await;
    response.assert_status_ok();
    assert_eq!(titles(&response.json()), ["Sleepless in Seattle", "Cast Away"]);

    let path = listing(
        listings::TITLE_CONTAINS,
        &[("{keyword}", "Se7en%20%28"), ("{page}", "1"), ("{page_size}", "10")],
    );
    let response = app.server.get(&path).await;
    response.assert_status_ok();
    assert_eq!(titles(&response.json()), ["Se7en (1995)"]);
}

#[tokio::test]
async fn raw_mode_rejects_invalid_patterns_with_bad_request() {
    let store = InMemoryDocumentStore::from_json_file(FIXTURE).unwrap();
    let app = build_test_app_with(Arc::new(store), SearchConfig { raw_patterns: true });

    let path = listing(
        listings::TITLE_CONTAINS,
        &[("{keyword}", "%28unclosed"), ("{page}", "1"), ("{page_size}", "10")],
    );
    let response = app.server.get(&path).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["status"], 400);
}

#[tokio::test]
async fn tag_lifecycle() {
    let app = build_test_app();

    let added = app
        .server
        .post(tags::ADD)
        .json(&json!({ "movie_item_id": 1, "new_tag_name": "classic" }))
        .await;
    added.assert_status_ok();
    assert_eq!(
        added.json::<Value>(),
        json!({ "status": "Succeed", "data": { "modified_count": 1 } })
    );

    let path = route_utils::replace_param(tags::DISPLAY, "{movie_item_id}", "1");
    let shown = app.server.get(&path).await;
    assert_eq!(
        shown.json::<Value>()["data"],
        json!({ "title": "Heat", "tags": ["crime", "heist", "classic"] })
    );

    let path = listing(
        listings::WITH_TAG,
        &[("{tag}", "classic"), ("{page}", "1"), ("{page_size}", "10")],
    );
    let tagged = app.server.get(&path).await;
    assert_eq!(titles(&tagged.json()), ["Heat", "Alien", "Blade Runner"]);

    let removed = app
        .server
        .delete(tags::DELETE)
        .json(&json!({ "movie_item_id": 1, "tag_name": "classic" }))
        .await;
    removed.assert_status_ok();
    assert_eq!(removed.json::<Value>()["data"]["modified_count"], 1);

    let again = app
        .server
        .delete(tags::DELETE)
        .json(&json!({ "movie_item_id": 1, "tag_name": "classic" }))
        .await;
    assert_eq!(again.json::<Value>()["data"]["modified_count"], 0);
}

#[tokio::test]
async fn reviews_are_added_and_shown() {
    let app = build_test_app();

    let added = app
        .server
        .post(reviews::ADD)
        .json(&json!({ "movie_item_id": 2, "new_review_content": "Still terrifying." }))
        .await;
    added.assert_status_ok();
    assert_eq!(added.json::<Value>()["data"]["modified_count"], 1);

    let path = route_utils::replace_param(reviews::SHOW, "{movie_item_id}", "2");
    let shown = app.server.post(&path).await;
    shown.assert_status_ok();
    assert_eq!(
        shown.json::<Value>()["data"],
        json!({ "reviews": ["Still terrifying."] })
    );
}

#[tokio::test]
async fn movie_info_update_accepts_partial_body() {
    let app = build_test_app();

    let updated = app
        .server
        .put(movies::UPDATE_INFO)
        .json(&json!({ "movie_item_id": 4, "directedBy": "Nora & Delia Ephron" }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["data"]["modified_count"], 1);

    let path = route_utils::replace_param(movies::BASIC_INFO, "{movie_item_id}", "4");
    let info: Value = app.server.get(&path).await.json();
    assert_eq!(info["data"]["directedBy"], "Nora & Delia Ephron");
    assert_eq!(info["data"]["title"], "Sleepless in Seattle");
}

#[tokio::test]
async fn malformed_bodies_are_client_errors() {
    let app = build_test_app();

    let response = app
        .server
        .post(tags::ADD)
        .json(&json!({ "movie_item_id": "one", "new_tag_name": "classic" }))
        .await;

    assert!(response.status_code().is_client_error());
}
