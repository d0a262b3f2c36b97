//! The catalog façade.
//!
//! Each method repairs its raw inputs, builds the query or mutation for the
//! operation, runs it against the injected [`DocumentStore`] and wraps the
//! result in the `{status, data}` envelope. Missing documents and no-op
//! mutations are successful answers; only store faults and invalid raw
//! patterns are errors.

use std::fmt;
use std::sync::Arc;

use cinedex_model::{
    AddMovieReviewRequest, AddTagRequest, ApiResponse, DeleteTagRequest, Document,
    ModifiedCount, MovieField, ResultsPayload, UpdateMovieInfoRequest,
};
use tracing::debug;

use crate::error::Result;
use crate::mutation::{ArrayMutator, Mutation, movie_info_update};
use crate::query::{FindQuery, Lookup, Pagination, PatternNormalizer, RatingRange};
use crate::store::{DocumentStore, StoreDiagnostics};

pub type Listing = ApiResponse<ResultsPayload<Document>>;
pub type Single = ApiResponse<Option<Document>>;
pub type Modified = ApiResponse<ModifiedCount>;

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
    patterns: PatternNormalizer,
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_patterns(store, PatternNormalizer::default())
    }

    pub fn with_patterns(store: Arc<dyn DocumentStore>, patterns: PatternNormalizer) -> Self {
        Self { store, patterns }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    // === Reviews ===

    pub async fn add_review(&self, request: &AddMovieReviewRequest) -> Result<Modified> {
        let mutation = ArrayMutator::append(
            request.movie_item_id,
            MovieField::Reviews,
            request.new_review_content.as_str(),
        )?;
        self.apply(mutation).await
    }

    pub async fn show_reviews(&self, item_id: i64) -> Result<Single> {
        self.lookup(Lookup::reviews(item_id)).await
    }

    // === Single movie ===

    pub async fn basic_info(&self, item_id: i64) -> Result<Single> {
        self.lookup(Lookup::basic_info(item_id)).await
    }

    /// Writes each present, non-empty field. A request with nothing to write
    /// reports zero without reaching the store.
    pub async fn update_movie_info(&self, request: &UpdateMovieInfoRequest) -> Result<Modified> {
        match movie_info_update(request) {
            Some(mutation) => self.apply(mutation).await,
            None => {
                debug!(item_id = request.movie_item_id, "movie info update carries no fields");
                Ok(ApiResponse::succeed(ModifiedCount::default()))
            }
        }
    }

    // === Listings ===

    pub async fn find_by_title(&self, title: &str) -> Result<Listing> {
        self.list(FindQuery::by_title(title)).await
    }

    pub async fn top_rated(&self, page: i64, page_size: i64) -> Result<Listing> {
        self.list(FindQuery::top_rated(Pagination::normalize(page, page_size)))
            .await
    }

    pub async fn by_director(&self, director: &str) -> Result<Listing> {
        self.list(FindQuery::by_director(director)).await
    }

    /// Inclusive on both ends. Out-of-domain bounds are clamped and an
    /// inverted range lists everything.
    pub async fn in_rating_range(
        &self,
        lower: f64,
        upper: f64,
        page: i64,
        page_size: i64,
    ) -> Result<Listing> {
        let range = RatingRange::normalize(lower, upper);
        self.list(FindQuery::in_rating_range(
            range,
            Pagination::normalize(page, page_size),
        ))
        .await
    }

    /// Strictly above the clamped threshold.
    pub async fn better_than_rating(
        &self,
        rating: f64,
        page: i64,
        page_size: i64,
    ) -> Result<Listing> {
        self.list(FindQuery::better_than_rating(
            rating,
            Pagination::normalize(page, page_size),
        ))
        .await
    }

    pub async fn title_contains(&self, keyword: &str, page: i64, page_size: i64) -> Result<Listing> {
        let pattern = self.patterns.substring_pattern(keyword)?;
        self.list(FindQuery::title_contains(
            pattern,
            Pagination::normalize(page, page_size),
        ))
        .await
    }

    pub async fn with_tag(&self, tag: &str, page: i64, page_size: i64) -> Result<Listing> {
        self.list(FindQuery::with_tag(tag, Pagination::normalize(page, page_size)))
            .await
    }

    pub async fn with_star(&self, star: &str, page: i64, page_size: i64) -> Result<Listing> {
        let pattern = self.patterns.token_pattern(star)?;
        self.list(FindQuery::with_star(
            pattern,
            Pagination::normalize(page, page_size),
        ))
        .await
    }

    // === Tags ===

    pub async fn display_tags(&self, item_id: i64) -> Result<Single> {
        self.lookup(Lookup::tags(item_id)).await
    }

    pub async fn add_tag(&self, request: &AddTagRequest) -> Result<Modified> {
        let mutation = ArrayMutator::append(
            request.movie_item_id,
            MovieField::Tags,
            request.new_tag_name.as_str(),
        )?;
        self.apply(mutation).await
    }

    /// Removes every occurrence of the tag.
    pub async fn delete_tag(&self, request: &DeleteTagRequest) -> Result<Modified> {
        let mutation = ArrayMutator::remove(
            request.movie_item_id,
            MovieField::Tags,
            request.tag_name.as_str(),
        )?;
        self.apply(mutation).await
    }

    pub async fn diagnostics(&self) -> Result<StoreDiagnostics> {
        self.store.diagnostics().await
    }

    // === Plumbing ===

    async fn list(&self, query: FindQuery) -> Result<Listing> {
        debug!(
            conditions = query.filter.conditions().len(),
            skip = query.skip(),
            limit = ?query.limit(),
            "running catalog listing"
        );
        let documents = self.store.find(&query).await?;
        Ok(ApiResponse::succeed(ResultsPayload::new(documents)))
    }

    async fn lookup(&self, lookup: Lookup) -> Result<Single> {
        let document = self
            .store
            .find_one(&lookup.filter, &lookup.projection)
            .await?;
        Ok(ApiResponse::succeed(document))
    }

    async fn apply(&self, mutation: Mutation) -> Result<Modified> {
        let outcome = self
            .store
            .update_one(&mutation.filter, &mutation.update)
            .await?;
        debug!(
            matched = outcome.matched_count,
            modified = outcome.modified_count,
            "applied catalog mutation"
        );
        Ok(ApiResponse::succeed(ModifiedCount::new(outcome.modified_count)))
    }
}
