use cinedex_model::MovieField;
use serde_json::Value;

use super::pagination::Pagination;
use super::pattern::MatchPattern;
use super::range::{RatingRange, clamp_rating};
use super::types::*;

/// Fluent API for building catalog listings.
///
/// Inputs are the normalized types ([`Pagination`], [`RatingRange`],
/// [`MatchPattern`]), so a query built here can only carry repaired values.
#[derive(Debug, Clone, Default)]
pub struct FindQueryBuilder {
    query: FindQuery,
}

impl FindQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // === Filter methods ===

    pub fn field_equals(
        mut self,
        field: MovieField,
        value: impl Into<Value>,
    ) -> Self {
        self.query.filter = self.query.filter.and(Condition::Eq {
            field,
            value: value.into(),
        });
        self
    }

    /// Rating inside an already-normalized inclusive range.
    pub fn rating_within(mut self, range: RatingRange) -> Self {
        self.query.filter = self.query.filter.and(Condition::Between {
            field: MovieField::AvgRating,
            lower: range.lower(),
            upper: range.upper(),
        });
        self
    }

    /// Rating strictly above `threshold`, clamped into the rating domain.
    pub fn rating_above(mut self, threshold: f64) -> Self {
        self.query.filter = self.query.filter.and(Condition::GreaterThan {
            field: MovieField::AvgRating,
            threshold: clamp_rating(threshold),
        });
        self
    }

    pub fn field_matches(mut self, field: MovieField, pattern: MatchPattern) -> Self {
        self.query.filter =
            self.query.filter.and(Condition::Matches { field, pattern });
        self
    }

    pub fn array_contains(
        mut self,
        field: MovieField,
        value: impl Into<String>,
    ) -> Self {
        self.query.filter = self.query.filter.and(Condition::Contains {
            field,
            value: value.into(),
        });
        self
    }

    // === Shape methods ===

    pub fn select(mut self, fields: &[MovieField]) -> Self {
        self.query.projection = Projection::include(fields);
        self
    }

    pub fn sort_by(mut self, field: MovieField, order: SortOrder) -> Self {
        self.query.sort = Some(SortSpec { field, order });
        self
    }

    pub fn best_rated_first(self) -> Self {
        self.sort_by(MovieField::AvgRating, SortOrder::Descending)
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.query.pagination = Some(pagination);
        self
    }

    pub fn build(self) -> FindQuery {
        self.query
    }
}

// === Listings ===

impl FindQuery {
    /// Every field of movies whose title is exactly `title`.
    pub fn by_title(title: impl Into<String>) -> Self {
        FindQueryBuilder::new()
            .field_equals(MovieField::Title, title.into())
            .build()
    }

    pub fn top_rated(pagination: Pagination) -> Self {
        FindQueryBuilder::new()
            .select(&[MovieField::Title, MovieField::AvgRating])
            .best_rated_first()
            .paginate(pagination)
            .build()
    }

    pub fn by_director(director: impl Into<String>) -> Self {
        FindQueryBuilder::new()
            .field_equals(MovieField::DirectedBy, director.into())
            .select(&[
                MovieField::Title,
                MovieField::AvgRating,
                MovieField::DirectedBy,
            ])
            .best_rated_first()
            .build()
    }

    pub fn in_rating_range(range: RatingRange, pagination: Pagination) -> Self {
        FindQueryBuilder::new()
            .rating_within(range)
            .select(&[MovieField::AvgRating, MovieField::Title])
            .paginate(pagination)
            .build()
    }

    pub fn better_than_rating(threshold: f64, pagination: Pagination) -> Self {
        FindQueryBuilder::new()
            .rating_above(threshold)
            .select(&[MovieField::AvgRating, MovieField::Title])
            .paginate(pagination)
            .build()
    }

    pub fn title_contains(pattern: MatchPattern, pagination: Pagination) -> Self {
        FindQueryBuilder::new()
            .field_matches(MovieField::Title, pattern)
            .select(&[MovieField::Title, MovieField::AvgRating])
            .best_rated_first()
            .paginate(pagination)
            .build()
    }

    pub fn with_tag(tag: impl Into<String>, pagination: Pagination) -> Self {
        FindQueryBuilder::new()
            .array_contains(MovieField::Tags, tag)
            .select(&[MovieField::Title, MovieField::Tags])
            .paginate(pagination)
            .build()
    }

    pub fn with_star(pattern: MatchPattern, pagination: Pagination) -> Self {
        FindQueryBuilder::new()
            .field_matches(MovieField::Starring, pattern)
            .select(&[MovieField::Title, MovieField::Starring])
            .paginate(pagination)
            .build()
    }
}

// === Single-document lookups ===

/// Filter and projection for a first-match lookup by `item_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub filter: Filter,
    pub projection: Projection,
}

impl Lookup {
    /// Everything except tags and reviews.
    pub fn basic_info(item_id: i64) -> Self {
        Self {
            filter: Filter::item_id(item_id),
            projection: Projection::exclude(&[MovieField::Tags, MovieField::Reviews]),
        }
    }

    pub fn reviews(item_id: i64) -> Self {
        Self {
            filter: Filter::item_id(item_id),
            projection: Projection::include(&[MovieField::Reviews]),
        }
    }

    pub fn tags(item_id: i64) -> Self {
        Self {
            filter: Filter::item_id(item_id),
            projection: Projection::include(&[MovieField::Title, MovieField::Tags]),
        }
    }
}
