use cinedex_model::{Document, MovieField};
use serde_json::Value;

use super::pagination::Pagination;
use super::pattern::MatchPattern;

/// A single predicate on one document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the value exactly.
    Eq { field: MovieField, value: Value },
    /// Numeric field within `[lower, upper]`, both ends inclusive.
    Between {
        field: MovieField,
        lower: f64,
        upper: f64,
    },
    /// Numeric field strictly above `threshold`.
    GreaterThan { field: MovieField, threshold: f64 },
    /// String field contains a match for `pattern`.
    Matches {
        field: MovieField,
        pattern: MatchPattern,
    },
    /// Array field holds `value` at least once.
    Contains { field: MovieField, value: String },
}

impl Condition {
    pub fn field(&self) -> MovieField {
        match self {
            Condition::Eq { field, .. }
            | Condition::Between { field, .. }
            | Condition::GreaterThan { field, .. }
            | Condition::Matches { field, .. }
            | Condition::Contains { field, .. } => *field,
        }
    }
}

/// Conjunction of conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn item_id(id: i64) -> Self {
        Self::all().and(Condition::Eq {
            field: MovieField::ItemId,
            value: Value::from(id),
        })
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Which fields of a matched document are returned.
///
/// The store's own row identifier is never part of a document, so
/// "everything except the internal id" is simply [`Projection::All`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    All,
    Include(Vec<MovieField>),
    Exclude(Vec<MovieField>),
}

impl Projection {
    pub fn include(fields: &[MovieField]) -> Self {
        Projection::Include(fields.to_vec())
    }

    pub fn exclude(fields: &[MovieField]) -> Self {
        Projection::Exclude(fields.to_vec())
    }

    /// Apply the projection to a full document.
    pub fn apply(&self, mut document: Document) -> Document {
        match self {
            Projection::All => document,
            Projection::Include(fields) => {
                document.retain(|key, _| fields.iter().any(|f| f.key() == key));
                document
            }
            Projection::Exclude(fields) => {
                for field in fields {
                    document.remove(field.key());
                }
                document
            }
        }
    }

    /// Keys the projection names, in order.
    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            Projection::All => Vec::new(),
            Projection::Include(fields) | Projection::Exclude(fields) => {
                fields.iter().map(|f| f.key()).collect()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Numeric sort on one field. Documents without a number in that field
/// always come last; ties keep store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: MovieField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn descending(field: MovieField) -> Self {
        Self {
            field,
            order: SortOrder::Descending,
        }
    }
}

/// Everything a store needs to answer a listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Filter,
    pub projection: Projection,
    pub sort: Option<SortSpec>,
    /// `None` returns every match.
    pub pagination: Option<Pagination>,
}

impl FindQuery {
    pub fn skip(&self) -> u64 {
        self.pagination.map_or(0, |p| p.skip())
    }

    pub fn limit(&self) -> Option<u64> {
        self.pagination.map(|p| p.limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Document {
        match json!({
            "item_id": 1,
            "title": "Heat",
            "directedBy": "Michael Mann",
            "avgRating": 4.1,
            "tags": ["crime"],
            "reviews": ["tense"],
            "imdbId": 113277
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn include_keeps_only_named_fields() {
        let projection =
            Projection::include(&[MovieField::Title, MovieField::Tags]);
        let doc = projection.apply(sample());
        assert_eq!(
            Value::Object(doc),
            json!({ "title": "Heat", "tags": ["crime"] })
        );
    }

    #[test]
    fn include_skips_missing_fields() {
        let projection = Projection::include(&[MovieField::Starring]);
        assert!(projection.apply(sample()).is_empty());
    }

    #[test]
    fn exclude_keeps_unknown_fields() {
        let projection =
            Projection::exclude(&[MovieField::Tags, MovieField::Reviews]);
        let doc = projection.apply(sample());
        assert!(!doc.contains_key("tags"));
        assert!(!doc.contains_key("reviews"));
        assert_eq!(doc.get("imdbId"), Some(&json!(113277)));
    }

    #[test]
    fn unpaged_query_has_no_limit() {
        let query = FindQuery::default();
        assert_eq!(query.skip(), 0);
        assert_eq!(query.limit(), None);
    }
}
