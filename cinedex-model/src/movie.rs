use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Raw schemaless record as held by a document store.
pub type Document = Map<String, Value>;

/// Known keys of a movie document.
///
/// Filters, projections, sorts and mutations address fields through this enum
/// so a typo in a key is a compile error rather than an empty result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieField {
    ItemId,
    Title,
    DirectedBy,
    Starring,
    AvgRating,
    Tags,
    Reviews,
}

impl MovieField {
    pub const ALL: [MovieField; 7] = [
        MovieField::ItemId,
        MovieField::Title,
        MovieField::DirectedBy,
        MovieField::Starring,
        MovieField::AvgRating,
        MovieField::Tags,
        MovieField::Reviews,
    ];

    /// Document key as stored.
    pub const fn key(self) -> &'static str {
        match self {
            MovieField::ItemId => "item_id",
            MovieField::Title => "title",
            MovieField::DirectedBy => "directedBy",
            MovieField::Starring => "starring",
            MovieField::AvgRating => "avgRating",
            MovieField::Tags => "tags",
            MovieField::Reviews => "reviews",
        }
    }

    pub const fn is_array(self) -> bool {
        matches!(self, MovieField::Tags | MovieField::Reviews)
    }
}

impl fmt::Display for MovieField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A movie catalog entry.
///
/// Every field is optional because the store is schemaless and projections
/// return partial documents. Keys the model does not know about are kept in
/// `extra` so "everything except ..." lookups pass them through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        rename = "directedBy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub directed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starring: Option<String>,
    #[serde(
        rename = "avgRating",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub avg_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MovieDocument {
    pub fn into_document(self) -> serde_json::Result<Document> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            // MovieDocument always serializes as an object.
            _ => Ok(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_document_serializes_only_present_fields() {
        let doc = MovieDocument {
            title: Some("Heat".into()),
            avg_rating: Some(4.2),
            ..Default::default()
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value, json!({ "title": "Heat", "avgRating": 4.2 }));
    }

    #[test]
    fn unknown_keys_round_trip_through_extra() {
        let raw = json!({
            "item_id": 7,
            "title": "Alien",
            "directedBy": "Ridley Scott",
            "imdbId": 78748,
            "popularity": 12.5
        });

        let doc: MovieDocument = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(doc.item_id, Some(7));
        assert_eq!(doc.directed_by.as_deref(), Some("Ridley Scott"));
        assert_eq!(doc.extra.get("imdbId"), Some(&json!(78748)));

        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }

    #[test]
    fn integer_rating_decodes_as_float() {
        let doc: MovieDocument =
            serde_json::from_value(json!({ "avgRating": 4 })).unwrap();
        assert_eq!(doc.avg_rating, Some(4.0));
    }

    #[test]
    fn field_keys_match_document_schema() {
        assert_eq!(MovieField::DirectedBy.key(), "directedBy");
        assert_eq!(MovieField::AvgRating.to_string(), "avgRating");
        assert!(MovieField::Tags.is_array());
        assert!(!MovieField::Title.is_array());
    }
}
