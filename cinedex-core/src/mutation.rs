//! Single-document write commands.
//!
//! Every mutation targets the first document whose `item_id` matches. Stores
//! apply the command atomically and report how many documents actually
//! changed, so a zero count is how callers detect a no-op.

use cinedex_model::{Document, MovieField, UpdateMovieInfoRequest};
use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::query::Filter;

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateCommand {
    /// Overwrite the given top-level keys.
    Set(Document),
    /// Append `value` to the array at `field`, creating the array if absent.
    Push { field: MovieField, value: Value },
    /// Remove every occurrence of `value` from the array at `field`.
    Pull { field: MovieField, value: Value },
}

impl UpdateCommand {
    /// Apply the command in place and report whether the document changed.
    ///
    /// A field that holds something other than an array is left alone, and
    /// so is a missing field on removal.
    pub fn apply(&self, document: &mut Document) -> bool {
        match self {
            UpdateCommand::Set(patch) => {
                let mut changed = false;
                for (key, value) in patch {
                    if document.get(key) != Some(value) {
                        document.insert(key.clone(), value.clone());
                        changed = true;
                    }
                }
                changed
            }
            UpdateCommand::Push { field, value } => {
                match document
                    .entry(field.key())
                    .or_insert_with(|| Value::Array(Vec::new()))
                {
                    Value::Array(items) => {
                        items.push(value.clone());
                        true
                    }
                    _ => false,
                }
            }
            UpdateCommand::Pull { field, value } => match document.get_mut(field.key()) {
                Some(Value::Array(items)) => {
                    let before = items.len();
                    items.retain(|item| item != value);
                    items.len() != before
                }
                _ => false,
            },
        }
    }
}

/// A command bound to the document it targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub filter: Filter,
    pub update: UpdateCommand,
}

/// Builds append/remove mutations on the array fields of one movie.
pub struct ArrayMutator;

impl ArrayMutator {
    pub fn append(
        item_id: i64,
        field: MovieField,
        value: impl Into<String>,
    ) -> Result<Mutation> {
        Self::ensure_array(field)?;
        Ok(Mutation {
            filter: Filter::item_id(item_id),
            update: UpdateCommand::Push {
                field,
                value: Value::String(value.into()),
            },
        })
    }

    /// Removes all occurrences, not just the first.
    pub fn remove(
        item_id: i64,
        field: MovieField,
        value: impl Into<String>,
    ) -> Result<Mutation> {
        Self::ensure_array(field)?;
        Ok(Mutation {
            filter: Filter::item_id(item_id),
            update: UpdateCommand::Pull {
                field,
                value: Value::String(value.into()),
            },
        })
    }

    fn ensure_array(field: MovieField) -> Result<()> {
        if field.is_array() {
            Ok(())
        } else {
            Err(CatalogError::NotAnArray(field.key().to_owned()))
        }
    }
}

/// Scalar field update for `updateMovieInfo`.
///
/// Each of title, director and cast is written when present and non-empty.
/// Returns `None` when the request carries nothing to write.
pub fn movie_info_update(request: &UpdateMovieInfoRequest) -> Option<Mutation> {
    let mut patch = Document::new();
    let fields = [
        (MovieField::Title, &request.title),
        (MovieField::DirectedBy, &request.directed_by),
        (MovieField::Starring, &request.starring),
    ];
    for (field, value) in fields {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            patch.insert(field.key().to_owned(), Value::String(value.to_owned()));
        }
    }

    if patch.is_empty() {
        return None;
    }
    Some(Mutation {
        filter: Filter::item_id(request.movie_item_id),
        update: UpdateCommand::Set(patch),
    })
}
