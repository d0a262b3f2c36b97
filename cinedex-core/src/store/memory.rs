use std::cmp::Ordering;
use std::path::Path;

use async_trait::async_trait;
use cinedex_model::{Document, MovieDocument};
use parking_lot::RwLock;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

use super::{DocumentStore, StoreDiagnostics, UpdateOutcome};
use crate::error::{CatalogError, Result};
use crate::mutation::UpdateCommand;
use crate::query::{Condition, Filter, FindQuery, Projection, SortOrder, SortSpec};

pub const DEFAULT_COLLECTION: &str = "movies";

/// Process-local store backed by a vector of documents.
///
/// Documents keep insertion order, which is the "store order" used for
/// first-match lookups and sort ties. A single write lock around each update
/// makes single-document mutations atomic.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    collection: String,
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_owned(),
            documents: RwLock::new(documents),
        }
    }

    pub fn from_movies(movies: Vec<MovieDocument>) -> Result<Self> {
        let documents = movies
            .into_iter()
            .map(MovieDocument::into_document)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(Self::with_documents(documents))
    }

    /// Seed from a file holding a JSON array of movie objects.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let documents: Vec<Document> = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            count = documents.len(),
            "seeded in-memory movie store"
        );
        Ok(Self::with_documents(documents))
    }

    pub fn insert(&self, document: Document) {
        self.documents.write().push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find(&self, query: &FindQuery) -> Result<Vec<Document>> {
        let filter = CompiledFilter::compile(&query.filter)?;
        let documents = self.documents.read();

        let mut matched: Vec<&Document> =
            documents.iter().filter(|doc| filter.matches(doc)).collect();
        if let Some(sort) = query.sort {
            // sort_by is stable, so ties keep insertion order
            matched.sort_by(|a, b| compare_for_sort(a, b, sort));
        }

        let skip = usize::try_from(query.skip()).unwrap_or(usize::MAX);
        let limit = query
            .limit()
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        let page: Vec<Document> = matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|doc| query.projection.apply(doc.clone()))
            .collect();
        debug!(skip, returned = page.len(), "in-memory find");
        Ok(page)
    }

    async fn find_one(
        &self,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Option<Document>> {
        let filter = CompiledFilter::compile(filter)?;
        let documents = self.documents.read();
        Ok(documents
            .iter()
            .find(|doc| filter.matches(doc))
            .map(|doc| projection.apply(doc.clone())))
    }

    async fn update_one(
        &self,
        filter: &Filter,
        update: &UpdateCommand,
    ) -> Result<UpdateOutcome> {
        let filter = CompiledFilter::compile(filter)?;
        let mut documents = self.documents.write();
        let Some(target) = documents.iter_mut().find(|doc| filter.matches(doc)) else {
            return Ok(UpdateOutcome::NONE);
        };

        let modified = update.apply(target);
        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics> {
        Ok(StoreDiagnostics {
            backend: "memory",
            collection: self.collection.clone(),
            document_count: self.len() as u64,
        })
    }
}

/// A filter with its patterns compiled once per call.
struct CompiledFilter<'a> {
    conditions: Vec<(&'a Condition, Option<Regex>)>,
}

impl<'a> CompiledFilter<'a> {
    fn compile(filter: &'a Filter) -> Result<Self> {
        let conditions = filter
            .conditions()
            .iter()
            .map(|condition| {
                let regex = match condition {
                    Condition::Matches { pattern, .. } => {
                        Some(Regex::new(pattern.as_str()).map_err(|err| {
                            CatalogError::InvalidPattern(err.to_string())
                        })?)
                    }
                    _ => None,
                };
                Ok((condition, regex))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { conditions })
    }

    fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(condition, regex)| condition_matches(condition, regex.as_ref(), document))
    }
}

fn condition_matches(condition: &Condition, regex: Option<&Regex>, document: &Document) -> bool {
    let value = document.get(condition.field().key());
    match condition {
        Condition::Eq { value: expected, .. } => value.is_some_and(|v| values_equal(v, expected)),
        Condition::Between { lower, upper, .. } => value
            .and_then(Value::as_f64)
            .is_some_and(|n| n >= *lower && n <= *upper),
        Condition::GreaterThan { threshold, .. } => {
            value.and_then(Value::as_f64).is_some_and(|n| n > *threshold)
        }
        Condition::Matches { .. } => match (value.and_then(Value::as_str), regex) {
            (Some(s), Some(regex)) => regex.is_match(s),
            _ => false,
        },
        Condition::Contains { value: needle, .. } => value
            .and_then(Value::as_array)
            .is_some_and(|items| items.iter().any(|item| item.as_str() == Some(needle.as_str()))),
    }
}

/// Numbers compare by value so `1` equals `1.0`.
fn values_equal(stored: &Value, expected: &Value) -> bool {
    match (stored, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => stored == expected,
    }
}

fn compare_for_sort(a: &Document, b: &Document, sort: SortSpec) -> Ordering {
    let key = sort.field.key();
    let a = a.get(key).and_then(Value::as_f64);
    let b = b.get(key).and_then(Value::as_f64);
    match (a, b) {
        (Some(a), Some(b)) => match sort.order {
            SortOrder::Ascending => a.total_cmp(&b),
            SortOrder::Descending => b.total_cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
