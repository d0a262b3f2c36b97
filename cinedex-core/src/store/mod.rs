//! Document store port.
//!
//! The catalog never talks to a database directly; it is handed a
//! [`DocumentStore`] at construction. Adapters live in the submodules.

use async_trait::async_trait;
use cinedex_model::Document;
use serde::Serialize;

use crate::error::Result;
use crate::mutation::UpdateCommand;
use crate::query::{FindQuery, Filter, Projection};

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::InMemoryDocumentStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresDocumentStore;

/// Result of a single-document update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateOutcome {
    pub const NONE: UpdateOutcome = UpdateOutcome {
        matched_count: 0,
        modified_count: 0,
    };
}

/// What a store reports about itself when asked whether it is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreDiagnostics {
    pub backend: &'static str,
    pub collection: String,
    pub document_count: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a listing: filter, sort, skip, limit, then project.
    async fn find(&self, query: &FindQuery) -> Result<Vec<Document>>;

    /// First matching document in store order.
    async fn find_one(
        &self,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Option<Document>>;

    /// Atomically apply `update` to the first matching document.
    async fn update_one(
        &self,
        filter: &Filter,
        update: &UpdateCommand,
    ) -> Result<UpdateOutcome>;

    /// Round-trip to the store. Fails when it is unreachable.
    async fn diagnostics(&self) -> Result<StoreDiagnostics>;
}
