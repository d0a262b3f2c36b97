//! # Cinedex Core
//!
//! Business logic for the Cinedex movie catalog: turning loosely constrained
//! request parameters into safe document-store queries, and applying
//! single-document mutations to tag and review arrays.
//!
//! ## Overview
//!
//! - **Normalization**: rating clamping, range repair, pagination and match
//!   pattern construction live in [`query`] as pure functions.
//! - **Query building**: [`query::FindQuery`] and [`query::Lookup`] describe
//!   each read operation as filter + projection + sort + pagination.
//! - **Mutations**: [`mutation::ArrayMutator`] appends to or pulls from array
//!   fields; [`mutation::movie_info_update`] writes scalar fields.
//! - **Stores**: the [`store::DocumentStore`] port with an in-memory adapter
//!   and a PostgreSQL JSONB adapter.
//! - **Façade**: [`catalog::CatalogService`] answers every catalog operation.
//!
//! ## Feature Flags
//!
//! - `postgres` (default): the PostgreSQL store and its migrations
//! - `pg-tests`: tests that need a live database (`DATABASE_URL`)
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use cinedex_core::{CatalogService, store::InMemoryDocumentStore};
//!
//! # async fn demo() -> cinedex_core::Result<()> {
//! let store = InMemoryDocumentStore::from_json_file("movies.json")?;
//! let catalog = CatalogService::new(Arc::new(store));
//! let page = catalog.top_rated(1, 10).await?;
//! println!("{} movies", page.data.len());
//! # Ok(())
//! # }
//! ```
#![allow(missing_docs)]

/// The catalog façade
pub mod catalog;

/// Error types
pub mod error;

/// Single-document write commands
pub mod mutation;

/// Input normalization and query construction
pub mod query;

/// Document store port and adapters
pub mod store;

#[cfg(feature = "postgres")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use catalog::CatalogService;
pub use error::{CatalogError, Result};
pub use store::{DocumentStore, InMemoryDocumentStore, StoreDiagnostics, UpdateOutcome};
#[cfg(feature = "postgres")]
pub use store::PostgresDocumentStore;
