//! PostgreSQL adapter storing each movie as a JSONB row.
//!
//! Filters and updates are rendered with [`QueryBuilder`]; every user value
//! is a bound parameter. Field keys come from [`MovieField`] and are the only
//! text pushed into SQL directly.

use std::time::Duration;

use async_trait::async_trait;
use cinedex_model::{Document, MovieField};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, info};

use super::{DocumentStore, StoreDiagnostics, UpdateOutcome};
use crate::error::{CatalogError, Result};
use crate::mutation::UpdateCommand;
use crate::query::{Condition, Filter, FindQuery, Projection, SortOrder};

pub const TABLE: &str = "movie_documents";

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// SQLSTATE raised when `~` is handed a pattern PostgreSQL cannot compile.
const INVALID_REGULAR_EXPRESSION: &str = "2201B";

#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await
            .map_err(|e| {
                CatalogError::Unavailable(format!("Database connection failed: {e}"))
            })?;

        info!(max_connections, "connected to PostgreSQL movie store");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        crate::MIGRATOR.run(&self.pool).await.map_err(|e| {
            CatalogError::Store(format!("Migration failed: {e}"))
        })
    }

    /// Append documents in order. Used for seeding.
    pub async fn insert_many(&self, documents: Vec<Document>) -> Result<u64> {
        if documents.is_empty() {
            return Ok(0);
        }
        let mut qb: QueryBuilder<'static, Postgres> =
            QueryBuilder::new(format!("INSERT INTO {TABLE} (doc) "));
        qb.push_values(documents, |mut row, doc| {
            row.push_bind(Json(doc));
        });
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn find(&self, query: &FindQuery) -> Result<Vec<Document>> {
        let mut qb = find_query(query);
        debug!(sql = qb.sql(), skip = query.skip(), limit = ?query.limit(), "postgres find");

        let rows = qb
            .build_query_scalar::<Json<Document>>()
            .fetch_all(&self.pool)
            .await
            .map_err(pattern_error)?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn find_one(
        &self,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Option<Document>> {
        let mut qb = find_one_query(filter, projection);
        let row = qb
            .build_query_scalar::<Json<Document>>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|Json(doc)| doc))
    }

    async fn update_one(
        &self,
        filter: &Filter,
        update: &UpdateCommand,
    ) -> Result<UpdateOutcome> {
        let mut qb = update_query(filter, update);
        let (matched, modified) = qb
            .build_query_as::<(i64, i64)>()
            .fetch_one(&self.pool)
            .await?;
        Ok(UpdateOutcome {
            matched_count: matched.max(0) as u64,
            modified_count: modified.max(0) as u64,
        })
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {TABLE}"))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        Ok(StoreDiagnostics {
            backend: "postgres",
            collection: TABLE.to_owned(),
            document_count: count.max(0) as u64,
        })
    }
}

/// Raw patterns pass the Rust `regex` check but PostgreSQL uses its own
/// dialect, so its rejections are reported as pattern errors too.
fn pattern_error(err: sqlx::Error) -> CatalogError {
    match &err {
        sqlx::Error::Database(db)
            if db.code().as_deref() == Some(INVALID_REGULAR_EXPRESSION) =>
        {
            CatalogError::InvalidPattern(db.message().to_owned())
        }
        _ => CatalogError::Database(err),
    }
}

/// `SELECT <projection> ... WHERE ... ORDER BY ... OFFSET ... LIMIT ...`
pub(crate) fn find_query(query: &FindQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {} FROM {TABLE}",
        projection_sql(&query.projection, "doc")
    ));
    push_where(&mut qb, &query.filter, "doc");

    qb.push(" ORDER BY ");
    if let Some(sort) = query.sort {
        let direction = match sort.order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        qb.push(format!(
            "{} {direction} NULLS LAST, ",
            numeric_sql("doc", sort.field)
        ));
    }
    qb.push("id");

    if let Some(pagination) = query.pagination {
        qb.push(" OFFSET ")
            .push_bind(to_sql_count(pagination.skip()))
            .push(" LIMIT ")
            .push_bind(to_sql_count(pagination.limit()));
    }
    qb
}

pub(crate) fn find_one_query(
    filter: &Filter,
    projection: &Projection,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {} FROM {TABLE}",
        projection_sql(projection, "doc")
    ));
    push_where(&mut qb, filter, "doc");
    qb.push(" ORDER BY id LIMIT 1");
    qb
}

/// One statement: lock the first match, rewrite it if the command changes
/// anything, and report both counts.
pub(crate) fn update_query(
    filter: &Filter,
    update: &UpdateCommand,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("WITH target AS (SELECT id, doc FROM {TABLE}"));
    push_where(&mut qb, filter, "doc");
    qb.push(format!(
        " ORDER BY id LIMIT 1 FOR UPDATE), updated AS (UPDATE {TABLE} AS m SET doc = "
    ));

    match update {
        UpdateCommand::Set(patch) => {
            qb.push("target.doc || ")
                .push_bind(Json(patch.clone()))
                .push(" FROM target WHERE m.id = target.id AND NOT (target.doc @> ")
                .push_bind(Json(patch.clone()))
                .push(")");
        }
        UpdateCommand::Push { field, value } => {
            let key = field.key();
            qb.push(format!(
                "target.doc || jsonb_build_object('{key}', \
                 COALESCE(target.doc -> '{key}', '[]'::jsonb) || jsonb_build_array("
            ))
            .push_bind(Json(value.clone()))
            .push(format!(
                ")) FROM target WHERE m.id = target.id \
                 AND (target.doc -> '{key}' IS NULL \
                 OR jsonb_typeof(target.doc -> '{key}') = 'array')"
            ));
        }
        UpdateCommand::Pull { field, value } => {
            let key = field.key();
            qb.push(format!(
                "target.doc || jsonb_build_object('{key}', \
                 (SELECT COALESCE(jsonb_agg(e.value ORDER BY e.ord), '[]'::jsonb) \
                 FROM jsonb_array_elements(target.doc -> '{key}') \
                 WITH ORDINALITY AS e(value, ord) WHERE e.value <> "
            ))
            .push_bind(Json(value.clone()))
            .push(format!(
                ")) FROM target WHERE m.id = target.id \
                 AND jsonb_typeof(target.doc -> '{key}') = 'array' \
                 AND target.doc -> '{key}' @> jsonb_build_array("
            ))
            .push_bind(Json(value.clone()))
            .push(")");
        }
    }

    qb.push(
        " RETURNING m.id) SELECT (SELECT COUNT(*) FROM target) AS matched, \
         (SELECT COUNT(*) FROM updated) AS modified",
    );
    qb
}

fn push_where(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter, column: &str) {
    for (i, condition) in filter.conditions().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        push_condition(qb, condition, column);
    }
}

fn push_condition(
    qb: &mut QueryBuilder<'static, Postgres>,
    condition: &Condition,
    column: &str,
) {
    match condition {
        Condition::Eq { field, value } => {
            qb.push(format!("{column} -> '{}' = ", field.key()))
                .push_bind(Json(value.clone()));
        }
        Condition::Between {
            field,
            lower,
            upper,
        } => {
            qb.push(format!("{} BETWEEN ", numeric_sql(column, *field)))
                .push_bind(*lower)
                .push(" AND ")
                .push_bind(*upper);
        }
        Condition::GreaterThan { field, threshold } => {
            qb.push(format!("{} > ", numeric_sql(column, *field)))
                .push_bind(*threshold);
        }
        Condition::Matches { field, pattern } => {
            let key = field.key();
            qb.push(format!(
                "(jsonb_typeof({column} -> '{key}') = 'string' AND {column} ->> '{key}' ~ "
            ))
            .push_bind(pattern.as_str().to_owned())
            .push(")");
        }
        Condition::Contains { field, value } => {
            qb.push(format!(
                "{column} -> '{}' @> jsonb_build_array(",
                field.key()
            ))
            .push_bind(value.clone())
            .push("::text)");
        }
    }
}

/// Numeric value of a field, NULL when the field is missing or not a number.
fn numeric_sql(column: &str, field: MovieField) -> String {
    let key = field.key();
    format!(
        "(CASE WHEN jsonb_typeof({column} -> '{key}') = 'number' \
         THEN ({column} ->> '{key}')::float8 END)"
    )
}

fn projection_sql(projection: &Projection, column: &str) -> String {
    match projection {
        Projection::All => column.to_owned(),
        Projection::Exclude(fields) => fields
            .iter()
            .fold(column.to_owned(), |acc, f| format!("{acc} - '{}'", f.key())),
        Projection::Include(fields) => {
            let keys = fields
                .iter()
                .map(|f| format!("'{}'", f.key()))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "(SELECT COALESCE(jsonb_object_agg(p.key, p.value), '{{}}'::jsonb) \
                 FROM jsonb_each({column}) AS p WHERE p.key IN ({keys}))"
            )
        }
    }
}

fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
