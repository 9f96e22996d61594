//! # Store Gateway
//!
//! Untyped statement execution for the console's raw tabular dumps.
//!
//! ## Contract
//! ```text
//! execute(sql, params) ──► rows affected (u64)
//! query(sql, params)   ──► Table { columns, rows: [[text, ...], ...] }
//!                             NULL → "null", INTEGER/REAL → decimal text
//! ```
//!
//! Every user-supplied value travels as a bound [`Param`]; statements are
//! fixed strings owned by the caller. Typed access lives in the
//! repositories; this is only for output that is printed column by column.

use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};
use tracing::debug;

use crate::error::DbResult;

// =============================================================================
// Parameters
// =============================================================================

/// A bound statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Text(String),
    Integer(i64),
    Null,
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Integer(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Into::into)
    }
}

fn bind_all<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>,
    params: &'q [Param],
) -> sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Param::Text(text) => query.bind(text.as_str()),
            Param::Integer(n) => query.bind(*n),
            Param::Null => query.bind(None::<String>),
        };
    }
    query
}

// =============================================================================
// Result Table
// =============================================================================

/// Ordered rows of column values rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names, empty when no row came back.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows joined with tabs, one string per row.
    pub fn tab_separated(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| row.join("\t"))
    }
}

fn render_value(row: &SqliteRow, idx: usize) -> DbResult<String> {
    let type_name = {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok("null".to_string());
        }
        raw.type_info().name().to_string()
    };

    let text = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => row.try_get_unchecked::<i64, _>(idx)?.to_string(),
        "REAL" => row.try_get_unchecked::<f64, _>(idx)?.to_string(),
        "BLOB" => format!("<{} bytes>", row.try_get_unchecked::<Vec<u8>, _>(idx)?.len()),
        _ => row.try_get_unchecked::<String, _>(idx)?,
    };
    Ok(text)
}

// =============================================================================
// Gateway
// =============================================================================

/// Statement executor on the session connection.
#[derive(Debug, Clone)]
pub struct Gateway {
    pool: SqlitePool,
}

impl Gateway {
    pub fn new(pool: SqlitePool) -> Self {
        Gateway { pool }
    }

    /// Runs a mutation and returns the number of rows it touched.
    pub async fn execute(&self, sql: &str, params: &[Param]) -> DbResult<u64> {
        debug!(sql = %sql, params = params.len(), "Executing statement");

        let result = bind_all(sqlx::query(sql), params)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Runs a query and renders every value as text.
    pub async fn query(&self, sql: &str, params: &[Param]) -> DbResult<Table> {
        debug!(sql = %sql, params = params.len(), "Running query");

        let fetched = bind_all(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;

        let mut table = Table::default();
        if let Some(first) = fetched.first() {
            table.columns = first
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect();
        }

        for row in &fetched {
            let values = (0..row.len())
                .map(|idx| render_value(row, idx))
                .collect::<DbResult<Vec<_>>>()?;
            table.rows.push(values);
        }

        Ok(table)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
