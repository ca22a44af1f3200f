use async_trait::async_trait;
use common::CellValue;
use sqlx::{PgPool, Row};

use crate::{RawTable, Result, SheetSource, SheetStoreError};

/// PostgreSQL-backed sheet source.
///
/// Header rows live in `sheets.headers`; submissions live in `sheet_rows`
/// and are read back in `row_number` order.
#[derive(Clone)]
pub struct PostgresSheetSource {
    pool: PgPool,
}

impl PostgresSheetSource {
    /// Creates a new PostgreSQL sheet source.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        Ok(Self::new(PgPool::connect(url).await?))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Creates a sheet or replaces its header row.
    #[tracing::instrument(skip(self, headers))]
    pub async fn create_sheet(&self, name: &str, headers: &[String]) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sheets (name, headers)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET headers = EXCLUDED.headers
            "#,
        )
        .bind(name)
        .bind(serde_json::to_value(headers)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Appends one submission and returns its 1-based row number.
    #[tracing::instrument(skip(self, cells))]
    pub async fn append_row(&self, name: &str, cells: &[CellValue]) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<String> =
            sqlx::query_scalar("SELECT name FROM sheets WHERE name = $1 FOR UPDATE")
                .bind(name)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(SheetStoreError::SheetNotFound(name.to_string()));
        }

        let last: Option<i64> =
            sqlx::query_scalar("SELECT MAX(row_number) FROM sheet_rows WHERE sheet_name = $1")
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;
        let row_number = last.unwrap_or(0) + 1;

        sqlx::query("INSERT INTO sheet_rows (sheet_name, row_number, cells) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(row_number)
            .bind(serde_json::to_value(cells)?)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row_number)
    }
}

#[async_trait]
impl SheetSource for PostgresSheetSource {
    #[tracing::instrument(skip(self))]
    async fn read_table(&self, sheet_name: &str) -> Result<RawTable> {
        let headers: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT headers FROM sheets WHERE name = $1")
                .bind(sheet_name)
                .fetch_optional(&self.pool)
                .await?;
        let headers = headers.ok_or_else(|| SheetStoreError::SheetNotFound(sheet_name.to_string()))?;
        let headers: Vec<String> = serde_json::from_value(headers)?;

        let rows = sqlx::query(
            r#"
            SELECT cells
            FROM sheet_rows
            WHERE sheet_name = $1
            ORDER BY row_number ASC
            "#,
        )
        .bind(sheet_name)
        .fetch_all(&self.pool)
        .await?;

        let mut table = RawTable {
            headers,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            let cells: serde_json::Value = row.try_get("cells")?;
            table.push_row(serde_json::from_value(cells)?);
        }

        metrics::counter!("sheet_rows_read_total").increment(table.row_count() as u64);
        Ok(table)
    }

    async fn sheet_names(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar("SELECT name FROM sheets ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }
}
