//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p sheet-store --test postgres_integration
//! ```

use std::sync::Arc;

use common::CellValue;
use serial_test::serial;
use sheet_store::{PostgresSheetSource, SheetSource, SheetStoreError};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            sqlx::raw_sql(include_str!("../../../migrations/001_create_sheet_tables.sql"))
                .execute(&temp_pool)
                .await
                .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh source with its own pool and cleared tables
async fn get_test_source() -> PostgresSheetSource {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE sheet_rows, sheets")
        .execute(&pool)
        .await
        .unwrap();

    PostgresSheetSource::new(pool)
}

fn headers() -> Vec<String> {
    ["Carimbo de data/hora", "Nome do Operador", "Freios"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[tokio::test]
#[serial]
async fn create_sheet_and_read_back_rows_in_order() {
    let source = get_test_source().await;
    source.create_sheet("Respostas", &headers()).await.unwrap();

    for (operator, answer) in [("Ana", "Conforme"), ("Bia", "Não conforme"), ("Caio", "OK")] {
        source
            .append_row(
                "Respostas",
                &[
                    CellValue::text("2025-07-01T07:30:00Z"),
                    CellValue::text(operator),
                    CellValue::text(answer),
                ],
            )
            .await
            .unwrap();
    }

    let table = source.read_table("Respostas").await.unwrap();
    assert_eq!(table.headers, headers());
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[0][1], CellValue::text("Ana"));
    assert_eq!(table.rows[2][1], CellValue::text("Caio"));
    // RFC 3339 text comes back typed as a date
    assert!(matches!(table.rows[0][0], CellValue::Date(_)));
}

#[tokio::test]
#[serial]
async fn append_row_numbers_are_sequential() {
    let source = get_test_source().await;
    source.create_sheet("Respostas", &headers()).await.unwrap();

    let first = source.append_row("Respostas", &[]).await.unwrap();
    let second = source.append_row("Respostas", &[]).await.unwrap();
    assert_eq!(first, 1);
    assert_eq!(second, 2);

    // short rows are padded to the header width
    let table = source.read_table("Respostas").await.unwrap();
    assert_eq!(table.rows[0].len(), 3);
}

#[tokio::test]
#[serial]
async fn missing_sheet_is_reported() {
    let source = get_test_source().await;

    let err = source.read_table("Respostas").await.unwrap_err();
    assert!(matches!(err, SheetStoreError::SheetNotFound(_)));

    let err = source.append_row("Respostas", &[]).await.unwrap_err();
    assert!(matches!(err, SheetStoreError::SheetNotFound(_)));
}

#[tokio::test]
#[serial]
async fn sheet_without_header_reads_as_empty_table() {
    let source = get_test_source().await;
    source.create_sheet("Vazia", &[]).await.unwrap();

    let table = source.read_table("Vazia").await.unwrap();
    assert!(table.is_empty());
    assert_eq!(source.sheet_names().await.unwrap(), vec!["Vazia"]);
}
