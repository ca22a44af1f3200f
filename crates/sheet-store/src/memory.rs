use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::CellValue;
use tokio::sync::RwLock;

use crate::{RawTable, Result, SheetSource, SheetStoreError};

/// In-memory sheet source for tests and the demo server.
///
/// Provides the same interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemorySheetSource {
    sheets: Arc<RwLock<HashMap<String, RawTable>>>,
}

impl InMemorySheetSource {
    /// Creates a new source with no sheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a whole sheet.
    pub async fn insert_sheet(&self, name: impl Into<String>, table: RawTable) {
        self.sheets.write().await.insert(name.into(), table);
    }

    /// Appends one submission to an existing sheet.
    pub async fn append_row(&self, name: &str, row: Vec<CellValue>) -> Result<usize> {
        let mut sheets = self.sheets.write().await;
        let table = sheets
            .get_mut(name)
            .ok_or_else(|| SheetStoreError::SheetNotFound(name.to_string()))?;
        table.push_row(row);
        Ok(table.row_count())
    }

    /// Removes a sheet, returning it if it existed.
    pub async fn remove_sheet(&self, name: &str) -> Option<RawTable> {
        self.sheets.write().await.remove(name)
    }
}

#[async_trait]
impl SheetSource for InMemorySheetSource {
    async fn read_table(&self, sheet_name: &str) -> Result<RawTable> {
        let sheets = self.sheets.read().await;
        let table = sheets
            .get(sheet_name)
            .cloned()
            .ok_or_else(|| SheetStoreError::SheetNotFound(sheet_name.to_string()))?;

        metrics::counter!("sheet_rows_read_total").increment(table.row_count() as u64);
        Ok(table)
    }

    async fn sheet_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<_> = self.sheets.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTable {
        RawTable::with_headers(["Carimbo de data/hora", "Operador", "Freios"])
            .row(["2025-07-01T07:30:00Z", "Ana", "Conforme"])
    }

    #[tokio::test]
    async fn read_returns_inserted_sheet() {
        let source = InMemorySheetSource::new();
        source.insert_sheet("Respostas", sample()).await;

        let table = source.read_table("Respostas").await.unwrap();
        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.row_count(), 1);
    }

    #[tokio::test]
    async fn missing_sheet_is_an_error() {
        let source = InMemorySheetSource::new();
        let err = source.read_table("Respostas").await.unwrap_err();
        assert!(matches!(err, SheetStoreError::SheetNotFound(ref name) if name == "Respostas"));
        assert!(err.to_string().contains("Respostas"));
    }

    #[tokio::test]
    async fn append_row_extends_existing_sheet() {
        let source = InMemorySheetSource::new();
        source.insert_sheet("Respostas", sample()).await;

        let count = source
            .append_row("Respostas", vec!["2025-07-02T07:30:00Z".into(), "Bia".into()])
            .await
            .unwrap();
        assert_eq!(count, 2);

        let table = source.read_table("Respostas").await.unwrap();
        assert_eq!(table.rows[1][1], CellValue::text("Bia"));
        assert_eq!(table.rows[1][2], CellValue::Empty);
    }

    #[tokio::test]
    async fn append_row_to_missing_sheet_fails() {
        let source = InMemorySheetSource::new();
        let result = source.append_row("nope", vec![]).await;
        assert!(matches!(result, Err(SheetStoreError::SheetNotFound(_))));
    }

    #[tokio::test]
    async fn sheet_names_are_sorted() {
        let source = InMemorySheetSource::new();
        source.insert_sheet("b", RawTable::default()).await;
        source.insert_sheet("a", RawTable::default()).await;
        assert_eq!(source.sheet_names().await.unwrap(), vec!["a", "b"]);

        source.remove_sheet("a").await;
        assert_eq!(source.sheet_names().await.unwrap(), vec!["b"]);
    }
}
