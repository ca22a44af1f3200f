use common::CellValue;
use serde::{Deserialize, Serialize};

/// A backing table: header row plus data rows, oldest submission first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column titles as the form wrote them.
    pub headers: Vec<String>,
    /// Data rows aligned positionally to `headers`.
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Creates a table with the given header row and no data.
    pub fn with_headers<I, H>(headers: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a data row, padding or truncating it to the header width.
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(self.align(row));
    }

    /// Builder-style variant of [`RawTable::push_row`].
    pub fn row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        self.push_row(cells.into_iter().map(Into::into).collect());
        self
    }

    /// True when the table has neither a header row nor data.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Number of data rows (the header is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn align(&self, mut row: Vec<CellValue>) -> Vec<CellValue> {
        if !self.headers.is_empty() {
            row.resize(self.headers.len(), CellValue::Empty);
        }
        row
    }
}
