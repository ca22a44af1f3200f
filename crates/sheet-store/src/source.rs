use async_trait::async_trait;

use crate::{RawTable, Result};

/// Read access to named backing tables.
///
/// Every call performs one full read of the table; implementations hold no
/// per-request state and must be thread-safe (Send + Sync).
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Reads the whole table, header row first.
    ///
    /// Fails with [`SheetStoreError::SheetNotFound`](crate::SheetStoreError::SheetNotFound)
    /// when no sheet has the given name. An existing sheet with no header
    /// and no rows is returned as an empty [`RawTable`].
    async fn read_table(&self, sheet_name: &str) -> Result<RawTable>;

    /// Lists the names of all sheets in the store.
    async fn sheet_names(&self) -> Result<Vec<String>>;
}
