//! Checklist entries built from backing-table rows.

use std::collections::HashMap;

use common::CellValue;
use sheet_store::RawTable;

use crate::normalize::normalize_header;
use crate::rules::CollisionPolicy;
use crate::{Result, ScoringError};

/// One submitted inspection, keyed by normalized field name.
///
/// Keys are unique and keep the column order of the source table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChecklistEntry {
    fields: Vec<(String, CellValue)>,
}

impl ChecklistEntry {
    /// Creates an entry with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an entry from key/value pairs; a repeated key overwrites the
    /// earlier value in place.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        let mut entry = Self::new();
        for (key, value) in pairs {
            entry.insert(key.into(), value.into());
        }
        entry
    }

    /// Sets `key` to `value`, keeping the original position of an existing key.
    pub fn insert(&mut self, key: String, value: CellValue) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates over fields in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over values in column order.
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Decides which column feeds each normalized key.
///
/// Returns `(column_index, key)` pairs in column order.
fn plan_columns(headers: &[String], policy: CollisionPolicy) -> Result<Vec<(usize, String)>> {
    let mut owner: HashMap<String, usize> = HashMap::new();
    let mut plan: Vec<(usize, String)> = Vec::with_capacity(headers.len());

    for (index, header) in headers.iter().enumerate() {
        let key = normalize_header(header);
        let Some(&previous) = owner.get(&key) else {
            owner.insert(key.clone(), index);
            plan.push((index, key));
            continue;
        };

        tracing::warn!(
            key = %key,
            first = %headers[previous],
            second = %header,
            policy = %policy,
            "headers normalize to the same key"
        );

        match policy {
            CollisionPolicy::FirstWins => {}
            CollisionPolicy::LastWins => {
                if let Some(slot) = plan.iter_mut().find(|(_, k)| *k == key) {
                    slot.0 = index;
                }
                owner.insert(key, index);
            }
            CollisionPolicy::Reject => {
                return Err(ScoringError::HeaderCollision {
                    key,
                    first: headers[previous].clone(),
                    second: header.clone(),
                });
            }
        }
    }

    Ok(plan)
}

/// Builds one entry per data row, most recent submission first.
pub fn entries_from_table(table: &RawTable, policy: CollisionPolicy) -> Result<Vec<ChecklistEntry>> {
    let plan = plan_columns(&table.headers, policy)?;

    let entries = table
        .rows
        .iter()
        .rev()
        .map(|row| ChecklistEntry {
            fields: plan
                .iter()
                .map(|(index, key)| (key.clone(), row.get(*index).cloned().unwrap_or_default()))
                .collect(),
        })
        .collect();

    Ok(entries)
}
