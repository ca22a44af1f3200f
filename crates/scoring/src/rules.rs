//! Configurable scoring rules and field alias lists.

use std::fmt;
use std::str::FromStr;

use common::CellValue;
use serde::{Deserialize, Serialize};

use crate::entry::ChecklistEntry;
use crate::error::ScoringError;
use crate::normalize::normalize_header;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Rewrites configured field names into entry-key form, dropping blanks.
fn normalize_keys(keys: &mut Vec<String>) {
    *keys = keys
        .iter()
        .map(|key| normalize_header(key))
        .filter(|key| !key.is_empty())
        .collect();
}

/// Substring rules used by the compliance scorer and problem counter.
///
/// Markers are matched against lowercased cell text, so they are stored
/// lowercase; [`ScoringRules::normalized`] enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Key substrings identifying inspected systems.
    pub check_fields: Vec<String>,
    /// Markers of a satisfactory answer on an inspected system.
    pub compliant_markers: Vec<String>,
    /// Markers of a satisfactory answer when no system key is present.
    pub fallback_compliant_markers: Vec<String>,
    /// Negations that override a satisfactory marker (`não conforme`).
    pub non_compliant_markers: Vec<String>,
    /// Markers of an answer reporting a problem.
    pub problem_markers: Vec<String>,
    /// Score reported when an entry has nothing to score.
    pub default_compliance: u8,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            check_fields: strings(&[
                "sistema_eletrico",
                "sistema_hidraulico",
                "freios",
                "luzes",
                "garfos",
                "bateria",
                "pneus",
                "estrutura",
            ]),
            compliant_markers: strings(&["conforme", "ok", "sim"]),
            fallback_compliant_markers: strings(&["conforme", "ok", "sim", "bom"]),
            non_compliant_markers: strings(&["não conforme", "nao conforme"]),
            problem_markers: strings(&["não conforme", "problema", "defeito", "não", "ruim"]),
            default_compliance: 85,
        }
    }
}

impl ScoringRules {
    /// Lowercases every marker, puts check fields in entry-key form and
    /// clamps the default score to 100.
    pub fn normalized(mut self) -> Self {
        normalize_keys(&mut self.check_fields);
        for list in [
            &mut self.compliant_markers,
            &mut self.fallback_compliant_markers,
            &mut self.non_compliant_markers,
            &mut self.problem_markers,
        ] {
            for marker in list.iter_mut() {
                *marker = marker.to_lowercase();
            }
        }
        self.default_compliance = self.default_compliance.min(100);
        self
    }

    /// Whether a lowercased answer is satisfactory under `markers`.
    pub(crate) fn is_compliant(&self, answer: &str, markers: &[String]) -> bool {
        contains_any(answer, markers) && !contains_any(answer, &self.non_compliant_markers)
    }

    /// Whether `key` names one of the inspected systems.
    pub fn is_check_field(&self, key: &str) -> bool {
        self.check_fields.iter().any(|field| key.contains(field.as_str()))
    }
}

/// Whether `haystack` contains at least one of `markers`.
pub(crate) fn contains_any(haystack: &str, markers: &[String]) -> bool {
    markers.iter().any(|marker| haystack.contains(marker.as_str()))
}

/// Ordered candidate keys for each semantic field of a view.
///
/// The first alias whose value has content wins, so a renamed form column
/// only needs a new alias, not a code change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAliases {
    pub timestamp: Vec<String>,
    pub operator: Vec<String>,
    pub status: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            timestamp: strings(&[
                "carimbo_de_data_e_hora",
                "carimbo_de_data_hora",
                "timestamp",
                "data_hora",
            ]),
            operator: strings(&["operador", "nome_do_operador", "nome_operador"]),
            status: strings(&["status_geral_da_empilhadeira", "status_geral", "status"]),
        }
    }
}

impl FieldAliases {
    /// Puts every alias in entry-key form, so `Responsável` matches `responsavel`.
    pub fn normalized(mut self) -> Self {
        for list in [&mut self.timestamp, &mut self.operator, &mut self.status] {
            normalize_keys(list);
        }
        self
    }

    /// Returns the first value among `aliases` that has content.
    pub fn first_present<'a>(entry: &'a ChecklistEntry, aliases: &[String]) -> Option<&'a CellValue> {
        aliases
            .iter()
            .filter_map(|alias| entry.get(alias))
            .find(|value| value.has_content())
    }
}

/// What to do when two headers normalize to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Keep the leftmost column.
    #[default]
    FirstWins,
    /// Keep the rightmost column.
    LastWins,
    /// Refuse to build entries.
    Reject,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollisionPolicy::FirstWins => "first-wins",
            CollisionPolicy::LastWins => "last-wins",
            CollisionPolicy::Reject => "reject",
        };
        f.write_str(name)
    }
}

impl FromStr for CollisionPolicy {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-wins" | "first" => Ok(CollisionPolicy::FirstWins),
            "last-wins" | "last" => Ok(CollisionPolicy::LastWins),
            "reject" | "error" => Ok(CollisionPolicy::Reject),
            other => Err(ScoringError::InvalidConfig(format!(
                "unknown collision policy \"{other}\""
            ))),
        }
    }
}
