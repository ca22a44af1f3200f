//! Problem count of a checklist entry.

use crate::entry::ChecklistEntry;
use crate::rules::{ScoringRules, contains_any};

/// Counts the non-empty text answers that report a problem.
///
/// Each answer counts at most once, however many markers it contains.
pub fn count_problems(entry: &ChecklistEntry, rules: &ScoringRules) -> u32 {
    entry
        .values()
        .filter_map(|v| v.non_empty_text())
        .filter(|text| contains_any(&text.to_lowercase(), &rules.problem_markers))
        .count() as u32
}
