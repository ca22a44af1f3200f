//! Compliance percentage of a checklist entry.

use crate::entry::ChecklistEntry;
use crate::rules::ScoringRules;

/// Rounds `part / whole × 100` half-up, in integer arithmetic.
///
/// `whole` must be non-zero and `part <= whole`.
pub(crate) fn percentage(part: u32, whole: u32) -> u8 {
    let (part, whole) = (u64::from(part), u64::from(whole));
    let rounded = (part * 200 + whole) / (whole * 2);
    rounded.min(100) as u8
}

/// Scores an entry in `[0, 100]`.
///
/// Inspected-system keys are scored first; when none is present every
/// non-empty text answer is scored against the wider fallback markers.
/// An answer carrying a negation such as `não conforme` is never compliant,
/// even though it contains `conforme`.
/// An entry with nothing to score gets `rules.default_compliance`.
pub fn compliance(entry: &ChecklistEntry, rules: &ScoringRules) -> u8 {
    let mut checked = 0u32;
    let mut compliant = 0u32;

    for (key, value) in entry.iter() {
        if !rules.is_check_field(key) {
            continue;
        }
        checked += 1;
        if rules.is_compliant(&value.to_string().to_lowercase(), &rules.compliant_markers) {
            compliant += 1;
        }
    }

    if checked == 0 {
        for text in entry.values().filter_map(|v| v.non_empty_text()) {
            checked += 1;
            if rules.is_compliant(&text.to_lowercase(), &rules.fallback_compliant_markers) {
                compliant += 1;
            }
        }
    }

    if checked == 0 {
        return rules.default_compliance;
    }
    percentage(compliant, checked)
}
