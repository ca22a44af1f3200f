//! Summary builder: most-recent-first views over checklist entries.

use chrono::{DateTime, FixedOffset, Utc};
use common::{LatestView, Summary};
use serde::{Deserialize, Serialize};
use sheet_store::RawTable;

use crate::compliance::compliance;
use crate::entry::{ChecklistEntry, entries_from_table};
use crate::format::{format_date, format_time, offset_from_minutes, resolve_timestamp};
use crate::problems::count_problems;
use crate::rules::{CollisionPolicy, FieldAliases, ScoringRules};
use crate::Result;

/// Operator shown when no alias resolves.
pub const UNKNOWN_OPERATOR: &str = "N/A";
/// Status shown when no alias resolves, and on the placeholder view.
pub const PENDING_STATUS: &str = "pendente";

/// Everything the summary builder can be configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub rules: ScoringRules,
    pub aliases: FieldAliases,
    pub collision_policy: CollisionPolicy,
    /// Number of entries in the history list.
    pub history_limit: usize,
    /// Offset east of UTC used to render dates and read local timestamps.
    pub utc_offset_minutes: i32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            rules: ScoringRules::default(),
            aliases: FieldAliases::default(),
            collision_policy: CollisionPolicy::default(),
            history_limit: 10,
            utc_offset_minutes: -180,
        }
    }
}

/// Builds [`Summary`] payloads from checklist entries.
#[derive(Debug, Clone)]
pub struct SummaryBuilder {
    config: SummaryConfig,
    offset: FixedOffset,
}

impl SummaryBuilder {
    pub fn new(config: SummaryConfig) -> Self {
        let offset = offset_from_minutes(config.utc_offset_minutes);
        let config = SummaryConfig {
            rules: config.rules.normalized(),
            aliases: config.aliases.normalized(),
            ..config
        };
        Self { config, offset }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// View shown when there is no submission yet.
    pub fn placeholder(&self, now: DateTime<Utc>) -> LatestView {
        LatestView {
            date: format_date(now, self.offset),
            time: format_time(now, self.offset),
            operator: UNKNOWN_OPERATOR.to_string(),
            status: PENDING_STATUS.to_string(),
            compliance: None,
            problems: None,
        }
    }

    /// Formats one entry, resolving each field through its alias list.
    pub fn view(&self, entry: &ChecklistEntry, now: DateTime<Utc>) -> LatestView {
        let aliases = &self.config.aliases;
        let timestamp = resolve_timestamp(
            FieldAliases::first_present(entry, &aliases.timestamp),
            now,
            self.offset,
        );
        let operator = FieldAliases::first_present(entry, &aliases.operator)
            .map(ToString::to_string)
            .unwrap_or_else(|| UNKNOWN_OPERATOR.to_string());
        let status = FieldAliases::first_present(entry, &aliases.status)
            .map(ToString::to_string)
            .unwrap_or_else(|| PENDING_STATUS.to_string());

        LatestView {
            date: format_date(timestamp, self.offset),
            time: format_time(timestamp, self.offset),
            operator,
            status,
            compliance: Some(compliance(entry, &self.config.rules)),
            problems: Some(count_problems(entry, &self.config.rules)),
        }
    }

    /// Builds the summary from entries ordered most recent first.
    pub fn build(&self, entries: &[ChecklistEntry], now: DateTime<Utc>) -> Summary {
        let latest = match entries.first() {
            Some(entry) => self.view(entry, now),
            None => self.placeholder(now),
        };
        let history: Vec<LatestView> = entries
            .iter()
            .take(self.config.history_limit)
            .map(|entry| self.view(entry, now))
            .collect();

        metrics::counter!("checklist_entries_scored_total").increment(history.len() as u64);

        Summary {
            latest,
            history,
            total: entries.len(),
            generated_at: now,
        }
    }

    /// Normalizes a table and builds its summary.
    ///
    /// Returns `Ok(None)` for a table with neither header nor rows.
    #[tracing::instrument(skip(self, table), fields(rows = table.row_count()))]
    pub fn summarize_table(&self, table: &RawTable, now: DateTime<Utc>) -> Result<Option<Summary>> {
        if table.is_empty() {
            return Ok(None);
        }
        let entries = entries_from_table(table, self.config.collision_policy)?;
        Ok(Some(self.build(&entries, now)))
    }
}

impl Default for SummaryBuilder {
    fn default() -> Self {
        Self::new(SummaryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use common::CellValue;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 10, 15, 0, 0).unwrap()
    }

    fn entry(operator: &str, hour: u32) -> ChecklistEntry {
        ChecklistEntry::from_pairs([
            (
                "carimbo_de_data_e_hora",
                CellValue::Date(Utc.with_ymd_and_hms(2025, 7, 1, hour, 0, 0).unwrap()),
            ),
            ("nome_do_operador", CellValue::text(operator)),
            ("status_geral_da_empilhadeira", CellValue::text("aprovado")),
            ("sistema_hidraulico", CellValue::text("conforme")),
            ("freios", CellValue::text("não conforme")),
        ])
    }

    #[test]
    fn empty_list_yields_pending_placeholder() {
        let summary = SummaryBuilder::default().build(&[], now());
        assert_eq!(summary.latest.status, "pendente");
        assert_eq!(summary.latest.operator, "N/A");
        assert_eq!(summary.latest.date, "10/07/2025");
        assert_eq!(summary.latest.time, "12:00:00");
        assert_eq!(summary.latest.compliance, None);
        assert!(summary.history.is_empty());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.generated_at, now());
    }

    #[test]
    fn latest_view_scores_the_first_entry() {
        let summary = SummaryBuilder::default().build(&[entry("Ana", 10), entry("Bia", 9)], now());
        let latest = &summary.latest;
        assert_eq!(latest.operator, "Ana");
        assert_eq!(latest.status, "aprovado");
        assert_eq!(latest.date, "01/07/2025");
        assert_eq!(latest.time, "07:00:00");
        assert_eq!(latest.compliance, Some(50));
        assert_eq!(latest.problems, Some(1));
        assert_eq!(summary.history.len(), 2);
        assert_eq!(summary.history[0], summary.latest);
    }

    #[test]
    fn history_is_capped_but_total_is_not() {
        let entries: Vec<_> = (0..15).map(|i| entry(&format!("op{i}"), 8)).collect();
        let summary = SummaryBuilder::default().build(&entries, now());
        assert_eq!(summary.history.len(), 10);
        assert_eq!(summary.total, 15);
        assert_eq!(summary.history[9].operator, "op9");
    }

    #[test]
    fn history_limit_is_configurable() {
        let builder = SummaryBuilder::new(SummaryConfig {
            history_limit: 2,
            ..SummaryConfig::default()
        });
        let entries: Vec<_> = (0..5).map(|i| entry(&format!("op{i}"), 8)).collect();
        assert_eq!(builder.build(&entries, now()).history.len(), 2);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let bare = ChecklistEntry::from_pairs([("observacoes", CellValue::text("nada"))]);
        let view = SummaryBuilder::default().view(&bare, now());
        assert_eq!(view.operator, "N/A");
        assert_eq!(view.status, "pendente");
        assert_eq!(view.date, "10/07/2025");
        assert_eq!(view.time, "12:00:00");
    }

    #[test]
    fn custom_aliases_are_honoured() {
        let builder = SummaryBuilder::new(SummaryConfig {
            aliases: FieldAliases {
                operator: vec!["responsavel".to_string()],
                ..FieldAliases::default()
            },
            ..SummaryConfig::default()
        });
        let e = ChecklistEntry::from_pairs([("responsavel", "Caio"), ("operador", "Ana")]);
        assert_eq!(builder.view(&e, now()).operator, "Caio");
    }

    #[test]
    fn configured_fields_match_in_any_case_and_accent() {
        let builder = SummaryBuilder::new(SummaryConfig {
            rules: ScoringRules {
                check_fields: vec!["Freios".to_string()],
                ..ScoringRules::default()
            },
            aliases: FieldAliases {
                operator: vec!["Responsável".to_string()],
                ..FieldAliases::default()
            },
            ..SummaryConfig::default()
        });
        let e = ChecklistEntry::from_pairs([
            ("freios", "não conforme"),
            ("responsavel", "Ana"),
            ("obs", "ok"),
        ]);

        let view = builder.view(&e, now());
        assert_eq!(view.compliance, Some(0));
        assert_eq!(view.operator, "Ana");
    }

    #[test]
    fn summarize_table_reverses_rows() {
        let mut table = RawTable::with_headers(["Carimbo de data e hora", "Operador", "Freios"]);
        for i in 1..=5 {
            table.push_row(vec![
                CellValue::text(format!("0{i}/07/2025 08:00:00")),
                CellValue::text(format!("op{i}")),
                CellValue::text("OK"),
            ]);
        }

        let summary = SummaryBuilder::default()
            .summarize_table(&table, now())
            .unwrap()
            .unwrap();
        let recent: Vec<_> = summary.history[..3].iter().map(|v| v.operator.as_str()).collect();
        assert_eq!(recent, vec!["op5", "op4", "op3"]);
        assert_eq!(summary.latest.date, "05/07/2025");
        assert_eq!(summary.latest.time, "08:00:00");
        assert_eq!(summary.total, 5);
    }

    #[test]
    fn summarize_table_distinguishes_empty_from_header_only() {
        let builder = SummaryBuilder::default();
        assert!(builder.summarize_table(&RawTable::default(), now()).unwrap().is_none());

        let summary = builder
            .summarize_table(&RawTable::with_headers(["Operador"]), now())
            .unwrap()
            .unwrap();
        assert_eq!(summary.latest.status, "pendente");
        assert_eq!(summary.total, 0);
    }
}
