//! Equipment view-model built from a checklist summary.
//!
//! Fields derived from the summary are *observed*. Everything else is a
//! fixed placeholder standing in for telemetry the checklist does not
//! collect, and is wrapped in a [`Reading`] with `is_simulated` set.

use common::{LatestView, Summary};
use serde::Serialize;

/// Nominal number of items on the inspection form.
pub const NOMINAL_ITEMS: u32 = 24;
/// Compliance assumed when the latest check carries no score.
pub const ASSUMED_COMPLIANCE: u8 = 85;
/// Average compliance shown when there is no history.
pub const EMPTY_HISTORY_COMPLIANCE: u8 = 89;

/// A displayed value and whether it was measured or made up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading<T> {
    pub value: T,
    pub is_simulated: bool,
}

impl<T> Reading<T> {
    pub fn observed(value: T) -> Self {
        Self {
            value,
            is_simulated: false,
        }
    }

    pub fn simulated(value: T) -> Self {
        Self {
            value,
            is_simulated: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Operational,
    Attention,
}

impl EquipmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "operacional",
            EquipmentStatus::Attention => "atencao",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    Hydraulic,
    Electrical,
}

/// Machine identity and maintenance plan; not part of the checklist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentIdentity {
    pub model: Reading<String>,
    pub serial_number: Reading<String>,
    pub hour_meter: Reading<String>,
    pub last_maintenance: Reading<String>,
    pub next_maintenance: Reading<String>,
    pub location: Reading<String>,
    pub shift: Reading<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentCheck {
    pub date: Reading<String>,
    pub time: Reading<String>,
    pub operator: Reading<String>,
    pub status: Reading<String>,
    pub elapsed_seconds: Reading<u32>,
    pub items_checked: Reading<u32>,
    /// Compliance scaled onto [`NOMINAL_ITEMS`].
    pub items_conforming: Reading<u32>,
    pub items_non_conforming: Reading<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatterySystem {
    pub charge_percent: Reading<u8>,
    pub voltage: Reading<f32>,
    pub temperature_c: Reading<i32>,
    pub remaining: Reading<String>,
    pub full_cycles: Reading<u32>,
    pub status: Reading<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydraulicSystem {
    pub oil_level_percent: Reading<u8>,
    pub operating_pressure_bar: Reading<u32>,
    pub temperature_c: Reading<i32>,
    pub leaks: Reading<bool>,
    pub last_oil_change: Reading<String>,
    pub status: Reading<String>,
}

/// A problem raised from the latest check's scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedProblem {
    pub id: u32,
    pub kind: ProblemKind,
    pub category: &'static str,
    pub item: &'static str,
    pub description: &'static str,
    pub priority: Priority,
    pub status: &'static str,
    pub action: &'static str,
    pub detected_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub hour: &'static str,
    pub minutes: u32,
    pub battery_percent: u8,
    pub problems: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub checks_today: Reading<usize>,
    pub checks_this_week: Reading<usize>,
    pub average_check_time: Reading<String>,
    pub average_compliance: Reading<u8>,
    pub operating_hours: Reading<u32>,
    pub pending_maintenances: Reading<u32>,
}

/// Everything the dashboard tabs display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentView {
    pub identity: EquipmentIdentity,
    pub status: Reading<EquipmentStatus>,
    pub current_operator: Reading<String>,
    pub current_check: CurrentCheck,
    pub battery: BatterySystem,
    pub hydraulics: HydraulicSystem,
    pub problems: Vec<DetectedProblem>,
    pub history: Vec<LatestView>,
    pub chart: Reading<Vec<ChartPoint>>,
    pub statistics: Statistics,
}

fn sim(value: &str) -> Reading<String> {
    Reading::simulated(value.to_string())
}

fn placeholder_identity() -> EquipmentIdentity {
    EquipmentIdentity {
        model: sim("Yale MR16"),
        serial_number: sim("MR16-2024-001"),
        hour_meter: sim("2.847h"),
        last_maintenance: sim("2025-06-15"),
        next_maintenance: sim("2025-08-15"),
        location: sim("Galpão A - Setor 3"),
        shift: sim("Tarde"),
    }
}

fn placeholder_battery() -> BatterySystem {
    BatterySystem {
        charge_percent: Reading::simulated(78),
        voltage: Reading::simulated(24.2),
        temperature_c: Reading::simulated(32),
        remaining: sim("4h 30min"),
        full_cycles: Reading::simulated(1247),
        status: sim("ok"),
    }
}

fn placeholder_hydraulics() -> HydraulicSystem {
    HydraulicSystem {
        oil_level_percent: Reading::simulated(85),
        operating_pressure_bar: Reading::simulated(180),
        temperature_c: Reading::simulated(45),
        leaks: Reading::simulated(false),
        last_oil_change: sim("2025-05-20"),
        status: sim("atencao"),
    }
}

fn placeholder_chart() -> Vec<ChartPoint> {
    [
        ("06:00", 0, 100, 0),
        ("08:00", 120, 85, 0),
        ("10:00", 240, 78, 1),
        ("12:00", 360, 65, 2),
        ("14:00", 480, 52, 3),
        ("16:00", 600, 38, 3),
        ("18:00", 720, 25, 4),
    ]
    .into_iter()
    .map(|(hour, minutes, battery_percent, problems)| ChartPoint {
        hour,
        minutes,
        battery_percent,
        problems,
    })
    .collect()
}

fn detect_problems(latest: &LatestView) -> Vec<DetectedProblem> {
    let detected_at = format!("{} {}", latest.date, latest.time);
    let mut problems = Vec::new();

    if latest.compliance.is_some_and(|c| c < 90) {
        problems.push(DetectedProblem {
            id: 1,
            kind: ProblemKind::Hydraulic,
            category: "Hidráulico",
            item: "Nível do óleo hidráulico",
            description: "Nível abaixo do recomendado",
            priority: Priority::Medium,
            status: "identificado",
            action: "Completar reservatório",
            detected_at: detected_at.clone(),
        });
    }
    if latest.problems.is_some_and(|p| p > 2) {
        problems.push(DetectedProblem {
            id: 2,
            kind: ProblemKind::Electrical,
            category: "Elétrico",
            item: "Luz de advertência intermitente",
            description: "Sinal luminoso piscando irregularmente",
            priority: Priority::High,
            status: "critico",
            action: "Verificar conexões elétricas",
            detected_at,
        });
    }
    problems
}

/// Rounded mean compliance of the history, half-up.
fn average_compliance(history: &[LatestView]) -> u8 {
    if history.is_empty() {
        return EMPTY_HISTORY_COMPLIANCE;
    }
    let n = history.len() as u64;
    let sum: u64 = history
        .iter()
        .map(|v| u64::from(v.compliance.unwrap_or(0)))
        .sum();
    ((2 * sum + n) / (2 * n)).min(100) as u8
}

/// Maps a summary onto the dashboard view; `today` is the pt-BR date of now.
pub fn map_summary(summary: &Summary, today: &str) -> EquipmentView {
    let latest = &summary.latest;
    let compliance = u32::from(latest.compliance.unwrap_or(ASSUMED_COMPLIANCE).min(100));

    let status = if latest.status == "aprovado" {
        EquipmentStatus::Operational
    } else {
        EquipmentStatus::Attention
    };

    EquipmentView {
        identity: placeholder_identity(),
        status: Reading::observed(status),
        current_operator: Reading::observed(latest.operator.clone()),
        current_check: CurrentCheck {
            date: Reading::observed(latest.date.clone()),
            time: Reading::observed(latest.time.clone()),
            operator: Reading::observed(latest.operator.clone()),
            status: Reading::observed(latest.status.clone()),
            elapsed_seconds: Reading::simulated(185),
            items_checked: Reading::simulated(NOMINAL_ITEMS),
            items_conforming: Reading::observed(NOMINAL_ITEMS * compliance / 100),
            items_non_conforming: Reading::observed(NOMINAL_ITEMS * (100 - compliance) / 100),
        },
        battery: placeholder_battery(),
        hydraulics: placeholder_hydraulics(),
        problems: detect_problems(latest),
        history: summary.history.clone(),
        chart: Reading::simulated(placeholder_chart()),
        statistics: Statistics {
            checks_today: Reading::observed(
                summary.history.iter().filter(|v| v.date == today).count(),
            ),
            checks_this_week: Reading::observed(summary.history.len()),
            average_check_time: sim("4:30"),
            average_compliance: Reading::observed(average_compliance(&summary.history)),
            operating_hours: Reading::simulated(2847),
            pending_maintenances: Reading::simulated(2),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn view(date: &str, status: &str, compliance: Option<u8>, problems: Option<u32>) -> LatestView {
        LatestView {
            date: date.to_string(),
            time: "07:30:00".to_string(),
            operator: "Ana".to_string(),
            status: status.to_string(),
            compliance,
            problems,
        }
    }

    fn summary(latest: LatestView, history: Vec<LatestView>) -> Summary {
        Summary {
            total: history.len(),
            latest,
            history,
            generated_at: Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn approved_check_with_full_compliance() {
        let latest = view("01/07/2025", "aprovado", Some(100), Some(0));
        let mapped = map_summary(&summary(latest.clone(), vec![latest]), "01/07/2025");

        assert_eq!(mapped.status.value, EquipmentStatus::Operational);
        assert!(!mapped.status.is_simulated);
        assert_eq!(mapped.current_check.items_conforming.value, 24);
        assert_eq!(mapped.current_check.items_non_conforming.value, 0);
        assert!(mapped.problems.is_empty());
        assert_eq!(mapped.statistics.checks_today.value, 1);
        assert_eq!(mapped.statistics.average_compliance.value, 100);
    }

    #[test]
    fn low_scores_raise_both_problems() {
        let latest = view("01/07/2025", "reprovado", Some(50), Some(3));
        let mapped = map_summary(&summary(latest.clone(), vec![latest]), "02/07/2025");

        assert_eq!(mapped.status.value, EquipmentStatus::Attention);
        assert_eq!(mapped.current_check.items_conforming.value, 12);
        assert_eq!(mapped.current_check.items_non_conforming.value, 12);
        let kinds: Vec<_> = mapped.problems.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![ProblemKind::Hydraulic, ProblemKind::Electrical]);
        assert_eq!(mapped.problems[1].priority, Priority::High);
        assert_eq!(mapped.problems[0].detected_at, "01/07/2025 07:30:00");
        assert_eq!(mapped.statistics.checks_today.value, 0);
    }

    #[test]
    fn placeholder_latest_and_empty_history_do_not_panic() {
        let latest = view("01/07/2025", "pendente", None, None);
        let mapped = map_summary(&summary(latest, Vec::new()), "01/07/2025");

        assert_eq!(mapped.status.value, EquipmentStatus::Attention);
        // 85% of 24 items, floored
        assert_eq!(mapped.current_check.items_conforming.value, 20);
        assert_eq!(mapped.current_check.items_non_conforming.value, 3);
        assert!(mapped.problems.is_empty());
        assert!(mapped.history.is_empty());
        assert_eq!(mapped.statistics.average_compliance.value, 89);
        assert_eq!(mapped.statistics.checks_this_week.value, 0);
    }

    #[test]
    fn average_compliance_rounds_half_up_and_counts_missing_as_zero() {
        let history = vec![
            view("01/07/2025", "aprovado", Some(90), Some(0)),
            view("01/07/2025", "aprovado", Some(85), Some(0)),
            view("01/07/2025", "aprovado", None, None),
        ];
        // (90 + 85 + 0) / 3 = 58.33
        assert_eq!(average_compliance(&history), 58);
        assert_eq!(average_compliance(&history[..2]), 88); // 87.5
    }

    #[test]
    fn telemetry_fields_are_flagged_simulated() {
        let latest = view("01/07/2025", "aprovado", Some(100), Some(0));
        let mapped = map_summary(&summary(latest, Vec::new()), "01/07/2025");

        assert!(mapped.identity.serial_number.is_simulated);
        assert!(mapped.battery.voltage.is_simulated);
        assert!(mapped.hydraulics.operating_pressure_bar.is_simulated);
        assert!(mapped.chart.is_simulated);
        assert_eq!(mapped.chart.value.len(), 7);
        assert!(mapped.statistics.operating_hours.is_simulated);
        assert!(!mapped.current_operator.is_simulated);
        assert!(!mapped.statistics.average_compliance.is_simulated);
    }

    #[test]
    fn simulated_flag_is_serialized() {
        let json = serde_json::to_value(Reading::simulated(24.2_f32)).unwrap();
        assert_eq!(json["is_simulated"], true);
    }
}
