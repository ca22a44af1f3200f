//! Plain-text rendering of the dashboard tabs.

use std::fmt::{self, Display, Write};

use chrono::FixedOffset;
use clap::ValueEnum;
use common::format::{format_date, format_time};

use crate::state::{DashboardState, Phase};
use crate::view_model::{EquipmentView, Priority, Reading};

const SIMULATED: &str = " (simulado)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    #[default]
    Overview,
    Systems,
    Problems,
    History,
    Checklist,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Visão Geral",
            Tab::Systems => "Sistemas",
            Tab::Problems => "Problemas",
            Tab::History => "Histórico",
            Tab::Checklist => "Checklist",
        }
    }
}

impl<T: Display> Display for Reading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if self.is_simulated {
            f.write_str(SIMULATED)?;
        }
        Ok(())
    }
}

/// Value, then `unit`, then the simulated label.
fn with_unit<T: Display>(reading: &Reading<T>, unit: &str) -> String {
    let label = if reading.is_simulated { SIMULATED } else { "" };
    format!("{}{unit}{label}", reading.value)
}

/// Inputs that do not come from the fetched summary.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub tab: Tab,
    pub offset: FixedOffset,
    pub form_url: Option<&'a str>,
}

/// Renders the whole screen for the current state.
pub fn render(state: &DashboardState, ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    let now = state.now();
    let _ = writeln!(
        out,
        "Checklist de Empilhadeira | {} {}",
        format_date(now, ctx.offset),
        format_time(now, ctx.offset)
    );

    match state.phase() {
        Phase::Loading => {
            out.push_str("Carregando dados...\n");
            return out;
        }
        Phase::Failed => {
            let _ = writeln!(
                out,
                "Erro ao carregar dados: {}",
                state.error().unwrap_or_default()
            );
            out.push_str("Pressione 'r' para tentar novamente.\n");
            return out;
        }
        Phase::Stale => {
            let _ = writeln!(
                out,
                "! Falha na atualização: {} (exibindo últimos dados)",
                state.error().unwrap_or_default()
            );
        }
        Phase::Ready => {}
    }

    if let Some(at) = state.last_update() {
        let _ = writeln!(out, "Última atualização: {}", format_time(at, ctx.offset));
    }
    if state.is_loading() {
        out.push_str("Atualizando...\n");
    }

    if let Some(view) = state.view() {
        let _ = writeln!(out, "== {} ==", ctx.tab.title());
        let body = match ctx.tab {
            Tab::Overview => overview(view),
            Tab::Systems => systems(view),
            Tab::Problems => problems(view),
            Tab::History => history(view),
            Tab::Checklist => checklist(view, ctx.form_url),
        };
        out.push_str(&body);
    }
    out
}

fn overview(view: &EquipmentView) -> String {
    let mut out = String::new();
    let id = &view.identity;
    let check = &view.current_check;
    let stats = &view.statistics;

    let _ = writeln!(out, "Equipamento: {} | Série: {}", id.model, id.serial_number);
    let _ = writeln!(out, "Status: {}", view.status.value.label());
    let _ = writeln!(out, "Operador atual: {}", view.current_operator);
    let _ = writeln!(out, "Local: {} | Turno: {}", id.location, id.shift);
    let _ = writeln!(out, "Horímetro: {}", id.hour_meter);
    let _ = writeln!(
        out,
        "Última verificação: {} {} ({})",
        check.date, check.time, check.status
    );
    let _ = writeln!(
        out,
        "Itens conformes: {} | Não conformes: {} | Verificados: {}",
        check.items_conforming, check.items_non_conforming, check.items_checked
    );
    let _ = writeln!(out, "Tempo de verificação: {}", with_unit(&check.elapsed_seconds, " s"));
    let _ = writeln!(
        out,
        "Verificações hoje: {} | Semana: {}",
        stats.checks_today, stats.checks_this_week
    );
    let _ = writeln!(
        out,
        "Conformidade média: {}",
        with_unit(&stats.average_compliance, "%")
    );
    let _ = writeln!(out, "Tempo médio de verificação: {}", stats.average_check_time);
    let _ = writeln!(
        out,
        "Horas de operação: {} | Manutenções pendentes: {}",
        stats.operating_hours, stats.pending_maintenances
    );
    let _ = writeln!(
        out,
        "Manutenção: última {} | próxima {}",
        id.last_maintenance, id.next_maintenance
    );
    out
}

fn systems(view: &EquipmentView) -> String {
    let mut out = String::new();
    let b = &view.battery;
    let h = &view.hydraulics;

    out.push_str("Bateria\n");
    let _ = writeln!(out, "  Carga: {}", with_unit(&b.charge_percent, "%"));
    let _ = writeln!(out, "  Tensão: {}", with_unit(&b.voltage, " V"));
    let _ = writeln!(out, "  Temperatura: {}", with_unit(&b.temperature_c, " °C"));
    let _ = writeln!(out, "  Autonomia: {}", b.remaining);
    let _ = writeln!(out, "  Ciclos: {}", b.full_cycles);
    let _ = writeln!(out, "  Status: {}", b.status);

    out.push_str("Sistema hidráulico\n");
    let _ = writeln!(out, "  Nível do óleo: {}", with_unit(&h.oil_level_percent, "%"));
    let _ = writeln!(out, "  Pressão: {}", with_unit(&h.operating_pressure_bar, " bar"));
    let _ = writeln!(out, "  Temperatura: {}", with_unit(&h.temperature_c, " °C"));
    let leaks = if h.leaks.value { "sim" } else { "não" };
    let _ = writeln!(
        out,
        "  Vazamentos: {}{}",
        leaks,
        if h.leaks.is_simulated { SIMULATED } else { "" }
    );
    let _ = writeln!(out, "  Última troca de óleo: {}", h.last_oil_change);
    let _ = writeln!(out, "  Status: {}", h.status);

    let sim = if view.chart.is_simulated { SIMULATED } else { "" };
    let _ = writeln!(out, "Uso ao longo do dia{sim}");
    for point in &view.chart.value {
        let _ = writeln!(
            out,
            "  {} | {:>3} min | bateria {:>3}% | problemas {}",
            point.hour, point.minutes, point.battery_percent, point.problems
        );
    }
    out
}

fn problems(view: &EquipmentView) -> String {
    if view.problems.is_empty() {
        return "Nenhum problema detectado.\n".to_string();
    }
    let mut out = String::new();
    for p in &view.problems {
        let priority = match p.priority {
            Priority::High => "ALTA",
            Priority::Medium => "MÉDIA",
        };
        let _ = writeln!(out, "#{} [{}] {} - {}", p.id, priority, p.category, p.item);
        let _ = writeln!(out, "   {}", p.description);
        let _ = writeln!(out, "   Ação: {} | Status: {}", p.action, p.status);
        let _ = writeln!(out, "   Detectado em: {}", p.detected_at);
    }
    out
}

fn history(view: &EquipmentView) -> String {
    if view.history.is_empty() {
        return "Nenhuma verificação registrada.\n".to_string();
    }
    let mut out = String::new();
    for v in &view.history {
        let compliance = v
            .compliance
            .map(|c| format!("{c}%"))
            .unwrap_or_else(|| "-".to_string());
        let problems = v
            .problems
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{} {} | {:<20} | {:<10} | conformidade {:>4} | problemas {}",
            v.date, v.time, v.operator, v.status, compliance, problems
        );
    }
    out
}

fn checklist(view: &EquipmentView, form_url: Option<&str>) -> String {
    let mut out = String::new();
    let check = &view.current_check;
    let _ = writeln!(
        out,
        "Última verificação por {} em {} {}",
        check.operator, check.date, check.time
    );
    match form_url {
        Some(url) => {
            let _ = writeln!(out, "Formulário de verificação: {url}");
        }
        None => out.push_str("Formulário de verificação não configurado.\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use common::{LatestView, Summary};
    use common::format::offset_from_minutes;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, hour, 0, 0).unwrap()
    }

    fn ready_state(compliance: u8, problems: u32) -> DashboardState {
        let latest = LatestView {
            date: "01/07/2025".to_string(),
            time: "07:30:00".to_string(),
            operator: "Ana".to_string(),
            status: "aprovado".to_string(),
            compliance: Some(compliance),
            problems: Some(problems),
        };
        let summary = Summary {
            latest: latest.clone(),
            history: vec![latest],
            total: 1,
            generated_at: at(10),
        };
        let mut state = DashboardState::new(at(12));
        state.apply_success(&summary, "01/07/2025", at(12));
        state
    }

    fn ctx(tab: Tab) -> RenderContext<'static> {
        RenderContext {
            tab,
            offset: offset_from_minutes(-180),
            form_url: Some("https://forms.example/checklist"),
        }
    }

    #[test]
    fn loading_screen() {
        let out = render(&DashboardState::new(at(12)), &ctx(Tab::Overview));
        assert!(out.contains("01/07/2025 09:00:00"));
        assert!(out.contains("Carregando"));
    }

    #[test]
    fn error_screen_without_data_offers_retry() {
        let mut state = DashboardState::new(at(12));
        state.apply_failure("HTTP status 500");
        let out = render(&state, &ctx(Tab::Overview));
        assert!(out.contains("HTTP status 500"));
        assert!(out.contains("tentar novamente"));
    }

    #[test]
    fn stale_banner_keeps_tab_content() {
        let mut state = ready_state(100, 0);
        state.apply_failure("connection refused");
        let out = render(&state, &ctx(Tab::Overview));
        assert!(out.contains("exibindo últimos dados"));
        assert!(out.contains("Operador atual: Ana"));
    }

    #[test]
    fn simulated_values_are_labelled() {
        let out = render(&ready_state(100, 0), &ctx(Tab::Systems));
        assert!(out.contains("Tensão: 24.2 V (simulado)\n"));
        assert!(out.contains("Carga: 78% (simulado)\n"));
        assert!(out.contains("Pressão: 180 bar (simulado)\n"));
        assert!(out.contains("Uso ao longo do dia (simulado)"));

        let out = render(&ready_state(100, 0), &ctx(Tab::Overview));
        assert!(out.contains("Operador atual: Ana\n"));
        assert!(out.contains("Tempo de verificação: 185 s (simulado)\n"));
        assert!(out.contains("Conformidade média: 100%\n"));
    }

    #[test]
    fn problems_tab_lists_detected_problems() {
        let out = render(&ready_state(50, 3), &ctx(Tab::Problems));
        assert!(out.contains("[MÉDIA] Hidráulico"));
        assert!(out.contains("[ALTA] Elétrico"));

        let out = render(&ready_state(100, 0), &ctx(Tab::Problems));
        assert!(out.contains("Nenhum problema"));
    }

    #[test]
    fn checklist_tab_shows_form_link() {
        let out = render(&ready_state(100, 0), &ctx(Tab::Checklist));
        assert!(out.contains("https://forms.example/checklist"));
    }
}
