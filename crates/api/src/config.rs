//! Application configuration loaded from environment variables.

use std::str::FromStr;

use scoring::{CollisionPolicy, SummaryConfig};

/// Sheet the form writes its responses to.
pub const DEFAULT_SHEET_NAME: &str = "Respostas ao formulário 1";

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `SHEET_NAME` — backing table name (default: [`DEFAULT_SHEET_NAME`])
/// - `DATABASE_URL` — PostgreSQL source; unset serves the in-memory demo sheet
/// - `HISTORY_LIMIT` — entries in the history list (default: `10`)
/// - `UTC_OFFSET_MINUTES` — offset for rendered dates (default: `-180`)
/// - `COLLISION_POLICY` — `first-wins`, `last-wins` or `reject`
/// - `TIMESTAMP_FIELDS`, `OPERATOR_FIELDS`, `STATUS_FIELDS`, `CHECK_FIELDS` —
///   comma-separated key lists replacing the built-in ones
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub sheet_name: String,
    pub database_url: Option<String>,
    pub summary: SummaryConfig,
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %value, "ignoring invalid setting");
            default
        }),
    }
}

fn parse_list(raw: Option<String>) -> Option<Vec<String>> {
    let items: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    (!items.is_empty()).then_some(items)
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let mut summary = defaults.summary;

        summary.history_limit = parse_or("HISTORY_LIMIT", lookup("HISTORY_LIMIT"), summary.history_limit);
        summary.utc_offset_minutes = parse_or(
            "UTC_OFFSET_MINUTES",
            lookup("UTC_OFFSET_MINUTES"),
            summary.utc_offset_minutes,
        );
        if summary.utc_offset_minutes.abs() >= 24 * 60 {
            tracing::warn!(
                minutes = summary.utc_offset_minutes,
                "UTC offset out of range, using UTC"
            );
            summary.utc_offset_minutes = 0;
        }
        summary.collision_policy = parse_or::<CollisionPolicy>(
            "COLLISION_POLICY",
            lookup("COLLISION_POLICY"),
            summary.collision_policy,
        );
        if let Some(fields) = parse_list(lookup("TIMESTAMP_FIELDS")) {
            summary.aliases.timestamp = fields;
        }
        if let Some(fields) = parse_list(lookup("OPERATOR_FIELDS")) {
            summary.aliases.operator = fields;
        }
        if let Some(fields) = parse_list(lookup("STATUS_FIELDS")) {
            summary.aliases.status = fields;
        }
        if let Some(fields) = parse_list(lookup("CHECK_FIELDS")) {
            summary.rules.check_fields = fields;
        }

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            sheet_name: lookup("SHEET_NAME")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.sheet_name),
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            summary,
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            database_url: None,
            summary: SummaryConfig::default(),
        }
    }
}
