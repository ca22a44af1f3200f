use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single cell of the backing table, as originally typed.
///
/// On the wire a cell is untagged: `null`, a boolean, a number, or a string.
/// Strings that parse as RFC 3339 are read back as [`CellValue::Date`], the
/// same way a spreadsheet types its timestamp column.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl CellValue {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Returns the string content if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the text content only when it is non-empty.
    ///
    /// String-value scans skip empty text.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.as_text().filter(|s| !s.is_empty())
    }

    /// Whether the cell holds something worth reading as a field value.
    pub fn has_content(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Text(s) => !s.trim().is_empty(),
            CellValue::Number(n) => !n.is_nan(),
            CellValue::Bool(_) | CellValue::Date(_) => true,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Date(d) => write!(f, "{}", d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Date(value)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            CellValue::Number(_) => serializer.serialize_none(),
            CellValue::Date(d) => {
                serializer.serialize_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawCell>::deserialize(deserializer)?;
        Ok(match raw {
            None => CellValue::Empty,
            Some(RawCell::Bool(b)) => CellValue::Bool(b),
            Some(RawCell::Number(n)) => CellValue::Number(n),
            Some(RawCell::Text(s)) => match DateTime::parse_from_rfc3339(&s) {
                Ok(d) => CellValue::Date(d.with_timezone(&Utc)),
                Err(_) => CellValue::Text(s),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_matches_plain_text_forms() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::text("Conforme").to_string(), "Conforme");
    }

    #[test]
    fn deserializes_json_array_of_cells() {
        let cells: Vec<CellValue> =
            serde_json::from_str(r#"[null, true, 42, "ok", "2025-07-01T10:30:00Z"]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                CellValue::Empty,
                CellValue::Bool(true),
                CellValue::Number(42.0),
                CellValue::text("ok"),
                CellValue::Date(Utc.with_ymd_and_hms(2025, 7, 1, 10, 30, 0).unwrap()),
            ]
        );
    }

    #[test]
    fn date_serializes_as_rfc3339_string() {
        let cell = CellValue::Date(Utc.with_ymd_and_hms(2025, 7, 1, 10, 30, 0).unwrap());
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, r#""2025-07-01T10:30:00.000Z""#);
    }

    #[test]
    fn non_finite_number_serializes_as_null() {
        let json = serde_json::to_string(&CellValue::Number(f64::NAN)).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn content_checks() {
        assert!(!CellValue::Empty.has_content());
        assert!(!CellValue::text("  ").has_content());
        assert!(CellValue::text("Ana").has_content());
        assert!(CellValue::Number(0.0).has_content());
        assert_eq!(CellValue::text("").non_empty_text(), None);
        assert_eq!(CellValue::Number(1.0).non_empty_text(), None);
    }
}
