use super::pipeline::Transform;
use model::{core::value::Value, records::table::Table};
use regex::Regex;

/// Removes every occurrence of `marker` from `text`.
pub fn strip_marker(text: &str, marker: &str) -> String {
    if marker.is_empty() || !text.contains(marker) {
        return text.to_string();
    }
    text.replace(marker, "")
}

/// Returns the unit count embedded after a quantity-per-package marker, or the
/// input unchanged when there is no marker or no digits follow it.
pub fn extract_units(text: &str, markers: &[String], pattern: &Regex) -> String {
    if !markers.iter().any(|m| text.contains(m.as_str())) {
        return text.to_string();
    }

    pattern
        .captures(text)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| text.to_string())
}

/// Strips the localized "expiry date" label from the expiry column.
pub struct ExpiryDateCleaner {
    column: String,
    marker: String,
}

impl ExpiryDateCleaner {
    pub fn new(column: &str, marker: &str) -> Self {
        Self {
            column: column.to_string(),
            marker: marker.to_string(),
        }
    }
}

impl Transform for ExpiryDateCleaner {
    fn apply(&self, mut table: Table) -> Table {
        table.map_column(&self.column, |value| {
            Value::String(strip_marker(&value.to_cell_string(), &self.marker))
        });
        table
    }
}

/// Reduces the units column to the bare per-package count where one can be
/// found.
pub struct UnitsExtractor {
    column: String,
    markers: Vec<String>,
    pattern: Regex,
}

impl UnitsExtractor {
    pub fn new(column: &str, markers: Vec<String>, pattern: Regex) -> Self {
        Self {
            column: column.to_string(),
            markers,
            pattern,
        }
    }
}

impl Transform for UnitsExtractor {
    fn apply(&self, mut table: Table) -> Table {
        table.map_column(&self.column, |value| {
            Value::String(extract_units(
                &value.to_cell_string(),
                &self.markers,
                &self.pattern,
            ))
        });
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn markers() -> Vec<String> {
        vec!["入数".to_string(), "入り数".to_string()]
    }

    fn pattern() -> Regex {
        Regex::new(r"入り?数(\d+)").unwrap()
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("賞味期限2025/03/01", "賞味期限"), "2025/03/01");
        assert_eq!(strip_marker("2025/03/01", "賞味期限"), "2025/03/01");
        assert_eq!(strip_marker("賞味期限:賞味期限", "賞味期限"), ":");
        assert_eq!(strip_marker("", "賞味期限"), "");
        assert_eq!(strip_marker("abc", ""), "abc");
    }

    #[test]
    fn test_extract_units() {
        let (m, p) = (markers(), pattern());
        assert_eq!(extract_units("入数12", &m, &p), "12");
        assert_eq!(extract_units("1ケース入り数24個", &m, &p), "24");
        assert_eq!(extract_units("入数１２", &m, &p), "１２");
        assert_eq!(extract_units("入数12 入数6", &m, &p), "12");
    }

    #[test]
    fn test_extract_units_leaves_unmatched_values() {
        let (m, p) = (markers(), pattern());
        assert_eq!(extract_units("入数", &m, &p), "入数");
        assert_eq!(extract_units("入数 12", &m, &p), "入数 12");
        assert_eq!(extract_units("12個", &m, &p), "12個");
        assert_eq!(extract_units("", &m, &p), "");
    }

    #[test]
    fn test_cleaners_skip_missing_columns() {
        let table = Table::with_rows(vec!["Other".into()], vec![vec![Value::from("入数3")]]);
        let out = UnitsExtractor::new("No. of Units", markers(), pattern()).apply(table.clone());
        assert_eq!(out, table);

        let out = ExpiryDateCleaner::new("Expiry Date", "賞味期限").apply(table.clone());
        assert_eq!(out, table);
    }

    #[test]
    fn test_cleaners_rewrite_their_column() {
        let table = Table::with_rows(
            vec!["No. of Units".into(), "Expiry Date".into()],
            vec![
                vec![Value::from("入り数6"), Value::from("賞味期限2025-01")],
                vec![Value::Null, Value::Null],
            ],
        );

        let out = UnitsExtractor::new("No. of Units", markers(), pattern()).apply(table);
        let out = ExpiryDateCleaner::new("Expiry Date", "賞味期限").apply(out);

        assert_eq!(
            out.rows(),
            &[
                vec![Value::from("6"), Value::from("2025-01")],
                vec![Value::String(String::new()), Value::String(String::new())],
            ]
        );
    }
}
