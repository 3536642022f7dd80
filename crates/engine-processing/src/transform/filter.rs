use model::{core::value::Value, records::table::RecordView};

/// Row predicate applied by the inventory reducer.
pub trait Filter: Send + Sync {
    fn should_keep(&self, row: &RecordView<'_>) -> bool;
}

/// Drops rows whose (already coerced) stock is zero.
pub struct ZeroStockFilter {
    column: String,
}

impl ZeroStockFilter {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }
}

impl Filter for ZeroStockFilter {
    fn should_keep(&self, row: &RecordView<'_>) -> bool {
        !row.get(&self.column).is_some_and(Value::is_zero)
    }
}

/// Drops rows whose product number contains any of the exclusion markers.
/// Matching is a case-sensitive substring test; empty product numbers never
/// match.
pub struct ExclusionMarkerFilter {
    column: String,
    markers: Vec<String>,
}

impl ExclusionMarkerFilter {
    pub fn new(column: &str, markers: Vec<String>) -> Self {
        Self {
            column: column.to_string(),
            markers: markers.into_iter().filter(|m| !m.is_empty()).collect(),
        }
    }
}

impl Filter for ExclusionMarkerFilter {
    fn should_keep(&self, row: &RecordView<'_>) -> bool {
        let Some(product_no) = row.get(&self.column).and_then(Value::as_str) else {
            return true;
        };
        !self.markers.iter().any(|m| product_no.contains(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::records::table::Table;

    fn table() -> Table {
        Table::with_rows(
            vec!["Product No.".into(), "Stock".into()],
            vec![
                vec![Value::from("A1"), Value::Int(5)],
                vec![Value::from("B2 Sticker"), Value::Int(3)],
                vec![Value::from("交換用スリーブS"), Value::Float(1.5)],
                vec![Value::Null, Value::Int(0)],
                vec![Value::from("b2 sticker"), Value::Float(0.0)],
            ],
        )
    }

    fn kept(filter: &dyn Filter) -> Vec<usize> {
        table()
            .records()
            .enumerate()
            .filter(|(_, r)| filter.should_keep(r))
            .map(|(idx, _)| idx)
            .collect()
    }

    #[test]
    fn test_zero_stock_filter() {
        assert_eq!(kept(&ZeroStockFilter::new("Stock")), vec![0, 1, 2]);
    }

    #[test]
    fn test_exclusion_marker_filter() {
        let filter = ExclusionMarkerFilter::new(
            "Product No.",
            vec!["交換用スリーブ".into(), "Sticker".into()],
        );
        assert_eq!(kept(&filter), vec![0, 3, 4]);
    }

    #[test]
    fn test_empty_marker_is_ignored() {
        let filter = ExclusionMarkerFilter::new("Product No.", vec![String::new()]);
        assert_eq!(kept(&filter), vec![0, 1, 2, 3, 4]);
    }
}
