use crate::{
    core::utils::format_float,
    records::{grid::Grid, table::Table},
};

/// Synthetic trailing row carrying the stock total of the retained rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    /// Column that receives `label` (the product number column).
    pub label_column: String,
    pub label: String,
    /// Column that receives the total.
    pub stock_column: String,
    pub total: f64,
}

impl AggregateRow {
    /// Lays the aggregate out against `header`; unrelated columns stay blank.
    pub fn to_cells(&self, header: &[String]) -> Vec<String> {
        let mut label_done = false;
        let mut total_done = false;

        header
            .iter()
            .map(|column| {
                if !label_done && *column == self.label_column {
                    label_done = true;
                    self.label.clone()
                } else if !total_done && *column == self.stock_column {
                    total_done = true;
                    format_float(self.total)
                } else {
                    String::new()
                }
            })
            .collect()
    }
}

/// Output of the normalizer: the canonical table plus its aggregate row, when
/// one could be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub table: Table,
    pub aggregate: Option<AggregateRow>,
}

impl NormalizedTable {
    pub fn passthrough(table: Table) -> Self {
        NormalizedTable {
            table,
            aggregate: None,
        }
    }

    /// Header, then every record in header order, then the aggregate row.
    pub fn to_grid(&self) -> Grid {
        let header = self.table.header();
        let mut rows = Vec::with_capacity(self.table.len() + 2);

        rows.push(header.to_vec());
        rows.extend(
            self.table
                .rows()
                .iter()
                .map(|row| row.iter().map(|v| v.to_cell_string()).collect::<Vec<_>>()),
        );
        if let Some(aggregate) = &self.aggregate {
            rows.push(aggregate.to_cells(header));
        }

        Grid::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;
    use pretty_assertions::assert_eq;

    fn header() -> Vec<String> {
        ["Product No.", "Product Name", "Expiry Date", "Stock"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_grid_layout() {
        let table = Table::with_rows(
            header(),
            vec![vec![
                Value::from("A1"),
                Value::from("Widget"),
                Value::Null,
                Value::Int(5),
            ]],
        );
        let normalized = NormalizedTable {
            table,
            aggregate: Some(AggregateRow {
                label_column: "Product No.".into(),
                label: "Total".into(),
                stock_column: "Stock".into(),
                total: 5.0,
            }),
        };

        let grid = normalized.to_grid();
        assert_eq!(
            grid.rows(),
            &[
                header(),
                vec!["A1".to_string(), "Widget".into(), "".into(), "5".into()],
                vec!["Total".to_string(), "".into(), "".into(), "5.0".into()],
            ]
        );
        assert_eq!(grid.height(), 3);
    }

    #[test]
    fn test_passthrough_has_no_aggregate() {
        let table = Table::with_rows(vec!["x".into()], vec![vec![Value::Null]]);
        let grid = NormalizedTable::passthrough(table).to_grid();
        assert_eq!(grid.rows(), &[vec!["x".to_string()], vec![String::new()]]);
    }
}
