use super::pipeline::Transform;
use model::{records::table::Table, transform::mapping::ColumnMapping};
use tracing::debug;

/// Renames export columns to their canonical labels.
///
/// Only columns present in the export are touched. Unmapped columns keep
/// their label and mapped-but-missing columns are simply not produced.
pub struct ColumnMapper {
    mapping: ColumnMapping,
}

impl ColumnMapper {
    pub fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }
}

impl Transform for ColumnMapper {
    fn apply(&self, mut table: Table) -> Table {
        let renames: Vec<(usize, String)> = table
            .header()
            .iter()
            .enumerate()
            .filter_map(|(idx, label)| self.mapping.resolve(label).map(|t| (idx, t.to_string())))
            .collect();

        for (idx, target) in renames {
            debug!("Renaming column {} -> {}", table.header()[idx], target);
            table.rename_column(idx, &target);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{core::value::Value, transform::schema::ColumnRename};
    use pretty_assertions::assert_eq;

    fn mapper() -> ColumnMapper {
        ColumnMapper::new(ColumnMapping::new(&[
            ColumnRename::new("品番", "Product No."),
            ColumnRename::new("商品名", "Product Name"),
            ColumnRename::new("実在庫数", "Stock"),
        ]))
    }

    #[test]
    fn test_renames_only_present_columns() {
        let table = Table::with_rows(
            vec!["ID".into(), "品番".into(), "実在庫数".into()],
            vec![vec![Value::from("1"), Value::from("A1"), Value::from("5")]],
        );

        let out = mapper().apply(table);

        assert_eq!(out.header(), &["ID", "Product No.", "Stock"]);
        assert_eq!(
            out.rows()[0],
            vec![Value::from("1"), Value::from("A1"), Value::from("5")]
        );
    }

    #[test]
    fn test_empty_header_is_untouched() {
        let out = mapper().apply(Table::default());
        assert!(out.header().is_empty());
    }
}
