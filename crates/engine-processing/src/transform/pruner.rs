use super::pipeline::Transform;
use model::records::table::Table;
use tracing::debug;

/// Drops a fixed denylist of columns wherever they appear.
pub struct ColumnPruner {
    columns: Vec<String>,
}

impl ColumnPruner {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl Transform for ColumnPruner {
    fn apply(&self, mut table: Table) -> Table {
        for column in &self.columns {
            if table.drop_column(column) > 0 {
                debug!("Pruned column {}", column);
            }
        }
        table
    }
}
