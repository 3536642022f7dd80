use super::filter::{ExclusionMarkerFilter, Filter, ZeroStockFilter};
use model::{
    core::value::Value,
    records::{
        normalized::{AggregateRow, NormalizedTable},
        table::Table,
    },
    transform::schema::SchemaConfig,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Filter, sort and total step of the normalizer.
///
/// Only applies when the stock, product number and product name columns are
/// all present; any other table is passed through untouched.
pub struct InventoryReducer {
    stock: String,
    product_no: String,
    product_name: String,
    total_label: String,
    filters: Vec<Arc<dyn Filter>>,
}

impl InventoryReducer {
    pub fn new(schema: &SchemaConfig) -> Self {
        let [stock, product_no, product_name] = schema.inventory_columns().map(str::to_string);
        let filters: Vec<Arc<dyn Filter>> = vec![
            Arc::new(ZeroStockFilter::new(&stock)),
            Arc::new(ExclusionMarkerFilter::new(
                &product_no,
                schema.exclusion_markers.clone(),
            )),
        ];

        Self {
            stock,
            product_no,
            product_name,
            total_label: schema.total_label.clone(),
            filters,
        }
    }

    pub fn applies_to(&self, table: &Table) -> bool {
        table.has_columns(&[
            self.stock.as_str(),
            self.product_no.as_str(),
            self.product_name.as_str(),
        ])
    }

    pub fn reduce(&self, mut table: Table) -> NormalizedTable {
        if !self.applies_to(&table) {
            info!(
                "Columns {}, {} and {} not all present, skipping filter and total",
                self.stock, self.product_no, self.product_name
            );
            return NormalizedTable::passthrough(table);
        }

        let input_rows = table.len();
        table.map_column(&self.stock, Value::to_numeric);
        table.retain_rows(|row| self.filters.iter().all(|f| f.should_keep(&row)));
        debug!("Kept {} of {} rows", table.len(), input_rows);

        let name = self.product_name.as_str();
        table.sort_rows_by(|a, b| {
            sort_key(&a.get_value(name)).cmp(&sort_key(&b.get_value(name)))
        });

        // `Sum<f64>` over nothing yields `-0.0`.
        let total = table
            .records()
            .filter_map(|row| row.get(&self.stock).and_then(Value::as_f64))
            .fold(0.0, |acc, v| acc + v);

        table.map_values(|v| Value::String(v.to_cell_string()));

        NormalizedTable {
            table,
            aggregate: Some(AggregateRow {
                label_column: self.product_no.clone(),
                label: self.total_label.clone(),
                stock_column: self.stock.clone(),
                total,
            }),
        }
    }
}

fn sort_key(value: &Value) -> String {
    value.to_cell_string()
}
