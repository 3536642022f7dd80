use crate::transform::{
    error::TransformError,
    mapping::ColumnMapper,
    normalize::{ExpiryDateCleaner, UnitsExtractor},
    pipeline::{TransformPipeline, TransformPipelineExt},
    pruner::ColumnPruner,
    reducer::InventoryReducer,
};
use connectors::file::csv::{
    settings::CsvSettings,
    source::{CsvDataSource, FileDataSource},
};
use model::{
    records::{normalized::NormalizedTable, table::Table},
    transform::{mapping::ColumnMapping, schema::SchemaConfig},
};
use regex::Regex;
use std::path::Path;
use tracing::info;

/// Turns a raw export table into the canonical, filtered, totalled table.
///
/// Order: rename, clean expiry dates, extract unit counts, prune, then the
/// inventory reducer. Every step tolerates missing columns.
pub struct Normalizer {
    csv: CsvSettings,
    pipeline: TransformPipeline,
    reducer: InventoryReducer,
}

impl Normalizer {
    pub fn new(schema: &SchemaConfig) -> Result<Self, TransformError> {
        let csv = CsvSettings::export(&schema.encoding)?;
        let units_pattern =
            Regex::new(&schema.units_pattern).map_err(|source| TransformError::InvalidPattern {
                pattern: schema.units_pattern.clone(),
                source,
            })?;

        let fields = &schema.fields;
        let pipeline = TransformPipeline::new()
            .add_transform(ColumnMapper::new(ColumnMapping::new(&schema.column_mapping)))
            .add_if(!schema.expiry_marker.is_empty(), || {
                ExpiryDateCleaner::new(&fields.expiry_date, &schema.expiry_marker)
            })
            .add_if(!schema.units_markers.is_empty(), || {
                UnitsExtractor::new(&fields.units, schema.units_markers.clone(), units_pattern)
            })
            .add_if(!schema.drop_columns.is_empty(), || {
                ColumnPruner::new(schema.drop_columns.clone())
            });

        Ok(Self {
            csv,
            pipeline,
            reducer: InventoryReducer::new(schema),
        })
    }

    pub fn normalize(&self, table: Table) -> NormalizedTable {
        let table = self.pipeline.apply(table);
        self.reducer.reduce(table)
    }

    /// Reads a raw export in the configured encoding.
    pub fn load(&self, path: &Path) -> Result<Table, TransformError> {
        let raw = CsvDataSource::new(path, self.csv.clone()).load()?;
        info!("Read {} rows from {}", raw.len(), path.display());
        Ok(raw)
    }

    pub fn normalize_file(&self, path: &Path) -> Result<NormalizedTable, TransformError> {
        Ok(self.normalize(self.load(path)?))
    }
}
