use crate::core::value::Value;
use serde::{Deserialize, Serialize};

/// One row of values, positionally aligned with [`Table::header`].
pub type Row = Vec<Value>;

/// An ordered set of rows sharing one header.
///
/// Rows are kept rectangular: every row holds exactly `header.len()` values.
/// Column labels are not required to be unique; lookups by label resolve to
/// the first matching column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Row>,
}

/// Read-only view of a single row keyed by column label.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    header: &'a [String],
    values: &'a [Value],
}

impl Table {
    pub fn new(header: Vec<String>) -> Self {
        Table {
            header,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(header: Vec<String>, rows: Vec<Row>) -> Self {
        let mut table = Table::new(header);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row, padding short rows with `Null` and truncating long ones.
    pub fn push_row(&mut self, mut row: Row) {
        row.resize(self.header.len(), Value::Null);
        self.rows.push(row);
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.header.iter().position(|h| h == label)
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.column_index(label).is_some()
    }

    pub fn has_columns(&self, labels: &[&str]) -> bool {
        labels.iter().all(|label| self.has_column(label))
    }

    pub fn rename_column(&mut self, index: usize, label: &str) {
        if let Some(h) = self.header.get_mut(index) {
            *h = label.to_string();
        }
    }

    /// Removes every column carrying `label`. Returns how many were removed.
    pub fn drop_column(&mut self, label: &str) -> usize {
        let doomed: Vec<usize> = self
            .header
            .iter()
            .enumerate()
            .filter(|(_, h)| h.as_str() == label)
            .map(|(idx, _)| idx)
            .collect();

        for idx in doomed.iter().rev() {
            self.header.remove(*idx);
            for row in &mut self.rows {
                row.remove(*idx);
            }
        }

        doomed.len()
    }

    /// Rewrites every value of the first column named `label`.
    /// Returns `false` when the column does not exist.
    pub fn map_column<F>(&mut self, label: &str, f: F) -> bool
    where
        F: Fn(&Value) -> Value,
    {
        let Some(idx) = self.column_index(label) else {
            return false;
        };
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        true
    }

    pub fn map_values<F>(&mut self, f: F)
    where
        F: Fn(&Value) -> Value,
    {
        for value in self.rows.iter_mut().flatten() {
            *value = f(value);
        }
    }

    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(RecordView<'_>) -> bool,
    {
        let header = &self.header;
        self.rows.retain(|row| {
            keep(RecordView {
                header,
                values: row,
            })
        });
    }

    /// Stable sort of the rows.
    pub fn sort_rows_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(RecordView<'_>, RecordView<'_>) -> std::cmp::Ordering,
    {
        let header = &self.header;
        self.rows.sort_by(|a, b| {
            compare(
                RecordView { header, values: a },
                RecordView { header, values: b },
            )
        });
    }

    pub fn records(&self) -> impl Iterator<Item = RecordView<'_>> {
        self.rows.iter().map(|row| RecordView {
            header: &self.header,
            values: row,
        })
    }
}

impl<'a> RecordView<'a> {
    pub fn get(&self, label: &str) -> Option<&'a Value> {
        let idx = self.header.iter().position(|h| h == label)?;
        self.values.get(idx)
    }

    /// Value of `label`, `Null` when the column is absent.
    pub fn get_value(&self, label: &str) -> Value {
        self.get(label).cloned().unwrap_or(Value::Null)
    }
}
