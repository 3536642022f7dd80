use crate::transform::schema::ColumnRename;
use std::collections::HashMap;

/// Case-sensitive column label mapping.
///
/// Export labels are Japanese and the canonical labels are fixed display
/// strings, so no case folding is applied.
#[derive(Clone, Debug, Default)]
pub struct ColumnMapping {
    pub source_to_target: HashMap<String, String>,
}

impl ColumnMapping {
    pub fn new(renames: &[ColumnRename]) -> Self {
        let source_to_target = renames
            .iter()
            .map(|rename| (rename.source.clone(), rename.target.clone()))
            .collect();

        Self { source_to_target }
    }

    /// Target label for a source label, if it is mapped.
    pub fn resolve(&self, source: &str) -> Option<&str> {
        self.source_to_target.get(source).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.source_to_target.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_sensitive() {
        let mapping = ColumnMapping::new(&[
            ColumnRename::new("品番", "Product No."),
            ColumnRename::new("実在庫数", "Stock"),
        ]);

        assert_eq!(mapping.resolve("品番"), Some("Product No."));
        assert_eq!(mapping.resolve("実在庫数"), Some("Stock"));
        assert_eq!(mapping.resolve("商品名"), None);
        assert_eq!(mapping.resolve("stock"), None);
        assert!(!mapping.is_empty());
    }
}
