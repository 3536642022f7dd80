use serde::{Deserialize, Serialize};

/// Target labels of the canonical inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalFields {
    pub product_no: String,
    pub product_name: String,
    pub units: String,
    pub expiry_date: String,
    pub stock: String,
}

impl Default for CanonicalFields {
    fn default() -> Self {
        CanonicalFields {
            product_no: "Product No.".to_string(),
            product_name: "Product Name".to_string(),
            units: "No. of Units".to_string(),
            expiry_date: "Expiry Date".to_string(),
            stock: "Stock".to_string(),
        }
    }
}

/// A single source label -> target label rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    pub source: String,
    pub target: String,
}

impl ColumnRename {
    pub fn new(source: &str, target: &str) -> Self {
        ColumnRename {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Every literal the normalizer depends on: source labels, target labels,
/// markers and the pruning denylist.
///
/// The defaults describe the current portal export. A schema file only needs
/// to name the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Encoding label of the raw export (WHATWG label).
    pub encoding: String,
    /// IANA zone used for the freshness banner.
    pub timezone: String,
    pub fields: CanonicalFields,
    pub column_mapping: Vec<ColumnRename>,
    pub drop_columns: Vec<String>,
    /// Removed from expiry values.
    pub expiry_marker: String,
    /// Presence of any of these triggers units extraction.
    pub units_markers: Vec<String>,
    /// First capture group is the extracted unit count.
    pub units_pattern: String,
    /// Rows whose product number contains one of these are dropped.
    pub exclusion_markers: Vec<String>,
    pub total_label: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        let fields = CanonicalFields::default();
        let column_mapping = vec![
            ColumnRename::new("品番", &fields.product_no),
            ColumnRename::new("商品名", &fields.product_name),
            ColumnRename::new("商品規格１", &fields.units),
            ColumnRename::new("ロケーション1", &fields.expiry_date),
            ColumnRename::new("実在庫数", &fields.stock),
        ];

        SchemaConfig {
            encoding: "Shift_JIS".to_string(),
            timezone: "Asia/Tokyo".to_string(),
            fields,
            column_mapping,
            drop_columns: vec![
                "ID".to_string(),
                "商品規格２".to_string(),
                "バーコード".to_string(),
                "ロケーション2".to_string(),
            ],
            expiry_marker: "賞味期限".to_string(),
            units_markers: vec!["入数".to_string(), "入り数".to_string()],
            units_pattern: r"入り?数(\d+)".to_string(),
            exclusion_markers: vec!["交換用スリーブ".to_string(), "Sticker".to_string()],
            total_label: "Total".to_string(),
        }
    }
}

impl SchemaConfig {
    /// Labels that must all be present for filtering, sorting and the
    /// aggregate row to apply.
    pub fn inventory_columns(&self) -> [&str; 3] {
        [
            self.fields.stock.as_str(),
            self.fields.product_no.as_str(),
            self.fields.product_name.as_str(),
        ]
    }
}
