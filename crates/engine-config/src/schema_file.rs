use crate::error::ConfigError;
use chrono_tz::Tz;
use model::transform::schema::SchemaConfig;
use std::path::Path;
use tracing::info;

/// Loads a schema override. Keys left out of the file keep their built-in
/// defaults, so a file naming only `exclusion_markers` is valid.
pub fn load_schema(path: &Path) -> Result<SchemaConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::SchemaRead {
        path: path.to_path_buf(),
        source,
    })?;
    let schema = parse_schema(&contents, path)?;
    info!("Loaded schema overrides from {}", path.display());
    Ok(schema)
}

pub fn parse_schema(contents: &str, path: &Path) -> Result<SchemaConfig, ConfigError> {
    let schema: SchemaConfig =
        toml::from_str(contents).map_err(|source| ConfigError::SchemaParse {
            path: path.to_path_buf(),
            source,
        })?;
    validate_schema(&schema)?;
    Ok(schema)
}

pub fn validate_schema(schema: &SchemaConfig) -> Result<(), ConfigError> {
    let fields = &schema.fields;
    let labels = [
        ("fields.product_no", &fields.product_no),
        ("fields.product_name", &fields.product_name),
        ("fields.units", &fields.units),
        ("fields.expiry_date", &fields.expiry_date),
        ("fields.stock", &fields.stock),
        ("total_label", &schema.total_label),
    ];
    if let Some((key, _)) = labels.iter().find(|(_, label)| label.trim().is_empty()) {
        return Err(ConfigError::InvalidSchema(format!("{key} must not be empty")));
    }

    if let Some(rename) = schema
        .column_mapping
        .iter()
        .find(|r| r.source.is_empty() || r.target.is_empty())
    {
        return Err(ConfigError::InvalidSchema(format!(
            "column_mapping entry {:?} -> {:?} has an empty label",
            rename.source, rename.target
        )));
    }

    resolve_timezone(&schema.timezone)?;
    Ok(())
}

pub fn resolve_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::transform::schema::ColumnRename;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let schema = parse_schema(
            r#"
exclusion_markers = ["交換用スリーブ", "Sticker", "Sample"]
total_label = "合計"
"#,
            Path::new("schema.toml"),
        )
        .unwrap();

        let defaults = SchemaConfig::default();
        assert_eq!(
            schema.exclusion_markers,
            vec!["交換用スリーブ", "Sticker", "Sample"]
        );
        assert_eq!(schema.total_label, "合計");
        assert_eq!(schema.column_mapping, defaults.column_mapping);
        assert_eq!(schema.drop_columns, defaults.drop_columns);
        assert_eq!(schema.encoding, "Shift_JIS");
    }

    #[test]
    fn test_column_mapping_tables() {
        let schema = parse_schema(
            r#"
drop_columns = ["ID"]

[[column_mapping]]
source = "品番"
target = "Product No."

[[column_mapping]]
source = "在庫"
target = "Stock"
"#,
            Path::new("schema.toml"),
        )
        .unwrap();

        assert_eq!(
            schema.column_mapping,
            vec![
                ColumnRename::new("品番", "Product No."),
                ColumnRename::new("在庫", "Stock"),
            ]
        );
        assert_eq!(schema.drop_columns, vec!["ID"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timezone = \"UTC\"").unwrap();

        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.timezone, "UTC");
    }

    #[test]
    fn test_missing_file() {
        let err = load_schema(Path::new("/nonexistent/schema.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaRead { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = parse_schema("drop_columns = [", Path::new("schema.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaParse { .. }));
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let err = parse_schema("timezone = \"Mars/Olympus\"", Path::new("s.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTimezone(_)));
    }

    #[test]
    fn test_rejects_empty_labels() {
        let err = parse_schema("total_label = \"\"", Path::new("s.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSchema(_)));

        let err = parse_schema(
            "[[column_mapping]]\nsource = \"\"\ntarget = \"Stock\"\n",
            Path::new("s.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSchema(_)));
    }

    #[test]
    fn test_resolve_timezone() {
        assert_eq!(resolve_timezone("Asia/Tokyo").unwrap(), chrono_tz::Asia::Tokyo);
    }
}
