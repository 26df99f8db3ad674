use crate::catalog::{Field, FieldCatalog, FieldType};
use crate::filter::FilterError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read fields file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse fields file '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("Invalid field catalog in '{path}': {source}")]
    Catalog {
        path: String,
        #[source]
        source: FilterError,
    },
}

/// On-disk shape of a field catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(alias = "value")]
    pub name: String,
    /// Display label; falls back to `name`
    #[serde(default, alias = "text")]
    pub label: Option<String>,
    /// Type tag: string, int or bool
    #[serde(rename = "type")]
    pub field_type: String,
}

impl CatalogConfig {
    /// Validate type tags and names and build the catalog
    pub fn into_catalog(self) -> Result<FieldCatalog, FilterError> {
        let fields = self
            .fields
            .into_iter()
            .map(|f| {
                let field_type: FieldType = f.field_type.parse()?;
                let label = f.label.unwrap_or_else(|| f.name.clone());
                Ok(Field::new(label, f.name, field_type))
            })
            .collect::<Result<Vec<_>, FilterError>>()?;
        FieldCatalog::new(fields)
    }
}

/// Parse catalog text. `.toml` files use TOML, everything else JSON5,
/// which also accepts plain JSON.
pub fn parse_catalog_config(raw: &str, is_toml: bool) -> Result<CatalogConfig, String> {
    if is_toml {
        toml::from_str::<CatalogConfig>(raw).map_err(|e| e.to_string())
    } else {
        json5::from_str::<CatalogConfig>(raw).map_err(|e| e.to_string())
    }
}

pub fn load_catalog(path: Option<&Path>) -> Result<FieldCatalog, ConfigError> {
    if let Some(path) = path {
        load_catalog_from_path(path)
    } else {
        Ok(FieldCatalog::default())
    }
}

pub fn load_catalog_from_path(path: &Path) -> Result<FieldCatalog, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let config = parse_catalog_config(&raw, is_toml).map_err(|message| ConfigError::Parse {
        path: path_display.clone(),
        message,
    })?;

    config
        .into_catalog()
        .map_err(|source| ConfigError::Catalog {
            path: path_display,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_catalog() {
        let raw = r#"
[[fields]]
label = "First Name"
name = "FirstName"
type = "string"

[[fields]]
name = "Age"
type = "int"
"#;
        let catalog = parse_catalog_config(raw, true)
            .unwrap()
            .into_catalog()
            .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("FirstName").unwrap().label, "First Name");
        assert_eq!(catalog.get("Age").unwrap().label, "Age");
    }

    #[test]
    fn test_parse_json_catalog() {
        let raw = r#"{ "fields": [ { "name": "IsActivated", "type": "bool" } ] }"#;
        let catalog = parse_catalog_config(raw, false)
            .unwrap()
            .into_catalog()
            .unwrap();
        assert_eq!(
            catalog.get("IsActivated").unwrap().field_type,
            FieldType::Boolean
        );
    }

    #[test]
    fn test_json5_comments_and_trailing_commas() {
        let raw = r#"{
            // people table
            fields: [ { name: "Age", type: "integer", }, ],
        }"#;
        let catalog = parse_catalog_config(raw, false)
            .unwrap()
            .into_catalog()
            .unwrap();
        assert_eq!(catalog.names(), vec!["Age"]);
    }

    #[test]
    fn test_text_value_field_shape() {
        let raw = r#"{ "fields": [
            { "text": "First Name", "value": "FirstName", "type": "string" },
            { "text": "Is Activated", "value": "IsActivated", "type": "bool" }
        ] }"#;
        let catalog = parse_catalog_config(raw, false)
            .unwrap()
            .into_catalog()
            .unwrap();
        assert_eq!(catalog.names(), vec!["FirstName", "IsActivated"]);
        assert_eq!(catalog.get("FirstName").unwrap().label, "First Name");
    }

    #[test]
    fn test_unknown_type_fails_at_load() {
        let raw = r#"{ "fields": [ { "name": "Born", "type": "date" } ] }"#;
        let err = parse_catalog_config(raw, false)
            .unwrap()
            .into_catalog()
            .unwrap_err();
        assert_eq!(err, FilterError::UnknownFieldType("date".into()));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_catalog_from_path(Path::new("/nonexistent/fields.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_no_path_gives_empty_catalog() {
        assert!(load_catalog(None).unwrap().is_empty());
    }
}
