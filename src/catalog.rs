//! Filterable fields supplied by the caller
//!
//! The catalog is fixed once the model is built. It keeps the caller's order
//! for populating field pickers and indexes fields by their machine name.

use crate::filter::FilterError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Declared type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "int")]
    Integer,
    #[serde(rename = "bool")]
    Boolean,
}

impl FromStr for FieldType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "str" => Ok(FieldType::String),
            "int" | "integer" => Ok(FieldType::Integer),
            "bool" | "boolean" => Ok(FieldType::Boolean),
            _ => Err(FilterError::UnknownFieldType(s.to_string())),
        }
    }
}

impl FieldType {
    /// Get the canonical tag of this type
    pub fn canonical_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "int",
            FieldType::Boolean => "bool",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// A named, typed attribute available for filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Text shown in the field picker
    pub label: String,
    /// Name written into the filter clause
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn new(label: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            field_type,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
}

impl FieldCatalog {
    /// Build a catalog, rejecting duplicate field names
    pub fn new(fields: Vec<Field>) -> Result<Self, FilterError> {
        let mut by_name = HashMap::with_capacity(fields.len());
        for (idx, field) in fields.iter().enumerate() {
            if by_name.insert(field.name.clone(), idx).is_some() {
                return Err(FilterError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields, by_name })
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> FieldCatalog {
        FieldCatalog::new(vec![
            Field::new("First Name", "FirstName", FieldType::String),
            Field::new("Age", "Age", FieldType::Integer),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_catalog_is_empty() {
        let catalog = FieldCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.iter().count(), 0);
    }

    #[test]
    fn test_lookup_by_name_keeps_order() {
        let catalog = people();
        assert_eq!(catalog.get("Age").unwrap().field_type, FieldType::Integer);
        assert!(catalog.get("First Name").is_none());
        assert_eq!(catalog.names(), vec!["FirstName", "Age"]);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = FieldCatalog::new(vec![
            Field::new("Age", "Age", FieldType::Integer),
            Field::new("Age again", "Age", FieldType::String),
        ]);
        assert_eq!(result.unwrap_err(), FilterError::DuplicateField("Age".into()));
    }

    #[test]
    fn test_type_tags() {
        assert_eq!("string".parse::<FieldType>().unwrap(), FieldType::String);
        assert_eq!("INT".parse::<FieldType>().unwrap(), FieldType::Integer);
        assert_eq!("integer".parse::<FieldType>().unwrap(), FieldType::Integer);
        assert_eq!("bool".parse::<FieldType>().unwrap(), FieldType::Boolean);
        assert_eq!("boolean".parse::<FieldType>().unwrap(), FieldType::Boolean);
        assert!(matches!(
            "date".parse::<FieldType>(),
            Err(FilterError::UnknownFieldType(_))
        ));
    }
}
