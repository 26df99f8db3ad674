use super::error::FilterError;
use crate::catalog::FieldType;
use serde::Serialize;
use std::fmt;

/// Typed value held by a filter row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl FilterValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FilterValue::String(_) => FieldType::String,
            FilterValue::Integer(_) => FieldType::Integer,
            FilterValue::Boolean(_) => FieldType::Boolean,
        }
    }

    /// Parse input text the way the value control for `field_type` would.
    ///
    /// Strings are kept verbatim, including surrounding whitespace.
    pub fn parse_as(field_type: FieldType, text: &str) -> Result<Self, FilterError> {
        match field_type {
            FieldType::String => Ok(FilterValue::String(text.to_string())),
            FieldType::Integer => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(default_value(field_type));
                }
                trimmed
                    .parse::<i64>()
                    .map(FilterValue::Integer)
                    .map_err(|_| FilterError::InvalidValue {
                        expected: field_type.canonical_name().to_string(),
                        value: text.to_string(),
                    })
            }
            FieldType::Boolean => match text.trim().to_lowercase().as_str() {
                "true" | "1" | "on" | "yes" => Ok(FilterValue::Boolean(true)),
                "false" | "0" | "off" | "no" | "" => Ok(FilterValue::Boolean(false)),
                _ => Err(FilterError::InvalidValue {
                    expected: field_type.canonical_name().to_string(),
                    value: text.to_string(),
                }),
            },
        }
    }
}

/// Rendered as it appears on the right-hand side of a clause.
///
/// String values are quoted but embedded quotes are left as-is.
impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::String(s) => write!(f, "'{}'", s),
            FilterValue::Integer(n) => write!(f, "{}", n),
            FilterValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Boolean(value)
    }
}

/// Value a row takes when its field is set
pub fn default_value(field_type: FieldType) -> FilterValue {
    match field_type {
        FieldType::String => FilterValue::String(String::new()),
        FieldType::Integer => FilterValue::Integer(0),
        FieldType::Boolean => FilterValue::Boolean(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_type() {
        assert_eq!(default_value(FieldType::String), FilterValue::from(""));
        assert_eq!(default_value(FieldType::Integer), FilterValue::Integer(0));
        assert_eq!(default_value(FieldType::Boolean), FilterValue::Boolean(false));
    }

    #[test]
    fn test_rendering() {
        assert_eq!(FilterValue::from("Pete").to_string(), "'Pete'");
        assert_eq!(FilterValue::from("").to_string(), "''");
        assert_eq!(FilterValue::Integer(-16).to_string(), "-16");
        assert_eq!(FilterValue::Boolean(true).to_string(), "true");
    }

    #[test]
    fn test_embedded_quotes_are_not_escaped() {
        assert_eq!(FilterValue::from("O'Brien").to_string(), "'O'Brien'");
    }

    #[test]
    fn test_parse_integer_text() {
        assert_eq!(
            FilterValue::parse_as(FieldType::Integer, " 16 ").unwrap(),
            FilterValue::Integer(16)
        );
        assert_eq!(
            FilterValue::parse_as(FieldType::Integer, "").unwrap(),
            FilterValue::Integer(0)
        );
        assert!(matches!(
            FilterValue::parse_as(FieldType::Integer, "sixteen"),
            Err(FilterError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_boolean_text() {
        assert_eq!(
            FilterValue::parse_as(FieldType::Boolean, "TRUE").unwrap(),
            FilterValue::Boolean(true)
        );
        assert_eq!(
            FilterValue::parse_as(FieldType::Boolean, "off").unwrap(),
            FilterValue::Boolean(false)
        );
        assert!(FilterValue::parse_as(FieldType::Boolean, "maybe").is_err());
    }

    #[test]
    fn test_parse_string_text_is_verbatim() {
        assert_eq!(
            FilterValue::parse_as(FieldType::String, " Pete ").unwrap(),
            FilterValue::from(" Pete ")
        );
    }
}
