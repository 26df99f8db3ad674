use super::error::FilterError;
use crate::catalog::FieldType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// OData comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

const EQUALITY_OPERATORS: &[Operator] = &[Operator::Eq, Operator::Ne];

const ORDERED_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Gt,
    Operator::Ge,
    Operator::Lt,
    Operator::Le,
];

impl Operator {
    /// The OData keyword for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Lt => "lt",
            Operator::Le => "le",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eq" => Ok(Operator::Eq),
            "ne" => Ok(Operator::Ne),
            "gt" => Ok(Operator::Gt),
            "ge" => Ok(Operator::Ge),
            "lt" => Ok(Operator::Lt),
            "le" => Ok(Operator::Le),
            _ => Err(FilterError::UnknownOperator(s.to_string())),
        }
    }
}

/// Operators offered for a field type, in display order.
///
/// The first entry is the one a row falls back to when its field changes.
pub fn legal_operators(field_type: FieldType) -> &'static [Operator] {
    match field_type {
        FieldType::String => EQUALITY_OPERATORS,
        FieldType::Boolean => EQUALITY_OPERATORS,
        FieldType::Integer => ORDERED_OPERATORS,
    }
}

/// Whether `operator` may be used with a field of `field_type`
pub fn is_legal(field_type: FieldType, operator: Operator) -> bool {
    legal_operators(field_type).contains(&operator)
}
