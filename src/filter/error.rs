use thiserror::Error;

/// Errors raised by the field catalog and the filter model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown field type: '{0}'. Valid types are: string, int, bool")]
    UnknownFieldType(String),

    #[error("Unknown operator: '{0}'. Valid operators are: eq, ne, gt, ge, lt, le")]
    UnknownOperator(String),

    #[error("Duplicate field name in catalog: '{0}'")]
    DuplicateField(String),

    #[error("Unknown field: '{0}'")]
    UnknownField(String),

    #[error("No such filter row: {0}")]
    RowNotFound(u64),

    #[error("Row {0} has no field selected")]
    NoFieldSelected(u64),

    #[error("Operator '{operator}' is not allowed for {field_type} field '{field}'")]
    IllegalOperator {
        field: String,
        field_type: String,
        operator: String,
    },

    #[error("Expected a {expected} value for field '{field}', got {actual}")]
    ValueTypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid {expected} value: '{value}'")]
    InvalidValue { expected: String, value: String },

    #[error("Invalid row spec: {0}")]
    InvalidRowSpec(String),
}
