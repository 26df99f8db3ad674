use super::error::FilterError;
use super::model::{FilterModel, RowId};
use super::operator::Operator;

/// A row given on the command line as `Field:op[:value]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpec {
    /// Catalog name of the field
    pub field: String,
    pub operator: Operator,
    /// Raw value text; `None` keeps the type default
    pub value: Option<String>,
}

impl RowSpec {
    /// Parse a single row spec.
    ///
    /// Only the first two colons separate parts, so values may contain `:`.
    pub fn parse(s: &str) -> Result<Self, FilterError> {
        let parts: Vec<&str> = s.splitn(3, ':').collect();
        if parts.len() < 2 {
            return Err(FilterError::InvalidRowSpec(format!(
                "Expected 'field:op[:value]' format, got: {}",
                s
            )));
        }

        let field = parts[0].trim();
        if field.is_empty() {
            return Err(FilterError::InvalidRowSpec(format!(
                "Missing field name in: {}",
                s
            )));
        }

        let operator: Operator = parts[1].parse()?;
        let value = parts.get(2).map(|v| v.to_string());

        Ok(RowSpec {
            field: field.to_string(),
            operator,
            value,
        })
    }

    /// Apply this spec to a row the same way a user would: pick the field,
    /// then the operator, then type the value.
    pub fn apply(&self, model: &mut FilterModel, row: RowId) -> Result<(), FilterError> {
        model.set_row_field(row, &self.field)?;
        model.set_row_operator(row, self.operator)?;
        if let Some(value) = &self.value {
            model.set_row_value_text(row, value)?;
        }
        Ok(())
    }
}

/// Fill a model from a list of row specs, reusing the seeded first row
pub fn apply_row_specs(model: &mut FilterModel, specs: &[RowSpec]) -> Result<(), FilterError> {
    for (idx, spec) in specs.iter().enumerate() {
        let row = match model.row_at(idx) {
            Some(id) => id,
            None => model.add_row(),
        };
        spec.apply(model, row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Field, FieldCatalog, FieldType};

    #[test]
    fn test_parse_with_value() {
        let spec = RowSpec::parse("FirstName:eq:Pete").unwrap();
        assert_eq!(spec.field, "FirstName");
        assert_eq!(spec.operator, Operator::Eq);
        assert_eq!(spec.value.as_deref(), Some("Pete"));
    }

    #[test]
    fn test_parse_without_value() {
        let spec = RowSpec::parse("Age:ge").unwrap();
        assert_eq!(spec.operator, Operator::Ge);
        assert_eq!(spec.value, None);
    }

    #[test]
    fn test_value_keeps_colons() {
        let spec = RowSpec::parse("Time:eq:12:30").unwrap();
        assert_eq!(spec.value.as_deref(), Some("12:30"));
    }

    #[test]
    fn test_malformed_specs() {
        assert!(matches!(
            RowSpec::parse("FirstName"),
            Err(FilterError::InvalidRowSpec(_))
        ));
        assert!(matches!(
            RowSpec::parse(":eq:x"),
            Err(FilterError::InvalidRowSpec(_))
        ));
        assert!(matches!(
            RowSpec::parse("Age:between:1"),
            Err(FilterError::UnknownOperator(_))
        ));
    }

    #[test]
    fn test_apply_row_specs_reuses_seed_row() {
        let catalog = FieldCatalog::new(vec![
            Field::new("First Name", "FirstName", FieldType::String),
            Field::new("Last Name", "LastName", FieldType::String),
        ])
        .unwrap();
        let mut model = FilterModel::new(catalog);
        let specs = vec![
            RowSpec::parse("FirstName:eq:Pete").unwrap(),
            RowSpec::parse("LastName:ne:Smith").unwrap(),
        ];
        apply_row_specs(&mut model, &specs).unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(
            model.serialize(),
            "$filter=FirstName eq 'Pete' and LastName ne 'Smith'"
        );
    }
}
