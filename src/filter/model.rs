use super::error::FilterError;
use super::operator::{Operator, is_legal, legal_operators};
use super::value::{FilterValue, default_value};
use crate::catalog::{Field, FieldCatalog};
use serde::Serialize;
use std::fmt;

/// Prefix of every serialized filter
pub const FILTER_PREFIX: &str = "$filter=";

/// Separator between clauses; rows are always AND-ed
pub const CLAUSE_SEPARATOR: &str = " and ";

/// Stable handle to a row in a [`FilterModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One (field, operator, value) triple.
///
/// Operator and value are only present once a field has been chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRow {
    id: RowId,
    field: Option<Field>,
    operator: Option<Operator>,
    value: Option<FilterValue>,
}

impl FilterRow {
    fn empty(id: RowId) -> Self {
        Self {
            id,
            field: None,
            operator: None,
            value: None,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn value(&self) -> Option<&FilterValue> {
        self.value.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.field.is_some()
    }

    /// Serialized text of this row, `None` while no field is selected
    pub fn clause(&self) -> Option<String> {
        let field = self.field.as_ref()?;
        let operator = self.operator.unwrap_or(legal_operators(field.field_type)[0]);
        let value = self
            .value
            .clone()
            .unwrap_or_else(|| default_value(field.field_type));
        Some(format!("{} {} {}", field.name, operator, value))
    }

    fn selected_field(&self) -> Result<&Field, FilterError> {
        self.field
            .as_ref()
            .ok_or(FilterError::NoFieldSelected(self.id.get()))
    }
}

/// Ordered list of filter rows over a fixed field catalog.
///
/// Always holds at least one row. Row order is display order and
/// serialization order.
#[derive(Debug, Clone)]
pub struct FilterModel {
    catalog: FieldCatalog,
    rows: Vec<FilterRow>,
    next_id: u64,
}

impl Default for FilterModel {
    fn default() -> Self {
        Self::new(FieldCatalog::default())
    }
}

impl FilterModel {
    /// Create a model seeded with a single empty row
    pub fn new(catalog: FieldCatalog) -> Self {
        let mut model = Self {
            catalog,
            rows: Vec::new(),
            next_id: 1,
        };
        model.add_row();
        model
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn rows(&self) -> &[FilterRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the model has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: RowId) -> Option<&FilterRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Id of the row at a 0-based display position
    pub fn row_at(&self, index: usize) -> Option<RowId> {
        self.rows.get(index).map(|r| r.id)
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    /// Append an empty row and return its id
    pub fn add_row(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(FilterRow::empty(id));
        id
    }

    /// Remove a row. Removing the only remaining row is a no-op that
    /// returns `Ok(false)`.
    pub fn remove_row(&mut self, id: RowId) -> Result<bool, FilterError> {
        let idx = self.index_of(id)?;
        if self.rows.len() == 1 {
            return Ok(false);
        }
        self.rows.remove(idx);
        Ok(true)
    }

    /// Reset the model to a single empty row, keeping the catalog
    pub fn clear(&mut self) {
        self.rows.clear();
        self.add_row();
    }

    /// Select a catalog field for a row, resetting operator and value to
    /// the defaults for the field's type.
    pub fn set_row_field(&mut self, id: RowId, name: &str) -> Result<(), FilterError> {
        let field = self
            .catalog
            .get(name)
            .cloned()
            .ok_or_else(|| FilterError::UnknownField(name.to_string()))?;
        let idx = self.index_of(id)?;
        let row = &mut self.rows[idx];
        row.operator = Some(legal_operators(field.field_type)[0]);
        row.value = Some(default_value(field.field_type));
        row.field = Some(field);
        Ok(())
    }

    pub fn set_row_operator(&mut self, id: RowId, operator: Operator) -> Result<(), FilterError> {
        let idx = self.index_of(id)?;
        let row = &mut self.rows[idx];
        let field = row.selected_field()?;
        if !is_legal(field.field_type, operator) {
            return Err(FilterError::IllegalOperator {
                field: field.name.clone(),
                field_type: field.field_type.to_string(),
                operator: operator.to_string(),
            });
        }
        row.operator = Some(operator);
        Ok(())
    }

    /// Assign a typed value. The value's type must match the row's field.
    pub fn set_row_value(&mut self, id: RowId, value: FilterValue) -> Result<(), FilterError> {
        let idx = self.index_of(id)?;
        let row = &mut self.rows[idx];
        let field = row.selected_field()?;
        if value.field_type() != field.field_type {
            return Err(FilterError::ValueTypeMismatch {
                field: field.name.clone(),
                expected: field.field_type.to_string(),
                actual: value.field_type().to_string(),
            });
        }
        row.value = Some(value);
        Ok(())
    }

    /// Assign a value from raw input text, parsed by the field's type
    pub fn set_row_value_text(&mut self, id: RowId, text: &str) -> Result<(), FilterError> {
        let field_type = {
            let idx = self.index_of(id)?;
            self.rows[idx].selected_field()?.field_type
        };
        let value = FilterValue::parse_as(field_type, text)?;
        self.set_row_value(id, value)
    }

    /// Rows excluded from serialization because no field is selected
    pub fn unselected_rows(&self) -> Vec<RowId> {
        self.rows
            .iter()
            .filter(|r| !r.is_selected())
            .map(|r| r.id)
            .collect()
    }

    /// The AND-ed clauses without the `$filter=` prefix
    pub fn expression(&self) -> Option<String> {
        let clauses: Vec<String> = self.rows.iter().filter_map(FilterRow::clause).collect();
        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(CLAUSE_SEPARATOR))
        }
    }

    /// Serialize to an OData `$filter=` fragment.
    ///
    /// Rows without a field are skipped. When no row has a field the result
    /// is an empty string.
    pub fn serialize(&self) -> String {
        match self.expression() {
            Some(expr) => format!("{}{}", FILTER_PREFIX, expr),
            None => String::new(),
        }
    }

    pub fn get_filter(&self) -> String {
        self.serialize()
    }

    fn index_of(&self, id: RowId) -> Result<usize, FilterError> {
        self.position(id)
            .ok_or(FilterError::RowNotFound(id.get()))
    }
}
