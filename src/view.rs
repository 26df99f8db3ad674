//! Read-only snapshot of a filter model for rendering
//!
//! A front-end binds to this instead of the model itself: one entry per row
//! in display order, the field options and the serialized filter.

use crate::catalog::{FieldCatalog, FieldType};
use crate::filter::{FilterModel, FilterRow, FilterValue, Operator, RowId, legal_operators};
use comfy_table::{Cell, Table};
use serde::Serialize;

/// Kind of input control used for a row's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueControl {
    Text,
    Number,
    Checkbox,
}

impl ValueControl {
    pub fn for_type(field_type: FieldType) -> Self {
        match field_type {
            FieldType::String => ValueControl::Text,
            FieldType::Integer => ValueControl::Number,
            FieldType::Boolean => ValueControl::Checkbox,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueControl::Text => "text",
            ValueControl::Number => "number",
            ValueControl::Checkbox => "checkbox",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub label: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: RowId,
    /// Selected field name
    pub field: Option<String>,
    pub operators: Vec<Operator>,
    pub operator: Option<Operator>,
    pub control: Option<ValueControl>,
    pub value: Option<FilterValue>,
}

impl From<&FilterRow> for RowView {
    fn from(row: &FilterRow) -> Self {
        let field_type = row.field().map(|f| f.field_type);
        RowView {
            id: row.id(),
            field: row.field().map(|f| f.name.clone()),
            operators: field_type
                .map(|t| legal_operators(t).to_vec())
                .unwrap_or_default(),
            operator: row.operator(),
            control: field_type.map(ValueControl::for_type),
            value: row.value().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelView {
    pub fields: Vec<FieldOption>,
    pub rows: Vec<RowView>,
    pub filter: String,
}

impl From<&FilterModel> for ModelView {
    fn from(model: &FilterModel) -> Self {
        ModelView {
            fields: field_options(model.catalog()),
            rows: model.rows().iter().map(RowView::from).collect(),
            filter: model.serialize(),
        }
    }
}

impl ModelView {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn field_options(catalog: &FieldCatalog) -> Vec<FieldOption> {
    catalog
        .iter()
        .map(|f| FieldOption {
            label: f.label.clone(),
            name: f.name.clone(),
            field_type: f.field_type,
        })
        .collect()
}

fn join_operators(ops: &[Operator]) -> String {
    ops.iter().map(Operator::as_str).collect::<Vec<_>>().join(", ")
}

/// Table of catalog fields with the operators each one offers
pub fn fields_table(catalog: &FieldCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Label", "Name", "Type", "Operators"]);
    for field in catalog.iter() {
        table.add_row(vec![
            Cell::new(&field.label),
            Cell::new(&field.name),
            Cell::new(field.field_type),
            Cell::new(join_operators(legal_operators(field.field_type))),
        ]);
    }
    table
}

/// Table of the model's rows in display order
pub fn rows_table(view: &ModelView) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Field", "Operator", "Value", "Control"]);
    for (idx, row) in view.rows.iter().enumerate() {
        let dash = || "-".to_string();
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(row.field.clone().unwrap_or_else(dash)),
            Cell::new(row.operator.map(|o| o.to_string()).unwrap_or_else(dash)),
            Cell::new(row.value.as_ref().map(|v| v.to_string()).unwrap_or_else(dash)),
            Cell::new(row.control.map(|c| c.as_str()).unwrap_or("-")),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Field;

    fn model() -> FilterModel {
        let catalog = FieldCatalog::new(vec![
            Field::new("Age", "Age", FieldType::Integer),
            Field::new("Is Activated", "IsActivated", FieldType::Boolean),
        ])
        .unwrap();
        FilterModel::new(catalog)
    }

    #[test]
    fn test_control_follows_field_type() {
        assert_eq!(ValueControl::for_type(FieldType::String), ValueControl::Text);
        assert_eq!(ValueControl::for_type(FieldType::Integer), ValueControl::Number);
        assert_eq!(
            ValueControl::for_type(FieldType::Boolean),
            ValueControl::Checkbox
        );
    }

    #[test]
    fn test_view_of_unselected_row() {
        let view = ModelView::from(&model());
        assert_eq!(view.fields.len(), 2);
        assert_eq!(view.rows.len(), 1);
        assert!(view.rows[0].operators.is_empty());
        assert_eq!(view.rows[0].control, None);
        assert_eq!(view.filter, "");
    }

    #[test]
    fn test_view_switches_control_with_field() {
        let mut model = model();
        let id = model.row_at(0).unwrap();
        model.set_row_field(id, "Age").unwrap();
        model.set_row_field(id, "IsActivated").unwrap();

        let view = ModelView::from(&model);
        let row = &view.rows[0];
        assert_eq!(row.control, Some(ValueControl::Checkbox));
        assert_eq!(row.operators, vec![Operator::Eq, Operator::Ne]);
        assert_eq!(row.value, Some(FilterValue::Boolean(false)));
    }

    #[test]
    fn test_json_shape() {
        let mut model = model();
        let id = model.row_at(0).unwrap();
        model.set_row_field(id, "Age").unwrap();
        model.set_row_value(id, FilterValue::Integer(16)).unwrap();

        let raw = ModelView::from(&model).to_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["filter"], "$filter=Age eq 16");
        assert_eq!(json["fields"][0]["type"], "int");
        assert_eq!(json["rows"][0]["control"], "number");
        assert_eq!(json["rows"][0]["value"], 16);
        assert_eq!(json["rows"][0]["operators"][5], "le");
    }
}
