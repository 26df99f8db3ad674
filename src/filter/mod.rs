//! Filter rows and their OData serialization
//!
//! A [`FilterModel`] holds an ordered list of rows. Each row picks a field
//! from the catalog, a comparison operator allowed for that field's type and
//! a typed value. The model serializes to a flat conjunction:
//!
//! ```text
//! $filter=<clause>( and <clause>)*
//! clause = <fieldName> <op> <value>
//! ```
//!
//! # Operators per type
//!
//! - `string` - `eq`, `ne`
//! - `bool` - `eq`, `ne`
//! - `int` - `eq`, `ne`, `gt`, `ge`, `lt`, `le`
//!
//! # Values
//!
//! - strings are wrapped in single quotes, embedded quotes are not escaped
//! - integers are plain decimal
//! - booleans are `true` / `false`
//!
//! # Examples
//!
//! ```text
//! $filter=FirstName eq 'Pete' and LastName eq 'Smith'
//! $filter=Age ge 16
//! $filter=IsActivated eq true
//! ```

pub mod error;
pub mod model;
pub mod operator;
pub mod row_spec;
pub mod value;

pub use error::FilterError;
pub use model::{CLAUSE_SEPARATOR, FILTER_PREFIX, FilterModel, FilterRow, RowId};
pub use operator::{Operator, is_legal, legal_operators};
pub use row_spec::{RowSpec, apply_row_specs};
pub use value::{FilterValue, default_value};
