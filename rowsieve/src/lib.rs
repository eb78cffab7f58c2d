//! rowsieve: a row-filtering predicate engine for tabular data.
//!
//! Hosts hand over a loosely specified list of search fields plus the
//! table's column metadata; [`resolve_fields`] turns that into a fully
//! resolved, internally consistent configuration (deterministic control
//! ids, inferred types, range shape, operator selectors). Per filter
//! pass, [`RowFilter::row_passes`] reads the current input values
//! through a host-supplied [`ValueSource`] and returns a boolean verdict
//! per row.
//!
//! Everything around that (rendering form controls, wiring change
//! events, server-side request building) is the host's job. This crate
//! only decides match or no-match.
//!
//! ```
//! use rowsieve::{ColumnMeta, ColumnType, FieldSpec, RowFilter, TableMeta};
//! use std::collections::HashMap;
//!
//! let table = TableMeta::new(
//!     "orders",
//!     vec![
//!         ColumnMeta::new("Item", ColumnType::String),
//!         ColumnMeta::new("Price", ColumnType::Currency),
//!     ],
//! );
//! let inputs = [
//!     0.into(),
//!     FieldSpec::for_columns(1).with_range(true).into(),
//! ];
//! let filter = RowFilter::resolve(Some(&inputs), &table)?;
//!
//! let mut current = HashMap::new();
//! current.insert("orders_0".to_string(), "lamp".to_string());
//! current.insert("orders_1_min".to_string(), "100".to_string());
//!
//! assert!(filter.row_passes(&current, &["Desk lamp", "$120"]));
//! assert!(!filter.row_passes(&current, &["Desk lamp", "$80"]));
//! # Ok::<(), rowsieve::FilterError>(())
//! ```

pub mod errors;
pub mod fields;
pub mod ids;
pub mod search;
pub mod types;

pub use errors::FilterError;
pub use fields::{
    AdvancedOp, AdvancedSelector, ColumnsSpec, FieldId, FieldInput, FieldLabel, FieldSpec,
    FieldType, OptionSpec, RangeBounds, RangeSpec, ResolvedField, SelectOption, resolve_fields,
};
pub use search::{
    FnSource, InputValue, RowFilter, ValueSource, date_equal, date_range, harvest_options,
    number_range, parse_date, string_match,
};
pub use types::{ColumnMeta, ColumnType, TableMeta};
