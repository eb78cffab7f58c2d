use thiserror::Error;

/// Top-level error type returned by the configuration pass.
///
/// Only configuration problems are fatal. Data problems encountered
/// during row evaluation (unparsable numbers or dates in cells) never
/// surface as errors; the affected column simply contributes no match.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The field's type could not be resolved to one of the supported
    /// filter types, either from an explicit `type` value or from the
    /// declared type of its column.
    #[error("invalid field type `{found}` for field {field_index}")]
    InvalidFieldType { field_index: usize, found: String },

    /// A field references a column index the table does not have.
    #[error("field {field_index} references column {column}, but the table has {column_count} columns")]
    ColumnOutOfBounds {
        field_index: usize,
        column: usize,
        column_count: usize,
    },

    /// A field was declared with an empty column list.
    #[error("field {field_index} covers no columns")]
    EmptyColumns { field_index: usize },
}
