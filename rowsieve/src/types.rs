use serde::{Deserialize, Serialize};

/// Declared type of a table column, as reported by the host's column
/// metadata. Mirrors the type tags table libraries attach to columns;
/// the numeric variants all collapse to a `number` filter during field
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnType {
    String,
    Html,
    Date,
    Num,
    NumFmt,
    Currency,
}

impl ColumnType {
    /// The tag as the host declares it.
    pub const fn as_str(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Html => "html",
            ColumnType::Date => "date",
            ColumnType::Num => "num",
            ColumnType::NumFmt => "num-fmt",
            ColumnType::Currency => "currency",
        }
    }

    /// Whether the column holds numeric data under any of its variants.
    pub const fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Num | ColumnType::NumFmt | ColumnType::Currency)
    }
}

/// Metadata for a single table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Column heading, used to derive field labels.
    pub title: String,
    /// Declared column type, used to infer field types.
    #[serde(rename = "type")]
    pub kind: ColumnType,
}

impl ColumnMeta {
    pub fn new(title: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            title: title.into(),
            kind,
        }
    }
}

/// Column metadata for the table a filter set is attached to.
///
/// The `instance` name seeds every generated control id, so two filter
/// sets attached to different tables never collide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    pub instance: String,
    pub columns: Vec<ColumnMeta>,
}

impl TableMeta {
    pub fn new(instance: impl Into<String>, columns: Vec<ColumnMeta>) -> Self {
        Self {
            instance: instance.into(),
            columns,
        }
    }

    pub fn column(&self, index: usize) -> Option<&ColumnMeta> {
        self.columns.get(index)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
