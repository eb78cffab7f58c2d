//! Field configuration: the loose, user-authored descriptors hosts hand
//! us, and the fully resolved records everything downstream works from.
//!
//! A field descriptor can be as small as a bare column index; the
//! normalization pass in [`normalize`] fills in everything else from the
//! table's column metadata. See [`resolve_fields`].

pub mod normalize;

pub use normalize::resolve_fields;

use serde::{Deserialize, Serialize};

/// Resolved type of a search field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Select,
    Date,
}

impl FieldType {
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Date => "date",
        }
    }

    /// Number and date fields compare ordered values; they get the
    /// `greater`/`less` operators and default to `equal`.
    pub const fn is_ordered(self) -> bool {
        matches!(self, FieldType::Number | FieldType::Date)
    }

    /// Case-insensitive parse of an explicit `type` value.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "select" => Some(FieldType::Select),
            "date" => Some(FieldType::Date),
            _ => None,
        }
    }
}

/// Which bound inputs a range field exposes. `None` means the field is
/// not a range field at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeBounds {
    #[default]
    None,
    Min,
    Max,
    Both,
}

impl RangeBounds {
    pub const fn is_empty(self) -> bool {
        matches!(self, RangeBounds::None)
    }

    pub const fn has_min(self) -> bool {
        matches!(self, RangeBounds::Min | RangeBounds::Both)
    }

    pub const fn has_max(self) -> bool {
        matches!(self, RangeBounds::Max | RangeBounds::Both)
    }

    pub(crate) const fn from_flags(min: bool, max: bool) -> Self {
        match (min, max) {
            (true, true) => RangeBounds::Both,
            (true, false) => RangeBounds::Min,
            (false, true) => RangeBounds::Max,
            (false, false) => RangeBounds::None,
        }
    }
}

/// Comparison operator selectable through a field's advanced control.
///
/// The wire value (`as_str`) is what the host's selector control reports
/// back at evaluation time; the label is what it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvancedOp {
    Contains,
    NotContains,
    Equal,
    NotEqual,
    Greater,
    Less,
}

const BASE_OPS: &[AdvancedOp] = &[
    AdvancedOp::Contains,
    AdvancedOp::NotContains,
    AdvancedOp::Equal,
    AdvancedOp::NotEqual,
];

const ORDERED_OPS: &[AdvancedOp] = &[
    AdvancedOp::Contains,
    AdvancedOp::NotContains,
    AdvancedOp::Equal,
    AdvancedOp::NotEqual,
    AdvancedOp::Greater,
    AdvancedOp::Less,
];

impl AdvancedOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            AdvancedOp::Contains => "contains",
            AdvancedOp::NotContains => "not-contains",
            AdvancedOp::Equal => "equal",
            AdvancedOp::NotEqual => "not-equal",
            AdvancedOp::Greater => "greater",
            AdvancedOp::Less => "less",
        }
    }

    /// Human-readable label for host-rendered selectors.
    pub const fn label(self) -> &'static str {
        match self {
            AdvancedOp::Contains => "Contains",
            AdvancedOp::NotContains => "Does Not Contain",
            AdvancedOp::Equal => "Is Equal To",
            AdvancedOp::NotEqual => "Is Not Equal To",
            AdvancedOp::Greater => "Is Greater Than",
            AdvancedOp::Less => "Is Less Than",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "contains" => Some(AdvancedOp::Contains),
            "not-contains" => Some(AdvancedOp::NotContains),
            "equal" => Some(AdvancedOp::Equal),
            "not-equal" => Some(AdvancedOp::NotEqual),
            "greater" => Some(AdvancedOp::Greater),
            "less" => Some(AdvancedOp::Less),
            _ => None,
        }
    }

    /// The operator set offered for a field of the given type.
    pub fn options_for(field_type: FieldType) -> &'static [AdvancedOp] {
        if field_type.is_ordered() { ORDERED_OPS } else { BASE_OPS }
    }

    /// The operator a freshly rendered selector starts on.
    pub const fn default_for(field_type: FieldType) -> AdvancedOp {
        if field_type.is_ordered() {
            AdvancedOp::Equal
        } else {
            AdvancedOp::Contains
        }
    }
}

/// Resolved descriptor for a field's operator-selector control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedSelector {
    pub id: String,
    pub operators: Vec<AdvancedOp>,
    pub default: AdvancedOp,
}

/// Control id(s) addressing a field's input(s): a single id for plain
/// fields, one id per present bound for range fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldId {
    Single(String),
    Bounds {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<String>,
    },
}

impl FieldId {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            FieldId::Single(id) => Some(id),
            FieldId::Bounds { .. } => None,
        }
    }

    pub fn min(&self) -> Option<&str> {
        match self {
            FieldId::Bounds { min, .. } => min.as_deref(),
            FieldId::Single(_) => None,
        }
    }

    pub fn max(&self) -> Option<&str> {
        match self {
            FieldId::Bounds { max, .. } => max.as_deref(),
            FieldId::Single(_) => None,
        }
    }
}

/// Display label(s) for a field, shaped like its ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldLabel {
    Single(String),
    Bounds {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<String>,
    },
}

/// One entry in a select field's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }

    /// The no-constraint sentinel a single-select list starts with.
    pub fn all() -> Self {
        Self::new("", "All")
    }
}

/// A select option as hosts are allowed to write it: a bare value or a
/// full value/text pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionSpec {
    Pair(SelectOption),
    Bare(String),
}

impl OptionSpec {
    pub fn into_option(self) -> SelectOption {
        match self {
            OptionSpec::Pair(option) => option,
            OptionSpec::Bare(value) => SelectOption::new(value.clone(), value),
        }
    }
}

/// Column selection, accepted as a single index or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnsSpec {
    One(usize),
    Many(Vec<usize>),
}

impl ColumnsSpec {
    pub fn into_vec(self) -> Vec<usize> {
        match self {
            ColumnsSpec::One(column) => vec![column],
            ColumnsSpec::Many(columns) => columns,
        }
    }
}

impl From<usize> for ColumnsSpec {
    fn from(column: usize) -> Self {
        ColumnsSpec::One(column)
    }
}

impl From<Vec<usize>> for ColumnsSpec {
    fn from(columns: Vec<usize>) -> Self {
        ColumnsSpec::Many(columns)
    }
}

impl<const N: usize> From<[usize; N]> for ColumnsSpec {
    fn from(columns: [usize; N]) -> Self {
        ColumnsSpec::Many(columns.to_vec())
    }
}

/// Range request, accepted as a flag, a comma-separated token string, or
/// a token list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeSpec {
    Flag(bool),
    Tokens(String),
    List(Vec<String>),
}

impl RangeSpec {
    /// Canonical bound subset. Tokens other than `min`/`max` are dropped.
    pub fn resolve(&self) -> RangeBounds {
        match self {
            RangeSpec::Flag(true) => RangeBounds::Both,
            RangeSpec::Flag(false) => RangeBounds::None,
            RangeSpec::Tokens(tokens) => {
                Self::from_tokens(tokens.split(',').map(str::trim))
            }
            RangeSpec::List(tokens) => Self::from_tokens(tokens.iter().map(String::as_str)),
        }
    }

    fn from_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> RangeBounds {
        let mut min = false;
        let mut max = false;
        for token in tokens {
            match token {
                "min" => min = true,
                "max" => max = true,
                _ => {}
            }
        }
        RangeBounds::from_flags(min, max)
    }
}

impl From<bool> for RangeSpec {
    fn from(flag: bool) -> Self {
        RangeSpec::Flag(flag)
    }
}

impl From<&str> for RangeSpec {
    fn from(tokens: &str) -> Self {
        RangeSpec::Tokens(tokens.to_string())
    }
}

/// User-authored, partially specified search field descriptor.
///
/// Everything except `columns` is optional; [`resolve_fields`] fills the
/// gaps from the table's column metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub columns: ColumnsSpec,
    /// Explicit field type; inferred from column metadata when absent.
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub range: Option<RangeSpec>,
    pub label: Option<String>,
    pub multiple: Option<bool>,
    pub advanced: Option<bool>,
    /// Alias key a server-delegated host sends this field's value under.
    pub server: Option<String>,
    pub case_insensitive: Option<bool>,
    pub smart: Option<bool>,
    /// Id of a pre-existing host-owned input control. When set on a
    /// non-range field, this id is adopted instead of a generated one.
    pub control_id: Option<String>,
    /// Explicit option list for select fields. When absent, hosts can
    /// harvest one from column data (see [`crate::search::harvest_options`]).
    pub options: Option<Vec<OptionSpec>>,
}

impl FieldSpec {
    /// Minimal descriptor covering the given column(s).
    pub fn for_columns(columns: impl Into<ColumnsSpec>) -> Self {
        Self {
            columns: columns.into(),
            field_type: None,
            range: None,
            label: None,
            multiple: None,
            advanced: None,
            server: None,
            case_insensitive: None,
            smart: None,
            control_id: None,
            options: None,
        }
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type.as_str().to_string());
        self
    }

    pub fn with_range(mut self, range: impl Into<RangeSpec>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_advanced(mut self) -> Self {
        self.advanced = Some(true);
        self
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn with_control_id(mut self, id: impl Into<String>) -> Self {
        self.control_id = Some(id.into());
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options = Some(options.into_iter().map(OptionSpec::Pair).collect());
        self
    }

    pub fn with_multiple(mut self) -> Self {
        self.multiple = Some(true);
        self
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case_insensitive = Some(false);
        self
    }
}

/// A field entry as hosts are allowed to write it: a bare column index,
/// a list of column indices, or a full descriptor.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Index(usize),
    Indices(Vec<usize>),
    Spec(FieldSpec),
}

impl FieldInput {
    pub fn into_spec(self) -> FieldSpec {
        match self {
            FieldInput::Index(column) => FieldSpec::for_columns(column),
            FieldInput::Indices(columns) => FieldSpec::for_columns(columns),
            FieldInput::Spec(spec) => spec,
        }
    }
}

impl From<usize> for FieldInput {
    fn from(column: usize) -> Self {
        FieldInput::Index(column)
    }
}

impl From<Vec<usize>> for FieldInput {
    fn from(columns: Vec<usize>) -> Self {
        FieldInput::Indices(columns)
    }
}

impl From<FieldSpec> for FieldInput {
    fn from(spec: FieldSpec) -> Self {
        FieldInput::Spec(spec)
    }
}

/// Fully resolved search field.
///
/// Constructed once by [`resolve_fields`] and immutable afterwards; the
/// evaluator only reads current input values, never this record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedField {
    /// Non-empty, each entry validated against the table's columns.
    pub columns: Vec<usize>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub range: RangeBounds,
    pub id: FieldId,
    /// Operator selector; never present on range fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced: Option<AdvancedSelector>,
    pub label: FieldLabel,
    pub server: String,
    pub multiple: bool,
    pub case_insensitive: bool,
    /// Reserved for future matching modes; currently inert.
    pub smart: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}
