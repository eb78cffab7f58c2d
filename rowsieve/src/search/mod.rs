//! Row evaluation: per-type comparison functions and the short-circuit
//! AND across a resolved field set.
//!
//! Evaluation is a pure function of (resolved fields, current input
//! values, row). The engine never reaches into ambient UI state; the
//! host supplies a [`ValueSource`] per pass and receives a boolean
//! verdict per row. Data problems (unparsable numbers or dates in
//! cells) fail closed: the affected column contributes no match, and a
//! malformed row never aborts a pass.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::FilterError;
use crate::fields::{
    AdvancedOp, FieldId, FieldInput, FieldType, ResolvedField, SelectOption, resolve_fields,
};
use crate::types::TableMeta;

/// Current value of one input control, as reported by the host.
///
/// Multi-select controls report a list; a list matches when any entry
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    One(String),
    Many(Vec<String>),
}

impl InputValue {
    /// True when the control holds no constraint at all.
    pub fn is_empty(&self) -> bool {
        match self {
            InputValue::One(value) => value.is_empty(),
            InputValue::Many(values) => values.is_empty(),
        }
    }

    /// The entered term(s). A single value is a one-term slice.
    pub fn terms(&self) -> &[String] {
        match self {
            InputValue::One(value) => std::slice::from_ref(value),
            InputValue::Many(values) => values,
        }
    }

    /// The value collapsed to a single string, for controls that can
    /// only ever hold one (range bounds, operator selectors).
    fn scalar(self) -> String {
        match self {
            InputValue::One(value) => value,
            InputValue::Many(values) => values.into_iter().next().unwrap_or_default(),
        }
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::One(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::One(value)
    }
}

impl From<Vec<String>> for InputValue {
    fn from(values: Vec<String>) -> Self {
        InputValue::Many(values)
    }
}

impl From<Vec<&str>> for InputValue {
    fn from(values: Vec<&str>) -> Self {
        InputValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Read-side access to the host's current control values.
///
/// The evaluator asks for values by control id at call time; it never
/// holds them. A missing entry reads as "nothing entered".
pub trait ValueSource {
    fn value(&self, control_id: &str) -> Option<InputValue>;
}

impl ValueSource for HashMap<String, InputValue> {
    fn value(&self, control_id: &str) -> Option<InputValue> {
        self.get(control_id).cloned()
    }
}

impl ValueSource for HashMap<String, String> {
    fn value(&self, control_id: &str) -> Option<InputValue> {
        self.get(control_id).cloned().map(InputValue::One)
    }
}

impl ValueSource for HashMap<&str, &str> {
    fn value(&self, control_id: &str) -> Option<InputValue> {
        self.get(control_id).map(|value| InputValue::from(*value))
    }
}

/// Adapter letting a closure serve as a [`ValueSource`].
pub struct FnSource<F>(pub F);

impl<F> ValueSource for FnSource<F>
where
    F: Fn(&str) -> Option<InputValue>,
{
    fn value(&self, control_id: &str) -> Option<InputValue> {
        (self.0)(control_id)
    }
}

/// A resolved field set plus the per-row verdict logic.
///
/// Built once at configuration time and immutable afterwards; each
/// [`RowFilter::row_passes`] call reads only the host's current values.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFilter {
    fields: Vec<ResolvedField>,
}

impl RowFilter {
    /// Normalize a loose field list (see [`resolve_fields`]) and wrap
    /// the result.
    pub fn resolve(
        inputs: Option<&[FieldInput]>,
        table: &TableMeta,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            fields: resolve_fields(inputs, table)?,
        })
    }

    /// Wrap an already-resolved field set.
    pub fn from_fields(fields: Vec<ResolvedField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// Every control id in the set, in declaration order. Hosts watch
    /// these for change events to know when to re-filter.
    pub fn control_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for field in &self.fields {
            match &field.id {
                FieldId::Single(id) => ids.push(id.as_str()),
                FieldId::Bounds { min, max } => {
                    ids.extend(min.as_deref());
                    ids.extend(max.as_deref());
                }
            }
            if let Some(advanced) = &field.advanced {
                ids.push(advanced.id.as_str());
            }
        }
        ids
    }

    /// Decide whether a row passes every field: logical AND, stopping at
    /// the first miss. A field whose inputs are empty is no constraint.
    pub fn row_passes<V, C>(&self, values: &V, row: &[C]) -> bool
    where
        V: ValueSource + ?Sized,
        C: AsRef<str>,
    {
        self.fields
            .iter()
            .all(|field| field_passes(field, values, row))
    }
}

fn field_passes<V, C>(field: &ResolvedField, values: &V, row: &[C]) -> bool
where
    V: ValueSource + ?Sized,
    C: AsRef<str>,
{
    if field.range.is_empty() {
        plain_field_passes(field, values, row)
    } else {
        range_field_passes(field, values, row)
    }
}

fn plain_field_passes<V, C>(field: &ResolvedField, values: &V, row: &[C]) -> bool
where
    V: ValueSource + ?Sized,
    C: AsRef<str>,
{
    let Some(value) = field
        .id
        .as_single()
        .and_then(|id| values.value(id))
        .filter(|value| !value.is_empty())
    else {
        return true;
    };

    // The operator selector is a live control like any other; its
    // current value is read here, not at configuration time.
    let operator = field
        .advanced
        .as_ref()
        .and_then(|advanced| values.value(&advanced.id))
        .map(InputValue::scalar)
        .unwrap_or_default();

    if field.field_type == FieldType::Date && operator.is_empty() {
        return value.terms().iter().any(|term| {
            field
                .columns
                .iter()
                .any(|&column| date_equal(cell(row, column), term))
        });
    }

    let text = field
        .columns
        .iter()
        .map(|&column| cell(row, column))
        .collect::<Vec<_>>()
        .join(" ");

    string_match(&text, value.terms(), &operator, field.case_insensitive)
}

fn range_field_passes<V, C>(field: &ResolvedField, values: &V, row: &[C]) -> bool
where
    V: ValueSource + ?Sized,
    C: AsRef<str>,
{
    let min = bound_value(values, field.id.min());
    let max = bound_value(values, field.id.max());

    // Nothing entered in either bound: no constraint.
    if min.is_empty() && max.is_empty() {
        return true;
    }

    field.columns.iter().any(|&column| {
        let cell = cell(row, column);
        match field.field_type {
            FieldType::Date => date_range(cell, &min, &max),
            _ => number_range(cell, &min, &max),
        }
    })
}

fn bound_value<V>(values: &V, id: Option<&str>) -> String
where
    V: ValueSource + ?Sized,
{
    id.and_then(|id| values.value(id))
        .map(InputValue::scalar)
        .unwrap_or_default()
}

fn cell<C: AsRef<str>>(row: &[C], column: usize) -> &str {
    row.get(column).map(AsRef::as_ref).unwrap_or("")
}

/// Match `text` against one or more entered terms.
///
/// A term list matches when any term satisfies the operator. `op` is the
/// raw operator-control value: empty means the implicit `contains`, a
/// recognized token selects that operator, and anything else matches
/// nothing. `contains`/`not-contains` treat the term as a pattern,
/// falling back to a literal substring check when it is not a valid
/// pattern. `greater`/`less` compare integer prefixes of both sides and
/// fail when either side has none.
pub fn string_match<S: AsRef<str>>(
    text: &str,
    terms: &[S],
    op: &str,
    case_insensitive: bool,
) -> bool {
    let op = if op.is_empty() {
        AdvancedOp::Contains
    } else {
        match AdvancedOp::parse(op) {
            Some(op) => op,
            // Unrecognized operator: nothing can match.
            None => return false,
        }
    };

    let text = if case_insensitive {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    let text_number = leading_int(&text);

    terms.iter().any(|term| {
        let term = if case_insensitive {
            term.as_ref().to_lowercase()
        } else {
            term.as_ref().to_string()
        };

        match op {
            AdvancedOp::Contains => pattern_found(&text, &term),
            AdvancedOp::NotContains => !pattern_found(&text, &term),
            AdvancedOp::Equal => text == term,
            AdvancedOp::NotEqual => text != term,
            AdvancedOp::Greater => match (text_number, leading_int(&term)) {
                (Some(lhs), Some(rhs)) => lhs > rhs,
                _ => false,
            },
            AdvancedOp::Less => match (text_number, leading_int(&term)) {
                (Some(lhs), Some(rhs)) => lhs < rhs,
                _ => false,
            },
        }
    })
}

fn pattern_found(text: &str, pattern: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => text.contains(pattern),
    }
}

/// Integer prefix of a string: optional leading whitespace, optional
/// sign, then digits. `None` when no digits lead the string.
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let digits: &str = &rest[..rest
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(at, _)| at)
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }

    digits
        .parse::<i64>()
        .ok()
        .map(|number| if negative { -number } else { number })
}

/// Numeric range check. The cell is reduced to its digits before
/// parsing, so formatted values like `$1,200` read as 1200; a cell with
/// no digits matches nothing regardless of bounds. A bound that is
/// missing or unparsable is unbounded on that side; bounds are
/// inclusive.
pub fn number_range(cell: &str, min: &str, max: &str) -> bool {
    let digits: String = cell.chars().filter(char::is_ascii_digit).collect();
    let Ok(cell) = digits.parse::<i64>() else {
        return false;
    };

    let min = leading_int(min);
    let max = leading_int(max);

    min.is_none_or(|min| min <= cell) && max.is_none_or(|max| cell <= max)
}

/// Parse a cell or input as a calendar instant.
///
/// Accepts RFC 3339, `YYYY-MM-DD` (optionally with a time part),
/// `YYYY/MM/DD`, and US-style `MM/DD/YYYY`. Bare dates read as midnight.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(instant) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(instant);
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    None
}

/// Calendar-instant equality. Either side failing to parse is no match.
pub fn date_equal(cell: &str, value: &str) -> bool {
    match (parse_date(cell), parse_date(value)) {
        (Some(cell), Some(value)) => cell == value,
        _ => false,
    }
}

/// Date range check, inclusive on both ends. An unparsable cell matches
/// nothing; a missing or unparsable bound is unbounded on that side.
pub fn date_range(cell: &str, min: &str, max: &str) -> bool {
    let Some(cell) = parse_date(cell) else {
        return false;
    };

    let min = parse_date(min);
    let max = parse_date(max);

    min.is_none_or(|min| min <= cell) && max.is_none_or(|max| cell <= max)
}

/// Build a select field's option list from its first column's cell
/// values: distinct values in first-seen order, with the "All" sentinel
/// prepended for single-selects.
pub fn harvest_options<I, S>(field: &ResolvedField, cells: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options: Vec<SelectOption> = Vec::new();
    for cell in cells {
        let cell = cell.as_ref();
        if !options.iter().any(|option| option.value == cell) {
            options.push(SelectOption::new(cell, cell));
        }
    }
    if !field.multiple {
        options.insert(0, SelectOption::all());
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldSpec;
    use crate::types::{ColumnMeta, ColumnType};

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, InputValue> {
        pairs
            .iter()
            .map(|(id, value)| (id.to_string(), InputValue::from(*value)))
            .collect()
    }

    mod string_matching {
        use super::*;

        #[test]
        fn contains_is_the_implicit_operator() {
            assert!(string_match("Hello World", &["world"], "", true));
            assert!(string_match("Hello World", &["world"], "contains", true));
            assert!(!string_match("Hello World", &["world"], "contains", false));
            assert!(!string_match("Hello World", &["mars"], "", true));
        }

        #[test]
        fn terms_are_patterns() {
            assert!(string_match("foobar", &["f.o"], "", false));
            assert!(string_match("foobar", &["^foo"], "", false));
            assert!(!string_match("foobar", &["^bar"], "", false));
            // Invalid pattern degrades to a literal substring check.
            assert!(string_match("a(b", &["a(b"], "", false));
            assert!(!string_match("axb", &["a(b"], "", false));
        }

        #[test]
        fn not_contains() {
            assert!(string_match("foobar", &["baz"], "not-contains", true));
            assert!(!string_match("foobar", &["oba"], "not-contains", true));
        }

        #[test]
        fn equality_operators() {
            assert!(string_match("Foo", &["foo"], "equal", true));
            assert!(!string_match("Foo", &["foo"], "equal", false));
            assert!(string_match("Foo", &["bar"], "not-equal", true));
            assert!(!string_match("foo", &["foo"], "not-equal", true));
        }

        #[test]
        fn ordered_operators_parse_integer_prefixes() {
            assert!(string_match("15 units", &["10"], "greater", true));
            assert!(!string_match("15 units", &["20"], "greater", true));
            assert!(string_match("15", &["20"], "less", true));
            assert!(string_match("-5", &["-10"], "greater", true));
        }

        #[test]
        fn ordered_operators_fail_closed_without_digits() {
            assert!(!string_match("abc", &["10"], "greater", true));
            assert!(!string_match("10", &["abc"], "less", true));
            assert!(!string_match("abc", &["def"], "greater", true));
        }

        #[test]
        fn unknown_operator_never_matches() {
            for term in ["foo", "", "10"] {
                assert!(!string_match("foo 10", &[term], "between", true));
                assert!(!string_match("foo 10", &[term], "CONTAINS", true));
            }
        }

        #[test]
        fn any_term_in_a_list_suffices() {
            assert!(string_match("foobar", &["baz", "oba"], "", true));
            assert!(!string_match("foobar", &["baz", "qux"], "", true));
        }
    }

    mod number_ranges {
        use super::*;

        #[test]
        fn formatted_cells_reduce_to_digits() {
            assert!(number_range("$1,200", "1000", "1500"));
            assert!(!number_range("$1,200", "1300", ""));
        }

        #[test]
        fn unparsable_cell_fails_closed() {
            assert!(!number_range("abc", "0", "10"));
            assert!(!number_range("", "", ""));
        }

        #[test]
        fn missing_bounds_are_unbounded() {
            assert!(number_range("7", "", ""));
            assert!(number_range("7", "5", ""));
            assert!(number_range("7", "", "10"));
            assert!(!number_range("7", "8", ""));
            assert!(!number_range("7", "", "6"));
        }

        #[test]
        fn unparsable_bounds_are_unbounded() {
            assert!(number_range("7", "abc", "xyz"));
            assert!(number_range("7", "abc", "10"));
        }

        #[test]
        fn bounds_are_inclusive() {
            assert!(number_range("10", "10", "20"));
            assert!(number_range("20", "10", "20"));
        }
    }

    mod date_handling {
        use super::*;

        #[test]
        fn parses_common_formats() {
            let expected = parse_date("2020-05-01").unwrap();
            assert_eq!(parse_date("2020/05/01").unwrap(), expected);
            assert_eq!(parse_date("05/01/2020").unwrap(), expected);
            assert_eq!(parse_date(" 2020-05-01 ").unwrap(), expected);
            assert!(parse_date("2020-05-01T10:30:00").is_some());
            assert!(parse_date("2020-05-01T10:30:00Z").is_some());
            assert!(parse_date("not a date").is_none());
            assert!(parse_date("").is_none());
        }

        #[test]
        fn equality_compares_instants_across_formats() {
            assert!(date_equal("2020-05-01", "05/01/2020"));
            assert!(!date_equal("2020-05-01", "2020-05-02"));
            assert!(!date_equal("garbage", "2020-05-01"));
            assert!(!date_equal("2020-05-01", "garbage"));
        }

        #[test]
        fn range_is_inclusive_and_fails_closed() {
            assert!(date_range("2020-05-01", "2020-01-01", "2020-12-31"));
            assert!(date_range("2020-01-01", "2020-01-01", "2020-12-31"));
            assert!(!date_range("2021-02-01", "2020-01-01", "2020-12-31"));
            assert!(!date_range("not a date", "2020-01-01", "2020-12-31"));
        }

        #[test]
        fn invalid_bounds_are_unbounded() {
            assert!(date_range("2020-05-01", "", ""));
            assert!(date_range("2020-05-01", "garbage", "2020-12-31"));
            assert!(!date_range("2020-05-01", "2020-06-01", "garbage"));
        }
    }

    mod row_evaluation {
        use super::*;

        fn table() -> TableMeta {
            TableMeta::new(
                "t",
                vec![
                    ColumnMeta::new("Name", ColumnType::String),
                    ColumnMeta::new("Price", ColumnType::Currency),
                    ColumnMeta::new("Shipped", ColumnType::Date),
                ],
            )
        }

        #[test]
        fn empty_inputs_pass_every_row() {
            let filter = RowFilter::resolve(None, &table()).unwrap();
            let empty = HashMap::<String, InputValue>::new();
            assert!(filter.row_passes(&empty, &["anything", "at", "all"]));
            assert!(filter.row_passes(&empty, &["", "", ""]));
        }

        #[test]
        fn empty_range_inputs_pass_non_numeric_cells() {
            let inputs = [FieldSpec::for_columns(1).with_range(true).into()];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            let empty = HashMap::<String, InputValue>::new();
            assert!(filter.row_passes(&empty, &["x", "not a number", "y"]));
        }

        #[test]
        fn plain_field_concatenates_its_columns() {
            let inputs = [FieldInput::Indices(vec![0, 2])];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            // The space inserted between columns is searchable text.
            let current = values(&[("t_0", "alice 2020")]);
            assert!(filter.row_passes(&current, &["alice", "10", "2020-01-01"]));
            assert!(!filter.row_passes(&current, &["bob", "10", "2020-01-01"]));
        }

        #[test]
        fn case_sensitivity_is_per_field() {
            let inputs = [FieldSpec::for_columns(0).case_sensitive().into()];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            let current = values(&[("t_0", "Alice")]);
            assert!(filter.row_passes(&current, &["Alice", "", ""]));
            assert!(!filter.row_passes(&current, &["alice", "", ""]));
        }

        #[test]
        fn date_field_matches_on_calendar_equality() {
            let inputs = [FieldInput::Index(2)];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            let current = values(&[("t_0", "2020-05-01")]);
            assert!(filter.row_passes(&current, &["a", "1", "05/01/2020"]));
            assert!(!filter.row_passes(&current, &["a", "1", "2020-05-02"]));
            assert!(!filter.row_passes(&current, &["a", "1", "not a date"]));
        }

        #[test]
        fn date_field_with_operator_takes_the_string_path() {
            let inputs = [FieldSpec::for_columns(2).with_advanced().into()];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();

            // greater/less on dates compare integer prefixes (years).
            let current = values(&[("t_0", "2019"), ("t_0_advanced", "greater")]);
            assert!(filter.row_passes(&current, &["a", "1", "2020-05-01"]));

            let current = values(&[("t_0", "2021"), ("t_0_advanced", "greater")]);
            assert!(!filter.row_passes(&current, &["a", "1", "2020-05-01"]));
        }

        #[test]
        fn advanced_operator_value_is_read_per_pass() {
            let inputs = [FieldSpec::for_columns(0).with_advanced().into()];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            let row = ["foobar", "", ""];

            let contains = values(&[("t_0", "foo")]);
            assert!(filter.row_passes(&contains, &row));

            let equal = values(&[("t_0", "foo"), ("t_0_advanced", "equal")]);
            assert!(!filter.row_passes(&equal, &row));

            let not_contains = values(&[("t_0", "foo"), ("t_0_advanced", "not-contains")]);
            assert!(!filter.row_passes(&not_contains, &row));

            // An operator token the engine does not know matches nothing.
            let unknown = values(&[("t_0", "foo"), ("t_0_advanced", "fuzzy")]);
            assert!(!filter.row_passes(&unknown, &row));
        }

        #[test]
        fn multi_select_terms_are_ored() {
            let inputs = [FieldSpec::for_columns(0)
                .with_type(FieldType::Select)
                .with_multiple()
                .into()];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();

            let mut current = HashMap::new();
            current.insert(
                "t_0".to_string(),
                InputValue::from(vec!["alice", "bob"]),
            );
            assert!(filter.row_passes(&current, &["bob", "", ""]));
            assert!(!filter.row_passes(&current, &["carol", "", ""]));

            // Nothing selected means no constraint.
            current.insert("t_0".to_string(), InputValue::Many(Vec::new()));
            assert!(filter.row_passes(&current, &["carol", "", ""]));
        }

        #[test]
        fn range_field_passes_when_any_column_is_in_range() {
            let inputs = [FieldSpec::for_columns(vec![1, 2])
                .with_type(FieldType::Number)
                .with_range(true)
                .into()];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            let current = values(&[("t_0_min", "10"), ("t_0_max", "20")]);
            assert!(filter.row_passes(&current, &["a", "15", "999"]));
            assert!(filter.row_passes(&current, &["a", "999", "15"]));
            assert!(!filter.row_passes(&current, &["a", "999", "999"]));
        }

        #[test]
        fn half_open_range_reads_only_the_present_bound() {
            let inputs = [FieldSpec::for_columns(1).with_range("min").into()];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            let current = values(&[("t_0_min", "100")]);
            assert!(filter.row_passes(&current, &["a", "$150", ""]));
            assert!(!filter.row_passes(&current, &["a", "$50", ""]));
        }

        #[test]
        fn date_range_field() {
            let inputs = [FieldSpec::for_columns(2).with_range(true).into()];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            let current = values(&[("t_0_min", "2020-01-01"), ("t_0_max", "2020-12-31")]);
            assert!(filter.row_passes(&current, &["a", "1", "2020-05-01"]));
            assert!(!filter.row_passes(&current, &["a", "1", "2021-05-01"]));
            assert!(!filter.row_passes(&current, &["a", "1", "unshipped"]));
        }

        #[test]
        fn fields_are_anded() {
            let inputs = [
                FieldInput::Index(0),
                FieldSpec::for_columns(1).with_range(true).into(),
            ];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            let current = values(&[("t_0", "foo"), ("t_1_min", "10"), ("t_1_max", "20")]);
            assert!(filter.row_passes(&current, &["foobar", "15", ""]));
            assert!(!filter.row_passes(&current, &["foobar", "25", ""]));
            assert!(!filter.row_passes(&current, &["baz", "15", ""]));
        }

        #[test]
        fn closures_work_as_value_sources() {
            let inputs = [FieldInput::Index(0)];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            let source = FnSource(|id: &str| (id == "t_0").then(|| InputValue::from("alice")));
            assert!(filter.row_passes(&source, &["alice", "", ""]));
            assert!(!filter.row_passes(&source, &["bob", "", ""]));
        }

        #[test]
        fn control_ids_cover_bounds_and_selectors() {
            let inputs = [
                FieldInput::Index(0),
                FieldSpec::for_columns(1).with_range(true).into(),
                FieldSpec::for_columns(0).with_advanced().into(),
            ];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            assert_eq!(
                filter.control_ids(),
                vec!["t_0", "t_1_min", "t_1_max", "t_2", "t_2_advanced"]
            );
        }

        #[test]
        fn short_rows_read_as_empty_cells() {
            let inputs = [FieldInput::Index(2)];
            let filter = RowFilter::resolve(Some(&inputs), &table()).unwrap();
            let current = values(&[("t_0", "2020-05-01")]);
            assert!(!filter.row_passes(&current, &["only one cell"]));
        }
    }

    mod option_harvesting {
        use super::*;

        #[test]
        fn distinct_values_in_first_seen_order() {
            let inputs = [FieldSpec::for_columns(0)
                .with_type(FieldType::Select)
                .into()];
            let table = TableMeta::new(
                "t",
                vec![ColumnMeta::new("Status", ColumnType::String)],
            );
            let filter = RowFilter::resolve(Some(&inputs), &table).unwrap();

            let options =
                harvest_options(&filter.fields()[0], ["open", "closed", "open", "held"]);
            assert_eq!(
                options,
                vec![
                    SelectOption::all(),
                    SelectOption::new("open", "open"),
                    SelectOption::new("closed", "closed"),
                    SelectOption::new("held", "held"),
                ]
            );
        }

        #[test]
        fn multi_selects_skip_the_all_sentinel() {
            let inputs = [FieldSpec::for_columns(0)
                .with_type(FieldType::Select)
                .with_multiple()
                .into()];
            let table = TableMeta::new(
                "t",
                vec![ColumnMeta::new("Status", ColumnType::String)],
            );
            let filter = RowFilter::resolve(Some(&inputs), &table).unwrap();

            let options = harvest_options(&filter.fields()[0], ["a", "b"]);
            assert_eq!(
                options,
                vec![SelectOption::new("a", "a"), SelectOption::new("b", "b")]
            );
        }
    }
}
