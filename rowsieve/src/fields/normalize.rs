//! Normalization of loose field descriptors into resolved records.
//!
//! Runs once when a filter set is (re)configured. Missing data is
//! defaulted from column metadata; only an unresolvable field type or a
//! broken column reference is fatal.

use crate::errors::FilterError;
use crate::ids::IdContext;
use crate::types::{ColumnType, TableMeta};

use super::{
    AdvancedOp, AdvancedSelector, FieldId, FieldInput, FieldLabel, FieldSpec, FieldType,
    OptionSpec, RangeBounds, RangeSpec, ResolvedField, SelectOption,
};

/// Resolve a loose field list against the table's column metadata.
///
/// `None` or an empty list means "all columns, one field per column".
/// Resolution is deterministic: the same inputs always produce the same
/// records, ids included.
pub fn resolve_fields(
    inputs: Option<&[FieldInput]>,
    table: &TableMeta,
) -> Result<Vec<ResolvedField>, FilterError> {
    let specs: Vec<FieldSpec> = match inputs {
        None | Some([]) => (0..table.column_count())
            .map(|column| FieldSpec::for_columns(column))
            .collect(),
        Some(list) => list.iter().cloned().map(FieldInput::into_spec).collect(),
    };

    specs
        .into_iter()
        .enumerate()
        .map(|(index, spec)| resolve_field(index, spec, table))
        .collect()
}

fn resolve_field(
    index: usize,
    spec: FieldSpec,
    table: &TableMeta,
) -> Result<ResolvedField, FilterError> {
    let columns = spec.columns.into_vec();
    if columns.is_empty() {
        return Err(FilterError::EmptyColumns { field_index: index });
    }
    for &column in &columns {
        if column >= table.column_count() {
            return Err(FilterError::ColumnOutOfBounds {
                field_index: index,
                column,
                column_count: table.column_count(),
            });
        }
    }

    let multiple = spec.multiple == Some(true);
    let field_type = resolve_type(index, spec.field_type.as_deref(), &columns, table)?;
    let range = spec.range.as_ref().map(RangeSpec::resolve).unwrap_or_default();
    let label = resolve_label(spec.label, range, &columns, table);

    let ids = IdContext::new(&table.instance);
    let id = resolve_id(&ids, index, range, spec.control_id.as_deref());

    // Ranges never get an operator selector; the two are mutually exclusive.
    let advanced = (spec.advanced == Some(true) && range.is_empty()).then(|| AdvancedSelector {
        id: ids.advanced(index),
        operators: AdvancedOp::options_for(field_type).to_vec(),
        default: AdvancedOp::default_for(field_type),
    });

    let server = spec.server.unwrap_or_else(|| ids.field(index));
    let options = spec
        .options
        .filter(|options| !options.is_empty())
        .map(|options| resolve_options(options, multiple));

    Ok(ResolvedField {
        columns,
        field_type,
        range,
        id,
        advanced,
        label,
        server,
        multiple,
        case_insensitive: spec.case_insensitive != Some(false),
        smart: spec.smart == Some(true),
        options,
    })
}

/// Explicit type wins (lower-cased); otherwise a single-column field
/// takes its column's declared type, and a multi-column field is a
/// string search. A declared column type with no filter counterpart
/// (e.g. `html`) is a configuration error, not a silent default.
fn resolve_type(
    index: usize,
    explicit: Option<&str>,
    columns: &[usize],
    table: &TableMeta,
) -> Result<FieldType, FilterError> {
    if let Some(raw) = explicit {
        return FieldType::parse(raw).ok_or_else(|| FilterError::InvalidFieldType {
            field_index: index,
            found: raw.to_string(),
        });
    }

    if let [column] = columns {
        let kind = table.columns[*column].kind;
        return inferred_type(kind).ok_or_else(|| FilterError::InvalidFieldType {
            field_index: index,
            found: kind.as_str().to_string(),
        });
    }

    Ok(FieldType::String)
}

fn inferred_type(kind: ColumnType) -> Option<FieldType> {
    match kind {
        ColumnType::String => Some(FieldType::String),
        ColumnType::Date => Some(FieldType::Date),
        kind if kind.is_numeric() => Some(FieldType::Number),
        _ => None,
    }
}

fn resolve_label(
    explicit: Option<String>,
    range: RangeBounds,
    columns: &[usize],
    table: &TableMeta,
) -> FieldLabel {
    let base = explicit.unwrap_or_else(|| {
        columns
            .iter()
            .map(|&column| table.columns[column].title.as_str())
            .collect::<Vec<_>>()
            .join(" & ")
    });

    if range.is_empty() {
        FieldLabel::Single(base)
    } else {
        FieldLabel::Bounds {
            min: range.has_min().then(|| format!("Min {base}")),
            max: range.has_max().then(|| format!("Max {base}")),
        }
    }
}

/// Generated ids are `<instance>_<index>` with `_min`/`_max` suffixes for
/// range bounds. An id supplied via `control_id` is adopted verbatim so
/// host-owned markup is never overridden; a single adopted id cannot
/// address a bound pair, so range fields always generate.
fn resolve_id(
    ids: &IdContext<'_>,
    index: usize,
    range: RangeBounds,
    existing: Option<&str>,
) -> FieldId {
    if range.is_empty() {
        let id = match existing {
            Some(existing) => existing.to_string(),
            None => ids.field(index),
        };
        return FieldId::Single(id);
    }

    FieldId::Bounds {
        min: range.has_min().then(|| ids.min(index)),
        max: range.has_max().then(|| ids.max(index)),
    }
}

fn resolve_options(options: Vec<OptionSpec>, multiple: bool) -> Vec<SelectOption> {
    let mut resolved: Vec<SelectOption> =
        options.into_iter().map(OptionSpec::into_option).collect();
    // Multi-selects express "All" by selecting nothing.
    if !multiple {
        resolved.insert(0, SelectOption::all());
    }
    resolved
}
