#![forbid(unsafe_code)]

use crate::error::{FrameError, FrameResult};
use crate::table::{ColumnKey, Table};
use crate::value::Value;
use std::collections::{HashMap, HashSet};

/// Matching row pairs of an equi-join: `left_indices[i]` joins `right_indices[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinIndices {
    pub left_indices: Vec<usize>,
    pub right_indices: Vec<usize>,
}

impl JoinIndices {
    pub fn len(&self) -> usize {
        self.left_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left_indices.is_empty()
    }
}

/// Row pairs whose keys are equal, grouped by key in the order keys first appear on the left.
///
/// Within a key, pairs enumerate the cross product of the left and right rows in row order.
/// Both key columns must share an element type (nullability may differ); null keys never match.
pub fn hash_join_indices(
    left: &Table,
    key1: impl ColumnKey,
    right: &Table,
    key2: impl ColumnKey,
) -> FrameResult<JoinIndices> {
    let left_key = left.column(key1)?;
    let right_key = right.column(key2)?;
    if left_key.element_type() != right_key.element_type() {
        return Err(FrameError::KeyTypeMismatch {
            left: left_key.element_type(),
            right: right_key.element_type(),
        });
    }
    let left_values = left_key.values(left.row_count())?;
    let right_values = right_key.values(right.row_count())?;

    let mut build: HashMap<&Value, Vec<usize>> = HashMap::new();
    for (row, value) in right_values.iter().enumerate() {
        if !value.is_null() {
            build.entry(value).or_default().push(row);
        }
    }

    let mut probe_order: Vec<&Value> = Vec::new();
    let mut probe: HashMap<&Value, Vec<usize>> = HashMap::new();
    for (row, value) in left_values.iter().enumerate() {
        if value.is_null() || !build.contains_key(value) {
            continue;
        }
        probe
            .entry(value)
            .or_insert_with(|| {
                probe_order.push(value);
                Vec::new()
            })
            .push(row);
    }

    let mut out = JoinIndices::default();
    for value in probe_order {
        let (Some(lefts), Some(rights)) = (probe.get(value), build.get(value)) else {
            continue;
        };
        for &l in lefts {
            for &r in rights {
                out.left_indices.push(l);
                out.right_indices.push(r);
            }
        }
    }
    Ok(out)
}

/// Inner equi-join of `left` and `right` on `key1 = key2`.
///
/// The result holds every column of `left`, followed by the columns of `right` except `key2` and
/// any column whose name is already taken by a column of `left`. Rows are deep copies and the
/// result has no slack. Neither input is modified.
pub fn join(
    left: &Table,
    key1: impl ColumnKey,
    right: &Table,
    key2: impl ColumnKey,
) -> FrameResult<Table> {
    let right_key = key2.resolve(right)?;
    let pairs = hash_join_indices(left, key1, right, right_key)?;

    let taken: HashSet<&str> = left.columns().iter().filter_map(|c| c.name()).collect();
    let mut columns = Vec::with_capacity(left.column_count() + right.column_count());
    for column in left.columns() {
        columns.push(column.select(&pairs.left_indices)?);
    }
    for (index, column) in right.columns().iter().enumerate() {
        if index == right_key || column.name().is_some_and(|name| taken.contains(name)) {
            continue;
        }
        columns.push(column.select(&pairs.right_indices)?);
    }

    log::debug!(
        "join: {} x {} rows produced {} rows over {} columns",
        left.row_count(),
        right.row_count(),
        pairs.len(),
        columns.len()
    );
    Ok(Table::from_columns(columns)?.with_options(left.options()))
}
