#![forbid(unsafe_code)]

use crate::column::Column;
use crate::error::{FrameError, FrameResult};
use crate::table::Table;
use std::collections::HashMap;

/// Column-wise concatenation of tables with equal row counts.
///
/// Every input is flushed first. The result's columns are aliases of the input buffers
/// ([`Column::share`]), so later row mutations through either side are visible through the
/// other; clone the inputs first when independent storage is needed. Capacity is shared too:
/// adding, inserting or removing rows (or `flush`/`clear`) on one side resizes the shared
/// buffers under the other side, which can then still be read but no longer grown or shrunk
/// safely. Two exceptions get fresh buffers:
/// - when any input holds a nullable column, non-nullable columns are converted to their
///   nullable variant;
/// - a buffer that would appear twice in the result is deep-copied the second time.
///
/// Names that occur more than once across the inputs get `_1`, `_2`, ... appended to every
/// occurrence, in input order. Tables without columns are ignored.
pub fn merge<'a>(tables: impl IntoIterator<Item = &'a mut Table>) -> FrameResult<Table> {
    let mut tables: Vec<&mut Table> = tables
        .into_iter()
        .filter(|t| t.column_count() > 0)
        .collect();
    let Some(first) = tables.first() else {
        return Ok(Table::new());
    };
    let rows = first.row_count();
    let options = first.options();
    if let Some(bad) = tables.iter().find(|t| t.row_count() != rows) {
        return Err(FrameError::RowCountMismatch {
            expected: rows,
            actual: bad.row_count(),
        });
    }

    let any_nullable = tables
        .iter()
        .flat_map(|t| t.columns())
        .any(Column::is_nullable);

    let mut occurrences: HashMap<String, usize> = HashMap::new();
    for column in tables.iter().flat_map(|t| t.columns()) {
        if let Some(name) = column.name() {
            *occurrences.entry(name.to_owned()).or_default() += 1;
        }
    }
    let mut suffixes: HashMap<String, usize> = HashMap::new();

    let mut columns: Vec<Column> = Vec::new();
    for table in &mut tables {
        table.flush();
        for column in table.columns() {
            let mut merged = if any_nullable && !column.is_nullable() {
                column.convert_to_type(column.column_type().with_nullable(true))?
            } else if columns.iter().any(|c| c.shares_storage_with(column)) {
                column.clone()
            } else {
                column.share()
            };
            if let Some(name) = column.name() {
                if occurrences.get(name).copied().unwrap_or(0) > 1 {
                    let n = suffixes.entry(name.to_owned()).or_default();
                    *n += 1;
                    merged.set_name(Some(format!("{name}_{n}")));
                }
            }
            columns.push(merged);
        }
    }

    log::debug!(
        "merged {} tables into {} columns of {rows} rows",
        tables.len(),
        columns.len()
    );
    Ok(Table::from_columns(columns)?.with_options(options))
}
