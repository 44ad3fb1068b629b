#![forbid(unsafe_code)]

use crate::column::Column;
use crate::error::{FrameError, FrameResult};
use crate::registry::ColumnRegistry;
use crate::types::TypeCode;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;

/// Capacity management knobs shared by all columns of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Shrink after a removal once `row_count * shrink_ratio < capacity`.
    pub shrink_ratio: usize,
    /// Slack slots kept after such a shrink.
    pub shrink_buffer: usize,
    /// Capacity kept by [`Table::clear`].
    pub clear_buffer: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            shrink_ratio: 3,
            shrink_buffer: 4,
            clear_buffer: 2,
        }
    }
}

/// Something that identifies a column of a table: a position or a name.
pub trait ColumnKey {
    fn resolve(&self, table: &Table) -> FrameResult<usize>;
}

impl ColumnKey for usize {
    fn resolve(&self, table: &Table) -> FrameResult<usize> {
        if *self < table.column_count() {
            Ok(*self)
        } else {
            Err(FrameError::ColumnOutOfBounds {
                index: *self,
                columns: table.column_count(),
            })
        }
    }
}

impl ColumnKey for &str {
    fn resolve(&self, table: &Table) -> FrameResult<usize> {
        table.column_index(self)
    }
}

impl ColumnKey for String {
    fn resolve(&self, table: &Table) -> FrameResult<usize> {
        table.column_index(self)
    }
}

impl ColumnKey for &String {
    fn resolve(&self, table: &Table) -> FrameResult<usize> {
        table.column_index(self)
    }
}

/// An ordered set of equally sized columns sharing one logical row count.
///
/// Invariants:
/// - every column has the same capacity, and `row_count() <= capacity()`;
/// - slots at and beyond `row_count()` hold each column's null/default marker;
/// - no two columns of one table share a backing buffer.
///
/// Column names are optional. When column names are duplicated, name lookups resolve to one of
/// the duplicates (the most recently named one); which one is not part of the contract.
///
/// Tables are single-threaded (`!Send`/`!Sync`). Columns may share storage with columns of other
/// tables (see [`crate::merge`]); row mutations then show through every table holding the
/// buffer, while only the mutated table's row count changes. Deep-copy with `clone()` first when
/// that is not wanted.
#[derive(Clone, Debug, Default)]
pub struct Table {
    columns: Vec<Column>,
    names: Option<HashMap<String, usize>>,
    rows: usize,
    options: TableOptions,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table over existing columns; all must have the same capacity, which becomes the row
    /// count.
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> FrameResult<Self> {
        let mut table = Table::new();
        let mut columns = columns.into_iter();
        if let Some(first) = columns.next() {
            table.rows = first.capacity();
            table.columns.push(first);
        }
        for column in columns {
            let capacity = table.capacity();
            if column.capacity() != capacity {
                return Err(FrameError::CapacityMismatch {
                    expected: capacity,
                    actual: column.capacity(),
                });
            }
            let column = table.unaliased(column);
            table.columns.push(column);
        }
        table.rebuild_names();
        Ok(table)
    }

    /// Empty table with one column per `(name, type code)` pair, materialized via `registry`.
    pub fn from_types<S: Into<String>>(
        registry: &ColumnRegistry,
        columns: impl IntoIterator<Item = (S, TypeCode)>,
    ) -> FrameResult<Self> {
        let columns = columns
            .into_iter()
            .map(|(name, code)| registry.create_named(name, code, 0))
            .collect::<FrameResult<Vec<_>>>()?;
        Self::from_columns(columns)
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> TableOptions {
        self.options
    }

    /// Empty table with the same column types, names and options.
    pub fn like(&self) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let mut empty = Column::new(c.column_type(), 0);
                empty.set_name(c.name().map(str::to_owned));
                empty
            })
            .collect();
        let mut table = Table {
            columns,
            names: None,
            rows: 0,
            options: self.options,
        };
        table.rebuild_names();
        table
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Shared capacity of all columns (0 without columns).
    pub fn capacity(&self) -> usize {
        self.columns.first().map(Column::capacity).unwrap_or(0)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: impl ColumnKey) -> FrameResult<&Column> {
        let index = key.resolve(self)?;
        Ok(&self.columns[index])
    }

    // --- names -----------------------------------------------------------------------------

    pub fn column_index(&self, name: &str) -> FrameResult<usize> {
        let names = self.names.as_ref().ok_or(FrameError::NoColumnNames)?;
        names
            .get(name)
            .copied()
            .ok_or_else(|| FrameError::UnknownColumn(name.to_owned()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_ok()
    }

    pub fn has_column_names(&self) -> bool {
        self.names.is_some()
    }

    pub fn column_names(&self) -> Vec<Option<&str>> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn set_column_names<S: Into<String>>(
        &mut self,
        names: impl IntoIterator<Item = S>,
    ) -> FrameResult<()> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.columns.len() {
            return Err(FrameError::NameCountMismatch {
                expected: self.columns.len(),
                actual: names.len(),
            });
        }
        for (column, name) in self.columns.iter_mut().zip(names) {
            column.set_name(Some(name));
        }
        self.rebuild_names();
        Ok(())
    }

    pub fn set_column_name(&mut self, key: impl ColumnKey, name: impl Into<String>) -> FrameResult<()> {
        let index = key.resolve(self)?;
        let name = name.into();
        self.unmap_name(index);
        self.columns[index].set_name(Some(name.clone()));
        self.map_name(name, index);
        Ok(())
    }

    pub fn remove_column_names(&mut self) {
        for column in &mut self.columns {
            column.set_name(None);
        }
        self.names = None;
    }

    fn rebuild_names(&mut self) {
        self.names = None;
        for index in 0..self.columns.len() {
            if let Some(name) = self.columns[index].name().map(str::to_owned) {
                self.map_name(name, index);
            }
        }
    }

    fn map_name(&mut self, name: String, index: usize) {
        let names = self.names.get_or_insert_with(HashMap::new);
        if let Some(previous) = names.insert(name, index) {
            if previous != index {
                log::warn!(
                    "duplicate column name {:?} (columns {previous} and {index}); lookups are ambiguous",
                    self.columns[index].name()
                );
            }
        }
    }

    fn unmap_name(&mut self, index: usize) {
        let Some(names) = self.names.as_mut() else {
            return;
        };
        if let Some(name) = self.columns[index].name() {
            if names.get(name) == Some(&index) {
                names.remove(name);
            }
        }
        if names.is_empty() {
            self.names = None;
        }
    }

    /// Moves every mapped index `>= from` up by one on insert, down by one on removal.
    fn shift_names(&mut self, from: usize, insert: bool) {
        if let Some(names) = self.names.as_mut() {
            for index in names.values_mut() {
                if *index >= from {
                    if insert {
                        *index += 1;
                    } else {
                        *index -= 1;
                    }
                }
            }
        }
    }

    // --- columns ---------------------------------------------------------------------------

    /// Deep-copies `column` if its buffer is already held by this table.
    fn unaliased(&self, column: Column) -> Column {
        if self.columns.iter().any(|c| c.shares_storage_with(&column)) {
            column.clone()
        } else {
            column
        }
    }

    /// Brings a column about to join the table to the table's capacity, resetting its slack.
    fn fit(&self, column: Column) -> FrameResult<Column> {
        let mut column = self.unaliased(column);
        if self.columns.is_empty() {
            return Ok(column);
        }
        if column.capacity() < self.rows {
            return Err(FrameError::CapacityMismatch {
                expected: self.capacity(),
                actual: column.capacity(),
            });
        }
        let capacity = self.capacity();
        if column.capacity() != capacity {
            column.match_length(capacity);
        }
        column.clear_from(self.rows);
        Ok(column)
    }

    pub fn add_column(&mut self, column: Column) -> FrameResult<()> {
        self.insert_column(self.columns.len(), column)
    }

    /// Inserts `column` at position `index`.
    ///
    /// The first column of a table defines the row count (its capacity). Later columns must
    /// hold at least `row_count()` slots and are truncated or padded to the table capacity.
    pub fn insert_column(&mut self, index: usize, column: Column) -> FrameResult<()> {
        if index > self.columns.len() {
            return Err(FrameError::ColumnOutOfBounds {
                index,
                columns: self.columns.len(),
            });
        }
        let column = self.fit(column)?;
        if self.columns.is_empty() {
            self.rows = column.capacity();
        }
        let name = column.name().map(str::to_owned);
        self.shift_names(index, true);
        self.columns.insert(index, column);
        if let Some(name) = name {
            self.map_name(name, index);
        }
        Ok(())
    }

    pub fn remove_column(&mut self, key: impl ColumnKey) -> FrameResult<Column> {
        let index = key.resolve(self)?;
        self.unmap_name(index);
        let column = self.columns.remove(index);
        self.shift_names(index + 1, false);
        if self.columns.is_empty() {
            self.rows = 0;
        }
        Ok(column)
    }

    /// Replaces a column, returning the old one. An unnamed replacement inherits the old name.
    pub fn set_column(&mut self, key: impl ColumnKey, column: Column) -> FrameResult<Column> {
        let index = key.resolve(self)?;
        let others_alias = self
            .columns
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.shares_storage_with(&column));
        let mut column = if others_alias { column.clone() } else { column };
        if column.capacity() < self.rows {
            return Err(FrameError::CapacityMismatch {
                expected: self.capacity(),
                actual: column.capacity(),
            });
        }
        let capacity = self.capacity();
        if column.capacity() != capacity {
            column.match_length(capacity);
        }
        column.clear_from(self.rows);
        if column.name().is_none() {
            column.set_name(self.columns[index].name().map(str::to_owned));
        }

        self.unmap_name(index);
        let name = column.name().map(str::to_owned);
        let old = std::mem::replace(&mut self.columns[index], column);
        if let Some(name) = name {
            self.map_name(name, index);
        }
        Ok(old)
    }

    // --- cells and rows --------------------------------------------------------------------

    fn check_row_index(&self, row: usize) -> FrameResult<()> {
        if row < self.rows {
            Ok(())
        } else {
            Err(FrameError::RowOutOfBounds {
                index: row,
                rows: self.rows,
            })
        }
    }

    /// Validates a full row against the column types without touching any column.
    fn check_row(&self, values: &[Value]) -> FrameResult<()> {
        if self.columns.is_empty() || values.len() != self.columns.len() {
            return Err(FrameError::RowLength {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        for (column, value) in self.columns.iter().zip(values) {
            column.check_value(value)?;
        }
        Ok(())
    }

    pub fn get(&self, key: impl ColumnKey, row: usize) -> FrameResult<Value> {
        let index = key.resolve(self)?;
        self.check_row_index(row)?;
        self.columns[index].get(row)
    }

    pub fn set(&mut self, key: impl ColumnKey, row: usize, value: Value) -> FrameResult<()> {
        let index = key.resolve(self)?;
        self.check_row_index(row)?;
        self.columns[index].set(row, value)
    }

    pub fn get_row(&self, row: usize) -> FrameResult<Vec<Value>> {
        self.check_row_index(row)?;
        self.columns.iter().map(|c| c.get(row)).collect()
    }

    pub fn set_row(&mut self, row: usize, values: Vec<Value>) -> FrameResult<()> {
        self.check_row_index(row)?;
        self.check_row(&values)?;
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.set(row, value)?;
        }
        Ok(())
    }

    /// Grows every column together once the row count reaches the capacity.
    fn ensure_room(&mut self) {
        if self.rows < self.capacity() {
            return;
        }
        for column in &mut self.columns {
            column.resize();
        }
        log::trace!("grew table capacity to {}", self.capacity());
    }

    pub fn add_row(&mut self, values: Vec<Value>) -> FrameResult<()> {
        self.check_row(&values)?;
        self.ensure_room();
        let row = self.rows;
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.set(row, value)?;
        }
        self.rows += 1;
        Ok(())
    }

    /// Inserts a row before `index`; `index == row_count()` appends.
    pub fn insert_row(&mut self, index: usize, values: Vec<Value>) -> FrameResult<()> {
        if index == self.rows {
            return self.add_row(values);
        }
        self.check_row_index(index)?;
        self.check_row(&values)?;
        self.ensure_room();
        let next = self.rows;
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.insert_at(index, next, value)?;
        }
        self.rows += 1;
        Ok(())
    }

    pub fn remove_row(&mut self, row: usize) -> FrameResult<()> {
        self.check_row_index(row)?;
        self.remove_rows(row, row + 1)
    }

    /// Removes rows `[from, to)`.
    pub fn remove_rows(&mut self, from: usize, to: usize) -> FrameResult<()> {
        if from > to || to > self.rows {
            return Err(FrameError::InvalidRange {
                from,
                to,
                rows: self.rows,
            });
        }
        if from == to {
            return Ok(());
        }
        let next = self.rows;
        for column in &mut self.columns {
            column.remove(from, to, next)?;
        }
        self.rows -= to - from;
        self.maybe_shrink();
        Ok(())
    }

    fn maybe_shrink(&mut self) {
        let capacity = self.capacity();
        if self.rows * self.options.shrink_ratio < capacity {
            let target = self.rows + self.options.shrink_buffer;
            for column in &mut self.columns {
                column.match_length(target);
            }
            log::trace!("shrank table capacity from {capacity} to {target}");
        }
    }

    /// Shrinks every column to exactly `row_count()` slots.
    pub fn flush(&mut self) {
        let rows = self.rows;
        for column in &mut self.columns {
            column.match_length(rows);
        }
    }

    /// Removes all rows and keeps a small fixed capacity.
    pub fn clear(&mut self) -> FrameResult<()> {
        let next = self.rows;
        let keep = self.options.clear_buffer;
        for column in &mut self.columns {
            column.remove(0, next, next)?;
            column.match_length(keep);
        }
        self.rows = 0;
        Ok(())
    }

    /// New table holding deep copies of the given rows, in that order, with no slack.
    pub(crate) fn select_rows(&self, rows: &[usize]) -> FrameResult<Table> {
        if let Some(&bad) = rows.iter().find(|&&r| r >= self.rows) {
            return Err(FrameError::RowOutOfBounds {
                index: bad,
                rows: self.rows,
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|c| c.select(rows))
            .collect::<FrameResult<Vec<_>>>()?;
        let mut table = Table {
            columns,
            names: None,
            rows: rows.len(),
            options: self.options,
        };
        table.rebuild_names();
        Ok(table)
    }

    /// Copy of rows `[from, to)` as a new table.
    pub fn get_rows(&self, from: usize, to: usize) -> FrameResult<Table> {
        if from > to || to > self.rows {
            return Err(FrameError::InvalidRange {
                from,
                to,
                rows: self.rows,
            });
        }
        let rows: Vec<usize> = (from..to).collect();
        self.select_rows(&rows)
    }

    /// Stable in-place sort of all rows by one column. Nulls sort first when ascending.
    pub fn sort_by(&mut self, key: impl ColumnKey, descending: bool) -> FrameResult<()> {
        let index = key.resolve(self)?;
        let values = self.columns[index].values(self.rows)?;
        let mut order: Vec<usize> = (0..self.rows).collect();
        order.sort_by(|&a, &b| {
            let ord = values[a].total_cmp(&values[b]);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        for column in &mut self.columns {
            column.permute(&order)?;
        }
        Ok(())
    }

    /// Compares names, types and logical values, ignoring capacity and slack.
    pub fn content_eq(&self, other: &Table) -> bool {
        if self.rows != other.rows || self.columns.len() != other.columns.len() {
            return false;
        }
        self.columns.iter().zip(&other.columns).all(|(a, b)| {
            a.name() == b.name()
                && a.column_type() == b.column_type()
                && a.values(self.rows).ok() == b.values(other.rows).ok()
        })
    }
}

/// Plain-text grid of the logical rows.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| c.name().map(str::to_owned).unwrap_or_else(|| i.to_string()))
            .collect();
        let cells: Vec<Vec<String>> = (0..self.rows)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.to_text(row).unwrap_or_default())
                    .collect()
            })
            .collect();
        let widths: Vec<usize> = header
            .iter()
            .enumerate()
            .map(|(i, h)| {
                cells
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let write_line = |f: &mut fmt::Formatter<'_>, line: &[String]| -> fmt::Result {
            let padded: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            writeln!(f, "{}", padded.join(" | ").trim_end())
        };

        write_line(f, &header)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &cells {
            write_line(f, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnType, ElementType};
    use pretty_assertions::assert_eq;

    fn people() -> Table {
        let mut table = Table::from_columns([
            Column::new(ColumnType::non_null(ElementType::Int), 0).with_name("id"),
            Column::new(ColumnType::non_null(ElementType::String), 0).with_name("name"),
        ])
        .unwrap();
        table.add_row(vec![Value::Int(1), Value::from("a")]).unwrap();
        table.add_row(vec![Value::Int(2), Value::from("b")]).unwrap();
        table
    }

    fn ids(table: &Table) -> Vec<Value> {
        table.column("id").unwrap().values(table.row_count()).unwrap()
    }

    #[test]
    fn add_row_grows_all_columns_together() {
        let mut table = people();
        assert_eq!(table.capacity(), 2);
        table.add_row(vec![Value::Int(3), Value::from("c")]).unwrap();
        assert_eq!(table.capacity(), 4);
        assert!(table.columns().iter().all(|c| c.capacity() == 4));
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn mismatched_row_leaves_table_untouched() {
        let mut table = people();
        let err = table
            .add_row(vec![Value::Int(3), Value::Long(4)])
            .unwrap_err();
        assert!(matches!(err, FrameError::TypeMismatch { .. }));
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.capacity(), 2);

        let err = table.insert_row(0, vec![Value::Int(3)]).unwrap_err();
        assert_eq!(
            err,
            FrameError::RowLength {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(ids(&table), vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn insert_and_remove_rows() {
        let mut table = people();
        table
            .insert_row(1, vec![Value::Int(3), Value::from("c")])
            .unwrap();
        assert_eq!(ids(&table), vec![Value::Int(1), Value::Int(3), Value::Int(2)]);
        table.remove_row(0).unwrap();
        assert_eq!(ids(&table), vec![Value::Int(3), Value::Int(2)]);
        assert_eq!(
            table.get_row(0).unwrap(),
            vec![Value::Int(3), Value::from("c")]
        );
    }

    #[test]
    fn lazy_shrink_after_bulk_removal() {
        let mut table = people();
        for i in 3..=20 {
            table
                .add_row(vec![Value::Int(i), Value::from("x")])
                .unwrap();
        }
        assert_eq!(table.capacity(), 32);
        table.remove_rows(2, 20).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.capacity(), 6);
        assert_eq!(ids(&table), vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn flush_and_clear() {
        let mut table = people();
        table.add_row(vec![Value::Int(3), Value::from("c")]).unwrap();
        table.flush();
        assert_eq!(table.capacity(), 3);
        table.clear().unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.capacity(), 2);
        assert_eq!(
            table.column(0).unwrap().get(0).unwrap(),
            Value::Int(0)
        );
    }

    #[test]
    fn name_map_follows_column_moves() {
        let mut table = people();
        table
            .insert_column(0, Column::from(vec![true, false]).with_name("flag"))
            .unwrap();
        assert_eq!(table.column_index("id").unwrap(), 1);
        assert_eq!(table.column_index("name").unwrap(), 2);

        let removed = table.remove_column("id").unwrap();
        assert_eq!(removed.name(), Some("id"));
        assert_eq!(table.column_index("name").unwrap(), 1);
        assert_eq!(
            table.column_index("id").unwrap_err(),
            FrameError::UnknownColumn("id".to_owned())
        );
    }

    #[test]
    fn set_column_inherits_name() {
        let mut table = people();
        table
            .set_column(0, Column::from(vec![7i64, 8]))
            .unwrap();
        let column = table.column("id").unwrap();
        assert_eq!(column.element_type(), ElementType::Long);
        assert_eq!(column.name(), Some("id"));
    }

    #[test]
    fn added_columns_start_with_clean_slack() {
        let mut table = Table::from_columns([Column::from(vec![1i32, 2, 3])]).unwrap();
        table.remove_row(2).unwrap();
        assert_eq!((table.row_count(), table.capacity()), (2, 3));

        table.add_column(Column::from(vec![7i64, 8, 9])).unwrap();
        assert_eq!(
            table.columns()[1].values(3).unwrap(),
            vec![Value::Long(7), Value::Long(8), Value::Long(0)]
        );

        table
            .set_column(1, Column::from(vec![Some(4i16), Some(5), Some(6)]))
            .unwrap();
        assert_eq!(table.columns()[1].get(2).unwrap(), Value::Null);

        table.remove_row(0).unwrap();
        assert_eq!(
            table.columns()[1].values(3).unwrap(),
            vec![Value::Short(5), Value::Null, Value::Null]
        );
    }

    #[test]
    fn remove_row_checks_the_index() {
        let mut table = Table::from_columns([Column::from(vec![1i32])]).unwrap();
        assert_eq!(
            table.remove_row(usize::MAX).unwrap_err(),
            FrameError::RowOutOfBounds {
                index: usize::MAX,
                rows: 1
            }
        );
        assert_eq!(
            table.remove_row(1).unwrap_err(),
            FrameError::RowOutOfBounds { index: 1, rows: 1 }
        );
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn unnamed_tables_reject_name_lookups() {
        let table = Table::from_columns([Column::from(vec![1i32])]).unwrap();
        assert_eq!(table.column_index("x").unwrap_err(), FrameError::NoColumnNames);
    }

    #[test]
    fn aliases_are_copied_on_entry() {
        let column = Column::from(vec![1i32, 2]);
        let table = Table::from_columns([column.share(), column.share()]).unwrap();
        assert!(!table.columns()[0].shares_storage_with(&table.columns()[1]));
    }

    #[test]
    fn sort_by_is_stable() {
        let mut table = Table::from_columns([
            Column::from(vec![Some(2i32), None, Some(1), Some(2)]).with_name("k"),
            Column::from(vec!["a", "b", "c", "d"]).with_name("v"),
        ])
        .unwrap();
        table.sort_by("k", false).unwrap();
        assert_eq!(
            table.column("v").unwrap().values(4).unwrap(),
            vec![
                Value::from("b"),
                Value::from("c"),
                Value::from("a"),
                Value::from("d")
            ]
        );
        table.sort_by("k", true).unwrap();
        assert_eq!(
            table.column("v").unwrap().values(4).unwrap(),
            vec![
                Value::from("a"),
                Value::from("d"),
                Value::from("c"),
                Value::from("b")
            ]
        );
    }

    #[test]
    fn display_renders_grid() {
        let table = people();
        assert_eq!(table.to_string(), "id | name\n---+-----\n1  | a\n2  | b\n");
    }
}
