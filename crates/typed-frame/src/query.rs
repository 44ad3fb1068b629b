#![forbid(unsafe_code)]

//! Regex-driven row search over a single column.
//!
//! Every cell is rendered to text (see [`crate::Column::to_text`]) and must match the pattern as
//! a whole: `"1"` matches `1` but not `10`. Null cells render as the literal text `null`.

use crate::bitmap::BitVec;
use crate::error::FrameResult;
use crate::table::{ColumnKey, Table};
use crate::value::Value;
use regex::Regex;
use std::collections::HashSet;

/// Compiles `pattern` anchored at both ends.
fn full_match(pattern: &str) -> FrameResult<Regex> {
    Ok(Regex::new(&format!("^(?:{pattern})$"))?)
}

impl Table {
    /// Match mask over the logical rows of column `index`.
    fn match_mask(&self, index: usize, regex: &Regex) -> FrameResult<BitVec> {
        let values = self.columns()[index].values(self.row_count())?;
        Ok(values
            .iter()
            .map(|value| regex.is_match(&value.to_string()))
            .collect())
    }

    fn mask(&self, key: impl ColumnKey, pattern: &str) -> FrameResult<BitVec> {
        let index = key.resolve(self)?;
        let regex = full_match(pattern)?;
        self.match_mask(index, &regex)
    }

    /// First row whose cell fully matches `pattern`.
    pub fn index_of(&self, key: impl ColumnKey, pattern: &str) -> FrameResult<Option<usize>> {
        self.index_of_from(key, pattern, 0)
    }

    /// First row at or after `start` whose cell fully matches `pattern`.
    pub fn index_of_from(
        &self,
        key: impl ColumnKey,
        pattern: &str,
        start: usize,
    ) -> FrameResult<Option<usize>> {
        let index = key.resolve(self)?;
        let regex = full_match(pattern)?;
        let column = &self.columns()[index];
        for row in start..self.row_count() {
            if regex.is_match(&column.to_text(row)?) {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    /// All matching rows, ascending.
    pub fn index_of_all(&self, key: impl ColumnKey, pattern: &str) -> FrameResult<Vec<usize>> {
        Ok(self.mask(key, pattern)?.iter_ones().collect())
    }

    pub fn count(&self, key: impl ColumnKey, pattern: &str) -> FrameResult<usize> {
        Ok(self.mask(key, pattern)?.count_ones())
    }

    /// New table with deep copies of the matching rows, in their original order.
    pub fn filter(&self, key: impl ColumnKey, pattern: &str) -> FrameResult<Table> {
        let rows = self.index_of_all(key, pattern)?;
        self.select_rows(&rows)
    }

    /// Keeps only the matching rows. Returns the number of rows removed.
    pub fn include(&mut self, key: impl ColumnKey, pattern: &str) -> FrameResult<usize> {
        self.retain_matching(key, pattern, true)
    }

    /// Removes the matching rows. Returns the number of rows removed.
    pub fn exclude(&mut self, key: impl ColumnKey, pattern: &str) -> FrameResult<usize> {
        self.retain_matching(key, pattern, false)
    }

    fn retain_matching(
        &mut self,
        key: impl ColumnKey,
        pattern: &str,
        keep_matches: bool,
    ) -> FrameResult<usize> {
        let mask = self.mask(key, pattern)?;
        let doomed = mask.runs(!keep_matches);
        let mut removed = 0;
        // Back to front so earlier runs keep their positions.
        for &(from, to) in doomed.iter().rev() {
            self.remove_rows(from, to)?;
            removed += to - from;
        }
        Ok(removed)
    }

    /// Overwrites every matching cell with `value`. Returns the number of cells written.
    pub fn replace_with_value(
        &mut self,
        key: impl ColumnKey,
        pattern: &str,
        value: Value,
    ) -> FrameResult<usize> {
        self.replace_with_indexed(key, pattern, |_, _| value.clone())
    }

    /// Overwrites every matching cell with `replacer(old)`.
    pub fn replace_with<F>(
        &mut self,
        key: impl ColumnKey,
        pattern: &str,
        mut replacer: F,
    ) -> FrameResult<usize>
    where
        F: FnMut(Value) -> Value,
    {
        self.replace_with_indexed(key, pattern, |_, old| replacer(old))
    }

    /// Overwrites every matching cell with `replacer(row, old)`.
    ///
    /// All replacements are computed and type-checked before the first one is written.
    pub fn replace_with_indexed<F>(
        &mut self,
        key: impl ColumnKey,
        pattern: &str,
        mut replacer: F,
    ) -> FrameResult<usize>
    where
        F: FnMut(usize, Value) -> Value,
    {
        let index = key.resolve(self)?;
        let regex = full_match(pattern)?;
        let mask = self.match_mask(index, &regex)?;

        let column = &self.columns()[index];
        let mut writes = Vec::with_capacity(mask.count_ones());
        for row in mask.iter_ones() {
            let value = replacer(row, column.get(row)?);
            column.check_value(&value)?;
            writes.push((row, value));
        }

        let written = writes.len();
        for (row, value) in writes {
            self.set(index, row, value)?;
        }
        Ok(written)
    }

    /// Distinct non-null values of a column in first-seen order.
    pub fn unique(&self, key: impl ColumnKey) -> FrameResult<Vec<Value>> {
        let index = key.resolve(self)?;
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for value in self.columns()[index].values(self.row_count())? {
            if !value.is_null() && seen.insert(value.clone()) {
                out.push(value);
            }
        }
        Ok(out)
    }
}
