#![forbid(unsafe_code)]

//! Mapping between typed row structs and table rows.
//!
//! A [`Record`] names its fields once; a [`RowBinding`] resolves those names to column
//! positions of a particular table and then moves whole rows in and out of it. Field values must
//! already have the element type of their column.

use crate::error::{FrameError, FrameResult};
use crate::table::Table;
use crate::value::Value;

/// A struct that can be stored as one table row.
pub trait Record: Sized {
    /// Column names, in the order of [`Record::to_row`] and [`Record::from_row`].
    const FIELDS: &'static [&'static str];

    fn to_row(&self) -> Vec<Value>;

    /// Builds a record from the values of [`Record::FIELDS`], in that order.
    fn from_row(values: Vec<Value>) -> FrameResult<Self>;
}

/// Field-to-column mapping for one record type against one table layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBinding {
    columns: Vec<usize>,
}

impl RowBinding {
    /// Resolves every field of `R` by column name.
    pub fn new<R: Record>(table: &Table) -> FrameResult<Self> {
        let columns = R::FIELDS
            .iter()
            .map(|field| table.column_index(field))
            .collect::<FrameResult<Vec<_>>>()?;
        Ok(Self { columns })
    }

    /// Column position of each field, in field order.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    fn check_len(&self, values: &[Value]) -> FrameResult<()> {
        if values.len() == self.columns.len() {
            Ok(())
        } else {
            Err(FrameError::RowLength {
                expected: self.columns.len(),
                actual: values.len(),
            })
        }
    }

    /// Slot of bound column `column` in a row of `values`; fails once the table lost that column.
    fn field<'a>(values: &'a mut [Value], column: usize) -> FrameResult<&'a mut Value> {
        let columns = values.len();
        values.get_mut(column).ok_or(FrameError::ColumnOutOfBounds {
            index: column,
            columns,
        })
    }

    pub fn read<R: Record>(&self, table: &Table, row: usize) -> FrameResult<R> {
        let mut values = table.get_row(row)?;
        let fields = self
            .columns
            .iter()
            .map(|&c| Self::field(&mut values, c).map(std::mem::take))
            .collect::<FrameResult<Vec<_>>>()?;
        R::from_row(fields)
    }

    /// Overwrites the bound columns of `row`; other columns keep their values.
    pub fn write<R: Record>(&self, table: &mut Table, row: usize, record: &R) -> FrameResult<()> {
        let fields = record.to_row();
        self.check_len(&fields)?;
        let mut values = table.get_row(row)?;
        for (&c, value) in self.columns.iter().zip(fields) {
            *Self::field(&mut values, c)? = value;
        }
        table.set_row(row, values)
    }

    /// Appends `record` as a new row; unbound columns get their null/default value.
    pub fn append<R: Record>(&self, table: &mut Table, record: &R) -> FrameResult<()> {
        let fields = record.to_row();
        self.check_len(&fields)?;
        let mut values: Vec<Value> = table.columns().iter().map(|c| c.default_value()).collect();
        for (&c, value) in self.columns.iter().zip(fields) {
            *Self::field(&mut values, c)? = value;
        }
        table.add_row(values)
    }
}

impl Table {
    /// Appends `record`, binding its fields by column name.
    pub fn add_record<R: Record>(&mut self, record: &R) -> FrameResult<()> {
        RowBinding::new::<R>(self)?.append(self, record)
    }

    /// Reads row `row` as a record, binding its fields by column name.
    pub fn record<R: Record>(&self, row: usize) -> FrameResult<R> {
        RowBinding::new::<R>(self)?.read(self, row)
    }
}
