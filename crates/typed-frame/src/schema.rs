#![forbid(unsafe_code)]

use crate::table::Table;
use crate::types::TypeCode;
use serde::{Deserialize, Serialize};

/// What an external encoder needs to know about one column before reading its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: Option<String>,
    pub type_code: TypeCode,
    pub capacity: usize,
    pub row_count: usize,
}

impl Table {
    /// One [`ColumnInfo`] per column, in column order.
    pub fn describe(&self) -> Vec<ColumnInfo> {
        self.columns()
            .iter()
            .map(|column| ColumnInfo {
                name: column.name().map(str::to_owned),
                type_code: column.type_code(),
                capacity: column.capacity(),
                row_count: self.row_count(),
            })
            .collect()
    }
}
