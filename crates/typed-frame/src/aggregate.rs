#![forbid(unsafe_code)]

use crate::column::Column;
use crate::error::FrameResult;
use crate::table::{ColumnKey, Table};
use crate::types::{ColumnType, ElementType};
use crate::value::Value;
use std::collections::HashMap;

/// Aggregate computed per group by [`Table::group_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Minimum,
    Maximum,
    Average,
    Sum,
}

impl Aggregate {
    /// Element type of the aggregate over a numeric `source` column.
    fn output_type(self, source: ElementType) -> ElementType {
        match self {
            Aggregate::Minimum | Aggregate::Maximum => source,
            Aggregate::Average => ElementType::Double,
            Aggregate::Sum if source.is_integral() => ElementType::Long,
            Aggregate::Sum => ElementType::Double,
        }
    }

    /// Aggregates the non-null `values` of one group; `Value::Null` when there are none.
    fn apply(self, values: &[Value], source: ElementType) -> Value {
        let present: Vec<&Value> = values.iter().filter(|v| !v.is_null()).collect();
        if present.is_empty() {
            return Value::Null;
        }
        match self {
            Aggregate::Minimum => present
                .into_iter()
                .min_by(|a, b| a.total_cmp(b))
                .cloned()
                .unwrap_or(Value::Null),
            Aggregate::Maximum => present
                .into_iter()
                .max_by(|a, b| a.total_cmp(b))
                .cloned()
                .unwrap_or(Value::Null),
            // Wraps on overflow.
            Aggregate::Sum if source.is_integral() => Value::Long(
                present
                    .iter()
                    .filter_map(|v| v.as_i64())
                    .fold(0i64, i64::wrapping_add),
            ),
            Aggregate::Sum => Value::Double(present.iter().filter_map(|v| v.as_f64()).sum()),
            Aggregate::Average => {
                let sum: f64 = present.iter().filter_map(|v| v.as_f64()).sum();
                Value::Double(sum / present.len() as f64)
            }
        }
    }
}

struct Groups {
    /// First row of every group, in first-seen order.
    firsts: Vec<usize>,
    /// Member rows of every group.
    members: Vec<Vec<usize>>,
}

fn partition(keys: &[Value]) -> Groups {
    let mut ids: HashMap<&Value, usize> = HashMap::new();
    let mut groups = Groups {
        firsts: Vec::new(),
        members: Vec::new(),
    };
    for (row, key) in keys.iter().enumerate() {
        let id = *ids.entry(key).or_insert_with(|| {
            groups.firsts.push(row);
            groups.members.push(Vec::new());
            groups.firsts.len() - 1
        });
        groups.members[id].push(row);
    }
    groups
}

impl Table {
    /// One row per distinct value of `key` plus `op` over every other numeric column.
    ///
    /// Groups appear in first-seen order and null keys form a group of their own. Non-numeric
    /// columns other than the key are dropped. Aggregate columns keep their names and are
    /// nullable; a group without any non-null input yields null.
    pub fn group_by(&self, key: impl ColumnKey, op: Aggregate) -> FrameResult<Table> {
        let key_index = key.resolve(self)?;
        let rows = self.row_count();
        let keys = self.columns()[key_index].values(rows)?;
        let groups = partition(&keys);

        let mut columns = vec![self.columns()[key_index].select(&groups.firsts)?];
        for (index, column) in self.columns().iter().enumerate() {
            if index == key_index || !column.is_numeric() {
                continue;
            }
            let source = column.element_type();
            let values = column.values(rows)?;
            let aggregated = groups.members.iter().map(|members| {
                let group: Vec<Value> = members.iter().map(|&r| values[r].clone()).collect();
                op.apply(&group, source)
            });
            let mut out =
                Column::from_values(ColumnType::nullable(op.output_type(source)), aggregated)?;
            out.set_name(column.name().map(str::to_owned));
            columns.push(out);
        }

        log::debug!(
            "group_by {op:?} over column {key_index}: {rows} rows into {} groups",
            groups.firsts.len()
        );
        Ok(Table::from_columns(columns)?.with_options(self.options()))
    }
}
