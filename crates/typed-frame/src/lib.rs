//! In-memory, strongly typed columnar tables.
//!
//! This crate focuses on:
//! - Array-backed columns for ten element types, each in a non-nullable and a nullable variant,
//!   identified by stable integer type codes.
//! - Row and column mutation that keeps every column of a table at the same capacity.
//! - Regex search, filtering, replacement, grouping, equi-joins and column-wise merges.
//!
//! Tables are single-threaded: columns may share their buffers with other tables (see
//! [`merge`]), which is modelled with `Rc<RefCell<_>>`.

#![forbid(unsafe_code)]

mod aggregate;
mod bitmap;
mod column;
mod convert;
mod data;
mod error;
mod join;
mod merge;
mod query;
mod record;
mod registry;
mod schema;
mod table;
mod types;
mod value;

pub use crate::aggregate::Aggregate;
pub use crate::column::Column;
pub use crate::error::{FrameError, FrameResult};
pub use crate::join::{hash_join_indices, join, JoinIndices};
pub use crate::merge::merge;
pub use crate::record::{Record, RowBinding};
pub use crate::registry::ColumnRegistry;
pub use crate::schema::ColumnInfo;
pub use crate::table::{ColumnKey, Table, TableOptions};
pub use crate::types::{ColumnType, ElementType, TypeCode};
pub use crate::value::Value;
