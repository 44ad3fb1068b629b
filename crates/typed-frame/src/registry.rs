#![forbid(unsafe_code)]

use crate::column::Column;
use crate::error::{FrameError, FrameResult};
use crate::types::{ColumnType, TypeCode};
use std::collections::HashMap;

type Constructor = fn(ColumnType, usize) -> Column;

#[derive(Clone, Copy)]
struct Entry {
    column_type: ColumnType,
    construct: Constructor,
}

/// Lookup table from type codes (and type names) to column constructors.
///
/// Build it once with [`ColumnRegistry::standard`] and hand it to whatever materializes columns
/// generically, e.g. a decoder that reads `(name, type code, length)` headers.
#[derive(Clone)]
pub struct ColumnRegistry {
    by_code: HashMap<TypeCode, Entry>,
    by_name: HashMap<String, TypeCode>,
}

impl ColumnRegistry {
    /// Registry holding all 20 built-in column types under their codes and names.
    pub fn standard() -> Self {
        let mut registry = Self {
            by_code: HashMap::new(),
            by_name: HashMap::new(),
        };
        for column_type in ColumnType::all() {
            registry.by_code.insert(
                column_type.code(),
                Entry {
                    column_type,
                    construct: Column::new,
                },
            );
            registry.by_name.insert(column_type.name(), column_type.code());
        }
        registry
    }

    /// Registers an additional name for an existing type code.
    pub fn with_alias(mut self, alias: impl Into<String>, code: TypeCode) -> FrameResult<Self> {
        if !self.by_code.contains_key(&code) {
            return Err(FrameError::UnknownTypeCode(code));
        }
        self.by_name.insert(alias.into(), code);
        Ok(self)
    }

    pub fn column_type(&self, code: TypeCode) -> Option<ColumnType> {
        self.by_code.get(&code).map(|e| e.column_type)
    }

    /// Type code registered under `name` (case-insensitive).
    pub fn code_for_name(&self, name: &str) -> Option<TypeCode> {
        self.by_name.get(name).copied().or_else(|| {
            self.by_name
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, code)| *code)
        })
    }

    pub fn contains(&self, code: TypeCode) -> bool {
        self.by_code.contains_key(&code)
    }

    /// Column of `len` null/default slots of the type identified by `code`.
    pub fn create(&self, code: TypeCode, len: usize) -> FrameResult<Column> {
        let entry = self
            .by_code
            .get(&code)
            .ok_or(FrameError::UnknownTypeCode(code))?;
        Ok((entry.construct)(entry.column_type, len))
    }

    pub fn create_named(
        &self,
        name: impl Into<String>,
        code: TypeCode,
        len: usize,
    ) -> FrameResult<Column> {
        Ok(self.create(code, len)?.with_name(name))
    }
}

impl Default for ColumnRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
