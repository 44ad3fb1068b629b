#![forbid(unsafe_code)]

use crate::convert::convert_data;
use crate::data::ColumnData;
use crate::error::{FrameError, FrameResult};
use crate::types::{ColumnType, ElementType, TypeCode};
use crate::value::Value;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A single-type, array-backed column with an optional name.
///
/// The backing buffer is reference counted so that several tables can hold the very same storage
/// (see [`Column::share`] and [`crate::merge`]). Writes through any alias are visible through all
/// of them. `Clone` is always a deep copy; use it when an independent column is required.
///
/// The buffer length is the column's capacity. It may exceed the row count of the table that
/// owns the column; slots past the row count hold the type's null/default marker.
pub struct Column {
    name: Option<String>,
    data: Rc<RefCell<ColumnData>>,
}

impl Column {
    pub(crate) fn from_data(data: ColumnData) -> Self {
        Self {
            name: None,
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// Column of `len` null/default slots.
    pub fn new(column_type: ColumnType, len: usize) -> Self {
        Self::from_data(ColumnData::filled(column_type, len))
    }

    /// Column of `len` slots for a raw type code.
    pub fn of_code(code: TypeCode, len: usize) -> FrameResult<Self> {
        let column_type = ColumnType::from_code(code).ok_or(FrameError::UnknownTypeCode(code))?;
        Ok(Self::new(column_type, len))
    }

    /// Builds a column from dynamically typed values; every value must match `column_type`.
    pub fn from_values(
        column_type: ColumnType,
        values: impl IntoIterator<Item = Value>,
    ) -> FrameResult<Self> {
        let values: Vec<Value> = values.into_iter().collect();
        let mut data = ColumnData::filled(column_type, values.len());
        for (index, value) in values.into_iter().enumerate() {
            data.set(index, value)?;
        }
        Ok(Self::from_data(data))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Another handle onto the same backing buffer, carrying the same name.
    pub fn share(&self) -> Self {
        Self {
            name: self.name.clone(),
            data: Rc::clone(&self.data),
        }
    }

    pub fn shares_storage_with(&self, other: &Column) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn data(&self) -> Ref<'_, ColumnData> {
        self.data.borrow()
    }

    fn data_mut(&mut self) -> RefMut<'_, ColumnData> {
        self.data.borrow_mut()
    }

    /// Reorders slots `[0, rows.len())` to `rows`, keeping the capacity. Visible to every alias.
    pub(crate) fn permute(&mut self, rows: &[usize]) -> FrameResult<()> {
        let capacity = self.capacity();
        let mut data = self.data().select(rows)?;
        data.match_length(capacity);
        *self.data_mut() = data;
        Ok(())
    }

    pub fn column_type(&self) -> ColumnType {
        self.data().column_type()
    }

    pub fn element_type(&self) -> ElementType {
        self.column_type().element
    }

    pub fn type_code(&self) -> TypeCode {
        self.column_type().code()
    }

    pub fn type_name(&self) -> String {
        self.column_type().name()
    }

    pub fn is_nullable(&self) -> bool {
        self.column_type().nullable
    }

    pub fn is_numeric(&self) -> bool {
        self.column_type().is_numeric()
    }

    /// Value written into vacated slots: null for nullable columns, the element default
    /// otherwise.
    pub fn default_value(&self) -> Value {
        let column_type = self.column_type();
        if column_type.nullable {
            return Value::Null;
        }
        match column_type.element {
            ElementType::Byte => Value::Byte(0),
            ElementType::Short => Value::Short(0),
            ElementType::Int => Value::Int(0),
            ElementType::Long => Value::Long(0),
            ElementType::String => Value::String(String::new()),
            ElementType::Float => Value::Float(0.0),
            ElementType::Double => Value::Double(0.0),
            ElementType::Char => Value::Char('\0'),
            ElementType::Boolean => Value::Boolean(false),
            ElementType::Binary => Value::Binary(Vec::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.data().capacity()
    }

    pub fn get(&self, index: usize) -> FrameResult<Value> {
        self.data().get(index)
    }

    pub fn set(&mut self, index: usize, value: Value) -> FrameResult<()> {
        self.data_mut().set(index, value)
    }

    /// Fails with [`FrameError::TypeMismatch`] unless `value` can be stored in this column.
    pub fn check_value(&self, value: &Value) -> FrameResult<()> {
        self.data().check_value(value)
    }

    /// Text form of slot `index` as seen by regex searches (`null` for absent values).
    pub fn to_text(&self, index: usize) -> FrameResult<String> {
        Ok(self.get(index)?.to_string())
    }

    /// Values of slots `[0, len)`.
    pub fn values(&self, len: usize) -> FrameResult<Vec<Value>> {
        self.data().values(len)
    }

    /// Shifts `[index, next)` right by one slot and writes `value` at `index`.
    ///
    /// `next` is the caller's logical row count; the slot at `next` must exist.
    pub fn insert_at(&mut self, index: usize, next: usize, value: Value) -> FrameResult<()> {
        self.data_mut().insert_at(index, next, value)
    }

    /// Removes `[from, to)` by shifting `[to, next)` left and null-filling the freed tail.
    pub fn remove(&mut self, from: usize, to: usize, next: usize) -> FrameResult<()> {
        self.data_mut().remove(from, to, next)
    }

    /// Doubles the capacity (at least 2 slots).
    pub fn resize(&mut self) {
        self.data_mut().resize();
    }

    /// Reallocates to exactly `len` slots.
    pub fn match_length(&mut self, len: usize) {
        self.data_mut().match_length(len);
    }

    /// Writes the default value into every slot from `start` on.
    pub(crate) fn clear_from(&mut self, start: usize) {
        self.data_mut().clear_from(start);
    }

    /// New, unshared column made of the slots at `rows`; keeps the name.
    pub fn select(&self, rows: &[usize]) -> FrameResult<Column> {
        let data = self.data().select(rows)?;
        Ok(Column {
            name: self.name.clone(),
            data: Rc::new(RefCell::new(data)),
        })
    }

    /// Converts every slot to the type identified by `code`.
    pub fn convert_to(&self, code: TypeCode) -> FrameResult<Column> {
        let target = ColumnType::from_code(code).ok_or(FrameError::UnknownTypeCode(code))?;
        self.convert_to_type(target)
    }

    pub fn convert_to_type(&self, target: ColumnType) -> FrameResult<Column> {
        let data = convert_data(&self.data(), target)?;
        log::debug!(
            "converted column {:?} from {} to {target} ({} slots)",
            self.name,
            self.column_type(),
            data.capacity()
        );
        Ok(Column {
            name: self.name.clone(),
            data: Rc::new(RefCell::new(data)),
        })
    }

    /// Minimum of the numeric values in `[0, len)`, ignoring nulls.
    pub fn minimum(&self, len: usize) -> FrameResult<Option<Value>> {
        Ok(self.numeric_values(len)?.into_iter().min_by(Value::total_cmp))
    }

    pub fn maximum(&self, len: usize) -> FrameResult<Option<Value>> {
        Ok(self.numeric_values(len)?.into_iter().max_by(Value::total_cmp))
    }

    /// Sum of `[0, len)` as `f64`, ignoring nulls; `None` for non-numeric columns.
    pub fn sum(&self, len: usize) -> FrameResult<Option<f64>> {
        if !self.is_numeric() {
            return Ok(None);
        }
        let values = self.numeric_values(len)?;
        Ok(Some(values.iter().filter_map(Value::as_f64).sum()))
    }

    pub fn average(&self, len: usize) -> FrameResult<Option<f64>> {
        let values = self.numeric_values(len)?;
        if values.is_empty() {
            return Ok(None);
        }
        let sum: f64 = values.iter().filter_map(Value::as_f64).sum();
        Ok(Some(sum / values.len() as f64))
    }

    fn numeric_values(&self, len: usize) -> FrameResult<Vec<Value>> {
        if !self.is_numeric() {
            return Ok(Vec::new());
        }
        let mut values = self.values(len)?;
        values.retain(|v| !v.is_null());
        Ok(values)
    }
}

impl Clone for Column {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            data: Rc::new(RefCell::new(self.data().clone())),
        }
    }
}

/// Equality covers the name and every slot of the buffer, slack included: two columns with the
/// same logical values but different capacities are not equal.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && *self.data() == *other.data()
    }
}

impl Eq for Column {}

impl Hash for Column {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.data().hash(state);
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("type", &self.column_type())
            .field("capacity", &self.capacity())
            .finish()
    }
}

macro_rules! impl_column_from_vec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for Column {
                fn from(values: Vec<$ty>) -> Self {
                    Column::from_data(ColumnData::from(values))
                }
            }

            impl From<Vec<Option<$ty>>> for Column {
                fn from(values: Vec<Option<$ty>>) -> Self {
                    Column::from_data(ColumnData::from(values))
                }
            }
        )*
    };
}

impl_column_from_vec!(i8, i16, i32, i64, String, f32, f64, char, bool, Vec<u8>);

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::from(values.into_iter().map(str::to_owned).collect::<Vec<String>>())
    }
}

impl From<Vec<Option<&str>>> for Column {
    fn from(values: Vec<Option<&str>>) -> Self {
        Column::from(
            values
                .into_iter()
                .map(|v| v.map(str::to_owned))
                .collect::<Vec<Option<String>>>(),
        )
    }
}
