#![forbid(unsafe_code)]

use crate::error::{FrameError, FrameResult};
use crate::types::{ColumnType, ElementType};
use crate::value::Value;
use std::hash::{Hash, Hasher};

/// One backing slot of a column buffer.
///
/// Implemented for the ten element types (non-nullable slots) and for `Option<T>` of those
/// (nullable slots, where `None` is the absent marker).
pub(crate) trait Slot: Clone {
    /// Marker written into vacated or freshly allocated slots.
    fn null() -> Self;
    fn to_value(&self) -> Value;
    /// Unwraps a value of exactly this slot's type, handing the value back on mismatch.
    fn from_value(value: Value) -> Result<Self, Value>;
    fn slot_eq(&self, other: &Self) -> bool;
    fn slot_hash<H: Hasher>(&self, state: &mut H);
}

macro_rules! impl_slot {
    ($($ty:ty => $variant:ident, $default:expr);* $(;)?) => {
        $(
            impl Slot for $ty {
                fn null() -> Self {
                    $default
                }

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }

                fn slot_eq(&self, other: &Self) -> bool {
                    self == other
                }

                fn slot_hash<H: Hasher>(&self, state: &mut H) {
                    self.hash(state)
                }
            }
        )*
    };
}

impl_slot!(
    i8 => Byte, 0;
    i16 => Short, 0;
    i32 => Int, 0;
    i64 => Long, 0;
    String => String, String::new();
    char => Char, '\0';
    bool => Boolean, false;
    Vec<u8> => Binary, Vec::new();
);

macro_rules! impl_float_slot {
    ($($ty:ty => $variant:ident);* $(;)?) => {
        $(
            impl Slot for $ty {
                fn null() -> Self {
                    0.0
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }

                fn slot_eq(&self, other: &Self) -> bool {
                    self.to_bits() == other.to_bits()
                }

                fn slot_hash<H: Hasher>(&self, state: &mut H) {
                    self.to_bits().hash(state)
                }
            }
        )*
    };
}

impl_float_slot!(f32 => Float; f64 => Double);

impl<T: Slot> Slot for Option<T> {
    fn null() -> Self {
        None
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn slot_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.slot_eq(b),
            (None, None) => true,
            _ => false,
        }
    }

    fn slot_hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Some(v) => {
                1u8.hash(state);
                v.slot_hash(state);
            }
            None => 0u8.hash(state),
        }
    }
}

/// Typed backing buffer of a column: one variant per (element type, nullability).
///
/// The buffer length is the column capacity; callers track the logical row count.
#[derive(Clone, Debug)]
pub(crate) enum ColumnData {
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    String(Vec<String>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Char(Vec<char>),
    Boolean(Vec<bool>),
    Binary(Vec<Vec<u8>>),
    NullableByte(Vec<Option<i8>>),
    NullableShort(Vec<Option<i16>>),
    NullableInt(Vec<Option<i32>>),
    NullableLong(Vec<Option<i64>>),
    NullableString(Vec<Option<String>>),
    NullableFloat(Vec<Option<f32>>),
    NullableDouble(Vec<Option<f64>>),
    NullableChar(Vec<Option<char>>),
    NullableBoolean(Vec<Option<bool>>),
    NullableBinary(Vec<Option<Vec<u8>>>),
}

/// Runs `$body` with `$buf` bound to the variant's `Vec` (by reference when `$data` is a
/// reference).
macro_rules! with_slots {
    ($data:expr, $buf:ident => $body:expr) => {
        match $data {
            ColumnData::Byte($buf) => $body,
            ColumnData::Short($buf) => $body,
            ColumnData::Int($buf) => $body,
            ColumnData::Long($buf) => $body,
            ColumnData::String($buf) => $body,
            ColumnData::Float($buf) => $body,
            ColumnData::Double($buf) => $body,
            ColumnData::Char($buf) => $body,
            ColumnData::Boolean($buf) => $body,
            ColumnData::Binary($buf) => $body,
            ColumnData::NullableByte($buf) => $body,
            ColumnData::NullableShort($buf) => $body,
            ColumnData::NullableInt($buf) => $body,
            ColumnData::NullableLong($buf) => $body,
            ColumnData::NullableString($buf) => $body,
            ColumnData::NullableFloat($buf) => $body,
            ColumnData::NullableDouble($buf) => $body,
            ColumnData::NullableChar($buf) => $body,
            ColumnData::NullableBoolean($buf) => $body,
            ColumnData::NullableBinary($buf) => $body,
        }
    };
}

/// Like [`with_slots!`], but wraps the `Vec` produced by `$body` back into the same variant.
macro_rules! map_slots {
    ($data:expr, $buf:ident => $body:expr) => {
        match $data {
            ColumnData::Byte($buf) => ColumnData::Byte($body),
            ColumnData::Short($buf) => ColumnData::Short($body),
            ColumnData::Int($buf) => ColumnData::Int($body),
            ColumnData::Long($buf) => ColumnData::Long($body),
            ColumnData::String($buf) => ColumnData::String($body),
            ColumnData::Float($buf) => ColumnData::Float($body),
            ColumnData::Double($buf) => ColumnData::Double($body),
            ColumnData::Char($buf) => ColumnData::Char($body),
            ColumnData::Boolean($buf) => ColumnData::Boolean($body),
            ColumnData::Binary($buf) => ColumnData::Binary($body),
            ColumnData::NullableByte($buf) => ColumnData::NullableByte($body),
            ColumnData::NullableShort($buf) => ColumnData::NullableShort($body),
            ColumnData::NullableInt($buf) => ColumnData::NullableInt($body),
            ColumnData::NullableLong($buf) => ColumnData::NullableLong($body),
            ColumnData::NullableString($buf) => ColumnData::NullableString($body),
            ColumnData::NullableFloat($buf) => ColumnData::NullableFloat($body),
            ColumnData::NullableDouble($buf) => ColumnData::NullableDouble($body),
            ColumnData::NullableChar($buf) => ColumnData::NullableChar($body),
            ColumnData::NullableBoolean($buf) => ColumnData::NullableBoolean($body),
            ColumnData::NullableBinary($buf) => ColumnData::NullableBinary($body),
        }
    };
}

fn nulls<T: Slot>(len: usize) -> Vec<T> {
    vec![T::null(); len]
}

fn slot_at<T: Slot>(buf: &[T], index: usize) -> FrameResult<&T> {
    buf.get(index).ok_or(FrameError::SlotOutOfBounds {
        index,
        capacity: buf.len(),
    })
}

fn store<T: Slot>(buf: &mut [T], index: usize, value: Value, ty: ColumnType) -> FrameResult<()> {
    buf[index] = T::from_value(value).map_err(|v| FrameError::TypeMismatch {
        expected: ty,
        found: v.type_name().to_owned(),
    })?;
    Ok(())
}

fn filler_of<T: Slot>(_buf: &[T]) -> Value {
    T::null().to_value()
}

fn gather<T: Slot>(buf: &[T], rows: &[usize]) -> FrameResult<Vec<T>> {
    rows.iter()
        .map(|&row| slot_at(buf, row).cloned())
        .collect()
}

impl ColumnData {
    /// Buffer of `len` null/default slots for `ty`.
    pub fn filled(ty: ColumnType, len: usize) -> Self {
        match (ty.element, ty.nullable) {
            (ElementType::Byte, false) => ColumnData::Byte(nulls(len)),
            (ElementType::Short, false) => ColumnData::Short(nulls(len)),
            (ElementType::Int, false) => ColumnData::Int(nulls(len)),
            (ElementType::Long, false) => ColumnData::Long(nulls(len)),
            (ElementType::String, false) => ColumnData::String(nulls(len)),
            (ElementType::Float, false) => ColumnData::Float(nulls(len)),
            (ElementType::Double, false) => ColumnData::Double(nulls(len)),
            (ElementType::Char, false) => ColumnData::Char(nulls(len)),
            (ElementType::Boolean, false) => ColumnData::Boolean(nulls(len)),
            (ElementType::Binary, false) => ColumnData::Binary(nulls(len)),
            (ElementType::Byte, true) => ColumnData::NullableByte(nulls(len)),
            (ElementType::Short, true) => ColumnData::NullableShort(nulls(len)),
            (ElementType::Int, true) => ColumnData::NullableInt(nulls(len)),
            (ElementType::Long, true) => ColumnData::NullableLong(nulls(len)),
            (ElementType::String, true) => ColumnData::NullableString(nulls(len)),
            (ElementType::Float, true) => ColumnData::NullableFloat(nulls(len)),
            (ElementType::Double, true) => ColumnData::NullableDouble(nulls(len)),
            (ElementType::Char, true) => ColumnData::NullableChar(nulls(len)),
            (ElementType::Boolean, true) => ColumnData::NullableBoolean(nulls(len)),
            (ElementType::Binary, true) => ColumnData::NullableBinary(nulls(len)),
        }
    }

    pub fn column_type(&self) -> ColumnType {
        let (element, nullable) = match self {
            ColumnData::Byte(_) => (ElementType::Byte, false),
            ColumnData::Short(_) => (ElementType::Short, false),
            ColumnData::Int(_) => (ElementType::Int, false),
            ColumnData::Long(_) => (ElementType::Long, false),
            ColumnData::String(_) => (ElementType::String, false),
            ColumnData::Float(_) => (ElementType::Float, false),
            ColumnData::Double(_) => (ElementType::Double, false),
            ColumnData::Char(_) => (ElementType::Char, false),
            ColumnData::Boolean(_) => (ElementType::Boolean, false),
            ColumnData::Binary(_) => (ElementType::Binary, false),
            ColumnData::NullableByte(_) => (ElementType::Byte, true),
            ColumnData::NullableShort(_) => (ElementType::Short, true),
            ColumnData::NullableInt(_) => (ElementType::Int, true),
            ColumnData::NullableLong(_) => (ElementType::Long, true),
            ColumnData::NullableString(_) => (ElementType::String, true),
            ColumnData::NullableFloat(_) => (ElementType::Float, true),
            ColumnData::NullableDouble(_) => (ElementType::Double, true),
            ColumnData::NullableChar(_) => (ElementType::Char, true),
            ColumnData::NullableBoolean(_) => (ElementType::Boolean, true),
            ColumnData::NullableBinary(_) => (ElementType::Binary, true),
        };
        ColumnType::new(element, nullable)
    }

    pub fn capacity(&self) -> usize {
        with_slots!(self, buf => buf.len())
    }

    pub fn get(&self, index: usize) -> FrameResult<Value> {
        with_slots!(self, buf => slot_at(buf, index).map(Slot::to_value))
    }

    /// Checks whether `value` could be stored without touching the buffer.
    pub fn check_value(&self, value: &Value) -> FrameResult<()> {
        let ty = self.column_type();
        let ok = match value.element_type() {
            None => ty.nullable,
            Some(element) => element == ty.element,
        };
        if ok {
            Ok(())
        } else {
            Err(FrameError::TypeMismatch {
                expected: ty,
                found: value.type_name().to_owned(),
            })
        }
    }

    pub fn set(&mut self, index: usize, value: Value) -> FrameResult<()> {
        let capacity = self.capacity();
        if index >= capacity {
            return Err(FrameError::SlotOutOfBounds { index, capacity });
        }
        self.check_value(&value)?;
        let ty = self.column_type();
        with_slots!(self, buf => store(buf, index, value, ty))
    }

    /// Shifts `[index, next)` one slot to the right and writes `value` at `index`.
    pub fn insert_at(&mut self, index: usize, next: usize, value: Value) -> FrameResult<()> {
        let capacity = self.capacity();
        if next >= capacity {
            return Err(FrameError::SlotOutOfBounds {
                index: next,
                capacity,
            });
        }
        if index > next {
            return Err(FrameError::InvalidRange {
                from: index,
                to: next,
                rows: next,
            });
        }
        self.check_value(&value)?;
        let ty = self.column_type();
        with_slots!(self, buf => {
            buf[index..=next].rotate_right(1);
            store(buf, index, value, ty)
        })
    }

    /// Closes the gap `[from, to)` by shifting `[to, next)` left and null-fills the vacated tail.
    pub fn remove(&mut self, from: usize, to: usize, next: usize) -> FrameResult<()> {
        let capacity = self.capacity();
        if next > capacity {
            return Err(FrameError::SlotOutOfBounds {
                index: next,
                capacity,
            });
        }
        if from > to || to > next {
            return Err(FrameError::InvalidRange {
                from,
                to,
                rows: next,
            });
        }
        let gap = to - from;
        with_slots!(self, buf => {
            buf[from..next].rotate_left(gap);
            for slot in &mut buf[next - gap..next] {
                *slot = Slot::null();
            }
        });
        Ok(())
    }

    /// Grows the buffer to `max(2, capacity * 2)`.
    pub fn resize(&mut self) {
        let target = (self.capacity() * 2).max(2);
        with_slots!(self, buf => buf.resize(target, Slot::null()));
    }

    /// Reallocates the buffer to exactly `len` slots, truncating or null-filling.
    pub fn match_length(&mut self, len: usize) {
        with_slots!(self, buf => {
            buf.resize(len, Slot::null());
            buf.shrink_to_fit();
        });
    }

    /// Null-fills every slot from `start` to the end of the buffer.
    pub fn clear_from(&mut self, start: usize) {
        with_slots!(self, buf => {
            let start = start.min(buf.len());
            for slot in &mut buf[start..] {
                *slot = Slot::null();
            }
        });
    }

    /// Value a fresh slot of this buffer holds.
    pub fn filler(&self) -> Value {
        with_slots!(self, buf => filler_of(buf))
    }

    /// New buffer holding the slots at `rows`, in that order.
    pub fn select(&self, rows: &[usize]) -> FrameResult<ColumnData> {
        Ok(map_slots!(self, buf => gather(buf, rows)?))
    }

    /// Logical values `[0, len)`.
    pub fn values(&self, len: usize) -> FrameResult<Vec<Value>> {
        with_slots!(self, buf => {
            let end = len.min(buf.len());
            if end < len {
                return Err(FrameError::SlotOutOfBounds {
                    index: len - 1,
                    capacity: buf.len(),
                });
            }
            Ok(buf[..end].iter().map(Slot::to_value).collect())
        })
    }
}

impl PartialEq for ColumnData {
    fn eq(&self, other: &Self) -> bool {
        macro_rules! same_variant {
            ($($variant:ident),*) => {
                match (self, other) {
                    $(
                        (ColumnData::$variant(a), ColumnData::$variant(b)) => {
                            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.slot_eq(y))
                        }
                    )*
                    _ => false,
                }
            };
        }
        same_variant!(
            Byte, Short, Int, Long, String, Float, Double, Char, Boolean, Binary, NullableByte,
            NullableShort, NullableInt, NullableLong, NullableString, NullableFloat,
            NullableDouble, NullableChar, NullableBoolean, NullableBinary
        )
    }
}

impl Eq for ColumnData {}

impl Hash for ColumnData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.column_type().code().hash(state);
        with_slots!(self, buf => {
            buf.len().hash(state);
            for slot in buf.iter() {
                slot.slot_hash(state);
            }
        });
    }
}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident, $nullable:ident);* $(;)?) => {
        $(
            impl From<Vec<$ty>> for ColumnData {
                fn from(values: Vec<$ty>) -> Self {
                    ColumnData::$variant(values)
                }
            }

            impl From<Vec<Option<$ty>>> for ColumnData {
                fn from(values: Vec<Option<$ty>>) -> Self {
                    ColumnData::$nullable(values)
                }
            }
        )*
    };
}

impl_from_vec!(
    i8 => Byte, NullableByte;
    i16 => Short, NullableShort;
    i32 => Int, NullableInt;
    i64 => Long, NullableLong;
    String => String, NullableString;
    f32 => Float, NullableFloat;
    f64 => Double, NullableDouble;
    char => Char, NullableChar;
    bool => Boolean, NullableBoolean;
    Vec<u8> => Binary, NullableBinary;
);
