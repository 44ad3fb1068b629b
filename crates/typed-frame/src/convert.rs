#![forbid(unsafe_code)]

//! Element conversion matrix used by [`crate::Column::convert_to`].
//!
//! Every (source, target) element pair has a fixed rule:
//! - numeric -> numeric is a plain `as` cast (wrapping/saturating, never range checked),
//! - anything -> binary uses the fixed-width big-endian layout of the source,
//! - binary -> anything is the inverse and requires exactly the target's width,
//! - string <-> binary goes through lowercase hex text,
//! - boolean parsing accepts a fixed vocabulary.

use crate::data::ColumnData;
use crate::error::{FrameError, FrameResult};
use crate::types::{ColumnType, ElementType};
use crate::value::Value;

/// Words accepted when parsing a boolean from text (compared case-insensitively).
const TRUE_WORDS: [&str; 5] = ["true", "t", "1", "yes", "y"];
const FALSE_WORDS: [&str; 5] = ["false", "f", "0", "no", "n"];
const ON: &str = "on";
const OFF: &str = "off";

/// Numeric payload of a value before it is narrowed to the target type.
#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(value: &Value) -> Option<Num> {
        match value {
            Value::Float(v) => Some(Num::Float(*v as f64)),
            Value::Double(v) => Some(Num::Float(*v)),
            other => other.as_i64().map(Num::Int),
        }
    }

    fn cast(self, target: ElementType) -> Option<Value> {
        Some(match (self, target) {
            (Num::Int(v), ElementType::Byte) => Value::Byte(v as i8),
            (Num::Int(v), ElementType::Short) => Value::Short(v as i16),
            (Num::Int(v), ElementType::Int) => Value::Int(v as i32),
            (Num::Int(v), ElementType::Long) => Value::Long(v),
            (Num::Int(v), ElementType::Float) => Value::Float(v as f32),
            (Num::Int(v), ElementType::Double) => Value::Double(v as f64),
            (Num::Float(v), ElementType::Byte) => Value::Byte(v as i8),
            (Num::Float(v), ElementType::Short) => Value::Short(v as i16),
            (Num::Float(v), ElementType::Int) => Value::Int(v as i32),
            (Num::Float(v), ElementType::Long) => Value::Long(v as i64),
            (Num::Float(v), ElementType::Float) => Value::Float(v as f32),
            (Num::Float(v), ElementType::Double) => Value::Double(v),
            _ => return None,
        })
    }

    fn is_zero(self) -> bool {
        match self {
            Num::Int(v) => v == 0,
            Num::Float(v) => v == 0.0,
        }
    }

    fn to_char(self) -> Option<char> {
        let code = match self {
            Num::Int(v) => v,
            Num::Float(v) => v as i64,
        };
        u32::try_from(code).ok().and_then(char::from_u32)
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text)) || text.eq_ignore_ascii_case(ON) {
        Some(true)
    } else if FALSE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text))
        || text.eq_ignore_ascii_case(OFF)
    {
        Some(false)
    } else {
        None
    }
}

fn char_to_bool(c: char) -> Option<bool> {
    match c.to_ascii_lowercase() {
        't' | '1' | 'y' => Some(true),
        'f' | '0' | 'n' => Some(false),
        _ => None,
    }
}

fn parse_number(text: &str, target: ElementType) -> Option<Value> {
    let text = text.trim();
    Some(match target {
        ElementType::Byte => Value::Byte(text.parse().ok()?),
        ElementType::Short => Value::Short(text.parse().ok()?),
        ElementType::Int => Value::Int(text.parse().ok()?),
        ElementType::Long => Value::Long(text.parse().ok()?),
        ElementType::Float => Value::Float(text.parse().ok()?),
        ElementType::Double => Value::Double(text.parse().ok()?),
        _ => return None,
    })
}

/// Canonical big-endian bytes of a non-null value.
fn to_bytes(value: &Value) -> Option<Vec<u8>> {
    Some(match value {
        Value::Byte(v) => v.to_be_bytes().to_vec(),
        Value::Short(v) => v.to_be_bytes().to_vec(),
        Value::Int(v) => v.to_be_bytes().to_vec(),
        Value::Long(v) => v.to_be_bytes().to_vec(),
        Value::Float(v) => v.to_bits().to_be_bytes().to_vec(),
        Value::Double(v) => v.to_bits().to_be_bytes().to_vec(),
        Value::Char(c) => vec![u8::try_from(*c).ok()?],
        Value::Boolean(b) => vec![u8::from(*b)],
        Value::String(s) => hex::decode(s).ok()?,
        Value::Binary(b) => b.clone(),
        Value::Null => return None,
    })
}

fn from_bytes(bytes: &[u8], target: ElementType) -> Option<Value> {
    Some(match target {
        ElementType::Byte => Value::Byte(i8::from_be_bytes(bytes.try_into().ok()?)),
        ElementType::Short => Value::Short(i16::from_be_bytes(bytes.try_into().ok()?)),
        ElementType::Int => Value::Int(i32::from_be_bytes(bytes.try_into().ok()?)),
        ElementType::Long => Value::Long(i64::from_be_bytes(bytes.try_into().ok()?)),
        ElementType::Float => Value::Float(f32::from_bits(u32::from_be_bytes(
            bytes.try_into().ok()?,
        ))),
        ElementType::Double => Value::Double(f64::from_bits(u64::from_be_bytes(
            bytes.try_into().ok()?,
        ))),
        ElementType::Char => match bytes {
            [b] => Value::Char(char::from(*b)),
            _ => return None,
        },
        ElementType::Boolean => match bytes {
            [b] => Value::Boolean(*b != 0),
            _ => return None,
        },
        ElementType::String => Value::String(hex::encode(bytes)),
        ElementType::Binary => Value::Binary(bytes.to_vec()),
    })
}

/// Maps one non-null value onto `target`, `None` when the value has no representation there.
pub(crate) fn convert_value(value: Value, target: ElementType) -> Option<Value> {
    if value.element_type() == Some(target) {
        return Some(value);
    }
    if target == ElementType::Binary {
        return to_bytes(&value).map(Value::Binary);
    }
    match value {
        Value::Null => None,
        Value::Binary(bytes) => from_bytes(&bytes, target),
        Value::String(text) => match target {
            ElementType::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Value::Char(c)),
                    _ => None,
                }
            }
            ElementType::Boolean => parse_bool(&text).map(Value::Boolean),
            numeric => parse_number(&text, numeric),
        },
        Value::Boolean(b) => match target {
            ElementType::String => Some(Value::String(b.to_string())),
            ElementType::Char => Some(Value::Char(if b { 't' } else { 'f' })),
            numeric => Num::Int(i64::from(b)).cast(numeric),
        },
        Value::Char(c) => match target {
            ElementType::String => Some(Value::String(c.to_string())),
            ElementType::Boolean => char_to_bool(c).map(Value::Boolean),
            numeric => Num::Int(i64::from(u32::from(c))).cast(numeric),
        },
        numeric => {
            let num = Num::of(&numeric)?;
            match target {
                ElementType::String => Some(Value::String(numeric.to_string())),
                ElementType::Char => num.to_char().map(Value::Char),
                ElementType::Boolean => Some(Value::Boolean(!num.is_zero())),
                other => num.cast(other),
            }
        }
    }
}

/// Converts a whole buffer, slot by slot, including slack slots.
///
/// Nulls stay null in a nullable target and become the element default otherwise. A slot still
/// holding the source's default filler (`""`, empty binary, ...) becomes the target default when
/// the filler itself has no representation in the target.
pub(crate) fn convert_data(source: &ColumnData, target: ColumnType) -> FrameResult<ColumnData> {
    let from = source.column_type();
    let capacity = source.capacity();
    let filler = source.filler();
    let mut out = ColumnData::filled(target, capacity);
    for (index, value) in source.values(capacity)?.into_iter().enumerate() {
        if value.is_null() {
            continue;
        }
        let is_filler = value == filler;
        let text = value.to_string();
        let Some(converted) = convert_value(value, target.element) else {
            if is_filler {
                continue;
            }
            return Err(FrameError::Conversion {
                from,
                to: target,
                value: text,
            });
        };
        out.set(index, converted)?;
    }
    Ok(out)
}
