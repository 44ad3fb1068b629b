#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type stored by a column, independent of nullability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Byte,
    Short,
    Int,
    Long,
    String,
    Float,
    Double,
    Char,
    Boolean,
    Binary,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        ElementType::Byte,
        ElementType::Short,
        ElementType::Int,
        ElementType::Long,
        ElementType::String,
        ElementType::Float,
        ElementType::Double,
        ElementType::Char,
        ElementType::Boolean,
        ElementType::Binary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementType::Byte => "byte",
            ElementType::Short => "short",
            ElementType::Int => "int",
            ElementType::Long => "long",
            ElementType::String => "string",
            ElementType::Float => "float",
            ElementType::Double => "double",
            ElementType::Char => "char",
            ElementType::Boolean => "boolean",
            ElementType::Binary => "binary",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ElementType::Byte
                | ElementType::Short
                | ElementType::Int
                | ElementType::Long
                | ElementType::Float
                | ElementType::Double
        )
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            ElementType::Byte | ElementType::Short | ElementType::Int | ElementType::Long
        )
    }

    /// Code of the non-nullable variant.
    fn base_code(self) -> u8 {
        match self {
            ElementType::Byte => 1,
            ElementType::Short => 2,
            ElementType::Int => 3,
            ElementType::Long => 4,
            ElementType::String => 5,
            ElementType::Float => 6,
            ElementType::Double => 7,
            ElementType::Char => 8,
            ElementType::Boolean => 9,
            ElementType::Binary => 19,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Distance between a non-nullable code and its nullable counterpart.
const NULLABLE_OFFSET: u8 = 9;
/// Binary was assigned its codes after the other types, so its nullable code sits right next to
/// the non-nullable one instead of following [`NULLABLE_OFFSET`].
const NULLABLE_BINARY_OFFSET: u8 = 1;

/// Integer identifier of a column's (element type, nullability) pair.
///
/// The numbering is an external contract shared with serializers: codes 1..=9 are the
/// non-nullable byte..boolean types, 10..=18 their nullable variants, and 19/20 are
/// binary/nullable binary. A `TypeCode` may hold a value outside that table; resolving it
/// through [`ColumnType::from_code`] is what validates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCode(u8);

impl TypeCode {
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for TypeCode {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Concrete column type: element type plus nullability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColumnType {
    pub element: ElementType,
    pub nullable: bool,
}

impl ColumnType {
    pub const fn new(element: ElementType, nullable: bool) -> Self {
        Self { element, nullable }
    }

    pub const fn non_null(element: ElementType) -> Self {
        Self::new(element, false)
    }

    pub const fn nullable(element: ElementType) -> Self {
        Self::new(element, true)
    }

    pub fn code(self) -> TypeCode {
        let base = self.element.base_code();
        if !self.nullable {
            return TypeCode(base);
        }
        match self.element {
            ElementType::Binary => TypeCode(base + NULLABLE_BINARY_OFFSET),
            _ => TypeCode(base + NULLABLE_OFFSET),
        }
    }

    pub fn from_code(code: TypeCode) -> Option<Self> {
        let raw = code.get();
        match raw {
            1..=9 => Some(Self::non_null(ElementType::ALL[raw as usize - 1])),
            10..=18 => Some(Self::nullable(
                ElementType::ALL[(raw - NULLABLE_OFFSET) as usize - 1],
            )),
            19 => Some(Self::non_null(ElementType::Binary)),
            20 => Some(Self::nullable(ElementType::Binary)),
            _ => None,
        }
    }

    /// Every known column type, ordered by type code.
    pub fn all() -> impl Iterator<Item = ColumnType> {
        (1..=20u8).filter_map(|raw| Self::from_code(TypeCode(raw)))
    }

    pub fn name(self) -> String {
        if self.nullable {
            format!("nullable {}", self.element.name())
        } else {
            self.element.name().to_owned()
        }
    }

    pub fn is_numeric(self) -> bool {
        self.element.is_numeric()
    }

    pub fn with_nullable(self, nullable: bool) -> Self {
        Self::new(self.element, nullable)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            f.write_str("nullable ")?;
        }
        f.write_str(self.element.name())
    }
}
