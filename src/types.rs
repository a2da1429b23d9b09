// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type mapping from logical attribute types to SQL and Java types.
//!
//! Both mappings go through one [`LogicalType`], so the DDL and the entity
//! layer can never disagree on a type family.
//!
//! # Type Mapping Table
//!
//! | Logical tag | SQL Type | Java Type |
//! |-------------|----------|-----------|
//! | `long`, `bigint` | `BIGINT` | `Long` |
//! | `integer`, `int` | `INTEGER` | `Integer` |
//! | `string`, `varchar` | `VARCHAR(n)`, `n = length ?? 255` | `String` |
//! | `text` | `TEXT` | `String` |
//! | `boolean`, `bool` | `BOOLEAN` | `Boolean` |
//! | `double` | `DOUBLE PRECISION` | `Double` |
//! | `float` | `REAL` | `Float` |
//! | `bigdecimal`, `decimal` | `DECIMAL(19,2)` | `BigDecimal` |
//! | `date` | `DATE` | `LocalDate` |
//! | `timestamp`, `datetime`, `localdatetime` | `TIMESTAMP` | `LocalDateTime` |
//! | anything else | `VARCHAR(255)` | `String` |

use crate::model::Attribute;

/// Default length of variable-length strings.
pub const DEFAULT_VARCHAR_LENGTH: u32 = 255;

/// Type family of an attribute, parsed case-insensitively from its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    /// 64-bit integer.
    BigInt,
    /// 32-bit integer.
    Integer,
    /// Bounded string.
    String,
    /// Unbounded text.
    Text,
    /// Boolean.
    Boolean,
    /// Double precision float.
    Double,
    /// Single precision float.
    Float,
    /// Fixed-point decimal.
    Decimal,
    /// Calendar date.
    Date,
    /// Date and time.
    Timestamp,
    /// Unrecognized tag; treated as a bounded string.
    Unknown
}

impl LogicalType {
    /// Parse a logical type tag. Never fails.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "long" | "bigint" => Self::BigInt,
            "integer" | "int" => Self::Integer,
            "string" | "varchar" => Self::String,
            "text" => Self::Text,
            "boolean" | "bool" => Self::Boolean,
            "double" => Self::Double,
            "float" => Self::Float,
            "bigdecimal" | "decimal" => Self::Decimal,
            "date" => Self::Date,
            "timestamp" | "datetime" | "localdatetime" => Self::Timestamp,
            _ => Self::Unknown
        }
    }

    /// Logical type of an attribute.
    #[must_use]
    pub fn of(attr: &Attribute) -> Self {
        Self::parse(&attr.ty)
    }

    /// SQL type literal. `length` only affects [`LogicalType::String`].
    #[must_use]
    pub fn sql_name(&self, length: Option<u32>) -> String {
        match self {
            Self::BigInt => "BIGINT".to_string(),
            Self::Integer => "INTEGER".to_string(),
            Self::String => format!("VARCHAR({})", length.unwrap_or(DEFAULT_VARCHAR_LENGTH)),
            Self::Text => "TEXT".to_string(),
            Self::Boolean => "BOOLEAN".to_string(),
            Self::Double => "DOUBLE PRECISION".to_string(),
            Self::Float => "REAL".to_string(),
            Self::Decimal => "DECIMAL(19,2)".to_string(),
            Self::Date => "DATE".to_string(),
            Self::Timestamp => "TIMESTAMP".to_string(),
            Self::Unknown => format!("VARCHAR({DEFAULT_VARCHAR_LENGTH})")
        }
    }

    /// Java type for fields of this family.
    #[must_use]
    pub const fn java(&self) -> JavaType {
        match self {
            Self::BigInt => JavaType::plain("Long"),
            Self::Integer => JavaType::plain("Integer"),
            Self::String | Self::Text | Self::Unknown => JavaType::plain("String"),
            Self::Boolean => JavaType::plain("Boolean"),
            Self::Double => JavaType::plain("Double"),
            Self::Float => JavaType::plain("Float"),
            Self::Decimal => JavaType::imported("BigDecimal", "java.math.BigDecimal"),
            Self::Date => JavaType::imported("LocalDate", "java.time.LocalDate"),
            Self::Timestamp => JavaType::imported("LocalDateTime", "java.time.LocalDateTime")
        }
    }

    /// Whether the Java type is an integral number (eligible for identity
    /// generation when used as primary key).
    #[must_use]
    pub const fn is_integral(&self) -> bool {
        matches!(self, Self::BigInt | Self::Integer)
    }
}

/// Mapped SQL type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlType {
    /// SQL type name (e.g. `VARCHAR(80)`).
    pub name:     String,
    /// Whether the column allows NULL.
    pub nullable: bool
}

/// Mapped Java type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaType {
    /// Simple type name (e.g. `BigDecimal`).
    pub name:   &'static str,
    /// Import needed to use the type, if any.
    pub import: Option<&'static str>
}

impl JavaType {
    const fn plain(name: &'static str) -> Self {
        Self {
            name,
            import: None
        }
    }

    const fn imported(name: &'static str, import: &'static str) -> Self {
        Self {
            name,
            import: Some(import)
        }
    }
}

/// Trait for mapping attributes to a target type system.
///
/// Implement this trait for each output language.
pub trait TypeMapper {
    /// Mapped representation.
    type Output;

    /// Map an attribute to its target type.
    fn map_type(&self, attr: &Attribute) -> Self::Output;
}

/// SQL DDL type mapper.
pub struct SqlTypeMapper;

impl TypeMapper for SqlTypeMapper {
    type Output = SqlType;

    fn map_type(&self, attr: &Attribute) -> SqlType {
        SqlType {
            name:     LogicalType::of(attr).sql_name(attr.length),
            nullable: attr.nullable
        }
    }
}

/// Java field type mapper.
pub struct JavaTypeMapper;

impl TypeMapper for JavaTypeMapper {
    type Output = JavaType;

    fn map_type(&self, attr: &Attribute) -> JavaType {
        LogicalType::of(attr).java()
    }
}

/// SQL type literal for an attribute.
///
/// ```
/// use blueprint_forge::{model::Attribute, types::sql_type};
///
/// assert_eq!(sql_type(&Attribute::new("total", "BigDecimal")), "DECIMAL(19,2)");
/// ```
#[must_use]
pub fn sql_type(attr: &Attribute) -> String {
    SqlTypeMapper.map_type(attr).name
}
