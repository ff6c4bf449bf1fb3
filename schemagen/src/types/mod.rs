//! Java type descriptors and SQL type mapping
//!
//! This module provides the type system that binds column metadata to the
//! generated Java source.
//!
//! # Type Notation
//!
//! [`JavaType`] parses and renders the notation used in Java source:
//!
//! ```text
//! int                     → primitive, no import
//! java.lang.String        → reference type in java.lang, no import
//! java.math.BigDecimal    → reference type, imported
//! byte[]                  → array of primitive, no import
//! java.time.LocalDate[]   → array, element type imported
//! ```
//!
//! # SQL Mapping
//!
//! [`TypeMapper::from_sql_type`] maps common MySQL, PostgreSQL and `SQLite`
//! type names to Java types:
//!
//! ```text
//! varchar(255)            → java.lang.String
//! int unsigned            → java.lang.Long
//! bigint unsigned         → java.math.BigInteger
//! decimal(10,2)           → java.math.BigDecimal
//! timestamp with time zone→ java.time.OffsetDateTime
//! bytea                   → byte[]
//! integer[]               → java.lang.Integer[]
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Package whose types are visible without an import
pub const DEFAULT_IMPORTED_PACKAGE: &str = "java.lang";

/// Java primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `char`
    Char,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
}

impl PrimitiveType {
    /// Source keyword
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Boxed wrapper class
    #[must_use]
    pub const fn wrapper(self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Char => "java.lang.Character",
            Self::Short => "java.lang.Short",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "boolean" => Some(Self::Boolean),
            "byte" => Some(Self::Byte),
            "char" => Some(Self::Char),
            "short" => Some(Self::Short),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            _ => None,
        }
    }
}

/// Semantic type of a column in the generated Java source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JavaType {
    /// Built-in scalar
    Primitive(PrimitiveType),
    /// Reference type by fully-qualified name
    Class(String),
    /// Array of an element type
    Array(Box<JavaType>),
}

impl JavaType {
    /// Parse Java type notation
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemagen::types::{JavaType, PrimitiveType};
    /// assert_eq!(JavaType::parse("int").unwrap(), JavaType::Primitive(PrimitiveType::Int));
    /// assert_eq!(JavaType::parse("byte[]").unwrap().simple_name(), "byte[]");
    /// assert_eq!(JavaType::parse("java.math.BigDecimal").unwrap().simple_name(), "BigDecimal");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input is empty
    /// - A name segment is not a valid Java identifier
    /// - Generic arguments are present (`List<String>`)
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if let Some(element) = trimmed.strip_suffix("[]") {
            return Ok(Self::Array(Box::new(Self::parse(element)?)));
        }

        if trimmed.is_empty() {
            return Err(Error::InvalidType(format!(
                "Invalid type: '{input}'. Type name cannot be empty"
            )));
        }

        if let Some(primitive) = PrimitiveType::from_keyword(trimmed) {
            return Ok(Self::Primitive(primitive));
        }

        let valid = trimmed.split('.').all(|segment| {
            segment
                .chars()
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        });
        if !valid {
            return Err(Error::InvalidType(format!(
                "Invalid type: '{input}'. Expected a primitive, a fully-qualified class name or an array of either"
            )));
        }

        Ok(Self::Class(trimmed.to_string()))
    }

    /// Reference type by fully-qualified name
    #[must_use]
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self::Class(qualified_name.into())
    }

    /// Array of this type
    #[must_use]
    pub fn array_of(self) -> Self {
        Self::Array(Box::new(self))
    }

    /// Whether this is an array type
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Whether this is a primitive scalar
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Innermost element type with every array level removed
    #[must_use]
    pub fn element_type(&self) -> &Self {
        match self {
            Self::Array(element) => element.element_type(),
            other => other,
        }
    }

    /// Reference form usable as a generic argument (`long` becomes `java.lang.Long`)
    #[must_use]
    pub fn boxed(&self) -> Self {
        match self {
            Self::Primitive(primitive) => Self::class(primitive.wrapper()),
            other => other.clone(),
        }
    }

    /// Package of a reference type, `None` for primitives, arrays and the default package
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        match self {
            Self::Class(name) => name.rsplit_once('.').map(|(package, _)| package),
            Self::Primitive(_) | Self::Array(_) => None,
        }
    }

    /// Name used in field declarations (`String`, `byte[]`, `BigDecimal`)
    #[must_use]
    pub fn simple_name(&self) -> String {
        match self {
            Self::Primitive(primitive) => primitive.keyword().to_string(),
            Self::Class(name) => name
                .rsplit_once('.')
                .map_or(name.as_str(), |(_, simple)| simple)
                .to_string(),
            Self::Array(element) => format!("{}[]", element.simple_name()),
        }
    }
}

impl FromStr for JavaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for JavaType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<JavaType> for String {
    fn from(value: JavaType) -> Self {
        value.to_string()
    }
}

impl From<PrimitiveType> for JavaType {
    fn from(value: PrimitiveType) -> Self {
        Self::Primitive(value)
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => write!(f, "{}", primitive.keyword()),
            Self::Class(name) => write!(f, "{name}"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// Maps column types to Java types and decides what needs an import
pub struct TypeMapper;

impl TypeMapper {
    /// Whether a fully-qualified name is visible without an import
    ///
    /// True for names in `java.lang` itself (not its sub-packages) and for
    /// names without a package.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemagen::types::TypeMapper;
    /// assert!(TypeMapper::is_implicitly_imported("java.lang.String"));
    /// assert!(!TypeMapper::is_implicitly_imported("java.lang.annotation.Retention"));
    /// assert!(!TypeMapper::is_implicitly_imported("java.util.UUID"));
    /// ```
    #[must_use]
    pub fn is_implicitly_imported(qualified_name: &str) -> bool {
        qualified_name
            .rsplit_once('.')
            .is_none_or(|(package, _)| package == DEFAULT_IMPORTED_PACKAGE)
    }

    /// Fully-qualified name to import for a column type, if any
    ///
    /// Arrays are unwrapped to their element type first.
    #[must_use]
    pub fn import_for(java_type: &JavaType) -> Option<&str> {
        match java_type.element_type() {
            JavaType::Class(name) if !Self::is_implicitly_imported(name) => Some(name),
            _ => None,
        }
    }

    /// Whether a column type needs an import statement
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemagen::types::{JavaType, TypeMapper};
    /// let decimal = JavaType::parse("java.math.BigDecimal").unwrap();
    /// assert!(TypeMapper::requires_import(&decimal));
    /// assert!(TypeMapper::requires_import(&decimal.array_of()));
    /// assert!(!TypeMapper::requires_import(&JavaType::parse("long[]").unwrap()));
    /// ```
    #[must_use]
    pub fn requires_import(java_type: &JavaType) -> bool {
        Self::import_for(java_type).is_some()
    }

    /// Map a SQL column type name to a Java type
    ///
    /// Length and precision arguments are ignored, `unsigned` widens integer
    /// types, and a trailing `[]` maps to an array. Unknown types map to
    /// `java.lang.Object`.
    #[must_use]
    pub fn from_sql_type(sql_type: &str) -> JavaType {
        let trimmed = sql_type.trim();
        if let Some(element) = trimmed.strip_suffix("[]") {
            return Self::from_sql_type(element).array_of();
        }

        let (base, unsigned) = normalize_sql_type(trimmed);
        let class = match base.as_str() {
            "bit" | "bool" | "boolean" => "java.lang.Boolean",
            "tinyint" | "smallint" | "mediumint" | "int2" | "smallserial" | "year" => {
                "java.lang.Integer"
            }
            "int" | "integer" | "int4" | "serial" if unsigned => "java.lang.Long",
            "int" | "integer" | "int4" | "serial" => "java.lang.Integer",
            "bigint" | "int8" | "bigserial" if unsigned => "java.math.BigInteger",
            "bigint" | "int8" | "bigserial" => "java.lang.Long",
            "float" | "real" | "float4" => "java.lang.Float",
            "double" | "double precision" | "float8" => "java.lang.Double",
            "decimal" | "numeric" | "dec" | "money" => "java.math.BigDecimal",
            "char" | "character" | "varchar" | "character varying" | "nchar" | "nvarchar"
            | "text" | "tinytext" | "mediumtext" | "longtext" | "ntext" | "clob" | "enum"
            | "set" | "json" | "jsonb" | "xml" | "citext" => "java.lang.String",
            "date" => "java.time.LocalDate",
            "time" | "time without time zone" | "timetz" | "time with time zone" => {
                "java.time.LocalTime"
            }
            "datetime" | "timestamp" | "timestamp without time zone" => "java.time.LocalDateTime",
            "timestamptz" | "timestamp with time zone" | "datetimeoffset" => {
                "java.time.OffsetDateTime"
            }
            "blob" | "tinyblob" | "mediumblob" | "longblob" | "binary" | "varbinary" | "bytea"
            | "image" => return JavaType::Primitive(PrimitiveType::Byte).array_of(),
            "uuid" | "uniqueidentifier" => "java.util.UUID",
            unknown => {
                tracing::warn!(sql_type = %sql_type, normalized = %unknown, "unmapped SQL type, using java.lang.Object");
                "java.lang.Object"
            }
        };

        JavaType::class(class)
    }
}

/// Lowercase, drop `(...)` arguments and `zerofill`, pull out `unsigned`
fn normalize_sql_type(sql_type: &str) -> (String, bool) {
    let mut base = String::with_capacity(sql_type.len());
    let mut depth = 0_usize;
    for ch in sql_type.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => base.push(ch.to_ascii_lowercase()),
            _ => {}
        }
    }

    let mut unsigned = false;
    let words: Vec<&str> = base
        .split_whitespace()
        .filter(|word| match *word {
            "unsigned" => {
                unsigned = true;
                false
            }
            "zerofill" | "signed" => false,
            _ => true,
        })
        .collect();

    (words.join(" "), unsigned)
}
