//! The canonical, language-neutral schema model.
//!
//! Every value in here is immutable once constructed. The constructors check
//! the shape rules of the row format and panic when they are violated, since a
//! malformed node can only come from a bug in the code building it.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// Reserved name of the element field of a [`SchemaNode::List`].
pub const ITEM_NAME: &str = "item";
/// Reserved name of the key field of a [`SchemaNode::Map`].
pub const KEY_NAME: &str = "key";
/// Reserved name of the value field of a [`SchemaNode::Map`].
pub const VALUE_NAME: &str = "value";

/// Largest decimal precision the row format can store.
pub const MAX_PRECISION: u8 = 38;
/// Largest decimal scale the row format can store.
pub const MAX_SCALE: u8 = 18;

/// The broad category of a [`ScalarType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
}

/// A fixed-width scalar.
///
/// Integers are always signed. There is deliberately no unsigned variant, as
/// not every language on the other end of the wire has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl ScalarType {
    /// Gets the signed integer type with the given bit width.
    ///
    /// Returns [`None`] unless the width is 8, 16, 32, or 64.
    #[must_use]
    pub const fn int(bit_width: u8) -> Option<Self> {
        match bit_width {
            8 => Some(Self::Int8),
            16 => Some(Self::Int16),
            32 => Some(Self::Int32),
            64 => Some(Self::Int64),
            _ => None,
        }
    }

    /// Gets the floating point type with the given bit width.
    ///
    /// Returns [`None`] unless the width is 32 or 64.
    #[must_use]
    pub const fn float(bit_width: u8) -> Option<Self> {
        match bit_width {
            32 => Some(Self::Float32),
            64 => Some(Self::Float64),
            _ => None,
        }
    }

    #[must_use]
    pub const fn kind(self) -> ScalarKind {
        match self {
            Self::Bool => ScalarKind::Bool,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 => ScalarKind::Int,
            Self::Float32 | Self::Float64 => ScalarKind::Float,
        }
    }

    /// The width of the value in bits. A bool counts as a single bit.
    #[must_use]
    pub const fn bit_width(self) -> u8 {
        match self {
            Self::Bool => 1,
            Self::Int8 => 8,
            Self::Int16 => 16,
            Self::Int32 | Self::Float32 => 32,
            Self::Int64 | Self::Float64 => 64,
        }
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        !matches!(self, Self::Bool)
    }
}

/// The resolution of a [`Temporal`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Day,
    Microsecond,
}

/// A point in time or a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Temporal {
    /// A calendar date with day resolution.
    Date,
    /// A timestamp with microsecond resolution and no embedded timezone.
    Timestamp,
}

impl Temporal {
    #[must_use]
    pub const fn unit(self) -> TimeUnit {
        match self {
            Self::Date => TimeUnit::Day,
            Self::Timestamp => TimeUnit::Microsecond,
        }
    }
}

/// A node in the schema tree.
///
/// The composite variants cannot be built directly outside this crate. Use
/// [`SchemaNode::decimal`], [`SchemaNode::list`], [`SchemaNode::map`], and
/// [`SchemaNode::structure`], which check the shape rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaNode {
    Scalar(ScalarType),
    #[non_exhaustive]
    Decimal { precision: u8, scale: u8 },
    Temporal(Temporal),
    /// Variable-length text. Also used for enum values, by name.
    Utf8,
    #[non_exhaustive]
    List { item: Box<Field> },
    #[non_exhaustive]
    Map { key: Box<Field>, value: Box<Field> },
    #[non_exhaustive]
    Struct { fields: Vec<Field> },
}

impl SchemaNode {
    /// Creates a decimal node.
    ///
    /// # Panics
    ///
    /// Panics if the precision is 0 or exceeds [`MAX_PRECISION`], or if the
    /// scale exceeds the precision or [`MAX_SCALE`].
    #[must_use]
    pub const fn decimal(precision: u8, scale: u8) -> Self {
        assert!(
            precision >= 1 && precision <= MAX_PRECISION,
            "decimal precision out of range"
        );
        assert!(
            scale <= precision && scale <= MAX_SCALE,
            "decimal scale out of range"
        );
        Self::Decimal { precision, scale }
    }

    /// Creates a list node.
    ///
    /// # Panics
    ///
    /// Panics if the element field isn't named [`ITEM_NAME`].
    #[must_use]
    pub fn list(item: Field) -> Self {
        assert_eq!(item.name, ITEM_NAME, "list element field must be named `item`");
        Self::List {
            item: Box::new(item),
        }
    }

    /// Creates a map node.
    ///
    /// # Panics
    ///
    /// Panics if the key field isn't named [`KEY_NAME`] or is nullable, or if
    /// the value field isn't named [`VALUE_NAME`].
    #[must_use]
    pub fn map(key: Field, value: Field) -> Self {
        assert_eq!(key.name, KEY_NAME, "map key field must be named `key`");
        assert!(!key.nullable, "map key field must not be nullable");
        assert_eq!(value.name, VALUE_NAME, "map value field must be named `value`");
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Creates a struct node. The field order is kept as-is.
    ///
    /// # Panics
    ///
    /// Panics if any field name is empty or appears more than once.
    #[must_use]
    pub fn structure(fields: Vec<Field>) -> Self {
        assert!(
            fields.iter().all(|f| !f.name.is_empty()),
            "struct member fields must be named"
        );
        assert_unique_names(&fields);
        Self::Struct { fields }
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<ScalarType> {
        match self {
            Self::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }

    /// Gets the `(precision, scale)` of a decimal node.
    #[must_use]
    pub const fn as_decimal(&self) -> Option<(u8, u8)> {
        match self {
            Self::Decimal { precision, scale } => Some((*precision, *scale)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_temporal(&self) -> Option<Temporal> {
        match self {
            Self::Temporal(temporal) => Some(*temporal),
            _ => None,
        }
    }

    /// Gets the element field of a list node.
    #[must_use]
    pub fn list_item(&self) -> Option<&Field> {
        match self {
            Self::List { item } => Some(&**item),
            _ => None,
        }
    }

    /// Gets the key and value fields of a map node.
    #[must_use]
    pub fn map_entry(&self) -> Option<(&Field, &Field)> {
        match self {
            Self::Map { key, value } => Some((&**key, &**value)),
            _ => None,
        }
    }

    /// Gets the member fields of a struct node.
    #[must_use]
    pub fn struct_fields(&self) -> Option<&[Field]> {
        match self {
            Self::Struct { fields } => Some(fields.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct { .. })
    }

    /// A short name for the kind of node, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(ScalarType::Bool) => "Bool",
            Self::Scalar(ScalarType::Float32 | ScalarType::Float64) => "FloatingPoint",
            Self::Scalar(_) => "Int",
            Self::Decimal { .. } => "Decimal",
            Self::Temporal(Temporal::Date) => "Date",
            Self::Temporal(Temporal::Timestamp) => "Timestamp",
            Self::Utf8 => "Utf8",
            Self::List { .. } => "List",
            Self::Map { .. } => "Map",
            Self::Struct { .. } => "Struct",
        }
    }
}

/// A named, typed slot in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    node: SchemaNode,
    nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, node: SchemaNode, nullable: bool) -> Self {
        Self {
            name: name.into(),
            node,
            nullable,
        }
    }

    /// Creates a nullable list field.
    ///
    /// # Panics
    ///
    /// See [`SchemaNode::list`].
    pub fn list(name: impl Into<String>, item: Field) -> Self {
        Self::new(name, SchemaNode::list(item), true)
    }

    /// Creates a nullable map field.
    ///
    /// # Panics
    ///
    /// See [`SchemaNode::map`].
    pub fn map(name: impl Into<String>, key: Field, value: Field) -> Self {
        Self::new(name, SchemaNode::map(key, value), true)
    }

    /// Creates a nullable struct field.
    ///
    /// # Panics
    ///
    /// See [`SchemaNode::structure`].
    pub fn structure(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(name, SchemaNode::structure(fields), true)
    }

    /// Creates a list element field.
    #[must_use]
    pub fn item(node: SchemaNode, nullable: bool) -> Self {
        Self::new(ITEM_NAME, node, nullable)
    }

    /// Creates a map key field. Keys are never nullable.
    #[must_use]
    pub fn key(node: SchemaNode) -> Self {
        Self::new(KEY_NAME, node, false)
    }

    /// Creates a map value field.
    #[must_use]
    pub fn value(node: SchemaNode, nullable: bool) -> Self {
        Self::new(VALUE_NAME, node, nullable)
    }

    /// Returns the same field with its nullability replaced.
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Returns the same field with its name replaced.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn node(&self) -> &SchemaNode {
        &self.node
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub fn into_node(self) -> SchemaNode {
        self.node
    }
}

pub(crate) fn assert_unique_names(fields: &[Field]) {
    let mut names = HashSet::with_capacity(fields.len());
    for field in fields {
        assert!(
            names.insert(field.name.as_str()),
            "duplicate field name `{}`",
            field.name
        );
    }
}

pub(crate) fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[Field]) -> fmt::Result {
    for (index, field) in fields.iter().enumerate() {
        if index != 0 {
            f.write_str(", ")?;
        }
        fmt::Display::fmt(field, f)?;
    }
    Ok(())
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "Bool",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
        })
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => fmt::Display::fmt(scalar, f),
            Self::Decimal { precision, scale } => write!(f, "Decimal({precision}, {scale})"),
            Self::Temporal(Temporal::Date) => f.write_str("Date(Day)"),
            Self::Temporal(Temporal::Timestamp) => f.write_str("Timestamp(Microsecond)"),
            Self::Utf8 => f.write_str("Utf8"),
            Self::List { item } => write!(f, "List<{item}>"),
            Self::Map { key, value } => write!(f, "Map<{key}, {value}>"),
            Self::Struct { fields } => {
                f.write_str("Struct<")?;
                write_fields(f, fields)?;
                f.write_str(">")
            },
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.node)?;
        if !self.nullable {
            f.write_str(" not null")?;
        }
        Ok(())
    }
}
