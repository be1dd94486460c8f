//! The fixed mapping of primitives and well-known types to schema nodes.
//!
//! Every other language port maps these the same way, so none of this may
//! change without breaking wire compatibility.

use crate::descriptor::Primitive;
use crate::model::{MAX_PRECISION, MAX_SCALE, ScalarType, SchemaNode, Temporal};

/// Arbitrary-precision decimals use the widest storable decimal.
pub const BIG_DECIMAL: SchemaNode = SchemaNode::decimal(MAX_PRECISION, MAX_SCALE);
/// Arbitrary-precision integers are decimals without fractional digits.
pub const BIG_INTEGER: SchemaNode = SchemaNode::decimal(MAX_PRECISION, 0);
pub const DATE: SchemaNode = SchemaNode::Temporal(Temporal::Date);
pub const TIMESTAMP: SchemaNode = SchemaNode::Temporal(Temporal::Timestamp);

/// Gets the scalar a primitive is stored as.
///
/// Boxed primitives use the same scalar, only the nullability differs.
#[must_use]
pub const fn scalar(primitive: Primitive) -> ScalarType {
    match primitive {
        Primitive::Bool => ScalarType::Bool,
        Primitive::I8 => ScalarType::Int8,
        Primitive::I16 => ScalarType::Int16,
        Primitive::I32 => ScalarType::Int32,
        Primitive::I64 => ScalarType::Int64,
        Primitive::F32 => ScalarType::Float32,
        Primitive::F64 => ScalarType::Float64,
    }
}
