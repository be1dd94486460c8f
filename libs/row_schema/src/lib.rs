//! Infers canonical, language-neutral row schemas from Rust types.
//!
//! Every type taking part in a row is sorted into one of a few categories via
//! [`Describe`]. From that, the inference engine builds a tree of
//! struct, list, map, and scalar nodes with explicit bit widths,
//! nullability, and temporal and decimal precision. Serializers written in
//! other languages derive the same tree for their equivalent types, which is
//! what lets them agree on the byte layout.
//!
//! Types map to schema nodes as follows:
//!
//! - [`bool`], [`i8`], [`i16`], [`i32`], [`i64`], [`f32`], [`f64`]: the
//!   scalar of the same width, not nullable
//! - [`Option`] of those: the same scalar, nullable
//! - [`String`], [`str`], and fieldless enums: `Utf8`
//! - [`NaiveDate`](chrono::NaiveDate): `Date` with day resolution
//! - [`NaiveDateTime`](chrono::NaiveDateTime), [`DateTime<Utc>`](chrono::DateTime),
//!   [`SystemTime`](std::time::SystemTime): `Timestamp` with microsecond
//!   resolution
//! - arrays, slices, and collections like [`Vec`]: `List` with an `item` field
//! - maps like [`HashMap`](std::collections::HashMap): `Map` with a
//!   non-nullable `key` field and a `value` field
//! - records, usually via `#[derive(Describe)]`: `Struct` with one field per
//!   member in declaration order, names converted to `snake_case`
//!
//! Everything but the plain primitives is nullable. Unsigned integers have no
//! counterpart and are rejected.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//!
//! use row_schema::Describe;
//!
//! #[derive(Describe)]
//! struct Entry {
//!     id: i64,
//!     tags: Vec<String>,
//!     scores: HashMap<String, Option<f64>>,
//! }
//!
//! let schema = row_schema::infer_schema::<Entry>(true).unwrap();
//! assert_eq!(
//!     schema.to_string(),
//!     "Schema<id: Int64 not null, tags: List<item: Utf8>, \
//!      scores: Map<key: Utf8 not null, value: Float64>>",
//! );
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
mod infer;
pub mod model;
pub mod naming;
pub mod opaque;
mod schema;
pub mod table;
mod type_name;

pub use config::InferenceConfig;
pub use descriptor::{Describe, Member, Primitive, Record, TypeDesc, TypeHandle, TypeKind};
pub use error::{Result, SchemaError};
pub use infer::TypeInference;
pub use model::{Field, ScalarType, SchemaNode};
pub use opaque::{Language, OpaqueObject, opaque_object};
pub use schema::Schema;

/// Derives [`Describe`] and, for structs, [`Record`].
///
/// Structs with named fields describe as records. Their members are the
/// fields in declaration order. Fieldless enums describe as enums.
///
/// Fields may be annotated with `#[record(rename = "name")]` to change the
/// member name, or `#[record(skip)]` to leave them out. Names are converted to
/// `snake_case` during inference either way.
///
/// Adding `#[record(iterable = "Type")]` to a struct makes it describe as a
/// collection of `Type` instead, keeping its members.
///
/// If the crate is re-exported under another path, specify it with
/// `#[record(crate = "path::to::row_schema")]`.
pub use ::row_schema_macros::Describe;

/// Infers the schema of `T` with the default configuration.
///
/// See [`TypeInference::infer_schema`].
///
/// # Errors
///
/// Returns an error if no schema can be inferred for `T`, or if `as_struct` is
/// set and `T` doesn't infer as a struct.
pub fn infer_schema<T: Describe + ?Sized>(as_struct: bool) -> Result<Schema> {
    TypeInference::default().infer_schema::<T>(as_struct)
}

/// Infers the schema of the type behind a handle with the default
/// configuration.
///
/// # Errors
///
/// Returns an error if no schema can be inferred for the type, or if
/// `as_struct` is set and the type doesn't infer as a struct.
pub fn infer_schema_of(ty: TypeHandle, as_struct: bool) -> Result<Schema> {
    TypeInference::default().infer_schema_of(ty, as_struct)
}

/// Infers the unnamed root field of `T` with the default configuration.
///
/// # Errors
///
/// Returns an error if no schema can be inferred for `T`.
pub fn infer_field<T: Describe + ?Sized>() -> Result<Field> {
    TypeInference::default().infer_field::<T>()
}

/// Infers the unnamed root field of the type behind a handle with the default
/// configuration.
///
/// # Errors
///
/// Returns an error if no schema can be inferred for the type.
pub fn infer_field_of(ty: TypeHandle) -> Result<Field> {
    TypeInference::default().infer_field_of(ty)
}

/// Infers an unnamed list field for `O` with elements of type `E`.
///
/// See [`TypeInference::infer_array_field`].
///
/// # Errors
///
/// Returns an error if `O` isn't array-like, or if no schema can be inferred
/// for `E`.
pub fn infer_array_field<O, E>() -> Result<Field>
where
    O: Describe + ?Sized,
    E: Describe + ?Sized,
{
    TypeInference::default().infer_array_field::<O, E>()
}

/// Infers an unnamed list field for `outer` with elements of type `element`.
///
/// # Errors
///
/// Returns an error if `outer` isn't array-like, or if no schema can be
/// inferred for `element`.
pub fn infer_array_field_of(outer: TypeHandle, element: TypeHandle) -> Result<Field> {
    TypeInference::default().infer_array_field_of(outer, element)
}

/// Synthesizes a name for the container shape of `T`.
///
/// See [`TypeInference::infer_type_name`].
#[must_use]
pub fn infer_type_name<T: Describe + ?Sized>() -> String {
    TypeInference::default().infer_type_name::<T>()
}

#[must_use]
pub fn infer_type_name_of(ty: TypeHandle) -> String {
    TypeInference::default().infer_type_name_of(ty)
}

/// Infers the schema node of `T`.
///
/// # Errors
///
/// Returns an error if no schema can be inferred for `T`.
pub fn infer_data_type<T: Describe + ?Sized>() -> Result<SchemaNode> {
    TypeInference::default().infer_data_type::<T>()
}

/// Gets the schema node of `T`, or [`None`] if it can't be inferred.
#[must_use]
pub fn data_type<T: Describe + ?Sized>() -> Option<SchemaNode> {
    TypeInference::default().data_type::<T>()
}
