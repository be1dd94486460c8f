//! Error handling types.

pub type Result<T, E = SchemaError> = std::result::Result<T, E>;

/// Reasons a type cannot be mapped to a schema.
///
/// These all point at a problem with the type definitions themselves, so
/// retrying won't help. Type names are as reported by
/// [`std::any::type_name`], and `seen` lists the record types being expanded
/// on the path to the failure, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A record type is reachable from itself through its members.
    #[error("circular references in record types are not allowed, but got {ty} in {seen:?}")]
    CircularReference {
        ty: &'static str,
        seen: Vec<&'static str>,
    },
    /// No mapping rule matches the type.
    #[error("unsupported type {ty} for field {field:?}, seen types are {seen:?}")]
    UnsupportedType {
        ty: &'static str,
        field: String,
        seen: Vec<&'static str>,
    },
    /// Two members of a record normalize to the same field name.
    #[error("record {ty} has more than one member named {field:?}")]
    DuplicateField { ty: &'static str, field: String },
    /// A record has a member with an empty name.
    #[error("record {ty} has a member without a name, seen types are {seen:?}")]
    UnnamedMember {
        ty: &'static str,
        seen: Vec<&'static str>,
    },
    /// The type was requested as a struct but didn't infer as one.
    #[error("expected {ty} to infer as a Struct, but got {found}")]
    NotAStruct {
        ty: &'static str,
        found: &'static str,
    },
    /// The type was requested as a list but isn't array-like.
    #[error("expected {ty} to be array-like, but it is {found}")]
    NotAList {
        ty: &'static str,
        found: &'static str,
    },
    /// The type nests deeper than the configured limit.
    #[error("type {ty} nests deeper than the limit of {limit}, seen types are {seen:?}")]
    DepthExceeded {
        ty: &'static str,
        limit: usize,
        seen: Vec<&'static str>,
    },
}
