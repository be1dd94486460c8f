//! Describes host types to the inference engine.
//!
//! A type takes part in schema inference by implementing [`Describe`], which
//! sorts it into one of the fixed [`TypeKind`] categories. Record types also
//! implement [`Record`] to list their members. Both are usually derived with
//! [`macro@crate::Describe`].

use std::any::{self, TypeId};
use std::borrow::Cow;
use std::fmt;

mod impls;

/// Sorts a type into a [`TypeKind`] for schema inference.
///
/// Implementations must be deterministic: every call for the same type has to
/// return the same description.
pub trait Describe: 'static {
    fn describe() -> TypeDesc;
}

/// Lists the members of a record type.
///
/// The order of the returned members is the order of the fields in the
/// schema, and with it their position on the wire. It must not change between
/// calls.
pub trait Record: 'static {
    fn members() -> Vec<Member>;
}

/// The primitive, unboxed scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

/// The category of a host type.
#[derive(Debug, Clone, Copy)]
pub enum TypeKind {
    /// A primitive that can never be null.
    Primitive(Primitive),
    /// The nullable, boxed form of a primitive.
    Boxed(Primitive),
    /// An arbitrary-precision integer.
    BigInteger,
    /// An arbitrary-precision decimal.
    BigDecimal,
    Date,
    Timestamp,
    Text,
    /// A fieldless enum, stored by variant name.
    Enum,
    /// A fixed-shape, element-typed container.
    Array(TypeHandle),
    /// A multi-element collection.
    Iterable(TypeHandle),
    Map { key: TypeHandle, value: TypeHandle },
    /// Anything else. Inferable only if the type has record members.
    Other,
}

impl TypeKind {
    /// A short name for the kind, for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Boxed(_) => "boxed primitive",
            Self::BigInteger => "big integer",
            Self::BigDecimal => "big decimal",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
            Self::Text => "text",
            Self::Enum => "enum",
            Self::Array(_) => "array",
            Self::Iterable(_) => "iterable",
            Self::Map { .. } => "map",
            Self::Other => "other",
        }
    }

    /// Whether the kind holds a sequence of elements.
    #[must_use]
    pub const fn is_list_like(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Iterable(_))
    }
}

/// A lazily resolved reference to a type's [`TypeDesc`].
///
/// Record members refer to their types through handles, so describing a
/// self-referential type doesn't recurse until the engine asks it to.
#[derive(Clone, Copy)]
pub struct TypeHandle(fn() -> TypeDesc);

impl TypeHandle {
    #[must_use]
    pub fn of<T: Describe + ?Sized>() -> Self {
        Self(T::describe)
    }

    #[must_use]
    pub fn resolve(self) -> TypeDesc {
        (self.0)()
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeHandle")
            .field(&self.resolve().type_name())
            .finish()
    }
}

/// A named member of a record type.
#[derive(Debug, Clone)]
pub struct Member {
    name: Cow<'static, str>,
    ty: TypeHandle,
}

impl Member {
    /// Creates a member of type `T`.
    pub fn new<T: Describe + ?Sized>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_handle(name, TypeHandle::of::<T>())
    }

    pub fn with_handle(name: impl Into<Cow<'static, str>>, ty: TypeHandle) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// The member name as declared, before normalization.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn ty(&self) -> TypeHandle {
        self.ty
    }
}

/// The description of a host type.
#[derive(Debug, Clone, Copy)]
pub struct TypeDesc {
    type_name: &'static str,
    type_id: TypeId,
    kind: TypeKind,
    members: Option<fn() -> Vec<Member>>,
}

impl TypeDesc {
    /// Describes `T` as the given kind, without record members.
    #[must_use]
    pub fn new<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self {
            type_name: any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            kind,
            members: None,
        }
    }

    #[must_use]
    pub fn primitive<T: ?Sized + 'static>(primitive: Primitive) -> Self {
        Self::new::<T>(TypeKind::Primitive(primitive))
    }

    #[must_use]
    pub fn text<T: ?Sized + 'static>() -> Self {
        Self::new::<T>(TypeKind::Text)
    }

    #[must_use]
    pub fn enumeration<T: ?Sized + 'static>() -> Self {
        Self::new::<T>(TypeKind::Enum)
    }

    /// Describes `T` as an array of `E`.
    #[must_use]
    pub fn array<T: ?Sized + 'static, E: Describe + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Array(TypeHandle::of::<E>()))
    }

    /// Describes `T` as a collection of `E`.
    #[must_use]
    pub fn iterable<T: ?Sized + 'static, E: Describe + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Iterable(TypeHandle::of::<E>()))
    }

    /// Describes `T` as a map from `K` to `V`.
    #[must_use]
    pub fn map<T: ?Sized + 'static, K: Describe + ?Sized, V: Describe + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Map {
            key: TypeHandle::of::<K>(),
            value: TypeHandle::of::<V>(),
        })
    }

    /// Describes the record type `T`.
    #[must_use]
    pub fn record<T: Record>() -> Self {
        Self::new::<T>(TypeKind::Other).with_members::<T>()
    }

    /// Describes `T` as a type no schema can be inferred for.
    #[must_use]
    pub fn unsupported<T: ?Sized + 'static>() -> Self {
        Self::new::<T>(TypeKind::Other)
    }

    /// Attaches the members of `R`, making the type record-shaped.
    ///
    /// This doesn't change the kind. A collection that is also record-shaped
    /// is still inferred as a collection.
    #[must_use]
    pub fn with_members<R: Record>(mut self) -> Self {
        self.members = Some(R::members);
        self
    }

    /// Turns a primitive into its nullable boxed form.
    ///
    /// Every other kind is nullable already and stays as-is.
    #[must_use]
    pub fn boxed(mut self) -> Self {
        if let TypeKind::Primitive(primitive) = self.kind {
            self.kind = TypeKind::Boxed(primitive);
        }
        self
    }

    /// The full type name, as per [`std::any::type_name`].
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The type name without module path and generic arguments.
    #[must_use]
    pub fn simple_name(&self) -> &'static str {
        simple_name(self.type_name)
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Whether the type has record members.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        self.members.is_some()
    }

    /// Gets the record members, if the type is record-shaped.
    #[must_use]
    pub fn members(&self) -> Option<Vec<Member>> {
        self.members.map(|members| members())
    }
}

fn simple_name(full: &str) -> &str {
    let base = full.split_once('<').map_or(full, |(base, _)| base);
    base.rsplit_once("::").map_or(base, |(_, name)| name)
}
