use std::any::TypeId;

use indexmap::IndexMap;

use crate::config::InferenceConfig;
use crate::descriptor::{Describe, Member, Primitive, TypeDesc, TypeHandle, TypeKind};
use crate::error::{Result, SchemaError};
use crate::model::{Field, ITEM_NAME, KEY_NAME, SchemaNode, VALUE_NAME};
use crate::naming::to_snake_case;
use crate::schema::Schema;
use crate::table;


/// Infers schemas from type descriptions.
///
/// The free functions in the crate root use a default instance. Create one
/// yourself to change the [`InferenceConfig`].
///
/// Inference holds no state between calls, so an instance may be shared
/// between threads freely.
#[derive(Debug, Clone, Default)]
pub struct TypeInference {
    config: InferenceConfig,
}

/// The record types being expanded on the current path, outermost first.
///
/// Every record expansion works on its own copy, so sibling members never see
/// each other's types. Only a type that contains itself is a cycle.
#[derive(Debug, Clone, Default)]
struct SeenTypes(IndexMap<TypeId, &'static str>);

impl SeenTypes {
    fn contains(&self, desc: &TypeDesc) -> bool {
        self.0.contains_key(&desc.type_id())
    }

    fn with(&self, desc: &TypeDesc) -> Self {
        let mut copy = self.clone();
        copy.0.insert(desc.type_id(), desc.type_name());
        copy
    }

    fn names(&self) -> Vec<&'static str> {
        self.0.values().copied().collect()
    }
}

impl TypeInference {
    #[must_use]
    pub const fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Infers the schema of `T`.
    ///
    /// If `as_struct` is set, `T` must infer as a struct and its members become
    /// the top-level fields. Otherwise, the schema holds a single unnamed field
    /// of type `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if no schema can be inferred for `T`, or if `as_struct`
    /// is set and `T` doesn't infer as a struct.
    pub fn infer_schema<T: Describe + ?Sized>(&self, as_struct: bool) -> Result<Schema> {
        self.infer_schema_of(TypeHandle::of::<T>(), as_struct)
    }

    /// Infers the schema of the type behind a handle.
    ///
    /// See [`TypeInference::infer_schema`].
    ///
    /// # Errors
    ///
    /// Returns an error if no schema can be inferred for the type, or if
    /// `as_struct` is set and the type doesn't infer as a struct.
    pub fn infer_schema_of(&self, ty: TypeHandle, as_struct: bool) -> Result<Schema> {
        let desc = ty.resolve();
        let field = self.infer_root(&desc)?;

        let schema = if as_struct {
            let type_name = desc.type_name();
            match field.into_node() {
                SchemaNode::Struct { fields } => Schema::new(fields),
                node => {
                    let err = SchemaError::NotAStruct {
                        ty: type_name,
                        found: node.kind_name(),
                    };
                    log::debug!("Cannot infer schema: {err}");
                    return Err(err);
                },
            }
        } else {
            Schema::new(vec![field])
        };

        log::debug!(
            "Inferred schema of {} with {} top-level fields",
            desc.type_name(),
            schema.len()
        );
        Ok(schema)
    }

    /// Infers the unnamed root field of `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if no schema can be inferred for `T`.
    pub fn infer_field<T: Describe + ?Sized>(&self) -> Result<Field> {
        self.infer_field_of(TypeHandle::of::<T>())
    }

    /// Infers the unnamed root field of the type behind a handle.
    ///
    /// # Errors
    ///
    /// Returns an error if no schema can be inferred for the type.
    pub fn infer_field_of(&self, ty: TypeHandle) -> Result<Field> {
        self.infer_root(&ty.resolve())
    }

    /// Infers an unnamed list field for the array-like `O` with elements of
    /// type `E`.
    ///
    /// The element type is taken from `E`, not from `O`.
    ///
    /// # Errors
    ///
    /// Returns an error if `O` isn't an array or collection, or if no schema
    /// can be inferred for `E`.
    pub fn infer_array_field<O, E>(&self) -> Result<Field>
    where
        O: Describe + ?Sized,
        E: Describe + ?Sized,
    {
        self.infer_array_field_of(TypeHandle::of::<O>(), TypeHandle::of::<E>())
    }

    /// Infers an unnamed list field for an array-like type with the given
    /// element type.
    ///
    /// See [`TypeInference::infer_array_field`].
    ///
    /// # Errors
    ///
    /// Returns an error if `outer` isn't an array or collection, or if no
    /// schema can be inferred for `element`.
    pub fn infer_array_field_of(&self, outer: TypeHandle, element: TypeHandle) -> Result<Field> {
        let desc = outer.resolve();
        log::debug!("Inferring list field of {}", desc.type_name());

        let kind = desc.kind();
        if !kind.is_list_like() {
            let err = SchemaError::NotAList {
                ty: desc.type_name(),
                found: kind.name(),
            };
            log::debug!("Cannot infer list field: {err}");
            return Err(err);
        }

        let item = self
            .infer(ITEM_NAME, &element.resolve(), &SeenTypes::default(), 1)
            .inspect_err(|err| log::debug!("Cannot infer list field: {err}"))?;

        Ok(Field::list("", item))
    }

    /// Infers the schema node of `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if no schema can be inferred for `T`.
    pub fn infer_data_type<T: Describe + ?Sized>(&self) -> Result<SchemaNode> {
        self.infer_data_type_of(TypeHandle::of::<T>())
    }

    /// Infers the schema node of the type behind a handle.
    ///
    /// # Errors
    ///
    /// Returns an error if no schema can be inferred for the type.
    pub fn infer_data_type_of(&self, ty: TypeHandle) -> Result<SchemaNode> {
        self.infer_field_of(ty).map(Field::into_node)
    }

    /// Gets the schema node of `T`, or [`None`] if it can't be inferred.
    #[must_use]
    pub fn data_type<T: Describe + ?Sized>(&self) -> Option<SchemaNode> {
        self.data_type_of(TypeHandle::of::<T>())
    }

    /// Gets the schema node of the type behind a handle, or [`None`] if it
    /// can't be inferred.
    #[must_use]
    pub fn data_type_of(&self, ty: TypeHandle) -> Option<SchemaNode> {
        self.infer_data_type_of(ty).ok()
    }

    fn infer_root(&self, desc: &TypeDesc) -> Result<Field> {
        log::debug!("Inferring schema of {}", desc.type_name());
        self.infer("", desc, &SeenTypes::default(), 0)
            .inspect_err(|err| log::debug!("Cannot infer schema of {}: {err}", desc.type_name()))
    }

    fn infer(&self, name: &str, desc: &TypeDesc, seen: &SeenTypes, depth: usize) -> Result<Field> {
        if depth > self.config.max_depth {
            return Err(SchemaError::DepthExceeded {
                ty: desc.type_name(),
                limit: self.config.max_depth,
                seen: seen.names(),
            });
        }

        let field = match desc.kind() {
            TypeKind::Primitive(p) => Field::new(name, scalar(p), false),
            TypeKind::Boxed(p) => Field::new(name, scalar(p), true),
            TypeKind::BigDecimal => Field::new(name, table::BIG_DECIMAL, true),
            TypeKind::BigInteger => Field::new(name, table::BIG_INTEGER, true),
            TypeKind::Date => Field::new(name, table::DATE, true),
            TypeKind::Timestamp => Field::new(name, table::TIMESTAMP, true),
            TypeKind::Text | TypeKind::Enum => Field::new(name, SchemaNode::Utf8, true),
            // collections are lists even if they also have record members
            TypeKind::Array(elem) | TypeKind::Iterable(elem) => {
                let item = self.infer(ITEM_NAME, &elem.resolve(), seen, depth + 1)?;
                Field::list(name, item)
            },
            TypeKind::Map { key, value } => {
                let key = self
                    .infer(KEY_NAME, &key.resolve(), seen, depth + 1)?
                    .with_nullable(false);
                let value = self.infer(VALUE_NAME, &value.resolve(), seen, depth + 1)?;
                Field::map(name, key, value)
            },
            TypeKind::Other => match desc.members() {
                Some(members) => self.infer_struct(name, desc, members, seen, depth)?,
                None => {
                    return Err(SchemaError::UnsupportedType {
                        ty: desc.type_name(),
                        field: name.to_owned(),
                        seen: seen.names(),
                    });
                },
            },
        };

        log::trace!("Resolved {:?} of {} as {}", name, desc.type_name(), field.node());
        Ok(field)
    }

    fn infer_struct(
        &self,
        name: &str,
        desc: &TypeDesc,
        members: Vec<Member>,
        seen: &SeenTypes,
        depth: usize,
    ) -> Result<Field> {
        if seen.contains(desc) {
            return Err(SchemaError::CircularReference {
                ty: desc.type_name(),
                seen: seen.names(),
            });
        }

        let seen = seen.with(desc);
        let mut fields: Vec<Field> = Vec::with_capacity(members.len());

        for member in members {
            let member_name = to_snake_case(member.name());
            if member_name.is_empty() {
                return Err(SchemaError::UnnamedMember {
                    ty: desc.type_name(),
                    seen: seen.names(),
                });
            }

            if fields.iter().any(|f| f.name() == member_name) {
                return Err(SchemaError::DuplicateField {
                    ty: desc.type_name(),
                    field: member_name.into_owned(),
                });
            }

            let field = self.infer(&member_name, &member.ty().resolve(), &seen, depth + 1)?;
            fields.push(field);
        }

        Ok(Field::structure(name, fields))
    }
}

fn scalar(primitive: Primitive) -> SchemaNode {
    SchemaNode::Scalar(table::scalar(primitive))
}
