use std::fmt;
use std::slice;

use serde::Serialize;

use crate::model::{Field, assert_unique_names, write_fields};

/// An ordered list of top-level fields.
///
/// For a record type, these are the record's members. For any other type, the
/// schema holds exactly one unnamed field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Creates a schema from its top-level fields.
    ///
    /// # Panics
    ///
    /// Panics if a field name appears more than once.
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        assert_unique_names(&fields);
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Finds a top-level field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Gets the wire position of a top-level field.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Field> {
        self.fields.iter()
    }

    #[must_use]
    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Field;
    type IntoIter = slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Schema {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Schema<")?;
        write_fields(f, &self.fields)?;
        f.write_str(">")
    }
}
