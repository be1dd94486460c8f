use syn::{Path, Type};

#[derive(Debug, darling::FromDeriveInput)]
#[darling(attributes(record))]
pub struct RecordArgs {
    #[darling(rename = "crate")]
    pub crate_: Option<Path>,
    pub iterable: Option<Type>,
}

/// All attributes on a field. Only `record` is of interest.
#[derive(Debug, darling::FromMeta)]
#[darling(allow_unknown_fields)]
pub struct FieldMeta {
    #[darling(multiple)]
    pub record: Vec<FieldRecordMeta>,
}

#[derive(Debug, Default, darling::FromMeta)]
pub struct FieldRecordMeta {
    pub rename: Option<String>,
    #[darling(default)]
    pub skip: bool,
}

impl FieldRecordMeta {
    pub fn merge(many: Vec<Self>) -> Self {
        let mut result = Self::default();
        for item in many {
            if item.rename.is_some() {
                result.rename = item.rename;
            }
            result.skip |= item.skip;
        }
        result
    }
}

pub struct MemberArgs<'a> {
    pub name: String,
    pub ty: &'a Type,
}
