use crate::descriptor::{Describe, TypeHandle, TypeKind};
use crate::infer::TypeInference;

impl TypeInference {
    /// Synthesizes a name for the container shape of `T`.
    ///
    /// Collections contribute their simple name and maps contribute `Map`,
    /// outermost first. The name stops at the first array, record, or scalar,
    /// so `Vec<Vec<i32>>` is named `VecVec` and a bare scalar gets an empty
    /// name.
    ///
    /// Maps continue with their value type, or with their key type if the
    /// value is a record. If both are records, the name ends at the map.
    #[must_use]
    pub fn infer_type_name<T: Describe + ?Sized>(&self) -> String {
        self.infer_type_name_of(TypeHandle::of::<T>())
    }

    /// Synthesizes a name for the container shape of the type behind a handle.
    ///
    /// See [`TypeInference::infer_type_name`]. At most
    /// [`max_depth`](crate::InferenceConfig::max_depth) levels contribute to
    /// the name.
    #[must_use]
    pub fn infer_type_name_of(&self, ty: TypeHandle) -> String {
        let mut name = String::new();
        let mut desc = ty.resolve();

        for _ in 0..self.config().max_depth {
            desc = match desc.kind() {
                TypeKind::Iterable(elem) => {
                    name.push_str(desc.simple_name());
                    elem.resolve()
                },
                TypeKind::Map { key, value } => {
                    name.push_str("Map");

                    let value = value.resolve();
                    if !value.is_record() {
                        value
                    } else {
                        let key = key.resolve();
                        if key.is_record() {
                            break;
                        }

                        key
                    }
                },
                _ => break,
            };
        }

        log::trace!("Synthesized type name {name:?} for {}", ty.resolve().type_name());
        name
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap, HashSet};

    use crate::descriptor::{Member, Record, TypeDesc};
    use crate::{InferenceConfig, infer_type_name};

    use super::*;

    struct Point;

    impl Record for Point {
        fn members() -> Vec<Member> {
            vec![Member::new::<i32>("x"), Member::new::<i32>("y")]
        }
    }

    impl Describe for Point {
        fn describe() -> TypeDesc {
            TypeDesc::record::<Self>()
        }
    }

    #[test]
    fn nested_collections() {
        assert_eq!(infer_type_name::<Vec<Vec<i32>>>(), "VecVec", "vec of vec");
        assert_eq!(infer_type_name::<HashSet<Vec<String>>>(), "HashSetVec", "set of vec");
        assert_eq!(infer_type_name::<Vec<[i64; 2]>>(), "Vec", "arrays end the name");
        assert_eq!(infer_type_name::<Box<[Vec<i8>]>>(), "", "boxed slice");
    }

    #[test]
    fn scalars_and_records() {
        assert_eq!(infer_type_name::<i32>(), "", "scalar");
        assert_eq!(infer_type_name::<Option<String>>(), "", "text");
        assert_eq!(infer_type_name::<Point>(), "", "record");
        assert_eq!(infer_type_name::<Vec<Point>>(), "Vec", "vec of record");
    }

    #[test]
    fn maps() {
        assert_eq!(infer_type_name::<HashMap<String, Vec<i32>>>(), "MapVec", "value first");
        assert_eq!(infer_type_name::<BTreeMap<Vec<i32>, Point>>(), "MapVec", "key when value is record");
        assert_eq!(infer_type_name::<HashMap<Point, Point>>(), "Map", "both records");
    }

    #[test]
    fn bounded_by_depth() {
        let inference = TypeInference::new(InferenceConfig::default().with_max_depth(2));
        assert_eq!(
            inference.infer_type_name::<Vec<Vec<Vec<i32>>>>(),
            "VecVec",
            "name must stop at the depth limit"
        );
    }
}
