use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

use indexmap::{IndexMap, IndexSet};

use super::{Describe, Primitive, TypeDesc};

macro_rules! impl_primitive {
    ($($Ty:ty => $Prim:ident),* $(,)?) => { $(
        impl Describe for $Ty {
            fn describe() -> TypeDesc {
                TypeDesc::primitive::<Self>(Primitive::$Prim)
            }
        }
    )* };
}

macro_rules! impl_kind {
    ($ctor:ident: $($Ty:ty),* $(,)?) => { $(
        impl Describe for $Ty {
            fn describe() -> TypeDesc {
                TypeDesc::$ctor::<Self>()
            }
        }
    )* };
}

macro_rules! impl_well_known {
    ($($Ty:ty => $Kind:ident),* $(,)?) => { $(
        impl Describe for $Ty {
            fn describe() -> TypeDesc {
                TypeDesc::new::<Self>(super::TypeKind::$Kind)
            }
        }
    )* };
}

macro_rules! impl_transparent {
    ($($Ptr:ident)*) => { $(
        impl<T: Describe + ?Sized> Describe for $Ptr<T> {
            fn describe() -> TypeDesc {
                T::describe()
            }
        }
    )* };
}

macro_rules! impl_iterable {
    ($($Coll:ident $(<$S:ident>)?)*) => { $(
        impl<T: Describe $(, $S: 'static)?> Describe for $Coll<T $(, $S)?> {
            fn describe() -> TypeDesc {
                TypeDesc::iterable::<Self, T>()
            }
        }
    )* };
}

macro_rules! impl_map {
    ($($Map:ident $(<$S:ident>)?)*) => { $(
        impl<K: Describe, V: Describe $(, $S: 'static)?> Describe for $Map<K, V $(, $S)?> {
            fn describe() -> TypeDesc {
                TypeDesc::map::<Self, K, V>()
            }
        }
    )* };
}

impl_primitive!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);

impl_kind!(text: String, str);

// no signed counterpart exists in the model
impl_kind!(unsupported: u8, u16, u32, u64, u128, usize, i128, isize, char, ());

impl_well_known!(
    chrono::NaiveDate => Date,
    chrono::NaiveDateTime => Timestamp,
    chrono::DateTime<chrono::Utc> => Timestamp,
    SystemTime => Timestamp,
);

#[cfg(feature = "rust_decimal")]
impl_well_known!(rust_decimal::Decimal => BigDecimal);

#[cfg(feature = "num-bigint")]
impl_well_known!(num_bigint::BigInt => BigInteger);

impl_transparent!(Box Arc Rc);

impl_iterable!(Vec VecDeque LinkedList BTreeSet BinaryHeap HashSet<S> IndexSet<S>);
impl_map!(BTreeMap HashMap<S> IndexMap<S>);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDesc {
        T::describe().boxed()
    }
}

impl<T: Describe + ?Sized> Describe for &'static T {
    fn describe() -> TypeDesc {
        T::describe()
    }
}

impl<B> Describe for Cow<'static, B>
where
    B: Describe + ToOwned + ?Sized,
    B::Owned: 'static,
{
    fn describe() -> TypeDesc {
        B::describe()
    }
}

impl<T: Describe> Describe for [T] {
    fn describe() -> TypeDesc {
        TypeDesc::array::<Self, T>()
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDesc {
        TypeDesc::array::<Self, T>()
    }
}
