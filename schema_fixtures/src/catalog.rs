//! The reference types other language ports compare their schemas against.
//!
//! Each port defines the equivalent of these types and must infer exactly the
//! same schema for them.

#![allow(dead_code, reason = "the types are only described, never built")]

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use row_schema::{Describe, TypeHandle};
use rust_decimal::Decimal;

/// A named reference type.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub name: &'static str,
    pub ty: TypeHandle,
    /// Whether the members become the top-level fields.
    pub as_struct: bool,
}

impl Fixture {
    fn record<T: Describe>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeHandle::of::<T>(),
            as_struct: true,
        }
    }

    fn value<T: Describe + ?Sized>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeHandle::of::<T>(),
            as_struct: false,
        }
    }
}

/// Gets every reference type, in output order.
pub fn fixtures() -> Vec<Fixture> {
    vec![
        Fixture::record::<Entry>("entry"),
        Fixture::record::<Primitives>("primitives"),
        Fixture::record::<BoxedPrimitives>("boxed_primitives"),
        Fixture::record::<Foo>("foo"),
        Fixture::record::<Contact>("contact"),
        Fixture::record::<Ledger>("ledger"),
        Fixture::value::<Vec<Vec<i32>>>("nested_list"),
        Fixture::value::<BTreeMap<String, Vec<Bar>>>("map_of_lists"),
    ]
}

/// Finds the fixtures with the given names, keeping the order of `names`.
///
/// An empty `names` selects every fixture.
///
/// # Errors
///
/// Returns the first name that doesn't refer to a fixture.
pub fn select<'a>(fixtures: &'a [Fixture], names: &'a [String]) -> Result<Vec<Fixture>, &'a str> {
    if names.is_empty() {
        return Ok(fixtures.to_vec());
    }

    names
        .iter()
        .map(|name| {
            fixtures
                .iter()
                .find(|f| f.name == name.as_str())
                .copied()
                .ok_or(name.as_str())
        })
        .collect()
}

#[derive(Describe)]
struct Entry {
    id: i64,
    tags: Vec<String>,
    scores: HashMap<String, Option<f64>>,
}

#[derive(Describe)]
struct Primitives {
    bool_value: bool,
    byte_value: i8,
    short_value: i16,
    int_value: i32,
    long_value: i64,
    float_value: f32,
    double_value: f64,
}

#[derive(Describe)]
struct BoxedPrimitives {
    bool_value: Option<bool>,
    byte_value: Option<i8>,
    short_value: Option<i16>,
    int_value: Option<i32>,
    long_value: Option<i64>,
    float_value: Option<f32>,
    double_value: Option<f64>,
}

#[derive(Describe)]
struct Foo {
    f1: Option<i32>,
    f2: String,
    f3: Vec<String>,
    f4: HashMap<String, Option<i32>>,
    f5: Bar,
}

#[derive(Describe)]
struct Bar {
    f1: Option<i32>,
    f2: String,
}

#[derive(Describe)]
struct Contact {
    #[record(rename = "fullName")]
    full_name: String,
    #[record(rename = "phoneNumbers")]
    phone_numbers: Vec<String>,
    #[record(rename = "homeAddress")]
    home_address: Option<Box<Address>>,
    kind: ContactKind,
}

#[derive(Describe)]
struct Address {
    street: String,
    #[record(rename = "postalCode")]
    postal_code: String,
}

#[derive(Describe)]
enum ContactKind {
    Person,
    Company,
}

#[derive(Describe)]
struct Ledger {
    opened: NaiveDate,
    updated: NaiveDateTime,
    balance: Decimal,
    history: Vec<[i64; 2]>,
}

#[cfg(test)]
mod tests {
    use row_schema::{TypeInference, infer_schema_of};

    use super::*;

    #[test]
    fn all_fixtures_infer() {
        let inference = TypeInference::default();
        for fixture in fixtures() {
            inference
                .infer_schema_of(fixture.ty, fixture.as_struct)
                .unwrap_or_else(|e| panic!("fixture `{}` must infer: {e}", fixture.name));
        }
    }

    #[test]
    fn unique_names() {
        let fixtures = fixtures();
        for (index, fixture) in fixtures.iter().enumerate() {
            assert!(
                fixtures[..index].iter().all(|f| f.name != fixture.name),
                "fixture name `{}` is duplicated",
                fixture.name
            );
        }
    }

    #[test]
    fn select_by_name() {
        let fixtures = fixtures();
        let names = ["ledger".to_owned(), "entry".to_owned()];
        let selected = select(&fixtures, &names).expect("both exist");

        let selected: Vec<_> = selected.iter().map(|f| f.name).collect();
        assert_eq!(selected, ["ledger", "entry"], "order of the names is kept");

        let names = ["entry".to_owned(), "nope".to_owned()];
        assert_eq!(select(&fixtures, &names).map(|_| ()), Err("nope"), "unknown name");
    }

    #[test]
    fn contact_schema() {
        let fixture = fixtures()
            .into_iter()
            .find(|f| f.name == "contact")
            .expect("contact exists");

        let schema = infer_schema_of(fixture.ty, true).expect("contact must infer");
        assert_eq!(
            schema.to_string(),
            "Schema<full_name: Utf8, phone_numbers: List<item: Utf8>, \
             home_address: Struct<street: Utf8, postal_code: Utf8>, kind: Utf8>",
            "contact schema"
        );
    }

    #[test]
    fn ledger_schema() {
        let fixture = fixtures()
            .into_iter()
            .find(|f| f.name == "ledger")
            .expect("ledger exists");

        let schema = infer_schema_of(fixture.ty, true).expect("ledger must infer");
        assert_eq!(
            schema.to_string(),
            "Schema<opened: Date(Day), updated: Timestamp(Microsecond), \
             balance: Decimal(38, 18), history: List<item: List<item: Int64 not null>>>",
            "ledger schema"
        );
    }
}
