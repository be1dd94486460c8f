#![allow(dead_code, reason = "these types only exist to be described")]

use std::any::type_name;
use std::collections::{BTreeMap, HashMap};
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap as _;
use log as _;
use row_schema::model::{ScalarKind, Temporal};
use row_schema::{
    Describe, Field, InferenceConfig, ScalarType, SchemaError, SchemaNode, TypeInference,
    infer_field, infer_schema, infer_type_name,
};
use row_schema_macros as _;
use serde as _;
use serde_json as _;
use thiserror as _;
use toml as _;

#[derive(Describe)]
struct Entry {
    id: i64,
    tags: Vec<String>,
    scores: HashMap<String, Option<f64>>,
}

#[derive(Describe)]
struct Node {
    value: i32,
    next: Option<Box<Node>>,
}

#[derive(Describe)]
struct Parent {
    name: String,
    child: Option<Box<Child>>,
}

#[derive(Describe)]
struct Child {
    parents: Vec<Parent>,
}

#[derive(Describe)]
struct Leaf {
    value: i32,
}

#[derive(Describe)]
struct Diamond {
    left: Leaf,
    right: Leaf,
    more: Vec<Leaf>,
}

#[derive(Describe)]
#[record(iterable = "String")]
struct Tags {
    count: i32,
}

#[derive(Describe)]
struct Ordered {
    zeta: i8,
    alpha: i16,
    mu: bool,
}

#[derive(Describe)]
enum Color {
    Red,
    Green,
}

#[derive(Describe)]
struct Annotated {
    #[record(rename = "displayName")]
    name: String,
    #[record(skip)]
    _cache: u64,
    r#type: Color,
    #[allow(non_snake_case)]
    lastSeen: Option<NaiveDateTime>,
}

#[derive(Describe)]
struct Wrapper<T> {
    inner: T,
    items: Vec<T>,
}

#[derive(Describe)]
struct Holder {
    count: u32,
}

#[derive(Describe)]
struct Dates {
    day: NaiveDate,
    at: DateTime<Utc>,
}

#[derive(Describe)]
struct Amounts {
    exact: num_bigint::BigInt,
    money: rust_decimal::Decimal,
}

#[derive(Describe)]
struct Deep {
    grid: Vec<Vec<Vec<i32>>>,
}

fn scalar_of(field: &Field) -> ScalarType {
    field
        .node()
        .as_scalar()
        .unwrap_or_else(|| panic!("{field} must be a scalar"))
}

#[test]
fn primitive_fidelity() {
    let cases = [
        (infer_field::<i8>(), ScalarKind::Int, 8),
        (infer_field::<i16>(), ScalarKind::Int, 16),
        (infer_field::<i32>(), ScalarKind::Int, 32),
        (infer_field::<i64>(), ScalarKind::Int, 64),
        (infer_field::<f32>(), ScalarKind::Float, 32),
        (infer_field::<f64>(), ScalarKind::Float, 64),
        (infer_field::<bool>(), ScalarKind::Bool, 1),
    ];

    for (field, kind, width) in cases {
        let field = field.expect("primitives must infer");
        let scalar = scalar_of(&field);
        assert_eq!(scalar.kind(), kind, "kind of {field}");
        assert_eq!(scalar.bit_width(), width, "width of {field}");
        assert!(!field.is_nullable(), "primitive {field} must not be nullable");
    }

    let boxed = infer_field::<Option<i32>>().expect("boxed primitives must infer");
    assert_eq!(scalar_of(&boxed), ScalarType::Int32, "boxed scalar");
    assert!(boxed.is_nullable(), "boxed primitive must be nullable");
}

#[test]
fn map_key_is_never_nullable() {
    let field = infer_field::<BTreeMap<Option<i32>, Option<i32>>>().expect("map must infer");
    let (key, value) = field.node().map_entry().expect("must be a map");

    assert_eq!(key.name(), "key", "key name");
    assert_eq!(scalar_of(key), ScalarType::Int32, "key scalar");
    assert!(!key.is_nullable(), "key must not be nullable");

    assert_eq!(value.name(), "value", "value name");
    assert_eq!(scalar_of(value), ScalarType::Int32, "value scalar");
    assert!(value.is_nullable(), "value must be nullable");
}

#[test]
fn iterable_takes_precedence() {
    let field = infer_field::<Tags>().expect("tags must infer");
    assert_eq!(field.to_string(), ": List<item: Utf8>", "must infer as list");
}

#[test]
fn direct_cycle() {
    let err = infer_field::<Node>().expect_err("self-reference must fail");
    assert_eq!(
        err,
        SchemaError::CircularReference {
            ty: type_name::<Node>(),
            seen: vec![type_name::<Node>()],
        },
        "direct cycle"
    );
}

#[test]
fn indirect_cycle() {
    let err = infer_field::<Parent>().expect_err("indirect reference must fail");
    assert_eq!(
        err,
        SchemaError::CircularReference {
            ty: type_name::<Parent>(),
            seen: vec![type_name::<Parent>(), type_name::<Child>()],
        },
        "chain must list the types outermost first"
    );
}

#[test]
fn diamond_is_accepted() {
    let schema = infer_schema::<Diamond>(true).expect("reuse without cycle must infer");
    assert_eq!(
        schema.to_string(),
        "Schema<left: Struct<value: Int32 not null>, right: Struct<value: Int32 not null>, \
         more: List<item: Struct<value: Int32 not null>>>",
        "diamond"
    );
}

#[test]
fn struct_field_order() {
    let schema = infer_schema::<Ordered>(true).expect("ordered must infer");
    let names: Vec<_> = schema.iter().map(Field::name).collect();
    assert_eq!(names, ["zeta", "alpha", "mu"], "declaration order");
    assert_eq!(schema.index_of("mu"), Some(2), "position");
}

#[test]
fn end_to_end() {
    let schema = infer_schema::<Entry>(true).expect("entry must infer");

    assert_eq!(schema.len(), 3, "three members");
    assert_eq!(
        schema.to_string(),
        "Schema<id: Int64 not null, tags: List<item: Utf8>, \
         scores: Map<key: Utf8 not null, value: Float64>>",
        "entry schema"
    );

    let scores = schema.field("scores").expect("scores must exist");
    assert!(scores.is_nullable(), "map field is nullable");
}

#[test]
fn attributes_and_enums() {
    let schema = infer_schema::<Annotated>(true).expect("annotated must infer");
    assert_eq!(
        schema.to_string(),
        "Schema<display_name: Utf8, type: Utf8, last_seen: Timestamp(Microsecond)>",
        "renamed, skipped, raw, and enum members"
    );

    let color = infer_field::<Color>().expect("enums must infer");
    assert_eq!(color.node(), &SchemaNode::Utf8, "enum by name");
    assert!(color.is_nullable(), "enum is nullable");
}

#[test]
fn generic_records() {
    let schema = infer_schema::<Wrapper<i64>>(true).expect("wrapper must infer");
    assert_eq!(
        schema.to_string(),
        "Schema<inner: Int64 not null, items: List<item: Int64 not null>>",
        "generic member"
    );
}

#[test]
fn temporal() {
    let schema = infer_schema::<Dates>(true).expect("dates must infer");
    let day = schema.field("day").expect("day must exist");
    let at = schema.field("at").expect("at must exist");

    assert_eq!(day.node().as_temporal(), Some(Temporal::Date), "date");
    assert_eq!(at.node().as_temporal(), Some(Temporal::Timestamp), "timestamp");
    assert!(day.is_nullable() && at.is_nullable(), "temporal values are nullable");
}

#[test]
fn system_time() {
    let field = infer_field::<Option<SystemTime>>().expect("system time must infer");
    assert_eq!(field.node().as_temporal(), Some(Temporal::Timestamp), "timestamp");
    assert!(field.is_nullable(), "timestamp is nullable");
}

#[test]
fn arbitrary_precision() {
    let schema = infer_schema::<Amounts>(true).expect("amounts must infer");
    let exact = schema.field("exact").expect("exact must exist");
    let money = schema.field("money").expect("money must exist");

    assert_eq!(exact.node().as_decimal(), Some((38, 0)), "big integer");
    assert_eq!(money.node().as_decimal(), Some((38, 18)), "big decimal");
    assert!(exact.is_nullable() && money.is_nullable(), "decimals are nullable");
    assert_eq!(
        schema.to_string(),
        "Schema<exact: Decimal(38, 0), money: Decimal(38, 18)>",
        "amounts schema"
    );
}

#[test]
fn unsupported_scalars() {
    let cases = [
        (infer_field::<u8>(), "u8"),
        (infer_field::<usize>(), "usize"),
        (infer_field::<i128>(), "i128"),
        (infer_field::<char>(), "char"),
        (infer_field::<()>(), "()"),
    ];

    for (res, ty) in cases {
        let err = res.expect_err("no schema counterpart");
        assert!(
            matches!(&err, SchemaError::UnsupportedType { ty: t, .. } if *t == ty),
            "unexpected error for {ty}: {err:?}"
        );
    }
}

#[test]
fn unsupported_member() {
    let err = infer_field::<Holder>().expect_err("u32 must be rejected");
    assert_eq!(
        err,
        SchemaError::UnsupportedType {
            ty: "u32",
            field: "count".to_owned(),
            seen: vec![type_name::<Holder>()],
        },
        "unsupported member"
    );
}

#[test]
fn depth_guard() {
    let inference = TypeInference::new(InferenceConfig::default().with_max_depth(3));
    let err = inference
        .infer_field::<Deep>()
        .expect_err("four levels must exceed the limit");

    assert_eq!(
        err,
        SchemaError::DepthExceeded {
            ty: "i32",
            limit: 3,
            seen: vec![type_name::<Deep>()],
        },
        "depth guard"
    );

    infer_field::<Deep>().expect("default depth must be enough");
}

#[test]
fn type_names() {
    assert_eq!(infer_type_name::<Vec<Vec<i32>>>(), "VecVec", "nested vec");
    assert_eq!(infer_type_name::<i32>(), "", "scalar");
    assert_eq!(infer_type_name::<HashMap<String, Vec<Leaf>>>(), "MapVec", "map of vec");
    assert_eq!(infer_type_name::<Entry>(), "", "record");
}

#[test]
fn concurrent_inference() {
    let expected = infer_schema::<Entry>(true).expect("entry must infer");

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| infer_schema::<Entry>(true)))
            .collect();

        for handle in handles {
            let schema = handle
                .join()
                .expect("thread must not panic")
                .expect("entry must infer");
            assert_eq!(schema, expected, "every thread must see the same schema");
        }
    });
}
