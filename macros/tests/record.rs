//! Expansion tests for the `Record` derive.

use mcart_codec::{ByteOrder, Record, RecordLayout, Shape};

#[derive(Record)]
#[allow(dead_code)]
struct Named {
    #[record(big_endian)]
    a: u32,
    #[record(little_endian)]
    b: i16,
    c: bool,
}

#[derive(Record)]
#[allow(dead_code)]
struct Tuple(u8, #[record(big_endian)] u64);

#[derive(Record)]
struct Unit;

#[derive(Record)]
#[allow(dead_code)]
struct Labeled {
    #[record(size = 12)]
    name: String,
}

#[derive(Record)]
#[allow(dead_code)]
struct Wrapper {
    #[record(big_endian)]
    inner: Named,
}

#[test]
fn test_named_fields() {
    let fields = Named::fields();
    let names: Vec<_> = fields.iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    let orders: Vec<_> = fields.iter().map(|f| f.order).collect();
    assert_eq!(
        orders,
        vec![ByteOrder::Big, ByteOrder::Little, ByteOrder::Native]
    );
    assert_eq!(Named::NAME, "Named");
}

#[test]
fn test_tuple_fields() {
    let layout = RecordLayout::resolve::<Tuple>().unwrap();
    assert_eq!(layout.size(), 9);
    assert_eq!(layout.fields()[0].name(), "0");
    assert_eq!(layout.fields()[1].name(), "1");
    assert_eq!(layout.fields()[1].order(), ByteOrder::Big);
}

#[test]
fn test_unit_has_no_fields() {
    assert!(Unit::fields().is_empty());
    assert!(RecordLayout::resolve::<Unit>().is_err());
}

#[test]
fn test_sized_string() {
    let fields = Labeled::fields();
    assert!(matches!(fields[0].shape, Shape::Text(12)));
    assert_eq!(fields[0].size, Some(12));
    assert_eq!(Named::fields()[0].size, None);
}

#[test]
fn test_nested_shape() {
    let fields = Wrapper::fields();
    assert!(matches!(fields[0].shape, Shape::Nested { record: "Named", .. }));
    assert_eq!(fields[0].shape.leaves(), 3);
}
