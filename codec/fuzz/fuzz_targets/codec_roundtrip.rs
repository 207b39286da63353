#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use mcart_codec::{Record, RecordExt};

#[derive(Arbitrary, Debug, Clone, PartialEq, Record)]
struct Inner {
    #[record(big_endian)]
    a: u16,
    b: i64,
}

#[derive(Arbitrary, Debug, Clone, PartialEq, Record)]
struct Outer {
    #[record(little_endian)]
    id: u32,
    #[record(big_endian)]
    value: f64,
    flag: bool,
    letter: char,
    digest: [u8; 8],
    #[record(big_endian)]
    inner: Inner,
    wide: i128,
}

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    Roundtrip(Outer),
    Decode(Vec<u8>),
}

fn roundtrip(value: Outer) {
    let encoded = value.encode().expect("Failed to encode a valid record!");
    assert_eq!(encoded.len(), Outer::layout().unwrap().size());
    let decoded = Outer::decode(encoded).expect("Failed to decode a successfully encoded input!");

    // NaN never compares equal, compare bit patterns instead
    assert_eq!(value.value.to_bits(), decoded.value.to_bits());
    assert_eq!(
        Outer {
            value: 0.0,
            ..value
        },
        Outer {
            value: 0.0,
            ..decoded
        }
    );
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Roundtrip(value) => roundtrip(value),
        FuzzInput::Decode(raw) => {
            let _ = Outer::decode(Bytes::from(raw));
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
