#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn Error___display___includes_code_and_message() {
    let err = Error::new(Code::Unimplemented, "method Greet not implemented");

    assert_eq!(err.to_string(), "unimplemented: method Greet not implemented");
}

#[test]
fn Error___internal___uses_internal_code() {
    let err = Error::internal("boom");

    assert_eq!(err.code(), Code::Internal);
    assert_eq!(err.message(), "boom");
}

#[test]
fn Error___from_decode_error___is_invalid_argument() {
    let decode_err = <String as prost::Message>::decode(&[0xff_u8][..]).unwrap_err();

    let err: Error = decode_err.into();

    assert_eq!(err.code(), Code::InvalidArgument);
}

#[test_case(Code::Ok)]
#[test_case(Code::Canceled)]
#[test_case(Code::Unknown)]
#[test_case(Code::InvalidArgument)]
#[test_case(Code::NotFound)]
#[test_case(Code::ResourceExhausted)]
#[test_case(Code::Unimplemented)]
#[test_case(Code::Internal)]
#[test_case(Code::Unauthenticated)]
fn Code___from_u32___inverts_as_u32(code: Code) {
    assert_eq!(Code::from_u32(code.as_u32()), code);
}

#[test_case(2)]
#[test_case(17)]
#[test_case(u32::MAX)]
fn Code___from_u32___unrecognized_values_are_unknown(value: u32) {
    assert_eq!(Code::from_u32(value), Code::Unknown);
}

#[test]
fn Code___numbering___matches_grpc() {
    assert_eq!(Code::Unimplemented.as_u32(), 12);
    assert_eq!(Code::Internal.as_u32(), 13);
    assert_eq!(Code::Unauthenticated.as_u32(), 16);
}
