#![cfg(feature = "serde")]

use svlogic::{Bit, Logic};

#[test]
fn bit_travels_as_sized_hex() {
    let v = Bit::<11>::from_u64(0xabc);
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, "\"12'habc\"");
    assert_eq!(serde_json::from_str::<Bit<11>>(&json).unwrap(), v);
}

#[test]
fn logic_keeps_unknown_bits() {
    let v = Logic::<3>::from("4'b1x0z");
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, "\"4'b1x0z\"");
    assert_eq!(serde_json::from_str::<Logic<3>>(&json).unwrap(), v);
}

#[test]
fn signed_values_survive() {
    let v = Bit::<99, 0, true, 2>::from_i64(-3);
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(serde_json::from_str::<Bit<99, 0, true, 2>>(&json).unwrap(), v);
}

#[test]
fn invalid_literal_is_rejected() {
    assert!(serde_json::from_str::<Bit<7>>("\"8'h1g\"").is_err());
    assert!(serde_json::from_str::<Bit<7>>("42").is_err());
}
