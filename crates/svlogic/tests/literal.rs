use proptest::prelude::*;
use svlogic::{
    BigUint, Bit, FormatSpec, FormatSpecError, Literal, LiteralError, Logic, Radix, decimal_digits,
    natural_width,
};
use test_case::test_case;

type U20 = Bit<19>;
type I20 = Bit<19, 0, true>;
type U100 = Bit<99, 0, false, 2>;
type U120 = Bit<119, 0, false, 2>;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test_case("8'hff", 0xff        ; "sized hex")]
#[test_case("8'HFF", 0xff        ; "upper case base")]
#[test_case("4'hFF", 0x0f        ; "sized literal truncates to its size")]
#[test_case("16'hde_ad", 0xdead  ; "underscore separator")]
#[test_case("'o17", 0o17         ; "unsized octal")]
#[test_case("12'd1234", 1234     ; "decimal")]
#[test_case("'b1010_1001", 0xa9  ; "unsized binary")]
#[test_case("'1", 0xffff         ; "unbased fill of ones")]
#[test_case("01", 0x3031         ; "bare text is raw bytes")]
fn parses_unsigned(text: &str, expected: u64) {
    assert_eq!(text.parse::<Bit<15>>().map(|v| v.to_u64()), Ok(expected), "{text}");
}

#[test]
fn signed_literal_sign_extends() {
    let v: Bit<15, 0, true> = "8'sh80".parse().unwrap();
    assert_eq!(v.to_i64(), -128);
    let v: Bit<15, 0, true> = "8'h80".parse().unwrap();
    assert_eq!(v.to_i64(), 128);
}

#[test]
fn unknown_digits_fill_literal_size() {
    assert_eq!(Logic::<7>::from("8'bx").to_string(), "xxxxxxxx");
    assert_eq!(Logic::<7>::from("8'bz1").to_string(), "zzzzzzz1");
    assert_eq!(Logic::<7>::from("4'bx1").to_string(), "0000xxx1");
    assert_eq!(Logic::<99, 0, false, 2>::from("'x"), Logic::x());
}

#[test]
fn unsized_unknown_digits_fill_target() {
    assert_eq!(Logic::<7>::from("'bx1").to_string(), "xxxxxxx1");
    assert_eq!(Logic::<7>::from("'hz").to_string(), "zzzzzzzz");
    assert_eq!(Logic::<11>::from("'hx5").to_string(), "xxxxxxxx0101");
    assert_eq!(Logic::<7>::from("'b1x").to_string(), "0000001x", "leading known digit zero-fills");
}

#[test]
fn wide_decimal() {
    let v: Bit<127, 0, false, 2> = "128'd340282366920938463463374607431768211455".parse().unwrap();
    assert!(v.all_set());
    assert_eq!(U100::from("'1"), U100::ones());
}

#[test]
fn lenient_parse_skips_invalid_digits() {
    assert_eq!(Bit::<7>::from("4'b1021").to_u64(), 0b101);
    assert_eq!(Bit::<7>::from("zz'h12").to_u64(), 0x12);
    assert!(Bit::<7>::from("").is_zero());
}

#[test_case("4'b102", LiteralError::InvalidDigit { digit: '2', radix: Radix::Binary } ; "bad binary digit")]
#[test_case("8'dx", LiteralError::UnknownInDecimal ; "x in decimal")]
#[test_case("8'q1", LiteralError::InvalidBase('q')  ; "unknown base")]
#[test_case("x'h1", LiteralError::InvalidSize("x".to_owned()) ; "bad size")]
#[test_case("8'h", LiteralError::Empty               ; "no digits")]
#[test_case("", LiteralError::Empty                  ; "empty text")]
fn strict_parse_errors(text: &str, expected: LiteralError) {
    assert_eq!(text.parse::<Logic<7>>(), Err(expected));
}

#[test]
fn literal_header() {
    let lit = Literal::split("12'sd42").unwrap();
    assert_eq!(lit.size, Some(12));
    assert!(lit.signed);
    assert_eq!(lit.radix, Radix::Decimal);
    assert_eq!(lit.digits, "42");

    let lit = Literal::split("'z").unwrap();
    assert!(lit.fill);
    assert_eq!(lit.size, None);
}

// ---------------------------------------------------------------------------
// Format specifiers
// ---------------------------------------------------------------------------

#[test]
fn format_spec_parse() {
    assert_eq!("10d".parse(), Ok(FormatSpec::new(Radix::Decimal).with_width(10)));
    assert_eq!("x".parse(), Ok(FormatSpec::new(Radix::Hex)));
    assert_eq!("4q".parse::<FormatSpec>(), Err(FormatSpecError::UnknownBase('q')));
    assert_eq!("hx".parse::<FormatSpec>(), Err(FormatSpecError::UnknownBase('x')));
    assert_eq!(FormatSpec::lenient("hx"), FormatSpec::new(Radix::Hex));
    assert_eq!(FormatSpec::lenient("zz"), FormatSpec::BINARY);
    assert_eq!(FormatSpec::default(), FormatSpec::BINARY);
}

#[test]
fn natural_widths() {
    assert_eq!(natural_width(Radix::Binary, 20), 20);
    assert_eq!(natural_width(Radix::Octal, 120), 40);
    assert_eq!(natural_width(Radix::Hex, 120), 30);
    assert_eq!(natural_width(Radix::Str, 120), 15);
    assert_eq!(natural_width(Radix::Decimal, 120), 37);
    assert_eq!(decimal_digits(20), 7);
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[test]
fn decimal_padding() {
    let v = U20::from("'b1010_1001");
    assert_eq!(v.format("0d"), "169");
    assert_eq!(v.format("d"), "    169");
    assert_eq!(v.format("10d"), "       169");
}

#[test]
fn negative_decimal() {
    let v = -I20::from("'d42");
    assert_eq!(v.format("0d"), "-42");
    assert_eq!(v.format("d"), "     -42");
    assert_eq!(v.format("10d"), "        -42");
    assert_eq!(Bit::<199, 0, true, 4>::from_i64(-1).format("0d"), "-1");
}

#[test]
fn decimal_beyond_inline_scratch() {
    // 300 bits fit the inline limb buffer; 1000 bits spill to the heap.
    let big = (BigUint::from(1u8) << 299) + BigUint::from(12_345u32);
    assert_eq!(Bit::<299, 0, false, 5>::from_biguint(&big).format("0d"), big.to_string());

    let all: BigUint = (BigUint::from(1u8) << 1000) - BigUint::from(1u8);
    let v = Bit::<999, 0, false, 16>::ones();
    assert_eq!(v.format("d"), all.to_string());
    assert_eq!(v.format("d").len(), decimal_digits(1000));
    assert_eq!((-Bit::<999, 0, true, 16>::from_u64(12_345)).format("0d"), "-12345");
}

#[test]
fn hex_at_natural_width() {
    let v = U20::from("'d42");
    assert_eq!(v.format("x"), "0002a");
    assert_eq!(v.format("0x"), "2a");
    assert_eq!(v.format("8h"), "0000002a");
    assert_eq!(v.format("b"), "00000000000000101010");
    assert_eq!(U20::ZERO.format("0x"), "0");
}

#[test]
fn wide_formats() {
    let v = U120::from("'hFFFFFFFFFFFF");
    assert_eq!(v.format("o"), format!("{}{}", "0".repeat(24), "7".repeat(16)));
    assert_eq!(v.format("X"), format!("{}{}", "0".repeat(18), "f".repeat(12)));
    let decimal = v.format("d");
    assert_eq!(decimal.len(), 37);
    assert_eq!(decimal.trim_start(), "281474976710655");
}

#[test]
fn string_format_keeps_low_bytes() {
    let v = U120::from("ABCDEFGHIJKLMNOPQRST");
    assert_eq!(v.format("s"), "FGHIJKLMNOPQRST");
    assert_eq!(Bit::<23>::from("hi").format("s"), " hi");
}

#[test]
fn unknown_digits_in_output() {
    let v = Logic::<7>::from("8'hz5");
    assert_eq!(v.format("h"), "z5");
    assert_eq!(Logic::<7>::from("8'b1x01zz00").format("h"), "XZ");
    assert_eq!(Logic::<7>::from("8'b1x01zz00").format("o"), "XZZ");
    assert_eq!(Logic::<7>::x().format("0d"), "x");
    assert_eq!(Logic::<7>::x().format("d"), "  x");
    assert_eq!(Logic::<7>::z().format("0d"), "z");
    assert_eq!(Logic::<7>::from("8'b1x000000").format("0d"), "X");
    assert_eq!(Logic::<7>::from("8'b1z000000").format("0d"), "Z");
}

#[test]
fn debug_forms() {
    assert_eq!(format!("{:?}", Logic::<3>::from("4'b10x0")), "Logic(4'b10x0)");
    assert_eq!(format!("{:?}", Logic::<3, 0, true>::from("4'sb1z00")), "Logic(4'sb1z00)");
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn formatted_text_parses_back(raw in any::<u128>()) {
        let v = U100::from_u128(raw);
        for base in ['b', 'o', 'd', 'h'] {
            let text = format!("100'{base}{}", v.format(&base.to_string()));
            prop_assert_eq!(text.parse::<U100>(), Ok(v), "{}", text);
        }
    }
}
