//! SystemVerilog literal text codec.
//!
//! Accepted input: `[<size>]'[s]<base><digits>` with base `b`, `o`, `d`, `h`
//! or `s` (raw packed bytes), the unbased fills `'0`, `'1`, `'x`, `'z`, and
//! bare text without a `'`, which is read as raw packed bytes. `_` separates
//! digits in every base except raw bytes.

mod error;
mod format;

use std::fmt;

use log::debug;

pub use error::{FormatSpecError, LiteralError};
pub use format::{FormatSpec, decimal_digits, format_planes, natural_width};

use crate::limbs::{bit_at, fill_ones, mask_off, mul_add_small, write_bits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hex,
    /// Raw packed bytes, last character in the least significant byte.
    Str,
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Radix::Binary => "binary",
            Radix::Octal => "octal",
            Radix::Decimal => "decimal",
            Radix::Hex => "hexadecimal",
            Radix::Str => "string",
        };
        f.write_str(name)
    }
}

impl Radix {
    /// Base letter of a literal (`'h`, `'B`, ...).
    pub fn from_base_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'b' => Some(Radix::Binary),
            'o' => Some(Radix::Octal),
            'd' => Some(Radix::Decimal),
            'h' => Some(Radix::Hex),
            's' => Some(Radix::Str),
            _ => None,
        }
    }

    /// Base letter of a format specifier; `x` is accepted as hex.
    pub fn from_format_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Radix::Hex),
            other => Self::from_base_letter(other),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Radix::Binary => 'b',
            Radix::Octal => 'o',
            Radix::Decimal => 'd',
            Radix::Hex => 'h',
            Radix::Str => 's',
        }
    }

    /// Bits per printed digit; decimal digits do not map to a bit group.
    pub fn group_bits(self) -> Option<usize> {
        match self {
            Radix::Binary => Some(1),
            Radix::Octal => Some(3),
            Radix::Hex => Some(4),
            Radix::Str => Some(8),
            Radix::Decimal => None,
        }
    }

    /// `(value, mask)` bits of one digit of a power-of-two base.
    fn decode(self, c: char) -> Option<(u64, u64)> {
        let (bits, base) = match self {
            Radix::Binary => (1, 2),
            Radix::Octal => (3, 8),
            Radix::Hex => (4, 16),
            Radix::Decimal | Radix::Str => return None,
        };
        let full = (1u64 << bits) - 1;
        match c {
            'x' | 'X' => Some((0, full)),
            'z' | 'Z' | '?' => Some((full, full)),
            _ => c.to_digit(base).map(|d| (u64::from(d), 0)),
        }
    }
}

/// Header of a literal split from its digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'a> {
    pub size: Option<usize>,
    pub signed: bool,
    pub radix: Radix,
    /// Unbased fill (`'0`, `'1`, `'x`, `'z`): the single digit covers every bit.
    pub fill: bool,
    pub digits: &'a str,
}

impl<'a> Literal<'a> {
    pub fn split(text: &'a str) -> Result<Self, LiteralError> {
        Self::split_inner(text, true)
    }

    fn split_inner(text: &'a str, strict: bool) -> Result<Self, LiteralError> {
        let Some(tick) = text.find('\'') else {
            if text.is_empty() && strict {
                return Err(LiteralError::Empty);
            }
            return Ok(Self {
                size: None,
                signed: false,
                radix: Radix::Str,
                fill: false,
                digits: text,
            });
        };

        let size_text = text[..tick].trim();
        let size = if size_text.is_empty() {
            None
        } else {
            match size_text.parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ if strict => return Err(LiteralError::InvalidSize(size_text.to_owned())),
                _ => {
                    debug!("ignoring invalid size `{size_text}` in literal `{text}`");
                    None
                }
            }
        };

        let mut rest = text[tick + 1..].trim_start();
        let mut signed = false;
        let mut chars = rest.chars();
        if let (Some('s' | 'S'), Some(c)) = (chars.next(), chars.next()) {
            if matches!(c.to_ascii_lowercase(), 'b' | 'o' | 'd' | 'h') {
                signed = true;
                rest = &rest[1..];
            }
        }

        let Some(letter) = rest.chars().next() else {
            if strict {
                return Err(LiteralError::Empty);
            }
            return Ok(Self {
                size,
                signed,
                radix: Radix::Binary,
                fill: false,
                digits: "",
            });
        };
        if let Some(radix) = Radix::from_base_letter(letter) {
            return Ok(Self {
                size,
                signed,
                radix,
                fill: false,
                digits: &rest[letter.len_utf8()..],
            });
        }
        if size.is_none() && !signed && rest.len() == 1 && Radix::Binary.decode(letter).is_some() {
            return Ok(Self {
                size: None,
                signed: false,
                radix: Radix::Binary,
                fill: true,
                digits: rest,
            });
        }
        if strict {
            return Err(LiteralError::InvalidBase(letter));
        }
        debug!("literal `{text}` has no base letter; reading digits as binary");
        Ok(Self {
            size,
            signed,
            radix: Radix::Binary,
            fill: false,
            digits: rest,
        })
    }
}

/// Parse `text` into a value plane and an X/Z mask plane of `width` bits.
///
/// Both slices must hold at least `ceil(width / 64)` limbs. In lenient mode
/// (`strict == false`) invalid characters are skipped and the call never
/// fails.
pub fn parse_planes(
    text: &str,
    width: usize,
    value: &mut [u64],
    mask: &mut [u64],
    strict: bool,
) -> Result<(), LiteralError> {
    value.fill(0);
    mask.fill(0);
    let literal = Literal::split_inner(text, strict)?;

    if literal.fill {
        if let Some((v, m)) = literal.digits.chars().next().and_then(|c| Radix::Binary.decode(c)) {
            if v != 0 {
                fill_ones(value, 0, width);
            }
            if m != 0 {
                fill_ones(mask, 0, width);
            }
        }
        mask_off(value, width);
        mask_off(mask, width);
        return Ok(());
    }

    let scanned = match literal.radix {
        Radix::Decimal => scan_decimal(literal.digits, width, value, strict)?,
        Radix::Str => scan_bytes(literal.digits, width, value),
        radix => scan_grouped(radix, literal.digits, width, value, mask, strict)?,
    };
    if scanned.empty && strict {
        return Err(LiteralError::Empty);
    }
    if scanned.truncated {
        debug!("literal `{text}` truncated to {width} bits");
    }

    // A leading x/z digit extends through the literal's own size, or through
    // the whole target when the literal is unsized.
    if let Some((v, _)) = scanned.leading_unknown {
        let to = literal.size.map_or(width, |size| size.min(width));
        if scanned.bits < to {
            fill_ones(mask, scanned.bits, to);
            if v != 0 {
                fill_ones(value, scanned.bits, to);
            }
        }
    }
    if let Some(size) = literal.size {
        if size < width {
            mask_off(value, size);
            mask_off(mask, size);
            if literal.signed {
                let top = size - 1;
                if bit_at(mask, top) {
                    fill_ones(mask, size, width);
                }
                if bit_at(value, top) {
                    fill_ones(value, size, width);
                }
            }
        }
    }
    mask_off(value, width);
    mask_off(mask, width);
    Ok(())
}

struct Scanned {
    /// Bit position just past the most significant digit.
    bits: usize,
    /// Leftmost digit when it is entirely x or z.
    leading_unknown: Option<(u64, u64)>,
    truncated: bool,
    empty: bool,
}

fn scan_grouped(
    radix: Radix,
    digits: &str,
    width: usize,
    value: &mut [u64],
    mask: &mut [u64],
    strict: bool,
) -> Result<Scanned, LiteralError> {
    let group = radix.group_bits().unwrap_or(1);
    let mut pos = 0usize;
    let mut leftmost = None;
    let mut truncated = false;
    for c in digits.chars().rev() {
        if c == '_' || c.is_whitespace() {
            continue;
        }
        let Some((v, m)) = radix.decode(c) else {
            if strict {
                return Err(LiteralError::InvalidDigit { digit: c, radix });
            }
            debug!("ignoring `{c}` in {radix} literal");
            continue;
        };
        if pos >= width {
            truncated |= (v | m) != 0;
        } else {
            truncated |= pos + group > width && ((v | m) >> (width - pos)) != 0;
            write_bits(value, pos, v, group);
            write_bits(mask, pos, m, group);
        }
        leftmost = Some((v, m));
        pos += group;
    }
    let leading_unknown = leftmost.filter(|&(_, m)| m != 0);
    Ok(Scanned {
        bits: pos,
        leading_unknown,
        truncated,
        empty: leftmost.is_none(),
    })
}

fn scan_decimal(
    digits: &str,
    width: usize,
    value: &mut [u64],
    strict: bool,
) -> Result<Scanned, LiteralError> {
    let mut empty = true;
    for c in digits.chars() {
        match c {
            '_' => {}
            '0'..='9' => {
                mul_add_small(value, width, 10, u64::from(c as u8 - b'0'));
                empty = false;
            }
            'x' | 'X' | 'z' | 'Z' | '?' if strict => return Err(LiteralError::UnknownInDecimal),
            c if c.is_whitespace() => {}
            c if strict => {
                return Err(LiteralError::InvalidDigit {
                    digit: c,
                    radix: Radix::Decimal,
                });
            }
            c => debug!("ignoring `{c}` in decimal literal"),
        }
    }
    Ok(Scanned {
        bits: width,
        leading_unknown: None,
        truncated: false,
        empty,
    })
}

fn scan_bytes(digits: &str, width: usize, value: &mut [u64]) -> Scanned {
    let mut truncated = false;
    let bytes = digits.as_bytes();
    for (i, &b) in bytes.iter().rev().enumerate() {
        let pos = i * 8;
        if pos >= width {
            truncated |= b != 0;
            continue;
        }
        write_bits(value, pos, u64::from(b), 8);
    }
    Scanned {
        bits: bytes.len() * 8,
        leading_unknown: None,
        truncated,
        empty: bytes.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, width: usize) -> ([u64; 2], [u64; 2]) {
        let mut value = [0; 2];
        let mut mask = [0; 2];
        parse_planes(text, width, &mut value, &mut mask, false).unwrap();
        (value, mask)
    }

    #[test]
    fn split_header() {
        let lit = Literal::split("8'sh80").unwrap();
        assert_eq!(lit.size, Some(8));
        assert!(lit.signed);
        assert_eq!(lit.radix, Radix::Hex);
        assert_eq!(lit.digits, "80");
    }

    #[test]
    fn bare_text_is_raw_bytes() {
        let lit = Literal::split("01").unwrap();
        assert_eq!(lit.radix, Radix::Str);
        assert_eq!(parse("01", 16).0[0], 0x3031);
    }

    #[test]
    fn sized_unknown_extends() {
        let (value, mask) = parse("8'bx1", 16);
        assert_eq!(value[0], 0b1);
        assert_eq!(mask[0], 0b1111_1110);
    }

    #[test]
    fn unbased_fill() {
        let (value, mask) = parse("'1", 70);
        assert_eq!(value, [u64::MAX, 0x3F]);
        assert_eq!(mask, [0, 0]);
        let (_, mask) = parse("'z", 4);
        assert_eq!(mask[0], 0xF);
    }

    #[test]
    fn signed_literal_sign_extends() {
        let (value, _) = parse("4'sb1000", 8);
        assert_eq!(value[0], 0xF8);
        let (value, _) = parse("4'b1000", 8);
        assert_eq!(value[0], 0x08);
    }

    #[test]
    fn strict_rejects_bad_digits() {
        let mut value = [0; 1];
        let mut mask = [0; 1];
        assert_eq!(
            parse_planes("4'b102", 4, &mut value, &mut mask, true),
            Err(LiteralError::InvalidDigit {
                digit: '2',
                radix: Radix::Binary
            })
        );
        assert_eq!(
            parse_planes("8'dx", 8, &mut value, &mut mask, true),
            Err(LiteralError::UnknownInDecimal)
        );
        assert_eq!(
            parse_planes("8'q1", 8, &mut value, &mut mask, true),
            Err(LiteralError::InvalidBase('q'))
        );
        assert_eq!(
            parse_planes("8'h", 8, &mut value, &mut mask, true),
            Err(LiteralError::Empty)
        );
    }
}
