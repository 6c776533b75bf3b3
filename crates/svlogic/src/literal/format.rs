use std::fmt::Write;
use std::str::FromStr;

use log::trace;
use smallvec::{SmallVec, smallvec};

use super::{FormatSpecError, Radix};
use crate::limbs::{bit_at, div_small, limbs_for, mask_off, mul_add_small, top_mask, window};
use crate::packed::Planes;

/// Parsed `<width><base>` format specifier.
///
/// `width: None` prints the natural width of the radix, `Some(0)` suppresses
/// padding, and any other width is a minimum column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatSpec {
    pub width: Option<usize>,
    pub radix: Radix,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self::BINARY
    }
}

impl FormatSpec {
    pub const BINARY: Self = Self::new(Radix::Binary);

    pub const fn new(radix: Radix) -> Self {
        Self { width: None, radix }
    }

    pub const fn with_width(self, width: usize) -> Self {
        Self {
            width: Some(width),
            radix: self.radix,
        }
    }

    /// Like [`FromStr`], but falls back to binary on an unknown base letter
    /// and to the natural width on an unreadable width.
    pub fn lenient(spec: &str) -> Self {
        match spec.parse() {
            Ok(parsed) => parsed,
            Err(err) => {
                trace!("format spec `{spec}`: {err}; falling back");
                let spec = spec.trim();
                let split = spec
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(spec.len());
                let (digits, letters) = spec.split_at(split);
                let radix = letters
                    .chars()
                    .next()
                    .and_then(Radix::from_format_letter)
                    .unwrap_or(Radix::Binary);
                Self {
                    width: digits.parse().ok(),
                    radix,
                }
            }
        }
    }
}

impl FromStr for FormatSpec {
    type Err = FormatSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let spec = spec.trim();
        let split = spec
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(spec.len());
        let (digits, letters) = spec.split_at(split);
        let width = if digits.is_empty() {
            None
        } else {
            Some(
                digits
                    .parse()
                    .map_err(|_| FormatSpecError::InvalidWidth(digits.to_owned()))?,
            )
        };
        let mut chars = letters.chars();
        let radix = match chars.next() {
            None => Radix::Binary,
            Some(c) => Radix::from_format_letter(c).ok_or(FormatSpecError::UnknownBase(c))?,
        };
        if let Some(extra) = chars.next() {
            return Err(FormatSpecError::UnknownBase(extra));
        }
        Ok(Self { width, radix })
    }
}

// ─────────────────────────────────────────────────────────
//  Natural widths
// ─────────────────────────────────────────────────────────

const DECIMAL_TABLE_MAX: usize = 128;

const fn decimal_digit_table() -> [u8; DECIMAL_TABLE_MAX + 1] {
    let mut table = [0u8; DECIMAL_TABLE_MAX + 1];
    table[0] = 1;
    let mut width = 1;
    while width <= DECIMAL_TABLE_MAX {
        let mut v: u128 = if width == 128 {
            u128::MAX
        } else {
            (1u128 << width) - 1
        };
        let mut digits = 0u8;
        while v > 0 {
            v /= 10;
            digits += 1;
        }
        table[width] = digits;
        width += 1;
    }
    table
}

/// Decimal digits of `2^width - 1`, for widths up to 128.
static DECIMAL_DIGITS: [u8; DECIMAL_TABLE_MAX + 1] = decimal_digit_table();

/// Limb scratch for decimal conversion; values up to 512 bits stay inline.
type Scratch = SmallVec<[u64; 8]>;

/// Number of decimal digits needed for any unsigned `width`-bit value.
pub fn decimal_digits(width: usize) -> usize {
    if let Some(&digits) = DECIMAL_DIGITS.get(width) {
        return usize::from(digits);
    }
    let mut scratch: Scratch = smallvec![u64::MAX; limbs_for(width)];
    mask_off(&mut scratch, width);
    let mut digits = 0;
    while scratch.iter().any(|&l| l != 0) {
        div_small(&mut scratch, 10);
        digits += 1;
    }
    digits
}

/// Printed width of a `width`-bit value in `radix` when no width is given.
pub fn natural_width(radix: Radix, width: usize) -> usize {
    match radix.group_bits() {
        Some(group) => width.div_ceil(group),
        None => decimal_digits(width),
    }
}

// ─────────────────────────────────────────────────────────
//  Formatting
// ─────────────────────────────────────────────────────────

/// Render a value (and optional X/Z mask) per `spec`.
pub fn format_planes(spec: FormatSpec, planes: Planes<'_>, signed: bool) -> String {
    match spec.radix {
        Radix::Decimal => format_decimal(spec.width, planes, signed),
        Radix::Str => format_bytes(spec.width, planes),
        radix => format_grouped(radix, spec.width, planes),
    }
}

fn group_char(value: u64, mask: u64, field: u64) -> char {
    if mask == 0 {
        return char::from_digit(value as u32, 16).unwrap_or('?');
    }
    if mask == field {
        return if value == 0 {
            'x'
        } else if value == field {
            'z'
        } else {
            'X'
        };
    }
    if mask & !value != 0 { 'X' } else { 'Z' }
}

fn format_grouped(radix: Radix, requested: Option<usize>, planes: Planes<'_>) -> String {
    let group = radix.group_bits().unwrap_or(1);
    let digits = planes.width.div_ceil(group);
    let columns = requested.map_or(digits, |w| w.max(digits));
    let mut out = String::with_capacity(columns);
    for _ in digits..columns {
        out.push('0');
    }
    for i in (0..digits).rev() {
        let pos = i * group;
        let len = group.min(planes.width - pos);
        let field = (1u64 << len) - 1;
        let value = window(planes.value, pos as isize) & field;
        let mask = window(planes.mask_or_known(), pos as isize) & field;
        out.push(group_char(value, mask, field));
    }
    if requested == Some(0) {
        let stripped = out.trim_start_matches('0');
        if stripped.is_empty() {
            return "0".to_owned();
        }
        return stripped.to_owned();
    }
    out
}

fn all_ones(src: &[u64], width: usize) -> bool {
    let used = limbs_for(width);
    (0..used).all(|i| {
        let expect = if i + 1 == used { top_mask(width) } else { u64::MAX };
        src.get(i).copied().unwrap_or(0) == expect
    })
}

fn pad_left(body: &str, columns: usize) -> String {
    let len = body.chars().count();
    let mut out = String::with_capacity(columns.max(len));
    for _ in len..columns {
        out.push(' ');
    }
    out.push_str(body);
    out
}

fn format_decimal(requested: Option<usize>, planes: Planes<'_>, signed: bool) -> String {
    let natural = decimal_digits(planes.width);
    let columns = match requested {
        Some(0) => 0,
        Some(w) => w.max(natural),
        None => natural,
    };

    if planes.has_unknown() {
        let mask = planes.mask_or_known();
        let body = if all_ones(mask, planes.width) {
            if planes.value.iter().all(|&l| l == 0) {
                'x'
            } else if all_ones(planes.value, planes.width) {
                'z'
            } else {
                'X'
            }
        } else {
            let x_bit = mask
                .iter()
                .enumerate()
                .any(|(i, m)| m & !planes.value.get(i).copied().unwrap_or(0) != 0);
            if x_bit { 'X' } else { 'Z' }
        };
        return pad_left(&body.to_string(), columns);
    }

    let (negative, digits) = decimal_magnitude(planes.value, planes.width, signed);
    if negative {
        pad_left(&format!("-{digits}"), columns + 1)
    } else {
        pad_left(&digits, columns)
    }
}

/// Sign and decimal magnitude of a two-state value.
fn decimal_magnitude(value: &[u64], width: usize, signed: bool) -> (bool, String) {
    let negative = signed && bit_at(value, width - 1);
    if width <= 128 {
        let field = if width == 128 {
            u128::MAX
        } else {
            (1u128 << width) - 1
        };
        let raw = (u128::from(window(value, 0)) | (u128::from(window(value, 64)) << 64)) & field;
        let magnitude = if negative {
            (!raw).wrapping_add(1) & field
        } else {
            raw
        };
        return (negative, magnitude.to_string());
    }

    let mut scratch: Scratch = smallvec![0u64; limbs_for(width)];
    for (dst, src) in scratch.iter_mut().zip(value) {
        *dst = *src;
    }
    if negative {
        scratch.iter_mut().for_each(|l| *l = !*l);
        mask_off(&mut scratch, width);
        mul_add_small(&mut scratch, width, 1, 1);
    }

    const CHUNK: u64 = 10_000_000_000_000_000_000;
    let mut chunks: SmallVec<[u64; 32]> = SmallVec::new();
    while scratch.iter().any(|&l| l != 0) {
        chunks.push(div_small(&mut scratch, CHUNK));
    }
    let mut out = String::new();
    match chunks.split_last() {
        None => out.push('0'),
        Some((head, rest)) => {
            let _ = write!(out, "{head}");
            for chunk in rest.iter().rev() {
                let _ = write!(out, "{chunk:019}");
            }
        }
    }
    (negative, out)
}

fn format_bytes(requested: Option<usize>, planes: Planes<'_>) -> String {
    let natural = planes.width.div_ceil(8);
    let columns = match requested {
        Some(0) => 0,
        Some(w) => w.max(natural),
        None => natural,
    };
    let mut body = String::with_capacity(natural);
    for i in (0..natural).rev() {
        let pos = (i * 8) as isize;
        let byte = window(planes.value, pos) & !window(planes.mask_or_known(), pos) & 0xFF;
        if byte == 0 && body.is_empty() {
            continue;
        }
        body.push(char::from(byte as u8));
    }
    pad_left(&body, columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_table_matches_powers_of_two() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(1), 1);
        assert_eq!(decimal_digits(4), 2);
        assert_eq!(decimal_digits(20), 7);
        assert_eq!(decimal_digits(64), 20);
        assert_eq!(decimal_digits(128), 39);
        assert_eq!(decimal_digits(129), 39);
        assert_eq!(decimal_digits(200), 61);
    }

    #[test]
    fn spec_parsing() {
        assert_eq!("d".parse(), Ok(FormatSpec::new(Radix::Decimal)));
        assert_eq!("0d".parse(), Ok(FormatSpec::new(Radix::Decimal).with_width(0)));
        assert_eq!("12X".parse(), Ok(FormatSpec::new(Radix::Hex).with_width(12)));
        assert_eq!("".parse(), Ok(FormatSpec::BINARY));
        assert_eq!(
            "4q".parse::<FormatSpec>(),
            Err(FormatSpecError::UnknownBase('q'))
        );
        assert_eq!(FormatSpec::lenient("4q"), FormatSpec::BINARY.with_width(4));
    }

    #[test]
    fn octal_group_straddles_limbs() {
        // Bits 63..65 form one octal digit.
        let value = [1u64 << 63, 0b11];
        let planes = Planes::two_state(66, &value);
        let text = format_planes(FormatSpec::new(Radix::Octal), planes, false);
        assert_eq!(text.len(), 22);
        assert!(text.starts_with('7'));
    }

    #[test]
    fn wide_decimal() {
        // 2^130
        let value = [0, 0, 0b100];
        let planes = Planes::two_state(131, &value);
        assert_eq!(
            format_planes(FormatSpec::new(Radix::Decimal).with_width(0), planes, false),
            "1361129467683753853853498429727072845824"
        );
        // -1 at 131 bits
        let ones = [u64::MAX, u64::MAX, 0b111];
        let planes = Planes::two_state(131, &ones);
        assert_eq!(
            format_planes(FormatSpec::new(Radix::Decimal).with_width(0), planes, true),
            "-1"
        );
    }

    #[test]
    fn unknown_groups() {
        assert_eq!(group_char(0, 0xF, 0xF), 'x');
        assert_eq!(group_char(0xF, 0xF, 0xF), 'z');
        assert_eq!(group_char(0x3, 0xF, 0xF), 'X');
        assert_eq!(group_char(0x1, 0x2, 0xF), 'X');
        assert_eq!(group_char(0x2, 0x2, 0xF), 'Z');
    }
}
