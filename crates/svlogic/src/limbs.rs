//! Multi-limb two-state integers.
//!
//! Values are stored as `u64` limbs in little-endian order (limb 0 = LSB).
//! A [`LimbVector`] does not carry its own width: every width-sensitive
//! operation receives it and leaves all bits at or above it cleared.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigUint;

pub const LIMB_BITS: usize = 64;

/// Number of limbs needed to hold `width` bits.
pub const fn limbs_for(width: usize) -> usize {
    width.div_ceil(LIMB_BITS)
}

/// Mask of the valid bits in the most significant limb of a `width`-bit value.
pub const fn top_mask(width: usize) -> u64 {
    let rem = width % LIMB_BITS;
    if rem == 0 {
        u64::MAX
    } else {
        u64::MAX >> (LIMB_BITS - rem)
    }
}

// ─────────────────────────────────────────────────────────
//  Limb-slice primitives
// ─────────────────────────────────────────────────────────

/// Clear every bit at or above `width`.
pub(crate) fn mask_off(limbs: &mut [u64], width: usize) {
    let used = limbs_for(width);
    if let Some(rest) = limbs.get_mut(used..) {
        rest.fill(0);
    }
    if let Some(last) = used.checked_sub(1).and_then(|i| limbs.get_mut(i)) {
        *last &= top_mask(width);
    }
}

/// The 64 bits of `src` starting at bit `pos`. Positions below zero or past
/// the end of `src` read as zero.
pub(crate) fn window(src: &[u64], pos: isize) -> u64 {
    if pos <= -(LIMB_BITS as isize) {
        return 0;
    }
    if pos < 0 {
        return src.first().map_or(0, |&l| l << pos.unsigned_abs());
    }
    let pos = pos.unsigned_abs();
    let idx = pos / LIMB_BITS;
    let off = pos % LIMB_BITS;
    let lo = src.get(idx).map_or(0, |&l| l >> off);
    if off == 0 {
        return lo;
    }
    let hi = src.get(idx + 1).map_or(0, |&l| l << (LIMB_BITS - off));
    lo | hi
}

/// Overwrite `len` (1..=64) bits of `dst` at `pos` with the low bits of
/// `bits`. Bits that fall past the end of `dst` are dropped.
pub(crate) fn write_bits(dst: &mut [u64], pos: usize, bits: u64, len: usize) {
    let field = if len >= LIMB_BITS {
        u64::MAX
    } else {
        (1u64 << len) - 1
    };
    let bits = bits & field;
    let idx = pos / LIMB_BITS;
    let off = pos % LIMB_BITS;
    if let Some(limb) = dst.get_mut(idx) {
        *limb = (*limb & !(field << off)) | (bits << off);
    }
    if off != 0 && off + len > LIMB_BITS {
        let spill = LIMB_BITS - off;
        if let Some(limb) = dst.get_mut(idx + 1) {
            *limb = (*limb & !(field >> spill)) | (bits >> spill);
        }
    }
}

/// Copy `len` bits of `src` (from bit 0 upward) into `dst` starting at the
/// physical position `start`. Destination positions outside `0..dst_width`
/// are skipped; source bits past the end of `src` write zero, as do source
/// bits set in `clear`.
pub(crate) fn splice(
    dst: &mut [u64],
    dst_width: usize,
    start: isize,
    len: usize,
    src: &[u64],
    clear: &[u64],
) {
    let end = start.saturating_add_unsigned(len);
    if end <= 0 {
        return;
    }
    let end = end.unsigned_abs().min(dst_width);
    let mut pos = start.max(0).unsigned_abs();
    while pos < end {
        let n = (end - pos).min(LIMB_BITS);
        let from = (pos as isize).saturating_sub(start);
        write_bits(dst, pos, window(src, from) & !window(clear, from), n);
        pos += n;
    }
}

/// Fill `dst` with the `len` bits of `src` starting at physical position
/// `start`, dropping bits set in `clear`.
pub(crate) fn extract(dst: &mut [u64], len: usize, src: &[u64], clear: &[u64], start: isize) {
    for (j, limb) in dst.iter_mut().enumerate() {
        let pos = start.saturating_add_unsigned(j * LIMB_BITS);
        *limb = window(src, pos) & !window(clear, pos);
    }
    mask_off(dst, len);
}

/// Set the bits of a `len`-bit window at `start` that fall outside a source
/// of `src_width` bits.
pub(crate) fn fill_outside(dst: &mut [u64], start: isize, len: usize, src_width: usize) {
    if start < 0 {
        fill_ones(dst, 0, start.unsigned_abs().min(len));
    }
    let inside_end = (src_width as isize).saturating_sub(start).max(0).unsigned_abs();
    if inside_end < len {
        fill_ones(dst, inside_end, len);
    }
}

/// Set bits `from..to` of `dst`.
pub(crate) fn fill_ones(dst: &mut [u64], from: usize, to: usize) {
    let mut pos = from;
    while pos < to {
        let n = (to - pos).min(LIMB_BITS);
        write_bits(dst, pos, u64::MAX, n);
        pos += n;
    }
}

pub(crate) fn bit_at(src: &[u64], idx: usize) -> bool {
    src.get(idx / LIMB_BITS)
        .is_some_and(|l| (l >> (idx % LIMB_BITS)) & 1 == 1)
}

fn extended_limb(src: &[u64], width: usize, i: usize, negative: bool) -> u64 {
    let raw = src.get(i).copied().unwrap_or(0);
    if !negative {
        return raw;
    }
    let lo = i * LIMB_BITS;
    if lo >= width {
        u64::MAX
    } else if lo + LIMB_BITS <= width {
        raw
    } else {
        raw | !top_mask(width)
    }
}

/// Compare two values of possibly different widths after extending both to
/// the wider one (sign-extending when `signed`).
pub(crate) fn compare(a: &[u64], a_width: usize, b: &[u64], b_width: usize, signed: bool) -> Ordering {
    let a_neg = signed && bit_at(a, a_width - 1);
    let b_neg = signed && bit_at(b, b_width - 1);
    if a_neg != b_neg {
        return if a_neg {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }
    for i in (0..a.len().max(b.len())).rev() {
        let x = extended_limb(a, a_width, i, a_neg);
        let y = extended_limb(b, b_width, i, b_neg);
        match x.cmp(&y) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

/// `limbs = limbs * mul + add`, truncated to `width`.
pub(crate) fn mul_add_small(limbs: &mut [u64], width: usize, mul: u64, add: u64) {
    let mut carry = u128::from(add);
    for limb in limbs.iter_mut() {
        let t = u128::from(*limb) * u128::from(mul) + carry;
        *limb = t as u64;
        carry = t >> 64;
    }
    mask_off(limbs, width);
}

/// Divide in place by a single-limb divisor, returning the remainder.
pub(crate) fn div_small(limbs: &mut [u64], divisor: u64) -> u64 {
    let divisor = u128::from(divisor);
    let mut rem = 0u128;
    for limb in limbs.iter_mut().rev() {
        let cur = (rem << 64) | u128::from(*limb);
        *limb = (cur / divisor) as u64;
        rem = cur % divisor;
    }
    rem as u64
}

pub(crate) fn to_biguint(limbs: &[u64]) -> BigUint {
    BigUint::new(
        limbs
            .iter()
            .flat_map(|l| [*l as u32, (*l >> 32) as u32])
            .collect(),
    )
}

/// Low limbs of `value`; digits past the end of `dst` are dropped.
pub(crate) fn from_biguint(dst: &mut [u64], value: &BigUint) {
    dst.fill(0);
    for (limb, digit) in dst.iter_mut().zip(value.iter_u64_digits()) {
        *limb = digit;
    }
}

// ─────────────────────────────────────────────────────────
//  LimbVector
// ─────────────────────────────────────────────────────────

/// Fixed-capacity two-state integer of `L` limbs.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LimbVector<const L: usize> {
    pub(crate) limbs: [u64; L],
}

impl<const L: usize> Default for LimbVector<L> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const L: usize> fmt::Debug for LimbVector<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LimbVector[")?;
        for (i, limb) in self.limbs.iter().rev().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{limb:#018x}")?;
        }
        f.write_str("]")
    }
}

impl<const L: usize> LimbVector<L> {
    pub const ZERO: Self = Self { limbs: [0; L] };

    /// Build from raw limbs, clearing bits at or above `width`.
    pub fn from_limbs(limbs: &[u64], width: usize) -> Self {
        let mut out = Self::ZERO;
        let n = limbs.len().min(L);
        out.limbs[..n].copy_from_slice(&limbs[..n]);
        out.mask_off(width);
        out
    }

    pub fn from_u64(value: u64, width: usize) -> Self {
        Self::from_limbs(&[value], width)
    }

    pub fn from_u128(value: u128, width: usize) -> Self {
        Self::from_limbs(&[value as u64, (value >> 64) as u64], width)
    }

    /// Sign-fills every limb above the first before truncating to `width`.
    pub fn from_i64(value: i64, width: usize) -> Self {
        let fill = if value < 0 { u64::MAX } else { 0 };
        let mut out = Self { limbs: [fill; L] };
        if let Some(first) = out.limbs.first_mut() {
            *first = value as u64;
        }
        out.mask_off(width);
        out
    }

    pub fn from_i128(value: i128, width: usize) -> Self {
        let fill = if value < 0 { u64::MAX } else { 0 };
        let mut out = Self { limbs: [fill; L] };
        for (i, limb) in out.limbs.iter_mut().take(2).enumerate() {
            *limb = (value >> (64 * i)) as u64;
        }
        out.mask_off(width);
        out
    }

    /// All `width` bits set.
    pub fn ones(width: usize) -> Self {
        let mut out = Self {
            limbs: [u64::MAX; L],
        };
        out.mask_off(width);
        out
    }

    pub fn limbs(&self) -> &[u64; L] {
        &self.limbs
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.limbs
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.limbs
    }

    pub fn mask_off(&mut self, width: usize) {
        mask_off(&mut self.limbs, width);
    }

    // ── Bit access ─────────────────────────────────────────

    /// Out-of-range reads return `false`.
    pub fn get(&self, width: usize, idx: usize) -> bool {
        idx < width && bit_at(&self.limbs, idx)
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, width: usize, idx: usize, value: bool) {
        if idx >= width {
            return;
        }
        let bit = 1u64 << (idx % LIMB_BITS);
        let Some(limb) = self.limbs.get_mut(idx / LIMB_BITS) else {
            return;
        };
        if value {
            *limb |= bit;
        } else {
            *limb &= !bit;
        }
    }

    /// Bits `min(a,b)..=max(a,b)` as an unsigned value of width `|a-b|+1`.
    pub fn slice<const R: usize>(&self, a: usize, b: usize) -> LimbVector<R> {
        let (lo, hi) = (a.min(b), a.max(b));
        self.extract(lo as isize, hi - lo + 1)
    }

    /// `len` bits starting at physical position `start`; positions outside
    /// the stored bits read zero.
    pub fn extract<const R: usize>(&self, start: isize, len: usize) -> LimbVector<R> {
        let mut out = LimbVector::<R>::ZERO;
        extract(&mut out.limbs, len, &self.limbs, &[], start);
        out
    }

    /// Widen (replicating the sign bit when `signed`) or truncate to
    /// `new_width`.
    pub fn resize<const R: usize>(&self, width: usize, new_width: usize, signed: bool) -> LimbVector<R> {
        let mut out = LimbVector::<R>::ZERO;
        let n = R.min(L);
        out.limbs[..n].copy_from_slice(&self.limbs[..n]);
        if signed && new_width > width && self.negative(width) {
            fill_ones(&mut out.limbs, width, new_width);
        }
        out.mask_off(new_width);
        out
    }

    // ── Queries ────────────────────────────────────────────

    pub fn negative(&self, width: usize) -> bool {
        width > 0 && bit_at(&self.limbs, width - 1)
    }

    pub fn any_set(&self) -> bool {
        self.limbs.iter().any(|&l| l != 0)
    }

    pub fn all_set(&self, width: usize) -> bool {
        *self == Self::ones(width)
    }

    pub fn is_one(&self) -> bool {
        self.fits_u64() && self.limbs.first() == Some(&1)
    }

    pub fn fits_u64(&self) -> bool {
        self.limbs.iter().skip(1).all(|&l| l == 0)
    }

    pub fn popcount(&self) -> u32 {
        self.limbs.iter().map(|l| l.count_ones()).sum()
    }

    /// Index of the most significant set bit.
    pub fn highest_bit(&self) -> Option<usize> {
        self.limbs
            .iter()
            .enumerate()
            .rev()
            .find(|(_, l)| **l != 0)
            .map(|(i, l)| i * LIMB_BITS + (LIMB_BITS - 1 - l.leading_zeros() as usize))
    }

    /// The low 64 bits.
    pub fn to_u64(self) -> u64 {
        self.limbs.first().copied().unwrap_or(0)
    }

    /// The low 64 bits, sign-extended from `width` when it is narrower.
    pub fn to_i64(self, width: usize) -> i64 {
        let raw = self.to_u64();
        if width >= LIMB_BITS {
            raw as i64
        } else {
            let sh = LIMB_BITS - width;
            ((raw << sh) as i64) >> sh
        }
    }

    /// Shift amount held by this value, or `None` when any bit beyond the
    /// first limb is set (such shifts always clear the operand).
    pub fn shift_amount(&self) -> Option<usize> {
        if !self.fits_u64() {
            return None;
        }
        usize::try_from(self.to_u64()).ok()
    }

    // ── Bitwise ────────────────────────────────────────────

    pub fn not(&self, width: usize) -> Self {
        let mut out = *self;
        out.limbs.iter_mut().for_each(|l| *l = !*l);
        out.mask_off(width);
        out
    }

    pub fn and(&self, rhs: &Self) -> Self {
        self.zip(rhs, |a, b| a & b)
    }

    pub fn or(&self, rhs: &Self) -> Self {
        self.zip(rhs, |a, b| a | b)
    }

    pub fn xor(&self, rhs: &Self) -> Self {
        self.zip(rhs, |a, b| a ^ b)
    }

    pub fn or_assign(&mut self, rhs: &Self) {
        *self = self.or(rhs);
    }

    fn zip(&self, rhs: &Self, f: impl Fn(u64, u64) -> u64) -> Self {
        let mut out = *self;
        for (l, r) in out.limbs.iter_mut().zip(rhs.limbs.iter()) {
            *l = f(*l, *r);
        }
        out
    }

    // ── Arithmetic ─────────────────────────────────────────

    /// Two's complement negation.
    pub fn negate(&self, width: usize) -> Self {
        self.not(width).add(&Self::from_u64(1, width), width)
    }

    pub fn add(&self, rhs: &Self, width: usize) -> Self {
        let mut out = Self::ZERO;
        let mut carry = 0u128;
        for ((o, a), b) in out.limbs.iter_mut().zip(&self.limbs).zip(&rhs.limbs) {
            let sum = u128::from(*a) + u128::from(*b) + carry;
            *o = sum as u64;
            carry = sum >> 64;
        }
        out.mask_off(width);
        out
    }

    pub fn sub(&self, rhs: &Self, width: usize) -> Self {
        self.add(&rhs.negate(width), width)
    }

    /// Product truncated to `width`. Single-limb operands multiply through
    /// one `u128`; anything wider takes [`Self::mul_schoolbook`].
    pub fn mul(&self, rhs: &Self, width: usize) -> Self {
        if !(self.fits_u64() && rhs.fits_u64()) {
            return self.mul_schoolbook(rhs, width);
        }
        let mut out = Self::ZERO;
        let p = u128::from(self.to_u64()) * u128::from(rhs.to_u64());
        if let Some(first) = out.limbs.first_mut() {
            *first = p as u64;
        }
        if limbs_for(width).min(L) > 1 {
            out.limbs[1] = (p >> 64) as u64;
        }
        out.mask_off(width);
        out
    }

    /// O(n²) limb-by-limb product truncated to `width`.
    pub fn mul_schoolbook(&self, rhs: &Self, width: usize) -> Self {
        let n = limbs_for(width).min(L);
        let mut out = Self::ZERO;
        for (i, &a) in self.limbs.iter().enumerate().take(n) {
            if a == 0 {
                continue;
            }
            let mut carry = 0u128;
            for (j, &b) in rhs.limbs.iter().enumerate().take(n - i) {
                let t = u128::from(a) * u128::from(b) + u128::from(out.limbs[i + j]) + carry;
                out.limbs[i + j] = t as u64;
                carry = t >> 64;
            }
        }
        out.mask_off(width);
        out
    }

    /// Unsigned restoring division. Division by zero yields `(0, 0)`.
    pub fn div_rem_unsigned(&self, rhs: &Self, width: usize) -> (Self, Self) {
        if !rhs.any_set() {
            return (Self::ZERO, Self::ZERO);
        }
        if rhs.is_one() {
            return (*self, Self::ZERO);
        }
        match self.cmp_unsigned(rhs) {
            Ordering::Equal => return (Self::from_u64(1, width), Self::ZERO),
            Ordering::Less => return (Self::ZERO, *self),
            Ordering::Greater => {}
        }
        if self.fits_u64() && rhs.fits_u64() {
            let (a, b) = (self.to_u64(), rhs.to_u64());
            return (Self::from_u64(a / b, width), Self::from_u64(a % b, width));
        }

        let (Some(top), Some(divisor_top)) = (self.highest_bit(), rhs.highest_bit()) else {
            return (Self::ZERO, *self);
        };
        let mut quotient = Self::ZERO;
        let mut remainder = *self;
        for shift in (0..=top - divisor_top).rev() {
            let trial = rhs.shl(shift, width);
            if remainder.cmp_unsigned(&trial) != Ordering::Less {
                remainder = remainder.sub(&trial, width);
                quotient.set(width, shift, true);
            }
        }
        (quotient, remainder)
    }

    /// Quotient sign is the XOR of the operand signs, the remainder takes
    /// the dividend's sign.
    pub fn div_rem(&self, rhs: &Self, width: usize, signed: bool) -> (Self, Self) {
        if !signed || !rhs.any_set() {
            return self.div_rem_unsigned(rhs, width);
        }
        let a_neg = self.negative(width);
        let b_neg = rhs.negative(width);
        let a = if a_neg { self.negate(width) } else { *self };
        let b = if b_neg { rhs.negate(width) } else { *rhs };
        let (q, r) = a.div_rem_unsigned(&b, width);
        let q = if a_neg != b_neg { q.negate(width) } else { q };
        let r = if a_neg { r.negate(width) } else { r };
        (q, r)
    }

    /// Wrapping exponentiation by squaring; the exponent is read unsigned.
    pub fn pow<const E: usize>(&self, exp: &LimbVector<E>, width: usize) -> Self {
        let mut result = Self::from_u64(1, width);
        let Some(top) = exp.highest_bit() else {
            return result;
        };
        let mut base = *self;
        for i in 0..=top {
            if bit_at(&exp.limbs, i) {
                result = result.mul(&base, width);
            }
            if i < top {
                base = base.mul(&base, width);
            }
        }
        result
    }

    // ── Comparison ─────────────────────────────────────────

    pub fn cmp_unsigned(&self, rhs: &Self) -> Ordering {
        for (a, b) in self.limbs.iter().zip(rhs.limbs.iter()).rev() {
            match a.cmp(b) {
                Ordering::Equal => {}
                other => return other,
            }
        }
        Ordering::Equal
    }

    pub fn cmp_with(&self, rhs: &Self, width: usize, signed: bool) -> Ordering {
        if signed {
            match (self.negative(width), rhs.negative(width)) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
        self.cmp_unsigned(rhs)
    }

    // ── Shifts ─────────────────────────────────────────────

    pub fn shl(&self, amount: usize, width: usize) -> Self {
        if amount >= width {
            return Self::ZERO;
        }
        let mut out = Self::ZERO;
        for (j, limb) in out.limbs.iter_mut().enumerate() {
            *limb = window(&self.limbs, (j * LIMB_BITS) as isize - amount as isize);
        }
        out.mask_off(width);
        out
    }

    pub fn shr(&self, amount: usize, width: usize) -> Self {
        if amount >= width {
            return Self::ZERO;
        }
        let mut out = Self::ZERO;
        for (j, limb) in out.limbs.iter_mut().enumerate() {
            *limb = window(&self.limbs, (j * LIMB_BITS + amount) as isize);
        }
        out
    }

    /// Arithmetic right shift; replicates the sign bit when `signed`.
    pub fn ashr(&self, amount: usize, width: usize, signed: bool) -> Self {
        if !(signed && self.negative(width)) {
            return self.shr(amount, width);
        }
        if amount >= width {
            return Self::ones(width);
        }
        let mut out = self.shr(amount, width);
        fill_ones(&mut out.limbs, width - amount, width);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schoolbook_matches_single_limb_product() {
        let edges = [0u64, 1, 2, 0xdead_beef, u64::MAX - 1, u64::MAX];
        for &a in &edges {
            for &b in &edges {
                let wide = u128::from(a) * u128::from(b);
                let (x, y) = (LimbVector::<2>::from_u64(a, 128), LimbVector::<2>::from_u64(b, 128));
                let long = x.mul_schoolbook(&y, 128);
                assert_eq!(long, x.mul(&y, 128), "{a} * {b}");
                assert_eq!(long.limbs(), &[wide as u64, (wide >> 64) as u64], "{a} * {b}");

                let (x, y) = (LimbVector::<1>::from_u64(a, 64), LimbVector::<1>::from_u64(b, 64));
                assert_eq!(x.mul_schoolbook(&y, 64).to_u64(), a.wrapping_mul(b), "{a} * {b}");
                assert_eq!(x.mul_schoolbook(&y, 40).to_u64(), a.wrapping_mul(b) & ((1 << 40) - 1));
            }
        }
    }

    #[test]
    fn window_straddles_limbs() {
        let src = [0xF000_0000_0000_0000, 0x0000_0000_0000_000F];
        assert_eq!(window(&src, 60), 0xFF);
        assert_eq!(window(&src, -4), 0);
        assert_eq!(window(&[0x1], -4), 0x10);
        assert_eq!(window(&src, 128), 0);
    }

    #[test]
    fn splice_clips_to_width() {
        let mut dst = [0u64; 2];
        splice(&mut dst, 70, 60, 16, &[0xFFFF], &[]);
        assert_eq!(dst, [0xF000_0000_0000_0000, 0x3F]);
        splice(&mut dst, 70, -8, 12, &[0xFFF], &[]);
        assert_eq!(dst[0] & 0xF, 0xF);
    }

    #[test]
    fn splice_drops_cleared_bits() {
        let mut dst = [0u64];
        splice(&mut dst, 8, 0, 8, &[0xFF], &[0x0F]);
        assert_eq!(dst, [0xF0]);
    }

    #[test]
    fn fill_outside_marks_both_ends() {
        let mut dst = [0u64];
        fill_outside(&mut dst, -2, 8, 4);
        assert_eq!(dst, [0b1100_0011]);
    }

    #[test]
    fn add_carries_across_limbs() {
        let a = LimbVector::<2>::from_u64(u64::MAX, 100);
        let b = LimbVector::<2>::from_u64(1, 100);
        assert_eq!(a.add(&b, 100).limbs, [0, 1]);
    }

    #[test]
    fn negate_wraps_at_width() {
        let one = LimbVector::<2>::from_u64(1, 70);
        let minus_one = one.negate(70);
        assert!(minus_one.all_set(70));
        assert_eq!(minus_one.limbs[1], 0x3F);
    }

    #[test]
    fn wide_division() {
        let width = 128;
        let a = LimbVector::<2>::from_u128(0x1234_5678_9abc_def0_1122_3344_5566_7788, width);
        let b = LimbVector::<2>::from_u128(0x1_0000_0001, width);
        let (q, r) = a.div_rem_unsigned(&b, width);
        let expected_q = 0x1234_5678_9abc_def0_1122_3344_5566_7788u128 / 0x1_0000_0001;
        let expected_r = 0x1234_5678_9abc_def0_1122_3344_5566_7788u128 % 0x1_0000_0001;
        assert_eq!(q, LimbVector::from_u128(expected_q, width));
        assert_eq!(r, LimbVector::from_u128(expected_r, width));
    }

    #[test]
    fn division_by_zero_is_zero_pair() {
        let a = LimbVector::<2>::from_u64(42, 100);
        let (q, r) = a.div_rem(&LimbVector::ZERO, 100, true);
        assert!(!q.any_set());
        assert!(!r.any_set());
    }

    #[test]
    fn signed_remainder_follows_dividend() {
        let w = 100;
        let a = LimbVector::<2>::from_i64(-7, w);
        let b = LimbVector::<2>::from_i64(2, w);
        let (q, r) = a.div_rem(&b, w, true);
        assert_eq!(q, LimbVector::from_i64(-3, w));
        assert_eq!(r, LimbVector::from_i64(-1, w));
    }

    #[test]
    fn arithmetic_shift_fills_sign() {
        let w = 80;
        let a = LimbVector::<2>::from_i64(-16, w);
        assert_eq!(a.ashr(2, w, true), LimbVector::from_i64(-4, w));
        assert!(a.ashr(200, w, true).all_set(w));
        assert!(!a.shr(80, w).any_set());
    }

    #[test]
    fn resize_sign_extends() {
        let a = LimbVector::<1>::from_i64(-2, 8);
        let wide: LimbVector<2> = a.resize(8, 100, true);
        assert_eq!(wide, LimbVector::from_i64(-2, 100));
        let zext: LimbVector<2> = a.resize(8, 100, false);
        assert_eq!(zext.limbs, [0xFE, 0]);
    }

    #[test]
    fn compare_mixed_widths() {
        let a = [0xFu64];
        let b = [0xFFu64, 0];
        assert_eq!(compare(&a, 4, &b, 100, false), Ordering::Less);
        assert_eq!(compare(&a, 4, &b, 8, true), Ordering::Equal);
    }
}
