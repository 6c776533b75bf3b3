//! Two-state (`bit`) vectors.
//!
//! `Bit<MSB, LSB, SIGNED, LIMBS>` mirrors the SystemVerilog declaration
//! `bit [signed] [MSB:LSB]`. `LIMBS` must be `ceil(width / 64)`; a mismatch is
//! rejected when the type is first used. Widths up to 64 bits run every
//! operation on a native `u64`/`i64`, wider values go through [`LimbVector`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};
use std::str::FromStr;

use log::debug;
use num_bigint::{BigInt, BigUint};
use num_traits::{Bounded, One, ToPrimitive, Zero};

use crate::holder::{HolderKind, Native, holder_kind};
use crate::limbs::{self, LimbVector, extract, limbs_for, splice};
use crate::literal::{FormatSpec, LiteralError, Radix, format_planes, parse_planes};
use crate::operand::{IndexValue, ShiftAmount};
use crate::packed::{Packed, Planes};
use crate::promote::{Op, Operand, expr_type, operand_signed, operand_width};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bit<const MSB: usize, const LSB: usize = 0, const SIGNED: bool = false, const LIMBS: usize = 1>
{
    pub(crate) value: LimbVector<LIMBS>,
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    Bit<MSB, LSB, SIGNED, LIMBS>
{
    pub const WIDTH: usize = MSB.abs_diff(LSB) + 1;
    pub const BIG_ENDIAN: bool = MSB >= LSB;
    pub const HOLDER: HolderKind = holder_kind(Self::WIDTH, SIGNED);
    pub const NATIVE: bool = Self::HOLDER.is_native();
    pub const OPERAND: Operand = Operand::new(Self::WIDTH, SIGNED);

    const SHAPE: () = assert!(
        LIMBS == limbs_for(Self::WIDTH),
        "LIMBS must equal ceil(width / 64)"
    );

    pub const ZERO: Self = {
        let () = Self::SHAPE;
        Self {
            value: LimbVector::ZERO,
        }
    };

    /// Wrap limbs that already satisfy the width invariant.
    pub(crate) fn from_vector(value: LimbVector<LIMBS>) -> Self {
        let () = Self::SHAPE;
        Self { value }
    }

    pub fn from_limbs(limbs: &[u64]) -> Self {
        Self::from_vector(LimbVector::from_limbs(limbs, Self::WIDTH))
    }

    /// Low `WIDTH` bits of `value`.
    pub fn from_u64(value: u64) -> Self {
        Self::from_vector(LimbVector::from_u64(value, Self::WIDTH))
    }

    /// Two's complement of `value`, truncated (or sign-filled) to `WIDTH`.
    pub fn from_i64(value: i64) -> Self {
        Self::from_vector(LimbVector::from_i64(value, Self::WIDTH))
    }

    pub fn from_u128(value: u128) -> Self {
        Self::from_vector(LimbVector::from_u128(value, Self::WIDTH))
    }

    pub fn from_i128(value: i128) -> Self {
        Self::from_vector(LimbVector::from_i128(value, Self::WIDTH))
    }

    pub fn ones() -> Self {
        Self::from_vector(LimbVector::ones(Self::WIDTH))
    }

    /// Low `WIDTH` bits of `value`.
    pub fn from_biguint(value: &BigUint) -> Self {
        let mut out = LimbVector::<LIMBS>::ZERO;
        limbs::from_biguint(out.as_mut_slice(), value);
        out.mask_off(Self::WIDTH);
        Self::from_vector(out)
    }

    pub fn to_biguint(self) -> BigUint {
        limbs::to_biguint(self.value.as_slice())
    }

    /// Value as a signed integer when `SIGNED`, otherwise as its magnitude.
    pub fn to_bigint(self) -> BigInt {
        let magnitude = BigInt::from(self.to_biguint());
        if self.negative() {
            magnitude - (BigInt::from(1u8) << Self::WIDTH)
        } else {
            magnitude
        }
    }

    pub fn vector(&self) -> &LimbVector<LIMBS> {
        &self.value
    }

    /// The value in its native holder, for widths up to 64.
    pub fn native(&self) -> Option<Native> {
        Native::from_raw(Self::HOLDER, self.raw(), Self::WIDTH)
    }

    #[inline]
    fn raw(&self) -> u64 {
        self.value.to_u64()
    }

    #[inline]
    fn sext(&self) -> i64 {
        self.value.to_i64(Self::WIDTH)
    }

    // ── Indexing ───────────────────────────────────────────

    /// Physical bit of declared index `i`.
    pub(crate) const fn physical(i: usize) -> Option<usize> {
        let offset = if Self::BIG_ENDIAN {
            i.checked_sub(LSB)
        } else {
            LSB.checked_sub(i)
        };
        match offset {
            Some(p) if p < Self::WIDTH => Some(p),
            _ => None,
        }
    }

    /// Physical position of the lowest bit of the declared range `a..b`.
    pub(crate) const fn window_start(a: usize, b: usize) -> isize {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        if Self::BIG_ENDIAN {
            clamp_position(lo).saturating_sub(LSB as isize)
        } else {
            (LSB as isize).saturating_sub(clamp_position(hi))
        }
    }

    /// Bit at declared index `i`; out-of-range indices read 0.
    pub fn get(&self, i: usize) -> bool {
        Self::physical(i).is_some_and(|p| self.value.get(Self::WIDTH, p))
    }

    /// Out-of-range writes are dropped.
    pub fn set(&mut self, i: usize, bit: bool) {
        if let Some(p) = Self::physical(i) {
            self.value.set(Self::WIDTH, p, bit);
        }
    }

    pub fn index(&self, idx: &(impl IndexValue + ?Sized)) -> Bit<0> {
        Bit::from(idx.index_value().is_some_and(|i| self.get(i)))
    }

    pub fn set_index(&mut self, idx: &(impl IndexValue + ?Sized), bit: bool) {
        if let Some(i) = idx.index_value() {
            self.set(i, bit);
        }
    }

    // ── Aggregate contract ─────────────────────────────────

    /// Declared bits `a..b` as an unsigned value; bits outside the source read
    /// 0 and result bits beyond `|a-b|+1` are 0.
    pub fn slice<const RM: usize, const RL: usize>(&self, a: usize, b: usize) -> Bit<RM, 0, false, RL> {
        let len = a.abs_diff(b).saturating_add(1).min(Bit::<RM, 0, false, RL>::WIDTH);
        let mut out = LimbVector::<RL>::ZERO;
        extract(
            out.as_mut_slice(),
            len,
            self.value.as_slice(),
            &[],
            Self::window_start(a, b),
        );
        Bit::from_vector(out)
    }

    /// Overwrite declared bits `a..b` with the low bits of `src`. X/Z bits of
    /// a four-state source are written as 0.
    pub fn update(&mut self, a: usize, b: usize, src: &(impl Packed + ?Sized)) {
        let src = src.planes();
        splice(
            self.value.as_mut_slice(),
            Self::WIDTH,
            Self::window_start(a, b),
            a.abs_diff(b).saturating_add(1),
            src.value,
            src.mask_or_known(),
        );
    }

    /// Sign- or zero-extend (or truncate) to the target width.
    pub fn extend<const RM: usize, const RL: usize>(&self) -> Bit<RM, 0, SIGNED, RL> {
        Bit::from_vector(
            self.value
                .resize(Self::WIDTH, Bit::<RM, 0, SIGNED, RL>::WIDTH, SIGNED),
        )
    }

    /// `{self, low}`.
    pub fn concat<
        const M2: usize,
        const L2: usize,
        const S2: bool,
        const B2: usize,
        const RM: usize,
        const RL: usize,
    >(
        &self,
        low: &Bit<M2, L2, S2, B2>,
    ) -> Bit<RM, 0, false, RL> {
        const {
            assert!(
                Bit::<RM, 0, false, RL>::WIDTH == Self::WIDTH + Bit::<M2, L2, S2, B2>::WIDTH,
                "concatenation width mismatch"
            )
        };
        let width = Bit::<RM, 0, false, RL>::WIDTH;
        let low_width = Bit::<M2, L2, S2, B2>::WIDTH;
        let mut out = LimbVector::<RL>::ZERO;
        splice(out.as_mut_slice(), width, 0, low_width, low.value.as_slice(), &[]);
        splice(
            out.as_mut_slice(),
            width,
            low_width as isize,
            Self::WIDTH,
            self.value.as_slice(),
            &[],
        );
        Bit::from_vector(out)
    }

    /// `{parts[0], parts[1], ...}` assigned to this type: missing high bits
    /// are 0 and excess high bits are dropped.
    pub fn pack(parts: &[&dyn Packed]) -> Self {
        let mut out = Self::ZERO;
        let mut offset = 0isize;
        for part in parts.iter().rev() {
            let src = part.planes();
            splice(
                out.value.as_mut_slice(),
                Self::WIDTH,
                offset,
                src.width,
                src.value,
                src.mask_or_known(),
            );
            offset = offset.saturating_add_unsigned(src.width);
        }
        out
    }

    /// `{parts[0], parts[1], ...} = self`.
    pub fn unpack(&self, parts: &mut [&mut dyn Packed]) {
        let mut offset = 0;
        for part in parts.iter_mut().rev() {
            let width = part.width();
            part.load(self.planes(), offset);
            offset += width;
        }
    }

    // ── Queries ────────────────────────────────────────────

    pub fn negative(&self) -> bool {
        SIGNED && self.value.negative(Self::WIDTH)
    }

    pub fn is_zero(&self) -> bool {
        !self.value.any_set()
    }

    pub fn any_set(&self) -> bool {
        self.value.any_set()
    }

    pub fn all_set(&self) -> bool {
        self.value.all_set(Self::WIDTH)
    }

    pub fn popcount(&self) -> u32 {
        self.value.popcount()
    }

    pub fn highest_bit(&self) -> Option<usize> {
        self.value.highest_bit()
    }

    pub fn to_bool(self) -> bool {
        self.value.any_set()
    }

    /// Low 64 bits.
    pub fn to_u64(self) -> u64 {
        self.raw()
    }

    /// Low 64 bits, sign-extended from the declared width when `SIGNED`.
    pub fn to_i64(self) -> i64 {
        if SIGNED {
            self.sext()
        } else {
            self.raw() as i64
        }
    }

    pub fn to_signed(self) -> Bit<MSB, LSB, true, LIMBS> {
        Bit::from_vector(self.value)
    }

    pub fn to_unsigned(self) -> Bit<MSB, LSB, false, LIMBS> {
        Bit::from_vector(self.value)
    }

    // ── Reductions ─────────────────────────────────────────

    pub fn r_and(&self) -> bool {
        self.all_set()
    }

    pub fn r_or(&self) -> bool {
        self.any_set()
    }

    pub fn r_xor(&self) -> bool {
        self.popcount() % 2 == 1
    }

    pub fn r_nand(&self) -> bool {
        !self.r_and()
    }

    pub fn r_nor(&self) -> bool {
        !self.r_or()
    }

    pub fn r_xnor(&self) -> bool {
        !self.r_xor()
    }

    pub fn logical_not(&self) -> bool {
        self.is_zero()
    }

    // ── Arithmetic ─────────────────────────────────────────

    pub fn xnor(&self, rhs: &Self) -> Self {
        !(*self ^ *rhs)
    }

    pub fn inc(&mut self) {
        *self = self.sum(&Self::from_u64(1));
    }

    pub fn dec(&mut self) {
        *self = self.difference(&Self::from_u64(1));
    }

    fn and_bits(&self, rhs: &Self) -> Self {
        Self::from_vector(self.value.and(&rhs.value))
    }

    fn or_bits(&self, rhs: &Self) -> Self {
        Self::from_vector(self.value.or(&rhs.value))
    }

    fn xor_bits(&self, rhs: &Self) -> Self {
        Self::from_vector(self.value.xor(&rhs.value))
    }

    fn sum(&self, rhs: &Self) -> Self {
        if Self::NATIVE {
            Self::from_u64(self.raw().wrapping_add(rhs.raw()))
        } else {
            Self::from_vector(self.value.add(&rhs.value, Self::WIDTH))
        }
    }

    fn difference(&self, rhs: &Self) -> Self {
        if Self::NATIVE {
            Self::from_u64(self.raw().wrapping_sub(rhs.raw()))
        } else {
            Self::from_vector(self.value.sub(&rhs.value, Self::WIDTH))
        }
    }

    fn product(&self, rhs: &Self) -> Self {
        if Self::NATIVE {
            Self::from_u64(self.raw().wrapping_mul(rhs.raw()))
        } else {
            Self::from_vector(self.value.mul(&rhs.value, Self::WIDTH))
        }
    }

    /// Division by zero yields 0.
    fn quotient(&self, rhs: &Self) -> Self {
        if Self::NATIVE {
            if rhs.is_zero() {
                return Self::ZERO;
            }
            if SIGNED {
                Self::from_i64(self.sext().wrapping_div(rhs.sext()))
            } else {
                Self::from_u64(self.raw() / rhs.raw())
            }
        } else {
            Self::from_vector(self.value.div_rem(&rhs.value, Self::WIDTH, SIGNED).0)
        }
    }

    /// Remainder takes the sign of the dividend; division by zero yields 0.
    fn remainder(&self, rhs: &Self) -> Self {
        if Self::NATIVE {
            if rhs.is_zero() {
                return Self::ZERO;
            }
            if SIGNED {
                Self::from_i64(self.sext().wrapping_rem(rhs.sext()))
            } else {
                Self::from_u64(self.raw() % rhs.raw())
            }
        } else {
            Self::from_vector(self.value.div_rem(&rhs.value, Self::WIDTH, SIGNED).1)
        }
    }

    /// `self ** exp`, wrapping at the declared width.
    ///
    /// A negative exponent gives 1 for a base of 1, +/-1 for a base of -1 and
    /// 0 otherwise.
    pub fn pow<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        exp: &Bit<M2, L2, S2, B2>,
    ) -> Self {
        if exp.negative() {
            if self.value.is_one() {
                return *self;
            }
            if SIGNED && self.all_set() {
                let odd = exp.value.get(Bit::<M2, L2, S2, B2>::WIDTH, 0);
                return if odd { *self } else { Self::from_u64(1) };
            }
            return Self::ZERO;
        }
        if Self::NATIVE {
            if let Some(e) = exp.value.shift_amount().and_then(|e| u32::try_from(e).ok()) {
                return Self::from_u64(self.raw().wrapping_pow(e));
            }
        }
        Self::from_vector(self.value.pow(&exp.value, Self::WIDTH))
    }

    // ── Shifts ─────────────────────────────────────────────

    fn shift_left(&self, amount: Option<usize>) -> Self {
        match amount {
            Some(n) if n < Self::WIDTH => {
                if Self::NATIVE {
                    Self::from_u64(self.raw() << n)
                } else {
                    Self::from_vector(self.value.shl(n, Self::WIDTH))
                }
            }
            _ => Self::ZERO,
        }
    }

    fn shift_right(&self, amount: Option<usize>) -> Self {
        match amount {
            Some(n) if n < Self::WIDTH => {
                if Self::NATIVE {
                    Self::from_u64(self.raw() >> n)
                } else {
                    Self::from_vector(self.value.shr(n, Self::WIDTH))
                }
            }
            _ => Self::ZERO,
        }
    }

    /// Arithmetic right shift: signed values replicate the sign bit.
    pub fn ashr(&self, amount: impl ShiftAmount) -> Self {
        if amount.is_unknown() {
            return Self::ZERO;
        }
        if !self.negative() {
            return self.shift_right(known_amount(&amount));
        }
        match amount.shift_amount() {
            Some(n) if n < Self::WIDTH => {
                if Self::NATIVE {
                    Self::from_i64(self.sext() >> n)
                } else {
                    Self::from_vector(self.value.ashr(n, Self::WIDTH, true))
                }
            }
            _ => Self::ones(),
        }
    }

    /// Arithmetic left shift; identical to `<<`.
    pub fn ashl(&self, amount: impl ShiftAmount) -> Self {
        self.shift_left(known_amount(&amount))
    }

    // ── Mixed-width comparison ─────────────────────────────

    /// Compare after extending both operands to the wider width; signed only
    /// when both operands are.
    pub fn cmp_promoted<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Bit<M2, L2, S2, B2>,
    ) -> Ordering {
        limbs::compare(
            self.value.as_slice(),
            Self::WIDTH,
            rhs.value.as_slice(),
            Bit::<M2, L2, S2, B2>::WIDTH,
            operand_signed(Op::Less, Self::OPERAND, Bit::<M2, L2, S2, B2>::OPERAND),
        )
    }

    pub fn eq_promoted<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Bit<M2, L2, S2, B2>,
    ) -> bool {
        self.cmp_promoted(rhs) == Ordering::Equal
    }

    // ── Text ───────────────────────────────────────────────

    /// Format per a `<width><base>` spec; an unreadable spec prints binary.
    pub fn format(&self, spec: &str) -> String {
        self.format_with(FormatSpec::lenient(spec))
    }

    pub fn format_with(&self, spec: FormatSpec) -> String {
        format_planes(spec, self.planes(), SIGNED)
    }

    /// Parse leniently: invalid characters are skipped and X/Z read as 0.
    pub fn parse_lenient(text: &str) -> Self {
        let mut value = LimbVector::<LIMBS>::ZERO;
        let mut mask = LimbVector::<LIMBS>::ZERO;
        if let Err(err) = parse_planes(
            text,
            Self::WIDTH,
            value.as_mut_slice(),
            mask.as_mut_slice(),
            false,
        ) {
            debug!("literal `{text}`: {err}");
        }
        Self::from_vector(value.and(&mask.not(Self::WIDTH)))
    }
}

/// Declared indices past `isize::MAX` are all far outside any vector.
const fn clamp_position(i: usize) -> isize {
    if i > isize::MAX as usize {
        isize::MAX
    } else {
        i as isize
    }
}

/// Two-state shifts by an amount with X/Z bits clear the operand.
fn known_amount(amount: &impl ShiftAmount) -> Option<usize> {
    if amount.is_unknown() {
        None
    } else {
        amount.shift_amount()
    }
}

// ── Mixed-width operators ──────────────────────────────────

macro_rules! promoted_ops {
    ($($(#[$doc:meta])* $name:ident => $op:tt as $kind:ident;)*) => {
        impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
            Bit<MSB, LSB, SIGNED, LIMBS>
        {
            $(
            $(#[$doc])*
            pub fn $name<
                const M2: usize,
                const L2: usize,
                const S2: bool,
                const B2: usize,
                const RM: usize,
                const RS: bool,
                const RL: usize,
            >(
                &self,
                rhs: &Bit<M2, L2, S2, B2>,
            ) -> Bit<RM, 0, RS, RL> {
                const {
                    let (lhs, rhs) = (Self::OPERAND, Bit::<M2, L2, S2, B2>::OPERAND);
                    let width = Bit::<RM, 0, RS, RL>::WIDTH;
                    assert!(
                        operand_width(Op::$kind, lhs, rhs, Some(width)) == width,
                        "result is narrower than the promoted operands"
                    );
                    assert!(RS == expr_type(Op::$kind, lhs, rhs).signed, "result signedness mismatch");
                };
                let width = Bit::<RM, 0, RS, RL>::WIDTH;
                let lhs = Bit::<RM, 0, RS, RL>::from_vector(self.value.resize(Self::WIDTH, width, RS));
                let rhs = Bit::<RM, 0, RS, RL>::from_vector(
                    rhs.value.resize(Bit::<M2, L2, S2, B2>::WIDTH, width, RS),
                );
                lhs $op rhs
            }
            )*
        }
    };
}

promoted_ops! {
    /// Both operands are extended to the result width (sign-extended only
    /// when both are signed) before the operation.
    and_promoted => & as And;
    or_promoted => | as Or;
    xor_promoted => ^ as Xor;
    add_promoted => + as Add;
    sub_promoted => - as Sub;
    mul_promoted => * as Mul;
    div_promoted => / as Div;
    rem_promoted => % as Rem;
}

// ── Same-width operators ───────────────────────────────────

macro_rules! binary_ops {
    ($($Trait:ident::$method:ident, $Assign:ident::$assign:ident => $imp:ident;)*) => {$(
        impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> $Trait
            for Bit<MSB, LSB, SIGNED, LIMBS>
        {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                self.$imp(&rhs)
            }
        }

        impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> $Assign
            for Bit<MSB, LSB, SIGNED, LIMBS>
        {
            fn $assign(&mut self, rhs: Self) {
                *self = self.$imp(&rhs);
            }
        }
    )*};
}

binary_ops! {
    BitAnd::bitand, BitAndAssign::bitand_assign => and_bits;
    BitOr::bitor, BitOrAssign::bitor_assign => or_bits;
    BitXor::bitxor, BitXorAssign::bitxor_assign => xor_bits;
    Add::add, AddAssign::add_assign => sum;
    Sub::sub, SubAssign::sub_assign => difference;
    Mul::mul, MulAssign::mul_assign => product;
    Div::div, DivAssign::div_assign => quotient;
    Rem::rem, RemAssign::rem_assign => remainder;
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Not
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    type Output = Self;

    fn not(self) -> Self {
        Self::from_vector(self.value.not(Self::WIDTH))
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Neg
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    type Output = Self;

    fn neg(self) -> Self {
        if Self::NATIVE {
            Self::from_u64(self.raw().wrapping_neg())
        } else {
            Self::from_vector(self.value.negate(Self::WIDTH))
        }
    }
}

impl<A: ShiftAmount, const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    Shl<A> for Bit<MSB, LSB, SIGNED, LIMBS>
{
    type Output = Self;

    fn shl(self, amount: A) -> Self {
        self.shift_left(known_amount(&amount))
    }
}

impl<A: ShiftAmount, const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    Shr<A> for Bit<MSB, LSB, SIGNED, LIMBS>
{
    type Output = Self;

    /// Logical shift; see [`Bit::ashr`] for the arithmetic form.
    fn shr(self, amount: A) -> Self {
        self.shift_right(known_amount(&amount))
    }
}

impl<A: ShiftAmount, const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    ShlAssign<A> for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn shl_assign(&mut self, amount: A) {
        *self = self.shift_left(known_amount(&amount));
    }
}

impl<A: ShiftAmount, const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    ShrAssign<A> for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn shr_assign(&mut self, amount: A) {
        *self = self.shift_right(known_amount(&amount));
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> PartialOrd
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Ord
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn cmp(&self, other: &Self) -> Ordering {
        if Self::NATIVE {
            if SIGNED {
                self.sext().cmp(&other.sext())
            } else {
                self.raw().cmp(&other.raw())
            }
        } else {
            self.value.cmp_with(&other.value, Self::WIDTH, SIGNED)
        }
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Default
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn default() -> Self {
        Self::ZERO
    }
}

// ── Operand traits ─────────────────────────────────────────

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Packed
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn planes(&self) -> Planes<'_> {
        Planes::two_state(Self::WIDTH, self.value.as_slice())
    }

    fn load(&mut self, src: Planes<'_>, offset: usize) {
        let mut out = LimbVector::<LIMBS>::ZERO;
        extract(
            out.as_mut_slice(),
            Self::WIDTH,
            src.value,
            src.mask_or_known(),
            offset as isize,
        );
        self.value = out;
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> IndexValue
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn index_value(&self) -> Option<usize> {
        if self.negative() {
            return None;
        }
        self.value.shift_amount()
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> ShiftAmount
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    /// Shift amounts are always read unsigned.
    fn shift_amount(&self) -> Option<usize> {
        self.value.shift_amount()
    }
}

// ── Conversions ────────────────────────────────────────────

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> From<bool>
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn from(b: bool) -> Self {
        Self::from_u64(u64::from(b))
    }
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> From<$t>
            for Bit<MSB, LSB, SIGNED, LIMBS>
        {
            fn from(v: $t) -> Self {
                Self::from_u64(u64::from(v))
            }
        }
    )*};
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> From<$t>
            for Bit<MSB, LSB, SIGNED, LIMBS>
        {
            fn from(v: $t) -> Self {
                Self::from_i64(i64::from(v))
            }
        }
    )*};
}

from_unsigned!(u8, u16, u32, u64);
from_signed!(i8, i16, i32, i64);

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> From<usize>
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn from(v: usize) -> Self {
        Self::from_u64(v as u64)
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> From<isize>
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn from(v: isize) -> Self {
        Self::from_i64(v as i64)
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> From<u128>
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn from(v: u128) -> Self {
        Self::from_u128(v)
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> From<i128>
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn from(v: i128) -> Self {
        Self::from_i128(v)
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> From<&str>
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn from(text: &str) -> Self {
        Self::parse_lenient(text)
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> FromStr
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    type Err = LiteralError;

    /// X/Z digits are accepted and read as 0.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut value = LimbVector::<LIMBS>::ZERO;
        let mut mask = LimbVector::<LIMBS>::ZERO;
        parse_planes(
            text,
            Self::WIDTH,
            value.as_mut_slice(),
            mask.as_mut_slice(),
            true,
        )?;
        Ok(Self::from_vector(value.and(&mask.not(Self::WIDTH))))
    }
}

// ── num-traits ─────────────────────────────────────────────

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Zero
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        !self.value.any_set()
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> One
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn one() -> Self {
        Self::from_u64(1)
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Bounded
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn min_value() -> Self {
        let mut out = Self::ZERO;
        if SIGNED {
            out.value.set(Self::WIDTH, Self::WIDTH - 1, true);
        }
        out
    }

    fn max_value() -> Self {
        let mut out = Self::ones();
        if SIGNED {
            out.value.set(Self::WIDTH, Self::WIDTH - 1, false);
        }
        out
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> ToPrimitive
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn to_i64(&self) -> Option<i64> {
        if Self::NATIVE {
            if SIGNED {
                Some(self.sext())
            } else {
                i64::try_from(self.raw()).ok()
            }
        } else {
            self.to_bigint().to_i64()
        }
    }

    fn to_u64(&self) -> Option<u64> {
        if Self::NATIVE {
            if SIGNED {
                u64::try_from(self.sext()).ok()
            } else {
                Some(self.raw())
            }
        } else {
            self.to_bigint().to_u64()
        }
    }

    fn to_i128(&self) -> Option<i128> {
        self.to_bigint().to_i128()
    }

    fn to_u128(&self) -> Option<u128> {
        self.to_bigint().to_u128()
    }
}

// ── Formatting ─────────────────────────────────────────────

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> fmt::Display
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(FormatSpec::BINARY))
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> fmt::Debug
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bit({}'{}h{})",
            Self::WIDTH,
            if SIGNED { "s" } else { "" },
            self.format_with(FormatSpec::new(Radix::Hex))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_indices_map_to_physical_bits() {
        assert_eq!(Bit::<7, 4>::physical(4), Some(0));
        assert_eq!(Bit::<7, 4>::physical(3), None);
        assert_eq!(Bit::<0, 7>::physical(7), Some(0));
        assert_eq!(Bit::<0, 7>::physical(0), Some(7));
        assert_eq!(Bit::<7, 4>::window_start(6, 5), 1);
        assert_eq!(Bit::<0, 7>::window_start(2, 5), 2);
    }

    #[test]
    fn holder_follows_width() {
        assert_eq!(Bit::<0>::HOLDER, HolderKind::Bool);
        assert_eq!(Bit::<7, 0, true>::HOLDER, HolderKind::I8);
        assert_eq!(Bit::<64, 0, false, 2>::HOLDER, HolderKind::Limbs(2));
        assert!(!Bit::<64, 0, false, 2>::NATIVE);
    }

    #[test]
    fn native_kind() {
        let v = Bit::<7, 0, true>::from_i64(-3);
        assert_eq!(v.native(), Some(Native::I8(-3)));
        assert_eq!(Bit::<100, 0, false, 2>::ZERO.native(), None);
    }
}
