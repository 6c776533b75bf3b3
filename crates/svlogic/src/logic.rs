//! Four-state (`logic`) vectors.
//!
//! A [`Logic`] pairs a value plane with an X/Z mask plane of the same width.
//! Bitwise operators follow the IEEE 1800 truth tables bit by bit; arithmetic,
//! shifts and relational operators turn the whole result X as soon as any
//! operand bit is unknown.

mod truth;

use std::cmp::Ordering;
use std::fmt;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};
use std::str::FromStr;

use log::debug;
use num_bigint::BigUint;

pub use truth::State;

use crate::bit::Bit;
use crate::limbs::{self, LimbVector, extract, fill_outside, splice};
use crate::literal::{FormatSpec, LiteralError, format_planes, parse_planes};
use crate::operand::{IndexValue, ShiftAmount};
use crate::packed::{Packed, Planes};
use crate::promote::{Op, Operand, expr_type, operand_signed, operand_width};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Logic<const MSB: usize, const LSB: usize = 0, const SIGNED: bool = false, const LIMBS: usize = 1>
{
    pub(crate) value: Bit<MSB, LSB, SIGNED, LIMBS>,
    pub(crate) mask: Bit<MSB, LSB, false, LIMBS>,
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    Logic<MSB, LSB, SIGNED, LIMBS>
{
    pub const WIDTH: usize = Bit::<MSB, LSB, SIGNED, LIMBS>::WIDTH;
    pub const BIG_ENDIAN: bool = Bit::<MSB, LSB, SIGNED, LIMBS>::BIG_ENDIAN;
    pub const OPERAND: Operand = Operand::new(Self::WIDTH, SIGNED);

    pub const ZERO: Self = Self {
        value: Bit::ZERO,
        mask: Bit::ZERO,
    };

    /// Every bit X.
    pub fn x() -> Self {
        Self {
            value: Bit::ZERO,
            mask: Bit::ones(),
        }
    }

    /// Every bit Z.
    pub fn z() -> Self {
        Self {
            value: Bit::ones(),
            mask: Bit::ones(),
        }
    }

    pub fn known(value: Bit<MSB, LSB, SIGNED, LIMBS>) -> Self {
        Self {
            value,
            mask: Bit::ZERO,
        }
    }

    /// Build from raw planes using the `(value, mask)` encoding of [`State`].
    pub fn from_planes(value: Bit<MSB, LSB, SIGNED, LIMBS>, mask: Bit<MSB, LSB, false, LIMBS>) -> Self {
        Self { value, mask }
    }

    fn from_vectors(value: LimbVector<LIMBS>, mask: LimbVector<LIMBS>) -> Self {
        Self {
            value: Bit::from_vector(value),
            mask: Bit::from_vector(mask),
        }
    }

    pub fn value(&self) -> &Bit<MSB, LSB, SIGNED, LIMBS> {
        &self.value
    }

    pub fn mask(&self) -> &Bit<MSB, LSB, false, LIMBS> {
        &self.mask
    }

    pub fn has_unknown(&self) -> bool {
        self.mask.any_set()
    }

    /// Known value with X/Z bits read as 0.
    pub fn to_bit(self) -> Bit<MSB, LSB, SIGNED, LIMBS> {
        Bit::from_vector(self.value.value.and(&self.mask.value.not(Self::WIDTH)))
    }

    /// Apply a truth-table lane function limb by limb.
    fn lanes(&self, rhs: &Self, f: fn(u64, u64, u64, u64) -> (u64, u64)) -> Self {
        let mut value = self.value.value;
        let mut mask = self.mask.value;
        for (((v, m), rv), rm) in value
            .limbs
            .iter_mut()
            .zip(mask.limbs.iter_mut())
            .zip(&rhs.value.value.limbs)
            .zip(&rhs.mask.value.limbs)
        {
            (*v, *m) = f(*v, *m, *rv, *rm);
        }
        value.mask_off(Self::WIDTH);
        mask.mask_off(Self::WIDTH);
        Self::from_vectors(value, mask)
    }

    // ── Per-bit access ─────────────────────────────────────

    /// Out-of-range indices read X.
    pub fn get(&self, i: usize) -> State {
        if Bit::<MSB, LSB, SIGNED, LIMBS>::physical(i).is_none() {
            return State::X;
        }
        State::from_planes(self.value.get(i), self.mask.get(i))
    }

    /// Write a known bit; the bit's mask is cleared.
    pub fn set(&mut self, i: usize, bit: bool) {
        self.value.set(i, bit);
        self.mask.set(i, false);
    }

    pub fn set_state(&mut self, i: usize, state: State) {
        let (v, m) = state.planes();
        self.value.set(i, v);
        self.mask.set(i, m);
    }

    pub fn set_x(&mut self, i: usize) {
        self.set_state(i, State::X);
    }

    pub fn set_z(&mut self, i: usize) {
        self.set_state(i, State::Z);
    }

    pub fn x_set(&self, i: usize) -> bool {
        self.get(i) == State::X
    }

    pub fn z_set(&self, i: usize) -> bool {
        self.get(i) == State::Z
    }

    /// An unknown or out-of-range index reads X.
    pub fn index(&self, idx: &(impl IndexValue + ?Sized)) -> Logic<0> {
        match idx.index_value() {
            Some(i) => Logic::from(self.get(i)),
            None => Logic::x(),
        }
    }

    /// Writes through an unknown or out-of-range index are dropped.
    pub fn set_index(&mut self, idx: &(impl IndexValue + ?Sized), bit: impl Into<State>) {
        if let Some(i) = idx.index_value() {
            self.set_state(i, bit.into());
        }
    }

    // ── Aggregate contract ─────────────────────────────────

    /// Declared bits `a..b` as an unsigned value. Positions outside the
    /// source read X; result bits beyond `|a-b|+1` are 0.
    pub fn slice<const RM: usize, const RL: usize>(&self, a: usize, b: usize) -> Logic<RM, 0, false, RL> {
        let value = self.value.slice::<RM, RL>(a, b);
        let mut mask = self.mask.slice::<RM, RL>(a, b);
        let len = a.abs_diff(b).saturating_add(1).min(Logic::<RM, 0, false, RL>::WIDTH);
        fill_outside(
            mask.value.as_mut_slice(),
            Bit::<MSB, LSB, SIGNED, LIMBS>::window_start(a, b),
            len,
            Self::WIDTH,
        );
        Logic { value, mask }
    }

    /// Overwrite declared bits `a..b` with the low bits of `src`. A two-state
    /// source writes known bits.
    pub fn update(&mut self, a: usize, b: usize, src: &(impl Packed + ?Sized)) {
        let src = src.planes();
        let start = Bit::<MSB, LSB, SIGNED, LIMBS>::window_start(a, b);
        let len = a.abs_diff(b).saturating_add(1);
        splice(self.value.value.as_mut_slice(), Self::WIDTH, start, len, src.value, &[]);
        splice(
            self.mask.value.as_mut_slice(),
            Self::WIDTH,
            start,
            len,
            src.mask_or_known(),
            &[],
        );
    }

    /// Extend (or truncate) both planes; a signed X/Z top bit extends as X/Z.
    pub fn extend<const RM: usize, const RL: usize>(&self) -> Logic<RM, 0, SIGNED, RL> {
        self.resized::<RM, SIGNED, RL>()
    }

    /// Both planes resized with the given signedness.
    fn resized<const RM: usize, const RS: bool, const RL: usize>(&self) -> Logic<RM, 0, RS, RL> {
        let width = Logic::<RM, 0, RS, RL>::WIDTH;
        Logic::from_vectors(
            self.value.value.resize(Self::WIDTH, width, RS),
            self.mask.value.resize(Self::WIDTH, width, RS),
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
        low: &Logic<M2, L2, S2, B2>,
    ) -> Logic<RM, 0, false, RL> {
        Logic {
            value: self.value.to_unsigned().concat(&low.value),
            mask: self.mask.concat(&low.mask),
        }
    }

    /// `{parts[0], parts[1], ...}` assigned to this type: missing high bits
    /// are 0 and excess high bits are dropped.
    pub fn pack(parts: &[&dyn Packed]) -> Self {
        let mut out = Self::ZERO;
        let mut offset = 0isize;
        for part in parts.iter().rev() {
            let src = part.planes();
            splice(
                out.value.value.as_mut_slice(),
                Self::WIDTH,
                offset,
                src.width,
                src.value,
                &[],
            );
            splice(
                out.mask.value.as_mut_slice(),
                Self::WIDTH,
                offset,
                src.width,
                src.mask_or_known(),
                &[],
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

    /// Known ones only.
    fn known_ones(&self) -> Bit<MSB, LSB, SIGNED, LIMBS> {
        self.to_bit()
    }

    pub fn negative(&self) -> bool {
        SIGNED && self.get_physical(Self::WIDTH - 1) == State::One
    }

    fn get_physical(&self, p: usize) -> State {
        State::from_planes(
            self.value.value.get(Self::WIDTH, p),
            self.mask.value.get(Self::WIDTH, p),
        )
    }

    /// Every bit a known 0.
    pub fn is_zero(&self) -> bool {
        !self.has_unknown() && self.value.is_zero()
    }

    /// Some bit is a known 1.
    pub fn any_set(&self) -> bool {
        self.known_ones().any_set()
    }

    /// Every bit is a known 1.
    pub fn all_set(&self) -> bool {
        !self.has_unknown() && self.value.all_set()
    }

    pub fn popcount(&self) -> u32 {
        self.known_ones().popcount()
    }

    pub fn highest_bit(&self) -> Option<usize> {
        self.known_ones().highest_bit()
    }

    /// Known and nonzero.
    pub fn to_bool(self) -> bool {
        !self.has_unknown() && self.value.any_set()
    }

    /// Low 64 bits; 0 when any bit is unknown.
    pub fn to_u64(self) -> u64 {
        if self.has_unknown() {
            0
        } else {
            self.value.to_u64()
        }
    }

    /// Low 64 bits, sign-extended when `SIGNED`; 0 when any bit is unknown.
    pub fn to_i64(self) -> i64 {
        if self.has_unknown() {
            0
        } else {
            self.value.to_i64()
        }
    }

    pub fn to_signed(self) -> Logic<MSB, LSB, true, LIMBS> {
        Logic {
            value: self.value.to_signed(),
            mask: self.mask,
        }
    }

    pub fn to_unsigned(self) -> Logic<MSB, LSB, false, LIMBS> {
        Logic {
            value: self.value.to_unsigned(),
            mask: self.mask,
        }
    }

    /// Value plane, or `None` when any bit is unknown.
    pub fn to_biguint(self) -> Option<BigUint> {
        (!self.has_unknown()).then(|| self.value.to_biguint())
    }

    /// `(value, mask)` planes.
    pub fn four_state(self) -> (BigUint, BigUint) {
        (self.value.to_biguint(), self.mask.to_biguint())
    }

    pub fn from_four_state(value: &BigUint, mask: &BigUint) -> Self {
        Self {
            value: Bit::from_biguint(value),
            mask: Bit::from_biguint(mask),
        }
    }

    // ── Reductions ─────────────────────────────────────────

    pub fn r_and(&self) -> Logic<0> {
        Logic::from(truth::reduce_and(
            self.value.value.as_slice(),
            self.mask.value.as_slice(),
            Self::WIDTH,
        ))
    }

    pub fn r_or(&self) -> Logic<0> {
        Logic::from(truth::reduce_or(
            self.value.value.as_slice(),
            self.mask.value.as_slice(),
        ))
    }

    pub fn r_xor(&self) -> Logic<0> {
        Logic::from(truth::reduce_xor(
            self.value.value.as_slice(),
            self.mask.value.as_slice(),
        ))
    }

    pub fn r_nand(&self) -> Logic<0> {
        !self.r_and()
    }

    pub fn r_nor(&self) -> Logic<0> {
        !self.r_or()
    }

    pub fn r_xnor(&self) -> Logic<0> {
        !self.r_xor()
    }

    /// `!v`: 0 when some bit is a known 1, X when unknown, 1 otherwise.
    pub fn logical_not(&self) -> Logic<0> {
        !self.r_or()
    }

    // ── Arithmetic ─────────────────────────────────────────

    pub fn xnor(&self, rhs: &Self) -> Self {
        !(*self ^ *rhs)
    }

    /// Known operands only; otherwise every result bit is X.
    fn arith(
        &self,
        rhs: &Self,
        op: impl FnOnce(Bit<MSB, LSB, SIGNED, LIMBS>, Bit<MSB, LSB, SIGNED, LIMBS>) -> Bit<MSB, LSB, SIGNED, LIMBS>,
    ) -> Self {
        if self.has_unknown() || rhs.has_unknown() {
            return Self::x();
        }
        Self::known(op(self.value, rhs.value))
    }

    fn and_lanes(&self, rhs: &Self) -> Self {
        self.lanes(rhs, truth::and)
    }

    fn or_lanes(&self, rhs: &Self) -> Self {
        self.lanes(rhs, truth::or)
    }

    fn xor_lanes(&self, rhs: &Self) -> Self {
        self.lanes(rhs, truth::xor)
    }

    fn sum(&self, rhs: &Self) -> Self {
        self.arith(rhs, |a, b| a + b)
    }

    fn difference(&self, rhs: &Self) -> Self {
        self.arith(rhs, |a, b| a - b)
    }

    fn product(&self, rhs: &Self) -> Self {
        self.arith(rhs, |a, b| a * b)
    }

    /// Division by zero is X.
    fn quotient(&self, rhs: &Self) -> Self {
        if rhs.is_zero() {
            return Self::x();
        }
        self.arith(rhs, |a, b| a / b)
    }

    fn remainder(&self, rhs: &Self) -> Self {
        if rhs.is_zero() {
            return Self::x();
        }
        self.arith(rhs, |a, b| a % b)
    }

    pub fn inc(&mut self) {
        *self = self.sum(&Self::from(1u8));
    }

    pub fn dec(&mut self) {
        *self = self.difference(&Self::from(1u8));
    }

    /// `self ** exp`; unknown operands and `0 ** negative` are X.
    pub fn pow<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        exp: &Logic<M2, L2, S2, B2>,
    ) -> Self {
        if self.has_unknown() || exp.has_unknown() {
            return Self::x();
        }
        if exp.value.negative() && self.value.is_zero() {
            return Self::x();
        }
        Self::known(self.value.pow(&exp.value))
    }

    // ── Shifts ─────────────────────────────────────────────

    fn shift(
        &self,
        amount: &impl ShiftAmount,
        op: impl FnOnce(Bit<MSB, LSB, SIGNED, LIMBS>) -> Bit<MSB, LSB, SIGNED, LIMBS>,
    ) -> Self {
        if self.has_unknown() || amount.is_unknown() {
            return Self::x();
        }
        Self::known(op(self.value))
    }

    pub fn ashr(&self, amount: impl ShiftAmount) -> Self {
        self.shift(&amount, |v| v.ashr(amount.shift_amount().unwrap_or(usize::MAX)))
    }

    pub fn ashl(&self, amount: impl ShiftAmount) -> Self {
        self.shift(&amount, |v| v.ashl(amount.shift_amount().unwrap_or(usize::MAX)))
    }

    // ── Relational ─────────────────────────────────────────

    fn relation<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Logic<M2, L2, S2, B2>,
        holds: impl FnOnce(Ordering) -> bool,
    ) -> Logic<0> {
        if self.has_unknown() || rhs.has_unknown() {
            return Logic::x();
        }
        Logic::from(holds(self.value.cmp_promoted(&rhs.value)))
    }

    /// `==`: X when either operand has an unknown bit.
    pub fn equals<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Logic<M2, L2, S2, B2>,
    ) -> Logic<0> {
        self.relation(rhs, Ordering::is_eq)
    }

    pub fn not_equals<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Logic<M2, L2, S2, B2>,
    ) -> Logic<0> {
        self.relation(rhs, Ordering::is_ne)
    }

    pub fn less<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Logic<M2, L2, S2, B2>,
    ) -> Logic<0> {
        self.relation(rhs, Ordering::is_lt)
    }

    pub fn less_eq<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Logic<M2, L2, S2, B2>,
    ) -> Logic<0> {
        self.relation(rhs, Ordering::is_le)
    }

    pub fn greater<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Logic<M2, L2, S2, B2>,
    ) -> Logic<0> {
        self.relation(rhs, Ordering::is_gt)
    }

    pub fn greater_eq<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Logic<M2, L2, S2, B2>,
    ) -> Logic<0> {
        self.relation(rhs, Ordering::is_ge)
    }

    /// `===`: both planes compared as data after extension.
    pub fn case_eq<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Logic<M2, L2, S2, B2>,
    ) -> bool {
        let signed = operand_signed(Op::CaseEq, Self::OPERAND, Logic::<M2, L2, S2, B2>::OPERAND);
        let rhs_width = Logic::<M2, L2, S2, B2>::WIDTH;
        limbs::compare(
            self.value.value.as_slice(),
            Self::WIDTH,
            rhs.value.value.as_slice(),
            rhs_width,
            signed,
        )
        .is_eq()
            && limbs::compare(
                self.mask.value.as_slice(),
                Self::WIDTH,
                rhs.mask.value.as_slice(),
                rhs_width,
                signed,
            )
            .is_eq()
    }

    pub fn case_ne<const M2: usize, const L2: usize, const S2: bool, const B2: usize>(
        &self,
        rhs: &Logic<M2, L2, S2, B2>,
    ) -> bool {
        !self.case_eq(rhs)
    }

    // ── Text ───────────────────────────────────────────────

    /// Format per a `<width><base>` spec; an unreadable spec prints binary.
    pub fn format(&self, spec: &str) -> String {
        self.format_with(FormatSpec::lenient(spec))
    }

    pub fn format_with(&self, spec: FormatSpec) -> String {
        format_planes(spec, self.planes(), SIGNED)
    }

    /// Parse leniently: invalid characters are skipped.
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
        Self::from_vectors(value, mask)
    }
}

// ── Mixed-width operators ──────────────────────────────────

macro_rules! promoted_ops {
    ($($(#[$doc:meta])* $name:ident => $op:tt as $kind:ident;)*) => {
        impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
            Logic<MSB, LSB, SIGNED, LIMBS>
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
                rhs: &Logic<M2, L2, S2, B2>,
            ) -> Logic<RM, 0, RS, RL> {
                const {
                    let (lhs, rhs) = (Self::OPERAND, Logic::<M2, L2, S2, B2>::OPERAND);
                    let width = Logic::<RM, 0, RS, RL>::WIDTH;
                    assert!(
                        operand_width(Op::$kind, lhs, rhs, Some(width)) == width,
                        "result is narrower than the promoted operands"
                    );
                    assert!(RS == expr_type(Op::$kind, lhs, rhs).signed, "result signedness mismatch");
                };
                self.resized::<RM, RS, RL>() $op rhs.resized::<RM, RS, RL>()
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
            for Logic<MSB, LSB, SIGNED, LIMBS>
        {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                self.$imp(&rhs)
            }
        }

        impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> $Assign
            for Logic<MSB, LSB, SIGNED, LIMBS>
        {
            fn $assign(&mut self, rhs: Self) {
                *self = self.$imp(&rhs);
            }
        }
    )*};
}

binary_ops! {
    BitAnd::bitand, BitAndAssign::bitand_assign => and_lanes;
    BitOr::bitor, BitOrAssign::bitor_assign => or_lanes;
    BitXor::bitxor, BitXorAssign::bitxor_assign => xor_lanes;
    Add::add, AddAssign::add_assign => sum;
    Sub::sub, SubAssign::sub_assign => difference;
    Mul::mul, MulAssign::mul_assign => product;
    Div::div, DivAssign::div_assign => quotient;
    Rem::rem, RemAssign::rem_assign => remainder;
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Not
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    type Output = Self;

    /// Z bits come out as X.
    fn not(self) -> Self {
        let mut value = self.value.value;
        let mut mask = self.mask.value;
        for (v, m) in value.limbs.iter_mut().zip(mask.limbs.iter_mut()) {
            (*v, *m) = truth::not(*v, *m);
        }
        value.mask_off(Self::WIDTH);
        Self::from_vectors(value, mask)
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Neg
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    type Output = Self;

    fn neg(self) -> Self {
        if self.has_unknown() {
            return Self::x();
        }
        Self::known(-self.value)
    }
}

impl<A: ShiftAmount, const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    Shl<A> for Logic<MSB, LSB, SIGNED, LIMBS>
{
    type Output = Self;

    fn shl(self, amount: A) -> Self {
        self.shift(&amount, |v| v << amount.shift_amount().unwrap_or(usize::MAX))
    }
}

impl<A: ShiftAmount, const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    Shr<A> for Logic<MSB, LSB, SIGNED, LIMBS>
{
    type Output = Self;

    fn shr(self, amount: A) -> Self {
        self.shift(&amount, |v| v >> amount.shift_amount().unwrap_or(usize::MAX))
    }
}

impl<A: ShiftAmount, const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    ShlAssign<A> for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn shl_assign(&mut self, amount: A) {
        *self = *self << amount;
    }
}

impl<A: ShiftAmount, const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    ShrAssign<A> for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn shr_assign(&mut self, amount: A) {
        *self = *self >> amount;
    }
}

/// All X.
impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Default
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn default() -> Self {
        Self::x()
    }
}

// ── Operand traits ─────────────────────────────────────────

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Packed
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn planes(&self) -> Planes<'_> {
        Planes::four_state(
            Self::WIDTH,
            self.value.value.as_slice(),
            self.mask.value.as_slice(),
        )
    }

    fn load(&mut self, src: Planes<'_>, offset: usize) {
        let mut value = LimbVector::<LIMBS>::ZERO;
        let mut mask = LimbVector::<LIMBS>::ZERO;
        let start = offset as isize;
        extract(value.as_mut_slice(), Self::WIDTH, src.value, &[], start);
        extract(mask.as_mut_slice(), Self::WIDTH, src.mask_or_known(), &[], start);
        fill_outside(mask.as_mut_slice(), start, Self::WIDTH, src.width);
        *self = Self::from_vectors(value, mask);
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> IndexValue
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn index_value(&self) -> Option<usize> {
        if self.has_unknown() {
            return None;
        }
        self.value.index_value()
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> ShiftAmount
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn shift_amount(&self) -> Option<usize> {
        self.value.shift_amount()
    }

    fn is_unknown(&self) -> bool {
        self.has_unknown()
    }
}

// ── Conversions ────────────────────────────────────────────

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    From<Bit<MSB, LSB, SIGNED, LIMBS>> for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn from(value: Bit<MSB, LSB, SIGNED, LIMBS>) -> Self {
        Self::known(value)
    }
}

/// X and Z bits become 0.
impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    From<Logic<MSB, LSB, SIGNED, LIMBS>> for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn from(value: Logic<MSB, LSB, SIGNED, LIMBS>) -> Self {
        value.to_bit()
    }
}

impl From<State> for Logic<0> {
    fn from(state: State) -> Self {
        let (v, m) = state.planes();
        Self {
            value: Bit::from(v),
            mask: Bit::from(m),
        }
    }
}

impl From<Logic<0>> for State {
    fn from(bit: Logic<0>) -> Self {
        bit.get(0)
    }
}

macro_rules! from_primitive {
    ($($t:ty),*) => {$(
        impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> From<$t>
            for Logic<MSB, LSB, SIGNED, LIMBS>
        {
            fn from(v: $t) -> Self {
                Self::known(Bit::from(v))
            }
        }
    )*};
}

from_primitive!(bool, u8, u16, u32, u64, usize, u128, i8, i16, i32, i64, isize, i128);

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> From<&str>
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn from(text: &str) -> Self {
        Self::parse_lenient(text)
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> FromStr
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    type Err = LiteralError;

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
        Ok(Self::from_vectors(value, mask))
    }
}

// ── Formatting ─────────────────────────────────────────────

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> fmt::Display
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(FormatSpec::BINARY))
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> fmt::Debug
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Logic({}'{}b{})",
            Self::WIDTH,
            if SIGNED { "s" } else { "" },
            self.format_with(FormatSpec::BINARY)
        )
    }
}
