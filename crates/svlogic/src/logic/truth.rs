//! Four-state truth tables over `(value, mask)` limb lanes.
//!
//! Encoding per bit: `mask = 0` is a known `0`/`1` held in `value`;
//! `mask = 1` is `X` when `value = 0` and `Z` when `value = 1`.
//! Results never contain `Z`: an unknown result is always `X`.

use std::fmt;
use std::ops::Not;

/// One four-state bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    Zero,
    One,
    #[default]
    X,
    Z,
}

impl State {
    pub const fn from_planes(value: bool, mask: bool) -> Self {
        match (mask, value) {
            (false, false) => State::Zero,
            (false, true) => State::One,
            (true, false) => State::X,
            (true, true) => State::Z,
        }
    }

    /// `(value, mask)` encoding.
    pub const fn planes(self) -> (bool, bool) {
        match self {
            State::Zero => (false, false),
            State::One => (true, false),
            State::X => (false, true),
            State::Z => (true, true),
        }
    }

    pub const fn is_known(self) -> bool {
        matches!(self, State::Zero | State::One)
    }

    pub const fn char(self) -> char {
        match self {
            State::Zero => '0',
            State::One => '1',
            State::X => 'x',
            State::Z => 'z',
        }
    }
}

impl From<bool> for State {
    fn from(b: bool) -> Self {
        if b { State::One } else { State::Zero }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

// ─────────────────────────────────────────────────────────
//  Bitwise lanes
// ─────────────────────────────────────────────────────────

/// A known 0 on either side wins; two known 1s give 1; otherwise X.
#[inline]
pub(crate) fn and(av: u64, am: u64, bv: u64, bm: u64) -> (u64, u64) {
    let a_zero = !av & !am;
    let b_zero = !bv & !bm;
    let zero = a_zero | b_zero;
    let one = av & !am & bv & !bm;
    (one, !(zero | one))
}

/// A known 1 on either side wins; two known 0s give 0; otherwise X.
#[inline]
pub(crate) fn or(av: u64, am: u64, bv: u64, bm: u64) -> (u64, u64) {
    let one = (av & !am) | (bv & !bm);
    let zero = !av & !am & !bv & !bm;
    (one, !(zero | one))
}

#[inline]
pub(crate) fn xor(av: u64, am: u64, bv: u64, bm: u64) -> (u64, u64) {
    let m = am | bm;
    ((av ^ bv) & !m, m)
}

#[inline]
pub(crate) fn not(v: u64, m: u64) -> (u64, u64) {
    (!v & !m, m)
}

// ─────────────────────────────────────────────────────────
//  Reductions
// ─────────────────────────────────────────────────────────

/// Reduction over a whole vector. `value` and `mask` hold `width` bits with
/// every higher bit clear.
pub(crate) fn reduce_and(value: &[u64], mask: &[u64], width: usize) -> State {
    let mut any_zero = false;
    let mut any_unknown = false;
    for (i, (&v, &m)) in value.iter().zip(mask).enumerate() {
        let valid = lane_mask(width, i);
        any_zero |= !v & !m & valid != 0;
        any_unknown |= m & valid != 0;
    }
    if any_zero {
        State::Zero
    } else if any_unknown {
        State::X
    } else {
        State::One
    }
}

pub(crate) fn reduce_or(value: &[u64], mask: &[u64]) -> State {
    let any_one = value.iter().zip(mask).any(|(&v, &m)| v & !m != 0);
    let any_unknown = mask.iter().any(|&m| m != 0);
    if any_one {
        State::One
    } else if any_unknown {
        State::X
    } else {
        State::Zero
    }
}

pub(crate) fn reduce_xor(value: &[u64], mask: &[u64]) -> State {
    if mask.iter().any(|&m| m != 0) {
        return State::X;
    }
    let parity: u32 = value.iter().map(|v| v.count_ones()).sum();
    State::from(parity % 2 == 1)
}

impl Not for State {
    type Output = State;

    fn not(self) -> State {
        match self {
            State::Zero => State::One,
            State::One => State::Zero,
            State::X | State::Z => State::X,
        }
    }
}

fn lane_mask(width: usize, lane: usize) -> u64 {
    let lo = lane * 64;
    if lo + 64 <= width {
        u64::MAX
    } else if lo >= width {
        0
    } else {
        u64::MAX >> (64 - (width - lo))
    }
}
