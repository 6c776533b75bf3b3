//! Bit-plane access used by aggregate containers (packed arrays, structs,
//! unions) built on top of [`Bit`](crate::Bit) and [`Logic`](crate::Logic).

/// Borrowed view of a value's planes.
///
/// `mask` is `None` for two-state values. Both planes hold `width` bits in
/// physical order (limb 0 = LSB) with every bit at or above `width` clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Planes<'a> {
    pub width: usize,
    pub value: &'a [u64],
    pub mask: Option<&'a [u64]>,
}

impl<'a> Planes<'a> {
    pub fn two_state(width: usize, value: &'a [u64]) -> Self {
        Self {
            width,
            value,
            mask: None,
        }
    }

    pub fn four_state(width: usize, value: &'a [u64], mask: &'a [u64]) -> Self {
        Self {
            width,
            value,
            mask: Some(mask),
        }
    }

    /// Mask plane, or an empty slice (reads as all known) for two-state values.
    pub fn mask_or_known(&self) -> &'a [u64] {
        self.mask.unwrap_or(&[])
    }

    pub fn has_unknown(&self) -> bool {
        self.mask.is_some_and(|m| m.iter().any(|&l| l != 0))
    }
}

/// A value that can be packed into, or unpacked from, a wider vector.
pub trait Packed {
    fn planes(&self) -> Planes<'_>;

    /// Overwrite this value with its width's worth of `src` bits starting at
    /// physical bit `offset`. Bits past the end of `src` read as 0 for
    /// two-state values and X for four-state values.
    fn load(&mut self, src: Planes<'_>, offset: usize);

    fn width(&self) -> usize {
        self.planes().width
    }
}
