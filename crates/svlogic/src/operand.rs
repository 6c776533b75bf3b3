//! Values used as bit indices and shift amounts.

/// A dynamic bit index.
///
/// `None` means the index is unusable: it carries X/Z bits, is negative, or
/// does not fit a `usize`. Reads through such an index yield 0 (two-state) or
/// X (four-state) and writes are dropped.
pub trait IndexValue {
    fn index_value(&self) -> Option<usize>;
}

/// A shift amount.
pub trait ShiftAmount {
    /// `None` for amounts too large to represent; such shifts clear (or
    /// sign-fill) the whole operand.
    fn shift_amount(&self) -> Option<usize>;

    /// Amounts with X/Z bits make a four-state shift fully X.
    fn is_unknown(&self) -> bool {
        false
    }
}

macro_rules! unsigned_operand {
    ($($t:ty),*) => {$(
        impl IndexValue for $t {
            fn index_value(&self) -> Option<usize> {
                usize::try_from(*self).ok()
            }
        }

        impl ShiftAmount for $t {
            fn shift_amount(&self) -> Option<usize> {
                usize::try_from(*self).ok()
            }
        }
    )*};
}

macro_rules! signed_operand {
    ($($t:ty),*) => {$(
        impl IndexValue for $t {
            fn index_value(&self) -> Option<usize> {
                usize::try_from(*self).ok()
            }
        }
    )*};
}

unsigned_operand!(u8, u16, u32, u64, usize);
signed_operand!(i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_index_is_invalid() {
        assert_eq!((-1i32).index_value(), None);
        assert_eq!(7i64.index_value(), Some(7));
        assert_eq!(3u8.shift_amount(), Some(3));
    }
}
