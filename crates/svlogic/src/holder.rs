//! Width to native integer kind lookup.
//!
//! Values up to 64 bits are backed by the smallest native integer that holds
//! them (sign-correct); wider values fall back to limb storage.

use crate::limbs::limbs_for;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolderKind {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    /// Multi-limb storage with the given number of limbs.
    Limbs(usize),
}

pub const fn holder_kind(width: usize, signed: bool) -> HolderKind {
    match width {
        1 => HolderKind::Bool,
        2..=8 if signed => HolderKind::I8,
        2..=8 => HolderKind::U8,
        9..=16 if signed => HolderKind::I16,
        9..=16 => HolderKind::U16,
        17..=32 if signed => HolderKind::I32,
        17..=32 => HolderKind::U32,
        33..=64 if signed => HolderKind::I64,
        33..=64 => HolderKind::U64,
        _ => HolderKind::Limbs(limbs_for(width)),
    }
}

impl HolderKind {
    pub const fn is_native(self) -> bool {
        !matches!(self, Self::Limbs(_))
    }

    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Storage bits of the holder.
    pub const fn bits(self) -> usize {
        match self {
            Self::Bool => 1,
            Self::U8 | Self::I8 => 8,
            Self::U16 | Self::I16 => 16,
            Self::U32 | Self::I32 => 32,
            Self::U64 | Self::I64 => 64,
            Self::Limbs(n) => n * 64,
        }
    }
}

/// A value held in its native integer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Native {
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
}

impl Native {
    /// `raw` holds the low `width` bits; signed kinds are sign-extended.
    pub(crate) fn from_raw(kind: HolderKind, raw: u64, width: usize) -> Option<Self> {
        let sext = if width >= 64 {
            raw as i64
        } else {
            let sh = 64 - width;
            ((raw << sh) as i64) >> sh
        };
        let native = match kind {
            HolderKind::Bool => Self::Bool(raw & 1 == 1),
            HolderKind::U8 => Self::U8(raw as u8),
            HolderKind::I8 => Self::I8(sext as i8),
            HolderKind::U16 => Self::U16(raw as u16),
            HolderKind::I16 => Self::I16(sext as i16),
            HolderKind::U32 => Self::U32(raw as u32),
            HolderKind::I32 => Self::I32(sext as i32),
            HolderKind::U64 => Self::U64(raw),
            HolderKind::I64 => Self::I64(sext),
            HolderKind::Limbs(_) => return None,
        };
        Some(native)
    }

    pub fn kind(self) -> HolderKind {
        match self {
            Self::Bool(_) => HolderKind::Bool,
            Self::U8(_) => HolderKind::U8,
            Self::I8(_) => HolderKind::I8,
            Self::U16(_) => HolderKind::U16,
            Self::I16(_) => HolderKind::I16,
            Self::U32(_) => HolderKind::U32,
            Self::I32(_) => HolderKind::I32,
            Self::U64(_) => HolderKind::U64,
            Self::I64(_) => HolderKind::I64,
        }
    }
}
