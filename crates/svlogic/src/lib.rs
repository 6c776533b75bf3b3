mod bit;
mod holder;
mod limbs;
mod literal;
mod logic;
mod operand;
mod packed;
mod promote;
#[cfg(feature = "serde")]
mod serialize;

pub use bit::Bit;
pub use holder::{HolderKind, Native, holder_kind};
pub use limbs::{LIMB_BITS, LimbVector, limbs_for};
pub use literal::{
    FormatSpec, FormatSpecError, Literal, LiteralError, Radix, decimal_digits, format_planes,
    natural_width, parse_planes,
};
pub use logic::{Logic, State};
pub use num_bigint::BigUint;
pub use operand::{IndexValue, ShiftAmount};
pub use packed::{Packed, Planes};
pub use promote::{Op, Operand, expr_type, operand_signed, operand_width, promoted_width, signed_result};
