//! Width and signedness rules for mixed-width operands
//! (IEEE 1800-2017 §11.6.1 expression bit lengths, §11.8.1 signedness).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    And,
    Or,
    Xor,
    Xnor,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Shl,
    Shr,
    Ashl,
    Ashr,
    Eq,
    Ne,
    CaseEq,
    CaseNe,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    LogicAnd,
    LogicOr,
}

impl Op {
    /// Operators whose result is a single bit.
    pub const fn is_compare(self) -> bool {
        matches!(
            self,
            Op::Eq
                | Op::Ne
                | Op::CaseEq
                | Op::CaseNe
                | Op::Less
                | Op::LessEq
                | Op::Greater
                | Op::GreaterEq
                | Op::LogicAnd
                | Op::LogicOr
        )
    }

    /// Operators whose right operand is self-determined.
    pub const fn is_shift(self) -> bool {
        matches!(self, Op::Shl | Op::Shr | Op::Ashl | Op::Ashr | Op::Pow)
    }
}

/// Width and signedness of one operand or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand {
    pub width: usize,
    pub signed: bool,
}

impl Operand {
    pub const fn new(width: usize, signed: bool) -> Self {
        Self { width, signed }
    }
}

/// A binary result is signed only when both operands are.
pub const fn signed_result(lhs: bool, rhs: bool) -> bool {
    lhs && rhs
}

pub const fn promoted_width(lhs: usize, rhs: usize) -> usize {
    if lhs > rhs { lhs } else { rhs }
}

/// Self-determined type of `lhs op rhs`.
pub const fn expr_type(op: Op, lhs: Operand, rhs: Operand) -> Operand {
    if op.is_compare() {
        return Operand::new(1, false);
    }
    if op.is_shift() {
        return lhs;
    }
    Operand::new(
        promoted_width(lhs.width, rhs.width),
        signed_result(lhs.signed, rhs.signed),
    )
}

/// Width at which the operands of `lhs op rhs` are evaluated when the
/// expression is assigned to a target of `target` bits.
pub const fn operand_width(op: Op, lhs: Operand, rhs: Operand, target: Option<usize>) -> usize {
    if op.is_compare() {
        // Operands size each other; the 1-bit result does not widen them.
        return promoted_width(lhs.width, rhs.width);
    }
    let own = if op.is_shift() {
        lhs.width
    } else {
        promoted_width(lhs.width, rhs.width)
    };
    match target {
        Some(w) => promoted_width(own, w),
        None => own,
    }
}

/// Signedness the operands are coerced to before the operation.
pub const fn operand_signed(op: Op, lhs: Operand, rhs: Operand) -> bool {
    if op.is_shift() {
        lhs.signed
    } else {
        signed_result(lhs.signed, rhs.signed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const U8: Operand = Operand::new(8, false);
    const S8: Operand = Operand::new(8, true);
    const S16: Operand = Operand::new(16, true);

    #[test]
    fn arithmetic_widens_to_larger_operand() {
        assert_eq!(expr_type(Op::Add, U8, S16), Operand::new(16, false));
        assert_eq!(expr_type(Op::Mul, S8, S16), Operand::new(16, true));
    }

    #[test]
    fn comparisons_are_one_bit() {
        assert_eq!(expr_type(Op::Less, S8, S16), Operand::new(1, false));
        assert_eq!(operand_width(Op::Less, S8, S16, Some(32)), 16);
    }

    #[test]
    fn shift_keeps_left_operand() {
        assert_eq!(expr_type(Op::Ashr, S8, Operand::new(64, false)), S8);
        assert_eq!(operand_width(Op::Shl, U8, S16, Some(12)), 12);
        assert!(operand_signed(Op::Ashr, S8, U8));
    }

    #[test]
    fn context_widens_operands() {
        assert_eq!(operand_width(Op::Add, U8, U8, Some(9)), 9);
        assert_eq!(operand_width(Op::Add, U8, S16, Some(4)), 16);
        assert!(!operand_signed(Op::Sub, S8, U8));
    }
}
