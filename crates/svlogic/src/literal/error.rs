use thiserror::Error;

use super::Radix;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("empty literal")]
    Empty,

    #[error("invalid literal size `{0}`")]
    InvalidSize(String),

    #[error("invalid base letter `{0}`")]
    InvalidBase(char),

    #[error("invalid digit `{digit}` in {radix} literal")]
    InvalidDigit { digit: char, radix: Radix },

    #[error("x/z digits are not allowed in decimal literals")]
    UnknownInDecimal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatSpecError {
    #[error("invalid format width `{0}`")]
    InvalidWidth(String),

    #[error("unknown format base `{0}`")]
    UnknownBase(char),
}
