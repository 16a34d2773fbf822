use thiserror::Error;

/// Everything that can make a fixed-point format, or a request made against
/// one, invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFormatError {
    #[error("at least two of word length, msb and lsb are required")]
    UnderDetermined,

    #[error("inconsistent format: word length {wl} != msb {msb} - lsb {lsb} + 1")]
    Inconsistent { wl: i32, msb: i32, lsb: i32 },

    #[error("word length must be positive, got {0}")]
    NonPositiveWordLength(i32),

    #[error("a signed format needs at least 2 bits, got {0}")]
    SignedTooShort(i32),

    #[error("format fields overflow the exponent range")]
    Overflow,

    #[error("exponents ({msb},{lsb}) fall outside the f64 weight range")]
    ExponentOutOfRange { msb: i32, lsb: i32 },

    #[error("unrecognized notation '{0}'")]
    UnrecognizedNotation(String),

    #[error("a notation string cannot be combined with explicit fields")]
    NotationWithFields,

    #[error("unknown {option} '{value}'")]
    UnknownOption { option: &'static str, value: String },

    #[error("bit pattern has {got} bits, the format has {expected}")]
    BitsLength { expected: i32, got: usize },

    #[error("invalid character '{0}' in bit pattern at position {1}")]
    InvalidBit(char, usize),
}
