/// The role of one bit position in a fixed-point word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BitCategory {
    /// The most significant bit of a two's complement word.
    Sign,
    /// A bit of weight `2^p` with `p >= 0`.
    Integer,
    /// A bit of weight `2^p` with `p < 0`.
    Fractional,
    /// A position outside the word, implicitly zero, drawn as a placeholder.
    Missing,
}

impl BitCategory {
    /// Lowercase name, as used for style names and config keys.
    pub fn name(self) -> &'static str {
        match self {
            BitCategory::Sign => "sign",
            BitCategory::Integer => "integer",
            BitCategory::Fractional => "fractional",
            BitCategory::Missing => "missing",
        }
    }
}
