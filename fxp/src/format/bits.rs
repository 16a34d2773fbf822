use std::fmt;
use std::str::FromStr;

use super::arith::pow2;
use super::Fpf;
use crate::error::InvalidFormatError;

/// A concrete word of bits, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct BitPattern {
    bits: Vec<bool>,
}

impl BitPattern {
    pub fn new(bits: Vec<bool>) -> Self {
        BitPattern { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits from the most significant one down.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
}

impl FromStr for BitPattern {
    type Err = InvalidFormatError;

    /// A string of `0` and `1`, with `_` allowed as a group separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .filter(|&(_, c)| c != '_')
            .map(|(i, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(InvalidFormatError::InvalidBit(c, i)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(BitPattern::new)
    }
}

impl TryFrom<String> for BitPattern {
    type Error = InvalidFormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BitPattern> for String {
    fn from(pattern: BitPattern) -> String {
        pattern.to_string()
    }
}

impl fmt::Display for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Fpf {
    /// The word encoding `value` after rounding to the format.
    ///
    /// Returns `None` when the rounded value is not finite or falls outside
    /// `range()`.
    pub fn encode(&self, value: f64) -> Option<BitPattern> {
        let rounded = self.round_to_format(value);
        let (min, max) = self.range();
        if !rounded.is_finite() || rounded < min || rounded > max {
            return None;
        }

        // Peel the weights off msb first; the sign bit weighs -2^msb.
        let mut rest = rounded;
        let bits = self
            .positions()
            .map(|p| {
                let weight = pow2(p);
                if self.signed && p == self.msb {
                    let bit = rest < 0.0;
                    if bit {
                        rest += weight;
                    }
                    bit
                } else {
                    let bit = rest >= weight;
                    if bit {
                        rest -= weight;
                    }
                    bit
                }
            })
            .collect();
        Some(BitPattern::new(bits))
    }

    /// The value a word holds in this format.
    pub fn decode(&self, pattern: &BitPattern) -> Result<f64, InvalidFormatError> {
        if usize::try_from(self.wl).ok() != Some(pattern.len()) {
            return Err(InvalidFormatError::BitsLength {
                expected: self.wl,
                got: pattern.len(),
            });
        }
        Ok(self
            .positions()
            .zip(pattern.bits())
            .filter(|&(_, &bit)| bit)
            .map(|(p, _)| {
                if self.signed && p == self.msb {
                    -pow2(p)
                } else {
                    pow2(p)
                }
            })
            .sum())
    }
}
