pub mod bits;
mod arith;
mod config;
pub mod notation;

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidFormatError;
use crate::types::BitCategory;

pub use config::FormatConfig;

/// A fixed-point format: a `wl`-bit word whose bits weigh `2^msb` down to
/// `2^lsb`, in two's complement when `signed`.
///
/// Always satisfies `wl == msb - lsb + 1`, and `wl >= 2` when signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fpf {
    wl: i32,
    msb: i32,
    lsb: i32,
    signed: bool,
}

impl Fpf {
    /// Smallest accepted `lsb`: `2^-1074` is the least positive `f64`.
    pub const MIN_EXPONENT: i32 = -1074;

    /// Largest accepted `msb`. Keeps `2^(msb+1)`, and with it both ends of
    /// `range()`, finite.
    pub const MAX_EXPONENT: i32 = 1022;

    /// Build a format from at least two of `wl`, `msb` and `lsb`.
    ///
    /// With two fields the third is derived from `wl = msb - lsb + 1`; with
    /// all three they must agree. The exponents must lie within
    /// [`Fpf::MIN_EXPONENT`]`..=`[`Fpf::MAX_EXPONENT`].
    pub fn create(
        wl: Option<i32>,
        msb: Option<i32>,
        lsb: Option<i32>,
        signed: bool,
    ) -> Result<Fpf, InvalidFormatError> {
        if let Some(wl) = wl {
            if wl <= 0 {
                return Err(InvalidFormatError::NonPositiveWordLength(wl));
            }
        }

        let overflow = || InvalidFormatError::Overflow;
        let (wl, msb, lsb) = match (wl, msb, lsb) {
            (Some(wl), Some(msb), Some(lsb)) => {
                if width(msb, lsb) != Some(wl) {
                    return Err(InvalidFormatError::Inconsistent { wl, msb, lsb });
                }
                (wl, msb, lsb)
            }
            (Some(wl), Some(msb), None) => {
                let lsb = msb.checked_sub(wl - 1).ok_or_else(overflow)?;
                (wl, msb, lsb)
            }
            (Some(wl), None, Some(lsb)) => {
                let msb = lsb.checked_add(wl - 1).ok_or_else(overflow)?;
                (wl, msb, lsb)
            }
            (None, Some(msb), Some(lsb)) => (width(msb, lsb).ok_or_else(overflow)?, msb, lsb),
            _ => return Err(InvalidFormatError::UnderDetermined),
        };

        if wl <= 0 {
            return Err(InvalidFormatError::NonPositiveWordLength(wl));
        }
        if signed && wl < 2 {
            return Err(InvalidFormatError::SignedTooShort(wl));
        }
        if lsb < Fpf::MIN_EXPONENT || msb > Fpf::MAX_EXPONENT {
            return Err(InvalidFormatError::ExponentOutOfRange { msb, lsb });
        }

        tracing::trace!(wl, msb, lsb, signed, "created fixed-point format");
        Ok(Fpf {
            wl,
            msb,
            lsb,
            signed,
        })
    }

    /// Signed or unsigned format spanning `2^msb` down to `2^lsb`.
    pub fn from_msb_lsb(msb: i32, lsb: i32, signed: bool) -> Result<Fpf, InvalidFormatError> {
        Fpf::create(None, Some(msb), Some(lsb), signed)
    }

    /// `wl`-bit format whose top bit weighs `2^msb`.
    pub fn from_wl_msb(wl: i32, msb: i32, signed: bool) -> Result<Fpf, InvalidFormatError> {
        Fpf::create(Some(wl), Some(msb), None, signed)
    }

    /// `wl`-bit format whose bottom bit weighs `2^lsb`.
    pub fn from_wl_lsb(wl: i32, lsb: i32, signed: bool) -> Result<Fpf, InvalidFormatError> {
        Fpf::create(Some(wl), None, Some(lsb), signed)
    }

    /// Parse `[s|u]Q<m>.<n>` or `[s|u](<msb>,<lsb>)`.
    pub fn parse(text: &str) -> Result<Fpf, InvalidFormatError> {
        let parsed = notation::parse_notation(text)?;
        let (wl, msb, lsb) = parsed.fields()?;
        Fpf::create(Some(wl), Some(msb), Some(lsb), parsed.signed)
    }

    /// Word length in bits.
    pub fn wl(&self) -> i32 {
        self.wl
    }

    /// Weight exponent of the most significant bit.
    pub fn msb(&self) -> i32 {
        self.msb
    }

    /// Weight exponent of the least significant bit.
    pub fn lsb(&self) -> i32 {
        self.lsb
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    /// The `(wl, msb, lsb)` triple.
    pub fn wml(&self) -> (i32, i32, i32) {
        (self.wl, self.msb, self.lsb)
    }

    /// Integer and fractional bit counts of the Q notation, when both are
    /// non-negative.
    pub fn q_bits(&self) -> Option<(i32, i32)> {
        let int_bits = self.msb.checked_add(1)?;
        let frac_bits = self.lsb.checked_neg()?;
        (int_bits >= 0 && frac_bits >= 0).then_some((int_bits, frac_bits))
    }

    /// Role of the bit of weight `2^p`.
    ///
    /// `p` is not required to lie inside the word; positions outside it are
    /// classified by the side of the binary point they fall on.
    pub fn category(&self, p: i32) -> BitCategory {
        if self.signed && p == self.msb {
            BitCategory::Sign
        } else if p >= 0 {
            BitCategory::Integer
        } else {
            BitCategory::Fractional
        }
    }

    /// Weight exponents from `msb` down to `lsb`.
    pub fn positions(&self) -> impl DoubleEndedIterator<Item = i32> {
        (self.lsb..=self.msb).rev()
    }
}

fn width(msb: i32, lsb: i32) -> Option<i32> {
    msb.checked_sub(lsb)?.checked_add(1)
}

impl fmt::Display for Fpf {
    /// `sQ<m>.<n>` when both counts are non-negative, `s(<msb>,<lsb>)`
    /// otherwise (`u` for unsigned formats).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.signed { 's' } else { 'u' };
        match self.q_bits() {
            Some((m, n)) => write!(f, "{sign}Q{m}.{n}"),
            None => write!(f, "{sign}({},{})", self.msb, self.lsb),
        }
    }
}

impl FromStr for Fpf {
    type Err = InvalidFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fpf::parse(s)
    }
}
