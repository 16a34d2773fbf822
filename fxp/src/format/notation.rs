use std::iter::Peekable;
use std::str::Chars;

use crate::error::InvalidFormatError;

/// The grammar a format string was written in, with its raw fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// `Q<m>.<n>`: `m` integer bits (sign bit included), `n` fractional bits.
    Q { int_bits: i32, frac_bits: i32 },
    /// `(<msb>,<lsb>)`: explicit weight exponents of the end bits.
    Pair { msb: i32, lsb: i32 },
}

/// A recognized notation string, not yet validated as a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedNotation {
    pub signed: bool,
    pub notation: Notation,
}

impl ParsedNotation {
    /// The `(wl, msb, lsb)` triple the notation denotes.
    ///
    /// Only arithmetic overflow is reported here; positivity and the
    /// signed minimum are checked by `Fpf::create`.
    pub fn fields(&self) -> Result<(i32, i32, i32), InvalidFormatError> {
        let overflow = || InvalidFormatError::Overflow;
        match self.notation {
            Notation::Q {
                int_bits,
                frac_bits,
            } => {
                let wl = int_bits.checked_add(frac_bits).ok_or_else(overflow)?;
                let msb = int_bits.checked_sub(1).ok_or_else(overflow)?;
                let lsb = frac_bits.checked_neg().ok_or_else(overflow)?;
                Ok((wl, msb, lsb))
            }
            Notation::Pair { msb, lsb } => {
                let wl = msb
                    .checked_sub(lsb)
                    .and_then(|d| d.checked_add(1))
                    .ok_or_else(overflow)?;
                Ok((wl, msb, lsb))
            }
        }
    }
}

type Matcher = fn(&mut Peekable<Chars<'_>>) -> Option<Notation>;

/// Grammars in the order they are tried.
const MATCHERS: [Matcher; 2] = [match_q, match_pair];

/// Recognize one of the format notations.
///
/// An optional `s`/`u` prefix selects signedness (signed when omitted); the
/// rest must be matched entirely by one grammar.
pub fn parse_notation(text: &str) -> Result<ParsedNotation, InvalidFormatError> {
    let trimmed = text.trim();
    let (signed, body) = if let Some(rest) = trimmed.strip_prefix('u') {
        (false, rest)
    } else if let Some(rest) = trimmed.strip_prefix('s') {
        (true, rest)
    } else {
        (true, trimmed)
    };

    let notation = MATCHERS
        .iter()
        .find_map(|matcher| {
            let mut chars = body.chars().peekable();
            let notation = matcher(&mut chars)?;
            // Trailing garbage means this grammar did not match.
            chars.next().is_none().then_some(notation)
        })
        .ok_or_else(|| InvalidFormatError::UnrecognizedNotation(text.to_string()))?;

    tracing::debug!(text, ?notation, signed, "parsed format notation");
    Ok(ParsedNotation { signed, notation })
}

fn match_q(chars: &mut Peekable<Chars<'_>>) -> Option<Notation> {
    chars.next_if_eq(&'Q')?;
    let int_bits = take_integer(chars)?;
    chars.next_if_eq(&'.')?;
    let frac_bits = take_integer(chars)?;
    Some(Notation::Q {
        int_bits,
        frac_bits,
    })
}

fn match_pair(chars: &mut Peekable<Chars<'_>>) -> Option<Notation> {
    chars.next_if_eq(&'(')?;
    skip_whitespace(chars);
    let msb = take_integer(chars)?;
    skip_whitespace(chars);
    chars.next_if_eq(&',')?;
    skip_whitespace(chars);
    let lsb = take_integer(chars)?;
    skip_whitespace(chars);
    chars.next_if_eq(&')')?;
    Some(Notation::Pair { msb, lsb })
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

/// Consume a decimal integer with an optional leading `-`.
///
/// Returns `None` if there are no digits or the value does not fit an `i32`.
fn take_integer(chars: &mut Peekable<Chars<'_>>) -> Option<i32> {
    let negative = chars.next_if_eq(&'-').is_some();
    let mut value: i64 = 0;
    let mut ndigits = 0;
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        let digit = i64::from(c.to_digit(10)?);
        value = value.checked_mul(10)?.checked_add(digit)?;
        if value > i64::from(i32::MAX) + 1 {
            return None;
        }
        ndigits += 1;
    }
    if ndigits == 0 {
        return None;
    }
    let value = if negative { -value } else { value };
    i32::try_from(value).ok()
}
