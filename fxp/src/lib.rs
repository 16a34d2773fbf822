//! Fixed-point number formats.
//!
//! An [`Fpf`] describes how a word of `wl` bits encodes a scaled integer:
//! the weight exponents of its most and least significant bits and whether
//! it is two's complement. It is built from explicit fields or parsed from
//! `Q<m>.<n>` / `(<msb>,<lsb>)` notation, and derives the representable
//! range, rounding and bit patterns.

pub mod error;
pub mod format;
pub mod types;

pub use error::InvalidFormatError;
pub use format::bits::BitPattern;
pub use format::{FormatConfig, Fpf};
pub use types::BitCategory;
