use std::fmt;
use std::str::FromStr;

use fxp::{BitCategory, BitPattern, InvalidFormatError};

/// Where the word-level label of a diagram goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LabelPlacement {
    Left,
    Right,
    Above,
    Below,
    #[default]
    No,
}

/// Labeling convention for cells and word labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NotationMode {
    /// Bits named by their weight exponent; the word by `(msb, lsb)`.
    #[default]
    Mlsb,
    /// Bits grouped into integer and fractional fields; the word by
    /// `Q<iwl>.<fwl>`.
    Ifwl,
}

impl FromStr for LabelPlacement {
    type Err = InvalidFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(LabelPlacement::Left),
            "right" => Ok(LabelPlacement::Right),
            "above" => Ok(LabelPlacement::Above),
            "below" => Ok(LabelPlacement::Below),
            "no" => Ok(LabelPlacement::No),
            _ => Err(InvalidFormatError::UnknownOption {
                option: "label placement",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for NotationMode {
    type Err = InvalidFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mlsb" => Ok(NotationMode::Mlsb),
            "ifwl" => Ok(NotationMode::Ifwl),
            _ => Err(InvalidFormatError::UnknownOption {
                option: "notation mode",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LabelPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LabelPlacement::Left => "left",
            LabelPlacement::Right => "right",
            LabelPlacement::Above => "above",
            LabelPlacement::Below => "below",
            LabelPlacement::No => "no",
        })
    }
}

impl fmt::Display for NotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotationMode::Mlsb => "mlsb",
            NotationMode::Ifwl => "ifwl",
        })
    }
}

/// One optional TikZ value per bit category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CategoryStyles {
    pub sign: Option<String>,
    pub integer: Option<String>,
    pub fractional: Option<String>,
    pub missing: Option<String>,
}

impl CategoryStyles {
    pub fn get(&self, category: BitCategory) -> Option<&str> {
        match category {
            BitCategory::Sign => self.sign.as_deref(),
            BitCategory::Integer => self.integer.as_deref(),
            BitCategory::Fractional => self.fractional.as_deref(),
            BitCategory::Missing => self.missing.as_deref(),
        }
    }
}

/// Rendering options. `DiagramOptions::default()` draws the bare word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DiagramOptions {
    /// Vertical position of the bottom edge of the cells.
    pub y_origin: i32,
    /// Horizontal position of the binary point.
    pub x_shift: i32,
    /// Draw a dot at the binary point.
    pub binary_point: bool,
    pub label: LabelPlacement,
    pub notation: NotationMode,
    /// Numbers instead of symbolic names in labels, and a numeric label in
    /// every cell.
    pub numeric: bool,
    /// Rule between the integer and fractional regions.
    pub intfrac: bool,
    /// Write the weight `2^p` over every cell.
    pub power2: bool,
    /// Placeholder cells for the implicit zeros between the word and the
    /// binary point.
    pub draw_missing: bool,
    /// Fill colors, overriding the category defaults.
    pub colors: CategoryStyles,
    /// Fill patterns (needs the TikZ `patterns` library).
    pub hatches: CategoryStyles,
    /// A concrete word to write into the cells, msb first.
    pub bits: Option<BitPattern>,
}
