use super::Fpf;
use crate::error::InvalidFormatError;

/// Loosely specified format, as written in a config file.
///
/// Either `notation` alone, or at least two of `wl`, `msb` and `lsb` with an
/// optional `signed` (true when omitted).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct FormatConfig {
    pub wl: Option<i32>,
    pub msb: Option<i32>,
    pub lsb: Option<i32>,
    pub signed: Option<bool>,
    pub notation: Option<String>,
}

impl Fpf {
    /// Build a format from a config, validating it like [`Fpf::create`] or
    /// [`Fpf::parse`].
    pub fn from_config(config: &FormatConfig) -> Result<Fpf, InvalidFormatError> {
        match &config.notation {
            Some(text) => {
                if config.wl.is_some()
                    || config.msb.is_some()
                    || config.lsb.is_some()
                    || config.signed.is_some()
                {
                    return Err(InvalidFormatError::NotationWithFields);
                }
                Fpf::parse(text)
            }
            None => Fpf::create(
                config.wl,
                config.msb,
                config.lsb,
                config.signed.unwrap_or(true),
            ),
        }
    }
}
