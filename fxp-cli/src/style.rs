//! TOML diagram files: an optional `[format]` table and a `[diagram]` table
//! of rendering options.

use std::path::Path;

use anyhow::{Context, Result};
use fxp::FormatConfig;
use fxp_diagram::DiagramOptions;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramFile {
    pub format: Option<FormatConfig>,
    pub diagram: DiagramOptions,
}

impl DiagramFile {
    pub fn from_toml(text: &str) -> Result<DiagramFile> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<DiagramFile> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let file = DiagramFile::from_toml(&text)
            .with_context(|| format!("parsing diagram file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded diagram file");
        Ok(file)
    }
}
