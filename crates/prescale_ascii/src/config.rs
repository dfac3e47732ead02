//! Optional TOML configuration supplying default viewer and logo controls.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ascii::ramp::RampPreset;
use crate::controls::{CellSize, ModelId, RenderControls};
use crate::logo::wordmark::LogoSize;
use crate::AsciiError;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub viewer: ViewerConfig,
    pub logo: LogoConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub model: String,
    pub preset: RampPreset,
    pub cell_size: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let controls = RenderControls::default();
        Self {
            model: controls.model.as_str().to_owned(),
            preset: controls.preset,
            cell_size: controls.cell_size.get(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    pub preset: RampPreset,
    pub size: LogoSize,
    pub animate: bool,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self { preset: RampPreset::Dense, size: LogoSize::default(), animate: true }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("invalid config value: {0}")]
    Invalid(#[from] AsciiError),
}

impl Config {
    /// Reads `path`, falling back to defaults when no path is given or the
    /// file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("config file {} not found, using defaults", path.display());
                return Ok(Self::default());
            },
            Err(source) => return Err(ConfigError::Io { path: path.to_path_buf(), source }),
        };

        let config: Config = toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.render_controls()?;
        Ok(config)
    }

    pub fn render_controls(&self) -> Result<RenderControls, ConfigError> {
        Ok(RenderControls {
            model: ModelId::new(self.viewer.model.as_str()),
            preset: self.viewer.preset,
            cell_size: CellSize::new(self.viewer.cell_size)?,
        })
    }
}
