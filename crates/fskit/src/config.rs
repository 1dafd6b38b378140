//! Format-agnostic settings loading and saving

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, FormatOptions, Result, WriteOptions, file};

/// Library settings.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Project root. `None` discovers it from `FSKIT_ROOT` or the working
    /// directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Upper bound on concurrent entry copies during a directory copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,

    /// Overwrite flag behind [`crate::ProjectFs::write_options`].
    pub default_overwrite: bool,

    /// Defaults for byte formatting.
    pub format: FormatOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

impl Settings {
    /// Options derived from [`Settings::default_overwrite`].
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            overwrite: self.default_overwrite,
        }
    }

    /// Load settings from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::detect(path)?;
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        tracing::debug!(path = %path.display(), format = format.name(), "Loading settings");

        let parse_err = |message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.name().into(),
            message,
        };
        match format {
            Format::Toml => toml::from_str(&content).map_err(|e| parse_err(e.to_string())),
            Format::Json => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string())),
            Format::Yaml => serde_yaml::from_str(&content).map_err(|e| parse_err(e.to_string())),
        }
    }

    /// Save settings to a file, replacing any existing one.
    ///
    /// Format is determined from file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = Format::detect(path)?;

        let serialize_err = |message: String| Error::ConfigSerialize {
            path: path.to_path_buf(),
            format: format.name().into(),
            message,
        };
        let content = match format {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| serialize_err(e.to_string()))?,
            Format::Json => {
                serde_json::to_string_pretty(self).map_err(|e| serialize_err(e.to_string()))?
            }
            Format::Yaml => serde_yaml::to_string(self).map_err(|e| serialize_err(e.to_string()))?,
        };

        file::write_file(path, content.as_bytes(), WriteOptions::overwrite())?;
        Ok(())
    }
}
