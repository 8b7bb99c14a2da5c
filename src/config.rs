//! Optional user configuration, read from `~/.multitool.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use mt::common::OutputFormat;

/// Name of the configuration file in the home directory.
pub const CONFIG_FILE_NAME: &str = ".multitool.json";

/// Settings shared by every command. Command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: Option<OutputFormat>,
    pub songsheet: SongsheetConfig,
    pub convert: ConvertConfig,
    pub colour: ColourConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SongsheetConfig {
    pub columns: Option<usize>,
    pub spacing_ratio: Option<f64>,
    pub amp_ratio: Option<f64>,
    pub mirror: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub decimals: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColourConfig {
    /// Palette file used when no paints are given.
    pub palette: Option<PathBuf>,
    pub run_seconds: Option<f64>,
    pub mix_ml: Option<f64>,
}

impl Config {
    /// Parse a configuration document.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration")
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one the default file in the home
    /// directory is used if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            return Self::parse(&text);
        }

        let Some(path) = default_path() else {
            return Ok(Self::default());
        };
        match fs::read_to_string(&path) {
            Ok(text) => {
                log::debug!("using config {}", path.display());
                Self::parse(&text).with_context(|| format!("In {}", path.display()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read config {}", path.display())),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial() {
        let config = Config::parse(r#"{"format": "svg", "songsheet": {"columns": 3}}"#).unwrap();
        assert_eq!(config.format, Some(OutputFormat::Svg));
        assert_eq!(config.songsheet.columns, Some(3));
        assert_eq!(config.songsheet.amp_ratio, None);
        assert_eq!(config.colour, ColourConfig::default());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
        assert!(Config::parse(r#"{"format": "png"}"#).is_err());
    }

    #[test]
    fn test_load_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mt.json");
        fs::write(
            &path,
            r#"{"convert": {"decimals": 4}, "colour": {"palette": "paints.json", "mix_ml": 50}}"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.convert.decimals, Some(4));
        assert_eq!(config.colour.palette, Some(PathBuf::from("paints.json")));
        assert_eq!(config.colour.mix_ml, Some(50.0));
    }

    #[test]
    fn test_load_missing_explicit() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.json"))).is_err());
    }
}
