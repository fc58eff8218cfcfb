//! Configuration file support for bundle-sbom.
//!
//! Provides YAML-based configuration through `bundle-sbom.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::application::dto::OutputFormat;
use crate::sbom_generation::domain::SbomFormat;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "bundle-sbom.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Document encoding: json or xml
    pub format: Option<String>,
    /// Document schema: spdx or cyclonedx
    pub sbom: Option<String>,
    /// Bundler groups to leave out
    pub without: Option<Vec<String>>,
    /// Query rubygems.org instead of installed gemspecs
    pub remote: Option<bool>,
    /// Extra gem directories searched for installed gemspecs
    pub gem_paths: Option<Vec<PathBuf>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file deserializes as YAML null
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        OutputFormat::from_str(format)?;
    }
    if let Some(ref sbom) = config.sbom {
        SbomFormat::from_str(sbom)?;
    }
    if let Some(ref without) = config.without {
        for (i, group) in without.iter().enumerate() {
            if group.trim().is_empty() {
                bail!(
                    "Invalid config: without[{}] must not be empty.\n\n\
                     💡 Hint: List Bundler group names, e.g. \"development\".",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
