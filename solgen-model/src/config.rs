//! Generator settings read from `solgen.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default config file name looked up next to the working directory.
pub const CONFIG_FILE_NAME: &str = "solgen.toml";

/// Root of a `solgen.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Settings that shape every generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// SPDX license identifier written in each file header.
    pub license: String,
    /// Version constraint for the `pragma solidity` line.
    pub pragma: String,
    /// Name of the serializer that lays out output files.
    pub serializer: String,
    /// Target folder for generated files.
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            license: "GPL-3.0".to_string(),
            pragma: ">=0.8.0 <0.9.0".to_string(),
            serializer: "extended-generation-gap".to_string(),
            output: PathBuf::from("contracts"),
        }
    }
}

impl ConfigFile {
    /// Parse a config file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a config file from a string with a filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::toml(e, content, filename))
    }

    /// Load `path` if given, else `solgen.toml` in `dir` if present, else defaults.
    ///
    /// An explicitly requested file must exist.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::open(path),
            None => {
                let candidate = dir.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::open(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
