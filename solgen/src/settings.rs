//! Generator settings layered from flags, `solgen.toml` and defaults.

use std::path::{Path, PathBuf};

use solgen_model::{ConfigFile, GeneratorConfig};

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub license: Option<String>,
    pub pragma: Option<String>,
    pub serializer: Option<String>,
    pub output: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(license) = &self.license {
            config.license = license.clone();
        }
        if let Some(pragma) = &self.pragma {
            config.pragma = pragma.clone();
        }
        if let Some(serializer) = &self.serializer {
            config.serializer = serializer.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        config
    }
}

/// Flags over `config` (or `solgen.toml` in `dir`) over built-in defaults.
pub fn resolve(
    config: Option<&Path>,
    dir: &Path,
    overrides: &Overrides,
) -> solgen_model::Result<GeneratorConfig> {
    let file = ConfigFile::discover(config, dir)?;
    Ok(overrides.apply(file.generator))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = resolve(None, temp.path(), &Overrides::default()).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_flag_beats_file_beats_default() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("solgen.toml"),
            "[generator]\nlicense = \"MIT\"\npragma = \"^0.8.20\"\n",
        )
        .unwrap();

        let overrides = Overrides {
            pragma: Some("^0.8.24".to_string()),
            ..Overrides::default()
        };
        let config = resolve(None, temp.path(), &overrides).unwrap();

        assert_eq!(config.license, "MIT");
        assert_eq!(config.pragma, "^0.8.24");
        assert_eq!(config.serializer, "extended-generation-gap");
        assert_eq!(config.output, PathBuf::from("contracts"));
    }

    #[test]
    fn test_explicit_config_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "[generator]\nserializer = \"plain\"\n").unwrap();

        let config = resolve(Some(&path), Path::new("."), &Overrides::default()).unwrap();
        assert_eq!(config.serializer, "plain");
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent.toml");
        assert!(resolve(Some(&missing), temp.path(), &Overrides::default()).is_err());
    }
}
