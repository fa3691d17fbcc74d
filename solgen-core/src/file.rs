use std::path::Path;

use eyre::Result;

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated contracts and interfaces)
    Always,
    /// Only create if the file doesn't exist (user-owned sources)
    IfMissing,
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

impl FileRules {
    pub fn always() -> Self {
        Self {
            overwrite: Overwrite::Always,
        }
    }

    pub fn if_missing() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
        }
    }

    /// Write `content` to `path` according to these rules.
    pub fn apply(&self, path: &Path, content: &str) -> Result<WriteResult> {
        match self.overwrite {
            Overwrite::Always => {
                write_file(path, content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if path.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(path, content)?;
                    Ok(WriteResult::Written)
                }
            }
        }
    }
}

impl Default for FileRules {
    fn default() -> Self {
        Self::always()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("Token.sol");

        write_file(&path, "contract Token {}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "contract Token {}");
    }

    #[test]
    fn test_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Token.sol");
        fs::write(&path, "old").unwrap();

        let result = FileRules::always().apply(&path, "new").unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_if_missing_creates_new() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("TokenImpl.sol");

        let result = FileRules::if_missing().apply(&path, "stub").unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "stub");
    }

    #[test]
    fn test_if_missing_keeps_user_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("TokenImpl.sol");
        fs::write(&path, "hand written").unwrap();

        let result = FileRules::if_missing().apply(&path, "stub").unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hand written");
    }

    #[test]
    fn test_default_rules() {
        assert_eq!(FileRules::default().overwrite, Overwrite::Always);
    }
}
