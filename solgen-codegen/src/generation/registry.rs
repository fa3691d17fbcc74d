//! File registration for declarative output.
//!
//! Serializers describe the files they want as [`FileEntry`] values; the
//! [`FileRegistry`] decides the order they are written in and whether an
//! existing file may be replaced.
//!
//! ```ignore
//! let mut registry = FileRegistry::new();
//! registry.register(FileEntry::generated("Vault.sol", interface));
//! registry.register(FileEntry::user("VaultImpl.sol", stub));
//! let stats = registry.write_all(&target)?;
//! ```

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use serde::Serialize;
use solgen_core::{ArtifactRole, FileRules, Overwrite, WriteResult};

/// Who owns a file once it is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Rewritten on every run. Written first.
    Generated,
    /// Created once and then left to the user. Written last, only if missing.
    User,
}

impl FileCategory {
    pub fn default_overwrite(&self) -> Overwrite {
        match self {
            FileCategory::Generated => Overwrite::Always,
            FileCategory::User => Overwrite::IfMissing,
        }
    }
}

/// A file to be produced, relative to the target folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
    pub category: FileCategory,
    /// Position in the generation-gap layout, if the file has one.
    pub role: Option<ArtifactRole>,
    /// Overrides the category's overwrite behavior.
    pub overwrite: Option<Overwrite>,
}

impl FileEntry {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        category: FileCategory,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            category,
            role: None,
            overwrite: None,
        }
    }

    /// A file that is always overwritten.
    pub fn generated(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::Generated)
    }

    /// A user-owned file, written only if missing.
    pub fn user(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::User)
    }

    /// The file for `role` of `contract`, categorized by the role's owner.
    pub fn artifact(role: ArtifactRole, contract: &str, content: impl Into<String>) -> Self {
        let category = if role.is_user_owned() {
            FileCategory::User
        } else {
            FileCategory::Generated
        };
        Self {
            role: Some(role),
            ..Self::new(role.file_name(contract), content, category)
        }
    }

    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn overwrite(&self) -> Overwrite {
        self.overwrite
            .unwrap_or_else(|| self.category.default_overwrite())
    }

    pub fn rules(&self) -> FileRules {
        FileRules {
            overwrite: self.overwrite(),
        }
    }

    pub fn full_path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    /// Write this file below `base` according to its rules.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.full_path(base);
        self.rules()
            .apply(&path, &self.content)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))
    }
}

/// Collects files and writes them in category order.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    pub fn register_all(&mut self, entries: impl IntoIterator<Item = FileEntry>) {
        self.entries.extend(entries);
    }

    /// All entries, generated files first, registration order otherwise.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.category);
        sorted.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn preview(&self) -> Vec<PreviewEntry> {
        self.entries()
            .map(|e| PreviewEntry {
                path: e.path.clone(),
                content: e.content.clone(),
                category: e.category,
                role: e.role,
            })
            .collect()
    }

    /// Write every entry below `base`.
    pub fn write_all(&self, base: &Path) -> Result<WriteStats> {
        let mut stats = WriteStats::default();

        for entry in self.entries() {
            match entry.write(base)? {
                WriteResult::Written => {
                    stats.written += 1;
                    stats.written_paths.push(entry.path.clone());
                }
                WriteResult::Skipped => {
                    stats.skipped += 1;
                    stats.skipped_paths.push(entry.path.clone());
                }
            }
        }

        Ok(stats)
    }
}

/// What a file would look like, without touching the disk.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewEntry {
    pub path: String,
    pub content: String,
    pub category: FileCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ArtifactRole>,
}

/// Statistics from a write operation.
#[derive(Debug, Default)]
pub struct WriteStats {
    pub written: usize,
    /// Files left alone because they already existed.
    pub skipped: usize,
    pub written_paths: Vec<String>,
    pub skipped_paths: Vec<String>,
}

impl WriteStats {
    pub fn total(&self) -> usize {
        self.written + self.skipped
    }

    pub fn merge(&mut self, other: WriteStats) {
        self.written += other.written;
        self.skipped += other.skipped;
        self.written_paths.extend(other.written_paths);
        self.skipped_paths.extend(other.skipped_paths);
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_artifact_categories() {
        let interface = FileEntry::artifact(ArtifactRole::GeneratedInterface, "Vault", "");
        assert_eq!(interface.path, "Vault.sol");
        assert_eq!(interface.category, FileCategory::Generated);
        assert_eq!(interface.overwrite(), Overwrite::Always);

        let user = FileEntry::artifact(ArtifactRole::UserImpl, "Vault", "");
        assert_eq!(user.path, "VaultImpl.sol");
        assert_eq!(user.category, FileCategory::User);
        assert_eq!(user.overwrite(), Overwrite::IfMissing);
    }

    #[test]
    fn test_registry_ordering() {
        let mut registry = FileRegistry::new();

        registry.register(FileEntry::user("VaultImpl.sol", ""));
        registry.register(FileEntry::generated("Vault.sol", ""));
        registry.register(FileEntry::generated("VaultBaseImpl.sol", ""));

        let paths: Vec<_> = registry.entries().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["Vault.sol", "VaultBaseImpl.sol", "VaultImpl.sol"]);
    }

    #[test]
    fn test_registry_write_all() {
        let temp = TempDir::new().unwrap();
        let mut registry = FileRegistry::new();

        registry.register(FileEntry::generated("Vault.sol", "interface"));
        registry.register(FileEntry::user("VaultImpl.sol", "stub"));

        let stats = registry.write_all(temp.path()).unwrap();

        assert_eq!(stats.written, 2);
        assert_eq!(stats.skipped, 0);
        assert!(temp.path().join("Vault.sol").exists());
        assert!(temp.path().join("VaultImpl.sol").exists());
    }

    #[test]
    fn test_user_file_never_clobbered() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("VaultImpl.sol");
        std::fs::write(&path, "user code").unwrap();

        let mut registry = FileRegistry::new();
        registry.register(FileEntry::user("VaultImpl.sol", "stub"));
        registry.register(FileEntry::generated("Vault.sol", "interface"));

        let stats = registry.write_all(temp.path()).unwrap();

        assert_eq!(stats.written, 1);
        assert_eq!(stats.skipped_paths, vec!["VaultImpl.sol"]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "user code");
    }

    #[test]
    fn test_generated_overwritten() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Vault.sol"), "old").unwrap();

        let mut registry = FileRegistry::new();
        registry.register(FileEntry::generated("Vault.sol", "new"));
        registry.write_all(temp.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("Vault.sol")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_preview_carries_role() {
        let mut registry = FileRegistry::new();
        registry.register(FileEntry::artifact(
            ArtifactRole::GeneratedBaseImpl,
            "Vault",
            "contract VaultBaseImpl {}",
        ));

        let preview = registry.preview();

        assert_eq!(preview[0].role, Some(ArtifactRole::GeneratedBaseImpl));
        let json = serde_json::to_value(&preview[0]).unwrap();
        assert_eq!(json["role"], "generated-base-impl");
        assert_eq!(json["category"], "generated");
    }
}
