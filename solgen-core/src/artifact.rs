//! Naming convention for the files of the generation-gap layout.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Extension of every emitted source file.
pub const SOURCE_EXTENSION: &str = "sol";

/// The role a file plays in the generation-gap layout of one contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactRole {
    /// `<Name>.sol`, regenerated on every run.
    GeneratedInterface,
    /// `<Name>BaseImpl.sol`, regenerated on every run.
    GeneratedBaseImpl,
    /// `<Name>Base.sol`, owned by the user and only ever read.
    UserInterface,
    /// `<Name>Impl.sol`, owned by the user once it exists.
    UserImpl,
}

impl ArtifactRole {
    pub const ALL: [ArtifactRole; 4] = [
        Self::GeneratedInterface,
        Self::GeneratedBaseImpl,
        Self::UserInterface,
        Self::UserImpl,
    ];

    /// Suffix appended to the contract name.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::GeneratedInterface => "",
            Self::GeneratedBaseImpl => "BaseImpl",
            Self::UserInterface => "Base",
            Self::UserImpl => "Impl",
        }
    }

    /// Whether the file belongs to the user and must never be overwritten.
    pub fn is_user_owned(&self) -> bool {
        matches!(self, Self::UserInterface | Self::UserImpl)
    }

    /// Name of the definition this role declares for `contract`.
    pub fn definition_name(&self, contract: &str) -> String {
        format!("{}{}", contract, self.suffix())
    }

    /// File name for `contract`, e.g. `TokenBaseImpl.sol`.
    pub fn file_name(&self, contract: &str) -> String {
        format!("{}.{}", self.definition_name(contract), SOURCE_EXTENSION)
    }

    /// Relative import path used by sibling files, e.g. `./Token.sol`.
    pub fn import_path(&self, contract: &str) -> String {
        format!("./{}", self.file_name(contract))
    }

    /// Location of the file inside `target`.
    pub fn path_in(&self, target: &Path, contract: &str) -> PathBuf {
        target.join(self.file_name(contract))
    }
}

impl std::fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GeneratedInterface => write!(f, "generated interface"),
            Self::GeneratedBaseImpl => write!(f, "generated base implementation"),
            Self::UserInterface => write!(f, "user interface"),
            Self::UserImpl => write!(f, "user implementation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(ArtifactRole::GeneratedInterface.file_name("Token"), "Token.sol");
        assert_eq!(
            ArtifactRole::GeneratedBaseImpl.file_name("Token"),
            "TokenBaseImpl.sol"
        );
        assert_eq!(ArtifactRole::UserInterface.file_name("Token"), "TokenBase.sol");
        assert_eq!(ArtifactRole::UserImpl.file_name("Token"), "TokenImpl.sol");
    }

    #[test]
    fn test_import_path() {
        assert_eq!(
            ArtifactRole::GeneratedBaseImpl.import_path("Vault"),
            "./VaultBaseImpl.sol"
        );
    }

    #[test]
    fn test_user_owned() {
        let owned: Vec<_> = ArtifactRole::ALL
            .iter()
            .filter(|r| r.is_user_owned())
            .collect();
        assert_eq!(
            owned,
            vec![&ArtifactRole::UserInterface, &ArtifactRole::UserImpl]
        );
    }

    #[test]
    fn test_path_in() {
        let path = ArtifactRole::UserImpl.path_in(Path::new("out"), "Token");
        assert_eq!(path, Path::new("out").join("TokenImpl.sol"));
    }
}
