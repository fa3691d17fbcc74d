use std::path::Path;

use eyre::{Result, WrapErr};
use solgen_ast::SourceUnit;
use solgen_core::ArtifactRole;

use crate::generation::SkippedContract;

/// Renders a source unit as target-language text.
pub trait SourcePrinter {
    fn print(&self, unit: &SourceUnit) -> String;
}

/// Parses target-language text into a source unit.
///
/// Only declarations are required; bodies may be skipped.
pub trait SourceParser {
    fn parse(&self, source: &str, filename: &str) -> Result<SourceUnit>;

    fn parse_file(&self, path: &Path) -> Result<SourceUnit> {
        let source = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        self.parse(&source, &path.display().to_string())
    }
}

/// A language-specific generator over already lowered units.
pub trait LanguageCodegen {
    /// Language identifier (e.g. "solidity").
    fn language(&self) -> &'static str;

    /// File extension of generated source files (e.g. "sol").
    fn file_extension(&self) -> &'static str;

    /// Files that would be produced into `output_dir`, without writing.
    fn preview(&self, output_dir: &Path) -> Result<Vec<PreviewFile>>;

    /// Produce and write every file into `output_dir`.
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Outcome of [`LanguageCodegen::generate`].
#[derive(Debug, Default)]
pub struct GenerateResult {
    pub written: Vec<String>,
    /// User-owned files that already existed and were left alone.
    pub skipped: Vec<String>,
    /// Units not generated because the output folder is not a directory.
    pub skipped_units: Vec<String>,
    /// Contracts the serializer could not lay out.
    pub skipped_contracts: Vec<SkippedContract>,
}

/// A generated file for preview.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    /// Relative path from the output folder.
    pub path: String,
    pub content: String,
    pub role: Option<ArtifactRole>,
}
