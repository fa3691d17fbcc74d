//! Generate command report data structures.

use std::path::PathBuf;

use solgen_codegen::{
    generation::SkippedContract,
    pipeline::{Diagnostic, Severity},
};
use solgen_solidity::PreviewFile;

use super::{
    output::{Output, Report},
    plural, render_diagnostics,
};

/// Report data from contract generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Serializer that laid out the files.
    pub serializer: String,
    /// Diagnostics from validation and lowering.
    pub diagnostics: Vec<Diagnostic>,
    pub result: GenerationResult,
}

/// Result of contract generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
    /// Validation failed; nothing was lowered.
    Aborted,
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    pub written: Vec<String>,
    /// User-owned files that already existed.
    pub kept: Vec<String>,
    /// Units skipped because the output folder is not a directory.
    pub skipped_units: Vec<String>,
    /// Contracts whose user files could not be read.
    pub skipped_contracts: Vec<SkippedContract>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    pub output_dir: PathBuf,
    pub files: Vec<PreviewFile>,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        !matches!(self.result, GenerationResult::Aborted)
            && !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
            GenerationResult::Aborted => {
                out.problem("error: validation failed, no contracts generated");
            }
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if !written.skipped_units.is_empty() {
            out.problem(&format!(
                "warning: output folder {} does not exist, skipped {}",
                written.output_dir.display(),
                written.skipped_units.join(", ")
            ));
            return;
        }

        for skipped in &written.skipped_contracts {
            out.problem(&format!(
                "warning: skipped contract {}: {}",
                skipped.contract, skipped.reason
            ));
        }

        out.section(&format!(
            "Generated into {} ({})",
            written.output_dir.display(),
            self.serializer
        ));
        for path in &written.written {
            out.added_item(path);
        }

        if !written.kept.is_empty() {
            out.newline();
            out.section("Kept user files");
            for path in &written.kept {
                out.kept_item(path);
            }
        }

        out.newline();
        out.key_value(
            "Summary",
            &format!(
                "{} written, {} kept",
                plural(written.written.len(), "file"),
                written.kept.len()
            ),
        );
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        if !preview.output_dir.is_dir() {
            out.problem(&format!(
                "warning: output folder {} does not exist, nothing would be generated",
                preview.output_dir.display()
            ));
        }

        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} would be generated",
            plural(preview.files.len(), "file")
        ));
    }
}
