//! Check command report data structures.

use std::path::PathBuf;

use solgen_codegen::pipeline::{Diagnostic, Severity};

use super::{
    output::{Output, Report},
    plural, render_diagnostics,
};

/// Report data from model validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Root model file.
    pub model_path: PathBuf,
    /// Number of model files resolved, imports included.
    pub model_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);

        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid ({})",
                self.model_path.display(),
                plural(self.model_count, "model")
            ));
        }
    }
}
