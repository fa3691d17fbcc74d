//! Compilation context passed through pipeline phases.

use solgen_model::{GeneratorConfig, ModelSource};

use super::diagnostic::{Diagnostic, Severity};
use crate::{behavior::MergeReport, traverse::LoweredUnit};

/// Header settings applied to every produced source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub license: String,
    pub pragma: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

impl From<&GeneratorConfig> for GenerationSettings {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            license: config.license.clone(),
            pragma: config.pragma.clone(),
        }
    }
}

/// State of one generation run.
///
/// Created once per run and handed by reference to every phase; nothing in
/// the pipeline keeps state outside of it.
#[derive(Debug)]
pub struct CompilationContext {
    /// Root model first, then its transitive imports.
    pub models: Vec<ModelSource>,
    pub settings: GenerationSettings,
    /// One source unit per model, populated by the lower phase.
    pub units: Vec<LoweredUnit>,
    /// Every behavior merge attempted while lowering.
    pub merges: Vec<MergeReport>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(models: Vec<ModelSource>, settings: GenerationSettings) -> Self {
        Self {
            models,
            settings,
            units: Vec::new(),
            merges: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }
}
