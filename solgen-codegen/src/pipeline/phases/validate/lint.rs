//! Lint trait for model validation.

use solgen_model::ModelSource;

use crate::pipeline::Diagnostic;

/// A check over one resolved model file.
pub trait Lint: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check the model and push any findings.
    fn check(&self, source: &ModelSource, diagnostics: &mut Vec<Diagnostic>);
}
