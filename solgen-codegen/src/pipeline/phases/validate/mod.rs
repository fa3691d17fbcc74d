//! Validate phase - runs lints on every resolved model.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::Lint;
pub use lints::{ContractCountLint, DeclarationOrderLint, DuplicateTypeLint, MappingAspectLint};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the models using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(ContractCountLint),
                Box::new(DeclarationOrderLint),
                Box::new(MappingAspectLint),
                Box::new(DuplicateTypeLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    /// Run every lint over every model without failing.
    pub fn lint(&self, ctx: &mut CompilationContext) {
        for source in &ctx.models {
            for lint in &self.lints {
                lint.check(source, &mut ctx.diagnostics);
            }
        }
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check model integrity and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        self.lint(ctx);

        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use solgen_model::{DataModel, DataStructure, ModelSource};

    use super::*;
    use crate::{
        pipeline::{Diagnostic, GenerationSettings},
        testing::{contract, model_source},
    };

    fn context(model: DataModel) -> CompilationContext {
        CompilationContext::new(
            vec![model_source("model.toml", model)],
            GenerationSettings::default(),
        )
    }

    #[test]
    fn test_with_errors() {
        struct AlwaysErrorLint;
        impl Lint for AlwaysErrorLint {
            fn name(&self) -> &'static str {
                "always-error"
            }
            fn description(&self) -> &'static str {
                "Always produces an error"
            }
            fn check(&self, _source: &ModelSource, diagnostics: &mut Vec<Diagnostic>) {
                diagnostics.push(Diagnostic::error("test", "forced error"));
            }
        }

        let mut ctx = context(DataModel::new("Empty"));
        let phase = ValidatePhase::empty().with_lint(AlwaysErrorLint);

        assert!(phase.run(&mut ctx).is_err());
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_warnings_allowed() {
        let model = DataModel::new("Ledger")
            .structure(DataStructure::new("Entry"))
            .structure(contract("Ledger"));
        let mut ctx = context(model);

        let result = ValidatePhase::new().run(&mut ctx);

        assert!(result.is_ok());
        assert!(ctx.has_warnings());
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_default_lints() {
        assert_eq!(
            ValidatePhase::new().lint_names(),
            vec![
                "contract-count",
                "declaration-order",
                "mapping-aspect",
                "duplicate-type"
            ]
        );
        assert!(ValidatePhase::empty().lint_names().is_empty());
    }
}
