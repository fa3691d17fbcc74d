//! Lint for duplicate complex type names.

use std::collections::HashSet;

use solgen_model::ModelSource;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Errors when two complex types of one model share a name.
pub struct DuplicateTypeLint;

impl Lint for DuplicateTypeLint {
    fn name(&self) -> &'static str {
        "duplicate-type"
    }

    fn description(&self) -> &'static str {
        "Detect structures and enumerations with the same name"
    }

    fn check(&self, source: &ModelSource, diagnostics: &mut Vec<Diagnostic>) {
        let model = &source.model;
        let mut seen = HashSet::new();

        for ty in &model.complex_types {
            if !seen.insert(ty.name()) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("duplicate type '{}' in model '{}'", ty.name(), model.name),
                    )
                    .at(format!("{}.{}", model.name, ty.name())),
                );
            }
        }
    }
}
