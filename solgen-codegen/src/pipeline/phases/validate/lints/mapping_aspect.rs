//! Lint for incomplete mapping aspects.

use solgen_model::{HasAspects, ImportedAspect, ModelSource, vocabulary};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Errors when a mapping aspect lacks its key or value type.
///
/// The mapper silently ignores an incomplete mapping aspect, which would
/// produce a plain type where a mapping was intended.
pub struct MappingAspectLint;

impl Lint for MappingAspectLint {
    fn name(&self) -> &'static str {
        "mapping-aspect"
    }

    fn description(&self) -> &'static str {
        "Require both key and value on mapping aspects"
    }

    fn check(&self, source: &ModelSource, diagnostics: &mut Vec<Diagnostic>) {
        for structure in source.model.structures() {
            for field in &structure.fields {
                check_aspects(
                    &field.aspects,
                    format!("{}.{}", structure.name, field.name),
                    diagnostics,
                );
            }
            for operation in &structure.operations {
                for parameter in &operation.parameters {
                    check_aspects(
                        &parameter.aspects,
                        format!("{}.{}.{}", structure.name, operation.name, parameter.name),
                        diagnostics,
                    );
                }
            }
        }
    }
}

fn check_aspects(aspects: &[ImportedAspect], location: String, diagnostics: &mut Vec<Diagnostic>) {
    let Some(mapping) = aspects.aspect(vocabulary::MAPPING) else {
        return;
    };

    let missing: Vec<&str> = [vocabulary::MAPPING_KEY, vocabulary::MAPPING_VALUE]
        .into_iter()
        .filter(|key| mapping.get_string(key).is_none())
        .collect();

    if !missing.is_empty() {
        diagnostics.push(
            Diagnostic::error(
                "validate",
                format!(
                    "mapping aspect is missing property '{}'",
                    missing.join("', '")
                ),
            )
            .at(location),
        );
    }
}
