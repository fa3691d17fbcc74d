//! Lint for models without exactly one contract.

use solgen_model::ModelSource;

use super::super::Lint;
use crate::{
    classify::{Classification, classify},
    pipeline::Diagnostic,
};

/// Warns when a model with structures has no contract, or several.
pub struct ContractCountLint;

impl Lint for ContractCountLint {
    fn name(&self) -> &'static str {
        "contract-count"
    }

    fn description(&self) -> &'static str {
        "Expect exactly one contract structure per model"
    }

    fn check(&self, source: &ModelSource, diagnostics: &mut Vec<Diagnostic>) {
        let model = &source.model;
        if model.structures().next().is_none() {
            return;
        }

        let contracts: Vec<&str> = model
            .structures()
            .filter(|s| classify(s) == Classification::Contract)
            .map(|s| s.name.as_str())
            .collect();

        let message = match contracts.as_slice() {
            [] => format!(
                "model '{}' has structures but no contract; structs, events and errors will be dropped",
                model.name
            ),
            [_] => return,
            many => format!(
                "model '{}' declares {} contracts ({}); members attach to the most recent one",
                model.name,
                many.len(),
                many.join(", ")
            ),
        };

        diagnostics.push(
            Diagnostic::warning("validate", message).at(source.path.display().to_string()),
        );
    }
}
