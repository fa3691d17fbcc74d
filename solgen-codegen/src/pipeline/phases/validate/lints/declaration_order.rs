//! Lint for members declared ahead of their contract.

use solgen_model::ModelSource;

use super::super::Lint;
use crate::{
    classify::{Classification, classify},
    pipeline::Diagnostic,
};

/// Warns about structs, events and errors that precede the first contract.
///
/// Such members are attached to the most recently classified contract
/// during traversal, and before the first contract there is none.
pub struct DeclarationOrderLint;

impl Lint for DeclarationOrderLint {
    fn name(&self) -> &'static str {
        "declaration-order"
    }

    fn description(&self) -> &'static str {
        "Declare the contract before the structures folded into it"
    }

    fn check(&self, source: &ModelSource, diagnostics: &mut Vec<Diagnostic>) {
        let model = &source.model;
        let Some(first_contract) = model
            .structures()
            .position(|s| classify(s) == Classification::Contract)
        else {
            return;
        };

        for structure in model.structures().take(first_contract) {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!(
                        "{} '{}' is declared before any contract and will be dropped",
                        classify(structure),
                        structure.name
                    ),
                )
                .at(format!("{}.{}", model.name, structure.name)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use solgen_model::{ComplexTypeFeature, DataModel, DataStructure};

    use super::*;
    use crate::testing::{contract, model_source};

    fn run(model: DataModel) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        DeclarationOrderLint.check(&model_source("model.toml", model), &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_contract_first() {
        let model = DataModel::new("Vault")
            .structure(contract("Vault"))
            .structure(DataStructure::new("Entry"));
        assert!(run(model).is_empty());
    }

    #[test]
    fn test_event_before_contract() {
        let model = DataModel::new("Vault")
            .structure(DataStructure::new("Paid").feature(ComplexTypeFeature::DomainEvent))
            .structure(contract("Vault"));

        let diagnostics = run(model);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "event 'Paid' is declared before any contract and will be dropped"
        );
        assert_eq!(diagnostics[0].location.as_deref(), Some("Vault.Paid"));
    }

    #[test]
    fn test_no_contract_is_left_to_contract_count() {
        let model = DataModel::new("Shapes").structure(DataStructure::new("Point"));
        assert!(run(model).is_empty());
    }
}
