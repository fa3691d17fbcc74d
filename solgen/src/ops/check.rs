//! Check operation - model validation.

use std::path::Path;

use solgen_codegen::pipeline::GenerationSettings;
use solgen_model::{GeneratorConfig, ModelSource};
use tracing::debug;

use crate::reports::CheckReport;

/// Run the lints over `models` without lowering them.
pub fn check(models: Vec<ModelSource>, config: &GeneratorConfig, model_path: &Path) -> CheckReport {
    let model_count = models.len();
    debug!(models = model_count, "checking models");
    let ctx = super::pipeline().check(models, GenerationSettings::from(config));

    CheckReport {
        model_path: model_path.to_path_buf(),
        model_count,
        diagnostics: ctx.diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use solgen_codegen::testing::{contract, model_source};
    use solgen_model::{DataModel, DataStructure};

    use super::*;

    #[test]
    fn test_duplicate_types_fail() {
        let model = DataModel::new("Shop")
            .structure(contract("Shop"))
            .structure(DataStructure::new("Shop"));
        let report = check(
            vec![model_source("shop.toml", model)],
            &GeneratorConfig::default(),
            Path::new("shop.toml"),
        );

        assert!(!report.is_valid());
        assert_eq!(report.model_count, 1);
    }

    #[test]
    fn test_single_contract_is_valid() {
        let model = DataModel::new("Shop").structure(contract("Shop"));
        let report = check(
            vec![model_source("shop.toml", model)],
            &GeneratorConfig::default(),
            Path::new("shop.toml"),
        );
        assert!(report.is_valid());
    }
}
