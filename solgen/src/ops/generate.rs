//! Generate operation - contracts from domain models.

use eyre::{Context, Result};
use solgen_codegen::pipeline::GenerationSettings;
use solgen_model::{GeneratorConfig, ModelSource};
use solgen_solidity::{LanguageCodegen, SolidityGenerator, builtin_serializers};
use tracing::info;

use crate::reports::{GenerateReport, GenerationResult, PreviewResult, WrittenResult};

/// Lower `models` and lay them out into `config.output`.
///
/// Validation errors stop the run before lowering; they are returned in the
/// report rather than as an error.
pub fn generate(
    models: Vec<ModelSource>,
    config: &GeneratorConfig,
    dry_run: bool,
) -> Result<GenerateReport> {
    let registry = builtin_serializers()?;
    let serializer = registry.get(&config.serializer)?;
    let settings = GenerationSettings::from(config);
    let pipeline = super::pipeline();

    let checked = pipeline.check(models, settings);
    if checked.has_errors() {
        return Ok(GenerateReport {
            serializer: serializer.name().to_string(),
            diagnostics: checked.diagnostics,
            result: GenerationResult::Aborted,
        });
    }

    let ctx = pipeline.run_checked(checked).wrap_err("Pipeline failed")?;
    info!(
        units = ctx.units.len(),
        serializer = serializer.name(),
        "lowered models"
    );

    let generator = SolidityGenerator::new(&ctx.units, serializer);
    let output_dir = config.output.clone();
    let result = if dry_run {
        let files = generator
            .preview(&output_dir)
            .wrap_err("Failed to preview contracts")?;
        GenerationResult::Preview(PreviewResult { output_dir, files })
    } else {
        let generated = generator
            .generate(&output_dir)
            .wrap_err("Failed to generate contracts")?;
        GenerationResult::Written(WrittenResult {
            output_dir,
            written: generated.written,
            kept: generated.skipped,
            skipped_units: generated.skipped_units,
            skipped_contracts: generated.skipped_contracts,
        })
    };

    Ok(GenerateReport {
        serializer: serializer.name().to_string(),
        diagnostics: ctx.diagnostics,
        result,
    })
}
