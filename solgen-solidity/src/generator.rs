use std::path::Path;

use eyre::{Result, WrapErr};
use solgen_codegen::{
    generation::{CodeGenerationSerializer, FileRegistry, SkippedContract},
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    traverse::LoweredUnit,
};
use solgen_core::SOURCE_EXTENSION;
use tracing::{info, warn};

/// Solidity generator over lowered units, laid out by one serializer.
pub struct SolidityGenerator<'a> {
    units: &'a [LoweredUnit],
    serializer: &'a dyn CodeGenerationSerializer,
}

impl LanguageCodegen for SolidityGenerator<'_> {
    fn language(&self) -> &'static str {
        "solidity"
    }

    fn file_extension(&self) -> &'static str {
        SOURCE_EXTENSION
    }

    fn preview(&self, output_dir: &Path) -> Result<Vec<PreviewFile>> {
        Ok(self
            .collect(output_dir)?
            .registry
            .preview()
            .into_iter()
            .map(|entry| PreviewFile {
                path: entry.path,
                content: entry.content,
                role: entry.role,
            })
            .collect())
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let Collected {
            registry,
            skipped_units,
            skipped_contracts,
        } = self.collect(output_dir)?;
        let stats = registry.write_all(output_dir)?;

        for path in &stats.written_paths {
            info!(path = %path, "wrote file");
        }
        for path in &stats.skipped_paths {
            info!(path = %path, "kept existing user file");
        }

        Ok(GenerateResult {
            written: stats.written_paths,
            skipped: stats.skipped_paths,
            skipped_units,
            skipped_contracts,
        })
    }
}

impl<'a> SolidityGenerator<'a> {
    pub fn new(units: &'a [LoweredUnit], serializer: &'a dyn CodeGenerationSerializer) -> Self {
        Self { units, serializer }
    }

    /// Serialize every unit. Units are skipped, not failed, when the output
    /// folder is not a directory.
    fn collect(&self, output_dir: &Path) -> Result<Collected> {
        let mut collected = Collected::default();

        if !output_dir.is_dir() {
            warn!(
                output = %output_dir.display(),
                "output folder does not exist or is not a directory"
            );
            collected
                .skipped_units
                .extend(self.units.iter().map(|u| u.unit.name.clone()));
            return Ok(collected);
        }

        for unit in self.units {
            let serialized = self
                .serializer
                .serialize(unit, output_dir)
                .wrap_err_with(|| format!("Failed to serialize {}", unit.unit.name))?;
            collected.registry.register_all(serialized.files);
            collected.skipped_contracts.extend(serialized.skipped);
        }
        Ok(collected)
    }
}

#[derive(Default)]
struct Collected {
    registry: FileRegistry,
    skipped_units: Vec<String>,
    skipped_contracts: Vec<SkippedContract>,
}
