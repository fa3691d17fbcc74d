use std::path::Path;

use eyre::Result;
use solgen_codegen::{
    generation::{CodeGenerationSerializer, FileEntry, Serialized},
    language::SourcePrinter,
    traverse::LoweredUnit,
};
use solgen_core::ArtifactRole;

use super::{file_level, standalone_file};
use crate::SolidityPrinter;

/// One `<Contract>.sol` per contract, printed exactly as lowered.
///
/// No interface is split off and no user file is consulted. Definitions
/// outside any contract are printed with the first contract.
#[derive(Debug, Default)]
pub struct PlainSerializer {
    printer: SolidityPrinter,
}

impl PlainSerializer {
    pub const NAME: &'static str = "plain";

    pub fn new() -> Self {
        Self::default()
    }
}

impl CodeGenerationSerializer for PlainSerializer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn serialize(&self, unit: &LoweredUnit, _target: &Path) -> Result<Serialized> {
        let source = &unit.unit;
        if source.definitions.contracts.is_empty() {
            let files: Vec<_> = standalone_file(unit, |u| self.printer.print(u))
                .into_iter()
                .collect();
            return Ok(files.into());
        }

        let shared = file_level(&source.definitions);
        let files: Vec<FileEntry> = unit
            .contracts()
            .enumerate()
            .map(|(i, contract)| {
                let mut out = source.sibling(contract.name.clone());
                out.imports = source.imports.clone();
                if i == 0 {
                    out.definitions = shared.clone();
                }
                out.definitions.contracts.push(contract.clone());
                FileEntry::generated(
                    ArtifactRole::GeneratedInterface.file_name(&contract.name),
                    self.printer.print(&out),
                )
            })
            .collect();
        Ok(files.into())
    }
}
