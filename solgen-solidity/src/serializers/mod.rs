//! Serializers laying out `.sol` files for lowered units.
//!
//! - [`ExtendedGenerationGapSerializer`] - generated interface and base
//!   implementation per contract, plus hooks for user-owned files (default)
//! - [`PlainSerializer`] - one file per contract, printed as lowered

mod defaults;
mod gap;
mod plain;

pub use defaults::{default_return, default_value};
pub use gap::ExtendedGenerationGapSerializer;
pub use plain::PlainSerializer;
use solgen_ast::{Definitions, SourceUnit};
use solgen_codegen::{
    generation::{CodeGenerationSerializer, FileEntry, RegistryError, SerializerRegistry},
    traverse::LoweredUnit,
};

/// Registry holding every serializer this crate ships.
pub fn builtin_serializers() -> Result<SerializerRegistry, RegistryError> {
    SerializerRegistry::new([
        Box::new(ExtendedGenerationGapSerializer::new()) as Box<dyn CodeGenerationSerializer>,
        Box::new(PlainSerializer::new()),
    ])
}

/// Definitions of a unit that live outside any contract.
fn file_level(defs: &Definitions) -> Definitions {
    Definitions {
        contracts: Vec::new(),
        ..defs.clone()
    }
}

/// The file for a unit that holds no contract, if it holds anything.
fn standalone_file(unit: &LoweredUnit, print: impl Fn(&SourceUnit) -> String) -> Option<FileEntry> {
    if unit.unit.definitions.is_empty() {
        return None;
    }
    let path = unit
        .output_path
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{}.{}", unit.unit.name, solgen_core::SOURCE_EXTENSION));
    Some(FileEntry::generated(path, print(&unit.unit)))
}
