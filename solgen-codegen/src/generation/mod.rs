//! Serializers and the files they produce.
//!
//! - [`CodeGenerationSerializer`] - lays out the files for one lowered unit
//! - [`SerializerRegistry`] - named serializers with exactly one default
//! - [`FileRegistry`] - declarative collection of files to preview or write

mod registry;
mod serializer;

pub use registry::{FileCategory, FileEntry, FileRegistry, PreviewEntry, WriteStats};
pub use serializer::{
    CodeGenerationSerializer, RegistryError, Serialized, SerializerRegistry, SkippedContract,
};
