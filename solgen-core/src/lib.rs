//! Core utilities for the solgen contract generator.

mod artifact;
mod file;

pub use artifact::{ArtifactRole, SOURCE_EXTENSION};
pub use file::{FileRules, Overwrite, WriteResult, write_file};
