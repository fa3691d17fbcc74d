//! Test utilities for generators and handlers.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::{Path, PathBuf};

use eyre::Result;
use solgen_ast::SourceUnit;
use solgen_model::{DataModel, DataStructure, ImportedAspect, ModelSource, vocabulary};

use crate::behavior::{CompiledBehavior, DiagramCompiler};

/// A diagram compiler that returns a fixed fragment for every diagram.
pub struct StaticCompiler {
    fragment: Option<SourceUnit>,
}

impl StaticCompiler {
    /// Behaves as if every diagram were compiled into `fragment`.
    pub fn new(fragment: SourceUnit) -> Self {
        Self {
            fragment: Some(fragment),
        }
    }

    /// Behaves as if no diagram file existed.
    pub fn missing() -> Self {
        Self { fragment: None }
    }
}

impl DiagramCompiler for StaticCompiler {
    fn name(&self) -> &'static str {
        "static"
    }

    fn compile(&self, _diagram: &Path, _contract: &str) -> Result<Option<CompiledBehavior>> {
        Ok(self.fragment.clone().map(|fragment| CompiledBehavior {
            fragment,
            transitions: Vec::new(),
        }))
    }
}

/// A structure carrying the contract-type aspect.
pub fn contract(name: &str) -> DataStructure {
    DataStructure::new(name).aspect(
        ImportedAspect::new(vocabulary::CONTRACT_TYPE).property(vocabulary::IS_CONTRACT, true),
    )
}

/// A model as if it had been loaded from `path`.
pub fn model_source(path: impl Into<PathBuf>, model: DataModel) -> ModelSource {
    ModelSource {
        path: path.into(),
        model,
    }
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {}\n", exp));
                diff.push_str(&format!("  actual:   {}\n", act));
            }
        }

        panic!("Content mismatch:\n{}", diff);
    }
}
