use std::path::Path;

use eyre::Result;
use serde::Serialize;
use solgen_ast::SourceUnit;

/// One transition of a compiled state diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub source: String,
    pub target: String,
    pub trigger: String,
    pub guard: Option<String>,
    pub action: Option<String>,
}

/// Output of a [`DiagramCompiler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledBehavior {
    /// Contract-shaped fragment: state fields plus a single dispatch function.
    pub fragment: SourceUnit,
    pub transitions: Vec<Transition>,
}

/// Compiles a state-transition diagram into a contract fragment.
pub trait DiagramCompiler: Send + Sync {
    /// Short identifier of the diagram dialect (e.g. "plantuml").
    fn name(&self) -> &'static str;

    /// Compile `diagram` into a fragment whose contract is named `contract`.
    ///
    /// Returns `Ok(None)` when the diagram file does not exist.
    fn compile(&self, diagram: &Path, contract: &str) -> Result<Option<CompiledBehavior>>;
}
