//! Handlers that turn visited elements into target syntax nodes.

use std::path::PathBuf;

use indexmap::IndexMap;
use solgen_ast::{Contract, Enumeration, ErrorDefinition, Event, SourceUnit, Structure};
use solgen_core::ArtifactRole;
use solgen_model::ModelSource;
use tracing::{debug, warn};

use super::{Element, ElementKind};
use crate::{
    behavior::{DISPATCH_FUNCTION, DiagramCompiler, MergeOutcome, MergeReport, merge_behavior},
    classify::{Classification, classify, state_behavior_diagram},
    mapper,
    pipeline::{Diagnostic, GenerationSettings},
};

const PHASE: &str = "lower";

/// A syntax node produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    SourceUnit(SourceUnit),
    Contract(Contract),
    Structure(Structure),
    Event(Event),
    Error(ErrorDefinition),
    Enumeration(Enumeration),
}

/// What a handler hands back to the traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOutput {
    pub node: Node,
    /// Where the node should be written, relative to the target folder.
    pub output_path: Option<PathBuf>,
}

impl HandlerOutput {
    pub fn new(node: Node) -> Self {
        Self {
            node,
            output_path: None,
        }
    }

    pub fn at(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }
}

/// Everything a handler may read or report to while executing.
pub struct HandlerContext<'a> {
    pub settings: &'a GenerationSettings,
    /// Model file the element was declared in.
    pub source: &'a ModelSource,
    pub compiler: Option<&'a dyn DiagramCompiler>,
    pub diagnostics: &'a mut Vec<Diagnostic>,
    pub merges: &'a mut Vec<MergeReport>,
}

impl HandlerContext<'_> {
    pub fn warning(&mut self, message: impl Into<String>, location: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::warning(PHASE, message).at(location));
    }

    pub fn info(&mut self, message: impl Into<String>, location: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(PHASE, message).at(location));
    }
}

/// Converts one kind of element into a node.
pub trait CodeGenerationHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// The element kind this handler is registered for.
    fn kind(&self) -> ElementKind;

    /// Produce a node for `element`, or `None` to contribute nothing.
    fn execute(&self, element: Element<'_>, ctx: &mut HandlerContext<'_>) -> Option<HandlerOutput>;
}

/// Ordered handlers per element kind, built once per run.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: IndexMap<ElementKind, Vec<Box<dyn CodeGenerationHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The handlers solgen ships with: model, structure and enumeration.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ModelHandler);
        registry.register(StructureHandler);
        registry.register(EnumerationHandler);
        registry
    }

    /// Append `handler` to the list for its kind.
    pub fn register(&mut self, handler: impl CodeGenerationHandler + 'static) {
        self.handlers
            .entry(handler.kind())
            .or_default()
            .push(Box::new(handler));
    }

    /// Handlers for `kind` in registration order; empty if none.
    pub fn handlers_for(&self, kind: ElementKind) -> &[Box<dyn CodeGenerationHandler>] {
        self.handlers.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn handler_names(&self, kind: ElementKind) -> Vec<&'static str> {
        self.handlers_for(kind).iter().map(|h| h.name()).collect()
    }
}

/// Opens one source unit per model, named after the model.
pub struct ModelHandler;

impl CodeGenerationHandler for ModelHandler {
    fn name(&self) -> &'static str {
        "model"
    }

    fn kind(&self) -> ElementKind {
        ElementKind::DataModel
    }

    fn execute(&self, element: Element<'_>, ctx: &mut HandlerContext<'_>) -> Option<HandlerOutput> {
        let Element::DataModel(model) = element else {
            return None;
        };
        let unit = SourceUnit::new(
            model.name.clone(),
            ctx.settings.license.clone(),
            ctx.settings.pragma.clone(),
        );
        Some(
            HandlerOutput::new(Node::SourceUnit(unit))
                .at(ArtifactRole::GeneratedInterface.file_name(&model.name)),
        )
    }
}

/// Classifies a structure and maps it, merging state behavior into contracts.
pub struct StructureHandler;

impl CodeGenerationHandler for StructureHandler {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Structure
    }

    fn execute(&self, element: Element<'_>, ctx: &mut HandlerContext<'_>) -> Option<HandlerOutput> {
        let Element::Structure(structure) = element else {
            return None;
        };

        let classification = classify(structure);
        debug!(structure = %structure.name, %classification, "classified structure");

        let node = match classification {
            Classification::Contract => {
                let mut contract = mapper::map_contract(structure);
                if let Some(diagram) = state_behavior_diagram(structure) {
                    merge_state_behavior(&mut contract, &diagram, ctx);
                }
                Node::Contract(contract)
            }
            Classification::Struct => Node::Structure(mapper::map_struct(structure)),
            Classification::Event => Node::Event(mapper::map_event(structure)),
            Classification::Error => Node::Error(mapper::map_error(structure)),
        };

        Some(HandlerOutput::new(node))
    }
}

fn merge_state_behavior(contract: &mut Contract, diagram: &str, ctx: &mut HandlerContext<'_>) {
    let path = ctx.source.base_dir().join(diagram);

    let Some(compiler) = ctx.compiler else {
        warn!(contract = %contract.name, "no diagram compiler configured");
        ctx.warning(
            format!(
                "state behavior '{}' ignored: no diagram compiler configured",
                diagram
            ),
            contract.name.clone(),
        );
        return;
    };

    let report = match merge_behavior(contract, &path, compiler) {
        Ok(report) => report,
        Err(e) => {
            warn!(diagram = %path.display(), error = %e, "diagram could not be compiled");
            ctx.warning(
                format!("could not compile diagram {}: {:#}", path.display(), e),
                contract.name.clone(),
            );
            return;
        }
    };

    match &report.outcome {
        MergeOutcome::DiagramMissing => {
            warn!(diagram = %path.display(), "state diagram not found");
            ctx.warning(
                format!("state diagram {} not found", path.display()),
                contract.name.clone(),
            );
        }
        MergeOutcome::NoMatchingContract => ctx.warning(
            format!(
                "diagram {} compiled without a contract named '{}'",
                path.display(),
                contract.name
            ),
            contract.name.clone(),
        ),
        MergeOutcome::Merged { rewrite, .. } => {
            for branch in &rewrite.unmatched {
                ctx.info(
                    format!(
                        "dispatch branch '{}' left unchanged: {}",
                        branch.condition, branch.reason
                    ),
                    format!("{}.{}", contract.name, DISPATCH_FUNCTION),
                );
            }
        }
    }

    ctx.merges.push(report);
}

/// Maps enumerations to enums with their ordered values.
pub struct EnumerationHandler;

impl CodeGenerationHandler for EnumerationHandler {
    fn name(&self) -> &'static str {
        "enumeration"
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Enumeration
    }

    fn execute(&self, element: Element<'_>, _ctx: &mut HandlerContext<'_>) -> Option<HandlerOutput> {
        match element {
            Element::Enumeration(e) => Some(HandlerOutput::new(Node::Enumeration(
                mapper::map_enumeration(e),
            ))),
            _ => None,
        }
    }
}
