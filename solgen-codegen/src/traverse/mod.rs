//! Depth-first lowering of domain models into target source units.
//!
//! Every element of a model is visited in pre-order and passed to the
//! handlers registered for its kind. Handler outputs are folded into a
//! [`GenerationState`], which tracks the unit being built and the most
//! recently classified contract that later structs, events and errors
//! attach to.

mod element;
mod handlers;

use std::path::{Path, PathBuf};

pub use element::{Element, ElementKind, pre_order};
pub use handlers::{
    CodeGenerationHandler, EnumerationHandler, HandlerContext, HandlerOutput, HandlerRegistry,
    ModelHandler, Node, StructureHandler,
};
use serde::Serialize;
use solgen_ast::{Contract, SourceUnit};
use tracing::debug;

use crate::pipeline::Diagnostic;

/// A source unit produced from one model file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoweredUnit {
    pub unit: SourceUnit,
    /// Model file the unit was lowered from.
    pub origin: PathBuf,
    /// File for definitions that belong to no contract.
    pub output_path: Option<PathBuf>,
}

impl LoweredUnit {
    pub fn contracts(&self) -> impl Iterator<Item = &Contract> {
        self.unit.definitions.contracts.iter()
    }
}

/// Traversal state for one run.
#[derive(Debug, Default)]
pub struct GenerationState {
    units: Vec<LoweredUnit>,
    current_contract: Option<usize>,
}

impl GenerationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contract that structs, events and errors currently attach to.
    pub fn current_contract(&self) -> Option<&Contract> {
        let unit = self.units.last()?;
        unit.unit.definitions.contracts.get(self.current_contract?)
    }

    fn current_contract_mut(&mut self) -> Option<&mut Contract> {
        let index = self.current_contract?;
        self.units.last_mut()?.unit.definitions.contracts.get_mut(index)
    }

    /// Fold a handler output into the state.
    ///
    /// A new source unit resets the current contract. Nodes that need a
    /// container which does not exist yet are dropped with a warning.
    pub fn absorb(&mut self, output: HandlerOutput, origin: &Path, diagnostics: &mut Vec<Diagnostic>) {
        let unit_name = self
            .units
            .last()
            .map(|u| u.unit.name.clone())
            .unwrap_or_default();
        let orphan = |kind: &str, name: &str| {
            Diagnostic::warning(
                "lower",
                format!("{} '{}' dropped: no contract to attach it to", kind, name),
            )
            .at(format!("{}.{}", unit_name, name))
        };

        match output.node {
            Node::SourceUnit(unit) => {
                self.units.push(LoweredUnit {
                    unit,
                    origin: origin.to_path_buf(),
                    output_path: output.output_path,
                });
                self.current_contract = None;
            }
            Node::Contract(contract) => match self.units.last_mut() {
                Some(unit) => {
                    debug!(contract = %contract.name, "contract is now current");
                    unit.unit.definitions.contracts.push(contract);
                    self.current_contract = Some(unit.unit.definitions.contracts.len() - 1);
                }
                None => diagnostics.push(orphan("contract", &contract.name)),
            },
            Node::Structure(structure) => match self.current_contract_mut() {
                Some(contract) => contract.definitions.structures.push(structure),
                None => diagnostics.push(orphan("struct", &structure.name)),
            },
            Node::Event(event) => match self.current_contract_mut() {
                Some(contract) => contract.definitions.events.push(event),
                None => diagnostics.push(orphan("event", &event.name)),
            },
            Node::Error(error) => match self.current_contract_mut() {
                Some(contract) => contract.definitions.errors.push(error),
                None => diagnostics.push(orphan("error", &error.name)),
            },
            Node::Enumeration(enumeration) => {
                if let Some(contract) = self.current_contract_mut() {
                    contract.definitions.enumerations.push(enumeration);
                } else if let Some(unit) = self.units.last_mut() {
                    unit.unit.definitions.enumerations.push(enumeration);
                } else {
                    diagnostics.push(orphan("enum", &enumeration.name));
                }
            }
        }
    }

    pub fn into_units(self) -> Vec<LoweredUnit> {
        self.units
    }
}

/// Visit every element of `ctx.source` and fold handler outputs into `state`.
pub fn lower_model(
    state: &mut GenerationState,
    registry: &HandlerRegistry,
    ctx: &mut HandlerContext<'_>,
) {
    let source = ctx.source;

    for element in pre_order(&source.model) {
        for handler in registry.handlers_for(element.kind()) {
            if let Some(output) = handler.execute(element, ctx) {
                state.absorb(output, &source.path, ctx.diagnostics);
            }
        }
    }
}
