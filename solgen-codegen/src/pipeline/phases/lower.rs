//! Lower phase - walks the models and builds target source units.

use std::collections::HashSet;

use eyre::Result;
use tracing::info;

use crate::{
    behavior::DiagramCompiler,
    pipeline::{CompilationContext, Phase},
    traverse::{GenerationState, HandlerContext, HandlerRegistry, lower_model},
};

/// Phase that lowers every resolved model into a source unit.
pub struct LowerPhase {
    registry: HandlerRegistry,
    compiler: Option<Box<dyn DiagramCompiler>>,
}

impl LowerPhase {
    /// Lower with the built-in handlers and no diagram compiler.
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::builtin(),
            compiler: None,
        }
    }

    pub fn with_compiler(mut self, compiler: impl DiagramCompiler + 'static) -> Self {
        self.compiler = Some(Box::new(compiler));
        self
    }

    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }
}

impl Default for LowerPhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Map domain elements to contracts, structs, events, errors and enums"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut state = GenerationState::new();

        for source in &ctx.models {
            let mut handler_ctx = HandlerContext {
                settings: &ctx.settings,
                source,
                compiler: self.compiler.as_deref(),
                diagnostics: &mut ctx.diagnostics,
                merges: &mut ctx.merges,
            };
            lower_model(&mut state, &self.registry, &mut handler_ctx);
        }

        ctx.units = state.into_units();

        // Enums are value types; a model may use an enum declared by another.
        let enumerations: HashSet<String> = ctx
            .units
            .iter()
            .flat_map(|unit| unit.unit.enumeration_names())
            .collect();
        for unit in &mut ctx.units {
            unit.unit.resolve_enumerations(&enumerations);
        }

        for unit in &ctx.units {
            info!(
                unit = %unit.unit.name,
                contracts = unit.unit.definitions.contracts.len(),
                "lowered model"
            );
        }

        Ok(())
    }
}
