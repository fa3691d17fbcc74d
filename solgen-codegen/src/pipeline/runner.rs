//! Pipeline orchestrator.

use eyre::{Result, bail};
use solgen_model::ModelSource;
use tracing::debug;

use super::{
    CompilationContext, GenerationSettings, Phase, Plugin,
    phases::{LowerPhase, ValidatePhase},
};
use crate::behavior::DiagramCompiler;

/// The compilation pipeline orchestrator.
///
/// Runs the built-in `validate` and `lower` phases followed by any user
/// phases, calling plugin hooks around each one.
///
/// ```ignore
/// let ctx = Pipeline::new()
///     .with_compiler(PlantUmlCompiler)
///     .plugin(MyPlugin)
///     .run(models, settings)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    lower: LowerPhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// A pipeline with the default lints and no diagram compiler.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            lower: LowerPhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Compile state-behavior diagrams with `compiler` while lowering.
    pub fn with_compiler(mut self, compiler: impl DiagramCompiler + 'static) -> Self {
        self.lower = self.lower.with_compiler(compiler);
        self
    }

    /// Replace the validate phase, e.g. to run a custom set of lints.
    pub fn validation(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Names of all phases in execution order.
    pub fn phase_names(&self) -> Vec<&'static str> {
        self.all_phases().map(|p| p.name()).collect()
    }

    fn all_phases(&self) -> impl Iterator<Item = &dyn Phase> {
        [&self.validate as &dyn Phase, &self.lower as &dyn Phase]
            .into_iter()
            .chain(self.phases.iter().map(|p| p.as_ref() as &dyn Phase))
    }

    /// Run every phase on `models`.
    ///
    /// # Errors
    ///
    /// Returns an error if a phase or plugin fails fatally, including when
    /// validation records error diagnostics.
    pub fn run(
        &self,
        models: Vec<ModelSource>,
        settings: GenerationSettings,
    ) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(models, settings);

        for phase in self.all_phases() {
            self.run_phase(phase, &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run only the lints, keeping every diagnostic even when some are errors.
    pub fn check(&self, models: Vec<ModelSource>, settings: GenerationSettings) -> CompilationContext {
        let mut ctx = CompilationContext::new(models, settings);
        self.validate.lint(&mut ctx);
        ctx
    }

    /// Run the phases after `validate` on a context from [`Pipeline::check`],
    /// so the lints are not run a second time. Plugin hooks see only these
    /// phases.
    ///
    /// # Errors
    ///
    /// Returns an error if `ctx` holds error diagnostics, or if a phase or
    /// plugin fails fatally.
    pub fn run_checked(&self, mut ctx: CompilationContext) -> Result<CompilationContext> {
        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        for phase in self.all_phases().skip(1) {
            self.run_phase(phase, &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        debug!(phase = phase_name, "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
