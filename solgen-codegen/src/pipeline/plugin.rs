//! Pipeline plugin trait.

use eyre::Result;

use super::CompilationContext;

/// A hook into the compilation pipeline.
///
/// Plugins are called before and after every phase and may inspect or
/// modify the context, e.g. to rename contracts after lowering or to add
/// diagnostics of their own.
///
/// ```ignore
/// struct ForbidWarnings;
///
/// impl Plugin for ForbidWarnings {
///     fn name(&self) -> &'static str { "forbid-warnings" }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
///         if ctx.has_warnings() {
///             eyre::bail!("{} produced warnings", phase);
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called before `phase` runs. Returning an error aborts the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after `phase` completed. Returning an error aborts the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
