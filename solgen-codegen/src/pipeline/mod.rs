//! Compilation pipeline from resolved models to lowered source units.
//!
//! The [`Pipeline`] runs explicit phases over a [`CompilationContext`]:
//!
//! - `validate`: lints over every model, errors abort the run
//! - `lower`: the handler-driven traversal that builds target source units
//! - user phases, in registration order
//!
//! Plugins are called before and after each phase. Non-fatal findings are
//! collected as [`Diagnostic`]s on the context.
//!
//! # Example
//!
//! ```ignore
//! use solgen_codegen::pipeline::{GenerationSettings, Pipeline};
//!
//! let models = solgen_model::resolve_models("vault.toml")?;
//! let ctx = Pipeline::new()
//!     .with_compiler(PlantUmlCompiler)
//!     .run(models, GenerationSettings::default())?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::{CompilationContext, GenerationSettings};
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
