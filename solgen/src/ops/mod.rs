//! Core operations.
//!
//! The business logic behind each command, separated from argument parsing
//! and output rendering.

pub mod check;
pub mod generate;
pub mod inspect;

pub use check::check;
pub use generate::generate;
pub use inspect::inspect;
use solgen_codegen::pipeline::Pipeline;
use solgen_solidity::PlantUmlCompiler;

/// The pipeline every command runs: default lints, PlantUML diagrams.
fn pipeline() -> Pipeline {
    Pipeline::new().with_compiler(PlantUmlCompiler::new())
}
