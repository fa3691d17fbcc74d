//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - lints every resolved model
//! - [`LowerPhase`] - walks the models and builds target source units

mod lower;
mod validate;

pub use lower::LowerPhase;
pub use validate::{
    ContractCountLint, DeclarationOrderLint, DuplicateTypeLint, Lint,
    MappingAspectLint, ValidatePhase,
};
