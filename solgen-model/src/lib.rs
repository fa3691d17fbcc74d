// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Annotated domain model consumed by the solgen contract generator.
//!
//! A model file declares structures, enumerations and their members. Each
//! structure, field, operation and parameter may carry aspects: qualified
//! names with a small property map that steer how the element is turned into
//! contract code. See [`vocabulary`] for the names the generator understands.

mod aspect;
mod config;
mod error;
mod model;
mod repository;
mod types;
mod validate;
pub mod vocabulary;

pub use aspect::{HasAspects, ImportedAspect, PropertyValue};
pub use config::{ConfigFile, GeneratorConfig};
pub use error::{Error, Result};
pub use model::{
    ComplexType, ComplexTypeFeature, DataField, DataModel, DataOperation, DataStructure,
    Enumeration, Parameter,
};
pub use repository::{ModelFormat, ModelSource, load_model, parse_str, resolve_models};
pub use types::{PrimitiveType, TypeRef};
