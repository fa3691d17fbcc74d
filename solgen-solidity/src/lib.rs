//! Solidity target for solgen.
//!
//! - [`SolidityPrinter`] prints lowered source units as `.sol` text
//! - [`SolidityParser`] reads declarations back from user-owned files
//! - [`PlantUmlCompiler`] turns state diagrams into dispatch contracts
//! - [`ExtendedGenerationGapSerializer`] and [`PlainSerializer`] lay out files
//! - [`SolidityGenerator`] writes or previews the result

mod generator;
pub mod parser;
mod printer;
mod render;
pub mod serializers;
mod statechart;

pub use generator::SolidityGenerator;
pub use parser::{ParseError, SolidityParser, parse};
pub use printer::SolidityPrinter;
pub use render::{IMPLEMENTATION_REQUIRED, signature};
pub use serializers::{
    ExtendedGenerationGapSerializer, PlainSerializer, builtin_serializers, default_return,
    default_value,
};
pub use solgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use statechart::{INVALID_TRANSITION, PlantUmlCompiler, STATE_FIELD, Statechart, StatechartError};
