//! Target-language abstractions.
//!
//! - [`SourcePrinter`] - turns a source unit into text
//! - [`SourceParser`] - reads declarations back from existing source files
//! - [`LanguageCodegen`] - drives serialization and writing for a language

mod traits;

pub use traits::{GenerateResult, LanguageCodegen, PreviewFile, SourceParser, SourcePrinter};
