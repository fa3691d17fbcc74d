//! Declaration-level Solidity parser.
//!
//! Reads back the files users own in the output folder, so the serializer
//! can see which interface they declared and which functions it has.

mod error;
mod grammar;
mod tokenizer;

use std::path::Path;

use eyre::WrapErr;
pub use error::ParseError;
use solgen_ast::SourceUnit;
use solgen_codegen::language::SourceParser;
pub use tokenizer::{Span, SpannedToken, Token, Tokenizer};

/// Parse `source`; the unit is named after the file stem of `filename`.
pub fn parse(source: &str, filename: &str) -> Result<SourceUnit, ParseError> {
    let name = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let mut unit = grammar::Parser::new(source)?.parse_unit(name)?;
    let enumerations = unit.enumeration_names();
    unit.resolve_enumerations(&enumerations);
    Ok(unit)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SolidityParser;

impl SolidityParser {
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for SolidityParser {
    fn parse(&self, source: &str, filename: &str) -> eyre::Result<SourceUnit> {
        parse(source, filename).wrap_err_with(|| format!("Failed to parse {}", filename))
    }
}
