use solgen_ast::SourceUnit;
use solgen_codegen::{builder::CodeBuilder, language::SourcePrinter};

use crate::render::Node;

/// Prints source units as Solidity text with 4-space indentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidityPrinter;

impl SolidityPrinter {
    pub fn new() -> Self {
        Self
    }
}

impl SourcePrinter for SolidityPrinter {
    fn print(&self, unit: &SourceUnit) -> String {
        let mut builder = CodeBuilder::solidity();
        builder.emit(&Node(unit));
        builder.build()
    }
}
