//! Lays [`CodeFragment`]s out as indented text.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates rendered nodes into one indented buffer.
///
/// ```
/// use solgen_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let fragments = vec![CodeFragment::braced(
///     "contract Vault {",
///     vec![CodeFragment::line("uint public total;")],
/// )];
/// let mut builder = CodeBuilder::solidity();
/// builder.emit(&fragments);
///
/// assert_eq!(builder.build(), "contract Vault {\n    uint public total;\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            level: 0,
            indent,
            buffer: String::new(),
        }
    }

    pub fn solidity() -> Self {
        Self::new(Indent::SOLIDITY)
    }

    /// Append every fragment of `node` at the current level.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply(fragment);
        }
        self
    }

    pub fn build(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn apply(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(text) => self.line(&text),
            // Blank lines carry no trailing indentation.
            CodeFragment::Blank => self.buffer.push('\n'),
            CodeFragment::Comment(text) => self.line(&format!("// {}", text)),
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.line(&header);
                self.nested(body);
                if let Some(close) = close {
                    self.line(&close);
                }
            }
            CodeFragment::Indent(body) => self.nested(body),
            CodeFragment::Sequence(body) => body.into_iter().for_each(|f| self.apply(f)),
        }
    }

    fn nested(&mut self, body: Vec<CodeFragment>) {
        self.level += 1;
        for fragment in body {
            self.apply(fragment);
        }
        self.level -= 1;
    }

    fn line(&mut self, text: &str) {
        self.indent.write(&mut self.buffer, self.level);
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }
}
