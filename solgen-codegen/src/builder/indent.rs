//! Indentation unit for printed source.

/// One indentation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    /// 4-space indentation, the Solidity style guide default.
    pub const SOLIDITY: Self = Self::Spaces(4);

    /// Append `level` indentation units to `out`.
    pub fn write(&self, out: &mut String, level: usize) {
        match self {
            Self::Spaces(width) => {
                out.extend(std::iter::repeat_n(' ', level * usize::from(*width)))
            }
            Self::Tab => out.extend(std::iter::repeat_n('\t', level)),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::SOLIDITY
    }
}
