use super::tokenizer::Span;

/// A syntax error, positioned at the offending line and column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{span}: unexpected character '{ch}'")]
    UnexpectedChar { ch: char, span: Span },

    #[error("{span}: unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("{span}: unterminated comment")]
    UnterminatedComment { span: Span },

    #[error("{span}: expected {expected}, found {found}")]
    Expected {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("{span}: unexpected end of input in {context}")]
    UnexpectedEof { context: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar { span, .. }
            | Self::UnterminatedString { span }
            | Self::UnterminatedComment { span }
            | Self::Expected { span, .. }
            | Self::UnexpectedEof { span, .. } => *span,
        }
    }
}
