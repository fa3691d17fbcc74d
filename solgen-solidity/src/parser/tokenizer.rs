//! Solidity tokenizer.
//!
//! Produces identifiers, numbers, string literals, comments and punctuation,
//! each with the line and column it starts at. Keywords are plain
//! identifiers; the parser decides what they mean.

use super::ParseError;

/// Multi-character operators, longest first.
const OPERATORS: &[&str] = &[
    ">>>=", "<<=", ">>=", ">>>", "**", "=>", ">=", "<=", "==", "!=", "&&", "||", "++", "--", "+=",
    "-=", "*=", "/=", "%=", "|=", "&=", "^=", "<<", ">>", "->",
];

const SINGLE: &str = "{}()[];,.=<>+-*/%!&|^~?:@";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Identifier(String),
    /// Numeric literal as written, e.g. `0x1f`, `1e18`, `0.8.0`.
    Number(String),
    /// String literal contents without the quotes, escapes untouched.
    StringLiteral(String),
    /// Line or block comment text without the delimiters.
    Comment(String),
    Symbol(String),
    Eof,
}

impl Token {
    pub fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self, Token::Symbol(s) if s == symbol)
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        matches!(self, Token::Identifier(s) if s == name)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "'{}'", name),
            Token::Number(n) => write!(f, "number {}", n),
            Token::StringLiteral(s) => write!(f, "string \"{}\"", s),
            Token::Comment(_) => f.write_str("comment"),
            Token::Symbol(s) => write!(f, "'{}'", s),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

/// Position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    /// Character offset.
    pub offset: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    /// Character offset one past the token.
    pub end: usize,
}

pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Tokenizer {
    pub fn new(text: &str) -> Self {
        Tokenizer {
            input: text.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the whole input. The last token is always [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<SpannedToken>, ParseError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let span = self.current_span();

            let Some(ch) = self.peek() else {
                tokens.push(SpannedToken {
                    token: Token::Eof,
                    span,
                    end: self.position,
                });
                return Ok(tokens);
            };

            let token = match ch {
                '/' if self.peek_ahead(1) == Some('/') => self.read_line_comment(),
                '/' if self.peek_ahead(1) == Some('*') => self.read_block_comment(span)?,
                '"' | '\'' => self.read_string(ch, span)?,
                c if c.is_ascii_digit() => self.read_number(),
                c if is_identifier_start(c) => self.read_identifier(),
                _ => self.read_symbol(ch, span)?,
            };

            tokens.push(SpannedToken {
                token,
                span,
                end: self.position,
            });
        }
    }

    // ── Character helpers ──────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied();
        if let Some(c) = ch {
            self.position += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    fn current_span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
            offset: self.position,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|c| keep(*c)) {
            out.push(c);
            self.advance();
        }
        out
    }

    // ── Token readers ──────────────────────────────────────

    fn read_line_comment(&mut self) -> Token {
        self.advance();
        self.advance();
        let text = self.take_while(|c| c != '\n');
        Token::Comment(text.trim().to_string())
    }

    fn read_block_comment(&mut self, span: Span) -> Result<Token, ParseError> {
        self.advance();
        self.advance();
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(Token::Comment(text.trim().to_string()));
                }
                Some(c) => text.push(c),
                None => return Err(ParseError::UnterminatedComment { span }),
            }
        }
    }

    fn read_string(&mut self, quote: char, span: Span) -> Result<Token, ParseError> {
        self.advance();
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('\\') => {
                    text.push('\\');
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                Some(c) if c == quote => return Ok(Token::StringLiteral(text)),
                Some('\n') | None => return Err(ParseError::UnterminatedString { span }),
                Some(c) => text.push(c),
            }
        }
    }

    fn read_number(&mut self) -> Token {
        Token::Number(self.take_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_'))
    }

    fn read_identifier(&mut self) -> Token {
        Token::Identifier(self.take_while(is_identifier_part))
    }

    fn read_symbol(&mut self, ch: char, span: Span) -> Result<Token, ParseError> {
        for op in OPERATORS {
            let matches = op
                .chars()
                .enumerate()
                .all(|(i, c)| self.peek_ahead(i) == Some(c));
            if matches {
                for _ in 0..op.chars().count() {
                    self.advance();
                }
                return Ok(Token::Symbol(op.to_string()));
            }
        }

        if SINGLE.contains(ch) {
            self.advance();
            return Ok(Token::Symbol(ch.to_string()));
        }

        Err(ParseError::UnexpectedChar { ch, span })
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token> {
        Tokenizer::new(text)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_pragma_tokens() {
        assert_eq!(
            tokens("pragma solidity >=0.8.0 <0.9.0;"),
            vec![
                Token::Identifier("pragma".into()),
                Token::Identifier("solidity".into()),
                Token::Symbol(">=".into()),
                Token::Number("0.8.0".into()),
                Token::Symbol("<".into()),
                Token::Number("0.9.0".into()),
                Token::Symbol(";".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_and_strings() {
        assert_eq!(
            tokens("// SPDX-License-Identifier: MIT\n/* block */ import 'a.sol';"),
            vec![
                Token::Comment("SPDX-License-Identifier: MIT".into()),
                Token::Comment("block".into()),
                Token::Identifier("import".into()),
                Token::StringLiteral("a.sol".into()),
                Token::Symbol(";".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_mapping_arrow() {
        assert_eq!(
            tokens("mapping(address => uint)"),
            vec![
                Token::Identifier("mapping".into()),
                Token::Symbol("(".into()),
                Token::Identifier("address".into()),
                Token::Symbol("=>".into()),
                Token::Identifier("uint".into()),
                Token::Symbol(")".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_spans_track_lines() {
        let spanned = Tokenizer::new("contract\n  Vault").tokenize().unwrap();
        assert_eq!(spanned[1].span.line, 2);
        assert_eq!(spanned[1].span.column, 3);
        assert_eq!(spanned[1].span.offset, 11);
        assert_eq!(spanned[1].end, 16);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Tokenizer::new("x = \"abc").tokenize().unwrap_err();
        assert_eq!(err.to_string(), "1:5: unterminated string literal");
    }

    #[test]
    fn test_unexpected_character() {
        let err = Tokenizer::new("uint #x;").tokenize().unwrap_err();
        assert_eq!(err.to_string(), "1:6: unexpected character '#'");
    }
}
