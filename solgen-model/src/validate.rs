//! Identifier checks applied when a model file is loaded.

use miette::SourceSpan;

use crate::{ComplexType, DataModel, Error, Result};

/// Reserved words of the target language that cannot name a definition.
pub(crate) const RESERVED_WORDS: &[&str] = &[
    "abstract", "address", "anonymous", "as", "assembly", "bool", "break", "bytes", "calldata",
    "catch", "constant", "constructor", "continue", "contract", "delete", "do", "else", "emit",
    "enum", "error", "event", "external", "fallback", "false", "for", "function", "if",
    "immutable", "import", "indexed", "interface", "internal", "is", "library", "mapping",
    "memory", "modifier", "new", "override", "payable", "pragma", "private", "public", "pure",
    "receive", "return", "returns", "revert", "storage", "string", "struct", "true", "try",
    "type", "uint", "int", "unchecked", "using", "view", "virtual", "while",
];

pub(crate) fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Returns `None` if `name` is a valid identifier, `Some(reason)` otherwise.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    if is_reserved(name) {
        return Some("name is a reserved word of the target language");
    }

    None
}

/// Find the span of a declared name in TOML or JSON source.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns = [
        format!("name = \"{}\"", name),
        format!("\"name\": \"{}\"", name),
        format!("\"{}\"", name),
    ];

    for pattern in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            let start = pos + pattern.len() - name.len() - 1;
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    None
}

/// Check every declared name in `model`.
pub(crate) fn validate_model(model: &DataModel, src: &str, filename: &str) -> Result<()> {
    let check = |name: &str, context: &str| -> Result<()> {
        match validate_identifier(name) {
            Some(reason) => Err(Error::invalid_identifier(
                name,
                context,
                reason,
                src,
                filename,
                find_name_span(src, name),
            )),
            None => Ok(()),
        }
    };

    for ty in &model.complex_types {
        match ty {
            ComplexType::Structure(s) => {
                check(&s.name, "structure")?;
                for field in &s.fields {
                    check(&field.name, "field")?;
                }
                for op in &s.operations {
                    check(&op.name, "operation")?;
                    for param in &op.parameters {
                        check(&param.name, "parameter")?;
                    }
                }
            }
            ComplexType::Enumeration(e) => {
                check(&e.name, "enumeration")?;
                for value in &e.fields {
                    check(value, "enumeration value")?;
                }
            }
        }
    }

    Ok(())
}
