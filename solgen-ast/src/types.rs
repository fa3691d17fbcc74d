use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A type as written in the target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// An elementary or user-defined type name (`uint`, `address`, `Account`).
    Named(String),
    /// A user-defined enum. Enum values are value types and take no data
    /// location.
    Enum(String),
    /// `mapping(K => V)`.
    Mapping { key: Box<Type>, value: Box<Type> },
    /// `T[]`.
    Array(Box<Type>),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    pub fn mapping(key: Type, value: Type) -> Self {
        Self::Mapping {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn array(inner: Type) -> Self {
        Self::Array(Box::new(inner))
    }

    /// Name of a [`Type::Named`] or [`Type::Enum`] type.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) | Self::Enum(name) => Some(name),
            _ => None,
        }
    }

    /// Retype named references to any of `enumerations` as [`Type::Enum`],
    /// inside mappings and arrays too.
    pub fn resolve_enumerations(&mut self, enumerations: &HashSet<String>) {
        match self {
            Self::Named(name) if enumerations.contains(name.as_str()) => {
                *self = Self::Enum(std::mem::take(name));
            }
            Self::Mapping { key, value } => {
                key.resolve_enumerations(enumerations);
                value.resolve_enumerations(enumerations);
            }
            Self::Array(inner) => inner.resolve_enumerations(enumerations),
            Self::Named(_) | Self::Enum(_) => {}
        }
    }

    /// Whether values of this type live in a data location (memory, storage,
    /// calldata) when passed around.
    pub fn is_reference(&self) -> bool {
        match self {
            Self::Mapping { .. } | Self::Array(_) => true,
            Self::Named(name) => !is_value_type(name),
            Self::Enum(_) => false,
        }
    }
}

/// Elementary value types: `bool`, `address`, `uintN`, `intN`, `bytesN`.
fn is_value_type(name: &str) -> bool {
    let sized = |prefix: &str| {
        name.strip_prefix(prefix)
            .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
    };

    match name {
        "bool" | "address" | "address payable" => true,
        "bytes" | "string" => false,
        _ => sized("uint") || sized("int") || (name.len() > 5 && sized("bytes")),
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) | Self::Enum(name) => f.write_str(name),
            Self::Mapping { key, value } => write!(f, "mapping({} => {})", key, value),
            Self::Array(inner) => write!(f, "{}[]", inner),
        }
    }
}
