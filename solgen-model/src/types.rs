//! Type references used by fields, parameters and return types.

use serde::{Deserialize, Serialize};

/// Primitive types of the domain modeling language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Date,
    Double,
    Float,
    Int,
    Long,
    Short,
    String,
    Unspecified,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 11] = [
        Self::Boolean,
        Self::Byte,
        Self::Char,
        Self::Date,
        Self::Double,
        Self::Float,
        Self::Int,
        Self::Long,
        Self::Short,
        Self::String,
        Self::Unspecified,
    ];

    /// Get the canonical name of this primitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Date => "date",
            Self::Double => "double",
            Self::Float => "float",
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
            Self::String => "string",
            Self::Unspecified => "unspecified",
        }
    }

    /// Look up a primitive by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

/// A reference to either a primitive or a user-defined (complex) type.
///
/// Serialized as the bare type name; names outside the primitive vocabulary
/// are complex types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Complex(String),
}

impl TypeRef {
    pub fn parse(name: &str) -> Self {
        match PrimitiveType::from_name(name) {
            Some(primitive) => Self::Primitive(primitive),
            None => Self::Complex(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(p) => p.as_str(),
            Self::Complex(name) => name,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.name().to_string()
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitive() {
        assert_eq!(TypeRef::parse("date"), TypeRef::Primitive(PrimitiveType::Date));
        assert_eq!(
            TypeRef::parse("boolean"),
            TypeRef::Primitive(PrimitiveType::Boolean)
        );
    }

    #[test]
    fn test_parse_complex() {
        let ty = TypeRef::parse("Account");
        assert_eq!(ty, TypeRef::Complex("Account".into()));
        assert!(!ty.is_primitive());
        assert_eq!(ty.name(), "Account");
    }

    #[test]
    fn test_solidity_names_are_complex() {
        // Target-language names pass through the complex branch untouched.
        assert_eq!(TypeRef::parse("address").name(), "address");
        assert!(!TypeRef::parse("uint").is_primitive());
    }

    #[test]
    fn test_primitive_names_round_trip() {
        for primitive in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_name(primitive.as_str()), Some(primitive));
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&TypeRef::parse("date")).unwrap();
        assert_eq!(json, "\"date\"");
        let back: TypeRef = serde_json::from_str("\"Vault\"").unwrap();
        assert_eq!(back, TypeRef::Complex("Vault".into()));
    }
}
