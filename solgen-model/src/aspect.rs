//! Aspects: qualified, property-carrying metadata on domain elements.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A property value attached to an aspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl PropertyValue {
    /// Whether the value evaluates to true (`true` or the string `"true"`).
    pub fn is_true(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::String(s) => s.eq_ignore_ascii_case("true"),
            Self::Integer(_) | Self::Float(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// An aspect applied to a domain element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedAspect {
    /// Fully qualified aspect name, e.g. `Solidity.Mapping`.
    pub name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, PropertyValue>,
}

impl ImportedAspect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// String form of a property, whatever its underlying value type.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }
}

/// Elements that carry an aspect list.
pub trait HasAspects {
    fn aspects(&self) -> &[ImportedAspect];

    /// First aspect with the given qualified name.
    fn aspect(&self, name: &str) -> Option<&ImportedAspect> {
        self.aspects().iter().find(|a| a.name == name)
    }

    fn has_aspect(&self, name: &str) -> bool {
        self.aspect(name).is_some()
    }
}

impl HasAspects for [ImportedAspect] {
    fn aspects(&self) -> &[ImportedAspect] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_truthiness() {
        assert!(PropertyValue::Bool(true).is_true());
        assert!(PropertyValue::from("TRUE").is_true());
        assert!(!PropertyValue::from("yes").is_true());
        assert!(!PropertyValue::Integer(1).is_true());
    }

    #[test]
    fn test_aspect_lookup() {
        let aspects = vec![
            ImportedAspect::new("Solidity.Payable"),
            ImportedAspect::new("Solidity.Mapping")
                .property("key", "address")
                .property("value", "uint"),
        ];

        let mapping = aspects.as_slice().aspect("Solidity.Mapping").unwrap();
        assert_eq!(mapping.get_string("key").as_deref(), Some("address"));
        assert!(aspects.as_slice().has_aspect("Solidity.Payable"));
        assert!(!aspects.as_slice().has_aspect("Solidity.Error"));
    }

    #[test]
    fn test_properties_keep_order() {
        let aspect: ImportedAspect = serde_json::from_str(
            r#"{"name": "Solidity.Mapping", "properties": {"value": "uint", "key": "address"}}"#,
        )
        .unwrap();
        let keys: Vec<_> = aspect.properties.keys().collect();
        assert_eq!(keys, vec!["value", "key"]);
    }

    #[test]
    fn test_untagged_values() {
        let aspect: ImportedAspect = serde_json::from_str(
            r#"{"name": "X", "properties": {"a": true, "b": 3, "c": "text"}}"#,
        )
        .unwrap();
        assert_eq!(aspect.get("a"), Some(&PropertyValue::Bool(true)));
        assert_eq!(aspect.get("b"), Some(&PropertyValue::Integer(3)));
        assert_eq!(aspect.get("c"), Some(&PropertyValue::from("text")));
    }
}
