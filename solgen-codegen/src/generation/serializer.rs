//! Named serializers that turn a lowered unit into output files.

use std::path::Path;

use eyre::Result;
use indexmap::IndexMap;

use super::FileEntry;
use crate::traverse::LoweredUnit;

/// Lays out the output files for one lowered unit.
pub trait CodeGenerationSerializer: Send + Sync {
    /// Name used to select this serializer, e.g. in `solgen.toml`.
    fn name(&self) -> &'static str;

    /// Whether this serializer is used when none is requested.
    fn is_default(&self) -> bool {
        false
    }

    /// Produce the files for `unit`. `target` is the output folder; it is
    /// only read, e.g. to look for user-owned files.
    ///
    /// A contract that cannot be laid out is reported in
    /// [`Serialized::skipped`] and does not stop the other contracts.
    fn serialize(&self, unit: &LoweredUnit, target: &Path) -> Result<Serialized>;
}

/// Files laid out for one unit.
#[derive(Debug, Default)]
pub struct Serialized {
    pub files: Vec<FileEntry>,
    pub skipped: Vec<SkippedContract>,
}

impl From<Vec<FileEntry>> for Serialized {
    fn from(files: Vec<FileEntry>) -> Self {
        Self {
            files,
            skipped: Vec::new(),
        }
    }
}

/// A contract that produced no files, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedContract {
    pub contract: String,
    pub reason: String,
}

/// Invalid serializer registrations and lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("serializer '{0}' is registered more than once")]
    Duplicate(String),

    #[error("no default serializer is registered")]
    NoDefault,

    #[error("serializers '{first}' and '{second}' are both marked as default")]
    MultipleDefaults { first: String, second: String },

    #[error("unknown serializer '{name}' (available: {available})")]
    Unknown { name: String, available: String },
}

/// The serializers available to a run, exactly one of them the default.
pub struct SerializerRegistry {
    serializers: IndexMap<&'static str, Box<dyn CodeGenerationSerializer>>,
    default: &'static str,
}

impl std::fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("serializers", &self.names())
            .field("default", &self.default)
            .finish()
    }
}

impl SerializerRegistry {
    /// Build a registry, checking names are unique and one default exists.
    pub fn new(
        serializers: impl IntoIterator<Item = Box<dyn CodeGenerationSerializer>>,
    ) -> Result<Self, RegistryError> {
        let mut map: IndexMap<&'static str, Box<dyn CodeGenerationSerializer>> = IndexMap::new();
        let mut default: Option<&'static str> = None;

        for serializer in serializers {
            let name = serializer.name();
            if map.contains_key(name) {
                return Err(RegistryError::Duplicate(name.to_string()));
            }
            if serializer.is_default() {
                if let Some(first) = default {
                    return Err(RegistryError::MultipleDefaults {
                        first: first.to_string(),
                        second: name.to_string(),
                    });
                }
                default = Some(name);
            }
            map.insert(name, serializer);
        }

        let default = default.ok_or(RegistryError::NoDefault)?;
        Ok(Self {
            serializers: map,
            default,
        })
    }

    pub fn default_name(&self) -> &'static str {
        self.default
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.serializers.keys().copied().collect()
    }

    pub fn get(&self, name: &str) -> Result<&dyn CodeGenerationSerializer, RegistryError> {
        self.serializers
            .get(name)
            .map(|s| s.as_ref())
            .ok_or_else(|| RegistryError::Unknown {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// The serializer called `name`, or the default when `name` is `None`.
    pub fn select(&self, name: Option<&str>) -> Result<&dyn CodeGenerationSerializer, RegistryError> {
        self.get(name.unwrap_or(self.default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named {
        name: &'static str,
        default: bool,
    }

    impl CodeGenerationSerializer for Named {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_default(&self) -> bool {
            self.default
        }

        fn serialize(&self, unit: &LoweredUnit, _target: &Path) -> Result<Serialized> {
            Ok(vec![FileEntry::generated(format!("{}.sol", unit.unit.name), self.name)].into())
        }
    }

    fn named(name: &'static str, default: bool) -> Box<dyn CodeGenerationSerializer> {
        Box::new(Named { name, default })
    }

    #[test]
    fn test_select_default() {
        let registry =
            SerializerRegistry::new([named("gap", true), named("plain", false)]).unwrap();

        assert_eq!(registry.default_name(), "gap");
        assert_eq!(registry.select(None).unwrap().name(), "gap");
        assert_eq!(registry.select(Some("plain")).unwrap().name(), "plain");
        assert_eq!(registry.names(), vec!["gap", "plain"]);
    }

    #[test]
    fn test_duplicate_name() {
        let err = SerializerRegistry::new([named("gap", true), named("gap", false)]).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("gap".into()));
    }

    #[test]
    fn test_no_default() {
        let err = SerializerRegistry::new([named("plain", false)]).unwrap_err();
        assert_eq!(err, RegistryError::NoDefault);
    }

    #[test]
    fn test_multiple_defaults() {
        let err = SerializerRegistry::new([named("a", true), named("b", true)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "serializers 'a' and 'b' are both marked as default"
        );
    }

    #[test]
    fn test_unknown_lists_available() {
        let registry =
            SerializerRegistry::new([named("gap", true), named("plain", false)]).unwrap();
        let err = registry.get("fancy").err().unwrap();
        assert_eq!(
            err.to_string(),
            "unknown serializer 'fancy' (available: gap, plain)"
        );
    }
}
