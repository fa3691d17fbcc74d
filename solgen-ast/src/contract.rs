use serde::{Deserialize, Serialize};

use crate::{Definitions, Field, Function, Modifier};

/// A contract definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub name: String,
    pub is_abstract: bool,
    /// Base contracts, printed first in the `is` list.
    pub extends: Vec<String>,
    /// Implemented interfaces, printed after the base contracts.
    pub implements: Vec<String>,
    pub fields: Vec<Field>,
    pub definitions: Definitions,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            extends: Vec::new(),
            implements: Vec::new(),
            fields: Vec::new(),
            definitions: Definitions::default(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn function(mut self, function: Function) -> Self {
        self.definitions.functions.push(function);
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.definitions.modifiers.push(modifier);
        self
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.definitions.functions.iter()
    }

    pub fn find_function(&self, name: &str) -> Option<&Function> {
        self.definitions.functions.iter().find(|f| f.name == name)
    }

    pub fn find_function_mut(&mut self, name: &str) -> Option<&mut Function> {
        self.definitions
            .functions
            .iter_mut()
            .find(|f| f.name == name)
    }

    /// Names in the `is` list: base contracts then interfaces.
    pub fn inherits(&self) -> impl Iterator<Item = &str> {
        self.extends
            .iter()
            .chain(self.implements.iter())
            .map(String::as_str)
    }
}

/// An interface definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub extends: Vec<String>,
    pub definitions: Definitions,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: Vec::new(),
            definitions: Definitions::default(),
        }
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.definitions.functions.iter()
    }
}
