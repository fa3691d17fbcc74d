use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    Contract, Enumeration, ErrorDefinition, Event, Function, Interface, Modifier, Structure, Type,
};

/// A source file: header, imports and top-level definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub name: String,
    pub license: String,
    pub pragma: String,
    pub imports: Vec<Import>,
    pub definitions: Definitions,
}

impl SourceUnit {
    pub fn new(
        name: impl Into<String>,
        license: impl Into<String>,
        pragma: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            license: license.into(),
            pragma: pragma.into(),
            imports: Vec::new(),
            definitions: Definitions::default(),
        }
    }

    /// An empty unit sharing this unit's license and pragma.
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self::new(name, self.license.clone(), self.pragma.clone())
    }

    pub fn import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(Import { path: path.into() });
        self
    }

    /// Names of every enum declared in this unit, nested ones included.
    pub fn enumeration_names(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        self.definitions.collect_enumeration_names(&mut names);
        names
    }

    /// Retype every reference to one of `enumerations` as [`Type::Enum`].
    pub fn resolve_enumerations(&mut self, enumerations: &HashSet<String>) {
        self.definitions
            .for_each_type_mut(&mut |ty| ty.resolve_enumerations(enumerations));
    }
}

/// `import "<path>";`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub path: String,
}

/// Ordered definition lists shared by source units, contracts and interfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definitions {
    pub contracts: Vec<Contract>,
    pub interfaces: Vec<Interface>,
    pub structures: Vec<Structure>,
    pub enumerations: Vec<Enumeration>,
    pub events: Vec<Event>,
    pub errors: Vec<ErrorDefinition>,
    pub functions: Vec<Function>,
    pub modifiers: Vec<Modifier>,
}

impl Definitions {
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
            && self.interfaces.is_empty()
            && self.structures.is_empty()
            && self.enumerations.is_empty()
            && self.events.is_empty()
            && self.errors.is_empty()
            && self.functions.is_empty()
            && self.modifiers.is_empty()
    }

    fn collect_enumeration_names(&self, names: &mut HashSet<String>) {
        names.extend(self.enumerations.iter().map(|e| e.name.clone()));
        for contract in &self.contracts {
            contract.definitions.collect_enumeration_names(names);
        }
        for interface in &self.interfaces {
            interface.definitions.collect_enumeration_names(names);
        }
    }

    fn for_each_type_mut(&mut self, f: &mut dyn FnMut(&mut Type)) {
        for contract in &mut self.contracts {
            contract.fields.iter_mut().for_each(|field| f(&mut field.ty));
            contract.definitions.for_each_type_mut(f);
        }
        for interface in &mut self.interfaces {
            interface.definitions.for_each_type_mut(f);
        }
        let locals = self
            .structures
            .iter_mut()
            .flat_map(|s| &mut s.fields)
            .chain(self.events.iter_mut().flat_map(|e| &mut e.parameters))
            .chain(self.errors.iter_mut().flat_map(|e| &mut e.parameters));
        for field in locals {
            f(&mut field.ty);
        }
        for function in &mut self.functions {
            function.parameters.iter_mut().for_each(|p| f(&mut p.ty));
            function.returns.iter_mut().for_each(|ty| f(ty));
        }
        for modifier in &mut self.modifiers {
            modifier.parameters.iter_mut().for_each(|p| f(&mut p.ty));
        }
    }
}
