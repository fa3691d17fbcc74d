use serde::{Deserialize, Serialize};

use crate::{Statement, Type};

/// Visibility of a function or state variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
    External,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Private => "private",
            Self::External => "external",
        }
    }

    /// Public and external members are part of a contract's interface.
    pub fn is_exposed(&self) -> bool {
        matches!(self, Self::Public | Self::External)
    }
}

/// State mutability of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateMutability {
    Pure,
    View,
    Payable,
}

impl StateMutability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pure => "pure",
            Self::View => "view",
            Self::Payable => "payable",
        }
    }
}

/// Data location of a reference-typed parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataLocation {
    Memory,
    Storage,
    Calldata,
}

impl DataLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Storage => "storage",
            Self::Calldata => "calldata",
        }
    }
}

/// A function or modifier parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
    pub location: Option<DataLocation>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            location: None,
        }
    }

    pub fn location(mut self, location: DataLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// A function definition or declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub visibility: Visibility,
    pub mutability: Option<StateMutability>,
    pub is_virtual: bool,
    pub is_override: bool,
    pub parameters: Vec<Parameter>,
    pub returns: Vec<Type>,
    pub statements: Vec<Statement>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            mutability: None,
            is_virtual: false,
            is_override: false,
            parameters: Vec::new(),
            returns: Vec::new(),
            statements: Vec::new(),
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn mutability(mut self, mutability: StateMutability) -> Self {
        self.mutability = Some(mutability);
        self
    }

    pub fn virtual_(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn override_(mut self) -> Self {
        self.is_override = true;
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, ty: Type) -> Self {
        self.returns.push(ty);
        self
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }
}

/// A modifier definition. The body placeholder `_;` is added by the printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub name: String,
    pub is_virtual: bool,
    pub is_override: bool,
    pub parameters: Vec<Parameter>,
    pub statements: Vec<Statement>,
}

impl Modifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_virtual: false,
            is_override: false,
            parameters: Vec::new(),
            statements: Vec::new(),
        }
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_builder() {
        let f = Function::new("transfer")
            .visibility(Visibility::External)
            .parameter(Parameter::new("to", Type::named("address")))
            .returns(Type::named("bool"))
            .override_();

        assert_eq!(f.visibility, Visibility::External);
        assert!(f.is_override);
        assert!(!f.is_virtual);
        assert_eq!(f.parameters.len(), 1);
        assert_eq!(f.returns, vec![Type::named("bool")]);
    }

    #[test]
    fn test_visibility_exposed() {
        assert!(Visibility::Public.is_exposed());
        assert!(Visibility::External.is_exposed());
        assert!(!Visibility::Internal.is_exposed());
        assert!(!Visibility::Private.is_exposed());
    }

    #[test]
    fn test_keywords() {
        assert_eq!(Visibility::Internal.as_str(), "internal");
        assert_eq!(StateMutability::Pure.as_str(), "pure");
        assert_eq!(DataLocation::Calldata.as_str(), "calldata");
    }
}
