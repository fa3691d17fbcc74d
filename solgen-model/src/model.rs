//! Domain model tree: models, structures, enumerations and their members.

use serde::{Deserialize, Serialize};

use crate::{HasAspects, ImportedAspect, TypeRef};

/// Root of a domain model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    pub name: String,
    /// Other model files, relative to this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    /// Complex types in declaration order.
    #[serde(default, rename = "types")]
    pub complex_types: Vec<ComplexType>,
}

impl DataModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            complex_types: Vec::new(),
        }
    }

    pub fn import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(path.into());
        self
    }

    pub fn structure(mut self, structure: DataStructure) -> Self {
        self.complex_types.push(ComplexType::Structure(structure));
        self
    }

    pub fn enumeration(mut self, enumeration: Enumeration) -> Self {
        self.complex_types.push(ComplexType::Enumeration(enumeration));
        self
    }

    pub fn structures(&self) -> impl Iterator<Item = &DataStructure> {
        self.complex_types.iter().filter_map(|t| match t {
            ComplexType::Structure(s) => Some(s),
            ComplexType::Enumeration(_) => None,
        })
    }

    pub fn enumerations(&self) -> impl Iterator<Item = &Enumeration> {
        self.complex_types.iter().filter_map(|t| match t {
            ComplexType::Enumeration(e) => Some(e),
            ComplexType::Structure(_) => None,
        })
    }

    /// Find a complex type by name.
    pub fn find(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types.iter().find(|t| t.name() == name)
    }
}

/// A user-defined type of the domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComplexType {
    Structure(DataStructure),
    Enumeration(Enumeration),
}

impl ComplexType {
    pub fn name(&self) -> &str {
        match self {
            Self::Structure(s) => &s.name,
            Self::Enumeration(e) => &e.name,
        }
    }
}

/// Domain-driven design features a structure can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplexTypeFeature {
    Aggregate,
    ApplicationService,
    DomainEvent,
    DomainService,
    Entity,
    Factory,
    InfrastructureService,
    Repository,
    Service,
    Specification,
    ValueObject,
}

/// A structure with fields and operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStructure {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<ComplexTypeFeature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aspects: Vec<ImportedAspect>,
    #[serde(default)]
    pub fields: Vec<DataField>,
    #[serde(default)]
    pub operations: Vec<DataOperation>,
}

impl DataStructure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
            aspects: Vec::new(),
            fields: Vec::new(),
            operations: Vec::new(),
        }
    }

    pub fn feature(mut self, feature: ComplexTypeFeature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn aspect(mut self, aspect: ImportedAspect) -> Self {
        self.aspects.push(aspect);
        self
    }

    pub fn field(mut self, field: DataField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn operation(mut self, operation: DataOperation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn has_feature(&self, feature: ComplexTypeFeature) -> bool {
        self.features.contains(&feature)
    }
}

impl HasAspects for DataStructure {
    fn aspects(&self) -> &[ImportedAspect] {
        &self.aspects
    }
}

/// A field of a structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aspects: Vec<ImportedAspect>,
}

impl DataField {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            list: false,
            hidden: false,
            aspects: Vec::new(),
        }
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn aspect(mut self, aspect: ImportedAspect) -> Self {
        self.aspects.push(aspect);
        self
    }
}

impl HasAspects for DataField {
    fn aspects(&self) -> &[ImportedAspect] {
        &self.aspects
    }
}

/// An operation of a structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataOperation {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, rename = "returns", skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aspects: Vec<ImportedAspect>,
}

impl DataOperation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            hidden: false,
            aspects: Vec::new(),
        }
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, ty: impl Into<TypeRef>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn aspect(mut self, aspect: ImportedAspect) -> Self {
        self.aspects.push(aspect);
        self
    }
}

impl HasAspects for DataOperation {
    fn aspects(&self) -> &[ImportedAspect] {
        &self.aspects
    }
}

/// A parameter of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aspects: Vec<ImportedAspect>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            aspects: Vec::new(),
        }
    }

    pub fn aspect(mut self, aspect: ImportedAspect) -> Self {
        self.aspects.push(aspect);
        self
    }
}

impl HasAspects for Parameter {
    fn aspects(&self) -> &[ImportedAspect] {
        &self.aspects
    }
}

/// An enumeration with ordered value names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumeration {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Enumeration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn value(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrimitiveType;

    fn parse(content: &str) -> DataModel {
        toml::from_str(content).expect("Failed to parse test model")
    }

    #[test]
    fn test_parse_structure_and_enumeration() {
        let model = parse(
            r#"
            name = "Banking"

            [[types]]
            kind = "structure"
            name = "Account"
            aspects = [{ name = "Solidity.ContractType", properties = { isContract = true } }]

            [[types.fields]]
            name = "opened"
            type = "date"

            [[types.fields]]
            name = "owners"
            type = "Owner"
            list = true
            hidden = true

            [[types.operations]]
            name = "deposit"
            returns = "boolean"
            parameters = [{ name = "amount", type = "int" }]

            [[types]]
            kind = "enumeration"
            name = "Status"
            fields = ["Open", "Closed"]
        "#,
        );

        assert_eq!(model.name, "Banking");
        assert_eq!(model.complex_types.len(), 2);

        let account = model.structures().next().unwrap();
        assert_eq!(account.fields[0].ty, TypeRef::Primitive(PrimitiveType::Date));
        assert!(account.fields[1].list);
        assert!(account.fields[1].hidden);
        assert_eq!(
            account.operations[0].return_type,
            Some(TypeRef::Primitive(PrimitiveType::Boolean))
        );
        assert!(account.has_aspect("Solidity.ContractType"));

        let status = model.enumerations().next().unwrap();
        assert_eq!(status.fields, vec!["Open", "Closed"]);
    }

    #[test]
    fn test_parse_features() {
        let model = parse(
            r#"
            name = "Events"

            [[types]]
            kind = "structure"
            name = "Deposited"
            features = ["DOMAIN_EVENT", "VALUE_OBJECT"]
        "#,
        );

        let event = model.structures().next().unwrap();
        assert!(event.has_feature(ComplexTypeFeature::DomainEvent));
        assert!(!event.has_feature(ComplexTypeFeature::Entity));
    }

    #[test]
    fn test_declaration_order_preserved() {
        let model = DataModel::new("M")
            .enumeration(Enumeration::new("A"))
            .structure(DataStructure::new("B"))
            .enumeration(Enumeration::new("C"));

        let names: Vec<_> = model.complex_types.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(model.find("B").is_some());
        assert!(model.find("Z").is_none());
    }
}
