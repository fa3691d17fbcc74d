use solgen_model::{ComplexType, DataField, DataModel, DataOperation, DataStructure, Enumeration};

/// Kinds of domain element a handler can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    DataModel,
    Structure,
    Enumeration,
    Field,
    Operation,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataModel => write!(f, "model"),
            Self::Structure => write!(f, "structure"),
            Self::Enumeration => write!(f, "enumeration"),
            Self::Field => write!(f, "field"),
            Self::Operation => write!(f, "operation"),
        }
    }
}

/// A borrowed domain element visited by the traversal.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    DataModel(&'a DataModel),
    Structure(&'a DataStructure),
    Enumeration(&'a Enumeration),
    Field(&'a DataField),
    Operation(&'a DataOperation),
}

impl Element<'_> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::DataModel(_) => ElementKind::DataModel,
            Self::Structure(_) => ElementKind::Structure,
            Self::Enumeration(_) => ElementKind::Enumeration,
            Self::Field(_) => ElementKind::Field,
            Self::Operation(_) => ElementKind::Operation,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::DataModel(m) => &m.name,
            Self::Structure(s) => &s.name,
            Self::Enumeration(e) => &e.name,
            Self::Field(f) => &f.name,
            Self::Operation(o) => &o.name,
        }
    }
}

/// Every element of `model` in pre-order: the model, then each complex type
/// in declaration order followed by its fields and operations.
pub fn pre_order(model: &DataModel) -> Vec<Element<'_>> {
    let mut elements = vec![Element::DataModel(model)];

    for ty in &model.complex_types {
        match ty {
            ComplexType::Structure(s) => {
                elements.push(Element::Structure(s));
                elements.extend(s.fields.iter().map(Element::Field));
                elements.extend(s.operations.iter().map(Element::Operation));
            }
            ComplexType::Enumeration(e) => elements.push(Element::Enumeration(e)),
        }
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_order() {
        let model = DataModel::new("Vault")
            .structure(
                DataStructure::new("Vault")
                    .field(DataField::new("total", "int"))
                    .operation(DataOperation::new("deposit")),
            )
            .enumeration(Enumeration::new("Phase"))
            .structure(DataStructure::new("Entry").field(DataField::new("amount", "int")));

        let visited: Vec<_> = pre_order(&model)
            .iter()
            .map(|e| format!("{}:{}", e.kind(), e.name()))
            .collect();

        assert_eq!(
            visited,
            vec![
                "model:Vault",
                "structure:Vault",
                "field:total",
                "operation:deposit",
                "enumeration:Phase",
                "structure:Entry",
                "field:amount",
            ]
        );
    }
}
