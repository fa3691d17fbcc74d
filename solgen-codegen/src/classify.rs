//! Decides which syntax shape a domain structure becomes.

use solgen_model::{ComplexTypeFeature, DataStructure, HasAspects, vocabulary};

/// The role a structure plays in the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Contract,
    Struct,
    Event,
    Error,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contract => write!(f, "contract"),
            Self::Struct => write!(f, "struct"),
            Self::Event => write!(f, "event"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Classify a structure. Rules are tried in order and anything unmatched
/// is a plain struct:
///
/// 1. contract-type aspect with a true `isContract` property
/// 2. domain event carrying the error aspect
/// 3. domain event
pub fn classify(structure: &DataStructure) -> Classification {
    if is_contract(structure) {
        Classification::Contract
    } else if structure.has_feature(ComplexTypeFeature::DomainEvent) {
        if structure.has_aspect(vocabulary::ERROR) {
            Classification::Error
        } else {
            Classification::Event
        }
    } else {
        Classification::Struct
    }
}

fn is_contract(structure: &DataStructure) -> bool {
    structure
        .aspect(vocabulary::CONTRACT_TYPE)
        .and_then(|a| a.get(vocabulary::IS_CONTRACT))
        .is_some_and(|v| v.is_true())
}

/// Diagram path declared by the state-behavior aspect, if any.
pub fn state_behavior_diagram(structure: &DataStructure) -> Option<String> {
    structure
        .aspect(vocabulary::STATE_BEHAVIOR)?
        .get(vocabulary::DIAGRAM)?
        .as_str()
        .filter(|path| !path.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use solgen_model::ImportedAspect;

    use super::*;

    fn contract_aspect(value: bool) -> ImportedAspect {
        ImportedAspect::new(vocabulary::CONTRACT_TYPE).property(vocabulary::IS_CONTRACT, value)
    }

    #[test]
    fn test_contract() {
        let s = DataStructure::new("Vault").aspect(contract_aspect(true));
        assert_eq!(classify(&s), Classification::Contract);
    }

    #[test]
    fn test_contract_aspect_false_is_struct() {
        let s = DataStructure::new("Vault").aspect(contract_aspect(false));
        assert_eq!(classify(&s), Classification::Struct);
    }

    #[test]
    fn test_contract_property_as_string() {
        let s = DataStructure::new("Vault").aspect(
            ImportedAspect::new(vocabulary::CONTRACT_TYPE).property(vocabulary::IS_CONTRACT, "true"),
        );
        assert_eq!(classify(&s), Classification::Contract);
    }

    #[test]
    fn test_error_takes_precedence_over_event() {
        let s = DataStructure::new("Insufficient")
            .feature(ComplexTypeFeature::DomainEvent)
            .aspect(ImportedAspect::new(vocabulary::ERROR));
        assert_eq!(classify(&s), Classification::Error);
    }

    #[test]
    fn test_error_aspect_without_event_feature_is_struct() {
        let s = DataStructure::new("Oops").aspect(ImportedAspect::new(vocabulary::ERROR));
        assert_eq!(classify(&s), Classification::Struct);
    }

    #[test]
    fn test_event() {
        let s = DataStructure::new("Deposited").feature(ComplexTypeFeature::DomainEvent);
        assert_eq!(classify(&s), Classification::Event);
    }

    #[test]
    fn test_default_is_struct() {
        let s = DataStructure::new("Entry").feature(ComplexTypeFeature::ValueObject);
        assert_eq!(classify(&s), Classification::Struct);
    }

    #[test]
    fn test_state_behavior_diagram() {
        let s = DataStructure::new("Vault").aspect(
            ImportedAspect::new(vocabulary::STATE_BEHAVIOR)
                .property(vocabulary::DIAGRAM, "vault.puml"),
        );
        assert_eq!(state_behavior_diagram(&s).as_deref(), Some("vault.puml"));
        assert_eq!(state_behavior_diagram(&DataStructure::new("Plain")), None);
    }

    #[test]
    fn test_blank_diagram_is_ignored() {
        let s = DataStructure::new("Vault").aspect(
            ImportedAspect::new(vocabulary::STATE_BEHAVIOR).property(vocabulary::DIAGRAM, " "),
        );
        assert_eq!(state_behavior_diagram(&s), None);
    }
}
