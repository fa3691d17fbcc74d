//! Pure conversion of domain elements into target syntax nodes.
//!
//! Every function here is total and side-effect free: the same input always
//! yields a structurally identical node.

use solgen_ast::{
    Contract, DataLocation, Enumeration, ErrorDefinition, Event, Field, Function, LocalField,
    Modifier, Parameter, Structure, Type, Visibility,
};
use solgen_model::{
    DataField, DataOperation, DataStructure, HasAspects, ImportedAspect, PrimitiveType, TypeRef,
    vocabulary,
};

/// Map a type reference without consulting aspects.
///
/// Complex types keep their name; `date` becomes `uint` and `boolean`
/// becomes `bool`; other primitives pass through unchanged.
pub fn map_type_ref(ty: &TypeRef) -> Type {
    match ty {
        TypeRef::Complex(name) => Type::named(name.clone()),
        TypeRef::Primitive(PrimitiveType::Date) => Type::named("uint"),
        TypeRef::Primitive(PrimitiveType::Boolean) => Type::named("bool"),
        TypeRef::Primitive(other) => Type::named(other.as_str()),
    }
}

/// Map a type reference, letting a mapping aspect override it.
pub fn map_type(ty: &TypeRef, aspects: &[ImportedAspect]) -> Type {
    mapping_override(aspects).unwrap_or_else(|| map_type_ref(ty))
}

/// `mapping(key => value)` if the aspects carry a complete mapping aspect.
fn mapping_override(aspects: &[ImportedAspect]) -> Option<Type> {
    let aspect = aspects.aspect(vocabulary::MAPPING)?;
    let key = aspect.get_string(vocabulary::MAPPING_KEY)?;
    let value = aspect.get_string(vocabulary::MAPPING_VALUE)?;
    Some(Type::mapping(Type::named(key), Type::named(value)))
}

/// Type of a field, wrapped in an array for list fields.
///
/// A mapping aspect wins over the list flag.
fn map_field_type(field: &DataField) -> Type {
    match mapping_override(&field.aspects) {
        Some(mapping) => mapping,
        None if field.list => Type::array(map_type_ref(&field.ty)),
        None => map_type_ref(&field.ty),
    }
}

/// Hidden members are internal, everything else is public.
pub fn member_visibility(hidden: bool) -> Visibility {
    if hidden {
        Visibility::Internal
    } else {
        Visibility::Public
    }
}

/// Map a structure field to a contract state variable.
pub fn map_field(field: &DataField) -> Field {
    Field {
        name: field.name.clone(),
        ty: map_field_type(field),
        visibility: member_visibility(field.hidden),
        payable: field.has_aspect(vocabulary::PAYABLE),
        initializer: None,
    }
}

/// Map a structure field to a struct member or event/error parameter.
pub fn map_local_field(field: &DataField) -> LocalField {
    LocalField {
        name: field.name.clone(),
        ty: map_field_type(field),
        payable: field.has_aspect(vocabulary::PAYABLE),
    }
}

fn map_parameter(parameter: &solgen_model::Parameter) -> Parameter {
    Parameter::new(
        parameter.name.clone(),
        map_type(&parameter.ty, &parameter.aspects),
    )
    .location(DataLocation::Memory)
}

/// An operation mapped to either a function or a modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callable {
    Function(Function),
    Modifier(Modifier),
}

/// Map an operation; the modifier aspect selects a modifier.
pub fn map_operation(operation: &DataOperation) -> Callable {
    let parameters = operation.parameters.iter().map(map_parameter).collect();

    if operation.has_aspect(vocabulary::MODIFIER) {
        return Callable::Modifier(Modifier {
            parameters,
            ..Modifier::new(operation.name.clone())
        });
    }

    Callable::Function(Function {
        visibility: member_visibility(operation.hidden),
        parameters,
        returns: operation.return_type.iter().map(map_type_ref).collect(),
        ..Function::new(operation.name.clone())
    })
}

/// Map a contract structure: fields, then operations split into modifiers
/// and functions.
pub fn map_contract(structure: &DataStructure) -> Contract {
    let mut contract = Contract::new(structure.name.clone());
    contract.fields = structure.fields.iter().map(map_field).collect();

    for operation in &structure.operations {
        match map_operation(operation) {
            Callable::Function(f) => contract.definitions.functions.push(f),
            Callable::Modifier(m) => contract.definitions.modifiers.push(m),
        }
    }

    contract
}

pub fn map_struct(structure: &DataStructure) -> Structure {
    Structure {
        name: structure.name.clone(),
        fields: structure.fields.iter().map(map_local_field).collect(),
    }
}

pub fn map_event(structure: &DataStructure) -> Event {
    Event {
        name: structure.name.clone(),
        parameters: structure.fields.iter().map(map_local_field).collect(),
    }
}

pub fn map_error(structure: &DataStructure) -> ErrorDefinition {
    ErrorDefinition {
        name: structure.name.clone(),
        parameters: structure.fields.iter().map(map_local_field).collect(),
    }
}

/// Enumerations keep their ordered value names.
pub fn map_enumeration(enumeration: &solgen_model::Enumeration) -> Enumeration {
    Enumeration::new(enumeration.name.clone(), enumeration.fields.clone())
}
