use solgen_ast::{Contract, SourceUnit};

/// Copy the fields and functions of the fragment's contract with the same
/// name as `target` into `target`, after its own members.
///
/// Members are appended as-is; names are not de-duplicated. Returns `false`
/// when the fragment has no contract of that name.
pub fn splice(target: &mut Contract, fragment: &SourceUnit) -> bool {
    let Some(source) = fragment
        .definitions
        .contracts
        .iter()
        .find(|c| c.name == target.name)
    else {
        return false;
    };

    target.fields.extend(source.fields.iter().cloned());
    target
        .definitions
        .functions
        .extend(source.definitions.functions.iter().cloned());
    true
}

#[cfg(test)]
mod tests {
    use solgen_ast::{Field, Function, Type};

    use super::*;

    #[test]
    fn test_splice_appends_members() {
        let mut target = Contract::new("Vault")
            .field(Field::new("total", Type::named("uint")))
            .function(Function::new("deposit"));
        let mut fragment = SourceUnit::new("f", "MIT", "^0.8.0");
        fragment.definitions.contracts.push(
            Contract::new("Vault")
                .field(Field::new("currentState", Type::named("string")))
                .function(Function::new("handle")),
        );

        assert!(splice(&mut target, &fragment));

        let fields: Vec<_> = target.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["total", "currentState"]);
        let functions: Vec<_> = target.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, vec!["deposit", "handle"]);
    }

    #[test]
    fn test_splice_keeps_duplicates() {
        let mut target = Contract::new("Vault").function(Function::new("handle"));
        let mut fragment = SourceUnit::new("f", "MIT", "^0.8.0");
        fragment
            .definitions
            .contracts
            .push(Contract::new("Vault").function(Function::new("handle")));

        splice(&mut target, &fragment);

        assert_eq!(target.functions().count(), 2);
    }

    #[test]
    fn test_splice_requires_same_name() {
        let mut target = Contract::new("Vault");
        let mut fragment = SourceUnit::new("f", "MIT", "^0.8.0");
        fragment.definitions.contracts.push(
            Contract::new("Machine").field(Field::new("currentState", Type::named("string"))),
        );

        assert!(!splice(&mut target, &fragment));
        assert!(target.fields.is_empty());
    }
}
