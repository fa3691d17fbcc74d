use solgen_ast::{Statement, Type};

/// Placeholder value for a return type: `0` for unsigned integers, `-1` for
/// signed integers, `false` for booleans. Other types have none.
pub fn default_value(ty: &Type) -> Option<&'static str> {
    let name = ty.name()?;
    let sized = |prefix: &str| {
        name.strip_prefix(prefix)
            .is_some_and(|bits| bits.chars().all(|c| c.is_ascii_digit()))
    };

    if sized("uint") {
        Some("0")
    } else if sized("int") {
        Some("-1")
    } else if name == "bool" {
        Some("false")
    } else {
        None
    }
}

/// Return statement yielding placeholder values for `returns`.
///
/// Several values are parenthesized and joined without spaces. If any type
/// has no placeholder the statement is a bare `return`.
pub fn default_return(returns: &[Type]) -> Statement {
    let values: Option<Vec<_>> = returns.iter().map(default_value).collect();
    match values {
        Some(values) if values.len() == 1 => Statement::returns(values[0]),
        Some(values) if values.len() > 1 => Statement::returns(format!("({})", values.join(","))),
        _ => Statement::Return(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<Type> {
        names.iter().map(|n| Type::named(*n)).collect()
    }

    #[test]
    fn test_integer_families() {
        assert_eq!(default_value(&Type::named("uint")), Some("0"));
        assert_eq!(default_value(&Type::named("uint256")), Some("0"));
        assert_eq!(default_value(&Type::named("int")), Some("-1"));
        assert_eq!(default_value(&Type::named("int8")), Some("-1"));
        assert_eq!(default_value(&Type::named("bool")), Some("false"));
        assert_eq!(default_value(&Type::named("address")), None);
        assert_eq!(default_value(&Type::named("uintx")), None);
        assert_eq!(default_value(&Type::array(Type::named("uint"))), None);
    }

    #[test]
    fn test_multiple_values() {
        assert_eq!(
            default_return(&named(&["uint", "bool"])),
            Statement::returns("(0,false)")
        );
    }

    #[test]
    fn test_single_value() {
        assert_eq!(default_return(&named(&["int256"])), Statement::returns("-1"));
    }

    #[test]
    fn test_unknown_type_gives_bare_return() {
        assert_eq!(
            default_return(&named(&["uint", "string"])),
            Statement::Return(None)
        );
        assert_eq!(default_return(&[]), Statement::Return(None));
    }
}
