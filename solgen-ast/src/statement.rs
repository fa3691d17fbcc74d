use serde::{Deserialize, Serialize};

/// A statement inside a function or modifier body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// An expression statement, printed verbatim followed by `;`.
    Expression(String),
    /// A call to `function` with a parenthesized argument list, e.g. `foo(1, 2)`.
    Call { function: String, arguments: String },
    /// An `if` / `else if` / `else` chain.
    Conditional(Conditional),
    /// `return;` or `return <value>;`.
    Return(Option<String>),
    /// `revert("<message>");`.
    Revert(String),
}

impl Statement {
    pub fn expression(text: impl Into<String>) -> Self {
        Self::Expression(text.into())
    }

    /// A call statement. `arguments` is the parenthesized argument text;
    /// `None` means an empty argument list.
    pub fn call(function: impl Into<String>, arguments: Option<&str>) -> Self {
        Self::Call {
            function: function.into(),
            arguments: arguments.unwrap_or("()").to_string(),
        }
    }

    pub fn returns(value: impl Into<String>) -> Self {
        Self::Return(Some(value.into()))
    }

    pub fn revert(message: impl Into<String>) -> Self {
        Self::Revert(message.into())
    }
}

/// A conditional chain of branches with an optional fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditional {
    pub branches: Vec<Branch>,
    pub otherwise: Option<Vec<Statement>>,
}

impl Conditional {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch(mut self, condition: impl Into<String>, statements: Vec<Statement>) -> Self {
        self.branches.push(Branch {
            condition: condition.into(),
            statements,
        });
        self
    }

    pub fn otherwise(mut self, statements: Vec<Statement>) -> Self {
        self.otherwise = Some(statements);
        self
    }
}

/// One `if (<condition>) { ... }` arm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub condition: String,
    pub statements: Vec<Statement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_default_arguments() {
        assert_eq!(
            Statement::call("foo", None),
            Statement::Call {
                function: "foo".into(),
                arguments: "()".into()
            }
        );
        assert_eq!(
            Statement::call("bar", Some("(1, x)")),
            Statement::Call {
                function: "bar".into(),
                arguments: "(1, x)".into()
            }
        );
    }

    #[test]
    fn test_conditional_builder() {
        let c = Conditional::new()
            .branch("a", vec![Statement::expression("x = 1")])
            .branch("b", vec![])
            .otherwise(vec![Statement::revert("nope")]);
        assert_eq!(c.branches.len(), 2);
        assert_eq!(c.branches[0].condition, "a");
        assert!(c.otherwise.is_some());
    }
}
