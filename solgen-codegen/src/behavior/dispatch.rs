//! Rewriting of the string-dispatch function produced from a state diagram.

use std::sync::LazyLock;

use regex::Regex;
use solgen_ast::{Contract, Statement};

/// Name of the dispatch function in a compiled fragment.
pub const DISPATCH_FUNCTION: &str = "handle";

/// Conditions containing this text compare the dispatch input against an
/// operation signature.
pub const DISPATCH_MARKER: &str = "isEqual(input";

static DISPATCH_CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)^.*isEqual\(input, "([A-Za-z_$][A-Za-z0-9_$]*)(\([^"]*\))?"\).*$"#)
        .expect("Invalid regex")
});

/// The operation a dispatch branch forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTarget {
    pub name: String,
    /// Parenthesized argument text, if the signature had one.
    pub arguments: Option<String>,
}

/// Extract the operation named by a dispatch condition such as
/// `isEqual(input, "deposit(amount)")`.
pub fn parse_dispatch_condition(condition: &str) -> Option<DispatchTarget> {
    let captures = DISPATCH_CONDITION.captures(condition)?;
    Some(DispatchTarget {
        name: captures.get(1)?.as_str().to_string(),
        arguments: captures.get(2).map(|m| m.as_str().to_string()),
    })
}

/// Why a dispatch branch was left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnmatchReason {
    /// The condition mentions the input but not in the expected form.
    PatternMismatch,
    /// The named operation is not a function of the contract.
    UnknownOperation(String),
}

impl std::fmt::Display for UnmatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PatternMismatch => write!(f, "condition does not match the dispatch pattern"),
            Self::UnknownOperation(name) => write!(f, "no function named '{}'", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedBranch {
    /// Position of the branch in the dispatch conditional.
    pub index: usize,
    pub condition: String,
    pub reason: UnmatchReason,
}

/// Result of [`optimize_contract`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Whether the contract has a dispatch function at all.
    pub dispatcher_found: bool,
    /// Operations that received a branch body, in branch order.
    pub rewritten: Vec<String>,
    /// Input-comparing branches that were left as they were.
    pub unmatched: Vec<UnmatchedBranch>,
}

/// Move each dispatch branch body into the operation it names.
///
/// The dispatch function must consist of a single conditional. For every
/// branch whose condition compares the input against an existing function
/// `name`, the branch statements are appended to `name` and the branch is
/// left with a single forwarding call. Other branches are untouched.
pub fn optimize_contract(contract: &mut Contract) -> RewriteReport {
    let mut report = RewriteReport::default();

    let Some(dispatcher) = contract
        .definitions
        .functions
        .iter()
        .position(|f| f.name == DISPATCH_FUNCTION)
    else {
        return report;
    };
    report.dispatcher_found = true;

    let mut body = std::mem::take(&mut contract.definitions.functions[dispatcher].statements);

    if let [Statement::Conditional(conditional)] = body.as_mut_slice() {
        for (index, branch) in conditional.branches.iter_mut().enumerate() {
            if !branch.condition.contains(DISPATCH_MARKER) {
                continue;
            }

            let unmatched = |reason| UnmatchedBranch {
                index,
                condition: branch.condition.clone(),
                reason,
            };

            let Some(target) = parse_dispatch_condition(&branch.condition) else {
                report.unmatched.push(unmatched(UnmatchReason::PatternMismatch));
                continue;
            };

            let operation = contract
                .definitions
                .functions
                .iter_mut()
                .enumerate()
                .find(|(i, f)| *i != dispatcher && f.name == target.name);

            match operation {
                Some((_, function)) => {
                    function.statements.append(&mut branch.statements);
                    branch
                        .statements
                        .push(Statement::call(&target.name, target.arguments.as_deref()));
                    report.rewritten.push(target.name);
                }
                None => {
                    let reason = UnmatchReason::UnknownOperation(target.name);
                    report.unmatched.push(unmatched(reason));
                }
            }
        }
    }

    contract.definitions.functions[dispatcher].statements = body;
    report
}

#[cfg(test)]
mod tests {
    use solgen_ast::{Conditional, Function};

    use super::*;

    fn s(text: &str) -> Statement {
        Statement::expression(text)
    }

    fn dispatcher(conditional: Conditional) -> Function {
        Function::new(DISPATCH_FUNCTION).statement(Statement::Conditional(conditional))
    }

    fn branches(contract: &Contract) -> &Conditional {
        match contract.find_function(DISPATCH_FUNCTION).map(|f| f.statements.as_slice()) {
            Some([Statement::Conditional(c)]) => c,
            other => panic!("unexpected dispatcher body: {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_arguments() {
        let target = parse_dispatch_condition("isEqual(input, \"foo()\")").unwrap();
        assert_eq!(target.name, "foo");
        assert_eq!(target.arguments.as_deref(), Some("()"));

        let target =
            parse_dispatch_condition("isEqual(input, \"pay(amount, to)\")").unwrap();
        assert_eq!(target.name, "pay");
        assert_eq!(target.arguments.as_deref(), Some("(amount, to)"));
    }

    #[test]
    fn test_parse_bare_name() {
        let target = parse_dispatch_condition("isEqual(input, \"bar\")").unwrap();
        assert_eq!(target.name, "bar");
        assert_eq!(target.arguments, None);
    }

    #[test]
    fn test_parse_with_surrounding_text() {
        let condition = "isEqual(currentState, \"Idle\") && isEqual(input, \"start()\")";
        let target = parse_dispatch_condition(condition).unwrap();
        assert_eq!(target.name, "start");
    }

    #[test]
    fn test_parse_rejects_other_forms() {
        assert_eq!(parse_dispatch_condition("isEqual(input,\"foo\")"), None);
        assert_eq!(parse_dispatch_condition("isEqual(input, name)"), None);
        assert_eq!(parse_dispatch_condition("isEqual(input, \"1abc\")"), None);
        assert_eq!(parse_dispatch_condition("x == 1"), None);
    }

    #[test]
    fn test_rewrite_moves_bodies() {
        let mut contract = Contract::new("Machine")
            .function(Function::new("foo").statement(s("existing")))
            .function(Function::new("bar"))
            .function(dispatcher(
                Conditional::new()
                    .branch("isEqual(input, \"foo()\")", vec![s("S1"), s("S2")])
                    .branch("isEqual(input, \"bar\")", vec![s("S3")]),
            ));

        let report = optimize_contract(&mut contract);

        assert!(report.dispatcher_found);
        assert_eq!(report.rewritten, vec!["foo", "bar"]);
        assert!(report.unmatched.is_empty());
        assert_eq!(
            contract.find_function("foo").unwrap().statements,
            vec![s("existing"), s("S1"), s("S2")]
        );
        assert_eq!(contract.find_function("bar").unwrap().statements, vec![s("S3")]);

        let c = branches(&contract);
        assert_eq!(c.branches[0].statements, vec![Statement::call("foo", None)]);
        assert_eq!(c.branches[1].statements, vec![Statement::call("bar", None)]);
    }

    #[test]
    fn test_rewrite_keeps_arguments() {
        let mut contract = Contract::new("Machine")
            .function(Function::new("pay"))
            .function(dispatcher(
                Conditional::new().branch("isEqual(input, \"pay(1, 2)\")", vec![s("S1")]),
            ));

        optimize_contract(&mut contract);

        assert_eq!(
            branches(&contract).branches[0].statements,
            vec![Statement::call("pay", Some("(1, 2)"))]
        );
    }

    #[test]
    fn test_unknown_operation_left_untouched() {
        let mut contract = Contract::new("Machine").function(dispatcher(
            Conditional::new().branch("isEqual(input, \"missing()\")", vec![s("S1")]),
        ));

        let report = optimize_contract(&mut contract);

        assert_eq!(report.unmatched.len(), 1);
        assert_eq!(
            report.unmatched[0].reason,
            UnmatchReason::UnknownOperation("missing".into())
        );
        assert_eq!(branches(&contract).branches[0].statements, vec![s("S1")]);
    }

    #[test]
    fn test_pattern_mismatch_reported() {
        let mut contract = Contract::new("Machine")
            .function(Function::new("foo"))
            .function(dispatcher(
                Conditional::new().branch("isEqual(input,\"foo\")", vec![s("S1")]),
            ));

        let report = optimize_contract(&mut contract);

        assert_eq!(report.unmatched[0].reason, UnmatchReason::PatternMismatch);
        assert_eq!(report.unmatched[0].index, 0);
        assert!(contract.find_function("foo").unwrap().statements.is_empty());
    }

    #[test]
    fn test_branches_without_marker_are_ignored() {
        let mut contract = Contract::new("Machine")
            .function(Function::new("foo"))
            .function(dispatcher(
                Conditional::new()
                    .branch("msg.value > 0", vec![s("S1")])
                    .otherwise(vec![Statement::revert("INVALID")]),
            ));

        let report = optimize_contract(&mut contract);

        assert!(report.rewritten.is_empty());
        assert!(report.unmatched.is_empty());
        assert_eq!(branches(&contract).branches[0].statements, vec![s("S1")]);
        assert_eq!(
            branches(&contract).otherwise,
            Some(vec![Statement::revert("INVALID")])
        );
    }

    #[test]
    fn test_no_dispatcher() {
        let mut contract = Contract::new("Plain").function(Function::new("foo"));
        let report = optimize_contract(&mut contract);
        assert!(!report.dispatcher_found);
    }

    #[test]
    fn test_dispatcher_with_unexpected_shape() {
        let mut contract = Contract::new("Machine")
            .function(Function::new("foo"))
            .function(Function::new(DISPATCH_FUNCTION).statement(s("noop")));

        let report = optimize_contract(&mut contract);

        assert!(report.dispatcher_found);
        assert!(report.rewritten.is_empty());
        assert_eq!(
            contract.find_function(DISPATCH_FUNCTION).unwrap().statements,
            vec![s("noop")]
        );
    }

    #[test]
    fn test_dispatcher_never_targets_itself() {
        let mut contract = Contract::new("Machine").function(dispatcher(
            Conditional::new().branch("isEqual(input, \"handle\")", vec![s("S1")]),
        ));

        let report = optimize_contract(&mut contract);

        assert_eq!(
            report.unmatched[0].reason,
            UnmatchReason::UnknownOperation("handle".into())
        );
    }
}
