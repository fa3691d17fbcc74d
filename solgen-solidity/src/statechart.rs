//! PlantUML state diagrams compiled into a dispatching contract fragment.
//!
//! ```text
//! @startuml
//! [*] --> Locked
//! Locked --> Unlocked : coin / count += 1
//! Unlocked --> Locked : push [count > 0]
//! @enduml
//! ```
//!
//! compiles to a contract holding the current state as a string and a
//! `handle(string memory input)` function with one branch per transition.

use std::{path::Path, sync::LazyLock};

use eyre::{Result, WrapErr};
use regex::Regex;
use solgen_ast::{
    Conditional, Contract, DataLocation, Field, Function, Parameter, SourceUnit, StateMutability,
    Statement, Type, Visibility,
};
use solgen_codegen::behavior::{
    CompiledBehavior, DISPATCH_FUNCTION, DiagramCompiler, Transition,
};
use tracing::debug;

/// Name of the state variable the compiled contract keeps.
pub const STATE_FIELD: &str = "currentState";
/// Revert reason when no transition matches.
pub const INVALID_TRANSITION: &str = "INVALID TRANSITION";

const INITIAL: &str = "[*]";

static TRANSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\[\*\]|[A-Za-z_][A-Za-z0-9_]*)\s*-{1,2}>\s*(\[\*\]|[A-Za-z_][A-Za-z0-9_]*)\s*(?::\s*(.*?))?\s*$")
        .expect("Invalid regex")
});

/// `trigger [guard] / action`, every part optional.
static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\[/]*?)\s*(?:\[([^\]]*)\])?\s*(?:/\s*(.*?))?\s*$").expect("Invalid regex")
});

/// Problems with the diagram text itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatechartError {
    #[error("missing @startuml")]
    MissingStart,
    #[error("line {line}: @startuml is never closed by @enduml")]
    MissingEnd { line: usize },
    #[error("diagram declares no states")]
    Empty,
}

/// A parsed state diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statechart {
    pub initial: Option<String>,
    pub transitions: Vec<Transition>,
}

impl Statechart {
    /// Parse the first `@startuml` ... `@enduml` block of `source`.
    pub fn parse(source: &str) -> Result<Self, StatechartError> {
        let mut lines = source.lines().enumerate();
        let start = lines
            .by_ref()
            .find(|(_, line)| line.trim_start().starts_with("@startuml"))
            .map(|(index, _)| index + 1)
            .ok_or(StatechartError::MissingStart)?;

        let mut chart = Statechart {
            initial: None,
            transitions: Vec::new(),
        };
        let mut closed = false;

        for (index, line) in lines {
            let line = line.trim();
            if line.starts_with("@enduml") {
                closed = true;
                break;
            }
            // PlantUML comments start with a single quote.
            if line.starts_with('\'') {
                continue;
            }
            let Some(captures) = TRANSITION.captures(line) else {
                continue;
            };

            let source_state = &captures[1];
            let target_state = &captures[2];
            if source_state == INITIAL {
                if chart.initial.is_none() && target_state != INITIAL {
                    chart.initial = Some(target_state.to_string());
                }
                continue;
            }
            if target_state == INITIAL {
                continue;
            }

            let label = captures.get(3).map(|m| m.as_str()).unwrap_or_default();
            match parse_label(label) {
                Some((trigger, guard, action)) => chart.transitions.push(Transition {
                    source: source_state.to_string(),
                    target: target_state.to_string(),
                    trigger,
                    guard,
                    action,
                }),
                None => debug!(
                    line = index + 1,
                    from = source_state,
                    to = target_state,
                    "transition without trigger ignored"
                ),
            }
        }

        if !closed {
            return Err(StatechartError::MissingEnd { line: start });
        }
        if chart.initial.is_none() && chart.transitions.is_empty() {
            return Err(StatechartError::Empty);
        }
        Ok(chart)
    }

    /// State the contract starts in: the `[*]` target, else the first
    /// transition's source.
    pub fn initial_state(&self) -> Option<&str> {
        self.initial
            .as_deref()
            .or_else(|| self.transitions.first().map(|t| t.source.as_str()))
    }

    /// Build the fragment for a contract called `contract`.
    pub fn compile(&self, contract: &str) -> CompiledBehavior {
        let mut state = Field::new(STATE_FIELD, Type::named("string")).visibility(Visibility::Internal);
        if let Some(initial) = self.initial_state() {
            state = state.initializer(format!("\"{}\"", initial));
        }

        let dispatch = self
            .transitions
            .iter()
            .fold(Conditional::new(), |conditional, t| {
                conditional.branch(condition(t), body(t))
            })
            .otherwise(vec![Statement::revert(INVALID_TRANSITION)]);

        let handle = Function::new(DISPATCH_FUNCTION)
            .parameter(Parameter::new("input", Type::named("string")).location(DataLocation::Memory))
            .statement(Statement::Conditional(dispatch));

        let mut fragment = SourceUnit::new(contract, "", "");
        fragment.definitions.contracts.push(
            Contract::new(contract)
                .field(state)
                .function(handle)
                .function(string_equality()),
        );

        CompiledBehavior {
            fragment,
            transitions: self.transitions.clone(),
        }
    }
}

fn parse_label(label: &str) -> Option<(String, Option<String>, Option<String>)> {
    let captures = LABEL.captures(label)?;
    let trigger = captures.get(1)?.as_str().trim();
    if trigger.is_empty() {
        return None;
    }
    let guard = captures
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .filter(|g| !g.is_empty());
    let action = captures
        .get(3)
        .map(|m| m.as_str().trim().trim_end_matches(';').to_string())
        .filter(|a| !a.is_empty());
    Some((trigger.to_string(), guard, action))
}

fn condition(transition: &Transition) -> String {
    let mut condition = format!(
        "isEqual({}, \"{}\") && isEqual(input, \"{}\")",
        STATE_FIELD, transition.source, transition.trigger
    );
    if let Some(guard) = &transition.guard {
        condition.push_str(&format!(" && ({})", guard));
    }
    condition
}

fn body(transition: &Transition) -> Vec<Statement> {
    transition
        .action
        .iter()
        .map(Statement::expression)
        .chain([Statement::expression(format!(
            "{} = \"{}\"",
            STATE_FIELD, transition.target
        ))])
        .collect()
}

/// `isEqual(string, string)`, comparing hashes.
fn string_equality() -> Function {
    Function::new("isEqual")
        .visibility(Visibility::Private)
        .mutability(StateMutability::Pure)
        .parameter(Parameter::new("a", Type::named("string")).location(DataLocation::Memory))
        .parameter(Parameter::new("b", Type::named("string")).location(DataLocation::Memory))
        .returns(Type::named("bool"))
        .statement(Statement::returns(
            "keccak256(abi.encodePacked(a)) == keccak256(abi.encodePacked(b))",
        ))
}

/// Compiles PlantUML state diagrams.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantUmlCompiler;

impl PlantUmlCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl DiagramCompiler for PlantUmlCompiler {
    fn name(&self) -> &'static str {
        "plantuml"
    }

    fn compile(&self, diagram: &Path, contract: &str) -> Result<Option<CompiledBehavior>> {
        if !diagram.is_file() {
            return Ok(None);
        }
        let source = std::fs::read_to_string(diagram)
            .wrap_err_with(|| format!("Failed to read {}", diagram.display()))?;
        let chart = Statechart::parse(&source)
            .wrap_err_with(|| format!("Failed to compile {}", diagram.display()))?;
        debug!(
            diagram = %diagram.display(),
            transitions = chart.transitions.len(),
            "compiled state diagram"
        );
        Ok(Some(chart.compile(contract)))
    }
}

#[cfg(test)]
mod tests {
    use solgen_codegen::{behavior::parse_dispatch_condition, language::SourcePrinter};
    use tempfile::TempDir;

    use super::*;
    use crate::SolidityPrinter;

    const TURNSTILE: &str = "\
@startuml
' a coin-operated gate
[*] --> Locked
Locked --> Unlocked : coin / paid += 1
Unlocked -> Locked : push [paid > 0]
Unlocked --> Unlocked
Locked --> [*]
@enduml
";

    #[test]
    fn test_parse_transitions() {
        let chart = Statechart::parse(TURNSTILE).unwrap();

        assert_eq!(chart.initial.as_deref(), Some("Locked"));
        assert_eq!(
            chart.transitions,
            vec![
                Transition {
                    source: "Locked".into(),
                    target: "Unlocked".into(),
                    trigger: "coin".into(),
                    guard: None,
                    action: Some("paid += 1".into()),
                },
                Transition {
                    source: "Unlocked".into(),
                    target: "Locked".into(),
                    trigger: "push".into(),
                    guard: Some("paid > 0".into()),
                    action: None,
                },
            ]
        );
    }

    #[test]
    fn test_initial_falls_back_to_first_source() {
        let chart = Statechart::parse("@startuml\nOpen --> Closed : close\n@enduml\n").unwrap();
        assert_eq!(chart.initial_state(), Some("Open"));
    }

    #[test]
    fn test_missing_markers() {
        assert_eq!(
            Statechart::parse("A --> B : go"),
            Err(StatechartError::MissingStart)
        );
        assert_eq!(
            Statechart::parse("\n@startuml\nA --> B : go\n"),
            Err(StatechartError::MissingEnd { line: 2 })
        );
        assert_eq!(
            Statechart::parse("@startuml\n@enduml\n"),
            Err(StatechartError::Empty)
        );
    }

    #[test]
    fn test_conditions_name_triggers() {
        let chart = Statechart::parse(TURNSTILE).unwrap();
        let compiled = chart.compile("Gate");
        let contract = &compiled.fragment.definitions.contracts[0];
        let handle = contract.find_function(DISPATCH_FUNCTION).unwrap();

        let Statement::Conditional(dispatch) = &handle.statements[0] else {
            panic!("expected a conditional");
        };
        assert_eq!(
            dispatch.branches[1].condition,
            "isEqual(currentState, \"Unlocked\") && isEqual(input, \"push\") && (paid > 0)"
        );
        let targets: Vec<_> = dispatch
            .branches
            .iter()
            .map(|b| parse_dispatch_condition(&b.condition).unwrap().name)
            .collect();
        assert_eq!(targets, vec!["coin", "push"]);
    }

    #[test]
    fn test_compiled_fragment_text() {
        let chart = Statechart::parse(TURNSTILE).unwrap();
        let mut fragment = chart.compile("Gate").fragment;
        fragment.license = "MIT".into();
        fragment.pragma = "^0.8.20".into();

        let text = SolidityPrinter.print(&fragment);
        assert_eq!(
            text,
            r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.20;

contract Gate {
    string internal currentState = "Locked";

    function handle(string memory input) public {
        if (isEqual(currentState, "Locked") && isEqual(input, "coin")) {
            paid += 1;
            currentState = "Unlocked";
        } else if (isEqual(currentState, "Unlocked") && isEqual(input, "push") && (paid > 0)) {
            currentState = "Locked";
        } else {
            revert("INVALID TRANSITION");
        }
    }

    function isEqual(string memory a, string memory b) private pure returns (bool) {
        return keccak256(abi.encodePacked(a)) == keccak256(abi.encodePacked(b));
    }
}
"#
        );
    }

    #[test]
    fn test_compiler_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = PlantUmlCompiler
            .compile(&temp.path().join("absent.puml"), "Gate")
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_compiler_rejects_malformed_diagram() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.puml");
        std::fs::write(&path, "Locked --> Unlocked : coin\n").unwrap();

        let err = PlantUmlCompiler.compile(&path, "Gate").unwrap_err();
        assert!(err.to_string().starts_with("Failed to compile"));
    }
}
