use std::{fs, path::Path};

use eyre::Result;
use solgen_ast::{Conditional, Contract, Field, Function, SourceUnit, Statement, Type};
use solgen_codegen::{
    behavior::{CompiledBehavior, DiagramCompiler, MergeOutcome, Transition},
    pipeline::{GenerationSettings, Pipeline, Severity},
};
use solgen_model::resolve_models;
use tempfile::TempDir;

/// Compiles any existing diagram into a two-transition turnstile.
struct Turnstile;

impl DiagramCompiler for Turnstile {
    fn name(&self) -> &'static str {
        "turnstile"
    }

    fn compile(&self, diagram: &Path, contract: &str) -> Result<Option<CompiledBehavior>> {
        if !diagram.exists() {
            return Ok(None);
        }
        let mut fragment = SourceUnit::new(contract, "MIT", "^0.8.0");
        fragment.definitions.contracts.push(
            Contract::new(contract)
                .field(Field::new("currentState", Type::named("string")))
                .function(Function::new("handle").statement(Statement::Conditional(
                    Conditional::new()
                        .branch(
                            "isEqual(currentState, \"Locked\") && isEqual(input, \"coin()\")",
                            vec![Statement::expression("currentState = \"Open\"")],
                        )
                        .branch(
                            "isEqual(currentState, \"Open\") && isEqual(input, \"push()\")",
                            vec![Statement::expression("currentState = \"Locked\"")],
                        )
                        .otherwise(vec![Statement::revert("INVALID TRANSITION")]),
                ))),
        );
        let transition = |source: &str, target: &str, trigger: &str| Transition {
            source: source.into(),
            target: target.into(),
            trigger: trigger.into(),
            guard: None,
            action: None,
        };
        Ok(Some(CompiledBehavior {
            fragment,
            transitions: vec![
                transition("Locked", "Open", "coin()"),
                transition("Open", "Locked", "push()"),
            ],
        }))
    }
}

const GATE: &str = r#"
name = "Gate"
imports = ["shared.toml"]

[[types]]
kind = "structure"
name = "Gate"
aspects = [
    { name = "Solidity.ContractType", properties = { isContract = true } },
    { name = "Solidity.StateBehavior", properties = { diagram = "gate.puml" } },
]
fields = [{ name = "passes", type = "int" }]
operations = [{ name = "coin" }, { name = "push" }]

[[types]]
kind = "structure"
name = "Passed"
features = ["DOMAIN_EVENT"]
fields = [{ name = "at", type = "date" }]
"#;

const SHARED: &str = r#"
name = "Shared"

[[types]]
kind = "enumeration"
name = "Mode"
fields = ["Manual", "Automatic"]
"#;

fn workspace(with_diagram: bool) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("gate.toml"), GATE).unwrap();
    fs::write(dir.path().join("shared.toml"), SHARED).unwrap();
    if with_diagram {
        fs::write(dir.path().join("gate.puml"), "@startuml\n@enduml\n").unwrap();
    }
    dir
}

#[test]
fn test_lowering_with_behavior() {
    let dir = workspace(true);
    let models = resolve_models(dir.path().join("gate.toml")).unwrap();

    let ctx = Pipeline::new()
        .with_compiler(Turnstile)
        .run(models, GenerationSettings::default())
        .unwrap();

    assert_eq!(ctx.units.len(), 2);
    let gate = &ctx.units[0].unit.definitions.contracts[0];
    assert_eq!(gate.fields.len(), 2);
    assert_eq!(gate.definitions.events[0].name, "Passed");
    assert_eq!(
        gate.find_function("coin").unwrap().statements,
        vec![Statement::expression("currentState = \"Open\"")]
    );

    let shared = &ctx.units[1].unit;
    assert_eq!(shared.definitions.enumerations[0].name, "Mode");

    assert_eq!(ctx.merges.len(), 1);
    let MergeOutcome::Merged { transitions, rewrite } = &ctx.merges[0].outcome else {
        panic!("expected a merge");
    };
    assert_eq!(transitions.len(), 2);
    assert_eq!(rewrite.rewritten, vec!["coin", "push"]);
    assert!(!ctx.has_warnings());
}

#[test]
fn test_missing_diagram_keeps_mapped_contract() {
    let dir = workspace(false);
    let models = resolve_models(dir.path().join("gate.toml")).unwrap();

    let ctx = Pipeline::new()
        .with_compiler(Turnstile)
        .run(models, GenerationSettings::default())
        .unwrap();

    let gate = &ctx.units[0].unit.definitions.contracts[0];
    assert_eq!(gate.fields.len(), 1);
    assert!(gate.find_function("handle").is_none());
    assert!(
        ctx.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning && d.message.contains("not found"))
    );
}
