//! Inspect operation - show the lowered target AST.

use eyre::{Context, Result};
use solgen_ast::{Contract, Definitions, Interface};
use solgen_codegen::{
    behavior::{MergeOutcome, MergeReport},
    pipeline::GenerationSettings,
};
use solgen_model::{GeneratorConfig, ModelSource};

use crate::reports::{InspectReport, UnitSummary};

/// Output format of `solgen inspect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InspectFormat {
    #[default]
    Text,
    Json,
}

pub fn inspect(
    models: Vec<ModelSource>,
    config: &GeneratorConfig,
    format: InspectFormat,
) -> Result<InspectReport> {
    let ctx = super::pipeline()
        .run(models, GenerationSettings::from(config))
        .wrap_err("Pipeline failed")?;

    match format {
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&ctx.units)
                .wrap_err("Failed to serialize lowered units")?;
            Ok(InspectReport::Json(json))
        }
        InspectFormat::Text => Ok(InspectReport::Text(
            ctx.units
                .iter()
                .map(|unit| UnitSummary {
                    name: unit.unit.name.clone(),
                    origin: unit.origin.display().to_string(),
                    definitions: describe(&unit.unit.definitions),
                    behaviors: ctx
                        .merges
                        .iter()
                        .filter(|m| unit.contracts().any(|c| c.name == m.contract))
                        .map(describe_merge)
                        .collect(),
                })
                .collect(),
        )),
    }
}

fn count(n: usize, word: &str) -> Option<String> {
    match n {
        0 => None,
        1 => Some(format!("1 {}", word)),
        n => Some(format!("{} {}s", n, word)),
    }
}

fn members(defs: &Definitions, fields: usize) -> String {
    let parts: Vec<_> = [
        count(fields, "field"),
        count(defs.structures.len(), "struct"),
        count(defs.enumerations.len(), "enum"),
        count(defs.events.len(), "event"),
        count(defs.errors.len(), "error"),
        count(defs.modifiers.len(), "modifier"),
        count(defs.functions.len(), "function"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        "empty".to_string()
    } else {
        parts.join(", ")
    }
}

fn describe_contract(contract: &Contract) -> String {
    let keyword = if contract.is_abstract {
        "abstract contract"
    } else {
        "contract"
    };
    format!(
        "{} {}: {}",
        keyword,
        contract.name,
        members(&contract.definitions, contract.fields.len())
    )
}

fn describe_interface(interface: &Interface) -> String {
    format!(
        "interface {}: {}",
        interface.name,
        members(&interface.definitions, 0)
    )
}

/// One line per top-level definition.
fn describe(defs: &Definitions) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(defs.enumerations.iter().map(|e| format!("enum {}", e.name)));
    lines.extend(defs.structures.iter().map(|s| format!("struct {}", s.name)));
    lines.extend(defs.events.iter().map(|e| format!("event {}", e.name)));
    lines.extend(defs.errors.iter().map(|e| format!("error {}", e.name)));
    lines.extend(defs.interfaces.iter().map(describe_interface));
    lines.extend(defs.contracts.iter().map(describe_contract));
    lines.extend(defs.functions.iter().map(|f| format!("function {}", f.name)));
    lines.extend(defs.modifiers.iter().map(|m| format!("modifier {}", m.name)));
    lines
}

fn describe_merge(merge: &MergeReport) -> String {
    let outcome = match &merge.outcome {
        MergeOutcome::Merged {
            transitions,
            rewrite,
        } => format!(
            "{} transitions, {} dispatched",
            transitions.len(),
            rewrite.rewritten.len()
        ),
        MergeOutcome::DiagramMissing => "diagram not found".to_string(),
        MergeOutcome::NoMatchingContract => "no matching contract".to_string(),
    };
    format!(
        "behavior {} <- {}: {}",
        merge.contract,
        merge.diagram.display(),
        outcome
    )
}

#[cfg(test)]
mod tests {
    use solgen_ast::{Enumeration, Field, Function, Type};
    use solgen_codegen::testing::{contract, model_source};
    use solgen_model::DataModel;

    use super::*;

    #[test]
    fn test_describe_definitions() {
        let mut defs = Definitions::default();
        defs.enumerations
            .push(Enumeration::new("Mode", vec!["On".into()]));
        defs.contracts.push(
            Contract::new("Shop")
                .field(Field::new("total", Type::named("uint")))
                .function(Function::new("open"))
                .function(Function::new("close")),
        );

        assert_eq!(
            describe(&defs),
            vec!["enum Mode", "contract Shop: 1 field, 2 functions"]
        );
    }

    #[test]
    fn test_empty_contract() {
        assert_eq!(describe_contract(&Contract::new("Shop")), "contract Shop: empty");
    }

    #[test]
    fn test_json_format() {
        let model = DataModel::new("Shop").structure(contract("Shop"));
        let report = inspect(
            vec![model_source("shop.toml", model)],
            &GeneratorConfig::default(),
            InspectFormat::Json,
        )
        .unwrap();

        let InspectReport::Json(json) = report else {
            panic!("expected json");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["unit"]["name"], "Shop");
        assert_eq!(value[0]["unit"]["definitions"]["contracts"][0]["name"], "Shop");
    }

    #[test]
    fn test_text_format() {
        let model = DataModel::new("Shop").structure(contract("Shop"));
        let report = inspect(
            vec![model_source("shop.toml", model)],
            &GeneratorConfig::default(),
            InspectFormat::Text,
        )
        .unwrap();

        let InspectReport::Text(units) = report else {
            panic!("expected text");
        };
        assert_eq!(units[0].origin, "shop.toml");
        assert_eq!(units[0].definitions, vec!["contract Shop: empty"]);
        assert!(units[0].behaviors.is_empty());
    }
}
