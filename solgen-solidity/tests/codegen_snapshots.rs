use std::{fs, path::Path};

use solgen_codegen::pipeline::{GenerationSettings, Pipeline};
use solgen_model::resolve_models;
use solgen_solidity::{
    ExtendedGenerationGapSerializer, LanguageCodegen, PlantUmlCompiler, PreviewFile,
    SolidityGenerator,
};
use tempfile::TempDir;

const MODEL: &str = r#"
name = "Turnstile"

[[types]]
kind = "enumeration"
name = "Mode"
fields = ["Manual", "Automatic"]

[[types]]
kind = "structure"
name = "Turnstile"
aspects = [
    { name = "Solidity.ContractType", properties = { isContract = true } },
    { name = "Solidity.StateBehavior", properties = { diagram = "turnstile.puml" } },
]
fields = [
    { name = "paid", type = "int" },
    { name = "owner", type = "address", hidden = true, aspects = [{ name = "Solidity.Payable" }] },
]
operations = [
    { name = "coin" },
    { name = "push" },
    { name = "onlyOwner", aspects = [{ name = "Solidity.Modifier" }] },
    { name = "total", returns = "int" },
]

[[types]]
kind = "structure"
name = "Pass"
fields = [{ name = "at", type = "date" }, { name = "note", type = "string" }]

[[types]]
kind = "structure"
name = "Passed"
features = ["DOMAIN_EVENT"]
fields = [{ name = "at", type = "date" }]
"#;

const DIAGRAM: &str = "\
@startuml
[*] --> Locked
Locked --> Unlocked : coin / paid += 1
Unlocked --> Locked : push
@enduml
";

const USER_INTERFACE: &str = "\
// SPDX-License-Identifier: GPL-3.0
pragma solidity >=0.8.0 <0.9.0;

interface TurnstileExtras {
    function refund(address who) external returns (uint, bool);
    function label() external view returns (string memory);
}
";

/// Model folder plus an empty `contracts` output folder.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("turnstile.toml"), MODEL).unwrap();
    fs::write(dir.path().join("turnstile.puml"), DIAGRAM).unwrap();
    fs::create_dir(dir.path().join("contracts")).unwrap();
    dir
}

fn preview(dir: &Path) -> Vec<PreviewFile> {
    let models = resolve_models(dir.join("turnstile.toml")).unwrap();
    let ctx = Pipeline::new()
        .with_compiler(PlantUmlCompiler::new())
        .run(models, GenerationSettings::default())
        .unwrap();

    let serializer = ExtendedGenerationGapSerializer::new();
    SolidityGenerator::new(&ctx.units, &serializer)
        .preview(&dir.join("contracts"))
        .unwrap()
}

fn content<'a>(files: &'a [PreviewFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{} was not produced", path))
}

#[test]
fn test_generated_interface() {
    let dir = workspace();
    let files = preview(dir.path());

    let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["Turnstile.sol", "TurnstileBaseImpl.sol"]);
    insta::assert_snapshot!("turnstile_interface", content(&files, "Turnstile.sol"));
}

#[test]
fn test_generated_base_implementation() {
    let dir = workspace();
    let files = preview(dir.path());

    insta::assert_snapshot!(
        "turnstile_base_impl",
        content(&files, "TurnstileBaseImpl.sol")
    );
}

#[test]
fn test_synthesized_user_implementation() {
    let dir = workspace();
    fs::write(
        dir.path().join("contracts").join("TurnstileBase.sol"),
        USER_INTERFACE,
    )
    .unwrap();
    let files = preview(dir.path());

    let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["Turnstile.sol", "TurnstileBaseImpl.sol", "TurnstileImpl.sol"]
    );
    insta::assert_snapshot!(
        "turnstile_interface_extending_user",
        content(&files, "Turnstile.sol")
    );
    insta::assert_snapshot!("turnstile_user_impl", content(&files, "TurnstileImpl.sol"));
}
