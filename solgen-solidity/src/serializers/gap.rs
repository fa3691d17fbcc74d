//! Extended generation gap.
//!
//! Every contract is split into files with fixed roles (see
//! [`ArtifactRole`]):
//!
//! | File | Content | Owner |
//! |---|---|---|
//! | `<Name>.sol` | interface of the exposed functions and the structs | generator |
//! | `<Name>BaseImpl.sol` | the contract, implementing that interface | generator |
//! | `<Name>Base.sol` | extra declarations the generated interface extends | user |
//! | `<Name>Impl.sol` | contract extending the base implementation | user |
//!
//! User files are read to shape the generated ones and are never rewritten.
//! The user implementation is synthesized once, when the user interface
//! exists and the implementation does not.

use std::{collections::HashSet, mem, path::Path};

use eyre::{Result, WrapErr};
use solgen_ast::{Contract, Definitions, Function, Import, Interface, SourceUnit, Statement, Visibility};
use solgen_codegen::{
    generation::{CodeGenerationSerializer, FileEntry, Serialized, SkippedContract},
    language::{SourceParser, SourcePrinter},
    traverse::LoweredUnit,
};
use solgen_core::{ArtifactRole, Overwrite};
use tracing::{debug, warn};

use super::{default_return, file_level, standalone_file};
use crate::{SolidityParser, SolidityPrinter, render::IMPLEMENTATION_REQUIRED};

/// User-owned files found next to the generated ones.
#[derive(Debug, Default)]
struct UserFiles {
    interface: Option<Interface>,
    has_impl: bool,
}

#[derive(Debug, Default)]
pub struct ExtendedGenerationGapSerializer {
    printer: SolidityPrinter,
    parser: SolidityParser,
}

impl ExtendedGenerationGapSerializer {
    pub const NAME: &'static str = "extended-generation-gap";

    pub fn new() -> Self {
        Self::default()
    }

    /// `enumerations` are enum names the user interface may use without
    /// declaring them.
    fn probe(
        &self,
        target: &Path,
        contract: &str,
        enumerations: &HashSet<String>,
    ) -> Result<UserFiles> {
        let interface_path = ArtifactRole::UserInterface.path_in(target, contract);
        let interface = if interface_path.is_file() {
            let mut unit = self
                .parser
                .parse_file(&interface_path)
                .wrap_err_with(|| format!("Failed to read user interface of {}", contract))?;
            unit.resolve_enumerations(enumerations);
            let first = unit.definitions.interfaces.into_iter().next();
            if first.is_none() {
                warn!(
                    path = %interface_path.display(),
                    "user interface file declares no interface, ignoring it"
                );
            }
            first
        } else {
            None
        };

        let has_impl = ArtifactRole::UserImpl.path_in(target, contract).is_file();
        debug!(
            contract,
            user_interface = interface.is_some(),
            user_impl = has_impl,
            "probed user files"
        );
        Ok(UserFiles {
            interface,
            has_impl,
        })
    }

    fn serialize_contract(
        &self,
        unit: &SourceUnit,
        contract: &Contract,
        user: UserFiles,
        shared: Option<&Definitions>,
    ) -> Vec<FileEntry> {
        let name = contract.name.as_str();

        let mut contract = contract.clone();
        let interface = generated_interface(unit, &mut contract, user.interface.as_ref(), shared);
        let base = base_implementation(unit, &contract, user.has_impl);

        let mut files = vec![
            FileEntry::artifact(
                ArtifactRole::GeneratedInterface,
                name,
                self.printer.print(&interface),
            ),
            FileEntry::artifact(
                ArtifactRole::GeneratedBaseImpl,
                name,
                self.printer.print(&base),
            ),
        ];

        if let Some(user_interface) = &user.interface
            && !user.has_impl
        {
            let implementation = user_implementation(unit, name, user_interface);
            files.push(
                FileEntry::artifact(
                    ArtifactRole::UserImpl,
                    name,
                    self.printer.print(&implementation),
                )
                .with_overwrite(Overwrite::IfMissing),
            );
        }

        files
    }
}

impl CodeGenerationSerializer for ExtendedGenerationGapSerializer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_default(&self) -> bool {
        true
    }

    fn serialize(&self, unit: &LoweredUnit, target: &Path) -> Result<Serialized> {
        if !target.is_dir() {
            warn!(target = %target.display(), "target folder is not a directory, skipping");
            return Ok(Serialized::default());
        }

        let source = &unit.unit;
        if source.definitions.contracts.is_empty() {
            let files: Vec<_> = standalone_file(unit, |u| self.printer.print(u))
                .into_iter()
                .collect();
            return Ok(files.into());
        }

        // File-level definitions go with the first laid out contract only,
        // so that they are declared once.
        let mut shared = Some(file_level(&source.definitions)).filter(|d| !d.is_empty());
        let enumerations = source.enumeration_names();
        let mut out = Serialized::default();
        for contract in unit.contracts() {
            // An unreadable user interface skips only its contract and is
            // never taken as absent.
            let user = match self.probe(target, &contract.name, &enumerations) {
                Ok(user) => user,
                Err(err) => {
                    let reason = format!("{:#}", err);
                    warn!(contract = %contract.name, error = %reason, "skipping contract");
                    out.skipped.push(SkippedContract {
                        contract: contract.name.clone(),
                        reason,
                    });
                    continue;
                }
            };
            let files = self.serialize_contract(source, contract, user, shared.take().as_ref());
            out.files.extend(files);
        }
        Ok(out)
    }
}

/// Interface of every exposed function, plus the structs moved out of
/// `contract`.
fn generated_interface(
    unit: &SourceUnit,
    contract: &mut Contract,
    user_interface: Option<&Interface>,
    shared: Option<&Definitions>,
) -> SourceUnit {
    let name = ArtifactRole::GeneratedInterface.definition_name(&contract.name);
    let mut out = unit.sibling(name.clone());
    out.imports = unit.imports.clone();

    let mut interface = Interface::new(name);
    interface.definitions.functions = contract
        .functions()
        .filter(|f| f.visibility.is_exposed())
        .map(|f| Function {
            visibility: Visibility::External,
            is_virtual: false,
            is_override: false,
            statements: Vec::new(),
            ..f.clone()
        })
        .collect();
    interface.definitions.structures = mem::take(&mut contract.definitions.structures);

    if let Some(user_interface) = user_interface {
        interface.extends.push(user_interface.name.clone());
        out.imports.push(Import {
            path: ArtifactRole::UserInterface.import_path(&contract.name),
        });
    }

    if let Some(shared) = shared {
        out.definitions = shared.clone();
    }
    out.definitions.interfaces.push(interface);
    out
}

/// The contract itself, implementing the generated interface.
fn base_implementation(unit: &SourceUnit, contract: &Contract, has_user_impl: bool) -> SourceUnit {
    let name = ArtifactRole::GeneratedBaseImpl.definition_name(&contract.name);
    let mut out = unit
        .sibling(name.clone())
        .import(ArtifactRole::GeneratedInterface.import_path(&contract.name));

    let mut base = contract.clone();
    base.name = name;
    base.implements
        .push(ArtifactRole::GeneratedInterface.definition_name(&contract.name));
    base.is_abstract = has_user_impl;

    for function in &mut base.definitions.functions {
        if has_user_impl && function.visibility != Visibility::Private {
            function.is_virtual = true;
        }
        if function.visibility.is_exposed() {
            function.is_override = true;
        }
        if function.statements.is_empty() {
            function
                .statements
                .push(Statement::revert(IMPLEMENTATION_REQUIRED));
        }
    }
    for modifier in &mut base.definitions.modifiers {
        if modifier.statements.is_empty() {
            modifier
                .statements
                .push(Statement::revert(IMPLEMENTATION_REQUIRED));
        }
    }

    out.definitions.contracts.push(base);
    out
}

/// Starting point for the user: overrides of the user interface functions
/// returning placeholder values.
fn user_implementation(unit: &SourceUnit, contract: &str, user_interface: &Interface) -> SourceUnit {
    let name = ArtifactRole::UserImpl.definition_name(contract);
    let mut out = unit
        .sibling(name.clone())
        .import(ArtifactRole::GeneratedBaseImpl.import_path(contract));

    let mut implementation = Contract::new(name);
    implementation
        .extends
        .push(ArtifactRole::GeneratedBaseImpl.definition_name(contract));
    implementation.definitions.functions = user_interface
        .functions()
        .map(|f| Function {
            is_virtual: false,
            is_override: true,
            statements: vec![default_return(&f.returns)],
            ..f.clone()
        })
        .collect();

    out.definitions.contracts.push(implementation);
    out
}
