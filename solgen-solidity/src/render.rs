//! Renderable views over syntax tree nodes.
//!
//! The syntax tree lives in `solgen-ast` and knows nothing about text. [`Node`]
//! borrows a tree node and turns it into [`CodeFragment`]s, which the
//! [`CodeBuilder`](solgen_codegen::builder::CodeBuilder) lays out with
//! Solidity indentation.

use solgen_ast::{
    Conditional, Contract, Definitions, Enumeration, ErrorDefinition, Event, Field, Function,
    Interface, LocalField, Modifier, Parameter, SourceUnit, Statement, Structure, Type,
};
use solgen_codegen::builder::{CodeFragment, Renderable};

/// Revert reason for bodies the user still has to write.
pub const IMPLEMENTATION_REQUIRED: &str = "IMPLEMENTATION REQUIRED";

/// A borrowed syntax tree node, ready to be rendered.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a, T>(pub &'a T);

fn type_text(ty: &Type, payable: bool) -> String {
    if payable {
        format!("{} payable", ty)
    } else {
        ty.to_string()
    }
}

/// `string memory`, `uint`: the location is only printed for reference types.
fn parameter_text(parameter: &Parameter) -> String {
    let head = match parameter.location {
        Some(location) if parameter.ty.is_reference() => {
            format!("{} {}", parameter.ty, location.as_str())
        }
        _ => parameter.ty.to_string(),
    };
    named(head, &parameter.name)
}

fn named(head: String, name: &str) -> String {
    if name.is_empty() {
        head
    } else {
        format!("{} {}", head, name)
    }
}

fn parameter_list(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(parameter_text)
        .collect::<Vec<_>>()
        .join(", ")
}

fn local_field_text(field: &LocalField) -> String {
    named(type_text(&field.ty, field.payable), &field.name)
}

fn local_field_list(fields: &[LocalField]) -> String {
    fields
        .iter()
        .map(local_field_text)
        .collect::<Vec<_>>()
        .join(", ")
}

fn return_text(ty: &Type) -> String {
    if ty.is_reference() {
        format!("{} memory", ty)
    } else {
        ty.to_string()
    }
}

/// Function header without body or terminator.
pub fn signature(function: &Function) -> String {
    let mut header = format!(
        "function {}({}) {}",
        function.name,
        parameter_list(&function.parameters),
        function.visibility.as_str()
    );
    if let Some(mutability) = function.mutability {
        header.push(' ');
        header.push_str(mutability.as_str());
    }
    if function.is_virtual {
        header.push_str(" virtual");
    }
    if function.is_override {
        header.push_str(" override");
    }
    if !function.returns.is_empty() {
        let returns: Vec<_> = function.returns.iter().map(return_text).collect();
        header.push_str(&format!(" returns ({})", returns.join(", ")));
    }
    header
}

fn inheritance(names: impl Iterator<Item = impl AsRef<str>>) -> String {
    let names: Vec<_> = names.map(|n| n.as_ref().to_string()).collect();
    if names.is_empty() {
        String::new()
    } else {
        format!(" is {}", names.join(", "))
    }
}

/// A block, collapsed to `header {}` when it has no body.
fn braced_or_empty(header: String, body: Vec<CodeFragment>) -> CodeFragment {
    if body.is_empty() {
        CodeFragment::line(format!("{} {{}}", header))
    } else {
        CodeFragment::braced(format!("{} {{", header), body)
    }
}

fn statements(statements: &[Statement]) -> Vec<CodeFragment> {
    statements
        .iter()
        .flat_map(|s| Node(s).to_fragments())
        .collect()
}

impl Renderable for Node<'_, Statement> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self.0 {
            Statement::Expression(text) => vec![CodeFragment::line(format!("{};", text))],
            Statement::Call {
                function,
                arguments,
            } => vec![CodeFragment::line(format!("{}{};", function, arguments))],
            Statement::Return(None) => vec![CodeFragment::line("return;")],
            Statement::Return(Some(value)) => {
                vec![CodeFragment::line(format!("return {};", value))]
            }
            Statement::Revert(message) => {
                vec![CodeFragment::line(format!("revert(\"{}\");", message))]
            }
            Statement::Conditional(conditional) => Node(conditional).to_fragments(),
        }
    }
}

impl Renderable for Node<'_, Conditional> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let conditional = self.0;
        if conditional.branches.is_empty() {
            return conditional
                .otherwise
                .as_deref()
                .map(statements)
                .unwrap_or_default();
        }

        let mut out = Vec::new();
        for (i, branch) in conditional.branches.iter().enumerate() {
            let header = if i == 0 {
                format!("if ({}) {{", branch.condition)
            } else {
                format!("}} else if ({}) {{", branch.condition)
            };
            out.push(CodeFragment::block(header, statements(&branch.statements), None));
        }
        if let Some(otherwise) = &conditional.otherwise {
            out.push(CodeFragment::block("} else {", statements(otherwise), None));
        }
        out.push(CodeFragment::line("}"));
        out
    }
}

impl Renderable for Node<'_, Field> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let field = self.0;
        let mut line = format!(
            "{} {} {}",
            type_text(&field.ty, field.payable),
            field.visibility.as_str(),
            field.name
        );
        if let Some(value) = &field.initializer {
            line.push_str(" = ");
            line.push_str(value);
        }
        line.push(';');
        vec![CodeFragment::line(line)]
    }
}

impl Renderable for Node<'_, Structure> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let body = self
            .0
            .fields
            .iter()
            .map(|f| CodeFragment::line(format!("{};", local_field_text(f))))
            .collect();
        vec![braced_or_empty(format!("struct {}", self.0.name), body)]
    }
}

impl Renderable for Node<'_, Enumeration> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let last = self.0.values.len().saturating_sub(1);
        let body = self
            .0
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                if i == last {
                    CodeFragment::line(value.clone())
                } else {
                    CodeFragment::line(format!("{},", value))
                }
            })
            .collect();
        vec![braced_or_empty(format!("enum {}", self.0.name), body)]
    }
}

impl Renderable for Node<'_, Event> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(format!(
            "event {}({});",
            self.0.name,
            local_field_list(&self.0.parameters)
        ))]
    }
}

impl Renderable for Node<'_, ErrorDefinition> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(format!(
            "error {}({});",
            self.0.name,
            local_field_list(&self.0.parameters)
        ))]
    }
}

impl Renderable for Node<'_, Modifier> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let modifier = self.0;
        let mut header = format!(
            "modifier {}({})",
            modifier.name,
            parameter_list(&modifier.parameters)
        );
        if modifier.is_virtual {
            header.push_str(" virtual");
        }
        if modifier.is_override {
            header.push_str(" override");
        }

        let mut body = statements(&modifier.statements);
        body.push(CodeFragment::line("_;"));
        vec![CodeFragment::braced(format!("{} {{", header), body)]
    }
}

impl Renderable for Node<'_, Function> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![braced_or_empty(
            signature(self.0),
            statements(&self.0.statements),
        )]
    }
}

/// Render each node as its own group.
fn each<'a, T>(items: &'a [T]) -> impl Iterator<Item = Vec<CodeFragment>> + 'a
where
    Node<'a, T>: Renderable,
{
    items.iter().map(|item| Node(item).to_fragments())
}

/// Render all nodes as one group of lines.
fn together<'a, T>(items: &'a [T]) -> Vec<CodeFragment>
where
    Node<'a, T>: Renderable,
{
    items.iter().flat_map(|item| Node(item).to_fragments()).collect()
}

impl Renderable for Node<'_, Contract> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let contract = self.0;
        let defs = &contract.definitions;

        let mut groups = vec![together(&contract.fields)];
        groups.extend(each(&defs.structures));
        groups.extend(each(&defs.enumerations));
        groups.push(together(&defs.events));
        groups.push(together(&defs.errors));
        groups.extend(each(&defs.modifiers));
        groups.extend(each(&defs.functions));

        let keyword = if contract.is_abstract {
            "abstract contract"
        } else {
            "contract"
        };
        let header = format!(
            "{} {}{}",
            keyword,
            contract.name,
            inheritance(contract.inherits())
        );
        vec![braced_or_empty(header, CodeFragment::separated(groups))]
    }
}

impl Renderable for Node<'_, Interface> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let interface = self.0;
        let defs = &interface.definitions;

        let mut groups: Vec<Vec<CodeFragment>> = each(&defs.structures).collect();
        groups.extend(each(&defs.enumerations));
        groups.push(together(&defs.events));
        groups.push(together(&defs.errors));
        groups.push(
            defs.functions
                .iter()
                .map(|f| CodeFragment::line(format!("{};", signature(f))))
                .collect(),
        );

        let header = format!(
            "interface {}{}",
            interface.name,
            inheritance(interface.extends.iter())
        );
        vec![braced_or_empty(header, CodeFragment::separated(groups))]
    }
}

/// File-level definitions, one group per item.
fn top_level(defs: &Definitions) -> Vec<Vec<CodeFragment>> {
    let mut groups: Vec<Vec<CodeFragment>> = each(&defs.enumerations).collect();
    groups.extend(each(&defs.structures));
    groups.push(together(&defs.events));
    groups.push(together(&defs.errors));
    groups.extend(each(&defs.interfaces));
    groups.extend(each(&defs.contracts));
    groups.extend(each(&defs.functions));
    groups.extend(each(&defs.modifiers));
    groups
}

impl Renderable for Node<'_, SourceUnit> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let unit = self.0;
        let mut groups = vec![
            vec![
                CodeFragment::comment(format!("SPDX-License-Identifier: {}", unit.license)),
                CodeFragment::line(format!("pragma solidity {};", unit.pragma)),
            ],
            unit.imports
                .iter()
                .map(|i| CodeFragment::line(format!("import \"{}\";", i.path)))
                .collect(),
        ];
        groups.extend(top_level(&unit.definitions));
        CodeFragment::separated(groups)
    }
}
