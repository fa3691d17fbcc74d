//! Recursive descent over the token stream.
//!
//! Only declarations are read. Function, modifier and constructor bodies are
//! skipped by brace matching, so any statement syntax inside them is accepted.

use solgen_ast::{
    Contract, DataLocation, Definitions, Enumeration, ErrorDefinition, Event, Field, Function,
    Import, Interface, LocalField, Modifier, Parameter, SourceUnit, StateMutability, Structure,
    Type, Visibility,
};
use tracing::debug;

use super::{
    ParseError,
    tokenizer::{Span, SpannedToken, Token, Tokenizer},
};

const LICENSE_TAG: &str = "SPDX-License-Identifier:";

/// A type together with an `address payable` marker.
struct TypeName {
    ty: Type,
    payable: bool,
}

impl TypeName {
    /// Parameters have no payable flag; the marker stays part of the type.
    fn into_parameter_type(self) -> Type {
        if self.payable {
            Type::named(format!("{} payable", self.ty))
        } else {
            self.ty
        }
    }
}

struct RawParameter {
    ty: TypeName,
    location: Option<DataLocation>,
    name: String,
}

pub(super) struct Parser {
    chars: Vec<char>,
    tokens: Vec<SpannedToken>,
    position: usize,
    license: Option<String>,
}

type Result<T> = std::result::Result<T, ParseError>;

impl Parser {
    pub(super) fn new(source: &str) -> Result<Self> {
        let mut license = None;
        let mut tokens = Vec::new();
        for token in Tokenizer::new(source).tokenize()? {
            match &token.token {
                Token::Comment(text) => {
                    if license.is_none()
                        && let Some(rest) = text.split_once(LICENSE_TAG).map(|(_, r)| r)
                    {
                        license = Some(rest.trim().to_string());
                    }
                }
                _ => tokens.push(token),
            }
        }

        Ok(Self {
            chars: source.chars().collect(),
            tokens,
            position: 0,
            license,
        })
    }

    // ── Token helpers ──────────────────────────────────────

    fn current(&self) -> &SpannedToken {
        // The stream always ends with Eof, and `advance` never moves past it.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.current().token
    }

    fn peek_ahead(&self, offset: usize) -> &Token {
        let index = (self.position + offset).min(self.tokens.len() - 1);
        &self.tokens[index].token
    }

    fn span(&self) -> Span {
        self.current().span
    }

    fn advance(&mut self) -> SpannedToken {
        let token = self.current().clone();
        if token.token != Token::Eof {
            self.position += 1;
        }
        token
    }

    fn at_eof(&self) -> bool {
        *self.peek() == Token::Eof
    }

    fn eat_symbol(&mut self, symbol: &str) -> bool {
        if self.peek().is_symbol(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_identifier(&mut self, name: &str) -> bool {
        if self.peek().is_identifier(name) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::Expected {
            expected: expected.into(),
            found: self.peek().to_string(),
            span: self.span(),
        }
    }

    fn expect_symbol(&mut self, symbol: &str) -> Result<()> {
        if self.eat_symbol(symbol) {
            Ok(())
        } else {
            Err(self.expected(format!("'{}'", symbol)))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.eat_identifier(keyword) {
            Ok(())
        } else {
            Err(self.expected(format!("'{}'", keyword)))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String> {
        match self.peek() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.expected(what)),
        }
    }

    fn peek_identifier(&self) -> Option<&str> {
        match self.peek() {
            Token::Identifier(name) => Some(name),
            _ => None,
        }
    }

    fn eof_error(&self, context: impl Into<String>) -> ParseError {
        ParseError::UnexpectedEof {
            context: context.into(),
            span: self.span(),
        }
    }

    /// Source text of everything before the next `close` at nesting depth
    /// zero. Consumes `close`.
    fn raw_until(&mut self, close: &str, context: &str) -> Result<String> {
        let start = self.current().span.offset;
        let mut end = start;
        let mut depth = 0usize;

        loop {
            match self.peek() {
                Token::Eof => return Err(self.eof_error(context)),
                Token::Symbol(s) if s == close && depth == 0 => {
                    self.advance();
                    break;
                }
                Token::Symbol(s) if matches!(s.as_str(), "(" | "[" | "{") => depth += 1,
                Token::Symbol(s) if matches!(s.as_str(), ")" | "]" | "}") => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            end = self.advance().end;
        }

        Ok(self.chars[start..end].iter().collect::<String>().trim().to_string())
    }

    /// Skip from an opening `(`, `[` or `{` through its matching close.
    fn skip_balanced(&mut self, context: &str) -> Result<()> {
        let mut depth = 0usize;
        loop {
            let token = self.advance();
            match &token.token {
                Token::Eof => return Err(self.eof_error(context)),
                Token::Symbol(s) if matches!(s.as_str(), "(" | "[" | "{") => depth += 1,
                Token::Symbol(s) if matches!(s.as_str(), ")" | "]" | "}") => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    /// Skip a declaration this parser does not model: up to a `;` or through
    /// a braced body, whichever ends it.
    fn skip_declaration(&mut self, context: &str) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                Token::Eof => return Err(self.eof_error(context)),
                Token::Symbol(s) if s == ";" && depth == 0 => {
                    self.advance();
                    return Ok(());
                }
                Token::Symbol(s) if s == "{" && depth == 0 => {
                    return self.skip_balanced(context);
                }
                Token::Symbol(s) if matches!(s.as_str(), "(" | "[") => depth += 1,
                Token::Symbol(s) if matches!(s.as_str(), ")" | "]") => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            self.advance();
        }
    }

    // ── Source unit ────────────────────────────────────────

    pub(super) fn parse_unit(mut self, name: &str) -> Result<SourceUnit> {
        let mut pragma = String::new();
        let mut imports = Vec::new();
        let mut defs = Definitions::default();

        while !self.at_eof() {
            let Some(keyword) = self.peek_identifier().map(str::to_string) else {
                return Err(self.expected("a declaration"));
            };

            match keyword.as_str() {
                "pragma" => {
                    self.advance();
                    if self.eat_identifier("solidity") {
                        pragma = self.raw_until(";", "pragma")?;
                    } else {
                        self.skip_declaration("pragma")?;
                    }
                }
                "import" => imports.push(self.parse_import()?),
                "abstract" => {
                    self.advance();
                    self.expect_keyword("contract")?;
                    defs.contracts.push(self.parse_contract(true)?);
                }
                "contract" => {
                    self.advance();
                    defs.contracts.push(self.parse_contract(false)?);
                }
                "interface" => {
                    self.advance();
                    defs.interfaces.push(self.parse_interface()?);
                }
                "struct" => {
                    self.advance();
                    defs.structures.push(self.parse_struct()?);
                }
                "enum" => {
                    self.advance();
                    defs.enumerations.push(self.parse_enum()?);
                }
                "event" => {
                    self.advance();
                    defs.events.push(self.parse_event()?);
                }
                "error" => {
                    self.advance();
                    defs.errors.push(self.parse_error()?);
                }
                "function" => {
                    self.advance();
                    defs.functions.push(self.parse_function(Visibility::Internal)?);
                }
                other => {
                    debug!(keyword = other, line = self.span().line, "skipping declaration");
                    self.skip_declaration(other)?;
                }
            }
        }

        Ok(SourceUnit {
            name: name.to_string(),
            license: self.license.unwrap_or_else(|| "UNLICENSED".to_string()),
            pragma,
            imports,
            definitions: defs,
        })
    }

    fn parse_import(&mut self) -> Result<Import> {
        self.advance();
        let span = self.span();
        let mut path = None;
        loop {
            match self.advance().token {
                Token::Eof => return Err(self.eof_error("import")),
                Token::StringLiteral(s) if path.is_none() => path = Some(s),
                Token::Symbol(s) if s == ";" => break,
                _ => {}
            }
        }

        path.map(|path| Import { path })
            .ok_or_else(|| ParseError::Expected {
                expected: "an import path".to_string(),
                found: "';'".to_string(),
                span,
            })
    }

    fn qualified_name(&mut self, what: &str) -> Result<String> {
        let mut name = self.expect_identifier(what)?;
        while self.peek().is_symbol(".") {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_identifier(what)?);
        }
        Ok(name)
    }

    /// `is A, B(1), C.D`; constructor arguments are dropped.
    fn parse_inheritance(&mut self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        if !self.eat_identifier("is") {
            return Ok(names);
        }
        loop {
            names.push(self.qualified_name("a base name")?);
            if self.peek().is_symbol("(") {
                self.skip_balanced("inheritance list")?;
            }
            if !self.eat_symbol(",") {
                return Ok(names);
            }
        }
    }

    // ── Contracts and interfaces ───────────────────────────

    fn parse_contract(&mut self, is_abstract: bool) -> Result<Contract> {
        let mut contract = Contract::new(self.expect_identifier("a contract name")?);
        contract.is_abstract = is_abstract;
        // Base contracts and interfaces look alike here; all of them extend.
        contract.extends = self.parse_inheritance()?;
        self.expect_symbol("{")?;

        let context = format!("contract {}", contract.name);
        loop {
            if self.at_eof() {
                return Err(self.eof_error(context));
            }
            if self.eat_symbol("}") {
                return Ok(contract);
            }

            let defs = &mut contract.definitions;
            match self.peek_identifier() {
                Some("function") => {
                    self.advance();
                    defs.functions.push(self.parse_function(Visibility::Public)?);
                }
                Some("modifier") => {
                    self.advance();
                    defs.modifiers.push(self.parse_modifier()?);
                }
                Some("struct") => {
                    self.advance();
                    defs.structures.push(self.parse_struct()?);
                }
                Some("enum") => {
                    self.advance();
                    defs.enumerations.push(self.parse_enum()?);
                }
                Some("event") => {
                    self.advance();
                    defs.events.push(self.parse_event()?);
                }
                Some("error") if matches!(self.peek_ahead(2), Token::Symbol(s) if s == "(") => {
                    self.advance();
                    defs.errors.push(self.parse_error()?);
                }
                Some("constructor" | "fallback" | "receive" | "using") => {
                    self.skip_declaration(&context)?;
                }
                _ => contract.fields.push(self.parse_state_variable()?),
            }
        }
    }

    fn parse_interface(&mut self) -> Result<Interface> {
        let mut interface = Interface::new(self.expect_identifier("an interface name")?);
        interface.extends = self.parse_inheritance()?;
        self.expect_symbol("{")?;

        let context = format!("interface {}", interface.name);
        loop {
            if self.at_eof() {
                return Err(self.eof_error(context));
            }
            if self.eat_symbol("}") {
                return Ok(interface);
            }

            let defs = &mut interface.definitions;
            match self.peek_identifier() {
                Some("function") => {
                    self.advance();
                    defs.functions.push(self.parse_function(Visibility::External)?);
                }
                Some("struct") => {
                    self.advance();
                    defs.structures.push(self.parse_struct()?);
                }
                Some("enum") => {
                    self.advance();
                    defs.enumerations.push(self.parse_enum()?);
                }
                Some("event") => {
                    self.advance();
                    defs.events.push(self.parse_event()?);
                }
                Some("error") => {
                    self.advance();
                    defs.errors.push(self.parse_error()?);
                }
                _ => self.skip_declaration(&context)?,
            }
        }
    }

    fn parse_state_variable(&mut self) -> Result<Field> {
        let ty = self.parse_type()?;
        let mut field = Field::new(String::new(), ty.ty).visibility(Visibility::Internal);
        field.payable = ty.payable;

        loop {
            match self.peek_identifier() {
                Some(keyword @ ("public" | "private" | "internal" | "external")) => {
                    field.visibility = visibility(keyword);
                    self.advance();
                }
                Some("override") => {
                    self.advance();
                    if self.peek().is_symbol("(") {
                        self.skip_balanced("override list")?;
                    }
                }
                Some("constant" | "immutable" | "transient") => {
                    self.advance();
                }
                _ => break,
            }
        }

        field.name = self.expect_identifier("a state variable name")?;
        if self.eat_symbol("=") {
            field.initializer = Some(self.raw_until(";", "state variable initializer")?);
        } else {
            self.expect_symbol(";")?;
        }
        Ok(field)
    }

    // ── Types and parameters ───────────────────────────────

    fn parse_type(&mut self) -> Result<TypeName> {
        let mut name = if self.eat_identifier("mapping") {
            self.expect_symbol("(")?;
            let key = self.parse_type()?.ty;
            if matches!(self.peek(), Token::Identifier(_)) {
                self.advance();
            }
            self.expect_symbol("=>")?;
            let value = self.parse_type()?.ty;
            if matches!(self.peek(), Token::Identifier(_)) {
                self.advance();
            }
            self.expect_symbol(")")?;
            TypeName {
                ty: Type::mapping(key, value),
                payable: false,
            }
        } else {
            let base = self.qualified_name("a type")?;
            let payable = base == "address" && self.eat_identifier("payable");
            TypeName {
                ty: Type::named(base),
                payable,
            }
        };

        while self.eat_symbol("[") {
            if self.eat_symbol("]") {
                name.ty = Type::array(name.ty);
            } else {
                let size = self.raw_until("]", "array size")?;
                name.ty = Type::named(format!("{}[{}]", name.ty, size));
            }
        }

        Ok(name)
    }

    fn parse_parameter_list(&mut self) -> Result<Vec<RawParameter>> {
        self.expect_symbol("(")?;
        let mut parameters = Vec::new();
        if self.eat_symbol(")") {
            return Ok(parameters);
        }

        loop {
            let ty = self.parse_type()?;
            let location = match self.peek_identifier() {
                Some("memory") => Some(DataLocation::Memory),
                Some("storage") => Some(DataLocation::Storage),
                Some("calldata") => Some(DataLocation::Calldata),
                _ => None,
            };
            if location.is_some() {
                self.advance();
            }
            self.eat_identifier("indexed");
            let name = match self.peek() {
                Token::Identifier(name) => {
                    let name = name.clone();
                    self.advance();
                    name
                }
                _ => String::new(),
            };
            parameters.push(RawParameter { ty, location, name });

            if !self.eat_symbol(",") {
                self.expect_symbol(")")?;
                return Ok(parameters);
            }
        }
    }

    fn parse_parameters(&mut self) -> Result<Vec<Parameter>> {
        Ok(self
            .parse_parameter_list()?
            .into_iter()
            .map(|p| Parameter {
                name: p.name,
                ty: p.ty.into_parameter_type(),
                location: p.location,
            })
            .collect())
    }

    fn parse_local_fields(&mut self) -> Result<Vec<LocalField>> {
        Ok(self
            .parse_parameter_list()?
            .into_iter()
            .map(|p| LocalField {
                name: p.name,
                ty: p.ty.ty,
                payable: p.ty.payable,
            })
            .collect())
    }

    // ── Callables ──────────────────────────────────────────

    fn parse_function(&mut self, default_visibility: Visibility) -> Result<Function> {
        let name = self.expect_identifier("a function name")?;
        let mut function = Function::new(name).visibility(default_visibility);
        function.parameters = self.parse_parameters()?;
        let context = format!("function {}", function.name);

        loop {
            match self.peek().clone() {
                Token::Eof => return Err(self.eof_error(context)),
                Token::Symbol(s) if s == ";" => {
                    self.advance();
                    return Ok(function);
                }
                Token::Symbol(s) if s == "{" => {
                    self.skip_balanced(&context)?;
                    return Ok(function);
                }
                Token::Identifier(keyword) => {
                    self.advance();
                    match keyword.as_str() {
                        "returns" => {
                            function.returns = self
                                .parse_parameter_list()?
                                .into_iter()
                                .map(|p| p.ty.into_parameter_type())
                                .collect();
                        }
                        "public" | "private" | "internal" | "external" => {
                            function.visibility = visibility(&keyword);
                        }
                        "pure" => function.mutability = Some(StateMutability::Pure),
                        "view" | "constant" => function.mutability = Some(StateMutability::View),
                        "payable" => function.mutability = Some(StateMutability::Payable),
                        "virtual" => function.is_virtual = true,
                        "override" => {
                            function.is_override = true;
                            if self.peek().is_symbol("(") {
                                self.skip_balanced("override list")?;
                            }
                        }
                        // Modifier invocation.
                        _ => {
                            if self.peek().is_symbol("(") {
                                self.skip_balanced(&context)?;
                            }
                        }
                    }
                }
                _ => return Err(self.expected("a function body or ';'")),
            }
        }
    }

    fn parse_modifier(&mut self) -> Result<Modifier> {
        let mut modifier = Modifier::new(self.expect_identifier("a modifier name")?);
        if self.peek().is_symbol("(") {
            modifier.parameters = self.parse_parameters()?;
        }

        loop {
            if self.eat_identifier("virtual") {
                modifier.is_virtual = true;
            } else if self.eat_identifier("override") {
                modifier.is_override = true;
                if self.peek().is_symbol("(") {
                    self.skip_balanced("override list")?;
                }
            } else {
                break;
            }
        }

        if self.eat_symbol(";") {
            return Ok(modifier);
        }
        if self.peek().is_symbol("{") {
            self.skip_balanced(&format!("modifier {}", modifier.name))?;
            return Ok(modifier);
        }
        Err(self.expected("a modifier body or ';'"))
    }

    // ── Other definitions ──────────────────────────────────

    fn parse_struct(&mut self) -> Result<Structure> {
        let mut structure = Structure::new(self.expect_identifier("a struct name")?);
        self.expect_symbol("{")?;
        while !self.eat_symbol("}") {
            if self.at_eof() {
                return Err(self.eof_error(format!("struct {}", structure.name)));
            }
            let ty = self.parse_type()?;
            let name = self.expect_identifier("a struct member name")?;
            self.expect_symbol(";")?;
            structure.fields.push(LocalField {
                name,
                ty: ty.ty,
                payable: ty.payable,
            });
        }
        Ok(structure)
    }

    fn parse_enum(&mut self) -> Result<Enumeration> {
        let name = self.expect_identifier("an enum name")?;
        self.expect_symbol("{")?;
        let mut values = Vec::new();
        while !self.eat_symbol("}") {
            values.push(self.expect_identifier("an enum value")?);
            if !self.eat_symbol(",") {
                self.expect_symbol("}")?;
                break;
            }
        }
        Ok(Enumeration::new(name, values))
    }

    fn parse_event(&mut self) -> Result<Event> {
        let mut event = Event::new(self.expect_identifier("an event name")?);
        event.parameters = self.parse_local_fields()?;
        self.eat_identifier("anonymous");
        self.expect_symbol(";")?;
        Ok(event)
    }

    fn parse_error(&mut self) -> Result<ErrorDefinition> {
        let mut error = ErrorDefinition::new(self.expect_identifier("an error name")?);
        error.parameters = self.parse_local_fields()?;
        self.expect_symbol(";")?;
        Ok(error)
    }
}

fn visibility(keyword: &str) -> Visibility {
    match keyword {
        "private" => Visibility::Private,
        "internal" => Visibility::Internal,
        "external" => Visibility::External,
        _ => Visibility::Public,
    }
}
