//! Target syntax tree for generated contract sources.
//!
//! Nodes are plain values: they are built by the mapper, edited in place by
//! the behavior merge, and handed by value to the serializer and printer.
//!
//! ```
//! use solgen_ast::{Contract, Function, SourceUnit, Statement, Type, Visibility};
//!
//! let mut unit = SourceUnit::new("Vault", "MIT", "^0.8.20");
//! unit.definitions.contracts.push(
//!     Contract::new("Vault").function(
//!         Function::new("total")
//!             .visibility(Visibility::Public)
//!             .returns(Type::named("uint"))
//!             .statement(Statement::returns("0")),
//!     ),
//! );
//! assert_eq!(unit.definitions.contracts[0].functions().count(), 1);
//! ```

mod contract;
mod declarations;
mod function;
mod statement;
mod types;
mod unit;

pub use contract::{Contract, Interface};
pub use declarations::{Enumeration, ErrorDefinition, Event, Field, LocalField, Structure};
pub use function::{DataLocation, Function, Modifier, Parameter, StateMutability, Visibility};
pub use statement::{Branch, Conditional, Statement};
pub use types::Type;
pub use unit::{Definitions, Import, SourceUnit};
