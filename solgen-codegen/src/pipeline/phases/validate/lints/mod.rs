//! Built-in lint implementations.

mod contract_count;
mod declaration_order;
mod duplicate_type;
mod mapping_aspect;

pub use contract_count::ContractCountLint;
pub use declaration_order::DeclarationOrderLint;
pub use duplicate_type::DuplicateTypeLint;
pub use mapping_aspect::MappingAspectLint;
