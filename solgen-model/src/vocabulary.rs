//! Qualified aspect names and property keys understood by the generator.

/// Marks the structure that becomes the model's contract.
pub const CONTRACT_TYPE: &str = "Solidity.ContractType";
/// Boolean property of [`CONTRACT_TYPE`].
pub const IS_CONTRACT: &str = "isContract";

/// Attaches a state-transition diagram to a contract structure.
pub const STATE_BEHAVIOR: &str = "Solidity.StateBehavior";
/// Path property of [`STATE_BEHAVIOR`], relative to the model file.
pub const DIAGRAM: &str = "diagram";

/// Marks a field as able to receive value transfers.
pub const PAYABLE: &str = "Solidity.Payable";

/// Turns a domain event into an error declaration.
pub const ERROR: &str = "Solidity.Error";

/// Turns an operation into a modifier.
pub const MODIFIER: &str = "Solidity.Modifier";

/// Overrides a field type with `mapping(key => value)`.
pub const MAPPING: &str = "Solidity.Mapping";
pub const MAPPING_KEY: &str = "key";
pub const MAPPING_VALUE: &str = "value";
