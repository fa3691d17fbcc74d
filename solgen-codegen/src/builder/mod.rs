//! Code generation building blocks.
//!
//! Nodes implement [`Renderable`] to describe themselves as
//! [`CodeFragment`]s; [`CodeBuilder`] turns those into indented text.

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
