//! Language-agnostic generation machinery for solgen.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`mapper`] - Pure conversion of domain elements into target syntax nodes
//! - [`classify`] - Decides which syntax shape a structure becomes
//! - [`behavior`] - Splices compiled state-machine behavior into contracts
//! - [`traverse`] - Handler registry and the depth-first lowering walk
//! - [`pipeline`] - Phases, plugins and diagnostics around the lowering walk
//! - [`generation`] - Serializers and the registry of files to write
//! - [`language`] - Parser, printer and generator traits for a target language
//! - [`testing`] - Test utilities (feature-gated)

pub mod behavior;
pub mod builder;
pub mod classify;
pub mod generation;
pub mod language;
pub mod mapper;
pub mod pipeline;
pub mod traverse;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
