//! Splices separately compiled state-machine behavior into a contract.
//!
//! A contract structure may reference a state-transition diagram. The
//! diagram is compiled into a contract fragment with a single dispatch
//! function; [`merge_behavior`] copies the fragment into the mapped
//! contract and then [`optimize_contract`] moves each dispatch branch body
//! into the operation it names.

mod compiler;
mod dispatch;
mod splice;

use std::path::{Path, PathBuf};

pub use compiler::{CompiledBehavior, DiagramCompiler, Transition};
pub use dispatch::{
    DISPATCH_FUNCTION, DISPATCH_MARKER, DispatchTarget, RewriteReport, UnmatchReason,
    UnmatchedBranch, optimize_contract, parse_dispatch_condition,
};
use eyre::Result;
use solgen_ast::Contract;
pub use splice::splice;
use tracing::{debug, info};

/// What happened when merging a diagram into one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The diagram file does not exist; the contract is unchanged.
    DiagramMissing,
    /// The compiled fragment declares no contract with the target's name.
    NoMatchingContract,
    /// Fields and functions were spliced and the dispatcher rewritten.
    Merged {
        transitions: Vec<Transition>,
        rewrite: RewriteReport,
    },
}

/// Record of one behavior merge, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub contract: String,
    pub diagram: PathBuf,
    pub outcome: MergeOutcome,
}

/// Merge the behavior described by `diagram` into `contract`.
///
/// Errors come only from the compiler failing on an existing diagram.
pub fn merge_behavior(
    contract: &mut Contract,
    diagram: &Path,
    compiler: &dyn DiagramCompiler,
) -> Result<MergeReport> {
    let name = contract.name.clone();
    let report = |outcome| MergeReport {
        contract: name.clone(),
        diagram: diagram.to_path_buf(),
        outcome,
    };

    let Some(compiled) = compiler.compile(diagram, &contract.name)? else {
        debug!(diagram = %diagram.display(), "diagram not found, keeping mapped contract");
        return Ok(report(MergeOutcome::DiagramMissing));
    };

    if !splice(contract, &compiled.fragment) {
        debug!(contract = %contract.name, "compiled fragment has no matching contract");
        return Ok(report(MergeOutcome::NoMatchingContract));
    }

    let rewrite = optimize_contract(contract);
    for branch in &rewrite.unmatched {
        debug!(
            contract = %contract.name,
            condition = %branch.condition,
            reason = %branch.reason,
            "dispatch branch left unchanged"
        );
    }
    info!(
        contract = %contract.name,
        transitions = compiled.transitions.len(),
        rewritten = rewrite.rewritten.len(),
        "merged state behavior"
    );

    Ok(report(MergeOutcome::Merged {
        transitions: compiled.transitions,
        rewrite,
    }))
}
