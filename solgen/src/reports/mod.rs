//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target.

mod check;
mod generate;
mod inspect;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateReport, GenerationResult, PreviewResult, WrittenResult};
pub use inspect::{InspectReport, UnitSummary};
#[cfg(test)]
pub use output::RecordedOutput;
pub use output::{Output, Report, TerminalOutput};
use solgen_codegen::pipeline::{Diagnostic, Severity};

/// Errors and warnings go to the problem stream, infos to regular output.
fn render_diagnostics(out: &mut dyn Output, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let mut text = format!("{}: {}", diag.severity, diag.message);
        if let Some(location) = &diag.location {
            text.push_str(&format!("\n  --> {}", location));
        }
        match diag.severity {
            Severity::Error | Severity::Warning => out.problem(&text),
            Severity::Info => out.preformatted(&text),
        }
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}
