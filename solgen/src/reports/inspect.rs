//! Inspect command report data structures.

use super::output::{Output, Report};

/// The lowered target AST, as JSON or as a summary.
#[derive(Debug)]
pub enum InspectReport {
    Json(String),
    Text(Vec<UnitSummary>),
}

/// One source unit, one line per definition.
#[derive(Debug)]
pub struct UnitSummary {
    /// Unit name.
    pub name: String,
    /// Model file the unit came from.
    pub origin: String,
    pub definitions: Vec<String>,
    /// Merged state behaviors, one line each.
    pub behaviors: Vec<String>,
}

impl Report for InspectReport {
    fn render(&self, out: &mut dyn Output) {
        match self {
            Self::Json(json) => out.preformatted(json),
            Self::Text(units) => {
                for (i, unit) in units.iter().enumerate() {
                    if i > 0 {
                        out.newline();
                    }
                    out.section(&format!("{} ({})", unit.name, unit.origin));
                    for line in unit.definitions.iter().chain(&unit.behaviors) {
                        out.list_item(line);
                    }
                }
            }
        }
    }
}
