use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use solgen_model::resolve_models;

use super::UnwrapOrExit;
use crate::{
    ops::{self, inspect::InspectFormat},
    reports::{Report, TerminalOutput},
    settings::{self, Overrides},
};

#[derive(Args)]
pub struct InspectCommand {
    /// Root model file (.toml or .json)
    pub model: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = InspectFormat::Text)]
    pub format: InspectFormat,

    /// Path to solgen.toml (defaults to ./solgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl InspectCommand {
    pub fn run(&self) -> Result<()> {
        let config = settings::resolve(self.config.as_deref(), Path::new("."), &Overrides::default())
            .unwrap_or_exit();
        let models = resolve_models(&self.model).unwrap_or_exit();

        let report = ops::inspect(models, &config, self.format)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
