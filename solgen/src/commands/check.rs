use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use solgen_model::resolve_models;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
    settings::{self, Overrides},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Root model file (.toml or .json)
    pub model: PathBuf,

    /// Path to solgen.toml (defaults to ./solgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let config = settings::resolve(self.config.as_deref(), Path::new("."), &Overrides::default())
            .unwrap_or_exit();
        let models = resolve_models(&self.model).unwrap_or_exit();

        let report = ops::check(models, &config, &self.model);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
