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
pub struct GenerateCommand {
    /// Root model file (.toml or .json)
    pub model: PathBuf,

    /// Output folder; must already exist (defaults to ./contracts)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to solgen.toml (defaults to ./solgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// SPDX license identifier for generated files
    #[arg(long)]
    pub license: Option<String>,

    /// Version constraint for the pragma line
    #[arg(long)]
    pub pragma: Option<String>,

    /// Serializer laying out the files (extended-generation-gap, plain)
    #[arg(short, long)]
    pub serializer: Option<String>,

    /// Preview generated contracts without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            license: self.license.clone(),
            pragma: self.pragma.clone(),
            serializer: self.serializer.clone(),
            output: self.output.clone(),
        }
    }

    pub fn run(&self) -> Result<()> {
        let config = settings::resolve(self.config.as_deref(), Path::new("."), &self.overrides())
            .unwrap_or_exit();
        let models = resolve_models(&self.model).unwrap_or_exit();

        let report = ops::generate(models, &config, self.dry_run)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
