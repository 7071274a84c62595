//! autorepair init command

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::Args;

use shared::config::AgentConfig;

#[derive(Debug, Args)]
pub struct InitCommand {
    /// File to write
    #[arg(default_value = "autorepair.json")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        write_default(&self.path, self.force)?;
        println!("✓ Wrote default configuration to {}", self.path.display());
        Ok(())
    }
}

fn write_default(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    AgentConfig::default().write_json(path)?;
    Ok(())
}
