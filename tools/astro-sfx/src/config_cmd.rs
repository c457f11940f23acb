//! Config command - write a default config file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use astro_audio::AudioConfig;
use clap::{Args, Subcommand};

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a config file with default values
    Init {
        /// Destination (defaults to the --config path)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command
pub fn execute(args: &ConfigArgs, config_path: &Path) -> Result<()> {
    match &args.action {
        ConfigAction::Init { path, force } => {
            let path = path.as_deref().unwrap_or(config_path);
            init(path, *force)
        }
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    astro_audio::config::save(path, &AudioConfig::default())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("astro-sfx.toml");

        init(&path, false).unwrap();
        let loaded = astro_audio::config::load(&path).unwrap();
        assert_eq!(loaded, AudioConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("astro-sfx.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(init(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        init(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[trigger]"));
    }
}
