//! Config CLI commands

use crate::config::AppConfig;
use crate::Result;
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,

    /// Remember the templates folder
    SetTemplates {
        /// Folder containing *.yaml templates
        dir: PathBuf,
    },

    /// Remember the output folder
    SetOutput {
        /// Folder generated player files are written to
        dir: PathBuf,
    },

    /// Skip or keep empty option entries when parsing templates
    SkipEmpty {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

pub fn run(cmd: ConfigCommands) -> Result<()> {
    let mut config = AppConfig::load()?;

    match cmd {
        ConfigCommands::Show => {
            let location = AppConfig::default_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            println!("{}", format!("⚙️  Config: {}", location).cyan());
            println!("   templates_path:     {}", display(&config.templates_path));
            println!("   output_path:        {}", display(&config.output_path));
            println!("   skip_empty_entries: {}", config.skip_empty_entries);
            return Ok(());
        }
        ConfigCommands::SetTemplates { dir } => {
            if !dir.is_dir() {
                anyhow::bail!("Not a folder: {}", dir.display());
            }
            config.templates_path = Some(dir);
        }
        ConfigCommands::SetOutput { dir } => config.output_path = Some(dir),
        ConfigCommands::SkipEmpty { enabled } => config.skip_empty_entries = enabled,
    }

    let path = config.save()?;
    println!("{}", format!("✅ Saved {}", path.display()).green());
    Ok(())
}

fn display(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}
