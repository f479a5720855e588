use crate::config::AppConfig;
use crate::parser::parse_from_file_with;
use crate::services::discover_templates;
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use std::path::PathBuf;

/// List templates in `dir`, or in the remembered templates folder
pub fn run(dir: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load()?;
    let dir = dir
        .or_else(|| config.templates_path.clone())
        .context("No templates folder given. Pass one or run 'raceconfig config set-templates <DIR>'")?;

    println!("{}", format!("📂 Templates in {}", dir.display()).cyan());

    let files = discover_templates(&dir)?;
    if files.is_empty() {
        println!("{}", "No templates found.".yellow());
        return Ok(());
    }

    for file in &files {
        match parse_from_file_with(&file.path, config.parse_options()) {
            Ok(template) => println!(
                "   • {} → {} ({} options)",
                file.display_name,
                template.game_name.green(),
                template.options.len()
            ),
            Err(e) => println!("   • {} {}", file.display_name, format!("({})", e).red()),
        }
    }

    Ok(())
}
