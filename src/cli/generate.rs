use crate::config::AppConfig;
use crate::generator::generate_player_yaml_with;
use crate::parser::{parse_from_file_with, Node};
use crate::services::{apply_selections, sanitize, write_text};
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub struct GenerateArgs<'a> {
    pub template: &'a Path,
    pub player: &'a str,
    pub selections: &'a [String],
    pub description: Option<&'a str>,
    pub out: Option<PathBuf>,
}

pub fn run(args: GenerateArgs<'_>) -> Result<()> {
    let config = AppConfig::load()?;
    let mut template = parse_from_file_with(args.template, config.parse_options())?;
    apply_selections(&mut template, args.selections)?;

    let yaml = generate_player_yaml_with(&template, args.player, |top| {
        if let Some(description) = args.description {
            top.set("description", Node::string(description));
        }
    })
    .with_context(|| format!("Failed to generate YAML for {}", args.player))?;

    let out = args.out.or_else(|| {
        config
            .output_path
            .as_ref()
            .map(|dir| dir.join(format!("{}.yaml", sanitize(args.player))))
    });

    match out {
        Some(path) => {
            write_text(&path, &yaml)?;
            println!(
                "{}",
                format!("✅ Wrote {} for {}", path.display(), args.player).green()
            );
        }
        None => print!("{}", yaml),
    }

    Ok(())
}
