use crate::config::AppConfig;
use crate::models::RacePlan;
use crate::services::{default_team_names, load_templates, parse_players, read_text};
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use std::path::PathBuf;

pub struct RaceArgs {
    pub players: PathBuf,
    pub teams: usize,
    pub templates: Option<PathBuf>,
    pub out: Option<PathBuf>,
}

pub fn run(args: RaceArgs) -> Result<()> {
    if args.teams == 0 {
        anyhow::bail!("At least one team is required");
    }

    let config = AppConfig::load()?;
    let templates_dir = args
        .templates
        .or_else(|| config.templates_path.clone())
        .context("No templates folder given. Use --templates or 'raceconfig config set-templates <DIR>'")?;
    let output_dir = args
        .out
        .or_else(|| config.output_path.clone())
        .unwrap_or_else(|| PathBuf::from("output"));

    let racers = parse_players(&read_text(&args.players)?)?;
    let templates = load_templates(&templates_dir, config.parse_options())?;
    println!(
        "{}",
        format!(
            "🏁 {} racers, {} templates, {} teams",
            racers.len(),
            templates.len(),
            args.teams
        )
        .cyan()
    );

    let plan = RacePlan::build(&default_team_names(args.teams), &racers, templates);
    let written = plan.export(&output_dir)?;

    for team in &plan.teams {
        println!("\n{}", team.name.green().bold());
        for racer in &team.racers {
            println!("   • {} ({})", racer.name, racer.game);
        }
    }

    if !plan.unassigned_racers.is_empty() {
        println!("\n{}", "No template found for:".yellow().bold());
        for racer in &plan.unassigned_racers {
            println!("   • {} ({})", racer.name, racer.game);
        }
    }

    println!(
        "\n{}",
        format!("✅ Wrote {} player files to {}", written.len(), output_dir.display()).green()
    );
    Ok(())
}
