use crate::config::AppConfig;
use crate::models::{GameTemplate, OptionType};
use crate::parser::parse_from_file_with;
use crate::Result;
use colored::Colorize;
use std::path::Path;

pub fn run(path: &Path, json: bool) -> Result<()> {
    let config = AppConfig::load()?;
    let template = parse_from_file_with(path, config.parse_options())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&template)?);
        return Ok(());
    }

    print_template(&template);
    Ok(())
}

fn print_template(template: &GameTemplate) {
    println!("{}", format!("🎮 {}", template.game_name).cyan().bold());
    if let Some(description) = &template.description {
        println!("   Description: {}", description);
    }
    if let Some(version) = &template.required_version {
        println!("   Requires:    {}", version);
    }
    if let Some(name) = &template.default_player_name {
        println!("   Player:      {}", name);
    }
    println!();

    if template.options.is_empty() {
        println!("{}", "No options found.".yellow());
        return;
    }

    println!("{}", format!("Options ({}):", template.options.len()).green().bold());
    for option in &template.options {
        let kind = format!("[{}]", option.option_type);
        println!(
            "   • {} {} = {}",
            option.display_name.bold(),
            kind.bright_black(),
            option.selection_summary()
        );

        match option.option_type {
            OptionType::NumericWeighted => {
                if let (Some(min), Some(max)) = (option.min, option.max) {
                    println!("       range {}..={}", min, max);
                }
                if !option.specials.is_empty() {
                    let specials: Vec<&str> = option.specials.keys().map(String::as_str).collect();
                    println!("       specials: {}", specials.join(", "));
                }
            }
            OptionType::EnumWeighted | OptionType::BooleanWeighted => {
                let choices: Vec<String> = option
                    .weights
                    .iter()
                    .map(|(k, w)| format!("{} ({})", k, w))
                    .collect();
                println!("       choices: {}", choices.join(", "));
            }
            _ => {}
        }
    }
}
