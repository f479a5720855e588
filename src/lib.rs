// raceconfig - randomizer template classifier and player YAML generator
// Reads game option templates, lets racers pick options, writes per-player files

pub mod cli;
pub mod config;
pub mod generator;
pub mod models;
pub mod parser;
pub mod services;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use config::AppConfig;
pub use generator::{generate_player_yaml, generate_player_yaml_with};
pub use models::{GameTemplate, OptionType, RacePlan, RandomizerOption, TemplateError};
pub use parser::{parse_from_file, parse_template};
