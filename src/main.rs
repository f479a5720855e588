use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use raceconfig::cli::config::ConfigCommands;
use raceconfig::cli::generate::GenerateArgs;
use raceconfig::cli::race::RaceArgs;
use raceconfig::Result;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "raceconfig")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Classify randomizer templates and generate player YAML files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the options found in a template
    Inspect {
        /// Template file
        template: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a player file from a template
    Generate {
        /// Template file
        template: PathBuf,

        /// Player name written to `name`
        #[arg(short, long)]
        player: String,

        /// Option selection as key=value (repeatable)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        selections: Vec<String>,

        /// Replace the top-level description
        #[arg(short, long)]
        description: Option<String>,

        /// Output file (prints to stdout when omitted and no output folder is configured)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Split players into teams and write a player file for each
    Race {
        /// Players list, one `Name: Game` per line
        #[arg(short, long)]
        players: PathBuf,

        /// Number of teams
        #[arg(short, long, default_value_t = 2)]
        teams: usize,

        /// Templates folder (defaults to the configured one)
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Output folder (defaults to the configured one, then ./output)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List templates in a folder
    Templates {
        /// Templates folder (defaults to the configured one)
        dir: Option<PathBuf>,
    },

    /// Show or change saved settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "raceconfig=info".into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Inspect { template, json } => raceconfig::cli::inspect::run(&template, json),
        Commands::Generate {
            template,
            player,
            selections,
            description,
            out,
        } => raceconfig::cli::generate::run(GenerateArgs {
            template: &template,
            player: &player,
            selections: &selections,
            description: description.as_deref(),
            out,
        }),
        Commands::Race {
            players,
            teams,
            templates,
            out,
        } => raceconfig::cli::race::run(RaceArgs {
            players,
            teams,
            templates,
            out,
        }),
        Commands::Templates { dir } => raceconfig::cli::templates::run(dir),
        Commands::Config(cmd) => raceconfig::cli::config::run(cmd),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "raceconfig", &mut io::stdout());
            Ok(())
        }
    }
}
