//! Race service - team assignment and per-team export of player files

use super::template_service::write_text;
use crate::generator::generate_player_yaml;
use crate::models::{GameTemplate, RacePlan, Racer, Team};
use crate::Result;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Deal racers onto teams in order: first racer to the first team, second to
/// the second, wrapping around. Does nothing without teams.
pub fn assign_round_robin(teams: &mut [Team], racers: &[Racer]) {
    if teams.is_empty() {
        return;
    }
    let count = teams.len();
    for (i, racer) in racers.iter().enumerate() {
        teams[i % count].racers.push(racer.clone());
    }
}

/// Remove characters that are not allowed in file names and trim the rest
pub fn sanitize(name: &str) -> String {
    const INVALID: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
    name.chars()
        .filter(|c| !c.is_control() && !INVALID.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// `Team 1`, `Team 2`, ...
pub fn default_team_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Team {}", i)).collect()
}

/// Parse a players list: one `Name: Game` per line, `#` comments and blank
/// lines ignored
pub fn parse_players(content: &str) -> Result<Vec<Racer>> {
    let mut racers = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (name, game) = line
            .split_once(':')
            .with_context(|| format!("Line {}: expected 'Name: Game', got '{}'", index + 1, line))?;
        let (name, game) = (name.trim(), game.trim());
        if name.is_empty() || game.is_empty() {
            anyhow::bail!("Line {}: player name and game must not be empty", index + 1);
        }
        racers.push(Racer::new(name, game));
    }
    Ok(racers)
}

impl RacePlan {
    /// Build teams from names and deal out every racer whose game has a
    /// template; the rest are kept as unassigned
    pub fn build(
        team_names: &[String],
        racers: &[Racer],
        templates: BTreeMap<String, GameTemplate>,
    ) -> Self {
        let (playable, unassigned): (Vec<Racer>, Vec<Racer>) = racers
            .iter()
            .cloned()
            .partition(|r| templates.contains_key(&r.game));

        for racer in &unassigned {
            tracing::warn!(racer = %racer.name, game = %racer.game, "no template for game");
        }

        let mut teams: Vec<Team> = team_names.iter().map(Team::new).collect();
        assign_round_robin(&mut teams, &playable);

        let unassigned_racers = if teams.is_empty() {
            racers.to_vec()
        } else {
            unassigned
        };

        RacePlan {
            teams,
            unassigned_racers,
            templates_by_game: templates,
        }
    }

    pub fn export(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        export_player_yamls(output_dir, &self.teams, &self.templates_by_game)
    }
}

/// Write `<output_dir>/<team>/<racer>.yaml` for every racer with a template
///
/// Selections must already be set on the templates. Returns the written
/// paths in team order.
pub fn export_player_yamls(
    output_dir: &Path,
    teams: &[Team],
    templates: &BTreeMap<String, GameTemplate>,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output folder {}", output_dir.display()))?;

    let mut written = Vec::new();
    for team in teams {
        let team_dir = output_dir.join(sanitize(&team.name));
        std::fs::create_dir_all(&team_dir)?;

        for racer in &team.racers {
            let Some(template) = templates.get(&racer.game) else {
                tracing::debug!(racer = %racer.name, game = %racer.game, "no template, skipping");
                continue;
            };

            let yaml = generate_player_yaml(template, &racer.name)
                .with_context(|| format!("Failed to generate YAML for {}", racer.name))?;
            let file = team_dir.join(format!("{}.yaml", sanitize(&racer.name)));
            write_text(&file, &yaml)?;
            tracing::info!(file = %file.display(), "wrote player file");
            written.push(file);
        }
    }

    Ok(written)
}
