//! Race participants and team layout

use super::GameTemplate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A participant playing one game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Racer {
    pub name: String,

    /// Matches a template's `game_name`
    pub game: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

impl Racer {
    pub fn new(name: impl Into<String>, game: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            game: game.into(),
            tags: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub racers: Vec<Racer>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            racers: Vec::new(),
        }
    }
}

/// Teams, the racers that could not be placed, and the templates by game
#[derive(Debug, Clone, Default)]
pub struct RacePlan {
    pub teams: Vec<Team>,
    pub unassigned_racers: Vec<Racer>,
    pub templates_by_game: BTreeMap<String, GameTemplate>,
}

impl RacePlan {
    /// Total number of racers placed on a team
    pub fn assigned_count(&self) -> usize {
        self.teams.iter().map(|t| t.racers.len()).sum()
    }
}
