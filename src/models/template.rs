use super::RandomizerOption;
use serde::{Deserialize, Serialize};

/// A parsed template document for one game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameTemplate {
    /// Value of the top-level `game` field, also the key of the option block
    pub game_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `requires.version`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_version: Option<String>,

    /// Top-level `name` field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_player_name: Option<String>,

    /// Original document text, kept verbatim for regeneration
    #[serde(skip)]
    pub raw_yaml: String,

    /// Options under the game block, in document order
    pub options: Vec<RandomizerOption>,
}

impl GameTemplate {
    /// Look up an option by its `<game>.<key>` path
    pub fn get_option(&self, key_path: &str) -> Option<&RandomizerOption> {
        self.options.iter().find(|o| o.key_path == key_path)
    }

    pub fn get_option_mut(&mut self, key_path: &str) -> Option<&mut RandomizerOption> {
        self.options.iter_mut().find(|o| o.key_path == key_path)
    }

    /// Look up an option by its bare key, falling back to the full key path
    pub fn find_option_mut(&mut self, key: &str) -> Option<&mut RandomizerOption> {
        let index = self
            .options
            .iter()
            .position(|o| o.display_name == key)
            .or_else(|| self.options.iter().position(|o| o.key_path == key))?;
        self.options.get_mut(index)
    }
}
