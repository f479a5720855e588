//! Randomizer option model
//!
//! One `RandomizerOption` is produced for every entry under a template's game
//! block. The classifier fills the descriptive fields; callers only touch the
//! `selected_*` fields before generation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of an option block
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    /// Arbitrary named choices with weights
    EnumWeighted,
    /// Exactly the keys `true` and `false`
    BooleanWeighted,
    /// Integer keys, optionally mixed with special selectors like `random`
    NumericWeighted,
    /// A sequence of scalars
    List,
    /// A mapping of free-form entries (only produced for empty mappings)
    Dictionary,
    /// A plain scalar value
    PassThrough,
}

impl OptionType {
    pub fn name(&self) -> &'static str {
        match self {
            OptionType::EnumWeighted => "enum",
            OptionType::BooleanWeighted => "boolean",
            OptionType::NumericWeighted => "numeric",
            OptionType::List => "list",
            OptionType::Dictionary => "dictionary",
            OptionType::PassThrough => "scalar",
        }
    }

    /// Whether the option is rendered as a weight mapping
    pub fn is_weighted(&self) -> bool {
        matches!(
            self,
            OptionType::EnumWeighted | OptionType::BooleanWeighted | OptionType::NumericWeighted
        )
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single configurable option discovered in a template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomizerOption {
    /// `<game>.<key>`, unique within a template
    pub key_path: String,

    /// The raw option key
    pub display_name: String,

    #[serde(rename = "type")]
    pub option_type: OptionType,

    /// Candidate values and their weights (numeric options: numeric keys only)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub weights: IndexMap<String, i64>,

    /// Special selector keys of a numeric option (`random`, `normal`, ...)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub specials: IndexMap<String, i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_numeric: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_list: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub default_dictionary: IndexMap<String, String>,

    // Selection state, written by the caller before generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_number: Option<i64>,

    #[serde(default)]
    pub use_random: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_list: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_dictionary: Option<IndexMap<String, String>>,
}

impl RandomizerOption {
    /// Create an option with every type-specific field left empty
    pub fn new(game_name: &str, key: &str, option_type: OptionType) -> Self {
        Self {
            key_path: format!("{}.{}", game_name, key),
            display_name: key.to_string(),
            option_type,
            weights: IndexMap::new(),
            specials: IndexMap::new(),
            min: None,
            max: None,
            default_numeric: None,
            default_list: Vec::new(),
            default_dictionary: IndexMap::new(),
            selected_value: None,
            selected_number: None,
            use_random: false,
            selected_list: Vec::new(),
            selected_dictionary: None,
        }
    }

    /// A `List` option with the given default entries
    pub fn list(game_name: &str, key: &str, default_list: Vec<String>) -> Self {
        Self {
            default_list,
            ..Self::new(game_name, key, OptionType::List)
        }
    }

    /// A `Dictionary` option with the given default entries
    pub fn dictionary(
        game_name: &str,
        key: &str,
        default_dictionary: IndexMap<String, String>,
    ) -> Self {
        Self {
            default_dictionary,
            selected_dictionary: Some(IndexMap::new()),
            ..Self::new(game_name, key, OptionType::Dictionary)
        }
    }

    /// A `PassThrough` option carrying the scalar's text
    pub fn pass_through(game_name: &str, key: &str, value: impl Into<String>) -> Self {
        Self {
            selected_value: Some(value.into()),
            ..Self::new(game_name, key, OptionType::PassThrough)
        }
    }

    /// Entries that generation will write for a `List` option
    pub fn effective_list(&self) -> &[String] {
        if self.selected_list.is_empty() {
            &self.default_list
        } else {
            &self.selected_list
        }
    }

    /// Entries that generation will write for a `Dictionary` option
    pub fn effective_dictionary(&self) -> &IndexMap<String, String> {
        self.selected_dictionary
            .as_ref()
            .unwrap_or(&self.default_dictionary)
    }

    /// Human-readable summary of the current selection
    pub fn selection_summary(&self) -> String {
        match self.option_type {
            OptionType::EnumWeighted | OptionType::BooleanWeighted | OptionType::PassThrough => {
                self.selected_value.clone().unwrap_or_default()
            }
            OptionType::NumericWeighted => {
                if self.use_random {
                    "random".to_string()
                } else {
                    self.selected_number
                        .map(|n| n.to_string())
                        .unwrap_or_default()
                }
            }
            OptionType::List => format!("[{}]", self.effective_list().join(", ")),
            OptionType::Dictionary => {
                let entries: Vec<String> = self
                    .effective_dictionary()
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
        }
    }
}
