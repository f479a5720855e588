//! Service layer for raceconfig
//!
//! File-system access, selection binding and race export. The CLI commands
//! are thin wrappers around these functions.

pub mod race_service;
pub mod selection_service;
pub mod template_service;

pub use race_service::{
    assign_round_robin, default_team_names, export_player_yamls, parse_players, sanitize,
};
pub use selection_service::{apply_selection, apply_selections, parse_assignment};
pub use template_service::{
    discover_templates, load_templates, read_text, write_text, TemplateFile,
};
