//! Template parser
//!
//! Reads the document header (`game`, `description`, `name`,
//! `requires.version`) and turns every entry under the game block into a
//! [`RandomizerOption`].

use super::classifier::classify;
use super::node::{parse_document, Mapping, Node};
use crate::models::{GameTemplate, RandomizerOption, TemplateError, TemplateResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with option entries that carry no content
/// (`{}`, `[]`, or a blank scalar)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyEntryPolicy {
    /// Keep them as empty dictionary, list and scalar options
    #[default]
    Keep,
    /// Leave them out of the option list
    Skip,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub empty_entries: EmptyEntryPolicy,
}

/// Parse a template file with default options
pub fn parse_from_file(path: impl AsRef<Path>) -> TemplateResult<GameTemplate> {
    parse_from_file_with(path, ParseOptions::default())
}

pub fn parse_from_file_with(path: impl AsRef<Path>, options: ParseOptions) -> TemplateResult<GameTemplate> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "parsing template");
    parse_template_with(&raw, options)
}

/// Parse template text with default options
pub fn parse_template(raw: &str) -> TemplateResult<GameTemplate> {
    parse_template_with(raw, ParseOptions::default())
}

pub fn parse_template_with(raw: &str, options: ParseOptions) -> TemplateResult<GameTemplate> {
    let root = parse_document(raw)?;
    let root = root.as_mapping().ok_or(TemplateError::NotAMapping)?;

    let game_name = root
        .scalar("game")
        .filter(|g| !g.trim().is_empty())
        .ok_or_else(|| TemplateError::MissingField("game".to_string()))?;
    let description = root.scalar("description");
    let default_player_name = root.scalar("name");
    let required_version = root
        .get("requires")
        .and_then(Node::as_mapping)
        .and_then(|requires| requires.scalar("version"));

    let options = match root.get(&game_name).and_then(Node::as_mapping) {
        Some(game_block) => parse_options(raw, &game_name, game_block, options)?,
        None => {
            tracing::debug!(game = %game_name, "template has no option block");
            Vec::new()
        }
    };

    Ok(GameTemplate {
        game_name,
        description,
        required_version,
        default_player_name,
        raw_yaml: raw.to_string(),
        options,
    })
}

fn parse_options(
    raw: &str,
    game_name: &str,
    game_block: &Mapping,
    options: ParseOptions,
) -> TemplateResult<Vec<RandomizerOption>> {
    let mut parsed = Vec::with_capacity(game_block.len());

    for (key_node, node) in game_block.iter() {
        let Some(key) = key_node.scalar_text() else {
            tracing::debug!(game = %game_name, "skipping option with a non-scalar key");
            continue;
        };

        if options.empty_entries == EmptyEntryPolicy::Skip && node.is_empty() {
            tracing::debug!(option = %key, "skipping empty option entry");
            continue;
        }

        // A tag is kept on the document node; the option is read from what it wraps
        let option = match node.untagged() {
            Node::Mapping(mapping) => classify(game_name, &key, mapping, raw),
            Node::Sequence(items) => {
                let default_list = items.iter().filter_map(Node::scalar_text).collect();
                RandomizerOption::list(game_name, &key, default_list)
            }
            Node::Scalar(scalar) => RandomizerOption::pass_through(game_name, &key, scalar.text()),
            Node::Tagged(_) => {
                return Err(TemplateError::MalformedNode(format!("{}.{}", game_name, key)));
            }
        };
        parsed.push(option);
    }

    Ok(parsed)
}
