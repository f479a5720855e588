//! Player YAML generator
//!
//! Regenerates a template document with a caller's selections baked in.
//! Every call re-parses `GameTemplate::raw_yaml` into a fresh node tree, so
//! the template itself is never touched and repeated calls give the same
//! output.
//!
//! Weighted options are rewritten in place: the selected key gets
//! [`SELECTED_WEIGHT`] and every sibling gets `0`. Dictionary and scalar
//! options have their node replaced; list options only when a list was
//! selected. A tag on an option node (`key: !tag ...`) is kept and the
//! tagged value is edited.

use crate::models::{GameTemplate, OptionType, RandomizerOption, TemplateError, TemplateResult};
use crate::parser::classifier::normalize_key;
use crate::parser::node::{parse_document, parse_int, to_yaml_string, Mapping, Node};
use serde_yaml::Value;

/// Weight written for the selected value
pub const SELECTED_WEIGHT: i64 = 50;

/// Generate a player file from `template`'s current selections
///
/// The output keeps every key, its order and every value outside the
/// rewritten options, but not the template's comments, blank lines or
/// quoting style: the document is re-serialized from its parsed tree.
pub fn generate_player_yaml(template: &GameTemplate, player_name: &str) -> TemplateResult<String> {
    generate_player_yaml_with(template, player_name, |_| {})
}

/// Like [`generate_player_yaml`], with a hook that may edit the top-level
/// mapping (e.g. override `description`) before options are applied
pub fn generate_player_yaml_with<F>(
    template: &GameTemplate,
    player_name: &str,
    mutate_top_level: F,
) -> TemplateResult<String>
where
    F: FnOnce(&mut Mapping),
{
    let mut root = parse_document(&template.raw_yaml)?;
    let top = root.as_mapping_mut().ok_or(TemplateError::NotAMapping)?;

    top.set("name", Node::string(player_name));
    mutate_top_level(top);

    match top.get_mut(&template.game_name).and_then(Node::as_mapping_mut) {
        Some(game_block) => {
            for option in &template.options {
                apply_option(game_block, option);
            }
        }
        None if !template.options.is_empty() => {
            return Err(TemplateError::GameBlockMissing(template.game_name.clone()));
        }
        None => {}
    }

    // serde_yaml never emits anchors or aliases
    to_yaml_string(root)
}

/// Rewrite one option's node inside the game block
fn apply_option(game_block: &mut Mapping, option: &RandomizerOption) {
    let Some(node) = game_block.get_mut(&option.display_name) else {
        tracing::debug!(option = %option.key_path, "option no longer in document, skipping");
        return;
    };
    let node = node.untagged_mut();

    match option.option_type {
        OptionType::EnumWeighted => {
            let selected = option.selected_value.as_deref().map(str::trim);
            with_weight_mapping(node, option, |mapping| {
                set_weights(mapping, |key| selected == Some(key))
            });
        }
        OptionType::BooleanWeighted => {
            let selected = option.selected_value.as_deref().map(normalize_key);
            with_weight_mapping(node, option, |mapping| {
                set_weights(mapping, |key| selected.as_deref() == Some(normalize_key(key).as_str()))
            });
        }
        OptionType::NumericWeighted => {
            with_weight_mapping(node, option, |mapping| apply_numeric(mapping, option));
        }
        OptionType::List => {
            // item names are written as strings, so `'10'` never turns into 10
            if !option.selected_list.is_empty() {
                *node = Node::Sequence(option.selected_list.iter().map(Node::string).collect());
            } else if node.as_sequence().is_none() {
                *node = Node::Sequence(option.default_list.iter().map(Node::string).collect());
            }
        }
        OptionType::Dictionary => {
            *node = Node::Mapping(
                option
                    .effective_dictionary()
                    .iter()
                    .map(|(k, v)| (scalar_node(k), scalar_node(v)))
                    .collect(),
            );
        }
        OptionType::PassThrough => {
            let value = option.selected_value.clone().unwrap_or_default();
            if node.scalar_text().as_deref() != Some(value.as_str()) {
                *node = scalar_node(&value);
            }
        }
    }
}

/// Run `edit` on the option's live mapping, rebuilding it from the option's
/// own keys when the document no longer holds a mapping there
fn with_weight_mapping<F>(node: &mut Node, option: &RandomizerOption, edit: F)
where
    F: FnOnce(&mut Mapping),
{
    match node {
        Node::Mapping(mapping) => edit(mapping),
        other => {
            tracing::debug!(
                option = %option.key_path,
                found = other.kind(),
                "weighted option is not a mapping, rebuilding it"
            );
            let mut mapping: Mapping = option
                .weights
                .iter()
                .chain(option.specials.iter())
                .map(|(k, w)| (scalar_node(k), Node::int(*w)))
                .collect();
            edit(&mut mapping);
            *other = Node::Mapping(mapping);
        }
    }
}

fn set_weights<F>(mapping: &mut Mapping, is_selected: F)
where
    F: Fn(&str) -> bool,
{
    for (key, value) in mapping.iter_mut() {
        let text = key.scalar_text().unwrap_or_default();
        let weight = if is_selected(&text) { SELECTED_WEIGHT } else { 0 };
        *value = Node::int(weight);
    }
}

fn apply_numeric(mapping: &mut Mapping, option: &RandomizerOption) {
    let mut matched = false;

    for (key, value) in mapping.iter_mut() {
        let text = key.scalar_text().unwrap_or_default();
        let weight = match parse_int(&text) {
            Some(number) => {
                let hit = option.selected_number == Some(number);
                matched |= hit;
                if hit {
                    SELECTED_WEIGHT
                } else {
                    0
                }
            }
            None if option.use_random && option.specials.contains_key(&text) => SELECTED_WEIGHT,
            None => 0,
        };
        *value = Node::int(weight);
    }

    if let Some(number) = option.selected_number {
        if !matched {
            mapping.insert(Node::int(number), Node::int(SELECTED_WEIGHT));
        }
    }
}

/// Scalar node for caller-supplied text, typed the way YAML would read it
/// so numbers and booleans stay unquoted
fn scalar_node(text: &str) -> Node {
    match serde_yaml::from_str::<Value>(text) {
        Ok(value @ (Value::Bool(_) | Value::Number(_))) => Node::from(value),
        _ => Node::string(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_template;
    use crate::parser::node::Scalar;
    use indexmap::IndexMap;

    const TEMPLATE: &str = r#"name: Player{number}
description: Test template
game: TestGame
requires:
  version: 0.6.4
TestGame:
  goal:
    elevator: 50
    challenge: 0
    box: 10
  hints:
    true: 10
    false: 5
  lasers:
    # Minimum value is 1
    # Maximum value is 11
    7: 50
    random: 0
    random-low: 0
  local_items:
    - Sword
  start_inventory: {}
  note: keep me
"#;

    fn node_at<'a>(root: &'a Node, path: &[&str]) -> &'a Node {
        path.iter().fold(root, |node, key| {
            node.as_mapping()
                .and_then(|m| m.get(key))
                .unwrap_or_else(|| panic!("missing key {}", key))
        })
    }

    fn weight(root: &Node, path: &[&str]) -> i64 {
        node_at(root, path)
            .as_scalar()
            .and_then(|s| s.as_int())
            .unwrap()
    }

    #[test]
    fn test_name_replaced() {
        let template = parse_template(TEMPLATE).unwrap();
        let out = generate_player_yaml(&template, "Runner01").unwrap();
        let root = parse_document(&out).unwrap();
        assert_eq!(node_at(&root, &["name"]).scalar_text().as_deref(), Some("Runner01"));
    }

    #[test]
    fn test_enum_selection_exclusive() {
        let mut template = parse_template(TEMPLATE).unwrap();
        template.get_option_mut("TestGame.goal").unwrap().selected_value = Some("challenge".to_string());

        let root = parse_document(&generate_player_yaml(&template, "P").unwrap()).unwrap();
        assert_eq!(weight(&root, &["TestGame", "goal", "challenge"]), 50);
        assert_eq!(weight(&root, &["TestGame", "goal", "elevator"]), 0);
        assert_eq!(weight(&root, &["TestGame", "goal", "box"]), 0);
    }

    #[test]
    fn test_boolean_selection() {
        let mut template = parse_template(TEMPLATE).unwrap();
        template.get_option_mut("TestGame.hints").unwrap().selected_value = Some("False".to_string());

        let root = parse_document(&generate_player_yaml(&template, "P").unwrap()).unwrap();
        assert_eq!(weight(&root, &["TestGame", "hints", "false"]), 50);
        assert_eq!(weight(&root, &["TestGame", "hints", "true"]), 0);
    }

    #[test]
    fn test_numeric_existing_key() {
        let template = parse_template(TEMPLATE).unwrap();
        let root = parse_document(&generate_player_yaml(&template, "P").unwrap()).unwrap();
        assert_eq!(weight(&root, &["TestGame", "lasers", "7"]), 50);
        assert_eq!(weight(&root, &["TestGame", "lasers", "random"]), 0);
        assert_eq!(weight(&root, &["TestGame", "lasers", "random-low"]), 0);
    }

    #[test]
    fn test_numeric_inserts_missing_key() {
        let mut template = parse_template(TEMPLATE).unwrap();
        template.get_option_mut("TestGame.lasers").unwrap().selected_number = Some(9);

        let root = parse_document(&generate_player_yaml(&template, "P").unwrap()).unwrap();
        let lasers = node_at(&root, &["TestGame", "lasers"]).as_mapping().unwrap();
        assert_eq!(lasers.keys(), vec!["7", "random", "random-low", "9"]);
        assert_eq!(weight(&root, &["TestGame", "lasers", "9"]), 50);
        assert_eq!(weight(&root, &["TestGame", "lasers", "7"]), 0);
    }

    #[test]
    fn test_numeric_use_random() {
        let mut template = parse_template(TEMPLATE).unwrap();
        let lasers = template.get_option_mut("TestGame.lasers").unwrap();
        lasers.use_random = true;
        lasers.selected_number = None;

        let root = parse_document(&generate_player_yaml(&template, "P").unwrap()).unwrap();
        assert_eq!(weight(&root, &["TestGame", "lasers", "random"]), 50);
        assert_eq!(weight(&root, &["TestGame", "lasers", "random-low"]), 50);
        assert_eq!(weight(&root, &["TestGame", "lasers", "7"]), 0);
        assert_eq!(node_at(&root, &["TestGame", "lasers"]).as_mapping().unwrap().len(), 3);
    }

    #[test]
    fn test_list_dictionary_and_scalar() {
        let mut template = parse_template(TEMPLATE).unwrap();
        template.get_option_mut("TestGame.local_items").unwrap().selected_list =
            vec!["Bow".to_string(), "Hookshot".to_string()];
        let mut inventory = IndexMap::new();
        inventory.insert("Potion".to_string(), "3".to_string());
        template.get_option_mut("TestGame.start_inventory").unwrap().selected_dictionary = Some(inventory);
        template.get_option_mut("TestGame.note").unwrap().selected_value = Some("changed".to_string());

        let root = parse_document(&generate_player_yaml(&template, "P").unwrap()).unwrap();
        let items: Vec<String> = node_at(&root, &["TestGame", "local_items"])
            .as_sequence()
            .unwrap()
            .iter()
            .filter_map(Node::scalar_text)
            .collect();
        assert_eq!(items, vec!["Bow", "Hookshot"]);
        assert_eq!(weight(&root, &["TestGame", "start_inventory", "Potion"]), 3);
        assert_eq!(
            node_at(&root, &["TestGame", "note"]).scalar_text().as_deref(),
            Some("changed")
        );
    }

    #[test]
    fn test_list_falls_back_to_default() {
        let template = parse_template(TEMPLATE).unwrap();
        let root = parse_document(&generate_player_yaml(&template, "P").unwrap()).unwrap();
        let items = node_at(&root, &["TestGame", "local_items"]).as_sequence().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].scalar_text().as_deref(), Some("Sword"));
    }

    const QUOTED_ITEMS: &str = "game: G\nG:\n  items: ['10', 'true', Sword]\n";

    fn item_scalars(out: &str) -> Vec<Scalar> {
        let root = parse_document(out).unwrap();
        node_at(&root, &["G", "items"])
            .as_sequence()
            .unwrap()
            .iter()
            .filter_map(|n| n.as_scalar().cloned())
            .collect()
    }

    #[test]
    fn test_unselected_list_keeps_item_types() {
        let template = parse_template(QUOTED_ITEMS).unwrap();
        let out = generate_player_yaml(&template, "P").unwrap();

        assert_eq!(
            item_scalars(&out),
            vec![Scalar::string("10"), Scalar::string("true"), Scalar::string("Sword")]
        );
        assert!(out.contains("'10'"));
        assert!(out.contains("'true'"));
    }

    #[test]
    fn test_selected_list_items_written_as_strings() {
        let mut template = parse_template(QUOTED_ITEMS).unwrap();
        template.get_option_mut("G.items").unwrap().selected_list =
            vec!["12".to_string(), "false".to_string()];

        let out = generate_player_yaml(&template, "P").unwrap();
        assert_eq!(item_scalars(&out), vec![Scalar::string("12"), Scalar::string("false")]);
    }

    #[test]
    fn test_pass_through_without_value_is_empty_string() {
        let mut template = parse_template(TEMPLATE).unwrap();
        template.get_option_mut("TestGame.note").unwrap().selected_value = None;

        let out = generate_player_yaml(&template, "P").unwrap();
        assert!(out.contains("note: ''"));
        let root = parse_document(&out).unwrap();
        assert_eq!(node_at(&root, &["TestGame", "note"]), &Node::string(""));
    }

    #[test]
    fn test_tagged_options_keep_their_tag() {
        let raw = "game: G\nG:\n  weird: !custom value\n  goal: !choice\n    a: 10\n    b: 0\n";
        let mut template = parse_template(raw).unwrap();
        template.get_option_mut("G.goal").unwrap().selected_value = Some("b".to_string());

        let unchanged = generate_player_yaml(&template, "P").unwrap();
        assert!(unchanged.contains("weird: !custom value"));

        template.get_option_mut("G.weird").unwrap().selected_value = Some("other".to_string());
        let out = generate_player_yaml(&template, "P").unwrap();
        assert!(out.contains("weird: !custom other"));
        assert!(out.contains("!choice"));

        let root = parse_document(&out).unwrap();
        let goal = node_at(&root, &["G", "goal"]).untagged().as_mapping().unwrap();
        assert_eq!(goal.scalar("a").as_deref(), Some("0"));
        assert_eq!(goal.scalar("b").as_deref(), Some("50"));
    }

    #[test]
    fn test_comments_are_not_carried_over() {
        let template = parse_template(TEMPLATE).unwrap();
        let out = generate_player_yaml(&template, "P").unwrap();

        assert!(!out.contains("Minimum value is 1"));
        let root = parse_document(&out).unwrap();
        let original = parse_document(&template.raw_yaml).unwrap();
        assert_eq!(node_at(&root, &["requires"]), node_at(&original, &["requires"]));
        assert_eq!(
            node_at(&root, &["TestGame"]).as_mapping().unwrap().keys(),
            node_at(&original, &["TestGame"]).as_mapping().unwrap().keys()
        );
    }

    #[test]
    fn test_top_level_mutator() {
        let template = parse_template(TEMPLATE).unwrap();
        let out = generate_player_yaml_with(&template, "P", |top| {
            top.set("description", Node::string("Race seed 12"));
        })
        .unwrap();
        let root = parse_document(&out).unwrap();
        assert_eq!(
            node_at(&root, &["description"]).scalar_text().as_deref(),
            Some("Race seed 12")
        );
    }

    #[test]
    fn test_removed_option_is_skipped() {
        let mut template = parse_template(TEMPLATE).unwrap();
        template.raw_yaml = template.raw_yaml.replace("  note: keep me\n", "");
        let out = generate_player_yaml(&template, "P").unwrap();
        assert!(!out.contains("note"));
    }

    #[test]
    fn test_missing_game_block_is_consistency_error() {
        let mut template = parse_template(TEMPLATE).unwrap();
        template.raw_yaml = "name: x\ngame: TestGame\n".to_string();
        let err = generate_player_yaml(&template, "P").unwrap_err();
        assert!(matches!(err, TemplateError::GameBlockMissing(ref g) if g == "TestGame"));
    }

    #[test]
    fn test_missing_game_block_without_options() {
        let template = parse_template("game: Empty\nname: someone\n").unwrap();
        let out = generate_player_yaml(&template, "Runner").unwrap();
        assert!(out.contains("name: Runner"));
    }

    #[test]
    fn test_generation_is_idempotent_and_pure() {
        let mut template = parse_template(TEMPLATE).unwrap();
        template.get_option_mut("TestGame.lasers").unwrap().selected_number = Some(3);
        let before = template.clone();

        let first = generate_player_yaml(&template, "P").unwrap();
        let second = generate_player_yaml(&template, "P").unwrap();
        assert_eq!(first, second);
        assert_eq!(template, before);
    }

    #[test]
    fn test_weighted_option_rebuilt_when_node_changed_shape() {
        let mut template = parse_template(TEMPLATE).unwrap();
        template.raw_yaml = template.raw_yaml.replace(
            "  goal:\n    elevator: 50\n    challenge: 0\n    box: 10\n",
            "  goal: elevator\n",
        );
        template.get_option_mut("TestGame.goal").unwrap().selected_value = Some("box".to_string());

        let root = parse_document(&generate_player_yaml(&template, "P").unwrap()).unwrap();
        assert_eq!(weight(&root, &["TestGame", "goal", "box"]), 50);
        assert_eq!(weight(&root, &["TestGame", "goal", "elevator"]), 0);
    }

    #[test]
    fn test_scalar_node_typing() {
        assert_eq!(scalar_node("12"), Node::int(12));
        assert_eq!(scalar_node("Value4"), Node::string("Value4"));
        assert_eq!(scalar_node("a: b"), Node::string("a: b"));
    }
}
