//! Selection service - binds caller input to option selection fields
//!
//! This is the only place selections are validated; the generator trusts
//! whatever it is given.

use crate::models::{
    GameTemplate, OptionType, RandomizerOption, SelectionError, SelectionResult,
};
use crate::parser::node::parse_int;
use crate::parser::normalize_key;
use indexmap::IndexMap;

/// Value that switches a numeric option to its random selectors
pub const RANDOM_SELECTION: &str = "random";

/// Split `key=value`; the key is trimmed, the value is kept verbatim
pub fn parse_assignment(input: &str) -> SelectionResult<(String, String)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| SelectionError::InvalidAssignment(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(SelectionError::InvalidAssignment(input.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Apply one textual selection to an option
pub fn apply_selection(option: &mut RandomizerOption, value: &str) -> SelectionResult<()> {
    match option.option_type {
        OptionType::EnumWeighted => {
            let value = value.trim();
            if !option.weights.contains_key(value) {
                return Err(unknown_value(option, value));
            }
            option.selected_value = Some(value.to_string());
        }
        OptionType::BooleanWeighted => {
            let wanted = normalize_key(value);
            let key = option
                .weights
                .keys()
                .find(|k| normalize_key(k) == wanted)
                .cloned()
                .ok_or_else(|| unknown_value(option, value))?;
            option.selected_value = Some(key);
        }
        OptionType::NumericWeighted => apply_numeric(option, value.trim())?,
        OptionType::List => {
            option.selected_list = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        OptionType::Dictionary => {
            let mut entries = IndexMap::new();
            for entry in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let (k, v) = entry
                    .split_once(':')
                    .ok_or_else(|| SelectionError::InvalidPair {
                        key_path: option.key_path.clone(),
                        entry: entry.to_string(),
                    })?;
                entries.insert(k.trim().to_string(), v.trim().to_string());
            }
            option.selected_dictionary = Some(entries);
        }
        OptionType::PassThrough => option.selected_value = Some(value.to_string()),
    }
    Ok(())
}

fn apply_numeric(option: &mut RandomizerOption, value: &str) -> SelectionResult<()> {
    if value.eq_ignore_ascii_case(RANDOM_SELECTION) {
        option.use_random = true;
        option.selected_number = None;
        return Ok(());
    }

    let number = parse_int(value).ok_or_else(|| SelectionError::InvalidNumber {
        key_path: option.key_path.clone(),
        value: value.to_string(),
    })?;

    if let (Some(min), Some(max)) = (option.min, option.max) {
        if number < min || number > max {
            return Err(SelectionError::OutOfRange {
                key_path: option.key_path.clone(),
                value: number,
                min,
                max,
            });
        }
    }

    option.selected_number = Some(number);
    option.use_random = false;
    Ok(())
}

fn unknown_value(option: &RandomizerOption, value: &str) -> SelectionError {
    SelectionError::UnknownValue {
        key_path: option.key_path.clone(),
        value: value.to_string(),
        choices: option
            .weights
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Apply `key=value` assignments to a template
///
/// Keys are matched against option names first, then full key paths.
pub fn apply_selections<S: AsRef<str>>(template: &mut GameTemplate, assignments: &[S]) -> SelectionResult<()> {
    for assignment in assignments {
        let (key, value) = parse_assignment(assignment.as_ref())?;
        let option = template
            .find_option_mut(&key)
            .ok_or_else(|| SelectionError::UnknownOption(key.clone()))?;
        apply_selection(option, &value)?;
        tracing::debug!(option = %option.key_path, value = %value, "selection applied");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_template;

    const TEMPLATE: &str = r#"game: G
G:
  goal:
    elevator: 50
    challenge: 0
  hints:
    'true': 0
    'false': 50
  lasers:
    # Minimum value is 1
    # Maximum value is 11
    7: 50
    random: 0
  local_items: []
  start_inventory: {}
  seed_note: hello
"#;

    fn template() -> GameTemplate {
        parse_template(TEMPLATE).unwrap()
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("goal=challenge").unwrap(),
            ("goal".to_string(), "challenge".to_string())
        );
        assert_eq!(
            parse_assignment(" note = a=b").unwrap(),
            ("note".to_string(), " a=b".to_string())
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_enum_selection() {
        let mut template = template();
        apply_selections(&mut template, &["goal=challenge"]).unwrap();
        assert_eq!(
            template.get_option("G.goal").unwrap().selected_value.as_deref(),
            Some("challenge")
        );

        let err = apply_selections(&mut template, &["goal=box"]).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownValue { .. }));
    }

    #[test]
    fn test_boolean_selection_is_case_insensitive() {
        let mut template = template();
        apply_selections(&mut template, &["hints=TRUE"]).unwrap();
        assert_eq!(
            template.get_option("G.hints").unwrap().selected_value.as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_numeric_selection() {
        let mut template = template();
        apply_selections(&mut template, &["G.lasers=9"]).unwrap();
        let lasers = template.get_option("G.lasers").unwrap();
        assert_eq!(lasers.selected_number, Some(9));
        assert!(!lasers.use_random);

        let err = apply_selections(&mut template, &["lasers=12"]).unwrap_err();
        assert_eq!(
            err,
            SelectionError::OutOfRange {
                key_path: "G.lasers".to_string(),
                value: 12,
                min: 1,
                max: 11
            }
        );

        let err = apply_selections(&mut template, &["lasers=many"]).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidNumber { .. }));
    }

    #[test]
    fn test_numeric_random() {
        let mut template = template();
        apply_selections(&mut template, &["lasers=Random"]).unwrap();
        let lasers = template.get_option("G.lasers").unwrap();
        assert!(lasers.use_random);
        assert_eq!(lasers.selected_number, None);
    }

    #[test]
    fn test_list_and_dictionary() {
        let mut template = template();
        apply_selections(
            &mut template,
            &["local_items=Bow, Hookshot,,", "start_inventory=Potion: 3, Arrows:20"],
        )
        .unwrap();

        assert_eq!(
            template.get_option("G.local_items").unwrap().selected_list,
            vec!["Bow", "Hookshot"]
        );
        let inventory = template
            .get_option("G.start_inventory")
            .unwrap()
            .selected_dictionary
            .clone()
            .unwrap();
        assert_eq!(inventory["Potion"], "3");
        assert_eq!(inventory["Arrows"], "20");

        let err = apply_selections(&mut template, &["start_inventory=Potion"]).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidPair { .. }));
    }

    #[test]
    fn test_pass_through_and_unknown_option() {
        let mut template = template();
        apply_selections(&mut template, &["seed_note=bye"]).unwrap();
        assert_eq!(
            template.get_option("G.seed_note").unwrap().selected_value.as_deref(),
            Some("bye")
        );

        let err = apply_selections(&mut template, &["missing=1"]).unwrap_err();
        assert_eq!(err, SelectionError::UnknownOption("missing".to_string()));
    }
}
