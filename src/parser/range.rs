//! Numeric bounds from template comments
//!
//! Templates document slider ranges as comments next to the option, e.g.
//!
//! ```yaml
//! The Witness:
//!   mountain_lasers:
//!     # Minimum value is 1
//!     # Maximum value is 11
//!     7: 50
//! ```
//!
//! The weight keys alone would give `7..=7`, so the comments are scanned to
//! recover the intended bounds.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Number of lines scanned from the option key onwards
const WINDOW_LINES: usize = 80;

fn bound_patterns(side: &str) -> Vec<Regex> {
    let long = if side == "min" { "Minimum" } else { "Maximum" };
    let short = if side == "min" { "Min" } else { "Max" };
    [
        format!(r"{}\s+value\s+is\s+(?P<num>-?\d+)", long),
        format!(r"{}\s*:\s*(?P<num>-?\d+)", long),
        format!(r"{}(?:imum)?\s*(?:value)?\s*:\s*(?P<num>-?\d+)", short),
    ]
    .iter()
    .filter_map(|p| RegexBuilder::new(p).case_insensitive(true).build().ok())
    .collect()
}

fn min_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| bound_patterns("min"))
}

fn max_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| bound_patterns("max"))
}

fn first_match(patterns: &[Regex], window: &str) -> Option<i64> {
    patterns.iter().find_map(|re| {
        re.captures(window)
            .and_then(|caps| caps.name("num"))
            .and_then(|m| m.as_str().parse::<i64>().ok())
    })
}

/// Extract `(min, max)` documented in comments under `game_name.option_key`
///
/// Either side is `None` when no phrasing is found; any lookup failure
/// yields `(None, None)`.
pub fn extract_range(raw_text: &str, game_name: &str, option_key: &str) -> (Option<i64>, Option<i64>) {
    let section = format!(r"(?m)^{}\s*:\s*(?:#.*)?$", regex::escape(game_name));
    let option = format!(r"(?m)^\s*{}\s*:\s*(?:#.*)?$", regex::escape(option_key));
    let (Ok(section_re), Ok(option_re)) = (Regex::new(&section), Regex::new(&option)) else {
        return (None, None);
    };

    let Some(section_match) = section_re.find(raw_text) else {
        return (None, None);
    };
    let search_text = &raw_text[section_match.start()..];

    let Some(option_match) = option_re.find(search_text) else {
        return (None, None);
    };
    let window = search_text[option_match.start()..]
        .lines()
        .take(WINDOW_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    (
        first_match(min_patterns(), &window),
        first_match(max_patterns(), &window),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"name: Player
game: The Witness
The Witness:
  mountain_lasers:
    # The number of lasers required to enter the mountain.
    #
    # You can define additional values between the minimum and maximum values.
    # Minimum value is 1
    # Maximum value is 11
    7: 50
    random: 0
  challenge_lasers:
    # Minimum: 0
    # Maximum: 11
    11: 50
"#;

    #[test]
    fn test_extract_value_is_phrasing() {
        assert_eq!(
            extract_range(TEMPLATE, "The Witness", "mountain_lasers"),
            (Some(1), Some(11))
        );
    }

    #[test]
    fn test_extract_colon_phrasing() {
        assert_eq!(
            extract_range(TEMPLATE, "The Witness", "challenge_lasers"),
            (Some(0), Some(11))
        );
    }

    #[test]
    fn test_min_value_colon_phrasing() {
        let raw = "Game:\n  opt:\n    # Min value: 3\n    # max VALUE: 9\n    5: 50\n";
        assert_eq!(extract_range(raw, "Game", "opt"), (Some(3), Some(9)));
    }

    #[test]
    fn test_missing_game_section() {
        assert_eq!(extract_range(TEMPLATE, "Other Game", "mountain_lasers"), (None, None));
    }

    #[test]
    fn test_missing_option() {
        assert_eq!(extract_range(TEMPLATE, "The Witness", "nope"), (None, None));
    }

    #[test]
    fn test_option_before_game_section_is_ignored() {
        let raw = "opt:\n  # Minimum value is 5\nGame:\n  opt:\n    1: 50\n";
        assert_eq!(extract_range(raw, "Game", "opt"), (None, None));
    }

    #[test]
    fn test_only_one_side_documented() {
        let raw = "Game:\n  opt:\n    # Maximum value is 40\n    10: 50\n";
        assert_eq!(extract_range(raw, "Game", "opt"), (None, Some(40)));
    }

    #[test]
    fn test_window_limit() {
        let mut raw = String::from("Game:\n  opt:\n");
        for i in 0..100 {
            raw.push_str(&format!("    # filler line {}\n", i));
        }
        raw.push_str("    # Minimum value is 2\n");
        assert_eq!(extract_range(&raw, "Game", "opt"), (None, None));
    }

    #[test]
    fn test_regex_metacharacters_in_names() {
        let raw = "A Link (Past):\n  opt.x:\n    # Minimum value is 4\n    5: 50\n";
        assert_eq!(extract_range(raw, "A Link (Past)", "opt.x"), (Some(4), None));
    }
}
