//! Option classifier
//!
//! Turns one weight mapping from a template into a typed
//! [`RandomizerOption`]. Classification is an ordered rule list evaluated
//! top to bottom; the first rule whose predicate holds builds the option:
//!
//! 1. numeric: at least one integer key (special selectors may coexist)
//! 2. boolean: the key set is exactly `{true, false}`
//! 3. enum: anything else

use super::node::{parse_int, Mapping, Node, Scalar};
use super::range::extract_range;
use crate::models::{OptionType, RandomizerOption};
use indexmap::IndexMap;

/// Non-numeric selectors that may appear inside a numeric option block
pub const SPECIAL_KEYS: &[&str] = &[
    "random",
    "random-low",
    "random_low",
    "random-high",
    "random_high",
    "disabled",
    "normal",
    "extreme",
];

/// Trim, strip one pair of matching quotes and lower-case a key
pub fn normalize_key(key: &str) -> String {
    let trimmed = key.trim();
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed);
    unquoted.to_lowercase()
}

pub fn is_special_key(key: &str) -> bool {
    SPECIAL_KEYS.contains(&normalize_key(key).as_str())
}

/// Exactly the keys `true` and `false`, ignoring case and quotes
pub fn is_boolean_keys<S: AsRef<str>>(keys: &[S]) -> bool {
    let mut normalized: Vec<String> = keys.iter().map(|k| normalize_key(k.as_ref())).collect();
    normalized.sort();
    normalized.dedup();
    normalized.len() == keys.len() && normalized == ["false", "true"]
}

/// Integer weight of a value node; anything unparseable weighs 0
pub fn weight_of(node: &Node) -> i64 {
    node.as_scalar().and_then(Scalar::as_int).unwrap_or(0)
}

/// Keys of an option block split by role, in document order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct KeyBreakdown {
    /// All keys in document order with their weights
    pub entries: Vec<(String, i64)>,
    /// Integer keys in document order
    pub numeric_keys: Vec<i64>,
    /// Integer keys by their text, in document order
    pub numeric_weights: IndexMap<String, i64>,
    /// Special selector keys
    pub specials: IndexMap<String, i64>,
    /// Every other key
    pub others: IndexMap<String, i64>,
}

impl KeyBreakdown {
    pub fn from_mapping(mapping: &Mapping) -> Self {
        let mut breakdown = KeyBreakdown::default();
        for (key_node, value) in mapping.iter() {
            let Some(key) = key_node.scalar_text() else {
                continue;
            };
            let weight = weight_of(value);
            breakdown.entries.push((key.clone(), weight));

            if let Some(number) = parse_int(&key) {
                breakdown.numeric_keys.push(number);
                breakdown.numeric_weights.insert(key, weight);
            } else if is_special_key(&key) {
                breakdown.specials.insert(key, weight);
            } else {
                breakdown.others.insert(key, weight);
            }
        }
        breakdown
    }

    fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// All keys and weights in document order, specials included
    fn all_weights(&self) -> IndexMap<String, i64> {
        self.entries.iter().cloned().collect()
    }

    /// Numeric and plain keys in document order, specials left out
    fn weights_without_specials(&self) -> IndexMap<String, i64> {
        self.entries
            .iter()
            .filter(|(k, _)| !self.specials.contains_key(k))
            .cloned()
            .collect()
    }
}

/// Everything a classification rule can look at
pub struct ClassifyContext<'a> {
    pub game_name: &'a str,
    pub key: &'a str,
    pub raw_text: &'a str,
    pub breakdown: &'a KeyBreakdown,
}

/// One entry of the ordered rule list
pub struct ClassificationRule {
    pub option_type: OptionType,
    pub applies: fn(&KeyBreakdown) -> bool,
    pub build: fn(&ClassifyContext<'_>) -> RandomizerOption,
}

/// Classification rules in precedence order
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        option_type: OptionType::NumericWeighted,
        applies: has_numeric_keys,
        build: build_numeric,
    },
    ClassificationRule {
        option_type: OptionType::BooleanWeighted,
        applies: has_boolean_keys,
        build: build_boolean,
    },
    ClassificationRule {
        option_type: OptionType::EnumWeighted,
        applies: always,
        build: build_enum,
    },
];

fn has_numeric_keys(breakdown: &KeyBreakdown) -> bool {
    !breakdown.numeric_keys.is_empty()
}

fn has_boolean_keys(breakdown: &KeyBreakdown) -> bool {
    is_boolean_keys(&breakdown.keys())
}

fn always(_: &KeyBreakdown) -> bool {
    true
}

/// Key with the highest weight; the first one wins ties
fn heaviest<'a, I>(entries: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a String, &'a i64)>,
{
    let mut best: Option<(&'a str, i64)> = None;
    for (key, &weight) in entries {
        if best.map_or(true, |(_, w)| weight > w) {
            best = Some((key.as_str(), weight));
        }
    }
    best.map(|(key, _)| key)
}

fn build_numeric(ctx: &ClassifyContext<'_>) -> RandomizerOption {
    let breakdown = ctx.breakdown;
    let (range_min, range_max) = extract_range(ctx.raw_text, ctx.game_name, ctx.key);

    // has_numeric_keys guarantees at least one key
    let key_min = breakdown.numeric_keys.iter().copied().min().unwrap_or_default();
    let key_max = breakdown.numeric_keys.iter().copied().max().unwrap_or_default();
    let min = range_min.unwrap_or(key_min);
    let max = range_max.unwrap_or(key_max);

    let mut default_numeric = key_min;
    let mut best_weight = i64::MIN;
    for (key, &weight) in &breakdown.numeric_weights {
        if weight > best_weight {
            best_weight = weight;
            default_numeric = parse_int(key).unwrap_or(default_numeric);
        }
    }
    if min <= max {
        default_numeric = default_numeric.clamp(min, max);
    }

    tracing::debug!(
        option = ctx.key,
        min,
        max,
        default = default_numeric,
        "classified numeric option"
    );

    RandomizerOption {
        weights: breakdown.weights_without_specials(),
        specials: breakdown.specials.clone(),
        min: Some(min),
        max: Some(max),
        default_numeric: Some(default_numeric),
        selected_number: Some(default_numeric),
        ..RandomizerOption::new(ctx.game_name, ctx.key, OptionType::NumericWeighted)
    }
}

fn build_boolean(ctx: &ClassifyContext<'_>) -> RandomizerOption {
    build_choice(ctx, OptionType::BooleanWeighted)
}

fn build_enum(ctx: &ClassifyContext<'_>) -> RandomizerOption {
    build_choice(ctx, OptionType::EnumWeighted)
}

fn build_choice(ctx: &ClassifyContext<'_>, option_type: OptionType) -> RandomizerOption {
    let weights = ctx.breakdown.all_weights();
    let selected_value = heaviest(&weights).map(str::to_string);
    RandomizerOption {
        weights,
        selected_value,
        ..RandomizerOption::new(ctx.game_name, ctx.key, option_type)
    }
}

/// Classify a weight mapping found under `game_name.key`
///
/// `raw_text` is only consulted for range comments.
pub fn classify(game_name: &str, key: &str, mapping: &Mapping, raw_text: &str) -> RandomizerOption {
    let breakdown = KeyBreakdown::from_mapping(mapping);
    if breakdown.entries.is_empty() {
        return RandomizerOption::dictionary(game_name, key, IndexMap::new());
    }

    let ctx = ClassifyContext {
        game_name,
        key,
        raw_text,
        breakdown: &breakdown,
    };
    RULES
        .iter()
        .find(|rule| (rule.applies)(&breakdown))
        .map(|rule| (rule.build)(&ctx))
        .unwrap_or_else(|| build_enum(&ctx))
}
