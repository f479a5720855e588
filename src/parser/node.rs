//! Tagged YAML node tree
//!
//! Templates are loaded through `serde_yaml` and converted into an explicit
//! `Node` tree. Mappings keep their entries in document order and are
//! addressed by the text of their scalar keys, so `1:` and `'1':` name the
//! same entry. Converting back to `serde_yaml::Value` keeps the original key
//! and scalar kinds, which keeps numeric and boolean keys unquoted on output.

use crate::models::TemplateResult;
use serde::Deserialize;
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Number, Value};

/// A scalar value with its resolved YAML kind
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    pub fn string(value: impl Into<String>) -> Self {
        Scalar::String(value.into())
    }

    pub fn int(value: i64) -> Self {
        Scalar::Number(Number::from(value))
    }

    /// Text form of the scalar (`null` becomes the empty string)
    pub fn text(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::String(s) => s.clone(),
        }
    }

    /// Integer value of the scalar text, if it is one
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Number(n) => n.as_i64().or_else(|| parse_int(&n.to_string())),
            Scalar::String(s) => parse_int(s),
            Scalar::Null | Scalar::Bool(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }
}

/// Parse an integer the way template authors write them (surrounding
/// whitespace and a leading sign allowed)
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// Node with an explicit local tag (`!tag value`)
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedNode {
    pub tag: String,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Mapping),
    Tagged(Box<TaggedNode>),
}

impl Node {
    pub fn string(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::string(value))
    }

    pub fn int(value: i64) -> Self {
        Node::Scalar(Scalar::int(value))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Scalar text, if this node is a scalar
    pub fn scalar_text(&self) -> Option<String> {
        self.as_scalar().map(Scalar::text)
    }

    /// Empty mapping, empty sequence or blank scalar
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Scalar(s) => s.is_blank(),
            Node::Sequence(items) => items.is_empty(),
            Node::Mapping(m) => m.is_empty(),
            Node::Tagged(_) => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(_) => "scalar",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
            Node::Tagged(_) => "tagged",
        }
    }

    /// The node under one level of tag, or the node itself
    pub fn untagged(&self) -> &Node {
        match self {
            Node::Tagged(tagged) => &tagged.value,
            other => other,
        }
    }

    /// Mutable [`Node::untagged`]; edits through it keep the tag in place
    pub fn untagged_mut(&mut self) -> &mut Node {
        match self {
            Node::Tagged(tagged) => &mut tagged.value,
            other => other,
        }
    }
}

/// Ordered mapping addressed by scalar key text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(Node, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Node, &mut Node)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    /// Text of every scalar key, in document order (complex keys are skipped)
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|(k, _)| k.scalar_text())
            .collect()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.as_scalar().is_some_and(|s| s.text() == key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        let index = self.position(key)?;
        Some(&mut self.entries[index].1)
    }

    /// Text of a scalar child
    pub fn scalar(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Node::scalar_text)
    }

    /// Insert under a key node, replacing an entry whose key has the same
    /// text in place (the original key node is kept)
    pub fn insert(&mut self, key: Node, value: Node) {
        let existing = key
            .scalar_text()
            .and_then(|text| self.position(&text));
        match existing {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert under a string key
    pub fn set(&mut self, key: &str, value: Node) {
        self.insert(Node::string(key), value);
    }
}

impl FromIterator<(Node, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Node, Node)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(Scalar::Number(n)),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Mapping(Mapping {
                entries: map
                    .into_iter()
                    .map(|(k, v)| (Node::from(k), Node::from(v)))
                    .collect(),
            }),
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;
                Node::Tagged(Box::new(TaggedNode {
                    tag: tag.to_string(),
                    value: Node::from(value),
                }))
            }
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Scalar(Scalar::Null) => Value::Null,
            Node::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            Node::Scalar(Scalar::Number(n)) => Value::Number(n),
            Node::Scalar(Scalar::String(s)) => Value::String(s),
            Node::Sequence(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            Node::Mapping(mapping) => {
                let mut map = serde_yaml::Mapping::new();
                for (k, v) in mapping.entries {
                    map.insert(Value::from(k), Value::from(v));
                }
                Value::Mapping(map)
            }
            Node::Tagged(tagged) => {
                let TaggedNode { tag, value } = *tagged;
                Value::Tagged(Box::new(TaggedValue {
                    tag: Tag::new(tag),
                    value: Value::from(value),
                }))
            }
        }
    }
}

/// Parse the first YAML document of `text` into a node tree
///
/// An empty input yields a null scalar.
pub fn parse_document(text: &str) -> TemplateResult<Node> {
    let value = match serde_yaml::Deserializer::from_str(text).next() {
        Some(document) => Value::deserialize(document)?,
        None => Value::Null,
    };
    Ok(Node::from(value))
}

/// Serialize a node tree back to YAML text
pub fn to_yaml_string(node: Node) -> TemplateResult<String> {
    Ok(serde_yaml::to_string(&Value::from(node))?)
}
