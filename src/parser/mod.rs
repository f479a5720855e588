pub mod classifier;
pub mod node;
pub mod range;
pub mod template;

pub use classifier::{classify, is_boolean_keys, is_special_key, normalize_key, SPECIAL_KEYS};
pub use node::{parse_document, to_yaml_string, Mapping, Node, Scalar};
pub use range::extract_range;
pub use template::{
    parse_from_file, parse_from_file_with, parse_template, parse_template_with, EmptyEntryPolicy,
    ParseOptions,
};
