use std::path::PathBuf;

/// Result type for template parsing and generation
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors raised while reading or regenerating a template document
///
/// Only structural problems are errors. Unparseable weights and missing
/// range comments are absorbed by the classifier.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to read template '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Template root must be a mapping")]
    NotAMapping,

    #[error("Template is missing '{0}' field")]
    MissingField(String),

    #[error("Unable to parse {0}: expected a mapping, sequence or scalar")]
    MalformedNode(String),

    #[error("Game block '{0}' is missing from the template document")]
    GameBlockMissing(String),
}

/// Result type for selection binding
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Errors raised when a caller's selection does not fit an option
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("'{value}' is not a valid choice for {key_path} (expected one of: {choices})")]
    UnknownValue {
        key_path: String,
        value: String,
        choices: String,
    },

    #[error("'{value}' is not a number for {key_path}")]
    InvalidNumber { key_path: String, value: String },

    #[error("{value} is outside the range {min}..={max} for {key_path}")]
    OutOfRange {
        key_path: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid assignment '{0}': expected key=value")]
    InvalidAssignment(String),

    #[error("Invalid dictionary entry '{entry}' for {key_path}: expected key:value")]
    InvalidPair { key_path: String, entry: String },
}
