/// Errors raised while parsing an argument vector or reading results.
///
/// Every variant is fatal to the current parse call. Values accumulated for
/// earlier tokens stay in place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("Ambiguous option '{name}', matches: {}", .candidates.join(", "))]
    AmbiguousOption {
        name: String,
        candidates: Vec<String>,
    },

    #[error("Missing argument for option '{0}'!")]
    MissingArgument(String),

    #[error("Can't convert string to int: '{literal}'")]
    Conversion { name: String, literal: String },

    #[error("Malformed map entry for option '{name}': '{literal}' has no '='")]
    MalformedMapEntry { name: String, literal: String },

    #[error("Option '{0}' takes a value and must be last in a bundle")]
    BundledValue(String),

    #[error("type mismatch for option '{name}': expected {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("option not found: {0}")]
    NotFound(String),
}

/// Errors raised while declaring options, before any parse call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("Option/Alias '{0}' is already defined")]
    Duplicate(String),

    #[error("Option names must not be empty")]
    EmptyName,
}

pub type Result<T> = std::result::Result<T, Error>;
