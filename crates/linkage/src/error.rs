use std::fmt;

#[derive(Debug)]
pub enum LinkageError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (conflicting source, bad timeout, etc.).
    ConfigValidation(String),
    /// A source section sets both `path` and `url`.
    AmbiguousSource { name: String },
}

impl fmt::Display for LinkageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::AmbiguousSource { name } => {
                write!(f, "source '{name}': set either `path` or `url`, not both")
            }
        }
    }
}

impl std::error::Error for LinkageError {}
