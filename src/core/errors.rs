use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinuswordError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid exclusion pattern '{entry}': {source}")]
    InvalidPattern {
        entry: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("No phrases to process")]
    EmptyInput,

    #[error("No group or phrase named '{0}'")]
    UnknownTarget(String),

    #[error("MinuswordError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for MinuswordError {
    fn from(error: std::io::Error) -> Self {
        MinuswordError::Io(Box::new(error))
    }
}

impl MinuswordError {
    pub fn invalid_pattern(entry: &str, error: regex::Error) -> Self {
        MinuswordError::InvalidPattern { entry: entry.to_string(), source: Box::new(error) }
    }
}
