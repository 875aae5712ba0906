use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0}")]
    Message(String),
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
}

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        ValidationError::Message(value)
    }
}

impl From<&'static str> for ValidationError {
    fn from(value: &'static str) -> Self {
        ValidationError::Message(value.to_owned())
    }
}
