use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request to {location} failed with status {status}")]
    Status { location: String, status: u16 },

    #[error("request to {location} failed: {source}")]
    Network {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {location}: {source}")]
    Json {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{location} has no array named {key:?}")]
    MissingArray { location: String, key: String },

    #[error("failed to write stored value {key:?}: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode stored value {key:?}: {source}")]
    StorageEncode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Form validation failures. The display text is what the user is shown.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your full name.")]
    MissingFullName,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please select a subject.")]
    MissingSubject,
    #[error("Please enter a message.")]
    MissingMessage,
    #[error("Please fill out this field")]
    MissingField(&'static str),
    #[error("Please enter at least 7 letters (letters, spaces, hyphens only)")]
    InvalidName(&'static str),
    #[error("Please select a membership level.")]
    MissingMembership,
}
