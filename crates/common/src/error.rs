use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Field names a rejected submission was missing, if that is what failed.
    pub fn missing_fields(&self) -> Option<&[&'static str]> {
        match self {
            Error::MissingFields(fields) => Some(fields),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
