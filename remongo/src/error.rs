use mongodb::bson;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A filter could not be normalized into a document.
    #[error("failed to serialize filter: {0}")]
    Serialization(#[from] SerializationError),

    /// A document returned by the server could not be decoded into the model.
    #[error("failed to deserialize document: {0}")]
    Deserialization(#[from] bson::de::Error),

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Which half of the BSON round trip failed.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error(transparent)]
    Encode(bson::ser::Error),

    #[error(transparent)]
    Decode(bson::de::Error),
}

impl Error {
    /// Returns the driver error, if this error came from the database driver.
    pub fn as_driver(&self) -> Option<&mongodb::error::Error> {
        match self {
            Self::Driver(err) => Some(err),
            _ => None,
        }
    }
}
