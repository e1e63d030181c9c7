use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Unknown selector: {0}")]
    UnknownSelector(String),

    #[error("Invalid battery profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid world layout: {0}")]
    InvalidLayout(String),

    #[error("World generation failed: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeliveryError>;
