use thiserror::Error;

#[derive(Error, Debug)]
pub enum NullError {
    #[error("Decode error for {data_type}: {message}")]
    Decode { data_type: &'static str, message: String },
    #[error("Encode error for {data_type}: {message}")]
    Encode { data_type: &'static str, message: String },
    #[error("Conversion error: cannot convert {from} into {to}: {message}")]
    Conversion { from: &'static str, to: &'static str, message: String },
    #[error("Array literal error in '{literal}': {message}")]
    ArrayLiteral { literal: String, message: String },
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, NullError>;

// Helper conversions
impl From<rusqlite::Error> for NullError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}
impl From<config::ConfigError> for NullError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
