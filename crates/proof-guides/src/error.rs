use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid catalog: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GuideError>;
