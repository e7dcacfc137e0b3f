use thiserror::Error;

/// Failures at the crate boundary: reading input, parsing it, loading config
/// and writing rendered output. Rendering itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid article JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Article JSON ended early (truncated input?): {0}")]
    Truncated(#[source] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if crate::utils::looks_truncated(&e) {
            Error::Truncated(e)
        } else {
            Error::Json(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
