use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown sex code: {0} (expected 1 = male or 2 = female)")]
    UnknownSex(String),
    #[error("unknown indicator: {0} (expected bfa or hfa)")]
    UnknownIndicator(String),
}
