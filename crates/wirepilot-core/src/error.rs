use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("unable to determine application directories")]
    NoProjectDirs,
}
