use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("could not read dataset '{}': {source}", path.display())]
    Io { source: io::Error, path: PathBuf },
    #[error("could not fetch dataset '{url}': {source}")]
    Fetch { source: reqwest::Error, url: String },
    #[error(transparent)]
    Join(#[from] JoinError),
    #[error("malformed dataset: {0}")]
    Parse(#[from] csv::Error),
    #[error("malformed dataset: missing header row")]
    MissingHeader,
    #[error("unsupported delimiter '{0}', must be a single ASCII character")]
    InvalidDelimiter(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetErrorKind {
    /// The text could not be obtained.
    Load,
    /// The text is not valid delimited data.
    Parse,
}

impl DatasetError {
    pub fn kind(&self) -> DatasetErrorKind {
        match self {
            DatasetError::Io { .. } | DatasetError::Fetch { .. } | DatasetError::Join(_) => DatasetErrorKind::Load,
            DatasetError::Parse(_) | DatasetError::MissingHeader | DatasetError::InvalidDelimiter(_) => DatasetErrorKind::Parse,
        }
    }

    /// The message shown to the user when the dataset cannot be used.
    pub fn user_message(&self) -> String {
        match self.kind() {
            DatasetErrorKind::Load => format!("Failed to load the location data: {}", self),
            DatasetErrorKind::Parse => format!("Failed to read the location data: {}", self),
        }
    }
}
