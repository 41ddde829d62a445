use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walking directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("invalid owner {owner:?}: {reason}")]
    InvalidOwner { owner: String, reason: String },

    #[error("empty protect string: at least one owner is required")]
    EmptyOwners,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("parsing config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
