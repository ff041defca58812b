//! Deck and controller error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("deck has no cards")]
    EmptyDeck,

    #[error("card {index} has a blank title")]
    BlankTitle { index: usize },

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("deck parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StackResult<T> = Result<T, StackError>;
