use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("No puzzle words were supplied")]
    EmptyWordList,

    #[error("Invalid puzzle word {word:?}: words must be non-empty and contain only ASCII letters")]
    InvalidWord { word: String },

    #[error("Word '{word}' has {length} letters but the grid allows at most {max}")]
    WordTooLong {
        word: String,
        length: usize,
        max: usize,
    },

    #[error("No board could place {level} of {total_words} words; the word set does not fit this grid")]
    Infeasible { level: usize, total_words: usize },
}
