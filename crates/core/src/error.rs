//! Error types shared by collaborator implementations

use thiserror::Error;

/// Errors raised by collaborators (tokenizer, detector, formalizer, translator)
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    #[error("Language detection error: {0}")]
    LanguageDetection(String),

    #[error("Formalization error: {0}")]
    Formalization(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
