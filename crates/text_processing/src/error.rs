//! Error types for the text processing pipeline

use std::path::PathBuf;

use codemix_config::DetectorKind;
use codemix_core::LanguageLabel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Slang translator used before training")]
    NotTrained,

    #[error("Invalid rule pattern '{pattern}': {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No translation client for {from} -> {to}")]
    MissingTranslationClient {
        from: LanguageLabel,
        to: LanguageLabel,
    },

    #[error("No language detector registered for '{0}'")]
    UnknownDetector(DetectorKind),

    #[error("Length mismatch in {stage}: expected {expected}, got {actual}")]
    LengthMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to read resource {}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dictionary {}: {source}", .path.display())]
    Dictionary {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Core(#[from] codemix_core::Error),

    #[error(transparent)]
    Config(#[from] codemix_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, TextProcessingError>;
