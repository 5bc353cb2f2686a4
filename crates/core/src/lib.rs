//! Core traits and types for code-switch normalization
//!
//! This crate provides foundational types used across the other crates:
//! - Language labels assigned per token by a language detector
//! - Token and token-sequence aliases
//! - Collaborator traits (tokenizer, language detector, formalizer, translator)
//! - Error types

pub mod error;
pub mod language;
pub mod token;
pub mod traits;

pub use error::{Error, Result};
pub use language::LanguageLabel;
pub use token::{join_tokens, Token, TokenSequence};

pub use traits::{LanguageDetector, LexicalFormalizer, Tokenizer, Translator};
