//! Collaborator traits for the normalization pipeline
//!
//! The orchestrator only talks to its collaborators through these traits, so
//! implementations can be swapped without code changes and mocked in tests.
//!
//! ```text
//! Tokenizer:          raw strings → token sequences
//! LanguageDetector:   token sequences → per-token language labels
//! LexicalFormalizer:  dictionary substitution, same length in and out
//! Translator:         one (source, target) language pair, async
//! ```

mod text_processing;

pub use text_processing::{LanguageDetector, LexicalFormalizer, Tokenizer, Translator};
