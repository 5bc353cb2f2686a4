//! Code-switch normalization for informal Indonesian text
//!
//! This crate turns code-mixed, slang-heavy social media text into formal
//! text in one target language:
//! - **Classification**: Punctuation, emoji, hashtag, link and mention masking
//! - **Rule Normalization**: Prefix, suffix, numeric, reduplication and repetition rules
//! - **Slang Translation**: Phrase-based statistical translation (IBM1/IBM2 + n-gram LM)
//! - **Language Detection**: Detector registry with a built-in lexicon detector
//! - **Code-Switch Translation**: Matrix/embedding language hops through translation clients
//!
//! # Example
//!
//! ```ignore
//! use codemix_text_processing::{CodeSwitchInput, CodeSwitchNormalizer, DetectorRegistry};
//!
//! let settings = codemix_config::load_settings(Path::new("config"), None)?;
//! let normalizer = CodeSwitchNormalizer::from_settings(&settings, &DetectorRegistry::new())?;
//! normalizer.slang_translator().train(&pairs, settings.slang_translation.iterations)?;
//!
//! let out = normalizer
//!     .translate(CodeSwitchInput::Raw(vec!["sy mau makan 5rb nasi".into()]), false)
//!     .await?;
//! ```

pub mod classify;
pub mod detection;
pub mod formalization;
pub mod normalization;
pub mod smt;
pub mod tokenizer;
pub mod translation;

mod error;
mod pipeline;

pub use error::{Result, TextProcessingError};
pub use pipeline::{
    matrix_embed_language, CodeSwitchComponents, CodeSwitchInput, CodeSwitchNormalizer,
    LanguageMix,
};

// Re-export key types
pub use classify::{mask_tokens, MaskedTokens};
pub use detection::{DetectorRegistry, LexiconLanguageDetector};
pub use formalization::DictionaryFormalizer;
pub use normalization::{reduce_repetition, RuleNormalizer, RuleSet, Vocabulary};
pub use smt::{ParallelPair, SlangTranslator, StackDecoder, TrainedModel};
pub use tokenizer::UnicodeTokenizer;
pub use translation::{NoopTranslator, TranslationClients};
