//! Unicode word-boundary tokenizer
//!
//! Splits on whitespace, then on Unicode word boundaries. Links, hashtags and
//! user mentions are kept as single tokens so the maskers can see them.

use codemix_core::{Result, TokenSequence, Tokenizer};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static WHOLE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?i:https?://|www\.)\S+|[#@]\w+)$").expect("valid whole-token regex")
});

/// Tokenizer based on UAX #29 word boundaries
#[derive(Debug, Clone, Default)]
pub struct UnicodeTokenizer;

impl UnicodeTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenize one text
    pub fn tokenize_text(&self, text: &str) -> TokenSequence {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            if WHOLE_TOKEN.is_match(chunk) {
                tokens.push(chunk.to_string());
                continue;
            }
            tokens.extend(
                chunk
                    .split_word_bounds()
                    .filter(|segment| !segment.trim().is_empty())
                    .map(str::to_string),
            );
        }
        tokens
    }
}

impl Tokenizer for UnicodeTokenizer {
    fn tokenize(&self, texts: &[String]) -> Result<Vec<TokenSequence>> {
        Ok(texts.iter().map(|text| self.tokenize_text(text)).collect())
    }
}
