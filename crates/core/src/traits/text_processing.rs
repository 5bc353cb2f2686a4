//! Text processing traits

use crate::{LanguageLabel, Result, Token, TokenSequence};
use async_trait::async_trait;

/// Tokenization interface
///
/// Implementations:
/// - `UnicodeTokenizer` - Unicode word boundaries, keeps links/hashtags/mentions whole
/// - external sequence-tagging tokenizers
pub trait Tokenizer: Send + Sync + 'static {
    /// Tokenize every input text, one token sequence per text
    fn tokenize(&self, texts: &[String]) -> Result<Vec<TokenSequence>>;
}

/// Per-token language detection interface
///
/// Implementations:
/// - `LexiconLanguageDetector` - word-list lookup
/// - external CRF/CNN/RNN taggers, registered through `DetectorRegistry`
///
/// # Example
///
/// ```ignore
/// let labels = detector.predict(&[vec!["abdi".into(), "mau".into(), "makan".into()]])?;
/// // [[Sundanese, Indonesian, Indonesian]]
/// ```
pub trait LanguageDetector: Send + Sync + 'static {
    /// Load model resources
    fn load(&mut self) -> Result<()>;

    /// Predict one label per token, aligned by position
    fn predict(&self, sequences: &[TokenSequence]) -> Result<Vec<Vec<LanguageLabel>>>;

    /// Get detector name for logging
    fn name(&self) -> &str;
}

/// Dictionary-based lexical formalization
pub trait LexicalFormalizer: Send + Sync + 'static {
    /// Replace informal tokens by their formal dictionary form
    ///
    /// The output has the same length as the input.
    fn formalize(&self, tokens: &[Token]) -> TokenSequence;
}

/// Pairwise translation client
///
/// One client serves exactly one ordered (source, target) language pair.
/// Credentials and endpoints are configuration of the implementation.
///
/// # Example
///
/// ```ignore
/// let client: Arc<dyn Translator> = Arc::new(SomeApiClient::new(Sundanese, Indonesian, key));
/// let text = client.translate("abdi bade tuang").await?;
/// // "saya mau makan"
/// ```
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translate text from `source()` to `target()`
    async fn translate(&self, text: &str) -> Result<String>;

    /// Source language of this client
    fn source(&self) -> LanguageLabel;

    /// Target language of this client
    fn target(&self) -> LanguageLabel;

    /// Get translator name for logging
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTranslator;

    #[async_trait]
    impl Translator for MockTranslator {
        async fn translate(&self, text: &str) -> Result<String> {
            Ok(format!("[Translated: {}]", text))
        }

        fn source(&self) -> LanguageLabel {
            LanguageLabel::Sundanese
        }

        fn target(&self) -> LanguageLabel {
            LanguageLabel::Indonesian
        }

        fn name(&self) -> &str {
            "mock-translator"
        }
    }

    struct UpperFormalizer;

    impl LexicalFormalizer for UpperFormalizer {
        fn formalize(&self, tokens: &[Token]) -> TokenSequence {
            tokens.iter().map(|t| t.to_uppercase()).collect()
        }
    }

    #[tokio::test]
    async fn test_mock_translator() {
        let translator = MockTranslator;
        assert_eq!(translator.source(), LanguageLabel::Sundanese);

        let result = translator.translate("abdi").await.unwrap();
        assert!(result.contains("Translated"));
    }

    #[test]
    fn test_formalizer_is_object_safe() {
        let formalizer: Box<dyn LexicalFormalizer> = Box::new(UpperFormalizer);
        let out = formalizer.formalize(&["sy".to_string(), "mau".to_string()]);
        assert_eq!(out, vec!["SY", "MAU"]);
    }
}
