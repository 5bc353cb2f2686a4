//! Identity translator

use async_trait::async_trait;
use codemix_core::{LanguageLabel, Result, Translator};

/// Returns its input unchanged
///
/// Useful when the source and target language are mutually intelligible
/// enough, or for wiring a pipeline without network access.
#[derive(Debug, Clone, Copy)]
pub struct NoopTranslator {
    source: LanguageLabel,
    target: LanguageLabel,
}

impl NoopTranslator {
    pub fn new(source: LanguageLabel, target: LanguageLabel) -> Self {
        Self { source, target }
    }
}

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    fn source(&self) -> LanguageLabel {
        self.source
    }

    fn target(&self) -> LanguageLabel {
        self.target
    }

    fn name(&self) -> &str {
        "noop"
    }
}
