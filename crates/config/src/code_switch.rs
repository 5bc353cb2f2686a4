//! Code-switch orchestration configuration

use codemix_core::LanguageLabel;
use serde::{Deserialize, Serialize};

/// Language detector variants
///
/// `Crf`, `Cnn` and `Rnn` are provided by external model crates and must be
/// registered with the detector registry; `Lexicon` is built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DetectorKind {
    #[default]
    Crf,
    Cnn,
    Rnn,
    Lexicon,
}

impl DetectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crf => "crf",
            Self::Cnn => "cnn",
            Self::Rnn => "rnn",
            Self::Lexicon => "lexicon",
        }
    }
}

impl std::fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code-switch normalizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeSwitchConfig {
    /// Which language detector to build
    #[serde(default)]
    pub detector: DetectorKind,
    /// Canonical output language
    #[serde(default)]
    pub target_language: LanguageLabel,
    /// Default for callers that do not pass the flag explicitly
    #[serde(default)]
    pub skip_normalization: bool,
}

impl Default for CodeSwitchConfig {
    fn default() -> Self {
        Self {
            detector: DetectorKind::Crf,
            target_language: LanguageLabel::Indonesian,
            skip_normalization: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodeSwitchConfig::default();
        assert_eq!(config.detector, DetectorKind::Crf);
        assert_eq!(config.target_language, LanguageLabel::Indonesian);
        assert!(!config.skip_normalization);
    }

    #[test]
    fn test_parse_config() {
        let config: CodeSwitchConfig = toml::from_str(
            r#"
            detector = "lexicon"
            target_language = "j"
            "#,
        )
        .unwrap();

        assert_eq!(config.detector, DetectorKind::Lexicon);
        assert_eq!(config.target_language, LanguageLabel::Javanese);
    }
}
